use std::collections::BTreeMap;
use std::time::Duration;

use crate::dom::{Dom, ElementId};
use crate::errors::DomError;

/// Handle of a built animation player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(u64);

/// Timing curve of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// CSS `ease`, i.e. `cubic-bezier(0.25, 0.1, 0.25, 1.0)`.
    Ease,
}

impl Easing {
    /// Map linear progress in `[0, 1]` to eased progress.
    pub fn apply(self, progress: f32) -> f32 {
        let progress = progress.clamp(0.0, 1.0);
        match self {
            Easing::Linear => progress,
            Easing::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, progress),
        }
    }
}

/// A single numeric style transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub property: &'static str,
    /// Start value; `None` starts from the element's current value.
    pub from: Option<f32>,
    pub to: f32,
    pub duration: Duration,
    pub easing: Easing,
}

impl Transition {
    /// Build an opacity transition towards `to`.
    pub fn opacity(
        from: Option<f32>,
        to: f32,
        duration: Duration,
        easing: Easing,
    ) -> Self {
        Self {
            property: "opacity",
            from,
            to,
            duration,
            easing,
        }
    }
}

/// Animation facility: build players against elements and start them.
///
/// Completion is reported by the driver (see [`TweenAnimator::advance`]) as
/// the finished [`PlayerId`]s, which hosts route back to the owning panel.
pub trait Animator {
    fn build(&mut self, target: ElementId, transition: Transition) -> PlayerId;

    /// Start a built player. Unknown or already running players are ignored.
    fn play(&mut self, player: PlayerId);
}

#[derive(Debug)]
enum PlayerPhase {
    Built,
    Running { from: f32, elapsed: Duration },
}

#[derive(Debug)]
struct Player {
    target: ElementId,
    transition: Transition,
    phase: PlayerPhase,
}

/// Frame-driven tween animator writing interpolated values into a [`Dom`].
#[derive(Debug, Default)]
pub struct TweenAnimator {
    players: BTreeMap<PlayerId, Player>,
    pending_starts: Vec<PlayerId>,
    next_id: u64,
}

impl TweenAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return whether any player is built or running.
    pub fn is_idle(&self) -> bool {
        self.players.is_empty()
    }

    /// Advance running players by `dt`, returning the players that finished.
    ///
    /// Players started since the previous call snapshot their start value
    /// first. Players whose target left the tree are dropped without being
    /// reported.
    pub fn advance(
        &mut self,
        dt: Duration,
        dom: &mut dyn Dom,
    ) -> Result<Vec<PlayerId>, DomError> {
        for id in std::mem::take(&mut self.pending_starts) {
            self.start(id, dom)?;
        }

        let mut finished = Vec::new();
        let mut orphaned = Vec::new();

        for (id, player) in &mut self.players {
            let PlayerPhase::Running { from, elapsed } = &mut player.phase
            else {
                continue;
            };

            *elapsed += dt;
            let duration = player.transition.duration;
            let progress = if duration.is_zero() {
                1.0
            } else {
                (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
            };
            let eased = player.transition.easing.apply(progress);
            let value = *from + (player.transition.to - *from) * eased;

            match dom.set_style(
                player.target,
                player.transition.property,
                &format_value(value),
            ) {
                Ok(()) => {},
                Err(DomError::UnknownElement(_)) => {
                    log::trace!("animation {id:?} target vanished");
                    orphaned.push(*id);
                    continue;
                },
                Err(err) => return Err(err),
            }

            if progress >= 1.0 {
                finished.push(*id);
            }
        }

        for id in orphaned.iter().chain(finished.iter()) {
            self.players.remove(id);
        }

        Ok(finished)
    }

    fn start(&mut self, id: PlayerId, dom: &mut dyn Dom) -> Result<(), DomError> {
        let Some(player) = self.players.get_mut(&id) else {
            return Ok(());
        };

        let from = player.transition.from.unwrap_or_else(|| {
            dom.style(player.target, player.transition.property)
                .and_then(|value| value.parse::<f32>().ok())
                .unwrap_or(1.0)
        });

        match dom.set_style(
            player.target,
            player.transition.property,
            &format_value(from),
        ) {
            Ok(()) => {
                player.phase = PlayerPhase::Running {
                    from,
                    elapsed: Duration::ZERO,
                };
                Ok(())
            },
            Err(DomError::UnknownElement(_)) => {
                self.players.remove(&id);
                Ok(())
            },
            Err(err) => Err(err),
        }
    }
}

impl Animator for TweenAnimator {
    fn build(&mut self, target: ElementId, transition: Transition) -> PlayerId {
        self.next_id += 1;
        let id = PlayerId(self.next_id);
        log::trace!(
            "animation {id:?} built for {target}: {} -> {}",
            transition.property,
            transition.to
        );
        self.players.insert(
            id,
            Player {
                target,
                transition,
                phase: PlayerPhase::Built,
            },
        );
        id
    }

    fn play(&mut self, player: PlayerId) {
        match self.players.get(&player) {
            Some(Player {
                phase: PlayerPhase::Built,
                ..
            }) => {
                if !self.pending_starts.contains(&player) {
                    self.pending_starts.push(player);
                }
            },
            Some(_) => {},
            None => log::warn!("animation {player:?} is unknown"),
        }
    }
}

fn format_value(value: f32) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{rounded}")
}

/// Solve a CSS cubic-bezier timing function for `x`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    let sample = |a: f32, b: f32, t: f32| {
        let u = 1.0 - t;
        3.0 * u * u * t * a + 3.0 * u * t * t * b + t * t * t
    };
    let slope = |a: f32, b: f32, t: f32| {
        let u = 1.0 - t;
        3.0 * u * u * a + 6.0 * u * t * (b - a) + 3.0 * t * t * (1.0 - b)
    };

    let mut t = x;
    for _ in 0..8 {
        let error = sample(x1, x2, t) - x;
        if error.abs() < 1e-5 {
            break;
        }
        let derivative = slope(x1, x2, t);
        if derivative.abs() < 1e-6 {
            break;
        }
        t = (t - error / derivative).clamp(0.0, 1.0);
    }

    // Newton may stall near flat regions; finish with bisection.
    let (mut low, mut high) = (0.0_f32, 1.0_f32);
    for _ in 0..20 {
        let error = sample(x1, x2, t) - x;
        if error.abs() < 1e-5 {
            break;
        }
        if error > 0.0 {
            high = t;
        } else {
            low = t;
        }
        t = (low + high) / 2.0;
    }

    sample(y1, y2, t)
}
