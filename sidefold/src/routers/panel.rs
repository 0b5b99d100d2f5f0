use std::time::{Duration, Instant};

use iced::Task;
use sidefold_ui_panel::{
    ElementId, HostEffects, PanelEffect, PanelError, PanelIntent,
};

use crate::app::{App, AppEvent};
use crate::config::{NAVBAR_PANEL, save_shell_config};

pub(crate) const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const MAX_FRAME_STEP: Duration = Duration::from_millis(100);

/// Run a panel intent addressed by registry name.
pub(crate) fn route_intent(
    app: &mut App,
    name: &str,
    intent: PanelIntent,
) -> Task<AppEvent> {
    let remember_fold = name == NAVBAR_PANEL
        && matches!(
            intent,
            PanelIntent::Fold | PanelIntent::Unfold | PanelIntent::ToggleFold
        );
    let result = app.host.dispatch(name, intent);
    route_result(app, result, remember_fold)
}

/// Deliver a press on a backdrop to the panel listening on it.
pub(crate) fn route_backdrop_press(
    app: &mut App,
    element: ElementId,
) -> Task<AppEvent> {
    let result = app.host.click(element);
    route_result(app, result, false)
}

/// Advance animations and deferred hides by the time since the last tick.
pub(crate) fn route_tick(app: &mut App, now: Instant) -> Task<AppEvent> {
    let dt = frame_step(app.last_tick, now);
    let result = app.host.advance(dt);
    app.last_tick = app.host.is_busy().then_some(now);
    route_result(app, result, false)
}

/// Log panel effects, persisting the navigation fold when asked to.
pub(crate) fn route_result(
    app: &mut App,
    result: Result<HostEffects, PanelError>,
    remember_fold: bool,
) -> Task<AppEvent> {
    let effects = match result {
        Ok(effects) => effects,
        Err(err) => {
            log::warn!("panel operation failed: {err}");
            return Task::none();
        },
    };

    for (name, effect) in effects {
        log::debug!("panel '{name}' emitted {effect:?}");
        match effect {
            PanelEffect::FoldedChanged(folded)
                if remember_fold && name == NAVBAR_PANEL =>
            {
                remember_navbar_fold(app, folded)
            },
            _ => {},
        }
    }

    Task::none()
}

fn remember_navbar_fold(app: &mut App, folded: bool) {
    app.config.layout.navbar.folded = folded;
    app.host.set_layout(app.config.layout.clone());
    if let Err(err) = save_shell_config(&app.config) {
        log::warn!("failed to save shell config: {err}");
    }
}

fn frame_step(last_tick: Option<Instant>, now: Instant) -> Duration {
    last_tick
        .map_or(FRAME_INTERVAL, |last| now.saturating_duration_since(last))
        .min(MAX_FRAME_STEP)
}
