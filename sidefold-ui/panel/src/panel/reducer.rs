use std::time::Duration;

use crate::animation::{Animator, Easing, PlayerId, Transition};
use crate::breakpoints::BreakpointSource;
use crate::dom::{Dom, DomEventKind, ElementId};
use crate::errors::{DomError, PanelError};
use crate::layout::LayoutSource;
use crate::model::{
    BACKDROP_CLASS, BACKDROP_INVISIBLE_CLASS, CLASS_ANIMATIONS_ENABLED,
    CLASS_FOLDED, CLASS_LOCKED_OPEN, CLASS_OPEN, CLASS_UNFOLDED,
    PANEL_ANIMATION, PanelConfig, PanelPosition,
};
use crate::timer::{Scheduler, TimerId};

use super::event::{PanelEffect, PanelIntent};
use super::state::PanelState;

/// Collaborators a panel reduces against.
pub struct PanelCtx<'a> {
    pub dom: &'a mut dyn Dom,
    pub animator: &'a mut dyn Animator,
    pub scheduler: &'a mut dyn Scheduler,
    pub breakpoints: &'a mut dyn BreakpointSource,
    pub layout: &'a dyn LayoutSource,
}

/// Reduce an intent into state updates, element tree mutations and effects.
pub(super) fn reduce(
    state: &mut PanelState,
    config: &PanelConfig,
    intent: PanelIntent,
    ctx: &mut PanelCtx<'_>,
) -> Result<Vec<PanelEffect>, PanelError> {
    let before = state.snapshot();

    match intent {
        PanelIntent::Open => open(state, config, ctx)?,
        PanelIntent::Close | PanelIntent::BackdropClicked => {
            close(state, config, ctx)?
        },
        PanelIntent::ToggleOpen => {
            if state.is_opened() {
                close(state, config, ctx)?;
            } else {
                open(state, config, ctx)?;
            }
        },
        PanelIntent::Fold => fold(state, config, ctx.dom)?,
        PanelIntent::Unfold => unfold(state, config, ctx.dom)?,
        PanelIntent::ToggleFold => {
            if state.is_folded() {
                unfold(state, config, ctx.dom)?;
            } else {
                fold(state, config, ctx.dom)?;
            }
        },
        PanelIntent::PointerEntered => set_hover_unfold(state, config, true),
        PanelIntent::PointerLeft => set_hover_unfold(state, config, false),
        PanelIntent::AnimationDone(id) => animation_done(state, id, ctx.dom)?,
        PanelIntent::TimerFired(id) => timer_fired(state, id, ctx.dom)?,
        PanelIntent::BreakpointsChanged => {
            breakpoints_changed(state, config, ctx)?
        },
    }

    render(state, ctx.dom)?;
    Ok(before.diff(state.snapshot()))
}

/// Mount-time setup: hide, tag position, arm the responsive watcher.
pub(super) fn start(
    state: &mut PanelState,
    config: &PanelConfig,
    ctx: &mut PanelCtx<'_>,
) -> Result<(), PanelError> {
    if state.is_started() {
        return Ok(());
    }

    apply_hidden(state.element(), ctx.dom)?;
    ctx.dom
        .add_class(state.element(), config.position.class_name())?;
    setup_locked_open(state, config, ctx)?;
    state.set_started(true);
    render(state, ctx.dom)?;

    log::debug!("panel '{}' started", config.name);
    Ok(())
}

/// Unmount-time teardown: revert the fold, drop the backdrop, release
/// subscriptions.
pub(super) fn stop(
    state: &mut PanelState,
    config: &PanelConfig,
    ctx: &mut PanelCtx<'_>,
) -> Result<Vec<PanelEffect>, PanelError> {
    let before = state.snapshot();

    if state.is_folded() {
        unfold(state, config, ctx.dom)?;
    }
    // A fold kept through a close survives `unfold`; revert it directly.
    if state.is_folded() {
        state.set_folded(false);
        update_sibling_margin(state, config, false, ctx.dom)?;
    }

    if let Some(backdrop) = state.take_backdrop() {
        remove_element(backdrop, ctx.dom)?;
    }
    state.clear_player();
    state.subscriptions_mut().release(ctx.breakpoints);
    state.set_started(false);
    render(state, ctx.dom)?;

    log::debug!("panel '{}' stopped", config.name);
    Ok(before.diff(state.snapshot()))
}

fn open(
    state: &mut PanelState,
    config: &PanelConfig,
    ctx: &mut PanelCtx<'_>,
) -> Result<(), PanelError> {
    if state.is_opened() || state.is_locked_open() {
        return Ok(());
    }

    state.enable_animations();
    show_sidebar(state.element(), ctx.dom)?;
    show_backdrop(state, config, ctx)?;
    state.set_opened(true);

    log::debug!("panel '{}' opened", config.name);
    Ok(())
}

fn close(
    state: &mut PanelState,
    config: &PanelConfig,
    ctx: &mut PanelCtx<'_>,
) -> Result<(), PanelError> {
    if !state.is_opened() || state.is_locked_open() {
        return Ok(());
    }

    state.enable_animations();
    hide_backdrop(state, ctx.animator);
    state.set_opened(false);
    let delay = state.animations_enabled();
    hide_sidebar(state, ctx.scheduler, delay);

    log::debug!("panel '{}' closed", config.name);
    Ok(())
}

fn fold(
    state: &mut PanelState,
    config: &PanelConfig,
    dom: &mut dyn Dom,
) -> Result<(), PanelError> {
    if state.is_folded() {
        return Ok(());
    }

    state.enable_animations();
    set_folded(state, config, true, dom)
}

fn unfold(
    state: &mut PanelState,
    config: &PanelConfig,
    dom: &mut dyn Dom,
) -> Result<(), PanelError> {
    if !state.is_folded() {
        return Ok(());
    }

    state.enable_animations();
    set_folded(state, config, false, dom)
}

/// Folded setter: ignored while closed, otherwise stores the flag and
/// adjusts the neighbour margin.
fn set_folded(
    state: &mut PanelState,
    config: &PanelConfig,
    folded: bool,
    dom: &mut dyn Dom,
) -> Result<(), PanelError> {
    if !state.is_opened() {
        log::trace!(
            "panel '{}' is closed, folded={folded} dropped",
            config.name
        );
        return Ok(());
    }

    state.set_folded(folded);
    update_sibling_margin(state, config, folded, dom)?;

    log::debug!("panel '{}' folded={folded}", config.name);
    Ok(())
}

fn update_sibling_margin(
    state: &PanelState,
    config: &PanelConfig,
    folded: bool,
    dom: &mut dyn Dom,
) -> Result<(), DomError> {
    let sibling = match config.position {
        PanelPosition::Left => dom.next_sibling(state.element()),
        PanelPosition::Right => dom.previous_sibling(state.element()),
    };
    let Some(sibling) = sibling else {
        return Ok(());
    };

    let property = config.position.margin_property();
    if folded {
        dom.set_style(sibling, property, &format!("{}px", config.folded_width))
    } else {
        dom.remove_style(sibling, property)
    }
}

fn set_hover_unfold(
    state: &mut PanelState,
    config: &PanelConfig,
    unfolded: bool,
) {
    if !config.folded_auto_trigger_on_hover || !state.is_folded() {
        return;
    }

    state.enable_animations();
    state.set_unfolded(unfolded);
}

fn apply_hidden(el: ElementId, dom: &mut dyn Dom) -> Result<(), DomError> {
    dom.set_style(el, "box-shadow", "none")?;
    dom.set_style(el, "visibility", "hidden")
}

fn show_sidebar(el: ElementId, dom: &mut dyn Dom) -> Result<(), DomError> {
    dom.remove_style(el, "box-shadow")?;
    dom.remove_style(el, "visibility")
}

/// Schedule the hidden style, after the panel animation when `delay` is set.
fn hide_sidebar(
    state: &mut PanelState,
    scheduler: &mut dyn Scheduler,
    delay: bool,
) {
    let delay = if delay {
        PANEL_ANIMATION
    } else {
        Duration::ZERO
    };
    let id = scheduler.schedule(delay);
    state.push_pending_hide(id);
}

fn timer_fired(
    state: &mut PanelState,
    id: TimerId,
    dom: &mut dyn Dom,
) -> Result<(), PanelError> {
    if !state.take_pending_hide(id) {
        return Ok(());
    }
    if state.is_opened() || state.is_locked_open() {
        log::trace!("deferred hide skipped, panel is showing again");
        return Ok(());
    }

    apply_hidden(state.element(), dom)?;
    Ok(())
}

fn show_backdrop(
    state: &mut PanelState,
    config: &PanelConfig,
    ctx: &mut PanelCtx<'_>,
) -> Result<(), PanelError> {
    let Some(parent) = ctx.dom.parent(state.element()) else {
        return Err(DomError::Detached(state.element()).into());
    };

    // A backdrop still fading out is replaced, never duplicated.
    if let Some(stale) = state.take_backdrop() {
        remove_element(stale, ctx.dom)?;
    }

    let backdrop = ctx.dom.create_element("div");
    ctx.dom.add_class(backdrop, BACKDROP_CLASS)?;
    if config.invisible_overlay {
        ctx.dom.add_class(backdrop, BACKDROP_INVISIBLE_CLASS)?;
    }
    ctx.dom.append_child(parent, backdrop)?;
    ctx.dom.listen(backdrop, DomEventKind::Click, &config.name)?;
    state.set_backdrop(Some(backdrop));

    let player = ctx.animator.build(
        backdrop,
        Transition::opacity(Some(0.0), 1.0, PANEL_ANIMATION, Easing::Ease),
    );
    ctx.animator.play(player);
    state.track_player(player, None);

    Ok(())
}

fn hide_backdrop(state: &mut PanelState, animator: &mut dyn Animator) {
    let Some(backdrop) = state.backdrop() else {
        return;
    };

    let player = animator.build(
        backdrop,
        Transition::opacity(None, 0.0, PANEL_ANIMATION, Easing::Ease),
    );
    animator.play(player);
    state.track_player(player, Some(backdrop));
}

fn animation_done(
    state: &mut PanelState,
    id: PlayerId,
    dom: &mut dyn Dom,
) -> Result<(), PanelError> {
    let Some(Some(finished)) = state.finish_player(id) else {
        return Ok(());
    };

    remove_element(finished, dom)?;
    if state.backdrop() == Some(finished) {
        state.set_backdrop(None);
    }
    Ok(())
}

fn remove_element(el: ElementId, dom: &mut dyn Dom) -> Result<(), DomError> {
    match dom.parent(el) {
        Some(parent) => dom.remove_child(parent, el),
        None => Ok(()),
    }
}

fn setup_locked_open(
    state: &mut PanelState,
    config: &PanelConfig,
    ctx: &mut PanelCtx<'_>,
) -> Result<(), PanelError> {
    if config.locked_open.is_none() {
        return Ok(());
    }

    state.set_was_active(false);
    let subscription = ctx.breakpoints.subscribe(&config.name);
    state.subscriptions_mut().push(subscription);
    show_sidebar(state.element(), ctx.dom)?;
    Ok(())
}

fn breakpoints_changed(
    state: &mut PanelState,
    config: &PanelConfig,
    ctx: &mut PanelCtx<'_>,
) -> Result<(), PanelError> {
    let Some(breakpoint) = config.locked_open.as_deref() else {
        return Ok(());
    };
    if !state.is_started() {
        return Ok(());
    }

    let is_active = ctx.breakpoints.is_active(breakpoint);
    if is_active == state.was_active() {
        return Ok(());
    }

    if is_active {
        state.set_locked_open(true);
        show_sidebar(state.element(), ctx.dom)?;
        state.set_opened(true);
        if ctx.layout.navbar_folded() {
            fold(state, config, ctx.dom)?;
        }
        hide_backdrop(state, ctx.animator);
    } else {
        state.set_locked_open(false);
        unfold(state, config, ctx.dom)?;
        state.set_opened(false);
        hide_sidebar(state, ctx.scheduler, true);
    }
    state.set_was_active(is_active);

    log::debug!(
        "panel '{}' locked_open={is_active} at breakpoint '{breakpoint}'",
        config.name
    );
    Ok(())
}

/// Reflect state flags as classes on the panel root.
fn render(state: &PanelState, dom: &mut dyn Dom) -> Result<(), DomError> {
    let el = state.element();
    let classes = [
        (CLASS_OPEN, state.is_opened()),
        (CLASS_FOLDED, state.is_folded()),
        (CLASS_UNFOLDED, state.is_unfolded()),
        (CLASS_LOCKED_OPEN, state.is_locked_open()),
        (CLASS_ANIMATIONS_ENABLED, state.animations_enabled()),
    ];

    for (class, enabled) in classes {
        if enabled {
            dom.add_class(el, class)?;
        } else {
            dom.remove_class(el, class)?;
        }
    }
    Ok(())
}
