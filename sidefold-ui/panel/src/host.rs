use std::time::Duration;

use crate::animation::TweenAnimator;
use crate::breakpoints::{BreakpointSet, BreakpointSource};
use crate::dom::{DomEventKind, ElementId, RetainedDom};
use crate::errors::PanelError;
use crate::layout::LayoutConfig;
use crate::model::PanelConfig;
use crate::panel::{PanelCtx, PanelEffect, PanelIntent, SidebarPanel};
use crate::registry::PanelRegistry;
use crate::timer::TimerQueue;

/// Panel effects tagged with the name of the panel that produced them.
pub type HostEffects = Vec<(String, PanelEffect)>;

/// Event-loop driver owning the in-memory collaborators and the registry.
///
/// Every entry point drains the breakpoint notification queue before
/// returning, so panels observe viewport changes in the same turn.
#[derive(Debug)]
pub struct PanelHost {
    dom: RetainedDom,
    animator: TweenAnimator,
    timers: TimerQueue,
    breakpoints: BreakpointSet,
    layout: LayoutConfig,
    registry: PanelRegistry,
}

impl PanelHost {
    pub fn new(breakpoints: BreakpointSet, layout: LayoutConfig) -> Self {
        Self {
            dom: RetainedDom::new(),
            animator: TweenAnimator::new(),
            timers: TimerQueue::new(),
            breakpoints,
            layout,
            registry: PanelRegistry::new(),
        }
    }

    pub fn dom(&self) -> &RetainedDom {
        &self.dom
    }

    /// Mutable tree access for building the shell layout around panels.
    pub fn dom_mut(&mut self) -> &mut RetainedDom {
        &mut self.dom
    }

    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }

    pub fn panel(&self, name: &str) -> Option<&SidebarPanel> {
        self.registry.get(name)
    }

    pub fn breakpoints(&self) -> &BreakpointSet {
        &self.breakpoints
    }

    pub fn set_layout(&mut self, layout: LayoutConfig) {
        self.layout = layout;
    }

    /// Return whether animations or deferred hides are still pending.
    pub fn is_busy(&self) -> bool {
        !self.animator.is_idle() || !self.timers.is_idle()
    }

    /// Create, start and register a panel rendered into `element`.
    pub fn mount(
        &mut self,
        config: PanelConfig,
        element: ElementId,
    ) -> Result<HostEffects, PanelError> {
        let (registry, mut ctx) = self.split();
        registry.mount(SidebarPanel::new(config, element), &mut ctx)?;
        self.pump_breakpoints()
    }

    pub fn unmount(&mut self, name: &str) -> Result<HostEffects, PanelError> {
        let (registry, mut ctx) = self.split();
        let effects = registry.unmount(name, &mut ctx)?;
        Ok(tag(name, effects))
    }

    /// Run an intent against the named panel.
    pub fn dispatch(
        &mut self,
        name: &str,
        intent: PanelIntent,
    ) -> Result<HostEffects, PanelError> {
        let (registry, mut ctx) = self.split();
        let mut effects = tag(name, registry.dispatch(name, intent, &mut ctx)?);
        effects.extend(self.pump_breakpoints()?);
        Ok(effects)
    }

    /// Route a click on `el` to the panel listening on it, if any.
    pub fn click(&mut self, el: ElementId) -> Result<HostEffects, PanelError> {
        let Some(owner) = self
            .dom
            .listener_owner(el, DomEventKind::Click)
            .map(str::to_string)
        else {
            return Ok(Vec::new());
        };

        self.dispatch(&owner, PanelIntent::BackdropClicked)
    }

    /// Feed a new viewport width into the breakpoint set.
    pub fn set_viewport_width(
        &mut self,
        width: f32,
    ) -> Result<HostEffects, PanelError> {
        self.breakpoints.set_viewport_width(width);
        self.pump_breakpoints()
    }

    /// Advance animations and timers by `dt` and deliver their completions.
    pub fn advance(&mut self, dt: Duration) -> Result<HostEffects, PanelError> {
        let finished = self.animator.advance(dt, &mut self.dom)?;
        let fired = self.timers.advance(dt);

        let mut effects = Vec::new();
        let (registry, mut ctx) = self.split();
        for id in finished {
            effects.extend(
                registry.broadcast(PanelIntent::AnimationDone(id), &mut ctx)?,
            );
        }
        for id in fired {
            effects.extend(
                registry.broadcast(PanelIntent::TimerFired(id), &mut ctx)?,
            );
        }

        effects.extend(self.pump_breakpoints()?);
        Ok(effects)
    }

    fn split(&mut self) -> (&mut PanelRegistry, PanelCtx<'_>) {
        let ctx = PanelCtx {
            dom: &mut self.dom,
            animator: &mut self.animator,
            scheduler: &mut self.timers,
            breakpoints: &mut self.breakpoints,
            layout: &self.layout,
        };
        (&mut self.registry, ctx)
    }

    fn pump_breakpoints(&mut self) -> Result<HostEffects, PanelError> {
        let mut effects = Vec::new();
        loop {
            let names = self.breakpoints.take_notifications();
            if names.is_empty() {
                return Ok(effects);
            }

            let (registry, mut ctx) = self.split();
            for name in names {
                if !registry.contains(&name) {
                    continue;
                }
                let reduced = registry.dispatch(
                    &name,
                    PanelIntent::BreakpointsChanged,
                    &mut ctx,
                )?;
                effects.extend(tag(&name, reduced));
            }
        }
    }
}

fn tag(name: &str, effects: Vec<PanelEffect>) -> HostEffects {
    effects
        .into_iter()
        .map(|effect| (name.to_string(), effect))
        .collect()
}
