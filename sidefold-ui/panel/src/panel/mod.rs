mod event;
mod reducer;
mod state;

pub use event::{PanelEffect, PanelIntent};
pub use reducer::PanelCtx;
use state::PanelState;

use crate::dom::ElementId;
use crate::errors::PanelError;
use crate::model::PanelConfig;

/// Foldable sidebar panel owning its private state.
///
/// Every operation is a synchronous reduction: flags change immediately,
/// while the backdrop fade and the deferred hide settle later through
/// [`PanelIntent::AnimationDone`] and [`PanelIntent::TimerFired`].
#[derive(Debug)]
pub struct SidebarPanel {
    config: PanelConfig,
    state: PanelState,
}

impl SidebarPanel {
    /// Construct a panel rendered into `element`.
    pub fn new(config: PanelConfig, element: ElementId) -> Self {
        Self {
            config,
            state: PanelState::new(element),
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Return the root element of the panel.
    pub fn element(&self) -> ElementId {
        self.state.element()
    }

    pub fn is_started(&self) -> bool {
        self.state.is_started()
    }

    pub fn is_opened(&self) -> bool {
        self.state.is_opened()
    }

    pub fn is_folded(&self) -> bool {
        self.state.is_folded()
    }

    /// Return whether a folded panel is temporarily unfolded by hover.
    pub fn is_unfolded(&self) -> bool {
        self.state.is_unfolded()
    }

    pub fn is_locked_open(&self) -> bool {
        self.state.is_locked_open()
    }

    /// Return the backdrop element while one exists.
    pub fn backdrop(&self) -> Option<ElementId> {
        self.state.backdrop()
    }

    /// Initialize visibility, position class and the locked-open watcher.
    pub fn start(&mut self, ctx: &mut PanelCtx<'_>) -> Result<(), PanelError> {
        reducer::start(&mut self.state, &self.config, ctx)
    }

    /// Tear down: unfold first, then drop the backdrop and subscriptions.
    pub fn stop(
        &mut self,
        ctx: &mut PanelCtx<'_>,
    ) -> Result<Vec<PanelEffect>, PanelError> {
        reducer::stop(&mut self.state, &self.config, ctx)
    }

    /// Reduce an intent into state updates and effects.
    pub fn reduce(
        &mut self,
        intent: PanelIntent,
        ctx: &mut PanelCtx<'_>,
    ) -> Result<Vec<PanelEffect>, PanelError> {
        reducer::reduce(&mut self.state, &self.config, intent, ctx)
    }

    pub fn open(
        &mut self,
        ctx: &mut PanelCtx<'_>,
    ) -> Result<Vec<PanelEffect>, PanelError> {
        self.reduce(PanelIntent::Open, ctx)
    }

    pub fn close(
        &mut self,
        ctx: &mut PanelCtx<'_>,
    ) -> Result<Vec<PanelEffect>, PanelError> {
        self.reduce(PanelIntent::Close, ctx)
    }

    pub fn toggle_open(
        &mut self,
        ctx: &mut PanelCtx<'_>,
    ) -> Result<Vec<PanelEffect>, PanelError> {
        self.reduce(PanelIntent::ToggleOpen, ctx)
    }

    pub fn fold(
        &mut self,
        ctx: &mut PanelCtx<'_>,
    ) -> Result<Vec<PanelEffect>, PanelError> {
        self.reduce(PanelIntent::Fold, ctx)
    }

    pub fn unfold(
        &mut self,
        ctx: &mut PanelCtx<'_>,
    ) -> Result<Vec<PanelEffect>, PanelError> {
        self.reduce(PanelIntent::Unfold, ctx)
    }

    pub fn toggle_fold(
        &mut self,
        ctx: &mut PanelCtx<'_>,
    ) -> Result<Vec<PanelEffect>, PanelError> {
        self.reduce(PanelIntent::ToggleFold, ctx)
    }

    pub fn pointer_entered(
        &mut self,
        ctx: &mut PanelCtx<'_>,
    ) -> Result<Vec<PanelEffect>, PanelError> {
        self.reduce(PanelIntent::PointerEntered, ctx)
    }

    pub fn pointer_left(
        &mut self,
        ctx: &mut PanelCtx<'_>,
    ) -> Result<Vec<PanelEffect>, PanelError> {
        self.reduce(PanelIntent::PointerLeft, ctx)
    }
}
