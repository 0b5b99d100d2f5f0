use crate::animation::PlayerId;
use crate::breakpoints::SubscriptionGroup;
use crate::dom::ElementId;
use crate::timer::TimerId;

use super::event::PanelEffect;

/// The single animation player a panel tracks, with the element to remove
/// once it completes.
#[derive(Debug, Clone, Copy)]
struct TrackedPlayer {
    id: PlayerId,
    remove_on_done: Option<ElementId>,
}

/// Internal runtime state of a sidebar panel.
#[derive(Debug)]
pub(super) struct PanelState {
    element: ElementId,
    started: bool,
    opened: bool,
    folded: bool,
    unfolded: bool,
    locked_open: bool,
    was_active: bool,
    animations_enabled: bool,
    backdrop: Option<ElementId>,
    player: Option<TrackedPlayer>,
    pending_hides: Vec<TimerId>,
    subscriptions: SubscriptionGroup,
}

impl PanelState {
    pub(super) fn new(element: ElementId) -> Self {
        Self {
            element,
            started: false,
            opened: false,
            folded: false,
            unfolded: false,
            locked_open: false,
            was_active: false,
            animations_enabled: false,
            backdrop: None,
            player: None,
            pending_hides: Vec::new(),
            subscriptions: SubscriptionGroup::default(),
        }
    }

    pub(super) fn element(&self) -> ElementId {
        self.element
    }

    pub(super) fn is_started(&self) -> bool {
        self.started
    }

    pub(super) fn is_opened(&self) -> bool {
        self.opened
    }

    pub(super) fn is_folded(&self) -> bool {
        self.folded
    }

    pub(super) fn is_unfolded(&self) -> bool {
        self.unfolded
    }

    pub(super) fn is_locked_open(&self) -> bool {
        self.locked_open
    }

    pub(super) fn was_active(&self) -> bool {
        self.was_active
    }

    pub(super) fn animations_enabled(&self) -> bool {
        self.animations_enabled
    }

    pub(super) fn backdrop(&self) -> Option<ElementId> {
        self.backdrop
    }

    pub(super) fn set_started(&mut self, started: bool) {
        self.started = started;
    }

    pub(super) fn set_opened(&mut self, opened: bool) {
        self.opened = opened;
    }

    /// Store the folded flag. Unfolding also ends any temporary unfold.
    pub(super) fn set_folded(&mut self, folded: bool) {
        self.folded = folded;
        if !folded {
            self.unfolded = false;
        }
    }

    pub(super) fn set_unfolded(&mut self, unfolded: bool) {
        self.unfolded = unfolded;
    }

    pub(super) fn set_locked_open(&mut self, locked_open: bool) {
        self.locked_open = locked_open;
    }

    pub(super) fn set_was_active(&mut self, was_active: bool) {
        self.was_active = was_active;
    }

    pub(super) fn enable_animations(&mut self) {
        self.animations_enabled = true;
    }

    pub(super) fn set_backdrop(&mut self, backdrop: Option<ElementId>) {
        self.backdrop = backdrop;
    }

    pub(super) fn take_backdrop(&mut self) -> Option<ElementId> {
        self.backdrop.take()
    }

    /// Track `id` as the current player, superseding any previous one.
    pub(super) fn track_player(
        &mut self,
        id: PlayerId,
        remove_on_done: Option<ElementId>,
    ) {
        if let Some(previous) = self.player {
            log::trace!("animation {:?} superseded by {id:?}", previous.id);
        }
        self.player = Some(TrackedPlayer { id, remove_on_done });
    }

    /// Consume a completion. Returns `None` when `id` is not the tracked
    /// player, otherwise the element to remove, if any.
    pub(super) fn finish_player(
        &mut self,
        id: PlayerId,
    ) -> Option<Option<ElementId>> {
        match self.player {
            Some(tracked) if tracked.id == id => {
                self.player = None;
                Some(tracked.remove_on_done)
            },
            _ => None,
        }
    }

    pub(super) fn clear_player(&mut self) {
        self.player = None;
    }

    pub(super) fn push_pending_hide(&mut self, id: TimerId) {
        self.pending_hides.push(id);
    }

    /// Remove `id` from the pending hides, returning whether it was there.
    pub(super) fn take_pending_hide(&mut self, id: TimerId) -> bool {
        let before = self.pending_hides.len();
        self.pending_hides.retain(|pending| *pending != id);
        self.pending_hides.len() != before
    }

    pub(super) fn subscriptions_mut(&mut self) -> &mut SubscriptionGroup {
        &mut self.subscriptions
    }

    pub(super) fn snapshot(&self) -> FlagSnapshot {
        FlagSnapshot {
            locked_open: self.locked_open,
            opened: self.opened,
            folded: self.folded,
        }
    }
}

/// Externally observable flags captured before a reduction.
#[derive(Debug, Clone, Copy)]
pub(super) struct FlagSnapshot {
    locked_open: bool,
    opened: bool,
    folded: bool,
}

impl FlagSnapshot {
    /// Effects for every flag that differs in `after`.
    pub(super) fn diff(self, after: FlagSnapshot) -> Vec<PanelEffect> {
        let mut effects = Vec::new();
        if self.locked_open != after.locked_open {
            effects.push(PanelEffect::LockedOpenChanged(after.locked_open));
        }
        if self.opened != after.opened {
            effects.push(PanelEffect::OpenedChanged(after.opened));
        }
        if self.folded != after.folded {
            effects.push(PanelEffect::FoldedChanged(after.folded));
        }
        effects
    }
}
