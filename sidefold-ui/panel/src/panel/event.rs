use crate::animation::PlayerId;
use crate::timer::TimerId;

/// Intents reduced by a sidebar panel.
///
/// The first group are the public operations; the rest are callbacks of the
/// event loop routed back to the panel by its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelIntent {
    Open,
    Close,
    ToggleOpen,
    Fold,
    Unfold,
    ToggleFold,
    PointerEntered,
    PointerLeft,
    /// The backdrop owned by this panel was clicked.
    BackdropClicked,
    /// An animation player finished.
    AnimationDone(PlayerId),
    /// A scheduled timer fired.
    TimerFired(TimerId),
    /// The breakpoint service reported a change.
    BreakpointsChanged,
}

/// Observable flag changes produced by a reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEffect {
    LockedOpenChanged(bool),
    OpenedChanged(bool),
    FoldedChanged(bool),
}
