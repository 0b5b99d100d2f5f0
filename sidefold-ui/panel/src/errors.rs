use thiserror::Error;

use crate::dom::ElementId;

/// Errors raised by the element tree facility.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("Element {0} does not exist.")]
    UnknownElement(ElementId),
    #[error("Element {child} is not a child of {parent}.")]
    NotAChild {
        parent: ElementId,
        child: ElementId,
    },
    #[error("Element {0} cannot be attached to itself or its descendant.")]
    Cycle(ElementId),
    #[error("Element {0} is not attached to a parent.")]
    Detached(ElementId),
}

/// Errors surfaced by panel operations and the panel registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("Panel element tree update failed: {0}")]
    Dom(#[from] DomError),
    #[error(
        "Panel '{0}' is already registered. Unmount it first or use a unique name."
    )]
    DuplicateName(String),
}
