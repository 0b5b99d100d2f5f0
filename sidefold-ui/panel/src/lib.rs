//! Foldable sidebar panel widget for application shells.
//!
//! The crate is split into two layers:
//! - the widget ([`SidebarPanel`]) and its state machine: open/close,
//!   fold/unfold, hover unfold, a breakpoint-driven locked-open mode and an
//!   animated backdrop;
//! - the collaborators it drives, each behind a trait with an in-memory
//!   implementation: [`Dom`] / [`RetainedDom`], [`Animator`] /
//!   [`TweenAnimator`], [`Scheduler`] / [`TimerQueue`], [`BreakpointSource`] /
//!   [`BreakpointSet`] and [`LayoutSource`] / [`LayoutConfig`].
//!
//! [`PanelHost`] wires one of each together with a [`PanelRegistry`] and is
//! the entry point most shells want:
//! 1. build the layout tree through [`PanelHost::dom_mut`];
//! 2. [`PanelHost::mount`] each panel under its name;
//! 3. forward viewport widths, clicks and frame ticks
//!    ([`PanelHost::set_viewport_width`], [`PanelHost::click`],
//!    [`PanelHost::advance`]);
//! 4. drive panels by name with [`PanelHost::dispatch`].
//!
//! # Quick Example
//!
//! ```
//! use std::time::Duration;
//!
//! use sidefold_ui_panel::{
//!     BreakpointSet, Dom, LayoutConfig, PanelConfig, PanelHost, PanelIntent,
//!     PanelPosition,
//! };
//!
//! let mut host = PanelHost::new(BreakpointSet::material(), LayoutConfig::default());
//! let dom = host.dom_mut();
//! let root = dom.create_element("div");
//! let navbar = dom.create_element("aside");
//! let content = dom.create_element("main");
//! dom.append_child(root, navbar).unwrap();
//! dom.append_child(root, content).unwrap();
//!
//! host.mount(PanelConfig::new("navbar", PanelPosition::Left), navbar)
//!     .unwrap();
//! host.dispatch("navbar", PanelIntent::Open).unwrap();
//! assert!(host.panel("navbar").unwrap().is_opened());
//!
//! while host.is_busy() {
//!     host.advance(Duration::from_millis(16)).unwrap();
//! }
//! ```

mod animation;
mod breakpoints;
mod dom;
mod errors;
mod host;
mod layout;
mod model;
mod panel;
mod registry;
mod timer;

pub use animation::{Animator, Easing, PlayerId, Transition, TweenAnimator};
pub use breakpoints::{
    Breakpoint, BreakpointSet, BreakpointSource, SubscriptionGroup,
    SubscriptionId,
};
pub use dom::{Dom, DomEventKind, ElementId, RetainedDom};
pub use errors::{DomError, PanelError};
pub use host::{HostEffects, PanelHost};
pub use layout::{LayoutConfig, LayoutSource, NavbarConfig};
pub use model::{
    BACKDROP_CLASS, BACKDROP_INVISIBLE_CLASS, DEFAULT_FOLDED_WIDTH,
    PANEL_ANIMATION, PanelConfig, PanelPosition,
};
pub use panel::{PanelCtx, PanelEffect, PanelIntent, SidebarPanel};
pub use registry::PanelRegistry;
pub use timer::{Scheduler, TimerId, TimerQueue};
