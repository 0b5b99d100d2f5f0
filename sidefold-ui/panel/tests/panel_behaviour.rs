use std::time::Duration;

use sidefold_ui_panel::{
    BACKDROP_CLASS, BACKDROP_INVISIBLE_CLASS, BreakpointSet, Dom, ElementId,
    HostEffects, LayoutConfig, NavbarConfig, PanelConfig, PanelEffect,
    PanelError, PanelHost, PanelIntent, PanelPosition,
};

const NAVBAR: &str = "navbar";

struct Shell {
    host: PanelHost,
    root: ElementId,
    panel: ElementId,
    content: ElementId,
}

/// Build `root > [panel, content]` for left panels and
/// `root > [content, panel]` for right ones, then mount the panel.
fn shell(config: PanelConfig, layout: LayoutConfig) -> Shell {
    let position = config.position;
    let mut host = PanelHost::new(BreakpointSet::material(), layout);
    let dom = host.dom_mut();
    let root = dom.create_element("div");
    let panel = dom.create_element("aside");
    let content = dom.create_element("main");
    let order = match position {
        PanelPosition::Left => [panel, content],
        PanelPosition::Right => [content, panel],
    };
    for child in order {
        dom.append_child(root, child).expect("child attaches");
    }

    host.mount(config, panel).expect("panel mounts");
    Shell {
        host,
        root,
        panel,
        content,
    }
}

fn left_shell() -> Shell {
    shell(
        PanelConfig::new(NAVBAR, PanelPosition::Left),
        LayoutConfig::default(),
    )
}

fn settle(host: &mut PanelHost) -> HostEffects {
    let mut effects = Vec::new();
    while host.is_busy() {
        effects.extend(
            host.advance(Duration::from_millis(16))
                .expect("tick succeeds"),
        );
    }
    effects
}

fn dispatch(shell: &mut Shell, intent: PanelIntent) -> HostEffects {
    shell.host.dispatch(NAVBAR, intent).expect("intent reduces")
}

fn backdrops(shell: &Shell) -> Vec<ElementId> {
    shell.host.dom().elements_with_class(BACKDROP_CLASS)
}

fn named(effect: PanelEffect) -> (String, PanelEffect) {
    (NAVBAR.to_string(), effect)
}

#[test]
fn given_open_panel_when_opened_again_then_nothing_changes() {
    let mut shell = left_shell();

    let first = dispatch(&mut shell, PanelIntent::Open);
    let second = dispatch(&mut shell, PanelIntent::Open);

    assert_eq!(first, vec![named(PanelEffect::OpenedChanged(true))]);
    assert!(second.is_empty());
    assert_eq!(backdrops(&shell).len(), 1);
}

#[test]
fn given_open_panel_when_closed_twice_then_backdrop_is_gone_after_settle() {
    let mut shell = left_shell();
    let _ = dispatch(&mut shell, PanelIntent::Open);
    let _ = settle(&mut shell.host);

    let first = dispatch(&mut shell, PanelIntent::Close);
    let second = dispatch(&mut shell, PanelIntent::Close);
    let settled = settle(&mut shell.host);

    assert_eq!(first, vec![named(PanelEffect::OpenedChanged(false))]);
    assert!(second.is_empty());
    assert!(settled.is_empty());
    assert!(backdrops(&shell).is_empty());
    assert_eq!(shell.host.dom().children(shell.root).len(), 2);
    assert_eq!(
        shell.host.dom().style(shell.panel, "visibility"),
        Some("hidden")
    );
}

#[test]
fn given_open_panel_when_settled_then_backdrop_is_fully_opaque() {
    let mut shell = left_shell();
    let _ = dispatch(&mut shell, PanelIntent::Open);
    let _ = settle(&mut shell.host);

    let backdrop = shell
        .host
        .panel(NAVBAR)
        .and_then(|panel| panel.backdrop())
        .expect("backdrop exists");

    assert_eq!(shell.host.dom().style(backdrop, "opacity"), Some("1"));
    assert_eq!(shell.host.dom().parent(backdrop), Some(shell.root));
}

#[test]
fn given_closed_panel_when_fold_or_unfold_requested_then_it_is_ignored() {
    let mut shell = left_shell();

    let folded = dispatch(&mut shell, PanelIntent::Fold);
    let toggled = dispatch(&mut shell, PanelIntent::ToggleFold);
    let unfolded = dispatch(&mut shell, PanelIntent::Unfold);

    assert!(folded.is_empty());
    assert!(toggled.is_empty());
    assert!(unfolded.is_empty());
    let panel = shell.host.panel(NAVBAR).expect("panel is mounted");
    assert!(!panel.is_folded());
    assert_eq!(shell.host.dom().style(shell.content, "margin-left"), None);
}

#[test]
fn given_right_panel_when_fold_toggled_then_previous_sibling_gets_margin() {
    let mut shell = shell(
        PanelConfig::new(NAVBAR, PanelPosition::Right).with_folded_width(80.0),
        LayoutConfig::default(),
    );
    let _ = dispatch(&mut shell, PanelIntent::Open);

    let effects = dispatch(&mut shell, PanelIntent::ToggleFold);

    assert_eq!(effects, vec![named(PanelEffect::FoldedChanged(true))]);
    assert!(shell.host.dom().has_class(shell.panel, "right-positioned"));
    assert_eq!(
        shell.host.dom().style(shell.content, "margin-right"),
        Some("80px")
    );
    assert_eq!(shell.host.dom().style(shell.content, "margin-left"), None);
}

#[test]
fn given_folded_panel_when_pointer_enters_then_it_unfolds_temporarily() {
    let mut shell = left_shell();
    let _ = dispatch(&mut shell, PanelIntent::Open);
    let _ = dispatch(&mut shell, PanelIntent::Fold);

    let entered = dispatch(&mut shell, PanelIntent::PointerEntered);
    let panel = shell.host.panel(NAVBAR).expect("panel is mounted");
    assert!(entered.is_empty());
    assert!(panel.is_unfolded());
    assert!(panel.is_folded());
    assert!(shell.host.dom().has_class(shell.panel, "unfolded"));

    let _ = dispatch(&mut shell, PanelIntent::PointerLeft);
    let panel = shell.host.panel(NAVBAR).expect("panel is mounted");
    assert!(!panel.is_unfolded());
    assert!(!shell.host.dom().has_class(shell.panel, "unfolded"));
}

#[test]
fn given_hover_unfold_disabled_when_pointer_enters_then_panel_stays_folded() {
    let mut shell = shell(
        PanelConfig::new(NAVBAR, PanelPosition::Left).with_hover_unfold(false),
        LayoutConfig::default(),
    );
    let _ = dispatch(&mut shell, PanelIntent::Open);
    let _ = dispatch(&mut shell, PanelIntent::Fold);

    let _ = dispatch(&mut shell, PanelIntent::PointerEntered);

    let panel = shell.host.panel(NAVBAR).expect("panel is mounted");
    assert!(!panel.is_unfolded());
}

#[test]
fn given_open_panel_when_backdrop_clicked_then_panel_closes() {
    let mut shell = left_shell();
    let _ = dispatch(&mut shell, PanelIntent::Open);
    let backdrop = backdrops(&shell)[0];

    let effects = shell.host.click(backdrop).expect("click routes");
    let _ = settle(&mut shell.host);

    assert_eq!(effects, vec![named(PanelEffect::OpenedChanged(false))]);
    assert!(!shell.host.dom().contains(backdrop));
}

#[test]
fn given_element_without_listener_when_clicked_then_nothing_happens() {
    let mut shell = left_shell();

    let effects = shell.host.click(shell.content).expect("click routes");

    assert!(effects.is_empty());
}

#[test]
fn given_invisible_overlay_when_opened_then_backdrop_carries_both_classes() {
    let mut shell = shell(
        PanelConfig::new(NAVBAR, PanelPosition::Left)
            .with_invisible_overlay(true),
        LayoutConfig::default(),
    );

    let _ = dispatch(&mut shell, PanelIntent::Open);

    let backdrop = backdrops(&shell)[0];
    assert!(shell.host.dom().has_class(backdrop, BACKDROP_INVISIBLE_CLASS));
}

#[test]
fn given_locked_open_panel_when_breakpoint_activates_then_it_locks_folded() {
    let mut shell = shell(
        PanelConfig::new(NAVBAR, PanelPosition::Left).with_locked_open("gt-md"),
        LayoutConfig {
            navbar: NavbarConfig { folded: true },
        },
    );

    let effects = shell
        .host
        .set_viewport_width(1440.0)
        .expect("breakpoints apply");

    assert_eq!(
        effects,
        vec![
            named(PanelEffect::LockedOpenChanged(true)),
            named(PanelEffect::OpenedChanged(true)),
            named(PanelEffect::FoldedChanged(true)),
        ]
    );
    let panel = shell.host.panel(NAVBAR).expect("panel is mounted");
    assert!(panel.is_locked_open());
    assert!(backdrops(&shell).is_empty());
    assert!(shell.host.dom().has_class(shell.panel, "locked-open"));
    assert_eq!(
        shell.host.dom().style(shell.content, "margin-left"),
        Some("64px")
    );

    let redundant = shell
        .host
        .set_viewport_width(1500.0)
        .expect("breakpoints apply");
    let reopened = dispatch(&mut shell, PanelIntent::Close);
    assert!(redundant.is_empty());
    assert!(reopened.is_empty());
}

#[test]
fn given_locked_panel_when_breakpoint_deactivates_then_state_reverts() {
    let mut shell = shell(
        PanelConfig::new(NAVBAR, PanelPosition::Left).with_locked_open("gt-md"),
        LayoutConfig {
            navbar: NavbarConfig { folded: true },
        },
    );
    let _ = shell.host.set_viewport_width(1440.0).expect("lock applies");

    let effects = shell
        .host
        .set_viewport_width(800.0)
        .expect("breakpoints apply");
    let _ = shell
        .host
        .advance(Duration::from_millis(284))
        .expect("tick succeeds");
    assert_eq!(shell.host.dom().style(shell.panel, "visibility"), None);
    let _ = settle(&mut shell.host);

    assert_eq!(
        effects,
        vec![
            named(PanelEffect::LockedOpenChanged(false)),
            named(PanelEffect::OpenedChanged(false)),
            named(PanelEffect::FoldedChanged(false)),
        ]
    );
    assert_eq!(shell.host.dom().style(shell.content, "margin-left"), None);
    assert_eq!(
        shell.host.dom().style(shell.panel, "visibility"),
        Some("hidden")
    );
}

#[test]
fn given_folded_panel_when_unmounted_then_margin_is_reverted() {
    let mut shell = left_shell();
    let _ = dispatch(&mut shell, PanelIntent::Open);
    let _ = dispatch(&mut shell, PanelIntent::Fold);

    let effects = shell.host.unmount(NAVBAR).expect("unmount succeeds");

    assert_eq!(effects, vec![named(PanelEffect::FoldedChanged(false))]);
    assert_eq!(shell.host.dom().style(shell.content, "margin-left"), None);
    assert!(backdrops(&shell).is_empty());
    assert!(shell.host.registry().is_empty());
}

#[test]
fn given_mounted_name_when_mounted_again_then_first_registration_wins() {
    let mut shell = left_shell();
    let other = shell.host.dom_mut().create_element("aside");

    let result = shell
        .host
        .mount(PanelConfig::new(NAVBAR, PanelPosition::Right), other);

    assert!(matches!(result, Err(PanelError::DuplicateName(name)) if name == NAVBAR));
    let panel = shell.host.panel(NAVBAR).expect("panel is mounted");
    assert_eq!(panel.element(), shell.panel);
    assert_eq!(shell.host.registry().len(), 1);
}

#[test]
fn given_unknown_name_when_dispatched_then_no_effects_are_produced() {
    let mut shell = left_shell();

    let effects = shell
        .host
        .dispatch("quick-panel", PanelIntent::Open)
        .expect("dispatch succeeds");

    assert!(effects.is_empty());
}

#[test]
fn given_unanimated_locked_panel_when_breakpoint_deactivates_then_hide_waits()
{
    let mut shell = shell(
        PanelConfig::new(NAVBAR, PanelPosition::Left).with_locked_open("gt-md"),
        LayoutConfig::default(),
    );
    let _ = shell.host.set_viewport_width(1440.0).expect("lock applies");

    let _ = shell
        .host
        .set_viewport_width(800.0)
        .expect("breakpoints apply");
    let _ = shell
        .host
        .advance(Duration::from_millis(16))
        .expect("tick succeeds");
    assert_eq!(shell.host.dom().style(shell.panel, "visibility"), None);

    let _ = shell
        .host
        .advance(Duration::from_millis(268))
        .expect("tick succeeds");
    assert_eq!(shell.host.dom().style(shell.panel, "visibility"), None);

    let _ = shell
        .host
        .advance(Duration::from_millis(16))
        .expect("tick succeeds");
    assert_eq!(
        shell.host.dom().style(shell.panel, "visibility"),
        Some("hidden")
    );
}

#[test]
fn given_open_panel_with_backdrop_when_lock_activates_then_backdrop_is_removed()
{
    let mut shell = shell(
        PanelConfig::new(NAVBAR, PanelPosition::Left).with_locked_open("gt-md"),
        LayoutConfig::default(),
    );
    let _ = shell.host.set_viewport_width(800.0).expect("width applies");
    let _ = dispatch(&mut shell, PanelIntent::Open);
    assert_eq!(backdrops(&shell).len(), 1);

    let effects = shell
        .host
        .set_viewport_width(1440.0)
        .expect("breakpoints apply");
    let _ = settle(&mut shell.host);

    assert_eq!(effects, vec![named(PanelEffect::LockedOpenChanged(true))]);
    let panel = shell.host.panel(NAVBAR).expect("panel is mounted");
    assert!(panel.is_opened());
    assert!(panel.is_locked_open());
    assert_eq!(panel.backdrop(), None);
    assert!(backdrops(&shell).is_empty());
    assert_eq!(shell.host.dom().style(shell.panel, "visibility"), None);
}
