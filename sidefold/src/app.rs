#[path = "subscription.rs"]
mod subscription;
#[path = "update.rs"]
mod update;
#[path = "view.rs"]
mod view;

use std::time::Instant;

use iced::{Element, Size, Subscription, Task, Theme, window};
use sidefold_ui_panel::{
    BreakpointSet, Dom, ElementId, PanelHost, PanelIntent, PanelPosition,
};

use crate::config::{ConfigLoadStatus, ShellConfig, load_shell_config};

pub(crate) const MIN_WINDOW_WIDTH: f32 = 480.0;
pub(crate) const MIN_WINDOW_HEIGHT: f32 = 360.0;
pub(crate) const INITIAL_WINDOW_SIZE: Size = Size {
    width: 1280.0,
    height: 800.0,
};

/// App-wide events that drive the root update loop.
#[derive(Debug, Clone)]
pub(crate) enum AppEvent {
    // Panel intents addressed by registry name
    Panel { name: String, intent: PanelIntent },
    BackdropPressed(ElementId),
    Tick(Instant),
    Window(window::Event),
}

/// Root application state.
pub(crate) struct App {
    pub(crate) window_size: Size,
    pub(crate) config: ShellConfig,
    pub(crate) host: PanelHost,
    pub(crate) content: ElementId,
    /// Mounted panel names in tree order.
    pub(crate) panels: Vec<String>,
    pub(crate) last_tick: Option<Instant>,
}

impl App {
    /// Initialize the application and return the first task.
    pub(crate) fn new() -> (Self, Task<AppEvent>) {
        let config = match load_shell_config() {
            Ok(load) => {
                let (config, status) = load.into_parts();
                if let ConfigLoadStatus::Invalid(message) = status {
                    log::warn!(
                        "shell config is invalid, using defaults: {message}"
                    );
                }
                config
            },
            Err(err) => {
                log::warn!("shell config load failed: {err}");
                ShellConfig::default()
            },
        };

        let mut host =
            PanelHost::new(BreakpointSet::material(), config.layout.clone());
        let (content, panels) = mount_panels(&mut host, &config);

        let mut app = App {
            window_size: INITIAL_WINDOW_SIZE,
            config,
            host,
            content,
            panels,
            last_tick: None,
        };
        let task =
            crate::routers::window::handle_resize(&mut app, INITIAL_WINDOW_SIZE);

        (app, task)
    }

    /// Return the window title.
    pub(crate) fn title(&self) -> String {
        String::from("Sidefold")
    }

    pub(crate) fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Return active subscriptions.
    pub(crate) fn subscription(&self) -> Subscription<AppEvent> {
        subscription::subscription(self)
    }

    /// Handle an incoming event.
    pub(crate) fn update(&mut self, event: AppEvent) -> Task<AppEvent> {
        update::update(self, event)
    }

    /// Render the root view.
    pub(crate) fn view(&self) -> Element<'_, AppEvent, Theme, iced::Renderer> {
        view::view(self)
    }
}

/// Build `root > [left panels.., content, right panels..]` and mount every
/// configured panel into it.
fn mount_panels(
    host: &mut PanelHost,
    config: &ShellConfig,
) -> (ElementId, Vec<String>) {
    let dom = host.dom_mut();
    let root = dom.create_element("div");
    let content = dom.create_element("main");

    let (left, right): (Vec<_>, Vec<_>) = config
        .panels
        .iter()
        .partition(|panel| panel.position == PanelPosition::Left);

    let mut slots = Vec::new();
    for panel in left {
        slots.push((Some(panel), dom.create_element("aside")));
    }
    slots.push((None, content));
    for panel in right {
        slots.push((Some(panel), dom.create_element("aside")));
    }

    let mut mounted = Vec::new();
    for (panel, element) in slots {
        if let Err(err) = host.dom_mut().append_child(root, element) {
            log::warn!("failed to attach {element}: {err}");
            continue;
        }
        let Some(panel) = panel else {
            continue;
        };
        match host.mount(panel.clone(), element) {
            Ok(_) => mounted.push(panel.name.clone()),
            Err(err) => {
                log::warn!("panel '{}' not mounted: {err}", panel.name)
            },
        }
    }

    (content, mounted)
}
