use iced::widget::{
    Row, Space, Stack, button, column, container, mouse_area, row, text,
};
use iced::{Element, Length, Padding, Theme, alignment};
use sidefold_ui_panel::{
    BACKDROP_CLASS, BACKDROP_INVISIBLE_CLASS, Dom, PanelIntent, PanelPosition,
    SidebarPanel,
};

use super::{App, AppEvent};
use crate::style;

const PANEL_WIDTH: f32 = 280.0;
const PANEL_PADDING: f32 = 12.0;
const SPACING: f32 = 8.0;

type AppElement<'a> = Element<'a, AppEvent, Theme, iced::Renderer>;

/// Render the root application view.
///
/// Locked-open, unfolded panels sit in the row next to the content; every
/// other visible panel floats above the backdrops.
pub(super) fn view(app: &App) -> AppElement<'_> {
    let mut left: Vec<AppElement<'_>> = Vec::new();
    let mut right: Vec<AppElement<'_>> = Vec::new();
    let mut floating: Vec<AppElement<'_>> = Vec::new();

    for name in &app.panels {
        let Some(panel) = app.host.panel(name) else {
            continue;
        };
        // Closed panels are off-canvas.
        if !panel.is_opened() {
            continue;
        }

        let rendered = view_panel(panel);
        let position = panel.config().position;
        if panel.is_locked_open() && !panel.is_folded() {
            match position {
                PanelPosition::Left => left.push(rendered),
                PanelPosition::Right => right.push(rendered),
            }
        } else {
            floating.push(view_floating(rendered, position));
        }
    }

    let mut children = left;
    children.push(view_content(app));
    children.extend(right);

    let mut layers: Vec<AppElement<'_>> = vec![
        Row::with_children(children)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
    ];
    layers.extend(view_backdrops(app));
    layers.extend(floating);

    Stack::with_children(layers)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_panel(panel: &SidebarPanel) -> AppElement<'_> {
    let name = panel.name().to_string();
    let event = move |intent| AppEvent::Panel {
        name: name.clone(),
        intent,
    };

    let rail = panel.is_folded() && !panel.is_unfolded();
    let width = if rail {
        panel.config().folded_width
    } else {
        PANEL_WIDTH
    };
    let fold_label = if panel.is_folded() { "Unfold" } else { "Fold" };

    let mut body = column![
        text(panel.name()).size(16),
        button(text(fold_label)).on_press(event(PanelIntent::ToggleFold)),
    ]
    .spacing(SPACING);
    if !panel.is_locked_open() {
        body = body
            .push(button(text("Close")).on_press(event(PanelIntent::Close)));
    }

    let surface = container(body)
        .width(Length::Fixed(width))
        .height(Length::Fill)
        .padding(PANEL_PADDING)
        .style(style::panel_style(panel.is_locked_open()));

    mouse_area(surface)
        .on_enter(event(PanelIntent::PointerEntered))
        .on_exit(event(PanelIntent::PointerLeft))
        .into()
}

fn view_floating(
    panel: AppElement<'_>,
    position: PanelPosition,
) -> AppElement<'_> {
    let align = match position {
        PanelPosition::Left => alignment::Horizontal::Left,
        PanelPosition::Right => alignment::Horizontal::Right,
    };

    container(panel)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(align)
        .into()
}

fn view_backdrops(app: &App) -> Vec<AppElement<'_>> {
    let dom = app.host.dom();
    dom.elements_with_class(BACKDROP_CLASS)
        .into_iter()
        .map(|element| {
            let opacity = dom
                .style(element, "opacity")
                .and_then(|value| value.parse::<f32>().ok())
                .unwrap_or(0.0);
            let invisible = dom.has_class(element, BACKDROP_INVISIBLE_CLASS);

            let layer = container(Space::new())
                .width(Length::Fill)
                .height(Length::Fill)
                .style(style::backdrop_style(opacity, invisible));

            mouse_area(layer)
                .on_press(AppEvent::BackdropPressed(element))
                .into()
        })
        .collect()
}

fn view_content(app: &App) -> AppElement<'_> {
    let dom = app.host.dom();
    let margin = |property: &str| {
        dom.style(app.content, property)
            .and_then(|value| value.trim_end_matches("px").parse::<f32>().ok())
            .unwrap_or(0.0)
    };
    let padding = Padding {
        top: 0.0,
        right: margin("margin-right"),
        bottom: 0.0,
        left: margin("margin-left"),
    };

    let mut toolbar = row![].spacing(SPACING);
    for name in &app.panels {
        toolbar = toolbar.push(button(text(format!("Toggle {name}"))).on_press(
            AppEvent::Panel {
                name: name.clone(),
                intent: PanelIntent::ToggleOpen,
            },
        ));
    }

    let breakpoints: Vec<&str> = app.host.breakpoints().active().collect();
    let status = text(format!(
        "{:.0} x {:.0} [{}]",
        app.window_size.width,
        app.window_size.height,
        breakpoints.join(" ")
    ));

    let mut body = column![toolbar, status].spacing(SPACING);
    for name in &app.panels {
        if let Some(panel) = app.host.panel(name) {
            body = body.push(text(panel_summary(panel)));
        }
    }

    container(container(body).padding(PANEL_PADDING))
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(padding)
        .style(style::content_style)
        .into()
}

fn panel_summary(panel: &SidebarPanel) -> String {
    let mut flags = Vec::new();
    if panel.is_opened() {
        flags.push("open");
    }
    if panel.is_folded() {
        flags.push("folded");
    }
    if panel.is_unfolded() {
        flags.push("unfolded");
    }
    if panel.is_locked_open() {
        flags.push("locked-open");
    }
    if flags.is_empty() {
        flags.push("closed");
    }

    format!("{}: {}", panel.name(), flags.join(", "))
}
