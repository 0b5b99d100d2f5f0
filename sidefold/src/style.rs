use iced::widget::container;
use iced::{Border, Color, Shadow, Theme, Vector};

const BACKDROP_ALPHA: f32 = 0.6;

/// Dimming layer behind an open panel; `opacity` is the animated value.
pub(crate) fn backdrop_style(
    opacity: f32,
    invisible: bool,
) -> impl Fn(&Theme) -> container::Style + 'static {
    let alpha = if invisible {
        0.0
    } else {
        BACKDROP_ALPHA * opacity.clamp(0.0, 1.0)
    };

    move |_theme: &Theme| container::Style {
        background: Some(Color::from_rgba(0.0, 0.0, 0.0, alpha).into()),
        ..Default::default()
    }
}

pub(crate) fn panel_style(
    locked_open: bool,
) -> impl Fn(&Theme) -> container::Style + 'static {
    move |theme: &Theme| {
        let palette = theme.extended_palette();
        let shadow = if locked_open {
            Shadow::default()
        } else {
            Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.4),
                offset: Vector::new(0.0, 0.0),
                blur_radius: 12.0,
            }
        };

        container::Style {
            background: Some(palette.background.weak.color.into()),
            text_color: Some(palette.background.weak.text),
            border: Border {
                width: 0.5,
                color: palette.background.strong.color,
                radius: 0.0.into(),
            },
            shadow,
            ..Default::default()
        }
    }
}

pub(crate) fn content_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(palette.background.base.color.into()),
        text_color: Some(palette.background.base.text),
        ..Default::default()
    }
}
