/// View layer
///
/// Every function here is a pure projection of application state into
/// widgets; nothing in this module mutates anything. Layout and palette
/// helpers shared between the panels live at the top level.

pub mod form;
pub mod gallery;
pub mod lightbox;
pub mod toast;

use iced::widget::{container, text};
use iced::{Border, Color, Element};

use crate::Message;

/// Primary accent, a neon violet.
pub const ACCENT: Color = Color {
    r: 0.55,
    g: 0.36,
    b: 0.97,
    a: 1.0,
};

/// Card and panel background.
pub const SURFACE: Color = Color {
    r: 0.11,
    g: 0.11,
    b: 0.14,
    a: 1.0,
};

/// Slightly raised background for badges and placeholders.
pub const SURFACE_LIGHT: Color = Color {
    r: 0.17,
    g: 0.17,
    b: 0.21,
    a: 1.0,
};

/// Secondary text.
pub const TEXT_DIM: Color = Color {
    r: 0.62,
    g: 0.62,
    b: 0.68,
    a: 1.0,
};

/// Counter color once the prompt approaches its length limit.
pub const WARNING: Color = Color {
    r: 0.95,
    g: 0.61,
    b: 0.25,
    a: 1.0,
};

/// Rounded panel background shared by the form, cards and the lightbox.
pub fn panel_style(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(SURFACE.into()),
        border: Border {
            radius: 12.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

/// Small pill badge for style and aspect-ratio tags.
pub fn meta_tag(label: &str) -> Element<'_, Message> {
    container(text(label).size(12).color(TEXT_DIM))
        .padding([3.0, 9.0])
        .style(|_theme| container::Style {
            background: Some(SURFACE_LIGHT.into()),
            border: Border {
                radius: 9.0.into(),
                ..Border::default()
            },
            ..container::Style::default()
        })
        .into()
}
