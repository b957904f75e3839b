/// The lightbox: a modal overlay showing one entry at full size with its
/// prompt caption and an export action. Stacked above the page; clicking
/// the backdrop or the close button dismisses it (Escape is handled by the
/// keyboard subscription).

use iced::widget::image::Handle;
use iced::widget::{
    button, center, column, container, horizontal_space, image, mouse_area, opaque, row, text,
};
use iced::{Alignment, Color, Element, Length};

use crate::state::data::GalleryEntry;
use crate::Message;

pub fn view<'a>(
    entry: &'a GalleryEntry,
    handle: Option<&Handle>,
    is_exporting: bool,
) -> Element<'a, Message> {
    let media: Element<'a, Message> = match handle {
        Some(handle) => image(handle.clone()).width(Length::Fill).into(),
        None => container(text("Loading full image...").color(super::TEXT_DIM))
            .width(Length::Fill)
            .padding(90)
            .align_x(Alignment::Center)
            .into(),
    };

    let close = button(text("✕").size(16))
        .style(button::text)
        .on_press(Message::CloseLightbox);

    let export_label = if is_exporting {
        "Exporting..."
    } else {
        "⬇ Export"
    };
    let export = button(text(export_label).size(14))
        .on_press_maybe((!is_exporting).then_some(Message::Download));

    let when = chrono::DateTime::parse_from_rfc3339(&entry.timestamp)
        .map(|dt| dt.format("%b %d, %Y %H:%M").to_string())
        .unwrap_or_default();

    let caption = column![
        text(&entry.prompt).size(16),
        row![
            super::meta_tag(&entry.style),
            super::meta_tag(&entry.aspect_ratio),
            text(when).size(12).color(super::TEXT_DIM),
            horizontal_space(),
            export,
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    ]
    .spacing(10);

    let card = container(
        column![row![horizontal_space(), close], media, caption].spacing(10),
    )
    .padding(16)
    .max_width(880.0)
    .style(super::panel_style);

    // Standard iced modal arrangement: an opaque backdrop that captures
    // clicks, with the card itself opaque so clicks inside don't dismiss.
    opaque(
        mouse_area(center(opaque(card)).style(backdrop_style))
            .on_press(Message::CloseLightbox),
    )
}

fn backdrop_style(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(
            Color {
                a: 0.85,
                ..Color::BLACK
            }
            .into(),
        ),
        ..container::Style::default()
    }
}
