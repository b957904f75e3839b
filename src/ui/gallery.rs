/// The gallery grid: one card per generated image, or a placeholder when
/// nothing has been generated yet. Cards are projections of gallery entries;
/// their image panes fill in as display fetches complete.

use std::collections::{HashMap, HashSet};

use iced::widget::image::Handle;
use iced::widget::{button, column, container, horizontal_space, image, mouse_area, row, text};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use crate::state::data::GalleryEntry;
use crate::state::gallery::Gallery;
use crate::Message;

const CARD_WIDTH: f32 = 300.0;
const MEDIA_HEIGHT: f32 = 210.0;

/// Longest prompt excerpt shown on a card.
const EXCERPT_LEN: usize = 90;

pub fn view<'a>(
    gallery: &'a Gallery,
    images: &'a HashMap<u64, Handle>,
    failed: &'a HashSet<u64>,
) -> Element<'a, Message> {
    let count = gallery.count();
    let counter = text(format!(
        "{count} creative{}",
        if count == 1 { "" } else { "s" }
    ))
    .size(14)
    .color(super::TEXT_DIM);

    let header = row![
        text("Your Creations").size(24),
        horizontal_space(),
        counter
    ]
    .align_y(Alignment::Center);

    let body: Element<'a, Message> = if gallery.is_empty() {
        empty_state()
    } else {
        let cards: Vec<Element<'a, Message>> = gallery
            .iter()
            .map(|entry| card(entry, images.get(&entry.id), failed.contains(&entry.id)))
            .collect();

        Wrap::with_elements(cards)
            .spacing(16.0)
            .line_spacing(16.0)
            .into()
    };

    column![header, body].spacing(16).into()
}

fn empty_state() -> Element<'static, Message> {
    let content = column![
        text("✨").size(40),
        text("Nothing here yet").size(18),
        text("Describe your vision above and generate your first creation")
            .size(14)
            .color(super::TEXT_DIM),
    ]
    .spacing(8)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .padding(48)
        .align_x(Alignment::Center)
        .style(super::panel_style)
        .into()
}

fn card<'a>(
    entry: &'a GalleryEntry,
    handle: Option<&Handle>,
    failed: bool,
) -> Element<'a, Message> {
    let media: Element<'a, Message> = if let Some(handle) = handle {
        image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(MEDIA_HEIGHT))
            .into()
    } else {
        let label = if failed {
            "⚠ Image failed to load"
        } else {
            "Conjuring pixels..."
        };

        container(text(label).size(13).color(super::TEXT_DIM))
            .width(Length::Fill)
            .height(Length::Fixed(MEDIA_HEIGHT))
            .align_x(Alignment::Center)
            .align_y(Alignment::Center)
            .into()
    };

    // The whole media pane opens the lightbox; the action buttons sit below
    // so a stray click cannot trigger both.
    let media = mouse_area(media).on_press(Message::OpenLightbox(entry.id));

    let actions = row![
        button(text("⧉ Copy").size(13))
            .style(button::secondary)
            .on_press(Message::CopyPrompt(entry.id)),
        button(text("⛶ View").size(13))
            .style(button::secondary)
            .on_press(Message::OpenLightbox(entry.id)),
    ]
    .spacing(8);

    let info = column![
        text(excerpt(&entry.prompt)).size(13),
        row![
            super::meta_tag(&entry.style),
            super::meta_tag(&entry.aspect_ratio),
            horizontal_space(),
            actions
        ]
        .spacing(6)
        .align_y(Alignment::Center),
    ]
    .spacing(8)
    .padding(12);

    container(column![media, info])
        .width(Length::Fixed(CARD_WIDTH))
        .style(super::panel_style)
        .into()
}

/// Prompts can be up to 500 characters; cards only show the head.
fn excerpt(prompt: &str) -> String {
    if prompt.chars().count() <= EXCERPT_LEN {
        prompt.to_string()
    } else {
        let mut cut: String = prompt.chars().take(EXCERPT_LEN).collect();
        cut.push('…');
        cut
    }
}
