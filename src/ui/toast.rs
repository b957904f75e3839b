/// Toast notifications: a non-blocking overlay queue anchored bottom-right.
/// Each toast dismisses on its own timer; several can be visible at once,
/// and a fading toast renders translucent until its removal timer fires.

use iced::widget::{container, row, text, Column};
use iced::{alignment, Alignment, Border, Color, Element, Length};

use crate::state::data::{Toast, ToastKind};
use crate::Message;

pub fn view(toasts: &[Toast]) -> Element<'_, Message> {
    let items = toasts.iter().map(item);

    container(Column::with_children(items).spacing(8).align_x(Alignment::End))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Right)
        .align_y(alignment::Vertical::Bottom)
        .padding(24)
        .into()
}

fn item(toast: &Toast) -> Element<'_, Message> {
    let (icon, accent) = match toast.kind {
        ToastKind::Success => ("✔", Color::from_rgb8(0x4a, 0xde, 0x80)),
        ToastKind::Error => ("⚠", Color::from_rgb8(0xf8, 0x71, 0x71)),
        ToastKind::Info => ("ℹ", Color::from_rgb8(0x60, 0xa5, 0xfa)),
    };

    let alpha = if toast.fading { 0.35 } else { 1.0 };

    let content = row![
        text(icon).size(15).color(accent.scale_alpha(alpha)),
        text(&toast.message)
            .size(14)
            .color(Color::WHITE.scale_alpha(alpha)),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    container(content)
        .padding([10.0, 16.0])
        .style(move |_theme| container::Style {
            background: Some(super::SURFACE_LIGHT.scale_alpha(alpha).into()),
            border: Border {
                color: accent.scale_alpha(alpha * 0.6),
                width: 1.0,
                radius: 10.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}
