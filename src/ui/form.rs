/// The prompt form panel: text input with a character counter, a toggle for
/// the advanced style/aspect options, and the generate button.

use iced::widget::{button, column, container, horizontal_space, pick_list, row, text, text_input};
use iced::{Alignment, Element};

use crate::prompt::{AspectRatio, STYLES};
use crate::Message;

/// Longest prompt the form accepts; anything beyond is ignored.
pub const PROMPT_MAX_LEN: usize = 500;

/// Character count at which the counter turns into a warning.
pub const PROMPT_WARN_LEN: usize = 450;

/// Id of the prompt input, used to return focus after a validation error.
pub fn prompt_input_id() -> text_input::Id {
    text_input::Id::new("prompt-input")
}

pub fn view<'a>(
    prompt: &'a str,
    style: &'static str,
    aspect_ratio: AspectRatio,
    advanced_open: bool,
    is_generating: bool,
) -> Element<'a, Message> {
    let input = text_input("Describe the image you imagine...", prompt)
        .id(prompt_input_id())
        .on_input(Message::PromptChanged)
        .on_submit(Message::SubmitPrompt)
        .padding(14)
        .size(16);

    let chars = prompt.chars().count();
    let counter_color = if chars > PROMPT_WARN_LEN {
        super::WARNING
    } else {
        super::TEXT_DIM
    };
    let counter = text(format!("{chars}/{PROMPT_MAX_LEN}"))
        .size(12)
        .color(counter_color);

    let toggle_label = if advanced_open {
        "Options ▴"
    } else {
        "Options ▾"
    };
    let options_toggle = button(text(toggle_label).size(14))
        .style(button::text)
        .on_press(Message::ToggleAdvanced);

    let generate_label = if is_generating {
        "Igniting..."
    } else {
        "✦ Generate"
    };
    let generate = button(text(generate_label).size(16))
        .padding([12.0, 28.0])
        .style(|theme, status| {
            let mut style = button::primary(theme, status);
            if !matches!(status, button::Status::Disabled) {
                style.background = Some(super::ACCENT.into());
            }
            style
        })
        .on_press_maybe((!is_generating).then_some(Message::SubmitPrompt));

    let mut panel = column![
        input,
        row![options_toggle, horizontal_space(), counter].align_y(Alignment::Center),
    ]
    .spacing(10);

    if advanced_open {
        let styles = pick_list(STYLES, Some(style), Message::StyleSelected);
        let ratios = pick_list(AspectRatio::ALL, Some(aspect_ratio), Message::AspectSelected);

        panel = panel.push(
            row![
                text("Style").size(14).color(super::TEXT_DIM),
                styles,
                text("Aspect").size(14).color(super::TEXT_DIM),
                ratios,
            ]
            .spacing(12)
            .align_y(Alignment::Center),
        );
    }

    panel = panel.push(row![horizontal_space(), generate]);

    container(panel)
        .padding(20)
        .style(super::panel_style)
        .into()
}
