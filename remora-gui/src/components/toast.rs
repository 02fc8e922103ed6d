use std::time::Duration;

use iced::{
    Element, Length,
    Task,
    widget::{Column, button, container, row, space, text},
};

use crate::icons::icon;

const DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    /// Client-side validation problems.
    Warning,
    /// Network or backend failures.
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub severity: Severity,
    pub message: String,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Expired(usize),
    DismissPressed(usize),
}

/// Stack of transient notifications rendered over the active view.
#[derive(Default)]
pub struct Toasts {
    next_id: usize,
    entries: Vec<(usize, Toast)>,
}

impl Toasts {
    pub fn push(&mut self, toast: Toast) -> Task<Message> {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push((id, toast));

        Task::perform(tokio::time::sleep(DISMISS_AFTER), move |_| {
            Message::Expired(id)
        })
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::Expired(id) | Message::DismissPressed(id) => {
                self.entries.retain(|(entry_id, _)| *entry_id != id);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let rows = self.entries.iter().map(|(id, toast)| {
            let id = *id;

            container(
                row![
                    text(&toast.message),
                    space::horizontal(),
                    button(icon("close"))
                        .style(button::subtle)
                        .on_press(Message::DismissPressed(id)),
                ]
                .padding(8),
            )
            .width(Length::Fixed(380.0))
            .style(move |theme: &iced::Theme| style_for(theme, toast.severity))
            .into()
        });

        Column::with_children(rows).spacing(8).into()
    }
}

fn style_for(theme: &iced::Theme, severity: Severity) -> container::Style {
    let palette = theme.extended_palette();

    let pair = match severity {
        Severity::Info => palette.secondary.base,
        Severity::Warning => palette.danger.weak,
        Severity::Error => palette.danger.base,
    };

    container::Style {
        background: Some(pair.color.into()),
        text_color: Some(pair.text),
        border: iced::Border {
            radius: 4.0.into(),
            ..iced::Border::default()
        },
        ..container::Style::default()
    }
}
