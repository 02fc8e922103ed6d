use iced::{
    Element,
    widget::{button, column, container, pick_list, row, space, text, text_input},
};
use remora_lib::model::{ItemBody, PlaceholderConfig, PlaceholderKind, PresetItem, Role};

#[derive(Debug, Clone)]
pub enum Message {
    VariantPicked(Variant),
    RolePicked(Role),
    ContentChanged(String),
    KindPicked(PlaceholderKind),
    MaxLengthChanged(String),
    LimitChanged(String),
    ApplyPressed,
    CancelPressed,
}

pub enum Action {
    None,
    Cancel,
    Apply { index: usize, body: ItemBody },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Message,
    Placeholder,
}

impl Variant {
    const ALL: [Variant; 2] = [Variant::Message, Variant::Placeholder];
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Message => write!(f, "Message"),
            Variant::Placeholder => write!(f, "Placeholder"),
        }
    }
}

/// Edit dialog for a single content item. Switching the variant keeps both
/// drafts around, so flipping back and forth loses nothing until Apply.
pub struct ItemDialog {
    index: usize,
    variant: Variant,
    role: Role,
    content: String,
    kind: PlaceholderKind,
    max_length: String,
    limit: String,
}

impl ItemDialog {
    pub fn load(index: usize, item: &PresetItem) -> Self {
        let mut dialog = Self {
            index,
            variant: Variant::Message,
            role: Role::System,
            content: String::new(),
            kind: PlaceholderKind::ChatHistory,
            max_length: String::new(),
            limit: String::new(),
        };

        match &item.body {
            ItemBody::Message { role, content } => {
                dialog.role = *role;
                dialog.content = content.clone();
            }
            ItemBody::Placeholder {
                variable_name,
                config,
            } => {
                dialog.variant = Variant::Placeholder;
                dialog.kind = *variable_name;
                dialog.max_length = config.max_length.map(|n| n.to_string()).unwrap_or_default();
                dialog.limit = config.limit.map(|n| n.to_string()).unwrap_or_default();
            }
        }

        dialog
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::VariantPicked(variant) => self.variant = variant,
            Message::RolePicked(role) => self.role = role,
            Message::ContentChanged(content) => self.content = content,
            Message::KindPicked(kind) => {
                self.kind = kind;
                let defaults = kind.default_config();
                self.max_length = defaults.max_length.map(|n| n.to_string()).unwrap_or_default();
                self.limit = defaults.limit.map(|n| n.to_string()).unwrap_or_default();
            }
            Message::MaxLengthChanged(value) => {
                if value.is_empty() || value.parse::<u32>().is_ok() {
                    self.max_length = value;
                }
            }
            Message::LimitChanged(value) => {
                if value.is_empty() || value.parse::<u32>().is_ok() {
                    self.limit = value;
                }
            }
            Message::ApplyPressed => {
                if self.validate() {
                    return Action::Apply {
                        index: self.index,
                        body: self.build(),
                    };
                }
            }
            Message::CancelPressed => return Action::Cancel,
        }

        Action::None
    }

    fn build(&self) -> ItemBody {
        match self.variant {
            Variant::Message => ItemBody::Message {
                role: self.role,
                content: self.content.clone(),
            },
            Variant::Placeholder => ItemBody::Placeholder {
                variable_name: self.kind,
                config: PlaceholderConfig {
                    max_length: self.max_length.parse().ok(),
                    limit: self.limit.parse().ok(),
                },
            },
        }
    }

    fn validate(&self) -> bool {
        match self.variant {
            Variant::Message => !self.content.trim().is_empty(),
            Variant::Placeholder => true,
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let variant_row = row![
            text("Type:").width(100),
            pick_list(Variant::ALL, Some(self.variant), Message::VariantPicked),
        ]
        .spacing(8);

        let fields: Element<'_, Message> = match self.variant {
            Variant::Message => column![
                row![
                    text("Role:").width(100),
                    pick_list(Role::ALL, Some(self.role), Message::RolePicked),
                ]
                .spacing(8),
                row![
                    text("Content:").width(100),
                    text_input("Message content...", &self.content)
                        .on_input(Message::ContentChanged),
                ]
                .spacing(8),
            ]
            .spacing(12)
            .into(),
            Variant::Placeholder => {
                let mut fields = column![row![
                    text("Kind:").width(100),
                    pick_list(PlaceholderKind::ALL, Some(self.kind), Message::KindPicked),
                ]
                .spacing(8)]
                .spacing(12);

                match self.kind {
                    PlaceholderKind::ChatHistory => {
                        fields = fields.push(
                            row![
                                text("Max length:").width(100),
                                text_input("10", &self.max_length)
                                    .on_input(Message::MaxLengthChanged),
                            ]
                            .spacing(8),
                        );
                    }
                    PlaceholderKind::MessageHistory => {
                        fields = fields.push(
                            row![
                                text("Limit:").width(100),
                                text_input("10", &self.limit).on_input(Message::LimitChanged),
                            ]
                            .spacing(8),
                        );
                    }
                    PlaceholderKind::UserInput => {}
                }

                fields.into()
            }
        };

        let buttons = row![
            space::horizontal(),
            button(text("Cancel"))
                .style(button::subtle)
                .on_press(Message::CancelPressed),
            button(text("Apply"))
                .style(button::primary)
                .on_press_maybe(self.validate().then_some(Message::ApplyPressed)),
        ]
        .spacing(8);

        container(
            column![text("Edit item").size(18), variant_row, fields, buttons].spacing(16),
        )
        .padding(20)
        .width(460)
        .style(container::rounded_box)
        .into()
    }
}
