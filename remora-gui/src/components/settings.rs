use iced::{
    Element, Length, Task,
    widget::{button, checkbox, column, container, pick_list, row, space, text, text_input},
};
use remora_lib::{ApiClient, model::Settings as BackendSettings};

use crate::{
    components::{LoadError, LoadResult, TAB_PADDING, toast::Toast},
    config::{GuiConfig, theme::Theme},
    icons::icon,
};

#[derive(Debug, Clone)]
pub enum Message {
    Loaded(LoadResult<BackendSettings>),
    RefreshPressed,
    CommandPrefixChanged(String),
    ReplyWhenMentionedToggled(bool),
    StreamOutputToggled(bool),
    MaxContextChanged(String),
    SavePressed,
    Saved(LoadResult<()>),
    ThemePicked(Theme),
    DisconnectPressed,
}

pub enum Action {
    None,
    Run(Task<Message>),
    Toast(Toast),
    Unauthorized,
    /// The user picked a new GUI theme; the app persists and applies it.
    ThemeChanged(Theme),
    /// The user asked to drop the stored token and return to the login
    /// screen.
    Disconnect,
}

enum State {
    Loading,
    Error(String),
    Loaded,
}

/// Settings tab: backend-wide toggles plus local GUI preferences.
pub struct Settings {
    client: ApiClient,
    state: State,
    command_prefix: String,
    reply_when_mentioned: bool,
    stream_output: bool,
    max_context: String,
    saving: bool,
    theme: Theme,
}

impl Settings {
    pub fn new(client: ApiClient, gui: &GuiConfig) -> (Self, Task<Message>) {
        let view = Self {
            client: client.clone(),
            state: State::Loading,
            command_prefix: String::new(),
            reply_when_mentioned: false,
            stream_output: false,
            max_context: String::new(),
            saving: false,
            theme: gui.theme,
        };

        (view, load(client))
    }

    pub fn refresh(&mut self) -> Task<Message> {
        self.state = State::Loading;
        load(self.client.clone())
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::Loaded(Ok(settings)) => {
                self.command_prefix = settings.command_prefix;
                self.reply_when_mentioned = settings.reply_when_mentioned;
                self.stream_output = settings.stream_output;
                self.max_context = settings.max_context_messages.to_string();
                self.state = State::Loaded;
                Action::None
            }
            Message::Loaded(Err(LoadError::Unauthorized)) => Action::Unauthorized,
            Message::Loaded(Err(error)) => {
                self.state = State::Error(error.to_string());
                Action::None
            }
            Message::RefreshPressed => Action::Run(self.refresh()),
            Message::CommandPrefixChanged(value) => {
                self.command_prefix = value;
                Action::None
            }
            Message::ReplyWhenMentionedToggled(value) => {
                self.reply_when_mentioned = value;
                Action::None
            }
            Message::StreamOutputToggled(value) => {
                self.stream_output = value;
                Action::None
            }
            Message::MaxContextChanged(value) => {
                if value.is_empty() || value.parse::<u32>().is_ok() {
                    self.max_context = value;
                }
                Action::None
            }
            Message::SavePressed => {
                let Some(settings) = self.build() else {
                    return Action::Toast(Toast::warning("Max context must be a number"));
                };

                self.saving = true;
                let client = self.client.clone();
                Action::Run(Task::perform(
                    async move {
                        client
                            .update_settings(&settings)
                            .await
                            .map_err(LoadError::from)
                    },
                    Message::Saved,
                ))
            }
            Message::Saved(Ok(())) => {
                self.saving = false;
                Action::Toast(Toast::info("Settings saved"))
            }
            Message::Saved(Err(LoadError::Unauthorized)) => Action::Unauthorized,
            Message::Saved(Err(error)) => {
                self.saving = false;
                Action::Toast(Toast::error(format!("Save failed: {error}")))
            }
            Message::ThemePicked(theme) => {
                self.theme = theme;
                Action::ThemeChanged(theme)
            }
            Message::DisconnectPressed => Action::Disconnect,
        }
    }

    fn build(&self) -> Option<BackendSettings> {
        Some(BackendSettings {
            command_prefix: self.command_prefix.clone(),
            reply_when_mentioned: self.reply_when_mentioned,
            stream_output: self.stream_output,
            max_context_messages: self.max_context.parse().ok()?,
        })
    }

    pub fn view(&self) -> Element<'_, Message> {
        let toolbar = row![
            text("Settings").size(22),
            space::horizontal(),
            button(icon("refresh"))
                .style(button::subtle)
                .on_press(Message::RefreshPressed),
        ]
        .spacing(8);

        let backend: Element<'_, Message> = match &self.state {
            State::Loading => text("Loading settings...").into(),
            State::Error(error) => text(error).style(text::danger).into(),
            State::Loaded => column![
                row![
                    text("Command prefix:").width(160),
                    text_input("/", &self.command_prefix)
                        .on_input(Message::CommandPrefixChanged)
                        .width(120),
                ]
                .spacing(8),
                row![
                    checkbox(self.reply_when_mentioned)
                        .on_toggle(Message::ReplyWhenMentionedToggled),
                    text("Reply when mentioned"),
                ]
                .spacing(8),
                row![
                    checkbox(self.stream_output).on_toggle(Message::StreamOutputToggled),
                    text("Stream output"),
                ]
                .spacing(8),
                row![
                    text("Max context messages:").width(160),
                    text_input("20", &self.max_context)
                        .on_input(Message::MaxContextChanged)
                        .width(120),
                ]
                .spacing(8),
                button(text(if self.saving { "Saving..." } else { "Save" }))
                    .style(button::primary)
                    .on_press_maybe(
                        (!self.saving && self.build().is_some()).then_some(Message::SavePressed),
                    ),
            ]
            .spacing(10)
            .into(),
        };

        let local = column![
            text("Console").size(16),
            row![
                text("Theme:").width(160),
                pick_list(Theme::ALL, Some(self.theme), Message::ThemePicked),
            ]
            .spacing(8),
            button(text("Disconnect"))
                .style(button::danger)
                .on_press(Message::DisconnectPressed),
        ]
        .spacing(10);

        column![
            toolbar,
            text("Backend").size(16),
            container(backend).width(Length::Fill),
            local,
        ]
        .spacing(16)
        .padding(TAB_PADDING)
        .into()
    }
}

fn load(client: ApiClient) -> Task<Message> {
    Task::perform(
        async move { client.settings().await.map_err(LoadError::from) },
        Message::Loaded,
    )
}
