use iced::{
    Element, Length,
    widget::{button, checkbox, column, container, pick_list, row, scrollable, space, text, text_input},
};
use remora_lib::model::{ModelConfig, Preset, PresetMode, TriggerConfig};

use crate::components::presets::editor::{self, Editor};

#[derive(Debug, Clone)]
pub enum Message {
    NameChanged(String),
    ModePicked(PresetMode),
    OnMentionToggled(bool),
    OnKeywordToggled(bool),
    KeywordsChanged(String),
    ChatModelChanged(String),
    ChatBaseUrlChanged(String),
    ChatApiKeyChanged(String),
    TemperatureChanged(String),
    MaxTokensChanged(String),
    Editor(editor::Message),
    SavePressed,
    CancelPressed,
}

pub enum Action {
    None,
    Cancel,
    Save(Preset),
}

/// Create/edit dialog for one preset. Numeric model fields are kept as
/// string drafts until save so partial input never snaps back.
pub struct Form {
    id: Option<String>,
    name: String,
    mode: PresetMode,
    on_mention: bool,
    on_keyword: bool,
    keywords: String,
    chat_model: String,
    chat_base_url: String,
    chat_api_key: String,
    temperature: String,
    max_tokens: String,
    editor: Editor,
    saving: bool,
}

impl Form {
    pub fn create() -> Self {
        Self::load(&Preset::default())
    }

    pub fn load(preset: &Preset) -> Self {
        Self {
            id: preset.id.clone(),
            name: preset.name.clone(),
            mode: preset.mode,
            on_mention: preset.trigger.on_mention,
            on_keyword: preset.trigger.on_keyword,
            keywords: preset.trigger.keywords.join(", "),
            chat_model: preset.model.chat_model.clone(),
            chat_base_url: preset.model.chat_base_url.clone(),
            chat_api_key: preset.model.chat_api_key.clone(),
            temperature: preset
                .model
                .temperature
                .map(|t| t.to_string())
                .unwrap_or_default(),
            max_tokens: preset
                .model
                .max_tokens
                .map(|n| n.to_string())
                .unwrap_or_default(),
            editor: Editor::new(preset.content.to_vec()),
            saving: false,
        }
    }

    /// True while the parent has a save request in flight; disables the
    /// save button so a second click cannot race the first.
    pub fn set_saving(&mut self, saving: bool) {
        self.saving = saving;
    }

    pub fn escape(&mut self) {
        self.editor.escape();
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::NameChanged(value) => self.name = value,
            Message::ModePicked(mode) => self.mode = mode,
            Message::OnMentionToggled(value) => self.on_mention = value,
            Message::OnKeywordToggled(value) => self.on_keyword = value,
            Message::KeywordsChanged(value) => self.keywords = value,
            Message::ChatModelChanged(value) => self.chat_model = value,
            Message::ChatBaseUrlChanged(value) => self.chat_base_url = value,
            Message::ChatApiKeyChanged(value) => self.chat_api_key = value,
            Message::TemperatureChanged(value) => {
                if value.is_empty() || value.parse::<f64>().is_ok() || value.ends_with('.') {
                    self.temperature = value;
                }
            }
            Message::MaxTokensChanged(value) => {
                if value.is_empty() || value.parse::<u32>().is_ok() {
                    self.max_tokens = value;
                }
            }
            Message::Editor(message) => self.editor.update(message),
            Message::SavePressed => {
                if self.validate() && !self.saving {
                    return Action::Save(self.build());
                }
            }
            Message::CancelPressed => return Action::Cancel,
        }

        Action::None
    }

    fn build(&self) -> Preset {
        Preset {
            id: self.id.clone(),
            name: self.name.trim().to_string(),
            mode: self.mode,
            trigger: TriggerConfig {
                on_mention: self.on_mention,
                on_keyword: self.on_keyword,
                keywords: self
                    .keywords
                    .split(',')
                    .map(str::trim)
                    .filter(|keyword| !keyword.is_empty())
                    .map(String::from)
                    .collect(),
            },
            model: ModelConfig {
                chat_model: self.chat_model.trim().to_string(),
                chat_base_url: self.chat_base_url.trim().to_string(),
                chat_api_key: self.chat_api_key.clone(),
                temperature: self.temperature.parse().ok(),
                max_tokens: self.max_tokens.parse().ok(),
            },
            content: self.editor.items().to_vec(),
        }
    }

    fn validate(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn view(&self) -> Element<'_, Message> {
        fn labelled<'a>(label: &'static str, input: Element<'a, Message>) -> Element<'a, Message> {
            row![text(label).width(110), input].spacing(8).into()
        }

        let fields = column![
            labelled(
                "Name:",
                text_input("Preset name...", &self.name)
                    .on_input(Message::NameChanged)
                    .into(),
            ),
            labelled(
                "Mode:",
                pick_list(PresetMode::ALL, Some(self.mode), Message::ModePicked).into(),
            ),
            row![
                checkbox(self.on_mention).on_toggle(Message::OnMentionToggled),
                text("Trigger on mention"),
                space::horizontal(),
                checkbox(self.on_keyword).on_toggle(Message::OnKeywordToggled),
                text("Trigger on keyword"),
            ]
            .spacing(8),
            labelled(
                "Keywords:",
                text_input("comma, separated, keywords", &self.keywords)
                    .on_input(Message::KeywordsChanged)
                    .into(),
            ),
            labelled(
                "Model:",
                text_input("gpt-4o", &self.chat_model)
                    .on_input(Message::ChatModelChanged)
                    .into(),
            ),
            labelled(
                "Base URL:",
                text_input("https://api.example.com/v1", &self.chat_base_url)
                    .on_input(Message::ChatBaseUrlChanged)
                    .into(),
            ),
            labelled(
                "API key:",
                text_input("...", &self.chat_api_key)
                    .secure(true)
                    .on_input(Message::ChatApiKeyChanged)
                    .into(),
            ),
            row![
                text("Temperature:").width(110),
                text_input("0.7", &self.temperature).on_input(Message::TemperatureChanged),
                text("Max tokens:"),
                text_input("4096", &self.max_tokens).on_input(Message::MaxTokensChanged),
            ]
            .spacing(8),
        ]
        .spacing(10);

        let title = if self.id.is_some() {
            "Edit preset"
        } else {
            "New preset"
        };

        let save_label = if self.saving { "Saving..." } else { "Save" };
        let buttons = row![
            space::horizontal(),
            button(text("Cancel"))
                .style(button::subtle)
                .on_press(Message::CancelPressed),
            button(text(save_label))
                .style(button::primary)
                .on_press_maybe(
                    (self.validate() && !self.saving).then_some(Message::SavePressed)
                ),
        ]
        .spacing(8);

        container(scrollable(
            column![
                text(title).size(20),
                fields,
                text("Content").size(16),
                self.editor.view().map(Message::Editor),
                buttons,
            ]
            .spacing(16)
            .padding(20),
        ))
        .width(Length::Fixed(640.0))
        .max_height(640)
        .style(container::rounded_box)
        .into()
    }
}
