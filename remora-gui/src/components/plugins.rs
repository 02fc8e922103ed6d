use iced::{
    Element, Length, Task,
    widget::{Column, button, checkbox, column, container, pick_list, row, scrollable, space, text, text_input},
};
use remora_lib::{
    ApiClient,
    model::{ConfigField, ConfigFieldKind, Plugin, PluginConfig, Speaker},
};

use crate::{
    components::{LoadError, LoadResult, TAB_PADDING, toast::Toast},
    icons::icon,
    modal,
};

#[derive(Debug, Clone)]
pub enum Message {
    Loaded(LoadResult<Vec<Plugin>>),
    RefreshPressed,
    Toggled(usize, bool),
    ToggleFinished {
        name: String,
        enabled: bool,
        result: LoadResult<()>,
    },
    ConfigPressed(usize),
    DialogLoaded {
        name: String,
        result: LoadResult<(Vec<ConfigField>, PluginConfig)>,
    },
    SpeakersLoaded(LoadResult<Vec<Speaker>>),
    Dialog(DialogMessage),
    ConfigSaved(LoadResult<()>),
}

#[derive(Debug, Clone)]
pub enum DialogMessage {
    TextChanged(usize, String),
    NumberChanged(usize, String),
    BooleanToggled(usize, bool),
    OptionPicked(usize, String),
    SpeakerPicked(usize, Speaker),
    SavePressed,
    CancelPressed,
}

pub enum Action {
    None,
    Run(Task<Message>),
    Toast(Toast),
    Unauthorized,
}

enum State {
    Loading,
    Error(String),
    Loaded(Vec<Plugin>),
}

/// Plugin tab: enable/disable switches plus a schema-driven config dialog.
/// Config updates pushed over the event stream land via
/// [`Plugins::config_updated`].
pub struct Plugins {
    client: ApiClient,
    state: State,
    dialog: Option<ConfigDialog>,
}

impl Plugins {
    pub fn new(client: ApiClient) -> (Self, Task<Message>) {
        let view = Self {
            client: client.clone(),
            state: State::Loading,
            dialog: None,
        };

        (view, load(client))
    }

    pub fn refresh(&mut self) -> Task<Message> {
        self.state = State::Loading;
        load(self.client.clone())
    }

    /// The backend announced a config change for `name`. Reload the list,
    /// and if the dialog currently shows that plugin, reload its values so
    /// the user is not editing a stale draft.
    pub fn config_updated(&mut self, name: &str) -> Task<Message> {
        let mut tasks = vec![self.refresh()];

        if let Some(dialog) = &self.dialog
            && dialog.name == name
        {
            tasks.push(open_dialog(self.client.clone(), name.to_string()));
        }

        Task::batch(tasks)
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::Loaded(Ok(plugins)) => {
                self.state = State::Loaded(plugins);
                Action::None
            }
            Message::Loaded(Err(LoadError::Unauthorized)) => Action::Unauthorized,
            Message::Loaded(Err(error)) => {
                self.state = State::Error(error.to_string());
                Action::None
            }
            Message::RefreshPressed => Action::Run(self.refresh()),
            Message::Toggled(index, enabled) => {
                let State::Loaded(plugins) = &mut self.state else {
                    return Action::None;
                };
                let Some(plugin) = plugins.get_mut(index) else {
                    return Action::None;
                };

                // Flip optimistically; the revert happens on failure.
                plugin.enabled = enabled;
                let name = plugin.name.clone();

                let client = self.client.clone();
                let task_name = name.clone();
                Action::Run(Task::perform(
                    async move {
                        client
                            .set_plugin_enabled(&task_name, enabled)
                            .await
                            .map_err(LoadError::from)
                    },
                    move |result| Message::ToggleFinished {
                        name: name.clone(),
                        enabled,
                        result,
                    },
                ))
            }
            Message::ToggleFinished { result: Ok(()), .. } => Action::None,
            Message::ToggleFinished {
                name,
                enabled,
                result: Err(error),
            } => {
                if let State::Loaded(plugins) = &mut self.state
                    && let Some(plugin) = plugins.iter_mut().find(|plugin| plugin.name == name)
                {
                    plugin.enabled = !enabled;
                }
                self.fail(error, "Toggle failed")
            }
            Message::ConfigPressed(index) => {
                let State::Loaded(plugins) = &self.state else {
                    return Action::None;
                };
                let Some(plugin) = plugins.get(index) else {
                    return Action::None;
                };

                Action::Run(open_dialog(self.client.clone(), plugin.name.clone()))
            }
            Message::DialogLoaded {
                name,
                result: Ok((fields, config)),
            } => {
                let needs_speakers = fields
                    .iter()
                    .any(|field| field.kind == ConfigFieldKind::Speaker);

                self.dialog = Some(ConfigDialog::load(name, fields, &config));

                if needs_speakers {
                    let client = self.client.clone();
                    Action::Run(Task::perform(
                        async move { client.voice_speakers().await.map_err(LoadError::from) },
                        Message::SpeakersLoaded,
                    ))
                } else {
                    Action::None
                }
            }
            Message::DialogLoaded {
                result: Err(error), ..
            } => self.fail(error, "Could not load plugin config"),
            Message::SpeakersLoaded(Ok(speakers)) => {
                if let Some(dialog) = &mut self.dialog {
                    dialog.set_speakers(speakers);
                }
                Action::None
            }
            Message::SpeakersLoaded(Err(error)) => self.fail(error, "Could not load voices"),
            Message::Dialog(message) => {
                let Some(dialog) = &mut self.dialog else {
                    return Action::None;
                };

                match dialog.update(message) {
                    DialogAction::None => Action::None,
                    DialogAction::Cancel => {
                        self.dialog = None;
                        Action::None
                    }
                    DialogAction::Save(config) => {
                        dialog.saving = true;
                        let client = self.client.clone();
                        let name = dialog.name.clone();
                        Action::Run(Task::perform(
                            async move {
                                client
                                    .update_plugin_config(&name, &config)
                                    .await
                                    .map_err(LoadError::from)
                            },
                            Message::ConfigSaved,
                        ))
                    }
                }
            }
            Message::ConfigSaved(Ok(())) => {
                self.dialog = None;
                Action::Toast(Toast::info("Plugin config saved"))
            }
            Message::ConfigSaved(Err(error)) => {
                if let Some(dialog) = &mut self.dialog {
                    dialog.saving = false;
                }
                self.fail(error, "Save failed")
            }
        }
    }

    fn fail(&mut self, error: LoadError, context: &str) -> Action {
        match error {
            LoadError::Unauthorized => Action::Unauthorized,
            LoadError::Other(message) => {
                Action::Toast(Toast::error(format!("{context}: {message}")))
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let toolbar = row![
            text("Plugins").size(22),
            space::horizontal(),
            button(icon("refresh"))
                .style(button::subtle)
                .on_press(Message::RefreshPressed),
        ]
        .spacing(8);

        let body: Element<'_, Message> = match &self.state {
            State::Loading => text("Loading plugins...").into(),
            State::Error(error) => text(error).style(text::danger).into(),
            State::Loaded(plugins) if plugins.is_empty() => text("No plugins installed").into(),
            State::Loaded(plugins) => {
                let rows = plugins.iter().enumerate().map(|(index, plugin)| {
                    container(
                        row![
                            checkbox(plugin.enabled)
                                .on_toggle(move |enabled| Message::Toggled(index, enabled)),
                            column![
                                text(&plugin.name),
                                text(&plugin.description).size(12),
                            ]
                            .spacing(2),
                            space::horizontal(),
                            text(&plugin.status).size(12),
                            button(icon("settings"))
                                .style(button::subtle)
                                .on_press(Message::ConfigPressed(index)),
                        ]
                        .spacing(8)
                        .padding(8),
                    )
                    .width(Length::Fill)
                    .style(container::bordered_box)
                    .into()
                });

                scrollable(Column::with_children(rows).spacing(6)).into()
            }
        };

        let content = column![toolbar, body].spacing(12).padding(TAB_PADDING);

        if let Some(dialog) = &self.dialog {
            modal(content, dialog.view().map(Message::Dialog), None)
        } else {
            content.into()
        }
    }
}

fn load(client: ApiClient) -> Task<Message> {
    Task::perform(
        async move { client.plugins().await.map_err(LoadError::from) },
        Message::Loaded,
    )
}

fn open_dialog(client: ApiClient, name: String) -> Task<Message> {
    Task::perform(
        async move {
            let result = tokio::try_join!(
                client.plugin_config_definition(&name),
                client.plugin_config(&name),
            )
            .map_err(LoadError::from);

            (name, result)
        },
        |(name, result)| Message::DialogLoaded { name, result },
    )
}

enum DialogAction {
    None,
    Cancel,
    Save(PluginConfig),
}

/// Draft value for one config field, kept as entered until save.
#[derive(Debug, Clone)]
enum Draft {
    Text(String),
    Number(String),
    Boolean(bool),
    Select(Option<String>),
    Speaker(Option<String>),
}

struct ConfigDialog {
    name: String,
    fields: Vec<ConfigField>,
    drafts: Vec<Draft>,
    speakers: Option<Vec<Speaker>>,
    saving: bool,
}

impl ConfigDialog {
    fn load(name: String, fields: Vec<ConfigField>, config: &PluginConfig) -> Self {
        let drafts = fields
            .iter()
            .map(|field| {
                let value = config.get(&field.key).or(field.default.as_ref());
                match &field.kind {
                    ConfigFieldKind::Text => Draft::Text(
                        value.and_then(|v| v.as_str()).unwrap_or_default().to_string(),
                    ),
                    ConfigFieldKind::Number => Draft::Number(
                        value
                            .and_then(|v| v.as_f64())
                            .map(|n| n.to_string())
                            .unwrap_or_default(),
                    ),
                    ConfigFieldKind::Boolean => {
                        Draft::Boolean(value.and_then(|v| v.as_bool()).unwrap_or(false))
                    }
                    ConfigFieldKind::Select { .. } => {
                        Draft::Select(value.and_then(|v| v.as_str()).map(String::from))
                    }
                    ConfigFieldKind::Speaker => {
                        Draft::Speaker(value.and_then(|v| v.as_str()).map(String::from))
                    }
                }
            })
            .collect();

        Self {
            name,
            fields,
            drafts,
            speakers: None,
            saving: false,
        }
    }

    fn set_speakers(&mut self, speakers: Vec<Speaker>) {
        self.speakers = Some(speakers);
    }

    fn update(&mut self, message: DialogMessage) -> DialogAction {
        match message {
            DialogMessage::TextChanged(index, value) => {
                if let Some(draft) = self.drafts.get_mut(index) {
                    *draft = Draft::Text(value);
                }
            }
            DialogMessage::NumberChanged(index, value) => {
                if (value.is_empty() || value.parse::<f64>().is_ok() || value.ends_with('.'))
                    && let Some(draft) = self.drafts.get_mut(index)
                {
                    *draft = Draft::Number(value);
                }
            }
            DialogMessage::BooleanToggled(index, value) => {
                if let Some(draft) = self.drafts.get_mut(index) {
                    *draft = Draft::Boolean(value);
                }
            }
            DialogMessage::OptionPicked(index, value) => {
                if let Some(draft) = self.drafts.get_mut(index) {
                    *draft = Draft::Select(Some(value));
                }
            }
            DialogMessage::SpeakerPicked(index, speaker) => {
                if let Some(draft) = self.drafts.get_mut(index) {
                    *draft = Draft::Speaker(Some(speaker.id));
                }
            }
            DialogMessage::SavePressed => {
                if !self.saving {
                    return DialogAction::Save(self.build());
                }
            }
            DialogMessage::CancelPressed => return DialogAction::Cancel,
        }

        DialogAction::None
    }

    fn build(&self) -> PluginConfig {
        let mut config = PluginConfig::new();

        for (field, draft) in self.fields.iter().zip(&self.drafts) {
            let value = match draft {
                Draft::Text(value) => Some(serde_json::Value::from(value.clone())),
                Draft::Number(value) => value.parse::<f64>().ok().map(serde_json::Value::from),
                Draft::Boolean(value) => Some(serde_json::Value::from(*value)),
                Draft::Select(value) | Draft::Speaker(value) => {
                    value.clone().map(serde_json::Value::from)
                }
            };

            if let Some(value) = value {
                config.insert(field.key.clone(), value);
            }
        }

        config
    }

    fn view(&self) -> Element<'_, DialogMessage> {
        let rows = self
            .fields
            .iter()
            .zip(&self.drafts)
            .enumerate()
            .map(|(index, (field, draft))| self.field_row(index, field, draft));

        let buttons = row![
            space::horizontal(),
            button(text("Cancel"))
                .style(button::subtle)
                .on_press(DialogMessage::CancelPressed),
            button(text(if self.saving { "Saving..." } else { "Save" }))
                .style(button::primary)
                .on_press_maybe((!self.saving).then_some(DialogMessage::SavePressed)),
        ]
        .spacing(8);

        container(
            column![
                text(format!("Configure {}", self.name)).size(18),
                scrollable(Column::with_children(rows).spacing(10)),
                buttons,
            ]
            .spacing(16),
        )
        .padding(20)
        .width(480)
        .max_height(560)
        .style(container::rounded_box)
        .into()
    }

    fn field_row<'a>(
        &'a self,
        index: usize,
        field: &'a ConfigField,
        draft: &'a Draft,
    ) -> Element<'a, DialogMessage> {
        let label = text(field.display_label()).width(140);

        let input: Element<'_, DialogMessage> = match (&field.kind, draft) {
            (ConfigFieldKind::Text, Draft::Text(value)) => text_input("", value)
                .on_input(move |value| DialogMessage::TextChanged(index, value))
                .into(),
            (ConfigFieldKind::Number, Draft::Number(value)) => text_input("0", value)
                .on_input(move |value| DialogMessage::NumberChanged(index, value))
                .into(),
            (ConfigFieldKind::Boolean, Draft::Boolean(value)) => checkbox(*value)
                .on_toggle(move |value| DialogMessage::BooleanToggled(index, value))
                .into(),
            (ConfigFieldKind::Select { options }, Draft::Select(selected)) => pick_list(
                options.as_slice(),
                selected.clone(),
                move |value| DialogMessage::OptionPicked(index, value),
            )
            .into(),
            (ConfigFieldKind::Speaker, Draft::Speaker(selected)) => match &self.speakers {
                Some(speakers) => {
                    let current = speakers
                        .iter()
                        .find(|speaker| Some(&speaker.id) == selected.as_ref())
                        .cloned();
                    pick_list(speakers.as_slice(), current, move |speaker| {
                        DialogMessage::SpeakerPicked(index, speaker)
                    })
                    .placeholder("Voice...")
                    .into()
                }
                None => text("Loading voices...").into(),
            },
            // Kind and draft are built together, so a mismatch cannot occur.
            _ => text("").into(),
        };

        row![label, input].spacing(8).into()
    }
}
