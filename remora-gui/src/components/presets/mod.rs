use std::path::PathBuf;

use iced::{
    Element, Length, Task,
    widget::{Column, button, column, container, row, scrollable, space, text},
};
use remora_lib::{
    ApiClient, PresetKind,
    model::Preset,
    transfer::{self, Redaction},
};

use crate::{
    components::{
        LoadError, LoadResult, TAB_PADDING,
        confirm::{Confirm, Outcome},
        toast::Toast,
    },
    icons::icon,
    modal,
};

pub mod editor;
pub mod form;
pub mod item_dialog;

use form::Form;

#[derive(Debug, Clone)]
pub enum Message {
    Loaded(LoadResult<Vec<Preset>>),
    RefreshPressed,
    NewPressed,
    EditPressed(usize),
    DeletePressed(usize),
    ConfirmResolved(Outcome),
    Deleted(LoadResult<()>),
    Form(form::Message),
    Saved(LoadResult<()>),
    ImportPressed,
    ImportPicked(Option<PathBuf>),
    ImportRead(Result<String, String>),
    Imported(LoadResult<()>),
    ExportPressed,
    ExportTargetPicked(Option<PathBuf>),
    ExportWritten(Result<(), String>),
}

pub enum Action {
    None,
    Run(Task<Message>),
    Toast(Toast),
    Unauthorized,
    /// A preset was removed; assignments referencing it are now stale.
    PresetDeleted,
}

enum State {
    Loading,
    Error(String),
    Loaded(Vec<Preset>),
}

enum PendingConfirm {
    Delete(Preset),
    Export,
}

/// Preset management tab. One instance serves both the normal and the
/// disguise namespace, selected at construction.
pub struct Presets {
    client: ApiClient,
    kind: PresetKind,
    state: State,
    form: Option<Form>,
    confirm: Option<(Confirm, PendingConfirm)>,
    export_redaction: Option<Redaction>,
}

impl Presets {
    pub fn new(client: ApiClient, kind: PresetKind) -> (Self, Task<Message>) {
        let view = Self {
            client: client.clone(),
            kind,
            state: State::Loading,
            form: None,
            confirm: None,
            export_redaction: None,
        };

        (view, load(client, kind))
    }

    pub fn refresh(&mut self) -> Task<Message> {
        self.state = State::Loading;
        load(self.client.clone(), self.kind)
    }

    /// Escape was pressed while this tab is active.
    pub fn escape(&mut self) {
        if let Some(form) = &mut self.form {
            form.escape();
        }
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::Loaded(Ok(presets)) => {
                self.state = State::Loaded(presets);
                Action::None
            }
            Message::Loaded(Err(LoadError::Unauthorized)) => Action::Unauthorized,
            Message::Loaded(Err(error)) => {
                self.state = State::Error(error.to_string());
                Action::None
            }
            Message::RefreshPressed => Action::Run(self.refresh()),
            Message::NewPressed => {
                self.form = Some(Form::create());
                Action::None
            }
            Message::EditPressed(index) => {
                if let State::Loaded(presets) = &self.state
                    && let Some(preset) = presets.get(index)
                {
                    self.form = Some(Form::load(preset));
                }
                Action::None
            }
            Message::DeletePressed(index) => {
                if let State::Loaded(presets) = &self.state
                    && let Some(preset) = presets.get(index)
                {
                    let confirm = Confirm::new(
                        "Delete preset",
                        format!(
                            "Delete \"{}\"? Assignments pointing at it will be dropped.",
                            preset.name
                        ),
                    );
                    self.confirm = Some((confirm, PendingConfirm::Delete(preset.clone())));
                }
                Action::None
            }
            Message::ConfirmResolved(outcome) => self.resolve_confirm(outcome),
            // The parent reacts by refreshing this view and the matching
            // assignments tab, which may now hold dangling references.
            Message::Deleted(Ok(())) => Action::PresetDeleted,
            Message::Deleted(Err(error)) => self.fail(error, "Delete failed"),
            Message::Form(message) => {
                let Some(form) = &mut self.form else {
                    return Action::None;
                };

                match form.update(message) {
                    form::Action::None => Action::None,
                    form::Action::Cancel => {
                        self.form = None;
                        Action::None
                    }
                    form::Action::Save(preset) => {
                        form.set_saving(true);
                        Action::Run(save(self.client.clone(), self.kind, preset))
                    }
                }
            }
            Message::Saved(Ok(())) => {
                self.form = None;
                Action::Run(self.refresh())
            }
            Message::Saved(Err(error)) => {
                if let Some(form) = &mut self.form {
                    form.set_saving(false);
                }
                self.fail(error, "Save failed")
            }
            Message::ImportPressed => Action::Run(Task::perform(
                async {
                    rfd::AsyncFileDialog::new()
                        .add_filter("JSON", &["json"])
                        .pick_file()
                        .await
                        .map(|handle| handle.path().to_path_buf())
                },
                Message::ImportPicked,
            )),
            Message::ImportPicked(None) => Action::None,
            Message::ImportPicked(Some(path)) => Action::Run(Task::perform(
                async move {
                    tokio::fs::read_to_string(&path)
                        .await
                        .map_err(|error| error.to_string())
                },
                Message::ImportRead,
            )),
            Message::ImportRead(Err(error)) => {
                Action::Toast(Toast::error(format!("Could not read file: {error}")))
            }
            Message::ImportRead(Ok(raw)) => match transfer::import_presets(&raw) {
                Ok(presets) => {
                    let client = self.client.clone();
                    let kind = self.kind;
                    Action::Run(Task::perform(
                        async move {
                            client
                                .import_presets(kind, &presets)
                                .await
                                .map_err(LoadError::from)
                        },
                        Message::Imported,
                    ))
                }
                Err(error) => Action::Toast(Toast::warning(error.to_string())),
            },
            Message::Imported(Ok(())) => Action::Run(self.refresh()),
            Message::Imported(Err(error)) => self.fail(error, "Import failed"),
            Message::ExportPressed => {
                let confirm = Confirm::new(
                    "Export presets",
                    "Strip API keys and model endpoints from the exported file?",
                )
                .with_choices("Strip secrets", "Keep secrets");
                self.confirm = Some((confirm, PendingConfirm::Export));
                Action::None
            }
            Message::ExportTargetPicked(None) => {
                self.export_redaction = None;
                Action::None
            }
            Message::ExportTargetPicked(Some(path)) => {
                let Some(redaction) = self.export_redaction.take() else {
                    return Action::None;
                };
                let State::Loaded(presets) = &self.state else {
                    return Action::None;
                };

                let contents = match transfer::export_presets(presets, redaction) {
                    Ok(contents) => contents,
                    Err(error) => {
                        return Action::Toast(Toast::error(format!("Export failed: {error}")));
                    }
                };

                Action::Run(Task::perform(
                    async move {
                        tokio::fs::write(&path, contents)
                            .await
                            .map_err(|error| error.to_string())
                    },
                    Message::ExportWritten,
                ))
            }
            Message::ExportWritten(Ok(())) => Action::Toast(Toast::info("Presets exported")),
            Message::ExportWritten(Err(error)) => {
                Action::Toast(Toast::error(format!("Export failed: {error}")))
            }
        }
    }

    fn resolve_confirm(&mut self, outcome: Outcome) -> Action {
        let Some((_, pending)) = self.confirm.take() else {
            return Action::None;
        };

        match (pending, outcome) {
            (_, Outcome::Cancelled) => Action::None,
            (PendingConfirm::Delete(preset), Outcome::Confirmed) => {
                let Some(id) = preset.id else {
                    return Action::None;
                };

                let client = self.client.clone();
                let kind = self.kind;
                Action::Run(Task::perform(
                    async move { client.delete_preset(kind, &id).await.map_err(LoadError::from) },
                    Message::Deleted,
                ))
            }
            // Delete dialogs never offer a deny choice.
            (PendingConfirm::Delete(_), Outcome::Denied) => Action::None,
            (PendingConfirm::Export, outcome) => {
                self.export_redaction = Some(match outcome {
                    Outcome::Confirmed => Redaction::Strip,
                    _ => Redaction::Keep,
                });

                Action::Run(Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .add_filter("JSON", &["json"])
                            .set_file_name("presets.json")
                            .save_file()
                            .await
                            .map(|handle| handle.path().to_path_buf())
                    },
                    Message::ExportTargetPicked,
                ))
            }
        }
    }

    fn fail(&mut self, error: LoadError, context: &str) -> Action {
        match error {
            LoadError::Unauthorized => Action::Unauthorized,
            LoadError::Other(message) => Action::Toast(Toast::error(format!("{context}: {message}"))),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let toolbar = row![
            text(self.kind.title()).size(22),
            space::horizontal(),
            button(icon("import"))
                .style(button::subtle)
                .on_press(Message::ImportPressed),
            button(icon("export"))
                .style(button::subtle)
                .on_press_maybe(
                    matches!(&self.state, State::Loaded(presets) if !presets.is_empty())
                        .then_some(Message::ExportPressed)
                ),
            button(icon("refresh"))
                .style(button::subtle)
                .on_press(Message::RefreshPressed),
            button(icon("plus")).on_press(Message::NewPressed),
        ]
        .spacing(8);

        let body: Element<'_, Message> = match &self.state {
            State::Loading => text("Loading presets...").into(),
            State::Error(error) => text(error).style(text::danger).into(),
            State::Loaded(presets) if presets.is_empty() => text("No presets yet").into(),
            State::Loaded(presets) => {
                let rows = presets.iter().enumerate().map(|(index, preset)| {
                    container(
                        row![
                            column![
                                text(&preset.name),
                                text(format!(
                                    "{} · {} items",
                                    preset.mode,
                                    preset.content.len()
                                ))
                                .size(12),
                            ]
                            .spacing(2),
                            space::horizontal(),
                            button(icon("edit"))
                                .style(button::subtle)
                                .on_press(Message::EditPressed(index)),
                            button(icon("delete"))
                                .style(button::danger)
                                .on_press(Message::DeletePressed(index)),
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

        let content = column![toolbar, body]
            .spacing(12)
            .padding(TAB_PADDING);

        if let Some(form) = &self.form {
            modal(content, form.view().map(Message::Form), None)
        } else if let Some((confirm, _)) = &self.confirm {
            modal(content, confirm.view().map(Message::ConfirmResolved), None)
        } else {
            content.into()
        }
    }
}

fn load(client: ApiClient, kind: PresetKind) -> Task<Message> {
    Task::perform(
        async move { client.presets(kind).await.map_err(LoadError::from) },
        Message::Loaded,
    )
}

fn save(client: ApiClient, kind: PresetKind, preset: Preset) -> Task<Message> {
    Task::perform(
        async move {
            match &preset.id {
                Some(id) => client.update_preset(kind, id, &preset).await,
                None => client.create_preset(kind, &preset).await.map(|_| ()),
            }
            .map_err(LoadError::from)
        },
        Message::Saved,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presets() -> Presets {
        let client = ApiClient::new("http://127.0.0.1:9", "token").unwrap();
        let (presets, _task) = Presets::new(client, PresetKind::Normal);
        presets
    }

    // The console refreshes the matching assignments tab on this action;
    // a plain refresh here would leave stale assignment rows behind.
    #[test]
    fn successful_delete_is_reported_to_the_parent() {
        let mut presets = presets();
        let action = presets.update(Message::Deleted(Ok(())));
        assert!(matches!(action, Action::PresetDeleted));
    }

    #[test]
    fn failed_delete_stays_local() {
        let mut presets = presets();
        let action = presets.update(Message::Deleted(Err(LoadError::Other("boom".into()))));
        assert!(matches!(action, Action::Toast(_)));
    }
}
