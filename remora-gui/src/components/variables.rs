use iced::{
    Element, Length, Task,
    widget::{Column, button, column, container, row, scrollable, space, text, text_input},
};
use remora_lib::{
    ApiClient,
    model::{GlobalVariable, LocalVariableDefinition, LocalVariableInstance},
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

#[derive(Debug, Clone)]
pub enum Message {
    Loaded(LoadResult<Data>),
    RefreshPressed,
    SectionPicked(Section),
    // Globals
    GlobalNameChanged(String),
    GlobalValueChanged(String),
    GlobalAddPressed,
    // Definitions
    DefinitionNameChanged(String),
    DefinitionDefaultChanged(String),
    DefinitionAddPressed,
    // Row edits (active section)
    EditPressed(usize),
    EditDraftChanged(String),
    EditCommitted,
    EditCancelled,
    DeletePressed(usize),
    ConfirmResolved(Outcome),
    // Shared completion for every mutation; all of them end in a refresh.
    Mutated(LoadResult<()>),
}

pub enum Action {
    None,
    Run(Task<Message>),
    Toast(Toast),
    Unauthorized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Globals,
    Definitions,
    Instances,
}

impl Section {
    const ALL: [Section; 3] = [Section::Globals, Section::Definitions, Section::Instances];

    fn title(self) -> &'static str {
        match self {
            Section::Globals => "Globals",
            Section::Definitions => "Definitions",
            Section::Instances => "Instances",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Data {
    globals: Vec<GlobalVariable>,
    definitions: Vec<LocalVariableDefinition>,
    instances: Vec<LocalVariableInstance>,
}

enum State {
    Loading,
    Error(String),
    Loaded(Data),
}

enum PendingDelete {
    Global(String),
    Definition(String),
    Instance(String),
}

/// Variable stores tab, split into globals, local definitions and their
/// per-context instances. Values edit inline; only one row edits at a time.
pub struct Variables {
    client: ApiClient,
    state: State,
    section: Section,
    editing: Option<(usize, String)>,
    new_global_name: String,
    new_global_value: String,
    new_definition_name: String,
    new_definition_default: String,
    confirm: Option<(Confirm, PendingDelete)>,
}

impl Variables {
    pub fn new(client: ApiClient) -> (Self, Task<Message>) {
        let view = Self {
            client: client.clone(),
            state: State::Loading,
            section: Section::Globals,
            editing: None,
            new_global_name: String::new(),
            new_global_value: String::new(),
            new_definition_name: String::new(),
            new_definition_default: String::new(),
            confirm: None,
        };

        (view, load(client))
    }

    pub fn refresh(&mut self) -> Task<Message> {
        self.state = State::Loading;
        self.editing = None;
        load(self.client.clone())
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::Loaded(Ok(data)) => {
                self.state = State::Loaded(data);
                Action::None
            }
            Message::Loaded(Err(LoadError::Unauthorized)) => Action::Unauthorized,
            Message::Loaded(Err(error)) => {
                self.state = State::Error(error.to_string());
                Action::None
            }
            Message::RefreshPressed => Action::Run(self.refresh()),
            Message::SectionPicked(section) => {
                self.section = section;
                self.editing = None;
                Action::None
            }
            Message::GlobalNameChanged(value) => {
                self.new_global_name = value;
                Action::None
            }
            Message::GlobalValueChanged(value) => {
                self.new_global_value = value;
                Action::None
            }
            Message::GlobalAddPressed => {
                let variable = GlobalVariable {
                    name: self.new_global_name.trim().to_string(),
                    value: self.new_global_value.clone(),
                };
                if variable.name.is_empty() {
                    return Action::None;
                }

                self.new_global_name.clear();
                self.new_global_value.clear();

                let client = self.client.clone();
                Action::Run(Task::perform(
                    async move {
                        client
                            .create_global_variable(&variable)
                            .await
                            .map_err(LoadError::from)
                    },
                    Message::Mutated,
                ))
            }
            Message::DefinitionNameChanged(value) => {
                self.new_definition_name = value;
                Action::None
            }
            Message::DefinitionDefaultChanged(value) => {
                self.new_definition_default = value;
                Action::None
            }
            Message::DefinitionAddPressed => {
                let name = self.new_definition_name.trim().to_string();
                if name.is_empty() {
                    return Action::None;
                }

                let definition = LocalVariableDefinition {
                    id: None,
                    name,
                    default_value: (!self.new_definition_default.is_empty())
                        .then(|| self.new_definition_default.clone()),
                };

                self.new_definition_name.clear();
                self.new_definition_default.clear();

                let client = self.client.clone();
                Action::Run(Task::perform(
                    async move {
                        client
                            .create_local_definition(&definition)
                            .await
                            .map_err(LoadError::from)
                    },
                    Message::Mutated,
                ))
            }
            Message::EditPressed(index) => {
                let State::Loaded(data) = &self.state else {
                    return Action::None;
                };

                let draft = match self.section {
                    Section::Globals => data.globals.get(index).map(|v| v.value.clone()),
                    Section::Definitions => data
                        .definitions
                        .get(index)
                        .map(|d| d.default_value.clone().unwrap_or_default()),
                    Section::Instances => data.instances.get(index).map(|i| i.value.clone()),
                };

                if let Some(draft) = draft {
                    self.editing = Some((index, draft));
                }
                Action::None
            }
            Message::EditDraftChanged(value) => {
                if let Some((_, draft)) = &mut self.editing {
                    *draft = value;
                }
                Action::None
            }
            Message::EditCommitted => self.commit_edit(),
            Message::EditCancelled => {
                self.editing = None;
                Action::None
            }
            Message::DeletePressed(index) => {
                let State::Loaded(data) = &self.state else {
                    return Action::None;
                };

                let pending = match self.section {
                    Section::Globals => data.globals.get(index).map(|variable| {
                        (
                            format!("Delete global variable \"{}\"?", variable.name),
                            PendingDelete::Global(variable.name.clone()),
                        )
                    }),
                    Section::Definitions => data.definitions.get(index).and_then(|definition| {
                        definition.id.clone().map(|id| {
                            (
                                format!(
                                    "Delete \"{}\" and all of its instances?",
                                    definition.name
                                ),
                                PendingDelete::Definition(id),
                            )
                        })
                    }),
                    Section::Instances => data.instances.get(index).map(|instance| {
                        (
                            format!("Delete this instance of \"{}\"?", instance.definition_name),
                            PendingDelete::Instance(instance.id.clone()),
                        )
                    }),
                };

                if let Some((body, pending)) = pending {
                    self.confirm = Some((Confirm::new("Delete variable", body), pending));
                }
                Action::None
            }
            Message::ConfirmResolved(outcome) => {
                let Some((_, pending)) = self.confirm.take() else {
                    return Action::None;
                };

                if outcome != Outcome::Confirmed {
                    return Action::None;
                }

                let client = self.client.clone();
                Action::Run(Task::perform(
                    async move {
                        match pending {
                            PendingDelete::Global(name) => {
                                client.delete_global_variable(&name).await
                            }
                            PendingDelete::Definition(id) => {
                                client.delete_local_definition(&id).await
                            }
                            PendingDelete::Instance(id) => {
                                client.delete_local_instance(&id).await
                            }
                        }
                        .map_err(LoadError::from)
                    },
                    Message::Mutated,
                ))
            }
            Message::Mutated(Ok(())) => Action::Run(self.refresh()),
            Message::Mutated(Err(LoadError::Unauthorized)) => Action::Unauthorized,
            Message::Mutated(Err(error)) => {
                Action::Toast(Toast::error(format!("Operation failed: {error}")))
            }
        }
    }

    fn commit_edit(&mut self) -> Action {
        let Some((index, draft)) = self.editing.take() else {
            return Action::None;
        };
        let State::Loaded(data) = &self.state else {
            return Action::None;
        };

        let client = self.client.clone();

        match self.section {
            Section::Globals => {
                let Some(variable) = data.globals.get(index) else {
                    return Action::None;
                };
                let name = variable.name.clone();

                Action::Run(Task::perform(
                    async move {
                        client
                            .update_global_variable(&name, &draft)
                            .await
                            .map_err(LoadError::from)
                    },
                    Message::Mutated,
                ))
            }
            Section::Definitions => {
                let Some(definition) = data.definitions.get(index) else {
                    return Action::None;
                };
                let Some(id) = definition.id.clone() else {
                    return Action::None;
                };

                let updated = LocalVariableDefinition {
                    default_value: (!draft.is_empty()).then_some(draft),
                    ..definition.clone()
                };

                Action::Run(Task::perform(
                    async move {
                        client
                            .update_local_definition(&id, &updated)
                            .await
                            .map_err(LoadError::from)
                    },
                    Message::Mutated,
                ))
            }
            Section::Instances => {
                let Some(instance) = data.instances.get(index) else {
                    return Action::None;
                };

                let updated = LocalVariableInstance {
                    value: draft,
                    ..instance.clone()
                };

                Action::Run(Task::perform(
                    async move {
                        client
                            .update_local_instance(&updated)
                            .await
                            .map_err(LoadError::from)
                    },
                    Message::Mutated,
                ))
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let tabs = Section::ALL.iter().fold(
            row![].spacing(4),
            |tabs, &section| {
                let style = if section == self.section {
                    button::primary
                } else {
                    button::subtle
                };
                tabs.push(
                    button(text(section.title()))
                        .style(style)
                        .on_press(Message::SectionPicked(section)),
                )
            },
        );

        let toolbar = row![
            text("Variables").size(22),
            space::horizontal(),
            button(icon("refresh"))
                .style(button::subtle)
                .on_press(Message::RefreshPressed),
        ]
        .spacing(8);

        let body: Element<'_, Message> = match &self.state {
            State::Loading => text("Loading variables...").into(),
            State::Error(error) => text(error).style(text::danger).into(),
            State::Loaded(data) => match self.section {
                Section::Globals => self.globals_section(data),
                Section::Definitions => self.definitions_section(data),
                Section::Instances => self.instances_section(data),
            },
        };

        let content = column![toolbar, tabs, body].spacing(12).padding(TAB_PADDING);

        if let Some((confirm, _)) = &self.confirm {
            modal(content, confirm.view().map(Message::ConfirmResolved), None)
        } else {
            content.into()
        }
    }

    fn globals_section<'a>(&'a self, data: &'a Data) -> Element<'a, Message> {
        let rows = data.globals.iter().enumerate().map(|(index, variable)| {
            self.value_row(index, variable.name.clone(), &variable.value)
        });

        let add_form = row![
            text_input("Name...", &self.new_global_name).on_input(Message::GlobalNameChanged),
            text_input("Value...", &self.new_global_value).on_input(Message::GlobalValueChanged),
            button(icon("plus")).on_press_maybe(
                (!self.new_global_name.trim().is_empty()).then_some(Message::GlobalAddPressed),
            ),
        ]
        .spacing(8);

        column![
            scrollable(Column::with_children(rows).spacing(6)),
            add_form,
        ]
        .spacing(16)
        .into()
    }

    fn definitions_section<'a>(&'a self, data: &'a Data) -> Element<'a, Message> {
        let rows = data.definitions.iter().enumerate().map(|(index, definition)| {
            self.value_row(
                index,
                definition.name.clone(),
                definition.default_value.as_deref().unwrap_or(""),
            )
        });

        let add_form = row![
            text_input("Name...", &self.new_definition_name)
                .on_input(Message::DefinitionNameChanged),
            text_input("Default value...", &self.new_definition_default)
                .on_input(Message::DefinitionDefaultChanged),
            button(icon("plus")).on_press_maybe(
                (!self.new_definition_name.trim().is_empty())
                    .then_some(Message::DefinitionAddPressed),
            ),
        ]
        .spacing(8);

        column![
            scrollable(Column::with_children(rows).spacing(6)),
            add_form,
        ]
        .spacing(16)
        .into()
    }

    fn instances_section<'a>(&'a self, data: &'a Data) -> Element<'a, Message> {
        if data.instances.is_empty() {
            return text("No instances yet").into();
        }

        let rows = data.instances.iter().enumerate().map(|(index, instance)| {
            let label = format!(
                "{} · {} {}",
                instance.definition_name, instance.scope, instance.context_id
            );
            self.value_row(index, label, &instance.value)
        });

        scrollable(Column::with_children(rows).spacing(6)).into()
    }

    fn value_row<'a>(&'a self, index: usize, label: String, value: &'a str) -> Element<'a, Message> {
        let value_cell: Element<'_, Message> = match &self.editing {
            Some((editing, draft)) if *editing == index => row![
                text_input("Value...", draft)
                    .on_input(Message::EditDraftChanged)
                    .on_submit(Message::EditCommitted),
                button(icon("check")).on_press(Message::EditCommitted),
                button(icon("close"))
                    .style(button::subtle)
                    .on_press(Message::EditCancelled),
            ]
            .spacing(4)
            .into(),
            _ => text(value).into(),
        };

        container(
            row![
                text(label).width(220),
                value_cell,
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
    }
}

fn load(client: ApiClient) -> Task<Message> {
    Task::perform(
        async move {
            let (globals, definitions, instances) = tokio::try_join!(
                client.global_variables(),
                client.local_definitions(),
                client.local_instances(),
            )
            .map_err(LoadError::from)?;

            Ok(Data {
                globals,
                definitions,
                instances,
            })
        },
        Message::Loaded,
    )
}
