use iced::{
    Element, Length, Task,
    widget::{Column, button, column, container, pick_list, row, scrollable, space, text},
};
use remora_lib::{
    ApiClient, PresetKind,
    model::{Assignment, Friend, Group, Preset, Scope},
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
    ScopePicked(Scope),
    FriendPicked(Friend),
    GroupPicked(Group),
    PresetPicked(PresetChoice),
    AssignPressed,
    Assigned(LoadResult<()>),
    DeletePressed(usize),
    ConfirmResolved(Outcome),
    Deleted(LoadResult<()>),
}

pub enum Action {
    None,
    Run(Task<Message>),
    Toast(Toast),
    Unauthorized,
}

/// Everything the tab needs, fetched in one go so preset names and contact
/// labels resolve without follow-up requests.
#[derive(Debug, Clone)]
pub struct Data {
    assignments: Vec<Assignment>,
    presets: Vec<PresetChoice>,
    friends: Vec<Friend>,
    groups: Vec<Group>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetChoice {
    id: String,
    name: String,
}

impl std::fmt::Display for PresetChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

enum State {
    Loading,
    Error(String),
    Loaded(Data),
}

/// Assignment tab: binds presets to chat scopes. Shares its structure with
/// the preset tab and serves both the normal and disguise namespace.
pub struct Assignments {
    client: ApiClient,
    kind: PresetKind,
    state: State,
    scope: Scope,
    friend: Option<Friend>,
    group: Option<Group>,
    preset: Option<PresetChoice>,
    confirm: Option<(Confirm, Assignment)>,
    saving: bool,
}

impl Assignments {
    pub fn new(client: ApiClient, kind: PresetKind) -> (Self, Task<Message>) {
        let view = Self {
            client: client.clone(),
            kind,
            state: State::Loading,
            scope: Scope::Global,
            friend: None,
            group: None,
            preset: None,
            confirm: None,
            saving: false,
        };

        (view, load(client, kind))
    }

    pub fn refresh(&mut self) -> Task<Message> {
        self.state = State::Loading;
        load(self.client.clone(), self.kind)
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
            Message::ScopePicked(scope) => {
                self.scope = scope;
                Action::None
            }
            Message::FriendPicked(friend) => {
                self.friend = Some(friend);
                Action::None
            }
            Message::GroupPicked(group) => {
                self.group = Some(group);
                Action::None
            }
            Message::PresetPicked(preset) => {
                self.preset = Some(preset);
                Action::None
            }
            Message::AssignPressed => {
                let Some(preset) = &self.preset else {
                    return Action::None;
                };

                let context_id = match self.scope {
                    Scope::Global => None,
                    Scope::Private => self.friend.as_ref().map(|f| f.user_id.clone()),
                    Scope::Group => self.group.as_ref().map(|g| g.group_id.clone()),
                };

                if self.scope != Scope::Global && context_id.is_none() {
                    return Action::Toast(Toast::warning("Pick a context first"));
                }

                let assignment = Assignment::new(self.scope, context_id, preset.id.clone());
                let client = self.client.clone();
                let kind = self.kind;

                self.saving = true;
                Action::Run(Task::perform(
                    async move {
                        client
                            .put_assignment(kind, &assignment)
                            .await
                            .map_err(LoadError::from)
                    },
                    Message::Assigned,
                ))
            }
            Message::Assigned(Ok(())) => {
                self.saving = false;
                Action::Run(self.refresh())
            }
            Message::Assigned(Err(error)) => {
                self.saving = false;
                self.fail(error, "Assignment failed")
            }
            Message::DeletePressed(index) => {
                if let State::Loaded(data) = &self.state
                    && let Some(assignment) = data.assignments.get(index)
                {
                    let confirm = Confirm::new(
                        "Clear assignment",
                        format!(
                            "Remove the {} assignment{}?",
                            assignment.scope,
                            assignment
                                .context_id
                                .as_deref()
                                .map(|id| format!(" for {id}"))
                                .unwrap_or_default()
                        ),
                    );
                    self.confirm = Some((confirm, assignment.clone()));
                }
                Action::None
            }
            Message::ConfirmResolved(outcome) => {
                let Some((_, assignment)) = self.confirm.take() else {
                    return Action::None;
                };

                if outcome != Outcome::Confirmed {
                    return Action::None;
                }

                let client = self.client.clone();
                let kind = self.kind;
                Action::Run(Task::perform(
                    async move {
                        client
                            .delete_assignment(
                                kind,
                                assignment.scope,
                                assignment.context_id.as_deref(),
                            )
                            .await
                            .map_err(LoadError::from)
                    },
                    Message::Deleted,
                ))
            }
            Message::Deleted(Ok(())) => Action::Run(self.refresh()),
            Message::Deleted(Err(error)) => self.fail(error, "Delete failed"),
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
        let title = match self.kind {
            PresetKind::Normal => "Assignments",
            PresetKind::Disguise => "Disguise assignments",
        };

        let toolbar = row![
            text(title).size(22),
            space::horizontal(),
            button(icon("refresh"))
                .style(button::subtle)
                .on_press(Message::RefreshPressed),
        ]
        .spacing(8);

        let body: Element<'_, Message> = match &self.state {
            State::Loading => text("Loading assignments...").into(),
            State::Error(error) => text(error).style(text::danger).into(),
            State::Loaded(data) => column![self.assignment_list(data), self.assign_form(data)]
                .spacing(16)
                .into(),
        };

        let content = column![toolbar, body].spacing(12).padding(TAB_PADDING);

        if let Some((confirm, _)) = &self.confirm {
            modal(content, confirm.view().map(Message::ConfirmResolved), None)
        } else {
            content.into()
        }
    }

    fn assignment_list<'a>(&'a self, data: &'a Data) -> Element<'a, Message> {
        if data.assignments.is_empty() {
            return text("No assignments yet").into();
        }

        let rows = data.assignments.iter().enumerate().map(|(index, assignment)| {
            let context = match (&assignment.scope, &assignment.context_id) {
                (Scope::Global, _) => "everywhere".to_string(),
                (Scope::Private, Some(id)) => data
                    .friends
                    .iter()
                    .find(|friend| &friend.user_id == id)
                    .map(Friend::to_string)
                    .unwrap_or_else(|| id.clone()),
                (Scope::Group, Some(id)) => data
                    .groups
                    .iter()
                    .find(|group| &group.group_id == id)
                    .map(Group::to_string)
                    .unwrap_or_else(|| id.clone()),
                (_, None) => "(missing context)".to_string(),
            };

            let preset = data
                .presets
                .iter()
                .find(|preset| preset.id == assignment.preset_id)
                .map(|preset| preset.name.clone())
                .unwrap_or_else(|| assignment.preset_id.clone());

            container(
                row![
                    text(assignment.scope.to_string()).width(80),
                    text(context),
                    space::horizontal(),
                    text(preset),
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

    fn assign_form<'a>(&'a self, data: &'a Data) -> Element<'a, Message> {
        let mut form = row![pick_list(
            Scope::ALL,
            Some(self.scope),
            Message::ScopePicked
        )]
        .spacing(8);

        match self.scope {
            Scope::Global => {}
            Scope::Private => {
                form = form.push(
                    pick_list(
                        data.friends.as_slice(),
                        self.friend.clone(),
                        Message::FriendPicked,
                    )
                    .placeholder("Friend..."),
                );
            }
            Scope::Group => {
                form = form.push(
                    pick_list(
                        data.groups.as_slice(),
                        self.group.clone(),
                        Message::GroupPicked,
                    )
                    .placeholder("Group..."),
                );
            }
        }

        form = form.push(
            pick_list(
                data.presets.as_slice(),
                self.preset.clone(),
                Message::PresetPicked,
            )
            .placeholder("Preset..."),
        );

        form.push(
            button(text(if self.saving { "Assigning..." } else { "Assign" }))
                .style(button::primary)
                .on_press_maybe(
                    (self.preset.is_some() && !self.saving).then_some(Message::AssignPressed),
                ),
        )
        .into()
    }
}

fn load(client: ApiClient, kind: PresetKind) -> Task<Message> {
    Task::perform(
        async move {
            let (assignments, presets, friends, groups) = tokio::try_join!(
                client.assignments(kind),
                client.presets(kind),
                client.friends(),
                client.groups(),
            )
            .map_err(LoadError::from)?;

            Ok(Data {
                assignments,
                presets: presets.into_iter().filter_map(choice).collect(),
                friends,
                groups,
            })
        },
        Message::Loaded,
    )
}

fn choice(preset: Preset) -> Option<PresetChoice> {
    preset.id.map(|id| PresetChoice {
        id,
        name: preset.name,
    })
}
