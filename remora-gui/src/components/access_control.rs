use iced::{
    Element, Length, Task,
    widget::{Column, button, column, container, pick_list, row, scrollable, space, text},
};
use remora_lib::{
    ApiClient,
    model::{AccessControlEntry, Friend, Group, Scope},
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
    AddPressed,
    Added(LoadResult<()>),
    RemovePressed(usize),
    ConfirmResolved(Outcome),
    Removed(LoadResult<()>),
}

pub enum Action {
    None,
    Run(Task<Message>),
    Toast(Toast),
    Unauthorized,
}

#[derive(Debug, Clone)]
pub struct Data {
    entries: Vec<AccessControlEntry>,
    friends: Vec<Friend>,
    groups: Vec<Group>,
}

enum State {
    Loading,
    Error(String),
    Loaded(Data),
}

/// Allow-list tab. Only private and group scopes apply here; a global
/// entry would be meaningless.
pub struct AccessControl {
    client: ApiClient,
    state: State,
    scope: Scope,
    friend: Option<Friend>,
    group: Option<Group>,
    confirm: Option<(Confirm, AccessControlEntry)>,
    saving: bool,
}

impl AccessControl {
    pub fn new(client: ApiClient) -> (Self, Task<Message>) {
        let view = Self {
            client: client.clone(),
            state: State::Loading,
            scope: Scope::Private,
            friend: None,
            group: None,
            confirm: None,
            saving: false,
        };

        (view, load(client))
    }

    pub fn refresh(&mut self) -> Task<Message> {
        self.state = State::Loading;
        load(self.client.clone())
    }

    fn context_id(&self) -> Option<String> {
        match self.scope {
            Scope::Global => None,
            Scope::Private => self.friend.as_ref().map(|f| f.user_id.clone()),
            Scope::Group => self.group.as_ref().map(|g| g.group_id.clone()),
        }
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
            Message::AddPressed => {
                let Some(context_id) = self.context_id() else {
                    return Action::Toast(Toast::warning("Pick a context first"));
                };

                let entry = AccessControlEntry {
                    scope: self.scope,
                    context_id,
                };

                let client = self.client.clone();
                self.saving = true;
                Action::Run(Task::perform(
                    async move { client.add_access(&entry).await.map_err(LoadError::from) },
                    Message::Added,
                ))
            }
            Message::Added(Ok(())) => {
                self.saving = false;
                Action::Run(self.refresh())
            }
            Message::Added(Err(error)) => {
                self.saving = false;
                self.fail(error, "Add failed")
            }
            Message::RemovePressed(index) => {
                if let State::Loaded(data) = &self.state
                    && let Some(entry) = data.entries.get(index)
                {
                    let confirm = Confirm::new(
                        "Remove access",
                        format!("Remove {} from the allow list?", entry.context_id),
                    );
                    self.confirm = Some((confirm, entry.clone()));
                }
                Action::None
            }
            Message::ConfirmResolved(outcome) => {
                let Some((_, entry)) = self.confirm.take() else {
                    return Action::None;
                };

                if outcome != Outcome::Confirmed {
                    return Action::None;
                }

                let client = self.client.clone();
                Action::Run(Task::perform(
                    async move { client.remove_access(&entry).await.map_err(LoadError::from) },
                    Message::Removed,
                ))
            }
            Message::Removed(Ok(())) => Action::Run(self.refresh()),
            Message::Removed(Err(error)) => self.fail(error, "Remove failed"),
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
            text("Access control").size(22),
            space::horizontal(),
            button(icon("refresh"))
                .style(button::subtle)
                .on_press(Message::RefreshPressed),
        ]
        .spacing(8);

        let body: Element<'_, Message> = match &self.state {
            State::Loading => text("Loading allow list...").into(),
            State::Error(error) => text(error).style(text::danger).into(),
            State::Loaded(data) => column![self.entry_list(data), self.add_form(data)]
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

    fn entry_list<'a>(&'a self, data: &'a Data) -> Element<'a, Message> {
        if data.entries.is_empty() {
            return text("The allow list is empty").into();
        }

        let rows = data.entries.iter().enumerate().map(|(index, entry)| {
            let label = match entry.scope {
                Scope::Private => data
                    .friends
                    .iter()
                    .find(|friend| friend.user_id == entry.context_id)
                    .map(Friend::to_string),
                Scope::Group => data
                    .groups
                    .iter()
                    .find(|group| group.group_id == entry.context_id)
                    .map(Group::to_string),
                Scope::Global => None,
            }
            .unwrap_or_else(|| entry.context_id.clone());

            container(
                row![
                    text(entry.scope.to_string()).width(80),
                    text(label),
                    space::horizontal(),
                    button(icon("delete"))
                        .style(button::danger)
                        .on_press(Message::RemovePressed(index)),
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

    fn add_form<'a>(&'a self, data: &'a Data) -> Element<'a, Message> {
        let mut form = row![pick_list(
            Scope::CONTEXTUAL,
            Some(self.scope),
            Message::ScopePicked
        )]
        .spacing(8);

        match self.scope {
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
            Scope::Group | Scope::Global => {
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

        form.push(
            button(text(if self.saving { "Adding..." } else { "Allow" }))
                .style(button::primary)
                .on_press_maybe(
                    (self.context_id().is_some() && !self.saving).then_some(Message::AddPressed),
                ),
        )
        .into()
    }
}

fn load(client: ApiClient) -> Task<Message> {
    Task::perform(
        async move {
            let (entries, friends, groups) = tokio::try_join!(
                client.access_list(),
                client.friends(),
                client.groups(),
            )
            .map_err(LoadError::from)?;

            Ok(Data {
                entries,
                friends,
                groups,
            })
        },
        Message::Loaded,
    )
}
