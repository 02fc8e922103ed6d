use iced::{
    Element, Length, Task,
    widget::{Column, button, column, container, pick_list, row, scrollable, space, text, text_input},
};
use remora_lib::{
    ApiClient,
    model::{Friend, Group, HistoryEntry, HistoryKind, Scope},
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
    ContactsLoaded(LoadResult<(Vec<Friend>, Vec<Group>)>),
    KindPicked(HistoryKind),
    ScopePicked(Scope),
    FriendPicked(Friend),
    GroupPicked(Group),
    LimitChanged(String),
    FetchPressed,
    Fetched(LoadResult<Vec<HistoryEntry>>),
    DeleteCountChanged(String),
    DeletePressed,
    ConfirmResolved(Outcome),
    Deleted(LoadResult<()>),
}

pub enum Action {
    None,
    Run(Task<Message>),
    Toast(Toast),
    Unauthorized,
}

enum Entries {
    NothingFetched,
    Loading,
    Error(String),
    Loaded(Vec<HistoryEntry>),
}

/// History inspector. Unlike the other tabs nothing loads until the user
/// has picked a store, a scope and a context; only the contact lists are
/// fetched up front.
pub struct History {
    client: ApiClient,
    friends: Vec<Friend>,
    groups: Vec<Group>,
    kind: HistoryKind,
    scope: Scope,
    friend: Option<Friend>,
    group: Option<Group>,
    limit: String,
    delete_count: String,
    entries: Entries,
    confirm: Option<Confirm>,
}

impl History {
    pub fn new(client: ApiClient) -> (Self, Task<Message>) {
        let view = Self {
            client: client.clone(),
            friends: Vec::new(),
            groups: Vec::new(),
            kind: HistoryKind::Chat,
            scope: Scope::Private,
            friend: None,
            group: None,
            limit: "50".into(),
            delete_count: "1".into(),
            entries: Entries::NothingFetched,
            confirm: None,
        };

        let task = Task::perform(
            async move {
                tokio::try_join!(client.friends(), client.groups()).map_err(LoadError::from)
            },
            Message::ContactsLoaded,
        );

        (view, task)
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
            Message::ContactsLoaded(Ok((friends, groups))) => {
                self.friends = friends;
                self.groups = groups;
                Action::None
            }
            Message::ContactsLoaded(Err(LoadError::Unauthorized)) => Action::Unauthorized,
            Message::ContactsLoaded(Err(error)) => {
                Action::Toast(Toast::error(format!("Could not load contacts: {error}")))
            }
            Message::KindPicked(kind) => {
                self.kind = kind;
                Action::None
            }
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
            Message::LimitChanged(value) => {
                if value.is_empty() || value.parse::<u32>().is_ok() {
                    self.limit = value;
                }
                Action::None
            }
            Message::FetchPressed => {
                let Some(context_id) = self.context_id() else {
                    return Action::Toast(Toast::warning("Pick a context first"));
                };
                let limit = self.limit.parse().unwrap_or(50);

                let client = self.client.clone();
                let kind = self.kind;
                let scope = self.scope;

                self.entries = Entries::Loading;
                Action::Run(Task::perform(
                    async move {
                        client
                            .history(kind, scope, &context_id, limit)
                            .await
                            .map_err(LoadError::from)
                    },
                    Message::Fetched,
                ))
            }
            Message::Fetched(Ok(entries)) => {
                self.entries = Entries::Loaded(entries);
                Action::None
            }
            Message::Fetched(Err(LoadError::Unauthorized)) => Action::Unauthorized,
            Message::Fetched(Err(error)) => {
                self.entries = Entries::Error(error.to_string());
                Action::None
            }
            Message::DeleteCountChanged(value) => {
                if value.is_empty() || value.parse::<u32>().is_ok() {
                    self.delete_count = value;
                }
                Action::None
            }
            Message::DeletePressed => {
                let count: u32 = self.delete_count.parse().unwrap_or(0);
                if count == 0 || self.context_id().is_none() {
                    return Action::None;
                }

                self.confirm = Some(Confirm::new(
                    "Delete history",
                    format!(
                        "Delete the {count} most recent entries from {}?",
                        self.kind
                    ),
                ));
                Action::None
            }
            Message::ConfirmResolved(outcome) => {
                self.confirm = None;
                if outcome != Outcome::Confirmed {
                    return Action::None;
                }

                let Some(context_id) = self.context_id() else {
                    return Action::None;
                };
                let count = self.delete_count.parse().unwrap_or(0);

                let client = self.client.clone();
                let kind = self.kind;
                let scope = self.scope;

                Action::Run(Task::perform(
                    async move {
                        client
                            .delete_history(kind, scope, &context_id, count)
                            .await
                            .map_err(LoadError::from)
                    },
                    Message::Deleted,
                ))
            }
            Message::Deleted(Ok(())) => {
                // Refetch so the list reflects the trim.
                self.update(Message::FetchPressed)
            }
            Message::Deleted(Err(LoadError::Unauthorized)) => Action::Unauthorized,
            Message::Deleted(Err(error)) => {
                Action::Toast(Toast::error(format!("Delete failed: {error}")))
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let mut selectors = row![
            pick_list(HistoryKind::ALL, Some(self.kind), Message::KindPicked),
            pick_list(Scope::CONTEXTUAL, Some(self.scope), Message::ScopePicked),
        ]
        .spacing(8);

        match self.scope {
            Scope::Private => {
                selectors = selectors.push(
                    pick_list(
                        self.friends.as_slice(),
                        self.friend.clone(),
                        Message::FriendPicked,
                    )
                    .placeholder("Friend..."),
                );
            }
            Scope::Group | Scope::Global => {
                selectors = selectors.push(
                    pick_list(
                        self.groups.as_slice(),
                        self.group.clone(),
                        Message::GroupPicked,
                    )
                    .placeholder("Group..."),
                );
            }
        }

        selectors = selectors
            .push(text_input("50", &self.limit).on_input(Message::LimitChanged).width(60))
            .push(
                button(icon("refresh"))
                    .on_press_maybe(self.context_id().is_some().then_some(Message::FetchPressed)),
            );

        let body: Element<'_, Message> = match &self.entries {
            Entries::NothingFetched => text("Pick a context and fetch").into(),
            Entries::Loading => text("Loading history...").into(),
            Entries::Error(error) => text(error).style(text::danger).into(),
            Entries::Loaded(entries) if entries.is_empty() => text("No entries").into(),
            Entries::Loaded(entries) => {
                let rows = entries.iter().map(|entry| {
                    let stamp = entry
                        .timestamp
                        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                        .unwrap_or_default();

                    container(
                        column![
                            row![
                                text(&entry.role).size(12),
                                space::horizontal(),
                                text(stamp).size(12),
                            ],
                            text(&entry.content),
                        ]
                        .spacing(4)
                        .padding(8),
                    )
                    .width(Length::Fill)
                    .style(container::bordered_box)
                    .into()
                });

                scrollable(Column::with_children(rows).spacing(6))
                    .height(Length::Fill)
                    .into()
            }
        };

        let delete_bar = row![
            space::horizontal(),
            text("Delete last"),
            text_input("1", &self.delete_count)
                .on_input(Message::DeleteCountChanged)
                .width(60),
            button(icon("delete")).style(button::danger).on_press_maybe(
                (self.context_id().is_some()
                    && self.delete_count.parse::<u32>().is_ok_and(|count| count > 0))
                .then_some(Message::DeletePressed),
            ),
        ]
        .spacing(8);

        let content = column![
            row![text("History").size(22), space::horizontal()],
            selectors,
            body,
            delete_bar,
        ]
        .spacing(12)
        .padding(TAB_PADDING);

        if let Some(confirm) = &self.confirm {
            modal(content, confirm.view().map(Message::ConfirmResolved), None)
        } else {
            content.into()
        }
    }
}
