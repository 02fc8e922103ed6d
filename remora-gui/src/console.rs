use iced::{
    Element,
    Length::{self, Fill},
    Task,
    widget::{button, column, container, row, stack, text},
};
use remora_lib::{ApiClient, PresetKind, PluginEvent, ReconnectPolicy, events::plugin_events};

use crate::{
    components::{
        access_control::{self, AccessControl},
        assignments::{self, Assignments},
        history::{self, History},
        plugins::{self, Plugins},
        presets::{self, Presets},
        settings::{self, Settings},
        toast::{self, Toast, Toasts},
        variables::{self, Variables},
    },
    config::{GuiConfig, theme::Theme},
};

#[derive(Debug, Clone)]
pub enum Message {
    TabPicked(Tab),
    Presets(presets::Message),
    DisguisePresets(presets::Message),
    Assignments(assignments::Message),
    DisguiseAssignments(assignments::Message),
    Plugins(plugins::Message),
    AccessControl(access_control::Message),
    Variables(variables::Message),
    History(history::Message),
    Settings(settings::Message),
    Toast(toast::Message),
    PluginEvent(PluginEvent),
    EscapePressed,
}

/// What the console needs the app shell to do.
pub enum Action {
    None,
    Run(Task<Message>),
    /// The backend rejected the token mid-session.
    Unauthorized,
    ThemeChanged(Theme),
    Disconnect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Presets,
    DisguisePresets,
    Assignments,
    DisguiseAssignments,
    Plugins,
    AccessControl,
    Variables,
    History,
    Settings,
}

impl Tab {
    const ALL: [Tab; 9] = [
        Tab::Presets,
        Tab::DisguisePresets,
        Tab::Assignments,
        Tab::DisguiseAssignments,
        Tab::Plugins,
        Tab::AccessControl,
        Tab::Variables,
        Tab::History,
        Tab::Settings,
    ];

    fn title(self) -> &'static str {
        match self {
            Tab::Presets => "Presets",
            Tab::DisguisePresets => "Disguise",
            Tab::Assignments => "Assignments",
            Tab::DisguiseAssignments => "Disguise assignments",
            Tab::Plugins => "Plugins",
            Tab::AccessControl => "Access",
            Tab::Variables => "Variables",
            Tab::History => "History",
            Tab::Settings => "Settings",
        }
    }
}

/// The main screen: a tab per backend resource plus the toast overlay and
/// the plugin event subscription.
pub struct Console {
    tab: Tab,
    presets: Presets,
    disguise_presets: Presets,
    assignments: Assignments,
    disguise_assignments: Assignments,
    plugins: Plugins,
    access_control: AccessControl,
    variables: Variables,
    history: History,
    settings: Settings,
    toasts: Toasts,
    events: iced::task::Handle,
    events_seen: bool,
}

impl Console {
    pub fn new(client: ApiClient, gui: &GuiConfig) -> (Self, Task<Message>) {
        let (presets, presets_task) = Presets::new(client.clone(), PresetKind::Normal);
        let (disguise_presets, disguise_presets_task) =
            Presets::new(client.clone(), PresetKind::Disguise);
        let (assignments, assignments_task) =
            Assignments::new(client.clone(), PresetKind::Normal);
        let (disguise_assignments, disguise_assignments_task) =
            Assignments::new(client.clone(), PresetKind::Disguise);
        let (plugins, plugins_task) = Plugins::new(client.clone());
        let (access_control, access_control_task) = AccessControl::new(client.clone());
        let (variables, variables_task) = Variables::new(client.clone());
        let (history, history_task) = History::new(client.clone());
        let (settings, settings_task) = Settings::new(client.clone(), gui);

        let (events_task, events) =
            Task::run(plugin_events(client, ReconnectPolicy::default()), |event| event)
                .abortable();

        let console = Self {
            tab: Tab::Presets,
            presets,
            disguise_presets,
            assignments,
            disguise_assignments,
            plugins,
            access_control,
            variables,
            history,
            settings,
            toasts: Toasts::default(),
            events,
            events_seen: false,
        };

        let task = Task::batch([
            presets_task.map(Message::Presets),
            disguise_presets_task.map(Message::DisguisePresets),
            assignments_task.map(Message::Assignments),
            disguise_assignments_task.map(Message::DisguiseAssignments),
            plugins_task.map(Message::Plugins),
            access_control_task.map(Message::AccessControl),
            variables_task.map(Message::Variables),
            history_task.map(Message::History),
            settings_task.map(Message::Settings),
            events_task.map(Message::PluginEvent),
        ]);

        (console, task)
    }

    /// Stop the plugin event subscription. Called by the app when the
    /// console is torn down; the stream would otherwise reconnect forever.
    pub fn shutdown(&self) {
        self.events.abort();
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::TabPicked(tab) => {
                self.tab = tab;
                Action::None
            }
            Message::Presets(message) => {
                let action = self.presets.update(message);
                self.on_presets(action, PresetKind::Normal, Message::Presets)
            }
            Message::DisguisePresets(message) => {
                let action = self.disguise_presets.update(message);
                self.on_presets(action, PresetKind::Disguise, Message::DisguisePresets)
            }
            Message::Assignments(message) => {
                let action = self.assignments.update(message);
                self.on_assignments(action, Message::Assignments)
            }
            Message::DisguiseAssignments(message) => {
                let action = self.disguise_assignments.update(message);
                self.on_assignments(action, Message::DisguiseAssignments)
            }
            Message::Plugins(message) => match self.plugins.update(message) {
                plugins::Action::None => Action::None,
                plugins::Action::Run(task) => Action::Run(task.map(Message::Plugins)),
                plugins::Action::Toast(toast) => self.toast(toast),
                plugins::Action::Unauthorized => Action::Unauthorized,
            },
            Message::AccessControl(message) => match self.access_control.update(message) {
                access_control::Action::None => Action::None,
                access_control::Action::Run(task) => {
                    Action::Run(task.map(Message::AccessControl))
                }
                access_control::Action::Toast(toast) => self.toast(toast),
                access_control::Action::Unauthorized => Action::Unauthorized,
            },
            Message::Variables(message) => match self.variables.update(message) {
                variables::Action::None => Action::None,
                variables::Action::Run(task) => Action::Run(task.map(Message::Variables)),
                variables::Action::Toast(toast) => self.toast(toast),
                variables::Action::Unauthorized => Action::Unauthorized,
            },
            Message::History(message) => match self.history.update(message) {
                history::Action::None => Action::None,
                history::Action::Run(task) => Action::Run(task.map(Message::History)),
                history::Action::Toast(toast) => self.toast(toast),
                history::Action::Unauthorized => Action::Unauthorized,
            },
            Message::Settings(message) => match self.settings.update(message) {
                settings::Action::None => Action::None,
                settings::Action::Run(task) => Action::Run(task.map(Message::Settings)),
                settings::Action::Toast(toast) => self.toast(toast),
                settings::Action::Unauthorized => Action::Unauthorized,
                settings::Action::ThemeChanged(theme) => Action::ThemeChanged(theme),
                settings::Action::Disconnect => Action::Disconnect,
            },
            Message::Toast(message) => {
                self.toasts.update(message);
                Action::None
            }
            Message::PluginEvent(event) => self.on_plugin_event(event),
            Message::EscapePressed => {
                match self.tab {
                    Tab::Presets => self.presets.escape(),
                    Tab::DisguisePresets => self.disguise_presets.escape(),
                    _ => {}
                }
                Action::None
            }
        }
    }

    fn on_presets(
        &mut self,
        action: presets::Action,
        kind: PresetKind,
        wrap: fn(presets::Message) -> Message,
    ) -> Action {
        match action {
            presets::Action::None => Action::None,
            presets::Action::Run(task) => Action::Run(task.map(wrap)),
            presets::Action::Toast(toast) => self.toast(toast),
            presets::Action::Unauthorized => Action::Unauthorized,
            presets::Action::PresetDeleted => {
                // The delete may have cascaded into the assignment table.
                let tasks = match kind {
                    PresetKind::Normal => Task::batch([
                        self.presets.refresh().map(wrap),
                        self.assignments.refresh().map(Message::Assignments),
                    ]),
                    PresetKind::Disguise => Task::batch([
                        self.disguise_presets.refresh().map(wrap),
                        self.disguise_assignments
                            .refresh()
                            .map(Message::DisguiseAssignments),
                    ]),
                };

                Action::Run(tasks)
            }
        }
    }

    fn on_assignments(
        &mut self,
        action: assignments::Action,
        wrap: fn(assignments::Message) -> Message,
    ) -> Action {
        match action {
            assignments::Action::None => Action::None,
            assignments::Action::Run(task) => Action::Run(task.map(wrap)),
            assignments::Action::Toast(toast) => self.toast(toast),
            assignments::Action::Unauthorized => Action::Unauthorized,
        }
    }

    fn on_plugin_event(&mut self, event: PluginEvent) -> Action {
        match event {
            PluginEvent::Connected => {
                tracing::debug!("plugin event stream connected");
                let reconnected = self.events_seen;
                self.events_seen = true;

                if reconnected {
                    self.toast(Toast::info("Plugin event stream reconnected"))
                } else {
                    Action::None
                }
            }
            PluginEvent::ConfigUpdated { name } => {
                tracing::info!(plugin = %name, "plugin config updated remotely");
                let refresh = self.plugins.config_updated(&name).map(Message::Plugins);
                let toast = self.toast(Toast::info(format!("{name} config updated")));

                match toast {
                    Action::Run(toast_task) => Action::Run(Task::batch([refresh, toast_task])),
                    _ => Action::Run(refresh),
                }
            }
            PluginEvent::Disconnected => {
                tracing::warn!("plugin event stream lost");
                self.toast(Toast::warning("Plugin event stream lost, reconnecting"))
            }
        }
    }

    fn toast(&mut self, toast: Toast) -> Action {
        Action::Run(self.toasts.push(toast).map(Message::Toast))
    }

    pub fn view(&self) -> Element<'_, Message> {
        let sidebar = Tab::ALL.iter().fold(
            column![].spacing(4).padding(8).width(Length::Fixed(190.0)),
            |sidebar, &tab| {
                let style = if tab == self.tab {
                    button::primary
                } else {
                    button::subtle
                };
                sidebar.push(
                    button(text(tab.title()))
                        .style(style)
                        .width(Fill)
                        .on_press(Message::TabPicked(tab)),
                )
            },
        );

        let active: Element<'_, Message> = match self.tab {
            Tab::Presets => self.presets.view().map(Message::Presets),
            Tab::DisguisePresets => self.disguise_presets.view().map(Message::DisguisePresets),
            Tab::Assignments => self.assignments.view().map(Message::Assignments),
            Tab::DisguiseAssignments => self
                .disguise_assignments
                .view()
                .map(Message::DisguiseAssignments),
            Tab::Plugins => self.plugins.view().map(Message::Plugins),
            Tab::AccessControl => self.access_control.view().map(Message::AccessControl),
            Tab::Variables => self.variables.view().map(Message::Variables),
            Tab::History => self.history.view().map(Message::History),
            Tab::Settings => self.settings.view().map(Message::Settings),
        };

        let content = row![
            container(sidebar).style(container::bordered_box).height(Fill),
            container(active).width(Fill).height(Fill),
        ];

        if self.toasts.is_empty() {
            content.into()
        } else {
            stack![
                content,
                container(self.toasts.view().map(Message::Toast))
                    .align_right(Fill)
                    .padding(12),
            ]
            .width(Fill)
            .height(Fill)
            .into()
        }
    }
}
