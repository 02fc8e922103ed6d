use std::sync::Arc;

use iced::{
    Color, Element, Length, Subscription, Task, Theme, application, keyboard,
    widget::{center, container, mouse_area, opaque, stack},
};
use parking_lot::RwLock;
use remora_lib::{ApiClient, Cfg, ClientConfig};
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::{
    components::connect::{self, Connect},
    config::GuiConfig,
    console::Console,
};

pub mod components;
pub mod config;
pub mod console;
pub mod icons;

fn main() -> iced::Result {
    application(App::new, App::update, App::view)
        .theme(App::theme)
        .title(App::title)
        .subscription(App::subscription)
        .run()
}

#[derive(Debug, Clone)]
enum Message {
    Connect(connect::Message),
    Console(console::Message),
}

enum Screen {
    Connect(Connect),
    Console(Box<Console>),
}

struct App {
    cfg: Cfg,
    gui: GuiConfig,
    theme: Theme,
    screen: Screen,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        // Human friendly panicking in release mode
        human_panic::setup_panic!();

        // Logging
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::TRACE)
            .with_env_filter(EnvFilter::from_default_env())
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("setting default subscriber failed");

        let cfg: Cfg = Arc::new(RwLock::new(ClientConfig::load()));
        let gui = GuiConfig::load();
        let theme = gui.theme();

        let (server_url, token) = {
            let config = cfg.read();
            (config.server_url.clone(), config.token.clone())
        };

        // Stored credentials still get verified before the console opens.
        let screen = Screen::Connect(Connect::new(server_url, token));

        (
            Self {
                cfg,
                gui,
                theme,
                screen,
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Connect(message) => {
                let Screen::Connect(connect) = &mut self.screen else {
                    return Task::none();
                };

                match connect.update(message) {
                    connect::Action::None => Task::none(),
                    connect::Action::Run(task) => task.map(Message::Connect),
                    connect::Action::Connected { server_url, token } => {
                        {
                            let mut config = self.cfg.write();
                            config.server_url = server_url;
                            config.token = token;
                            config.save();
                        }

                        self.open_console()
                    }
                }
            }
            Message::Console(message) => {
                let Screen::Console(console) = &mut self.screen else {
                    return Task::none();
                };

                match console.update(message) {
                    console::Action::None => Task::none(),
                    console::Action::Run(task) => task.map(Message::Console),
                    console::Action::Unauthorized => {
                        tracing::warn!("token rejected, dropping to the connect screen");
                        self.cfg.write().clear_token();
                        self.to_connect();
                        Task::none()
                    }
                    console::Action::ThemeChanged(theme) => {
                        self.gui.theme = theme;
                        self.gui.save();
                        self.theme = self.gui.theme();
                        Task::none()
                    }
                    console::Action::Disconnect => {
                        self.cfg.write().clear_token();
                        self.to_connect();
                        Task::none()
                    }
                }
            }
        }
    }

    fn open_console(&mut self) -> Task<Message> {
        let client = {
            let config = self.cfg.read();
            ApiClient::new(&config.server_url, &config.token)
        };

        match client {
            Ok(client) => {
                let (console, task) = Console::new(client, &self.gui);
                self.screen = Screen::Console(Box::new(console));
                task.map(Message::Console)
            }
            Err(error) => {
                // The connect screen validated the URL, so this is unlikely.
                tracing::error!(%error, "could not build the API client");
                self.to_connect();
                Task::none()
            }
        }
    }

    fn to_connect(&mut self) {
        if let Screen::Console(console) = &self.screen {
            console.shutdown();
        }

        let (server_url, token) = {
            let config = self.cfg.read();
            (config.server_url.clone(), config.token.clone())
        };
        self.screen = Screen::Connect(Connect::new(server_url, token));
    }

    pub fn view(&self) -> Element<'_, Message> {
        match &self.screen {
            Screen::Connect(connect) => connect.view().map(Message::Connect),
            Screen::Console(console) => console.view().map(Message::Console),
        }
    }

    /// Escape cancels transient edit overlays inside the console.
    pub fn subscription(&self) -> Subscription<Message> {
        match &self.screen {
            Screen::Connect(_) => Subscription::none(),
            Screen::Console(_) => keyboard::listen().filter_map(|event| match event {
                keyboard::Event::KeyPressed {
                    key: keyboard::Key::Named(keyboard::key::Named::Escape),
                    ..
                } => Some(Message::Console(console::Message::EscapePressed)),
                _ => None,
            }),
        }
    }

    pub fn title(&self) -> String {
        match &self.screen {
            Screen::Connect(_) => "Remora".into(),
            Screen::Console(_) => {
                let config = self.cfg.read();
                format!("Remora - {}", config.server_url)
            }
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme.clone()
    }
}

pub fn modal<'a, Message>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_click_outside: Option<Message>,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let mouse_area = mouse_area(center(opaque(content)).style(|_theme| {
        container::Style {
            background: Some(
                Color {
                    a: 0.8,
                    ..Color::BLACK
                }
                .into(),
            ),
            ..container::Style::default()
        }
    }));

    stack![
        base.into(),
        opaque(if let Some(msg) = on_click_outside {
            mouse_area.on_press(msg)
        } else {
            mouse_area
        })
    ]
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
