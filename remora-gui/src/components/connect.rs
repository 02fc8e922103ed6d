use iced::{
    Element, Length, Task,
    widget::{button, column, container, row, text, text_input},
};
use remora_lib::ApiClient;

use crate::components::{LoadError, LoadResult};

#[derive(Debug, Clone)]
pub enum Message {
    ServerUrlChanged(String),
    TokenChanged(String),
    ConnectPressed,
    Checked(LoadResult<()>),
}

pub enum Action {
    None,
    Run(Task<Message>),
    /// Credentials verified; the app persists them and opens the console.
    Connected {
        server_url: String,
        token: String,
    },
}

/// Login screen: asks for the backend address and the bearer token, and
/// verifies both against `/api/auth/status` before entering the console.
pub struct Connect {
    server_url: String,
    token: String,
    checking: bool,
    error: Option<String>,
}

impl Connect {
    pub fn new(server_url: String, token: String) -> Self {
        Self {
            server_url,
            token,
            checking: false,
            error: None,
        }
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::ServerUrlChanged(value) => {
                self.server_url = value;
                Action::None
            }
            Message::TokenChanged(value) => {
                self.token = value;
                Action::None
            }
            Message::ConnectPressed => {
                let client = match ApiClient::new(&self.server_url, &self.token) {
                    Ok(client) => client,
                    Err(error) => {
                        self.error = Some(error.to_string());
                        return Action::None;
                    }
                };

                self.checking = true;
                self.error = None;

                Action::Run(Task::perform(
                    async move { client.auth_status().await.map_err(LoadError::from) },
                    Message::Checked,
                ))
            }
            Message::Checked(result) => {
                self.checking = false;
                match result {
                    Ok(()) => Action::Connected {
                        server_url: self.server_url.clone(),
                        token: self.token.clone(),
                    },
                    Err(LoadError::Unauthorized) => {
                        self.error = Some("The backend rejected this token".into());
                        Action::None
                    }
                    Err(LoadError::Other(message)) => {
                        self.error = Some(message);
                        Action::None
                    }
                }
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let mut form = column![
            text("Connect to backend").size(24),
            row![
                text("Server:").width(80),
                text_input("http://127.0.0.1:3000", &self.server_url)
                    .on_input(Message::ServerUrlChanged),
            ]
            .spacing(8),
            row![
                text("Token:").width(80),
                text_input("...", &self.token)
                    .secure(true)
                    .on_input(Message::TokenChanged),
            ]
            .spacing(8),
        ]
        .spacing(12)
        .width(Length::Fixed(440.0));

        if let Some(error) = &self.error {
            form = form.push(text(error).style(text::danger));
        }

        let label = if self.checking {
            "Connecting..."
        } else {
            "Connect"
        };
        form = form.push(
            button(text(label))
                .style(button::primary)
                .on_press_maybe((self.validate() && !self.checking).then_some(Message::ConnectPressed)),
        );

        container(form).center(Length::Fill).into()
    }

    fn validate(&self) -> bool {
        !self.server_url.is_empty() && !self.token.is_empty()
    }
}
