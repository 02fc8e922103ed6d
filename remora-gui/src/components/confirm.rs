use iced::{
    Element,
    widget::{button, column, container, row, space, text},
};

/// Result of a confirm dialog. `Denied` only appears for dialogs that
/// offer a third choice (e.g. export: strip / keep / cancel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Confirmed,
    Denied,
    Cancelled,
}

/// A modal confirm prompt. Views keep one of these alongside a tag naming
/// the pending operation and map [`Outcome`] into their own messages.
#[derive(Debug, Clone)]
pub struct Confirm {
    title: String,
    body: String,
    confirm_label: String,
    deny_label: Option<String>,
}

impl Confirm {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            confirm_label: "Confirm".into(),
            deny_label: None,
        }
    }

    /// Relabel the confirm button and add a middle "deny" choice.
    pub fn with_choices(
        mut self,
        confirm_label: impl Into<String>,
        deny_label: impl Into<String>,
    ) -> Self {
        self.confirm_label = confirm_label.into();
        self.deny_label = Some(deny_label.into());
        self
    }

    pub fn view(&self) -> Element<'_, Outcome> {
        let mut buttons = row![
            space::horizontal(),
            button(text("Cancel"))
                .style(button::subtle)
                .on_press(Outcome::Cancelled),
        ]
        .spacing(8);

        if let Some(deny_label) = &self.deny_label {
            buttons = buttons.push(button(text(deny_label)).on_press(Outcome::Denied));
        }

        buttons = buttons.push(
            button(text(&self.confirm_label))
                .style(button::primary)
                .on_press(Outcome::Confirmed),
        );

        container(
            column![text(&self.title).size(18), text(&self.body), buttons].spacing(16),
        )
        .padding(20)
        .width(420)
        .style(container::rounded_box)
        .into()
    }
}
