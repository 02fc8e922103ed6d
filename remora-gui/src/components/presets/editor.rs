use iced::{
    Element, Length,
    widget::{
        Column, button, checkbox, column, container, mouse_area, pick_list, row, scrollable,
        space, text, text_input,
    },
};
use remora_lib::{
    ItemEditor,
    model::{PlaceholderKind, PresetItem, Role},
};

use crate::{components::presets::item_dialog::{self, ItemDialog}, icons::icon, modal};

#[derive(Debug, Clone)]
pub enum Message {
    // Drag and drop reordering
    DragStarted(usize),
    DragOver(usize),
    DragDropped,
    // Row controls
    EnabledToggled(usize, bool),
    DeletePressed(usize),
    RenamePressed(usize),
    RenameDraftChanged(String),
    RenameCommitted,
    RenameCancelled,
    EditPressed(usize),
    // Additions
    AddPlaceholderPressed(PlaceholderKind),
    AddRolePicked(Role),
    AddContentChanged(String),
    AddMessagePressed,
    // Child
    ItemDialog(item_dialog::Message),
}

/// The content list editor embedded in the preset form.
///
/// Items carry no identity beyond their index, so the whole list re-renders
/// after every mutation; all index-bearing UI state (drag, rename, dialog)
/// is cleared alongside.
pub struct Editor {
    buffer: ItemEditor,
    drag: Option<Drag>,
    rename: Option<Rename>,
    dialog: Option<ItemDialog>,
    add_role: Role,
    add_content: String,
}

struct Drag {
    from: usize,
    over: Option<usize>,
}

struct Rename {
    index: usize,
    draft: String,
}

impl Editor {
    pub fn new(items: Vec<PresetItem>) -> Self {
        Self {
            buffer: ItemEditor::new(items),
            drag: None,
            rename: None,
            dialog: None,
            add_role: Role::System,
            add_content: String::new(),
        }
    }

    pub fn items(&self) -> &[PresetItem] {
        self.buffer.items()
    }

    /// Drop the rename overlay and any in-progress drag without applying
    /// either. Bound to the Escape key by the app shell.
    pub fn escape(&mut self) {
        self.rename = None;
        self.drag = None;
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::DragStarted(index) => {
                self.rename = None;
                self.drag = Some(Drag {
                    from: index,
                    over: None,
                });
            }
            Message::DragOver(index) => {
                if let Some(drag) = &mut self.drag {
                    drag.over = Some(index);
                }
            }
            Message::DragDropped => {
                if let Some(Drag {
                    from,
                    over: Some(to),
                }) = self.drag.take()
                {
                    self.buffer.reorder(from, to);
                }
                self.drag = None;
            }
            Message::EnabledToggled(index, enabled) => {
                self.buffer.set_enabled(index, enabled);
            }
            Message::DeletePressed(index) => {
                self.buffer.remove(index);
                self.rename = None;
                self.drag = None;
            }
            Message::RenamePressed(index) => {
                let draft = self
                    .buffer
                    .get(index)
                    .and_then(|item| item.custom_name.clone())
                    .unwrap_or_default();
                self.rename = Some(Rename { index, draft });
            }
            Message::RenameDraftChanged(draft) => {
                if let Some(rename) = &mut self.rename {
                    rename.draft = draft;
                }
            }
            Message::RenameCommitted => {
                if let Some(Rename { index, draft }) = self.rename.take() {
                    self.buffer.rename(index, &draft);
                }
            }
            Message::RenameCancelled => {
                self.rename = None;
            }
            Message::EditPressed(index) => {
                if let Some(item) = self.buffer.get(index) {
                    self.dialog = Some(ItemDialog::load(index, item));
                }
            }
            Message::AddPlaceholderPressed(kind) => {
                self.buffer.insert_placeholder(kind);
            }
            Message::AddRolePicked(role) => {
                self.add_role = role;
            }
            Message::AddContentChanged(content) => {
                self.add_content = content;
            }
            Message::AddMessagePressed => {
                let content = self.add_content.trim();
                if !content.is_empty() {
                    self.buffer
                        .insert_message(self.add_role, content.to_string());
                    self.add_content.clear();
                }
            }
            Message::ItemDialog(message) => {
                if let Some(dialog) = &mut self.dialog {
                    match dialog.update(message) {
                        item_dialog::Action::None => {}
                        item_dialog::Action::Cancel => self.dialog = None,
                        item_dialog::Action::Apply { index, body } => {
                            self.buffer.replace_body(index, body);
                            self.dialog = None;
                        }
                    }
                }
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let rows = self
            .buffer
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| self.item_row(index, item));

        let list: Element<'_, Message> = if self.buffer.is_empty() {
            text("No items yet").into()
        } else {
            scrollable(Column::with_children(rows).spacing(4))
                .height(Length::Fixed(260.0))
                .into()
        };

        let placeholder_bar = row![
            text("Add placeholder:"),
            button(text("Chat history"))
                .style(button::subtle)
                .on_press(Message::AddPlaceholderPressed(PlaceholderKind::ChatHistory)),
            button(text("Message history"))
                .style(button::subtle)
                .on_press(Message::AddPlaceholderPressed(PlaceholderKind::MessageHistory)),
            button(text("User input"))
                .style(button::subtle)
                .on_press(Message::AddPlaceholderPressed(PlaceholderKind::UserInput)),
        ]
        .spacing(8);

        let message_bar = row![
            pick_list(Role::ALL, Some(self.add_role), Message::AddRolePicked),
            text_input("Message content...", &self.add_content)
                .on_input(Message::AddContentChanged)
                .on_submit(Message::AddMessagePressed),
            button(icon("plus")).on_press_maybe(
                (!self.add_content.trim().is_empty()).then_some(Message::AddMessagePressed)
            ),
        ]
        .spacing(8);

        let content = column![list, placeholder_bar, message_bar].spacing(12);

        if let Some(dialog) = &self.dialog {
            modal(content, dialog.view().map(Message::ItemDialog), None)
        } else {
            content.into()
        }
    }

    fn item_row<'a>(&'a self, index: usize, item: &'a PresetItem) -> Element<'a, Message> {
        let label: Element<'_, Message> = match &self.rename {
            Some(rename) if rename.index == index => row![
                text_input("Custom name...", &rename.draft)
                    .on_input(Message::RenameDraftChanged)
                    .on_submit(Message::RenameCommitted),
                button(icon("check")).on_press(Message::RenameCommitted),
                button(icon("close"))
                    .style(button::subtle)
                    .on_press(Message::RenameCancelled),
            ]
            .spacing(4)
            .into(),
            _ => text(item.label()).into(),
        };

        let is_drop_target = matches!(&self.drag, Some(drag) if drag.over == Some(index));

        let content = row![
            icon("drag"),
            checkbox(item.enabled)
                .on_toggle(move |enabled| Message::EnabledToggled(index, enabled)),
            label,
            space::horizontal(),
            button(icon("edit"))
                .style(button::subtle)
                .on_press(Message::RenamePressed(index)),
            button(icon("settings"))
                .style(button::subtle)
                .on_press(Message::EditPressed(index)),
            button(icon("delete"))
                .style(button::subtle)
                .on_press(Message::DeletePressed(index)),
        ]
        .spacing(8)
        .padding(8);

        mouse_area(
            container(content)
                .width(Length::Fill)
                .style(move |theme: &iced::Theme| {
                    if is_drop_target {
                        let palette = theme.extended_palette();
                        container::Style {
                            border: iced::Border {
                                color: palette.primary.base.color,
                                width: 2.0,
                                radius: 4.0.into(),
                            },
                            ..container::Style::default()
                        }
                    } else {
                        container::bordered_box(theme)
                    }
                }),
        )
        .on_press(Message::DragStarted(index))
        .on_enter(Message::DragOver(index))
        .on_release(Message::DragDropped)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> Editor {
        Editor::new(vec![PresetItem::message(Role::System, "hello")])
    }

    #[test]
    fn escape_cancels_an_in_progress_rename() {
        let mut editor = editor();

        editor.update(Message::RenamePressed(0));
        editor.update(Message::RenameDraftChanged("greeting".into()));
        editor.escape();
        // A commit after the cancel must not apply the abandoned draft.
        editor.update(Message::RenameCommitted);

        assert_eq!(editor.items().first().unwrap().custom_name, None);
    }

    #[test]
    fn enter_commits_the_rename_draft() {
        let mut editor = editor();

        editor.update(Message::RenamePressed(0));
        editor.update(Message::RenameDraftChanged("greeting".into()));
        editor.update(Message::RenameCommitted);

        assert_eq!(
            editor.items().first().unwrap().custom_name.as_deref(),
            Some("greeting")
        );
    }

    #[test]
    fn escape_abandons_a_drag() {
        let mut editor = Editor::new(vec![
            PresetItem::message(Role::System, "first"),
            PresetItem::message(Role::User, "second"),
        ]);

        editor.update(Message::DragStarted(0));
        editor.update(Message::DragOver(1));
        editor.escape();
        editor.update(Message::DragDropped);

        let labels: Vec<String> = editor.items().iter().map(PresetItem::label).collect();
        assert_eq!(labels, vec!["system: first", "user: second"]);
    }
}
