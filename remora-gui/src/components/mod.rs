//! View components, one per backend resource.
//!
//! Every component follows the same shape: a `Message` enum, an `Action`
//! enum for talking to the parent where needed, a `State` enum for fetched
//! data, and `update()`/`view()` methods. Fetches run as [`iced::Task`]s
//! and land back as messages.

use remora_lib::Error;

pub mod access_control;
pub mod assignments;
pub mod confirm;
pub mod connect;
pub mod history;
pub mod plugins;
pub mod presets;
pub mod settings;
pub mod toast;
pub mod variables;

pub const TAB_PADDING: u16 = 16;

/// Cloneable error carried inside component messages. 401/403 is kept
/// apart so the app can drop to the connect screen; everything else is
/// already a display string by the time it crosses a message boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    Unauthorized,
    Other(String),
}

impl From<Error> for LoadError {
    fn from(error: Error) -> Self {
        match error {
            Error::Unauthorized => LoadError::Unauthorized,
            other => LoadError::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Unauthorized => write!(f, "the backend rejected the stored token"),
            LoadError::Other(message) => write!(f, "{message}"),
        }
    }
}

pub type LoadResult<T> = Result<T, LoadError>;
