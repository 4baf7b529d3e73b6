//! GUI application state management.
//!
//! Wraps the session with the text-field buffers and the status banner.

use crate::session::Session;

/// Feedback line shown under the analyze button.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum StatusBanner {
    /// Nothing to report
    #[default]
    Idle,
    /// Neutral notice (file loaded, script saved)
    Info(String),
    /// Analysis found points
    Success(String),
    /// Analysis found nothing
    Warning(String),
    /// Something failed
    Error(String),
}

impl StatusBanner {
    /// Get display text for current status.
    pub fn status_text(&self) -> String {
        match self {
            Self::Idle => String::new(),
            Self::Info(msg) | Self::Success(msg) | Self::Warning(msg) => msg.clone(),
            Self::Error(msg) => format!("Error: {}", msg),
        }
    }
}

/// GUI application state.
#[derive(Debug, Default)]
pub struct GuiState {
    /// Session holding the plan, the analysis and the chat log.
    pub session: Session,
    /// Path typed into the upload field.
    pub path_input: String,
    /// Text typed into the chat field.
    pub chat_input: String,
    /// Latest feedback for the user.
    pub status: StatusBanner,
}
