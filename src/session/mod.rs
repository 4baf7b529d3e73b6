//! Per-user session: the uploaded plan, the latest analysis and the chat log.
//!
//! The session moves through three phases. Uploading a file always lands in
//! `Uploaded`; analyzing re-runs the whole pipeline and lands in `Analyzed`.
//! Chat submissions can happen in any phase and never change it.

pub mod chat;

pub use chat::{ChatMessage, Role};

use anyhow::{anyhow, Result};

use crate::analysis::{analyze_plan, Analysis};
use crate::config::AppConfig;
use crate::ocr::TextRecognizer;
use crate::upload::UploadedFile;

#[derive(Debug, Default)]
pub enum SessionPhase {
    #[default]
    NoFile,
    Uploaded(UploadedFile),
    Analyzed {
        file: UploadedFile,
        analysis: Analysis,
    },
}

/// What an analyze click produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Detected { count: usize },
    NothingDetected,
}

/// Session state. The message log only ever grows.
#[derive(Debug, Default)]
pub struct Session {
    messages: Vec<ChatMessage>,
    phase: SessionPhase,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn current_file(&self) -> Option<&UploadedFile> {
        match &self.phase {
            SessionPhase::NoFile => None,
            SessionPhase::Uploaded(file) | SessionPhase::Analyzed { file, .. } => Some(file),
        }
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        match &self.phase {
            SessionPhase::Analyzed { analysis, .. } => Some(analysis),
            _ => None,
        }
    }

    /// Replaces the current plan. Any previous analysis is dropped.
    pub fn upload(&mut self, file: UploadedFile) {
        crate::log(&format!("Session: uploaded {}", file.name));
        self.phase = SessionPhase::Uploaded(file);
    }

    pub fn remove_file(&mut self) {
        self.phase = SessionPhase::NoFile;
    }

    /// Runs the analysis pipeline on the current plan.
    ///
    /// On failure the session goes back to `Uploaded` with no results.
    pub fn analyze(
        &mut self,
        config: &AppConfig,
        recognizer: &dyn TextRecognizer,
    ) -> Result<AnalysisOutcome> {
        let file = match std::mem::take(&mut self.phase) {
            SessionPhase::NoFile => return Err(anyhow!("No plan uploaded")),
            SessionPhase::Uploaded(file) | SessionPhase::Analyzed { file, .. } => file,
        };

        let analysis = match analyze_plan(&file, config, recognizer) {
            Ok(analysis) => analysis,
            Err(e) => {
                self.phase = SessionPhase::Uploaded(file);
                return Err(e);
            }
        };

        let count = analysis.points.len();
        let outcome = if count == 0 {
            AnalysisOutcome::NothingDetected
        } else {
            self.messages
                .push(ChatMessage::assistant(chat::analysis_summary(count)));
            AnalysisOutcome::Detected { count }
        };

        self.phase = SessionPhase::Analyzed { file, analysis };
        Ok(outcome)
    }

    /// Appends the user's message and the canned assistant reply.
    ///
    /// Returns the reply, or None for blank input.
    pub fn submit_chat(&mut self, text: &str) -> Option<&ChatMessage> {
        if text.trim().is_empty() {
            return None;
        }

        let reply = chat::canned_reply(self.current_file().is_some());
        self.messages.push(ChatMessage::user(text));
        self.messages.push(ChatMessage::assistant(reply));
        self.messages.last()
    }

    /// Tears the session down and starts a fresh one.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
