use serde::Serialize;
use tracing::{debug, warn};

/// Append-only log and error lines produced while building and solving a
/// request. Owned by the caller and passed down explicitly.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Diagnostics {
    log: Vec<String>,
    errors: Vec<String>,
}

impl Diagnostics {
    pub fn log(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("{message}");
        self.log.push(message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        self.errors.push(message);
    }

    pub fn log_lines(&self) -> &[String] {
        &self.log
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_text(&self) -> String {
        self.errors.join("\n")
    }
}
