pub mod albums;
pub mod arrange;
pub mod files;
pub mod init;
pub mod migrate;
pub mod numbering;
pub mod projects;
pub mod sortownia;

use crate::organizer::audit;
use crate::organizer::paths::OrganizerPaths;
use crate::organizer::warnings;
use serde::Serialize;

/// Best-effort audit trail: a failed log write downgrades to a warning, it
/// never fails the operation that succeeded.
pub fn audit_ok(paths: &OrganizerPaths, operation: &str, message: &str) {
    if let Err(err) = audit::append_event(paths, operation, "ok", message) {
        warnings::emit("AUDIT_WRITE_FAILED", operation, message, &err.to_string());
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommandReport {
    pub command: String,
    pub ok: bool,
    pub details: Vec<String>,
    pub issues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandReport {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ok: true,
            details: Vec::new(),
            issues: Vec::new(),
            data: None,
        }
    }

    pub fn detail(&mut self, text: impl Into<String>) {
        self.details.push(text.into());
    }

    pub fn issue(&mut self, text: impl Into<String>) {
        self.ok = false;
        self.issues.push(text.into());
    }

    /// Structured payload for `--json` consumers; the plain renderer only
    /// prints the detail lines.
    pub fn data(&mut self, value: impl Serialize) {
        if let Ok(value) = serde_json::to_value(value) {
            self.data = Some(value);
        }
    }
}
