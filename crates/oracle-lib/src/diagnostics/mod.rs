//! Diagnostics collected by the validation pass.
//!
//! The engine never sees schema source text, so diagnostics point at a
//! declaration by qualified name (the *subject*) and optionally the file it
//! came from, instead of at a span.

mod message;


pub use message::{DiagnosticKind, DiagnosticMessage, Severity};

use crate::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Create a diagnostic with the given kind about `subject`.
    ///
    /// Uses the kind's default message. Call `.message()` on the builder to override.
    pub fn report(
        &mut self,
        kind: DiagnosticKind,
        subject: impl Into<String>,
    ) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::with_default_message(kind, subject),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|d| d.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.messages.iter().any(|d| d.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_warning()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    /// Returns diagnostics with consequence errors suppressed.
    ///
    /// A subject with broken inheritance hides the consequence errors reported
    /// against that same subject.
    pub fn filtered(&self) -> Vec<DiagnosticMessage> {
        self.messages
            .iter()
            .filter(|m| {
                !self
                    .messages
                    .iter()
                    .any(|other| other.subject == m.subject && other.kind.suppresses(&m.kind))
            })
            .cloned()
            .collect()
    }

    pub fn render(&self) -> String {
        render_messages(&self.messages)
    }

    pub fn render_filtered(&self) -> String {
        render_messages(&self.filtered())
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }

    /// Fail with [`Error::ValidationFailed`] if any diagnostic is an error.
    ///
    /// Warnings alone pass through.
    pub fn into_result(self) -> Result<Diagnostics> {
        if self.has_errors() {
            return Err(Error::ValidationFailed(self));
        }
        Ok(self)
    }
}

fn render_messages(messages: &[DiagnosticMessage]) -> String {
    messages
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}

impl<'a> DiagnosticBuilder<'a> {
    /// Provide custom detail for this diagnostic, rendered using the kind's template.
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        let detail = msg.into();
        self.message.message = self.message.kind.message(Some(&detail));
        self
    }

    /// Schema file the subject was declared in.
    pub fn origin(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        if !path.is_empty() {
            self.message.origin = Some(path);
        }
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.message.hints.push(hint.into());
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.message.severity = severity;
        self
    }

    pub fn emit(mut self) {
        if let Some(hint) = self.message.kind.default_hint() {
            self.message.hints.push(hint.to_string());
        }
        self.diagnostics.messages.push(self.message);
    }
}
