/// Diagnostic kinds ordered by priority (highest priority first).
///
/// Broken inheritance makes every later check on the same declaration
/// unreliable, so those kinds come first and suppress consequence errors
/// reported against the same subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Inheritance graph is broken; unified fields cannot be trusted
    CircularInheritance,
    UnknownParent,
    ParentNotStruct,

    // Dangling or malformed references
    UndefinedReference,
    UndefinedTypeParam,
    GenericArityMismatch,

    // Often consequences of a broken parent
    UnknownOmittedField,
}

impl DiagnosticKind {
    /// Default severity for this kind. Can be overridden by policy.
    pub fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether this kind suppresses `other` when both target the same subject.
    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self.is_inheritance_error() && other.is_consequence_error()
    }

    pub fn is_inheritance_error(&self) -> bool {
        matches!(
            self,
            Self::CircularInheritance | Self::UnknownParent | Self::ParentNotStruct
        )
    }

    pub fn is_consequence_error(&self) -> bool {
        matches!(self, Self::UnknownOmittedField)
    }

    /// Default hint for this kind, automatically included in diagnostics.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::UndefinedReference | Self::UnknownParent => {
                Some("check the spelling or import the declaring schema")
            }
            Self::CircularInheritance => Some("remove one `extends` edge from the cycle"),
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::CircularInheritance => "circular inheritance",
            Self::UnknownParent => "unknown parent type",
            Self::ParentNotStruct => "parent is not a struct",
            Self::UndefinedReference => "undefined reference",
            Self::UndefinedTypeParam => "undefined type parameter",
            Self::GenericArityMismatch => "wrong number of type arguments",
            Self::UnknownOmittedField => "omitted field is not inherited",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::CircularInheritance => "`{}` inherits from itself".to_string(),
            Self::UnknownParent => "parent `{}` is not defined".to_string(),
            Self::ParentNotStruct => "parent `{}` is not a struct".to_string(),
            Self::UndefinedReference => "`{}` is not defined".to_string(),
            Self::UndefinedTypeParam => "type parameter `{}` is not declared".to_string(),
            Self::UnknownOmittedField => {
                "omitted field `{}` is not provided by any parent".to_string()
            }
            Self::GenericArityMismatch => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) severity: Severity,
    /// Qualified name of the declaration the diagnostic is about.
    pub(crate) subject: String,
    pub(crate) message: String,
    /// Schema file the subject was declared in, when known.
    pub(crate) origin: Option<String>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(
        kind: DiagnosticKind,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            subject: subject.into(),
            message: message.into(),
            origin: None,
            hints: Vec::new(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, subject: impl Into<String>) -> Self {
        Self::new(kind, subject, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub(crate) fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub(crate) fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        write!(f, "\n  --> {}", self.subject)?;
        if let Some(origin) = &self.origin {
            write!(f, " ({origin})")?;
        }
        for hint in &self.hints {
            write!(f, "\n  help: {hint}")?;
        }
        Ok(())
    }
}
