//! A single reported problem: code, message, located spans and fix-its.
//!
//! Pack diagnostics usually point at one ellipsis or name and list the packs
//! involved as secondary spans, so [`Diagnostic`] keeps its labels in the
//! order they were attached.

use pack_ir::Span;
use std::fmt;

use crate::ErrorCode;

/// Errors stop the construct being built; warnings do not.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a fix-it can be applied without a human looking at it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Applicability {
    /// The edit only adds syntax; meaning is unchanged.
    MachineApplicable,
    /// The edit is a guess, such as a typo correction.
    MaybeIncorrect,
}

/// One edit of a fix-it. An empty span inserts.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Substitution {
    pub span: Span,
    pub snippet: String,
}

impl Substitution {
    pub fn new(span: Span, snippet: impl Into<String>) -> Self {
        Substitution {
            span,
            snippet: snippet.into(),
        }
    }
}

/// A fix-it: the edits that resolve a diagnostic, applied together.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Suggestion {
    pub message: String,
    pub substitutions: Vec<Substitution>,
    pub applicability: Applicability,
}

impl Suggestion {
    fn single(
        message: impl Into<String>,
        applicability: Applicability,
        span: Span,
        snippet: impl Into<String>,
    ) -> Self {
        Suggestion {
            message: message.into(),
            substitutions: vec![Substitution::new(span, snippet)],
            applicability,
        }
    }

    /// Purely syntactic fix, like parenthesizing a fold operand.
    pub fn machine_applicable(
        message: impl Into<String>,
        span: Span,
        snippet: impl Into<String>,
    ) -> Self {
        Self::single(message, Applicability::MachineApplicable, span, snippet)
    }

    /// Replacement that picks a different name than the one written.
    pub fn maybe_incorrect(
        message: impl Into<String>,
        span: Span,
        snippet: impl Into<String>,
    ) -> Self {
        Self::single(message, Applicability::MaybeIncorrect, span, snippet)
    }

    #[must_use]
    pub fn with_substitution(mut self, span: Span, snippet: impl Into<String>) -> Self {
        self.substitutions.push(Substitution::new(span, snippet));
        self
    }
}

/// A span plus what it shows. The primary label marks where the problem is.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    pub is_primary: bool,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: false,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
    pub suggestions: Vec<Suggestion>,
}

impl Diagnostic {
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Self::with_severity(code, Severity::Error)
    }

    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Self::with_severity(code, Severity::Warning)
    }

    fn with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Mark where the problem is.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Point at a related location, such as one of the packs involved.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find_map(|label| label.is_primary.then_some(label.span))
    }

    pub fn secondary_spans(&self) -> impl Iterator<Item = Span> + '_ {
        self.labels
            .iter()
            .filter_map(|label| (!label.is_primary).then_some(label.span))
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Whether some fix-it could be applied by a tool unattended.
    pub fn has_machine_applicable_fix(&self) -> bool {
        self.suggestions
            .iter()
            .any(|fix| fix.applicability == Applicability::MachineApplicable)
    }
}

/// One line for the headline, then one indented line per label, note and
/// fix-it.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)?;
        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            write!(f, "\n  {marker} {:?}: {}", label.span, label.message)?;
        }
        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }
        for fix in &self.suggestions {
            write!(f, "\n  = help: {}", fix.message)?;
        }
        Ok(())
    }
}
