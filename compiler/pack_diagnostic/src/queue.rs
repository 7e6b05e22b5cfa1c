//! Diagnostic queue: the sink every analysis reports into.
//!
//! Features:
//! - Error limit to keep output bounded
//! - Deduplication of identical reports at the same location
//! - Position-ordered flush
//! - `ErrorGuaranteed` proof that errors were emitted

use pack_ir::Span;

use crate::{Diagnostic, ErrorCode, ErrorGuaranteed};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors kept (0 = unlimited).
    pub error_limit: usize,
    /// Drop a diagnostic whose code and primary span match one already queued.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 20,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// Queue for collecting, deduplicating and sorting diagnostics.
///
/// # Example
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// let guar = queue.emit_error(diagnostic);
/// // ... more diagnostics
/// let sorted = queue.flush();
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    /// Errors emitted, including ones dropped by the limit or dedup.
    error_count: usize,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    /// Create a diagnostic queue with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a diagnostic queue with custom configuration.
    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            error_count: 0,
            config,
        }
    }

    /// Emit an error diagnostic and get proof it was emitted.
    ///
    /// The error counts even when the limit or deduplication keeps it out
    /// of the queue.
    pub fn emit_error(&mut self, diag: Diagnostic) -> ErrorGuaranteed {
        debug_assert!(diag.is_error(), "emit_error called with a non-error");
        self.error_count += 1;
        if !self.limit_reached_before_push() {
            self.push(diag);
        }
        ErrorGuaranteed::new()
    }

    /// Emit a warning. Warnings are never limited.
    pub fn emit_warning(&mut self, diag: Diagnostic) {
        self.push(diag);
    }

    fn limit_reached_before_push(&self) -> bool {
        self.config.error_limit > 0 && self.queued_errors() >= self.config.error_limit
    }

    fn queued_errors(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Add a diagnostic unless it duplicates one already queued.
    fn push(&mut self, diag: Diagnostic) {
        if self.config.deduplicate && self.is_duplicate(&diag) {
            return;
        }
        self.diagnostics.push(diag);
    }

    fn is_duplicate(&self, diag: &Diagnostic) -> bool {
        let key = (diag.code, diag.primary_span());
        self.diagnostics
            .iter()
            .any(|d| (d.code, d.primary_span()) == key)
    }

    /// Check if the error limit has been reached.
    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    /// Number of errors emitted.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Proof that errors were emitted, if any were.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    /// Queued diagnostics in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Codes of the queued diagnostics in emission order.
    pub fn codes(&self) -> Vec<ErrorCode> {
        self.diagnostics.iter().map(|d| d.code).collect()
    }

    /// Number of queued diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Sort diagnostics by primary position and return them.
    ///
    /// Clears the queue. Diagnostics without a primary label sort first;
    /// ties keep emission order.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let already_sorted = self
            .diagnostics
            .windows(2)
            .all(|w| sort_key(&w[0]) <= sort_key(&w[1]));

        if !already_sorted {
            self.diagnostics.sort_by_key(sort_key);
        }

        self.error_count = 0;
        std::mem::take(&mut self.diagnostics)
    }
}

fn sort_key(diag: &Diagnostic) -> Option<(u32, u32)> {
    diag.primary_span().map(|Span { start, end }| (start, end))
}
