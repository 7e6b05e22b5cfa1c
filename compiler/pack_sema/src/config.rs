//! Analysis configuration.

use pack_diagnostic::DiagnosticConfig;

/// Language dialect switches that change what pack analysis reports.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct LangOptions {
    /// Pack indexing is standard; using it only earns a compatibility
    /// warning instead of an extension warning.
    pub cplusplus26: bool,
}

impl LangOptions {
    pub const fn cplusplus26() -> Self {
        LangOptions { cplusplus26: true }
    }
}

/// Configuration for a [`Sema`](crate::Sema) session.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct SemaConfig {
    pub diagnostics: DiagnosticConfig,
    pub lang: LangOptions,
}

impl SemaConfig {
    /// No error limit and no deduplication, so tests see every report.
    pub fn for_testing() -> Self {
        SemaConfig {
            diagnostics: DiagnosticConfig::unlimited(),
            lang: LangOptions::default(),
        }
    }

    #[must_use]
    pub fn with_lang(mut self, lang: LangOptions) -> Self {
        self.lang = lang;
        self
    }
}
