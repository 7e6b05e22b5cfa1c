//! Diagnostic system for pack analysis.
//!
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary span (where it went wrong)
//! - Secondary labels (the packs involved)
//! - Fix-it suggestions (how to fix)
//!
//! # Error Guarantees
//!
//! `ErrorGuaranteed` is type-level proof that at least one error was
//! emitted. Builders that fail return `Err(ErrorGuaranteed)`, so a caller
//! can never observe a failed construction that reported nothing.
//!
//! ```text
//! let guarantee = queue.emit_error(diagnostic);
//! fn build_expansion(..) -> Result<ExprId, ErrorGuaranteed> { ... }
//! ```

mod diagnostic;
mod error_code;
mod guarantee;
pub mod queue;

pub use diagnostic::{Applicability, Diagnostic, Label, Severity, Substitution, Suggestion};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
