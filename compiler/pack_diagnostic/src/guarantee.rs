//! Proof that an error was reported.

use std::fmt;

/// Type-level proof that at least one error diagnostic was emitted.
///
/// Only the diagnostic queue can create one, so a function returning
/// `Result<T, ErrorGuaranteed>` cannot fail without having reported why.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    /// Only called by the queue when an error is emitted.
    pub(crate) const fn new() -> Self {
        ErrorGuaranteed(())
    }

    /// Proof for an already-known number of emitted errors.
    pub fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then(Self::new)
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error(s) emitted")
    }
}

impl std::error::Error for ErrorGuaranteed {}
