//! Error codes for pack analysis diagnostics.
//!
//! Each code is a unique identifier (e.g. `E2001`); the first digit names the
//! area the diagnostic comes from.

use std::fmt;

/// Error codes for pack analysis diagnostics.
///
/// Format: E#### / W#### where the first digit indicates the area:
/// - E1xxx: unexpanded packs and expansion patterns
/// - E2xxx: expansion length conflicts
/// - E3xxx: fold expressions
/// - E4xxx: `sizeof...` and pack indexing
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Unexpanded Packs (E1xxx)
    /// Unexpanded parameter pack in a context that cannot expand it
    E1001,
    /// Pack expansion does not contain any unexpanded parameter packs
    E1002,

    // Length Conflicts (E2xxx)
    /// Two packs of one expansion have different lengths
    E2001,
    /// A pack disagrees with an expansion length fixed at an outer level
    E2002,
    /// Partially substituted pack is longer than the full expansion
    E2003,

    // Fold Expressions (E3xxx)
    /// Fold expression has unexpanded packs on both sides
    E3001,
    /// Unary fold over an empty pack with no identity value
    E3002,

    // Pack Names and Indexing (E4xxx)
    /// Name does not refer to a parameter pack
    E4001,
    /// Pack index out of bounds
    E4002,
    /// Unknown name in `sizeof...`, typo correction offered
    E4003,
    /// Ambiguous name in `sizeof...`
    E4004,
    /// Pack index is not a constant expression
    E4005,

    // Warnings
    /// Fold operand needs parentheses
    W3001,
    /// Pack indexing before C++26
    W4001,
}

impl ErrorCode {
    /// All variants, for exhaustive testing.
    ///
    /// Kept in sync with `as_str()`, which the compiler checks for
    /// exhaustiveness.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E4001,
        ErrorCode::E4002,
        ErrorCode::E4003,
        ErrorCode::E4004,
        ErrorCode::E4005,
        ErrorCode::W3001,
        ErrorCode::W4001,
    ];

    /// Get the string representation of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
            ErrorCode::E4004 => "E4004",
            ErrorCode::E4005 => "E4005",
            ErrorCode::W3001 => "W3001",
            ErrorCode::W4001 => "W4001",
        }
    }

    /// Check if this is an unexpanded-pack error (E1xxx range).
    pub fn is_unexpanded_pack_error(&self) -> bool {
        matches!(self, ErrorCode::E1001 | ErrorCode::E1002)
    }

    /// Check if this is a length-conflict error (E2xxx range).
    pub fn is_length_conflict(&self) -> bool {
        matches!(self, ErrorCode::E2001 | ErrorCode::E2002 | ErrorCode::E2003)
    }

    /// Check if this is a fold-expression error (E3xxx range).
    pub fn is_fold_error(&self) -> bool {
        matches!(self, ErrorCode::E3001 | ErrorCode::E3002)
    }

    /// Check if this is a pack name or indexing error (E4xxx range).
    pub fn is_pack_name_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E4001
                | ErrorCode::E4002
                | ErrorCode::E4003
                | ErrorCode::E4004
                | ErrorCode::E4005
        )
    }

    /// Check if this is a warning code (W-prefix).
    pub fn is_warning(&self) -> bool {
        matches!(self, ErrorCode::W3001 | ErrorCode::W4001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a code string like `"E2001"`; case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
