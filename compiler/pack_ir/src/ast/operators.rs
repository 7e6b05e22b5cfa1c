//! Binary operators.
//!
//! Every binary operator that may appear in a fold expression, plus the
//! helpers diagnostics need to print them.

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Pointer-to-member
    PtrMemD,
    PtrMemI,

    // Arithmetic
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    Shl,
    Shr,

    // Comparison
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,

    // Bitwise
    BitAnd,
    BitXor,
    BitOr,

    // Logical
    LAnd,
    LOr,

    // Assignment
    Assign,
    MulAssign,
    DivAssign,
    RemAssign,
    AddAssign,
    SubAssign,
    ShlAssign,
    ShrAssign,
    AndAssign,
    XorAssign,
    OrAssign,

    Comma,
}

impl BinaryOp {
    /// Returns the source-level spelling of this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::PtrMemD => ".*",
            Self::PtrMemI => "->*",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::BitOr => "|",
            Self::LAnd => "&&",
            Self::LOr => "||",
            Self::Assign => "=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::RemAssign => "%=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::ShlAssign => "<<=",
            Self::ShrAssign => ">>=",
            Self::AndAssign => "&=",
            Self::XorAssign => "^=",
            Self::OrAssign => "|=",
            Self::Comma => ",",
        }
    }

    /// Whether this is a plain or compound assignment.
    pub const fn is_assignment(self) -> bool {
        matches!(
            self,
            Self::Assign
                | Self::MulAssign
                | Self::DivAssign
                | Self::RemAssign
                | Self::AddAssign
                | Self::SubAssign
                | Self::ShlAssign
                | Self::ShrAssign
                | Self::AndAssign
                | Self::XorAssign
                | Self::OrAssign
        )
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_symbol())
    }
}
