//! Arena indices for syntax nodes.
//!
//! No `Box<Expr>`: every node lives in the [`AstContext`](crate::AstContext)
//! arenas and is referenced by a 32-bit index. Index equality is node
//! identity.

use std::fmt;

macro_rules! define_node_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create an id from a raw arena index.
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Get the index into the arena.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Get the raw u32 value.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

define_node_id!(
    /// Index into the expression arena.
    ExprId
);
define_node_id!(
    /// Index into the type arena.
    TypeId
);
define_node_id!(
    /// Index into the declaration arena.
    DeclId
);
define_node_id!(
    /// Index into the statement arena.
    StmtId
);

crate::static_assert_size!(ExprId, 4);
crate::static_assert_size!(DeclId, 4);
