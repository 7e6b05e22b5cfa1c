//! Pre-computed node metadata flags.
//!
//! `NodeFlags` are computed once, bottom-up, when a type, expression or
//! statement is allocated, and cached on the node. Queries such as "does
//! this subtree mention an unexpanded parameter pack" are then O(1) and the
//! pack collector can prune whole subtrees without walking them.

use bitflags::bitflags;

bitflags! {
    /// Cached dependence properties of a syntax node.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct NodeFlags: u8 {
        /// Mentions a parameter pack that no enclosing expansion covers.
        const CONTAINS_UNEXPANDED_PACK = 1 << 0;
        /// Contains an `auto`-style placeholder that is not yet deduced.
        const CONTAINS_DEDUCED_TYPE = 1 << 1;
        /// Depends on a template parameter in some way.
        const INSTANTIATION_DEPENDENT = 1 << 2;
        /// Contains an error-recovery node.
        const CONTAINS_ERRORS = 1 << 3;
    }
}

impl NodeFlags {
    /// Flags that propagate from children to parents.
    pub const PROPAGATE_MASK: Self = Self::all();

    /// Flags a pack expansion (or fold, or pack index) strips from its
    /// pattern: the packs inside are spoken for.
    pub const EXPANSION_MASK: Self = Self::from_bits_truncate(
        Self::CONTAINS_DEDUCED_TYPE.bits()
            | Self::INSTANTIATION_DEPENDENT.bits()
            | Self::CONTAINS_ERRORS.bits(),
    );

    /// Flags of a node that references a parameter pack directly.
    pub const PACK_REFERENCE: Self = Self::from_bits_truncate(
        Self::CONTAINS_UNEXPANDED_PACK.bits() | Self::INSTANTIATION_DEPENDENT.bits(),
    );

    #[inline]
    pub const fn contains_unexpanded_pack(self) -> bool {
        self.contains(Self::CONTAINS_UNEXPANDED_PACK)
    }

    #[inline]
    pub const fn contains_deduced_type(self) -> bool {
        self.contains(Self::CONTAINS_DEDUCED_TYPE)
    }

    #[inline]
    pub const fn is_instantiation_dependent(self) -> bool {
        self.contains(Self::INSTANTIATION_DEPENDENT)
    }

    #[inline]
    pub const fn contains_errors(self) -> bool {
        self.contains(Self::CONTAINS_ERRORS)
    }

    /// What an enclosing expansion keeps of its pattern's flags.
    #[inline]
    #[must_use]
    pub const fn expanded(self) -> Self {
        Self::from_bits_truncate(self.bits() & Self::EXPANSION_MASK.bits())
    }

    /// Combine propagated flags from multiple children.
    #[inline]
    pub fn propagate_all(children: impl IntoIterator<Item = Self>) -> Self {
        children
            .into_iter()
            .fold(Self::empty(), |acc, child| acc | (child & Self::PROPAGATE_MASK))
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::empty()
    }
}
