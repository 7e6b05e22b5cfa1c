//! Multi-level template argument table.
//!
//! One argument list per template depth being substituted, outermost first.
//! Levels retained from an enclosing template that is not being substituted
//! sit below the first list and report no arguments.

use pack_ir::TemplateArgument;

/// Template arguments for every level of a nested template.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct MultiLevelTemplateArgs {
    /// Argument lists, outermost substituted level first.
    levels: Vec<Vec<TemplateArgument>>,
    /// Outer levels kept as written.
    retained_outer_levels: u32,
}

impl MultiLevelTemplateArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table with a single level of arguments at depth 0.
    pub fn single(args: Vec<TemplateArgument>) -> Self {
        MultiLevelTemplateArgs {
            levels: vec![args],
            retained_outer_levels: 0,
        }
    }

    /// Add the argument list for the next inner depth.
    #[must_use]
    pub fn with_inner_level(mut self, args: Vec<TemplateArgument>) -> Self {
        self.levels.push(args);
        self
    }

    /// Keep `count` outer levels unsubstituted.
    #[must_use]
    pub fn with_retained_outer_levels(mut self, count: u32) -> Self {
        self.retained_outer_levels = count;
        self
    }

    /// Number of levels, retained ones included.
    pub fn num_levels(&self) -> u32 {
        let substituted = u32::try_from(self.levels.len()).unwrap_or(u32::MAX);
        substituted.saturating_add(self.retained_outer_levels)
    }

    pub fn num_retained_outer_levels(&self) -> u32 {
        self.retained_outer_levels
    }

    /// The bound argument at `(depth, index)`, if any.
    pub fn argument(&self, depth: u32, index: u32) -> Option<&TemplateArgument> {
        let level = depth.checked_sub(self.retained_outer_levels)?;
        let arg = self
            .levels
            .get(usize::try_from(level).ok()?)?
            .get(usize::try_from(index).ok()?)?;
        (!arg.is_null()).then_some(arg)
    }

    pub fn has_argument(&self, depth: u32, index: u32) -> bool {
        self.argument(depth, index).is_some()
    }

    /// Elements of the argument pack bound at `(depth, index)`.
    pub fn pack_elements(&self, depth: u32, index: u32) -> Option<&[TemplateArgument]> {
        self.argument(depth, index).map(TemplateArgument::pack_elements)
    }
}
