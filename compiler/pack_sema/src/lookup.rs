//! Name lookup services used by `sizeof...(name)`.
//!
//! Pack analysis does not own scopes; the caller answers lookups through
//! [`NameLookup`] and offers corrections through [`TypoCorrector`].
//! [`VisibleDecls`] is a flat table implementing both.

use pack_ir::{AstContext, DeclId, Name};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// Result of an ordinary (non-type) name lookup.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum LookupResult {
    Found(DeclId),
    NotFound,
    /// Several declarations that overload each other.
    Overloaded(Vec<DeclId>),
    /// Several unrelated declarations, none preferred.
    Ambiguous(Vec<DeclId>),
}

/// Ordinary name lookup at the point being analyzed.
pub trait NameLookup {
    fn lookup_ordinary_name(&self, name: Name) -> LookupResult;
}

/// Best-effort spelling correction.
pub trait TypoCorrector {
    /// A declaration whose name is close to `name` and that `accept`
    /// admits, if there is one.
    fn correct_typo(
        &self,
        name: Name,
        ast: &AstContext,
        accept: &dyn Fn(DeclId) -> bool,
    ) -> Option<DeclId>;
}

/// Declarations visible at one point, by name.
#[derive(Clone, Debug, Default)]
pub struct VisibleDecls {
    by_name: FxHashMap<Name, SmallVec<[DeclId; 1]>>,
    ambiguous: FxHashSet<Name>,
}

impl VisibleDecls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `decl` visible under its own name.
    pub fn declare(&mut self, decl: DeclId, ast: &AstContext) {
        let name = ast.decl(decl).name;
        if !name.is_empty() {
            self.by_name.entry(name).or_default().push(decl);
        }
    }

    /// Declarations sharing `name` conflict instead of overloading.
    pub fn mark_ambiguous(&mut self, name: Name) {
        self.ambiguous.insert(name);
    }
}

impl NameLookup for VisibleDecls {
    fn lookup_ordinary_name(&self, name: Name) -> LookupResult {
        match self.by_name.get(&name).map(SmallVec::as_slice) {
            None | Some([]) => LookupResult::NotFound,
            Some([decl]) => LookupResult::Found(*decl),
            Some(decls) if self.ambiguous.contains(&name) => {
                LookupResult::Ambiguous(decls.to_vec())
            }
            Some(decls) => LookupResult::Overloaded(decls.to_vec()),
        }
    }
}

impl TypoCorrector for VisibleDecls {
    fn correct_typo(
        &self,
        name: Name,
        ast: &AstContext,
        accept: &dyn Fn(DeclId) -> bool,
    ) -> Option<DeclId> {
        let target = ast.name_str(name);
        let threshold = default_threshold(target.chars().count());
        if threshold == 0 {
            return None;
        }

        self.by_name
            .iter()
            .filter(|&(&candidate, _)| candidate != name)
            .filter_map(|(&candidate, decls)| {
                let spelling = ast.name_str(candidate);
                if target.len().abs_diff(spelling.len()) > threshold {
                    return None;
                }
                let distance = edit_distance(target, spelling);
                let decl = decls.iter().copied().find(|&decl| accept(decl))?;
                (distance <= threshold).then_some((distance, spelling, decl))
            })
            .min_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)))
            .map(|(_, _, decl)| decl)
    }
}

/// How many edits a suggestion may be away from a name of this length.
fn default_threshold(name_len: usize) -> usize {
    match name_len {
        0 => 0,
        1..=2 => 1,
        3..=5 => 2,
        _ => 3,
    }
}

/// Levenshtein distance between two strings, by characters.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b_len = b.chars().count();
    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row: Vec<usize> = vec![0; b_len + 1];

    for (i, a_char) in a.chars().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b.chars().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}

#[cfg(test)]
mod tests;
