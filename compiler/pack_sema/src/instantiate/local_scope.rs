//! Local instantiation scope.
//!
//! While a function template is instantiated, each of its local declarations
//! maps to what substitution produced for it: one declaration, or for a
//! function parameter pack the list of declarations it expanded into.
//!
//! Frames nest with instantiation. A frame either stands alone or is
//! combined with its outer frame, in which case lookups continue outward.

use pack_ir::{DeclId, TemplateArgument};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// What a local declaration was instantiated to.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Instantiation {
    /// A single declaration. For a pack this means the pack itself was not
    /// expanded yet.
    Decl(DeclId),
    /// The declarations a pack expanded into, in order.
    Pack(Vec<DeclId>),
}

/// A pack whose explicitly specified arguments deduction may still extend.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct PartialPack {
    pub pack: DeclId,
    pub explicit_args: Vec<TemplateArgument>,
}

/// Misuse of the scope API.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Error)]
pub enum InstantiationScopeError {
    #[error("no instantiation scope frame is active")]
    NoFrame,
    #[error("frame already has a partially substituted pack")]
    PartialPackAlreadySet,
    #[error("declaration {0:?} is already instantiated in this frame")]
    DuplicateInstantiation(DeclId),
    #[error("declaration {0:?} is not an instantiated pack in this frame")]
    NotAPack(DeclId),
}

#[derive(Clone, Debug, Default)]
struct Frame {
    locals: FxHashMap<DeclId, Instantiation>,
    partial: Option<PartialPack>,
    combine_with_outer: bool,
}

/// Stack of local instantiation frames.
#[derive(Clone, Debug, Default)]
pub struct LocalInstantiationScope {
    frames: Vec<Frame>,
}

impl LocalInstantiationScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active frames.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push_frame(&mut self, combine_with_outer: bool) {
        tracing::trace!(depth = self.frames.len() + 1, combine_with_outer, "push instantiation scope");
        self.frames.push(Frame {
            combine_with_outer,
            ..Frame::default()
        });
    }

    pub fn pop_frame(&mut self) -> Result<(), InstantiationScopeError> {
        tracing::trace!(depth = self.frames.len(), "pop instantiation scope");
        self.frames
            .pop()
            .map(drop)
            .ok_or(InstantiationScopeError::NoFrame)
    }

    fn innermost(&mut self) -> Result<&mut Frame, InstantiationScopeError> {
        self.frames.last_mut().ok_or(InstantiationScopeError::NoFrame)
    }

    /// Record that `decl` was instantiated to `instantiated`.
    pub fn instantiated_local(
        &mut self,
        decl: DeclId,
        instantiated: DeclId,
    ) -> Result<(), InstantiationScopeError> {
        let frame = self.innermost()?;
        if frame.locals.contains_key(&decl) {
            return Err(InstantiationScopeError::DuplicateInstantiation(decl));
        }
        frame.locals.insert(decl, Instantiation::Decl(instantiated));
        Ok(())
    }

    /// Record that the pack `decl` is being expanded; elements follow via
    /// [`Self::instantiated_local_pack_arg`].
    pub fn make_instantiated_local_pack(
        &mut self,
        decl: DeclId,
    ) -> Result<(), InstantiationScopeError> {
        let frame = self.innermost()?;
        if frame.locals.contains_key(&decl) {
            return Err(InstantiationScopeError::DuplicateInstantiation(decl));
        }
        frame.locals.insert(decl, Instantiation::Pack(Vec::new()));
        Ok(())
    }

    /// Append one expanded declaration to the pack `decl`.
    pub fn instantiated_local_pack_arg(
        &mut self,
        decl: DeclId,
        element: DeclId,
    ) -> Result<(), InstantiationScopeError> {
        match self.innermost()?.locals.get_mut(&decl) {
            Some(Instantiation::Pack(elements)) => {
                elements.push(element);
                Ok(())
            }
            _ => Err(InstantiationScopeError::NotAPack(decl)),
        }
    }

    /// Mark `pack` as partially substituted in the innermost frame.
    pub fn set_partially_substituted_pack(
        &mut self,
        pack: DeclId,
        explicit_args: Vec<TemplateArgument>,
    ) -> Result<(), InstantiationScopeError> {
        let frame = self.innermost()?;
        if frame.partial.is_some() {
            return Err(InstantiationScopeError::PartialPackAlreadySet);
        }
        frame.partial = Some(PartialPack {
            pack,
            explicit_args,
        });
        Ok(())
    }

    /// Frames visible from the innermost one, innermost first.
    fn visible_frames(&self) -> impl Iterator<Item = &Frame> {
        let mut open = true;
        self.frames.iter().rev().take_while(move |frame| {
            let visible = open;
            open = frame.combine_with_outer;
            visible
        })
    }

    /// What `decl` was instantiated to, searching combined outer frames.
    pub fn find_instantiation_of(&self, decl: DeclId) -> Option<&Instantiation> {
        self.visible_frames()
            .find_map(|frame| frame.locals.get(&decl))
    }

    /// The partially substituted pack visible from the innermost frame.
    pub fn partially_substituted_pack(&self) -> Option<&PartialPack> {
        self.visible_frames()
            .find_map(|frame| frame.partial.as_ref())
    }
}
