//! Unexpanded parameter pack references.

use std::hash::{Hash, Hasher};

use pack_ir::{AstContext, DeclId, DeclKind, Name, Span, TypeParamType};
use smallvec::SmallVec;

/// The entity an unexpanded pack reference names.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PackEntity {
    /// A declared pack: function parameter pack, init-capture pack,
    /// binding pack, or a non-type / template template parameter pack.
    Decl(DeclId),
    /// A template type parameter pack, identified by its canonical type.
    TypeParam(TypeParamType),
}

/// One occurrence of an unexpanded parameter pack.
///
/// Equality and hashing look only at the entity: two occurrences of `Ts`
/// at different places are the same pack.
#[derive(Copy, Clone, Debug)]
pub struct UnexpandedPack {
    pub entity: PackEntity,
    /// Where the occurrence was written; `None` for synthesized nodes.
    pub span: Option<Span>,
}

/// Packs in collection order, duplicates kept.
pub type UnexpandedPacks = SmallVec<[UnexpandedPack; 4]>;

impl UnexpandedPack {
    pub const fn decl(decl: DeclId, span: Option<Span>) -> Self {
        UnexpandedPack {
            entity: PackEntity::Decl(decl),
            span,
        }
    }

    pub const fn type_param(param: TypeParamType, span: Option<Span>) -> Self {
        UnexpandedPack {
            entity: PackEntity::TypeParam(param),
            span,
        }
    }

    /// Identifier of the pack, `Name::EMPTY` when anonymous.
    pub fn name(&self, ast: &AstContext) -> Name {
        match self.entity {
            PackEntity::Decl(decl) => ast.decl(decl).name,
            PackEntity::TypeParam(param) => param.name,
        }
    }

    /// `(depth, index)` for template parameter packs.
    pub fn depth_and_index(&self, ast: &AstContext) -> Option<(u32, u32)> {
        match self.entity {
            PackEntity::Decl(decl) => ast.decl(decl).depth_and_index(),
            PackEntity::TypeParam(param) => Some((param.depth, param.index)),
        }
    }

    /// Whether this reference is the pack declared by `local`.
    ///
    /// A type parameter occurrence matches the template type parameter
    /// declaration of the same canonical type.
    pub fn is_declared_by(&self, local: DeclId, ast: &AstContext) -> bool {
        match self.entity {
            PackEntity::Decl(decl) => decl == local,
            PackEntity::TypeParam(param) => matches!(
                ast.decl(local).kind,
                DeclKind::TemplateTypeParm { param: declared, .. } if declared == param
            ),
        }
    }
}

impl PartialEq for UnexpandedPack {
    fn eq(&self, other: &Self) -> bool {
        self.entity == other.entity
    }
}

impl Eq for UnexpandedPack {}

impl Hash for UnexpandedPack {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entity.hash(state);
    }
}
