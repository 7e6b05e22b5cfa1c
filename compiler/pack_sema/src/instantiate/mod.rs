//! Instantiation state the resolver reads: the argument table and the
//! local instantiation scope.

mod args;
mod local_scope;

pub use args::MultiLevelTemplateArgs;
pub use local_scope::{Instantiation, InstantiationScopeError, LocalInstantiationScope, PartialPack};
