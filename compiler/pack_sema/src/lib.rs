//! Parameter pack analysis.
//!
//! Everything semantic analysis needs to know about `...`:
//! - Collecting the unexpanded packs a node mentions ([`PackCollector`])
//! - Reporting packs left unexpanded, deferring inside lambdas and blocks
//! - Deciding whether and how many times an expansion expands
//!   ([`Sema::check_parameter_packs_for_expansion`])
//! - Building pack expansions, fold expressions, `sizeof...` and pack
//!   indexing, with their diagnostics
//!
//! # Session
//!
//! A [`Sema`] owns the syntax arena, the diagnostic queue, the function
//! scope stack and the local instantiation scope. Builders return
//! `Result<_, ErrorGuaranteed>`; a soft "not ready yet" answer from the
//! expansion resolver is an [`ExpansionPlan`], never an error.
//!
//! # Tracing
//!
//! Entry points are instrumented with `tracing`. Call [`init_tracing`] and
//! set `RUST_LOG=pack_sema=trace` to see them.

mod build;
mod collect;
mod config;
mod diagnose;
mod expansion;
mod fold;
mod indexing;
pub mod instantiate;
mod lookup;
mod scope;
mod scope_guard;
mod sema;
mod sizeof_pack;
mod tracing_setup;
mod unexpanded;

pub use build::ParsedTemplateArgument;
pub use collect::{
    collect_decl, collect_expr, collect_stmt, collect_template_argument, collect_template_name,
    collect_type, PackCollector,
};
pub use config::{LangOptions, SemaConfig};
pub use diagnose::UnexpandedPackContext;
pub use expansion::{ExpansionPattern, ExpansionPlan};
pub use instantiate::{
    Instantiation, InstantiationScopeError, LocalInstantiationScope, MultiLevelTemplateArgs,
    PartialPack,
};
pub use lookup::{edit_distance, LookupResult, NameLookup, TypoCorrector, VisibleDecls};
pub use scope::{CompoundScope, FunctionScope, FunctionScopeKind};
pub use scope_guard::{ScopedCompound, ScopedFunction, ScopedInstantiation};
pub use sema::Sema;
pub use tracing_setup::init_tracing;
pub use unexpanded::{PackEntity, UnexpandedPack, UnexpandedPacks};

