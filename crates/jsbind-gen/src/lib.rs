//! Conversion code generation for the jsbind generator.
//!
//! This crate turns parameter type shapes into statements that convert
//! dynamic JavaScript values into native values.
//!
//! ## Architecture
//!
//! - [`ir`]: the statement/expression vocabulary of generated code
//! - [`resolve`]: the type-directed resolver and argument-list driver
//! - [`printer`]: Go text rendering of the IR
//!
//! ## Pipeline
//!
//! ```text
//! Signature + AliasTable -> Resolver -> FunctionBinding (IR) -> printer -> Go text
//! ```

pub mod ir;
pub mod printer;
pub mod resolve;

use jsbind_common::{AliasTable, ResolveError, Signature};

pub use resolve::{ArgBindings, FunctionBinding, Resolution, Resolver, ResolverOptions};

/// Resolve every signature independently.
///
/// A failing signature does not affect the others; each gets its own
/// result, in input order.
pub fn bind_all(
    aliases: &dyn AliasTable,
    options: &ResolverOptions,
    signatures: &[Signature],
) -> Vec<Result<FunctionBinding, ResolveError>> {
    let resolver = Resolver::new(aliases, options);
    signatures
        .iter()
        .map(|sig| resolver.resolve_signature(sig))
        .collect()
}
