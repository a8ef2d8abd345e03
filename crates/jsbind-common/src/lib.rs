//! Shared types for the jsbind generator.
//!
//! - [`shape`]: the closed `TypeShape` description of native types
//! - [`scalar`]: built-in scalar names and their accessors
//! - [`alias`]: the read-only alias table
//! - [`syntax`]: reader for Go-style type expressions
//! - [`error`]: resolution errors with breadcrumb context

pub mod alias;
pub mod error;
pub mod scalar;
pub mod shape;
pub mod span;
pub mod syntax;

pub use alias::{AliasMap, AliasNotFound, AliasTable};
pub use error::ResolveError;
pub use shape::{Field, Param, SeqLen, Signature, TypeShape};
