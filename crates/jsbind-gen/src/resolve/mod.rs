//! Type-directed value resolution.
//!
//! Given a [`TypeShape`], a source expression (a dynamic value) and an
//! optional destination, the resolver produces a [`Resolution`]: the
//! statements that perform the conversion plus the expression that refers
//! to the converted value afterwards.
//!
//! Each shape variant has its own case:
//!
//! - [`scalar`]: built-in scalars and alias expansion
//! - [`optional`]: pointers guarded against undefined/null
//! - [`sequence`]: fixed arrays and slices
//! - [`record`]: structs, field by field
//! - [`args`]: the per-function argument-list driver
//!
//! All cases share one contract, so they compose freely. Composite results
//! are built by sequencing child results. The only state shared across a
//! call is the set of local names already declared, so that sibling
//! subtrees never declare the same identifier.

pub mod args;
pub mod optional;
pub mod record;
pub mod scalar;
pub mod sequence;

use std::cell::RefCell;

use jsbind_common::{AliasTable, ResolveError, TypeShape};
use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::trace;

use crate::ir::{Accessor, BinOp, Expr, Stmt, ValueKind};

pub use args::{ArgBindings, FunctionBinding};

/// Generator settings that name things in the emitted code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Identifier of the incoming argument list.
    pub args_ident: String,
    /// Package that holds the kind constants (`TypeUndefined`, `TypeNull`).
    pub runtime_pkg: String,
    /// Binding used for the kind query inside optional guards.
    pub kind_var: String,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        ResolverOptions {
            args_ident: "args".to_string(),
            runtime_pkg: "js".to_string(),
            kind_var: "jsType".to_string(),
        }
    }
}

/// The result of resolving one value.
///
/// Running `stmts` in order and then evaluating `expr` yields the converted
/// native value. When a destination was supplied, `expr` is that destination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub expr: Expr,
    pub stmts: Vec<Stmt>,
}

impl Resolution {
    /// A value that needs no preparation.
    pub fn expr(expr: Expr) -> Self {
        Resolution {
            expr,
            stmts: Vec::new(),
        }
    }
}

/// Aliases currently being expanded on the path from the root, innermost first.
struct AliasFrame<'s> {
    name: &'s str,
    parent: Option<&'s AliasFrame<'s>>,
}

/// Identifiers declared so far in one generated body.
///
/// Generated locals all live in one Go function, and nested records open no
/// new block, so derived names such as `rABLen` can be reached from two
/// different field paths. Every declaration claims its name here first.
pub(crate) struct LocalNames {
    used: RefCell<FxHashSet<String>>,
}

impl LocalNames {
    /// A fresh set with the names the generated code refers to already
    /// taken: the argument list, the runtime package and the guard binding.
    pub(crate) fn new(options: &ResolverOptions) -> Self {
        let names = LocalNames {
            used: RefCell::new(FxHashSet::default()),
        };
        names.reserve(&options.args_ident);
        names.reserve(&options.runtime_pkg);
        names.reserve(&options.kind_var);
        names
    }

    pub(crate) fn reserve(&self, name: &str) {
        self.used.borrow_mut().insert(name.to_string());
    }

    /// `base` if it is still free, otherwise `base1`, `base2`, ...
    pub(crate) fn claim(&self, base: &str) -> String {
        let mut used = self.used.borrow_mut();
        if used.insert(base.to_string()) {
            return base.to_string();
        }
        let mut n = 1u32;
        loop {
            let candidate = format!("{base}{n}");
            if used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Per-call context threaded through the recursion.
#[derive(Clone, Copy)]
pub(crate) struct Scope<'s> {
    /// Alias name the current shape was reached through, used when
    /// allocating storage for it.
    nominal: Option<&'s str>,
    expanding: Option<&'s AliasFrame<'s>>,
    names: &'s LocalNames,
}

impl<'s> Scope<'s> {
    pub(crate) fn root(names: &'s LocalNames) -> Scope<'s> {
        Scope {
            nominal: None,
            expanding: None,
            names,
        }
    }

    /// Scope for a component of the current shape: the nominal name no
    /// longer applies, the alias path does.
    pub(crate) fn child(self) -> Scope<'s> {
        Scope {
            nominal: None,
            ..self
        }
    }

    /// Declare a local, renamed if `base` is already in use.
    pub(crate) fn local(&self, base: &str) -> String {
        self.names.claim(base)
    }

    /// The type to declare or allocate for `shape` in this scope.
    pub(crate) fn storage_type(&self, shape: &TypeShape) -> TypeShape {
        match self.nominal {
            Some(name) => TypeShape::named(name),
            None => shape.clone(),
        }
    }

    /// If `name` is already being expanded, the alias chain from the
    /// outermost expansion back to `name`.
    fn cycle_through(&self, name: &str) -> Option<Vec<String>> {
        let mut chain = Vec::new();
        let mut frame = self.expanding;
        let mut found = false;
        while let Some(f) = frame {
            chain.push(f.name.to_string());
            if f.name == name {
                found = true;
                break;
            }
            frame = f.parent;
        }
        if !found {
            return None;
        }
        chain.reverse();
        chain.push(name.to_string());
        Some(chain)
    }
}

/// Resolves type shapes against a read-only alias table.
///
/// Holds shared references only, so it is cheap to copy. Alias tables are
/// `Sync`, so one resolver can serve several threads at once.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    aliases: &'a dyn AliasTable,
    options: &'a ResolverOptions,
}

impl<'a> Resolver<'a> {
    pub fn new(aliases: &'a dyn AliasTable, options: &'a ResolverOptions) -> Self {
        Resolver { aliases, options }
    }

    pub fn options(&self) -> &ResolverOptions {
        self.options
    }

    /// Resolve `source` as a value of `shape`.
    ///
    /// `name` is the base identifier for any locals the conversion needs;
    /// derived locals append a role suffix (`Elt`, `Idx`, `Len`) or a field
    /// name. With `dst == None` a fresh local named `name` is created when
    /// storage is required; it is renamed if it would shadow one of the
    /// names in [`ResolverOptions`].
    pub fn resolve(
        &self,
        name: &str,
        shape: &TypeShape,
        source: Expr,
        dst: Option<Expr>,
    ) -> Result<Resolution, ResolveError> {
        let names = LocalNames::new(self.options);
        self.resolve_in(name, shape, source, dst, Scope::root(&names))
    }

    pub(crate) fn resolve_in(
        &self,
        name: &str,
        shape: &TypeShape,
        source: Expr,
        dst: Option<Expr>,
        scope: Scope<'_>,
    ) -> Result<Resolution, ResolveError> {
        trace!(base = name, shape = %shape, has_dst = dst.is_some(), "resolve");
        match shape {
            TypeShape::Named(type_name) => self.resolve_named(name, type_name, source, dst, scope),
            TypeShape::Optional(inner) => {
                self.resolve_optional(name, shape, inner, source, dst, scope)
            }
            TypeShape::Sequence { elem, len } => {
                self.resolve_sequence(name, shape, elem, *len, source, dst, scope)
            }
            TypeShape::Record(fields) => self.resolve_record(name, shape, fields, source, dst, scope),
        }
    }

    /// Expand `alias` and resolve the shape it stands for, keeping the same
    /// base name, source and destination.
    pub(crate) fn resolve_alias(
        &self,
        name: &str,
        alias: &str,
        source: Expr,
        dst: Option<Expr>,
        scope: Scope<'_>,
    ) -> Result<Resolution, ResolveError> {
        if let Some(chain) = scope.cycle_through(alias) {
            return Err(ResolveError::RecursiveAlias { chain });
        }
        let target = self
            .aliases
            .lookup(alias)
            .map_err(|e| ResolveError::UnresolvedIdentifier { name: e.name })?;
        let frame = AliasFrame {
            name: alias,
            parent: scope.expanding,
        };
        let inner = Scope {
            nominal: Some(scope.nominal.unwrap_or(alias)),
            expanding: Some(&frame),
            names: scope.names,
        };
        self.resolve_in(name, target, source, dst, inner)
    }

    /// `if kind := source.Type(); !(kind == Undefined || kind == Null) { body }`
    ///
    /// Both kind checks stay joined by OR, but under one negation: the
    /// `kind != Undefined || kind != Null` form holds for every value and
    /// would let undefined and null through.
    pub(crate) fn null_guard(&self, source: Expr, body: Vec<Stmt>) -> Stmt {
        let kind_var = &self.options.kind_var;
        let is_kind = |kind: ValueKind| {
            Expr::binary(
                BinOp::Eq,
                Expr::ident(kind_var.as_str()),
                Expr::Kind {
                    pkg: self.options.runtime_pkg.clone(),
                    kind,
                },
            )
        };
        Stmt::If {
            init: Some(Box::new(Stmt::define(
                kind_var.as_str(),
                Expr::access(source, Accessor::Type, vec![]),
            ))),
            cond: Expr::not(Expr::binary(
                BinOp::Or,
                is_kind(ValueKind::Undefined),
                is_kind(ValueKind::Null),
            )),
            body,
        }
    }
}

/// Write `expr` into `dst` when one is given, otherwise hand it back as is.
pub(crate) fn assign_into(expr: Expr, dst: Option<Expr>) -> Resolution {
    match dst {
        Some(dst) => Resolution {
            stmts: vec![Stmt::assign(dst.clone(), expr)],
            expr: dst,
        },
        None => Resolution::expr(expr),
    }
}
