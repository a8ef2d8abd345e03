//! Leaf case: built-in scalars, and the hand-off to alias expansion.

use jsbind_common::scalar::{Scalar, ScalarAccess};
use jsbind_common::ResolveError;

use super::{assign_into, Resolution, Resolver, Scope};
use crate::ir::{Accessor, Expr};

impl Resolver<'_> {
    /// Resolve a `Named` shape.
    ///
    /// Scalars read through their accessor (`Bool`, `String`, `Int`,
    /// `Float`) and are narrowed to the exact width unless it is the
    /// accessor's natural one. Every other name is an alias.
    pub(crate) fn resolve_named(
        &self,
        name: &str,
        type_name: &str,
        source: Expr,
        dst: Option<Expr>,
        scope: Scope<'_>,
    ) -> Result<Resolution, ResolveError> {
        let Some(scalar) = Scalar::from_name(type_name) else {
            return self.resolve_alias(name, type_name, source, dst, scope);
        };

        let accessor = match scalar.access() {
            ScalarAccess::Bool => Accessor::Bool,
            ScalarAccess::String => Accessor::String,
            ScalarAccess::Int => Accessor::Int,
            ScalarAccess::Float => Accessor::Float,
        };
        let mut expr = Expr::access(source, accessor, vec![]);
        if let Some(ty) = scalar.narrowing_cast() {
            expr = Expr::cast(ty, expr);
        }

        Ok(assign_into(expr, dst))
    }
}
