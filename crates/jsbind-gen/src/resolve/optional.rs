//! Optional (pointer) case.
//!
//! ```text
//! var p *T
//! if jsType := src.Type(); !(jsType == js.TypeUndefined || jsType == js.TypeNull) {
//!     p = new(T)
//!     <inner statements writing *p>
//! }
//! ```
//!
//! An undefined or null source leaves the pointer nil.

use jsbind_common::{ResolveError, TypeShape};

use super::{Resolution, Resolver, Scope};
use crate::ir::{Expr, Stmt};

impl Resolver<'_> {
    pub(crate) fn resolve_optional(
        &self,
        name: &str,
        shape: &TypeShape,
        inner: &TypeShape,
        source: Expr,
        dst: Option<Expr>,
        scope: Scope<'_>,
    ) -> Result<Resolution, ResolveError> {
        let mut stmts = Vec::new();
        let (name, dst) = match dst {
            Some(dst) => (name.to_string(), dst),
            None => {
                let local = scope.local(name);
                stmts.push(Stmt::VarDecl {
                    name: local.clone(),
                    ty: scope.storage_type(shape),
                });
                let dst = Expr::ident(local.as_str());
                (local, dst)
            }
        };

        let elem = self
            .resolve_in(
                &format!("{name}Elt"),
                inner,
                source.clone(),
                Some(Expr::deref(dst.clone())),
                scope.child(),
            )
            .map_err(|e| ResolveError::InPointerElement {
                elem: inner.clone(),
                source: Box::new(e),
            })?;

        let mut body = Vec::with_capacity(elem.stmts.len() + 1);
        body.push(Stmt::assign(dst.clone(), Expr::New(inner.clone())));
        body.extend(elem.stmts);
        stmts.push(self.null_guard(source, body));

        Ok(Resolution { expr: dst, stmts })
    }
}
