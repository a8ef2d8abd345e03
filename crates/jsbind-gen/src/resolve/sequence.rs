//! Sequence case: fixed arrays and slices.
//!
//! ```text
//! xsLen := src.Length()            // slices only
//! xs := make([]T, xsLen)           // or `var xs [N]T`
//! for xsIdx := 0; xsIdx < xsLen; xsIdx++ {
//!     <element statements writing xs[xsIdx] from src.Index(xsIdx)>
//! }
//! ```

use jsbind_common::{ResolveError, SeqLen, TypeShape};

use super::{Resolution, Resolver, Scope};
use crate::ir::{Accessor, Expr, Stmt};

impl Resolver<'_> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn resolve_sequence(
        &self,
        name: &str,
        shape: &TypeShape,
        elem: &TypeShape,
        len: SeqLen,
        source: Expr,
        dst: Option<Expr>,
        scope: Scope<'_>,
    ) -> Result<Resolution, ResolveError> {
        let mut stmts = Vec::new();
        let (name, dst) = match dst {
            Some(dst) => (name.to_string(), Some(dst)),
            None => (scope.local(name), None),
        };

        let bound = match len {
            SeqLen::Fixed(n) => Expr::Int(n),
            SeqLen::Dynamic => {
                let len_name = scope.local(&format!("{name}Len"));
                stmts.push(Stmt::define(
                    len_name.as_str(),
                    Expr::access(source.clone(), Accessor::Length, vec![]),
                ));
                Expr::ident(len_name)
            }
        };

        // A slice destination has to be sized before it can be indexed,
        // whether it was supplied or not. Arrays are values and need no
        // allocation once they exist.
        let dst = match (dst, len) {
            (None, SeqLen::Dynamic) => {
                stmts.push(Stmt::define(
                    name.as_str(),
                    Expr::make(scope.storage_type(shape), bound.clone()),
                ));
                Expr::ident(name.as_str())
            }
            (Some(dst), SeqLen::Dynamic) => {
                stmts.push(Stmt::assign(
                    dst.clone(),
                    Expr::make(scope.storage_type(shape), bound.clone()),
                ));
                dst
            }
            (None, SeqLen::Fixed(_)) => {
                stmts.push(Stmt::VarDecl {
                    name: name.clone(),
                    ty: scope.storage_type(shape),
                });
                Expr::ident(name.as_str())
            }
            (Some(dst), SeqLen::Fixed(_)) => dst,
        };

        let idx = scope.local(&format!("{name}Idx"));
        let elem_res = self
            .resolve_in(
                &format!("{name}Elt"),
                elem,
                Expr::access(source, Accessor::Index, vec![Expr::ident(idx.as_str())]),
                Some(Expr::index(dst.clone(), Expr::ident(idx.as_str()))),
                scope.child(),
            )
            .map_err(|e| ResolveError::InArrayElement {
                elem: elem.clone(),
                source: Box::new(e),
            })?;

        stmts.push(Stmt::CountedLoop {
            counter: idx,
            bound,
            body: elem_res.stmts,
        });

        Ok(Resolution { expr: dst, stmts })
    }
}
