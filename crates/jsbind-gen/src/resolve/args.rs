//! Argument-list driver: one resolution per parameter, read from `args[i]`.

use jsbind_common::{Param, ResolveError, Signature};
use serde::Serialize;
use tracing::debug;

use super::{LocalNames, Resolver, Scope};
use crate::ir::{Expr, Stmt};

/// Converted arguments for one call, in parameter order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArgBindings {
    /// One expression per parameter, usable as the call's arguments.
    pub args: Vec<Expr>,
    /// Every parameter's preparatory statements, parameter by parameter.
    pub stmts: Vec<Stmt>,
}

/// Everything needed to call one target function with converted arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FunctionBinding {
    pub name: String,
    pub bindings: ArgBindings,
}

impl FunctionBinding {
    /// `Name(arg0, arg1, ...)`
    pub fn call(&self) -> Expr {
        Expr::call(Expr::ident(self.name.as_str()), self.bindings.args.clone())
    }
}

/// The local name for a parameter. Blank and unnamed parameters still need
/// a binding, so they get a positional one.
fn binding_name(param: &Param, index: usize) -> String {
    if param.name.is_empty() || param.name == "_" {
        format!("arg{index}")
    } else {
        param.name.clone()
    }
}

impl Resolver<'_> {
    /// Resolve every parameter with a fresh binding each.
    ///
    /// All parameters share one body, so a local is renamed when an earlier
    /// parameter, or one of the runtime names, already took it.
    pub fn resolve_args(&self, params: &[Param]) -> Result<ArgBindings, ResolveError> {
        self.resolve_params(params, &LocalNames::new(self.options()))
    }

    fn resolve_params(
        &self,
        params: &[Param],
        names: &LocalNames,
    ) -> Result<ArgBindings, ResolveError> {
        let mut args = Vec::with_capacity(params.len());
        let mut stmts = Vec::new();

        for (index, param) in params.iter().enumerate() {
            let source = Expr::index(
                Expr::ident(self.options().args_ident.as_str()),
                Expr::Int(index as u64),
            );
            let res = self
                .resolve_in(
                    &binding_name(param, index),
                    &param.shape,
                    source,
                    None,
                    Scope::root(names),
                )
                .map_err(|e| ResolveError::UnresolvedArgument {
                    index,
                    name: param.name.clone(),
                    shape: param.shape.clone(),
                    source: Box::new(e),
                })?;
            debug!(
                index,
                param = %param.name,
                shape = %param.shape,
                stmts = res.stmts.len(),
                "argument resolved"
            );
            args.push(res.expr);
            stmts.extend(res.stmts);
        }

        Ok(ArgBindings { args, stmts })
    }

    /// Like [`Resolver::resolve_args`], and no local shadows the function
    /// being called.
    pub fn resolve_signature(&self, sig: &Signature) -> Result<FunctionBinding, ResolveError> {
        debug!(function = %sig.name, params = sig.params.len(), "resolving signature");
        let names = LocalNames::new(self.options());
        names.reserve(&sig.name);
        Ok(FunctionBinding {
            name: sig.name.clone(),
            bindings: self.resolve_params(&sig.params, &names)?,
        })
    }
}
