//! Record case: allocate once, then resolve every field by name.

use jsbind_common::{Field, ResolveError, TypeShape};

use super::{Resolution, Resolver, Scope};
use crate::ir::{Accessor, Expr, Stmt};

impl Resolver<'_> {
    /// Each field reads `src.Get("Field")` into `dst.Field`, using
    /// `name + Field` as its base name. Field statements are emitted in
    /// declaration order.
    pub(crate) fn resolve_record(
        &self,
        name: &str,
        shape: &TypeShape,
        fields: &[Field],
        source: Expr,
        dst: Option<Expr>,
        scope: Scope<'_>,
    ) -> Result<Resolution, ResolveError> {
        let mut stmts = Vec::new();
        let (name, dst) = match dst {
            Some(dst) => (name.to_string(), dst),
            None => {
                let local = scope.local(name);
                stmts.push(Stmt::define(
                    local.as_str(),
                    Expr::Composite(scope.storage_type(shape)),
                ));
                let dst = Expr::ident(local.as_str());
                (local, dst)
            }
        };

        for field in fields {
            let field_res = self
                .resolve_in(
                    &format!("{name}{}", field.name),
                    &field.shape,
                    Expr::access(
                        source.clone(),
                        Accessor::Get,
                        vec![Expr::Str(field.name.clone())],
                    ),
                    Some(Expr::field(dst.clone(), field.name.as_str())),
                    scope.child(),
                )
                .map_err(|e| ResolveError::InStructField {
                    field: field.name.clone(),
                    shape: field.shape.clone(),
                    source: Box::new(e),
                })?;
            stmts.extend(field_res.stmts);
        }

        Ok(Resolution { expr: dst, stmts })
    }
}

#[cfg(test)]
mod tests {
    use jsbind_common::{AliasMap, Field, ResolveError, TypeShape};

    use crate::ir::{Accessor, Expr, Stmt};
    use crate::resolve::{Resolver, ResolverOptions};

    fn get(name: &str) -> Expr {
        Expr::access(Expr::ident("src"), Accessor::Get, vec![Expr::Str(name.into())])
    }

    #[test]
    fn allocates_then_assigns_fields_in_order() {
        let aliases = AliasMap::new();
        let options = ResolverOptions::default();
        let resolver = Resolver::new(&aliases, &options);
        let shape = TypeShape::record(vec![
            Field::new("Name", TypeShape::named("string")),
            Field::new("Age", TypeShape::named("uint16")),
        ]);
        let res = resolver.resolve("user", &shape, Expr::ident("src"), None).unwrap();

        assert_eq!(res.expr, Expr::ident("user"));
        assert_eq!(
            res.stmts,
            vec![
                Stmt::define("user", Expr::Composite(shape.clone())),
                Stmt::assign(
                    Expr::field(Expr::ident("user"), "Name"),
                    Expr::access(get("Name"), Accessor::String, vec![])
                ),
                Stmt::assign(
                    Expr::field(Expr::ident("user"), "Age"),
                    Expr::cast("uint16", Expr::access(get("Age"), Accessor::Int, vec![]))
                ),
            ]
        );
    }

    #[test]
    fn alias_name_is_used_for_allocation() {
        let point = TypeShape::record(vec![
            Field::new("X", TypeShape::named("float64")),
            Field::new("Y", TypeShape::named("float64")),
        ]);
        let aliases: AliasMap = [("Point", point)].into_iter().collect();
        let options = ResolverOptions::default();
        let resolver = Resolver::new(&aliases, &options);
        let res = resolver
            .resolve("p", &TypeShape::named("Point"), Expr::ident("src"), None)
            .unwrap();
        assert_eq!(
            res.stmts[0],
            Stmt::define("p", Expr::Composite(TypeShape::named("Point")))
        );
        assert_eq!(res.stmts.len(), 3);
    }

    #[test]
    fn supplied_destination_skips_allocation() {
        let aliases = AliasMap::new();
        let options = ResolverOptions::default();
        let resolver = Resolver::new(&aliases, &options);
        let shape = TypeShape::record(vec![Field::new("On", TypeShape::named("bool"))]);
        let dst = Expr::index(Expr::ident("xs"), Expr::ident("xsIdx"));
        let res = resolver
            .resolve("xsElt", &shape, Expr::ident("src"), Some(dst.clone()))
            .unwrap();
        assert_eq!(res.expr, dst);
        assert_eq!(
            res.stmts,
            vec![Stmt::assign(
                Expr::field(dst, "On"),
                Expr::access(get("On"), Accessor::Bool, vec![])
            )]
        );
    }

    #[test]
    fn empty_record_only_allocates() {
        let aliases = AliasMap::new();
        let options = ResolverOptions::default();
        let resolver = Resolver::new(&aliases, &options);
        let res = resolver
            .resolve("unit", &TypeShape::record(vec![]), Expr::ident("src"), None)
            .unwrap();
        assert_eq!(res.stmts.len(), 1);
    }

    #[test]
    fn failing_field_aborts_whole_record() {
        let aliases = AliasMap::new();
        let options = ResolverOptions::default();
        let resolver = Resolver::new(&aliases, &options);
        let shape = TypeShape::record(vec![
            Field::new("Ok", TypeShape::named("int")),
            Field::new("Bad", TypeShape::slice(TypeShape::named("Nope"))),
        ]);
        let err = resolver
            .resolve("r", &shape, Expr::ident("src"), None)
            .unwrap_err();
        let ResolveError::InStructField { field, shape, .. } = &err else {
            panic!("expected struct field context, got {err:?}");
        };
        assert_eq!(field, "Bad");
        assert_eq!(shape, &TypeShape::slice(TypeShape::named("Nope")));
        assert_eq!(
            err.breadcrumbs(),
            vec![
                "unresolved struct field `Bad` type []Nope".to_string(),
                "unresolved array element type Nope".to_string(),
                "unresolved identifier `Nope`".to_string(),
            ]
        );
    }
}
