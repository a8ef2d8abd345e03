//! Resolution errors with a breadcrumb trail.
//!
//! Leaf failures (`UnresolvedIdentifier`, `RecursiveAlias`) are wrapped by
//! every composite level they pass through, so the outermost error reads as a
//! path from the argument down to the root cause.

use std::fmt;

use serde::Serialize;

use crate::shape::TypeShape;

/// A failure to resolve a type shape into conversion code.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ResolveError {
    /// A non-scalar type name has no alias table entry.
    UnresolvedIdentifier { name: String },
    /// An alias expands (directly or through other shapes) into itself.
    RecursiveAlias { chain: Vec<String> },
    /// The pointee of an optional could not be resolved.
    InPointerElement {
        elem: TypeShape,
        source: Box<ResolveError>,
    },
    /// The element of a sequence could not be resolved.
    InArrayElement {
        elem: TypeShape,
        source: Box<ResolveError>,
    },
    /// A record field could not be resolved.
    InStructField {
        field: String,
        shape: TypeShape,
        source: Box<ResolveError>,
    },
    /// A function parameter could not be resolved.
    UnresolvedArgument {
        index: usize,
        name: String,
        shape: TypeShape,
        source: Box<ResolveError>,
    },
}

impl ResolveError {
    /// The wrapped child error, if this is a context layer.
    pub fn child(&self) -> Option<&ResolveError> {
        match self {
            ResolveError::UnresolvedIdentifier { .. } | ResolveError::RecursiveAlias { .. } => None,
            ResolveError::InPointerElement { source, .. }
            | ResolveError::InArrayElement { source, .. }
            | ResolveError::InStructField { source, .. }
            | ResolveError::UnresolvedArgument { source, .. } => Some(source),
        }
    }

    /// The innermost error of the chain.
    pub fn root_cause(&self) -> &ResolveError {
        let mut err = self;
        while let Some(child) = err.child() {
            err = child;
        }
        err
    }

    /// One short label per context layer, outermost first, ending with the
    /// root cause.
    pub fn breadcrumbs(&self) -> Vec<String> {
        let mut crumbs = Vec::new();
        let mut err = Some(self);
        while let Some(e) = err {
            crumbs.push(e.label());
            err = e.child();
        }
        crumbs
    }

    fn label(&self) -> String {
        match self {
            ResolveError::UnresolvedIdentifier { name } => format!("unresolved identifier `{}`", name),
            ResolveError::RecursiveAlias { chain } => {
                format!("recursive type alias {}", chain.join(" -> "))
            }
            ResolveError::InPointerElement { elem, .. } => {
                format!("unresolved pointer element type {}", elem)
            }
            ResolveError::InArrayElement { elem, .. } => {
                format!("unresolved array element type {}", elem)
            }
            ResolveError::InStructField { field, shape, .. } => {
                format!("unresolved struct field `{}` type {}", field, shape)
            }
            ResolveError::UnresolvedArgument {
                index, name, shape, ..
            } => format!("unresolved argument {} \"{}\" type {}", index, name, shape),
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.breadcrumbs().join(": "))
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.child().map(|c| c as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> ResolveError {
        ResolveError::UnresolvedArgument {
            index: 1,
            name: "items".into(),
            shape: TypeShape::optional(TypeShape::slice(TypeShape::named("Item"))),
            source: Box::new(ResolveError::InPointerElement {
                elem: TypeShape::slice(TypeShape::named("Item")),
                source: Box::new(ResolveError::InArrayElement {
                    elem: TypeShape::named("Item"),
                    source: Box::new(ResolveError::UnresolvedIdentifier {
                        name: "Item".into(),
                    }),
                }),
            }),
        }
    }

    #[test]
    fn display_reads_outermost_first() {
        assert_eq!(
            nested().to_string(),
            "unresolved argument 1 \"items\" type *[]Item: \
             unresolved pointer element type []Item: \
             unresolved array element type Item: \
             unresolved identifier `Item`"
        );
    }

    #[test]
    fn root_cause_and_breadcrumbs() {
        let err = nested();
        assert_eq!(
            err.root_cause(),
            &ResolveError::UnresolvedIdentifier {
                name: "Item".into()
            }
        );
        assert_eq!(err.breadcrumbs().len(), 4);
    }

    #[test]
    fn std_error_source_chain() {
        use std::error::Error;
        let err = nested();
        let mut depth = 0;
        let mut cur: Option<&dyn Error> = Some(&err);
        while let Some(e) = cur {
            depth += 1;
            cur = e.source();
        }
        assert_eq!(depth, 4);
    }

    #[test]
    fn recursive_alias_label() {
        let err = ResolveError::RecursiveAlias {
            chain: vec!["Node".into(), "Node".into()],
        };
        assert_eq!(err.to_string(), "recursive type alias Node -> Node");
        assert!(err.child().is_none());
    }
}
