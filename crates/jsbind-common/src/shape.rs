//! Type shapes: the closed description of a native value's structure.
//!
//! A `TypeShape` drives resolution. It is built once per parameter (by the
//! type-expression reader or by hand) and never mutated afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Length of a sequence shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeqLen {
    /// A fixed compile-time length (`[N]T`).
    Fixed(u64),
    /// Unknown until conversion time (`[]T`).
    Dynamic,
}

/// A named field of a record shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub shape: TypeShape,
}

impl Field {
    pub fn new(name: impl Into<String>, shape: TypeShape) -> Self {
        Field { name: name.into(), shape }
    }
}

/// The shape of a native type.
///
/// - `Named`: a built-in scalar (`int32`, `string`, ...) or an alias name
/// - `Optional`: a pointer that may be left nil (`*T`)
/// - `Sequence`: a fixed array or a slice (`[N]T`, `[]T`)
/// - `Record`: an anonymous struct with ordered fields
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeShape {
    Named(String),
    Optional(Box<TypeShape>),
    Sequence { elem: Box<TypeShape>, len: SeqLen },
    Record(Vec<Field>),
}

impl TypeShape {
    pub fn named(name: impl Into<String>) -> TypeShape {
        TypeShape::Named(name.into())
    }

    pub fn optional(inner: TypeShape) -> TypeShape {
        TypeShape::Optional(Box::new(inner))
    }

    /// A dynamically-sized sequence (`[]T`).
    pub fn slice(elem: TypeShape) -> TypeShape {
        TypeShape::Sequence {
            elem: Box::new(elem),
            len: SeqLen::Dynamic,
        }
    }

    /// A fixed-size sequence (`[len]T`).
    pub fn array(elem: TypeShape, len: u64) -> TypeShape {
        TypeShape::Sequence {
            elem: Box::new(elem),
            len: SeqLen::Fixed(len),
        }
    }

    pub fn record(fields: Vec<Field>) -> TypeShape {
        TypeShape::Record(fields)
    }
}

/// Renders Go type syntax, e.g. `*[]string` or `struct { X float64; Y float64 }`.
impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeShape::Named(name) => write!(f, "{}", name),
            TypeShape::Optional(inner) => write!(f, "*{}", inner),
            TypeShape::Sequence {
                elem,
                len: SeqLen::Dynamic,
            } => write!(f, "[]{}", elem),
            TypeShape::Sequence {
                elem,
                len: SeqLen::Fixed(n),
            } => write!(f, "[{}]{}", n, elem),
            TypeShape::Record(fields) if fields.is_empty() => write!(f, "struct{{}}"),
            TypeShape::Record(fields) => {
                write!(f, "struct {{ ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{} {}", field.name, field.shape)?;
                }
                write!(f, " }}")
            }
        }
    }
}

/// A function parameter: binding name plus declared shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub shape: TypeShape,
}

impl Param {
    pub fn new(name: impl Into<String>, shape: TypeShape) -> Self {
        Param { name: name.into(), shape }
    }
}

/// A target function: its name and ordered parameter list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub params: Vec<Param>,
}

impl Signature {
    pub fn new(name: impl Into<String>, params: Vec<Param>) -> Self {
        Signature { name: name.into(), params }
    }
}
