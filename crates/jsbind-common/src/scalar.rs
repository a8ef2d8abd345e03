//! Built-in scalar names and how each is read from a dynamic value.

use serde::Serialize;

/// Which dynamic-value accessor produces a scalar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ScalarAccess {
    Bool,
    String,
    Int,
    Float,
}

/// A built-in scalar type name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Scalar {
    name: &'static str,
    access: ScalarAccess,
}

const SCALARS: &[Scalar] = &[
    Scalar { name: "bool", access: ScalarAccess::Bool },
    Scalar { name: "string", access: ScalarAccess::String },
    Scalar { name: "int", access: ScalarAccess::Int },
    Scalar { name: "int8", access: ScalarAccess::Int },
    Scalar { name: "int16", access: ScalarAccess::Int },
    Scalar { name: "int32", access: ScalarAccess::Int },
    Scalar { name: "rune", access: ScalarAccess::Int },
    Scalar { name: "int64", access: ScalarAccess::Int },
    Scalar { name: "uint", access: ScalarAccess::Int },
    Scalar { name: "uint8", access: ScalarAccess::Int },
    Scalar { name: "byte", access: ScalarAccess::Int },
    Scalar { name: "uint16", access: ScalarAccess::Int },
    Scalar { name: "uint32", access: ScalarAccess::Int },
    Scalar { name: "uint64", access: ScalarAccess::Int },
    Scalar { name: "uintptr", access: ScalarAccess::Int },
    Scalar { name: "float32", access: ScalarAccess::Float },
    Scalar { name: "float64", access: ScalarAccess::Float },
];

impl Scalar {
    /// Look up a built-in scalar by type name. Returns `None` for anything
    /// that must go through the alias table.
    pub fn from_name(name: &str) -> Option<Scalar> {
        SCALARS.iter().copied().find(|s| s.name == name)
    }

    pub fn access(&self) -> ScalarAccess {
        self.access
    }

    /// The cast applied to the accessor's result, if any.
    ///
    /// The integer accessor yields `int` and the float accessor yields
    /// `float64`; every other width is narrowed to its exact name.
    pub fn narrowing_cast(&self) -> Option<&'static str> {
        match (self.access, self.name) {
            (ScalarAccess::Int, "int") | (ScalarAccess::Float, "float64") => None,
            (ScalarAccess::Int | ScalarAccess::Float, name) => Some(name),
            (ScalarAccess::Bool | ScalarAccess::String, _) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_family_reads_int() {
        for name in ["int", "int8", "rune", "byte", "uint64", "uintptr"] {
            let scalar = Scalar::from_name(name).unwrap();
            assert_eq!(scalar.access(), ScalarAccess::Int, "{name}");
        }
    }

    #[test]
    fn default_widths_skip_cast() {
        assert_eq!(Scalar::from_name("int").unwrap().narrowing_cast(), None);
        assert_eq!(Scalar::from_name("float64").unwrap().narrowing_cast(), None);
        assert_eq!(
            Scalar::from_name("int32").unwrap().narrowing_cast(),
            Some("int32")
        );
        assert_eq!(
            Scalar::from_name("float32").unwrap().narrowing_cast(),
            Some("float32")
        );
        assert_eq!(Scalar::from_name("string").unwrap().narrowing_cast(), None);
    }

    #[test]
    fn unknown_names_are_not_scalars() {
        assert!(Scalar::from_name("Point").is_none());
        assert!(Scalar::from_name("complex128").is_none());
        assert!(Scalar::from_name("Int").is_none());
    }
}
