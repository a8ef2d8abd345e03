//! The alias table: user-defined type names mapped to their shapes.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::shape::TypeShape;

/// Returned by [`AliasTable::lookup`] when a name has no entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasNotFound {
    pub name: String,
}

impl fmt::Display for AliasNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type `{}` not found", self.name)
    }
}

impl std::error::Error for AliasNotFound {}

/// Read-only lookup of non-scalar type names.
///
/// The table is fully populated before resolution starts; the resolver only
/// ever reads from it, possibly from several threads.
pub trait AliasTable: Sync {
    fn lookup(&self, name: &str) -> Result<&TypeShape, AliasNotFound>;
}

/// Hash-map backed alias table.
#[derive(Clone, Debug, Default)]
pub struct AliasMap {
    entries: FxHashMap<String, TypeShape>,
}

impl AliasMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` as an alias of `shape`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, shape: TypeShape) -> Option<TypeShape> {
        self.entries.insert(name.into(), shape)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AliasTable for AliasMap {
    fn lookup(&self, name: &str) -> Result<&TypeShape, AliasNotFound> {
        self.entries.get(name).ok_or_else(|| AliasNotFound {
            name: name.to_string(),
        })
    }
}

impl<S: Into<String>> FromIterator<(S, TypeShape)> for AliasMap {
    fn from_iter<I: IntoIterator<Item = (S, TypeShape)>>(iter: I) -> Self {
        AliasMap {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_hit_and_miss() {
        let table: AliasMap = [("UserId", TypeShape::named("int64"))].into_iter().collect();
        assert_eq!(table.lookup("UserId").unwrap(), &TypeShape::named("int64"));

        let err = table.lookup("Missing").unwrap_err();
        assert_eq!(err.name, "Missing");
        assert_eq!(err.to_string(), "type `Missing` not found");
    }

    #[test]
    fn insert_replaces() {
        let mut table = AliasMap::new();
        assert!(table.is_empty());
        assert!(table.insert("A", TypeShape::named("int")).is_none());
        let old = table.insert("A", TypeShape::named("bool"));
        assert_eq!(old, Some(TypeShape::named("int")));
        assert_eq!(table.len(), 1);
    }
}
