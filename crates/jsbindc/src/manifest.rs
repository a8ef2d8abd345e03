use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use jsbind_common::syntax::{parse_type, ShapeParseError};
use jsbind_common::{AliasMap, Param, Signature};
use jsbind_gen::ResolverOptions;

/// A parsed jsbind.toml manifest, before type expressions are read.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    pub package: Package,
    #[serde(default)]
    pub options: Options,
    /// Alias name -> type expression.
    #[serde(default)]
    pub types: BTreeMap<String, String>,
    #[serde(default, rename = "function")]
    pub functions: Vec<FunctionDecl>,
}

/// Package metadata from the [package] section.
#[derive(Debug, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Naming options for generated code. Unset values use the resolver defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Options {
    #[serde(default)]
    pub args: Option<String>,
    #[serde(default)]
    pub runtime: Option<String>,
    #[serde(default)]
    pub kind_var: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
}

#[derive(Debug, Deserialize)]
pub struct ParamDecl {
    /// Empty or `_` for unnamed parameters.
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// Where a type expression came from, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeOrigin {
    Alias(String),
    Param {
        function: String,
        index: usize,
        name: String,
    },
}

impl std::fmt::Display for TypeOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeOrigin::Alias(name) => write!(f, "type alias `{}`", name),
            TypeOrigin::Param {
                function,
                index,
                name,
            } if name.is_empty() || name == "_" => {
                write!(f, "parameter {} of `{}`", index, function)
            }
            TypeOrigin::Param { function, name, .. } => {
                write!(f, "parameter `{}` of `{}`", name, function)
            }
        }
    }
}

/// A type expression in the manifest that could not be read.
#[derive(Debug, Clone)]
pub struct TypeTextError {
    pub origin: TypeOrigin,
    pub text: String,
    pub error: ShapeParseError,
}

/// A manifest with every type expression read into a shape.
#[derive(Debug)]
pub struct Project {
    pub name: String,
    pub options: ResolverOptions,
    pub aliases: AliasMap,
    pub signatures: Vec<Signature>,
}

impl Manifest {
    /// Read and parse a jsbind.toml manifest from a file path.
    pub fn from_file(path: &Path) -> Result<Manifest, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_str(&content)
    }

    /// Parse a jsbind.toml manifest from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Manifest, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse manifest: {}", e))
    }

    pub fn resolver_options(&self) -> ResolverOptions {
        let defaults = ResolverOptions::default();
        ResolverOptions {
            args_ident: self.options.args.clone().unwrap_or(defaults.args_ident),
            runtime_pkg: self.options.runtime.clone().unwrap_or(defaults.runtime_pkg),
            kind_var: self.options.kind_var.clone().unwrap_or(defaults.kind_var),
        }
    }

    /// Read every type expression. All bad expressions are reported, not
    /// just the first one.
    pub fn lower(&self) -> Result<Project, Vec<TypeTextError>> {
        let mut errors = Vec::new();
        let mut aliases = AliasMap::new();

        for (name, text) in &self.types {
            match parse_type(text) {
                Ok(shape) => {
                    aliases.insert(name.as_str(), shape);
                }
                Err(error) => errors.push(TypeTextError {
                    origin: TypeOrigin::Alias(name.clone()),
                    text: text.clone(),
                    error,
                }),
            }
        }

        let mut signatures = Vec::with_capacity(self.functions.len());
        for func in &self.functions {
            let mut params = Vec::with_capacity(func.params.len());
            for (index, param) in func.params.iter().enumerate() {
                match parse_type(&param.ty) {
                    Ok(shape) => params.push(Param::new(param.name.as_str(), shape)),
                    Err(error) => errors.push(TypeTextError {
                        origin: TypeOrigin::Param {
                            function: func.name.clone(),
                            index,
                            name: param.name.clone(),
                        },
                        text: param.ty.clone(),
                        error,
                    }),
                }
            }
            signatures.push(Signature::new(func.name.as_str(), params));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Project {
            name: self.package.name.clone(),
            options: self.resolver_options(),
            aliases,
            signatures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsbind_common::syntax::ShapeParseErrorKind;
    use jsbind_common::{AliasTable, TypeShape};

    const GEOMETRY: &str = r#"
[package]
name = "geometry"
description = "Vector helpers"

[options]
args = "inputs"
kind-var = "kind"

[types]
Point = "struct { X, Y float64 }"
Path = "[]Point"

[[function]]
name = "Distance"
params = [{ name = "a", type = "Point" }, { name = "b", type = "*Point" }]

[[function]]
name = "Length"
params = [{ name = "p", type = "Path" }]
"#;

    #[test]
    fn parse_full_manifest() {
        let manifest = Manifest::from_str(GEOMETRY).unwrap();
        assert_eq!(manifest.package.name, "geometry");
        assert_eq!(manifest.package.description.as_deref(), Some("Vector helpers"));

        // BTreeMap is sorted by key
        let keys: Vec<&String> = manifest.types.keys().collect();
        assert_eq!(keys, vec!["Path", "Point"]);

        assert_eq!(manifest.functions.len(), 2);
        assert_eq!(manifest.functions[0].name, "Distance");
        assert_eq!(manifest.functions[0].params[1].ty, "*Point");
    }

    #[test]
    fn parse_minimal_manifest() {
        let toml = r#"
[package]
name = "minimal"
"#;
        let manifest = Manifest::from_str(toml).unwrap();
        assert!(manifest.types.is_empty());
        assert!(manifest.functions.is_empty());
        assert_eq!(manifest.resolver_options(), ResolverOptions::default());
    }

    #[test]
    fn partial_options_keep_defaults() {
        let manifest = Manifest::from_str(GEOMETRY).unwrap();
        let options = manifest.resolver_options();
        assert_eq!(options.args_ident, "inputs");
        assert_eq!(options.runtime_pkg, "js");
        assert_eq!(options.kind_var, "kind");
    }

    #[test]
    fn missing_package_is_rejected() {
        let err = Manifest::from_str("[types]\nA = \"int\"\n").unwrap_err();
        assert!(err.starts_with("Failed to parse manifest"), "got: {err}");
    }

    #[test]
    fn param_without_type_is_rejected() {
        let toml = r#"
[package]
name = "bad"

[[function]]
name = "F"
params = [{ name = "a" }]
"#;
        assert!(Manifest::from_str(toml).is_err());
    }

    #[test]
    fn lower_reads_aliases_and_signatures() {
        let project = Manifest::from_str(GEOMETRY).unwrap().lower().unwrap();
        assert_eq!(project.name, "geometry");
        assert_eq!(project.aliases.len(), 2);
        assert_eq!(
            project.aliases.lookup("Path").unwrap(),
            &TypeShape::slice(TypeShape::named("Point"))
        );
        assert_eq!(project.signatures[0].name, "Distance");
        assert_eq!(
            project.signatures[0].params[1].shape,
            TypeShape::optional(TypeShape::named("Point"))
        );
    }

    #[test]
    fn lower_collects_every_bad_type() {
        let toml = r#"
[package]
name = "bad"

[types]
Lookup = "map[string]int"
Ok = "[]int"

[[function]]
name = "F"
params = [{ name = "cb", type = "func()" }, { name = "_", type = "[x]int" }]
"#;
        let errors = Manifest::from_str(toml).unwrap().lower().unwrap_err();
        assert_eq!(errors.len(), 3);

        assert_eq!(errors[0].origin, TypeOrigin::Alias("Lookup".into()));
        assert!(matches!(
            errors[0].error.kind,
            ShapeParseErrorKind::UnrecognizedShape(_)
        ));
        assert_eq!(errors[1].origin.to_string(), "parameter `cb` of `F`");
        assert_eq!(errors[2].origin.to_string(), "parameter 1 of `F`");
        assert_eq!(errors[2].text, "[x]int");
    }
}
