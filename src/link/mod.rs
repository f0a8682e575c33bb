//! Type link resolution
//!
//! A type name cited in a signature is looked up, in order, in the documented
//! items, the quoted-literal rule, the flat imports, the qualified imports and
//! finally the built-in table. Each source is a [`LinkStrategy`]; the first
//! one that does not answer [`LinkOutcome::NotFound`] decides.

pub mod builtins;

use std::collections::HashSet;

use crate::config::{Config, LinkMap};
use crate::error::UnresolvedTypeError;
use crate::item::TypeRef;

/// Where a resolved type points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link {
    /// Anchor id inside the generated document
    Anchor(String),
    /// Absolute URL of external documentation
    External(String),
}

impl Link {
    /// Value for an `href` attribute
    pub fn href(&self) -> String {
        match self {
            Link::Anchor(id) => format!("#{}", id),
            Link::External(url) => url.clone(),
        }
    }
}

/// Result of asking one source about a type name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    Linked(Link),
    /// Known not to be linkable, such as a string literal type
    Unlinkable,
    NotFound,
}

/// One source of type links
pub trait LinkStrategy: Send + Sync {
    fn resolve(&self, name: &str) -> LinkOutcome;
}

/// Names documented anywhere in the build link to their anchor
pub struct DocumentedNames {
    names: HashSet<String>,
    prefix: String,
}

impl DocumentedNames {
    pub fn new(names: impl IntoIterator<Item = String>, prefix: impl Into<String>) -> Self {
        Self {
            names: names.into_iter().collect(),
            prefix: prefix.into(),
        }
    }
}

impl LinkStrategy for DocumentedNames {
    fn resolve(&self, name: &str) -> LinkOutcome {
        if self.names.contains(name) {
            LinkOutcome::Linked(Link::Anchor(format!("{}{}", self.prefix, name)))
        } else {
            LinkOutcome::NotFound
        }
    }
}

/// Quoted names are literal types
pub struct LiteralTypes;

impl LinkStrategy for LiteralTypes {
    fn resolve(&self, name: &str) -> LinkOutcome {
        if name.starts_with('"') {
            LinkOutcome::Unlinkable
        } else {
            LinkOutcome::NotFound
        }
    }
}

/// Exact-name lookup in a list of tables, first table wins
pub struct FlatImports {
    tables: Vec<LinkMap>,
}

impl FlatImports {
    pub fn new(tables: Vec<LinkMap>) -> Self {
        Self { tables }
    }
}

impl LinkStrategy for FlatImports {
    fn resolve(&self, name: &str) -> LinkOutcome {
        self.tables
            .iter()
            .find_map(|table| table.get(name))
            .map_or(LinkOutcome::NotFound, |url| {
                LinkOutcome::Linked(Link::External(url.clone()))
            })
    }
}

/// Dotted names whose namespace prefix has its own table
pub struct QualifiedImports {
    namespaces: Vec<(String, LinkMap)>,
}

impl QualifiedImports {
    pub fn new(namespaces: impl IntoIterator<Item = (String, LinkMap)>) -> Self {
        Self {
            namespaces: namespaces.into_iter().collect(),
        }
    }
}

impl LinkStrategy for QualifiedImports {
    fn resolve(&self, name: &str) -> LinkOutcome {
        for (prefix, table) in &self.namespaces {
            let inner = name
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix('.'));
            if let Some(url) = inner.and_then(|inner| table.get(inner)) {
                return LinkOutcome::Linked(Link::External(url.clone()));
            }
        }
        LinkOutcome::NotFound
    }
}

/// Language built-ins
pub struct BuiltinTypes;

impl LinkStrategy for BuiltinTypes {
    fn resolve(&self, name: &str) -> LinkOutcome {
        builtins::builtin_link(name).map_or(LinkOutcome::NotFound, |url| {
            LinkOutcome::Linked(Link::External(url))
        })
    }
}

/// Ordered resolver plus the failure policy for unresolved names
pub struct TypeLinker {
    strategies: Vec<Box<dyn LinkStrategy>>,
    allow_unresolved: bool,
}

impl TypeLinker {
    /// Build the standard chain from configuration and the documented names
    pub fn from_config<I>(config: &Config, documented: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let strategies: Vec<Box<dyn LinkStrategy>> = vec![
            Box::new(DocumentedNames::new(documented, config.prefix())),
            Box::new(LiteralTypes),
            Box::new(FlatImports::new(config.import_tables())),
            Box::new(QualifiedImports::new(config.qualified_imports.clone())),
            Box::new(BuiltinTypes),
        ];
        Self::new(strategies).with_allow_unresolved(config.allow_unresolved_types)
    }

    pub fn new(strategies: Vec<Box<dyn LinkStrategy>>) -> Self {
        Self {
            strategies,
            allow_unresolved: false,
        }
    }

    pub fn with_allow_unresolved(mut self, allow: bool) -> Self {
        self.allow_unresolved = allow;
        self
    }

    /// First decisive answer of the chain
    pub fn resolve(&self, name: &str) -> LinkOutcome {
        self.strategies
            .iter()
            .map(|s| s.resolve(name))
            .find(|outcome| *outcome != LinkOutcome::NotFound)
            .unwrap_or(LinkOutcome::NotFound)
    }

    /// Resolve a cited type, applying the unresolved-type policy
    ///
    /// `NotFound` is only returned when unresolved types are allowed.
    pub fn link_type(&self, ty: &TypeRef) -> Result<LinkOutcome, UnresolvedTypeError> {
        match self.resolve(&ty.name) {
            LinkOutcome::NotFound if !self.allow_unresolved => Err(UnresolvedTypeError {
                name: ty.name.clone(),
                loc: ty.loc.clone(),
            }),
            outcome => Ok(outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Loc;
    use std::path::PathBuf;

    fn table(entries: &[(&str, &str)]) -> LinkMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn linker(config: &Config) -> TypeLinker {
        TypeLinker::from_config(config, ["Widget".to_string(), "string".to_string()])
    }

    #[test]
    fn test_documented_name_links_to_anchor() {
        let config = Config::default().with_name("ui");
        assert_eq!(
            linker(&config).resolve("Widget"),
            LinkOutcome::Linked(Link::Anchor("ui.Widget".to_string()))
        );
    }

    #[test]
    fn test_documented_names_shadow_builtins() {
        let config = Config::default().with_anchor_prefix("");
        assert_eq!(
            linker(&config).resolve("string"),
            LinkOutcome::Linked(Link::Anchor("string".to_string()))
        );
    }

    #[test]
    fn test_quoted_name_is_unlinkable() {
        let config = Config::default();
        assert_eq!(linker(&config).resolve("\"auto\""), LinkOutcome::Unlinkable);
    }

    #[test]
    fn test_first_flat_import_wins() {
        let config = Config::default()
            .with_import(table(&[("Stream", "https://a.example/stream")]))
            .with_import(table(&[("Stream", "https://b.example/stream")]));
        assert_eq!(
            linker(&config).resolve("Stream"),
            LinkOutcome::Linked(Link::External("https://a.example/stream".to_string()))
        );
    }

    #[test]
    fn test_flat_import_shadows_builtin() {
        let config = Config::default().with_import(table(&[("Array", "https://mine.example/array")]));
        assert_eq!(
            linker(&config).resolve("Array"),
            LinkOutcome::Linked(Link::External("https://mine.example/array".to_string()))
        );
    }

    #[test]
    fn test_qualified_import() {
        let config = Config::default()
            .with_qualified_import("foo", table(&[("bar", "https://foo.example/bar")]));
        let linker = linker(&config);
        assert_eq!(
            linker.resolve("foo.bar"),
            LinkOutcome::Linked(Link::External("https://foo.example/bar".to_string()))
        );
        assert_eq!(linker.resolve("foo.baz"), LinkOutcome::NotFound);
        assert_eq!(linker.resolve("foobar"), LinkOutcome::NotFound);
        assert_eq!(linker.resolve("bar"), LinkOutcome::NotFound);
    }

    #[test]
    fn test_qualified_prefix_needs_dot_boundary() {
        let config = Config::default()
            .with_qualified_import("foo", table(&[("xbar", "https://foo.example/xbar")]));
        assert_eq!(linker(&config).resolve("fooxbar"), LinkOutcome::NotFound);
    }

    #[test]
    fn test_builtin_fallback() {
        let config = Config::default();
        assert!(matches!(
            linker(&config).resolve("Array"),
            LinkOutcome::Linked(Link::External(url)) if url.contains("developer.mozilla.org")
        ));
    }

    #[test]
    fn test_unresolved_is_error_by_default() {
        let config = Config::default();
        let ty = TypeRef::new("Gizmo").with_loc(Loc {
            file: PathBuf::from("src/gizmo.js"),
            line: 7,
            column: None,
        });
        let err = linker(&config).link_type(&ty).unwrap_err();
        assert_eq!(err.name, "Gizmo");
        assert_eq!(err.to_string(), "unknown type 'Gizmo' at src/gizmo.js:7");
    }

    #[test]
    fn test_unresolved_allowed_passes_through() {
        let config = Config::default().with_allow_unresolved_types(true);
        assert_eq!(
            linker(&config).link_type(&TypeRef::new("Gizmo")).unwrap(),
            LinkOutcome::NotFound
        );
    }

    #[test]
    fn test_unlinkable_never_errors() {
        let config = Config::default();
        assert_eq!(
            linker(&config).link_type(&TypeRef::new("\"a\"")).unwrap(),
            LinkOutcome::Unlinkable
        );
    }

    #[test]
    fn test_href() {
        assert_eq!(Link::Anchor("ui.Widget".to_string()).href(), "#ui.Widget");
        assert_eq!(
            Link::External("https://x.example".to_string()).href(),
            "https://x.example"
        );
    }
}
