//! Build configuration
//!
//! A [`Config`] can be assembled in code with the `with_*` builders or loaded
//! from a TOML file:
//!
//! ```toml
//! main = "doc/main.md"
//! name = "mylib"
//! format = "markdown"
//! imports = ["browser", { Stream = "https://nodejs.org/api/stream.html" }]
//!
//! [qualified_imports.model]
//! Node = "https://example.com/model#Node"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::BuildError;
use crate::link::builtins;
use crate::renderer::{MarkdownFilter, MarkdownOptions};

/// A flat type name -> URL table
pub type LinkMap = IndexMap<String, String>;

/// One entry of `imports`: an inline table or a bundled set by name
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ImportSet {
    Bundled(String),
    Inline(LinkMap),
}

impl ImportSet {
    /// Expand into a concrete table; unknown bundle names yield `None`
    pub fn resolve(&self) -> Option<LinkMap> {
        match self {
            ImportSet::Inline(map) => Some(map.clone()),
            ImportSet::Bundled(name) => builtins::bundled_imports(name),
        }
    }
}

/// Configuration for one documentation build
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Main template with `@name` placeholder lines
    pub main: PathBuf,
    /// Module name, used as the anchor namespace
    pub name: String,
    /// Overrides `name + "."` as the anchor prefix
    pub anchor_prefix: Option<String>,
    /// `html` or `markdown`
    pub format: String,
    /// Directory whose templates shadow the built-in ones
    pub templates: Option<PathBuf>,
    /// Reader output used when no data is passed to the build
    pub items: Option<PathBuf>,
    pub markdown_options: MarkdownOptions,
    #[serde(skip)]
    pub markdown_filter: Option<MarkdownFilter>,
    pub imports: Vec<ImportSet>,
    pub qualified_imports: IndexMap<String, LinkMap>,
    pub allow_unresolved_types: bool,
    /// Extra template globals; these win over the built-in ones
    pub env: BTreeMap<String, serde_json::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            main: PathBuf::new(),
            name: String::new(),
            anchor_prefix: None,
            format: "html".to_string(),
            templates: None,
            items: None,
            markdown_options: MarkdownOptions::default(),
            markdown_filter: None,
            imports: Vec::new(),
            qualified_imports: IndexMap::new(),
            allow_unresolved_types: false,
            env: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Create a configuration for the given main template
    pub fn new(main: impl Into<PathBuf>) -> Self {
        Self {
            main: main.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    ///
    /// Relative `main`, `templates` and `items` paths are taken relative to
    /// the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, BuildError> {
        let content = std::fs::read_to_string(path).map_err(|e| BuildError::io(path, e))?;
        let mut config = Self::from_str(&content)?;
        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        Ok(config)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, BuildError> {
        Ok(toml::from_str(content)?)
    }

    fn rebase(&mut self, base: &Path) {
        let join = |p: &Path| {
            if p.is_relative() {
                base.join(p)
            } else {
                p.to_path_buf()
            }
        };
        self.main = join(&self.main);
        self.templates = self.templates.as_deref().map(join);
        self.items = self.items.as_deref().map(join);
    }

    /// The anchor namespace: `anchor_prefix`, or `name` followed by a dot
    pub fn prefix(&self) -> String {
        match &self.anchor_prefix {
            Some(prefix) => prefix.clone(),
            None => format!("{}.", self.name),
        }
    }

    /// Flat import tables in configured order, bundled sets expanded
    pub fn import_tables(&self) -> Vec<LinkMap> {
        self.imports
            .iter()
            .filter_map(|set| {
                let table = set.resolve();
                if table.is_none() {
                    tracing::warn!(?set, "ignoring unknown bundled import set");
                }
                table
            })
            .collect()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_anchor_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.anchor_prefix = Some(prefix.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_templates(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates = Some(dir.into());
        self
    }

    pub fn with_items(mut self, path: impl Into<PathBuf>) -> Self {
        self.items = Some(path.into());
        self
    }

    pub fn with_markdown_options(mut self, options: MarkdownOptions) -> Self {
        self.markdown_options = options;
        self
    }

    pub fn with_markdown_filter(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.markdown_filter = Some(MarkdownFilter::new(f));
        self
    }

    /// Append a flat import table
    pub fn with_import(mut self, table: LinkMap) -> Self {
        self.imports.push(ImportSet::Inline(table));
        self
    }

    /// Register a table for dotted names under `prefix`
    pub fn with_qualified_import(mut self, prefix: impl Into<String>, table: LinkMap) -> Self {
        self.qualified_imports.insert(prefix.into(), table);
        self
    }

    pub fn with_allow_unresolved_types(mut self, allow: bool) -> Self {
        self.allow_unresolved_types = allow;
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.env.insert(key.into(), value);
        self
    }
}
