//! Per-build store of named template definitions

use std::path::Path;

use minijinja::{AutoEscape, Environment};
use serde::Serialize;

use crate::error::BuildError;

/// Built-in HTML definitions, loaded after any user directory
const HTML_DEFAULTS: &[(&str, &str)] = &[
    ("item", include_str!("../../templates/html/item.html")),
    ("type", include_str!("../../templates/html/type.html")),
    ("fields", include_str!("../../templates/html/fields.html")),
];

/// Built-in Markdown definitions
const MARKDOWN_DEFAULTS: &[(&str, &str)] = &[
    ("item", include_str!("../../templates/markdown/item.md")),
    ("type", include_str!("../../templates/markdown/type.md")),
];

/// Which family of templates a set holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Html,
    Markdown,
}

impl TemplateKind {
    /// File extension of template files for this kind
    pub fn extension(self) -> &'static str {
        match self {
            TemplateKind::Html => "html",
            TemplateKind::Markdown => "md",
        }
    }

    fn defaults(self) -> &'static [(&'static str, &'static str)] {
        match self {
            TemplateKind::Html => HTML_DEFAULTS,
            TemplateKind::Markdown => MARKDOWN_DEFAULTS,
        }
    }
}

/// Named template definitions for one build
///
/// A name, once defined, is never replaced: loading a user directory before
/// the defaults lets it shadow them.
pub struct TemplateSet {
    env: Environment<'static>,
    kind: TemplateKind,
}

impl TemplateSet {
    /// Create an empty set
    pub fn new(kind: TemplateKind) -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_auto_escape_callback(move |_| match kind {
            TemplateKind::Html => AutoEscape::Html,
            TemplateKind::Markdown => AutoEscape::None,
        });
        Self { env, kind }
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    /// Check if a definition exists
    pub fn contains(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    /// Add a definition unless the name is taken
    ///
    /// Returns whether the definition was added.
    pub fn define(&mut self, name: &str, source: &str) -> Result<bool, BuildError> {
        if self.contains(name) {
            return Ok(false);
        }
        self.env
            .add_template_owned(name.to_string(), source.trim().to_string())?;
        Ok(true)
    }

    /// Define every `<name>.<ext>` file of `dir`, in file name order
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, BuildError> {
        let entries = std::fs::read_dir(dir).map_err(|e| BuildError::io(dir, e))?;
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| BuildError::io(dir, e))?;
            paths.push(entry.path());
        }
        paths.sort();

        let mut added = 0;
        for path in paths {
            if path.extension().and_then(|e| e.to_str()) != Some(self.kind.extension()) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let source = std::fs::read_to_string(&path).map_err(|e| BuildError::io(&path, e))?;
            if self.define(name, &source)? {
                added += 1;
            } else {
                tracing::debug!(name, path = %path.display(), "template already defined, skipping");
            }
        }
        tracing::debug!(dir = %dir.display(), added, "loaded template directory");
        Ok(added)
    }

    /// Define the built-in templates that are still missing
    pub fn load_defaults(&mut self) -> Result<(), BuildError> {
        for (name, source) in self.kind.defaults() {
            self.define(name, source)?;
        }
        Ok(())
    }

    /// Render a definition with the given context
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, BuildError> {
        let template = self.env.get_template(name)?;
        Ok(template.render(ctx)?)
    }

    pub(crate) fn env_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}
