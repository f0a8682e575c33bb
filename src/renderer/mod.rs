//! Output rendering for the documentation build
//!
//! HTML output defers item rendering: placeholders first become inert marker
//! elements so the prose can go through Markdown conversion, then the markers
//! are swapped for rendered items. Markdown output renders items in place.

pub mod config;
pub mod markdown;

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use minijinja::context;
use regex::Regex;

pub use config::{MarkdownFilter, MarkdownOptions};
pub use markdown::MarkdownRenderer;

use crate::config::Config;
use crate::error::BuildError;
use crate::item::{ItemRegistry, TaggedItem};
use crate::link::TypeLinker;
use crate::place::place;
use crate::template::{load_templates, TemplateEnv, TemplateKind, TemplateSet};

/// Soft line break emitted by Markdown templates
pub const SOFT_BREAK: char = '␤';

/// Output format of a build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Html,
    Markdown,
}

impl FromStr for Format {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(Format::Html),
            "markdown" => Ok(Format::Markdown),
            other => Err(BuildError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// Marker standing in for an item until the HTML pass
pub fn item_marker(name: &str) -> String {
    format!("<div data-item=\"{}\"></div>", name)
}

fn marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<div data-item="([^"]+)"></div>"#).expect("marker pattern is valid"))
}

/// Collapse a trailing pair of line breaks (real or soft) into one newline
pub fn collapse_trailing_break(rendered: &str) -> String {
    let is_break = |c: char| c == '\n' || c == SOFT_BREAK;
    let mut chars = rendered.char_indices().rev();
    match (chars.next(), chars.next()) {
        (Some((_, last)), Some((idx, prev))) if is_break(last) && is_break(prev) => {
            format!("{}\n", &rendered[..idx])
        }
        _ => rendered.to_string(),
    }
}

/// Everything a render pass needs about the documented items
pub struct RenderInput<'a> {
    pub main: &'a str,
    pub registry: &'a ItemRegistry,
    pub linker: Arc<TypeLinker>,
}

/// Render the main template in the configured format
pub fn render_document(config: &Config, input: RenderInput<'_>) -> Result<String, BuildError> {
    let format: Format = config.format.parse()?;
    tracing::debug!(?format, items = input.registry.len(), "rendering document");
    match format {
        Format::Html => render_html(config, input),
        Format::Markdown => render_markdown(config, input),
    }
}

fn render_item(templates: &TemplateSet, name: &str, item: &TaggedItem) -> Result<String, BuildError> {
    templates.render("item", context! { item => item, name => name })
}

fn render_markdown(config: &Config, input: RenderInput<'_>) -> Result<String, BuildError> {
    let env = TemplateEnv {
        prefix: config.prefix(),
        linker: input.linker,
        markdown: None,
        extra: config.env.clone(),
    };
    let templates = load_templates(TemplateKind::Markdown, config, env)?;

    let placed = place(input.main, input.registry, |name, item| {
        Ok(collapse_trailing_break(&render_item(&templates, name, item)?))
    })?;

    Ok(placed.replace(SOFT_BREAK, "\n"))
}

fn render_html(config: &Config, input: RenderInput<'_>) -> Result<String, BuildError> {
    let placed = place(input.main, input.registry, |name, _| Ok(item_marker(name)))?;

    let markdown = Arc::new(MarkdownRenderer::new(
        config.markdown_options.clone(),
        config.markdown_filter.clone(),
    ));
    let env = TemplateEnv {
        prefix: config.prefix(),
        linker: input.linker,
        markdown: Some(Arc::clone(&markdown)),
        extra: config.env.clone(),
    };
    let templates = load_templates(TemplateKind::Html, config, env)?;

    let doc = markdown.convert(&placed);
    resolve_markers(&doc, input.registry, &templates)
}

/// Swap item markers in converted HTML for rendered items
///
/// A marker swallowed by the conversion (inside a code block, or dropped
/// with raw HTML disabled) leaves its item unplaced, which is an error.
fn resolve_markers(doc: &str, registry: &ItemRegistry, templates: &TemplateSet) -> Result<String, BuildError> {
    let mut resolved = HashSet::new();
    let mut out = String::with_capacity(doc.len());
    let mut last = 0;
    for caps in marker_re().captures_iter(doc) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Some(item) = registry.get(name.as_str()) else {
            tracing::warn!(name = name.as_str(), "item marker for undocumented name left as is");
            continue;
        };
        out.push_str(&doc[last..whole.start()]);
        out.push_str(&render_item(templates, name.as_str(), item)?);
        resolved.insert(name.as_str());
        last = whole.end();
    }
    out.push_str(&doc[last..]);

    if let Some(lost) = registry.names().find(|name| !resolved.contains(name)) {
        return Err(BuildError::MissingItem {
            name: lost.to_string(),
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_parse() {
        assert_eq!("html".parse::<Format>().unwrap(), Format::Html);
        assert_eq!("markdown".parse::<Format>().unwrap(), Format::Markdown);
        assert!(matches!(
            "pdf".parse::<Format>(),
            Err(BuildError::UnsupportedFormat { ref format }) if format == "pdf"
        ));
    }

    #[test]
    fn test_collapse_trailing_break() {
        assert_eq!(collapse_trailing_break("a\n\n"), "a\n");
        assert_eq!(collapse_trailing_break("a␤␤"), "a\n");
        assert_eq!(collapse_trailing_break("a\n␤"), "a\n");
        assert_eq!(collapse_trailing_break("a\n"), "a\n");
        assert_eq!(collapse_trailing_break("a\n\n\n"), "a\n\n");
        assert_eq!(collapse_trailing_break("a"), "a");
        assert_eq!(collapse_trailing_break(""), "");
    }

    #[test]
    fn test_item_marker_matches_pattern() {
        let marker = item_marker("widget");
        let caps = marker_re().captures(&marker).unwrap();
        assert_eq!(&caps[1], "widget");
    }
}
