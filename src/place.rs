//! Placement of rendered items into the main template
//!
//! A placeholder is a line consisting of `@` followed by an item name. Every
//! placeholder must name a documented item, no name may be placed twice, and
//! every documented item must be placed somewhere.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{BuildError, Span};
use crate::item::{ItemRegistry, TaggedItem};

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^@([A-Za-z0-9_]+)$").expect("placeholder pattern is valid"))
}

/// A placeholder found in the main template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    /// Byte range of `@name`, without the line break
    pub span: Span,
}

/// All placeholders in template order
pub fn scan_placeholders(template: &str) -> Vec<Placeholder> {
    placeholder_re()
        .captures_iter(template)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some(Placeholder {
                name: name.as_str().to_string(),
                span: whole.range(),
            })
        })
        .collect()
}

/// Replace every placeholder with `render_item(name, item)` and check coverage
///
/// Duplicates are reported before anything is rendered, whatever the
/// registry holds. Line breaks around a placeholder are left untouched.
pub fn place<F>(template: &str, registry: &ItemRegistry, mut render_item: F) -> Result<String, BuildError>
where
    F: FnMut(&str, &TaggedItem) -> Result<String, BuildError>,
{
    let placeholders = scan_placeholders(template);

    let mut seen = HashSet::new();
    for ph in &placeholders {
        if !seen.insert(ph.name.as_str()) {
            return Err(BuildError::DuplicatePlacement {
                name: ph.name.clone(),
                span: ph.span.clone(),
            });
        }
    }

    let mut placed = HashSet::new();
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for ph in &placeholders {
        let Some(item) = registry.get(&ph.name) else {
            return Err(BuildError::UnknownItem {
                name: ph.name.clone(),
                span: ph.span.clone(),
            });
        };
        out.push_str(&template[last..ph.span.start]);
        out.push_str(&render_item(&ph.name, item)?);
        placed.insert(ph.name.as_str());
        last = ph.span.end;
    }
    out.push_str(&template[last..]);

    if let Some(missing) = registry.names().find(|name| !placed.contains(name)) {
        return Err(BuildError::MissingItem {
            name: missing.to_string(),
        });
    }

    tracing::debug!(placed = placed.len(), "placed all documented items");
    Ok(out)
}
