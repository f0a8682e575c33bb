//! Functions and globals available inside templates

use std::collections::BTreeMap;
use std::sync::Arc;

use minijinja::value::ViaDeserialize;
use minijinja::{Error, ErrorKind, State, Value};

use crate::item::TypeRef;
use crate::link::{LinkOutcome, TypeLinker};
use crate::renderer::MarkdownRenderer;

use super::registry::{TemplateKind, TemplateSet};

/// Everything the template functions need from the build
pub struct TemplateEnv {
    pub prefix: String,
    pub linker: Arc<TypeLinker>,
    /// Present for HTML output only
    pub markdown: Option<Arc<MarkdownRenderer>>,
    /// Caller bindings, added last so they win
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl TemplateEnv {
    /// Register functions and globals on `set`
    pub fn install(self, set: &mut TemplateSet) {
        let kind = set.kind();
        let env = set.env_mut();

        env.add_global("prefix", Value::from(self.prefix));
        env.add_function("def", call_def);
        env.add_function("has_description", |ty: ViaDeserialize<serde_json::Value>| {
            has_description(&ty)
        });

        let linker = self.linker;
        env.add_function("link_type", move |ty: ViaDeserialize<TypeRef>| {
            link_type(&linker, &ty)
        });

        match (kind, self.markdown) {
            (TemplateKind::Html, Some(markdown)) => {
                let md = Arc::clone(&markdown);
                env.add_function("markdown", move |text: Option<String>| {
                    Value::from_safe_string(md.render(text.as_deref().unwrap_or("")))
                });
                env.add_function("markdown_file", move |name: String| {
                    markdown_file(&markdown, &name)
                });
            }
            _ => {
                env.add_function("indent", indent);
            }
        }

        for (key, value) in self.extra {
            env.add_global(key, Value::from_serialize(&value));
        }
    }
}

/// `def(name, args)`: render another definition with its own context
fn call_def(state: &State, name: String, args: Value) -> Result<Value, Error> {
    let rendered = state.env().get_template(&name)?.render(args)?;
    Ok(Value::from_safe_string(rendered))
}

fn link_type(linker: &TypeLinker, ty: &TypeRef) -> Result<Value, Error> {
    match linker.link_type(ty) {
        Ok(LinkOutcome::Linked(link)) => Ok(Value::from(link.href())),
        Ok(LinkOutcome::Unlinkable) => Ok(Value::from(false)),
        Ok(LinkOutcome::NotFound) => Ok(Value::UNDEFINED),
        Err(err) => Err(Error::new(ErrorKind::InvalidOperation, err.to_string()).with_source(err)),
    }
}

fn markdown_file(markdown: &MarkdownRenderer, name: &str) -> Result<Value, Error> {
    let path = format!("{}.md", name);
    let text = std::fs::read_to_string(&path).map_err(|e| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("cannot read markdown file {}", path),
        )
        .with_source(e)
    })?;
    Ok(Value::from_safe_string(markdown.render(&text)))
}

/// True when the type or any of its members, params or return value is
/// described
pub fn has_description(ty: &serde_json::Value) -> bool {
    if non_empty_str(ty.get("description")) {
        return true;
    }
    if let Some(props) = ty.get("properties").and_then(|p| p.as_object()) {
        if props.values().any(has_description) {
            return true;
        }
    }
    if let Some(params) = ty.get("params").and_then(|p| p.as_array()) {
        if params.iter().any(has_description) {
            return true;
        }
    }
    ty.get("returns")
        .is_some_and(|r| non_empty_str(r.get("description")))
}

fn non_empty_str(value: Option<&serde_json::Value>) -> bool {
    value
        .and_then(|v| v.as_str())
        .is_some_and(|s| !s.is_empty())
}

/// Indent every non-blank line of the trimmed text by `depth` spaces
pub fn indent(text: String, depth: usize) -> String {
    let pad = " ".repeat(depth);
    text.trim()
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
