//! builddocs - API documentation builder
//!
//! Takes documented items produced by a comment reader plus a hand-written
//! main template, places every item at its `@name` line, links the types
//! cited in signatures, and renders the result as HTML or Markdown.
//!
//! # Example
//!
//! ```rust
//! use builddocs::{build, Config, DocData};
//!
//! let dir = std::env::temp_dir().join("builddocs-doctest");
//! std::fs::create_dir_all(&dir).unwrap();
//! let main = dir.join("main.md");
//! std::fs::write(&main, "# API\n\n@greet\n").unwrap();
//!
//! let data: DocData = serde_json::from_str(
//!     r#"{"items": {"greet": {"type": "Function", "description": "Say hello."}}}"#,
//! )
//! .unwrap();
//!
//! let config = Config::new(&main).with_name("hello").with_format("markdown");
//! let out = build(&config, Some(data)).unwrap();
//! assert!(out.contains(r#"<a id="hello.greet"></a>"#));
//! assert!(out.contains("Say hello."));
//! ```

pub mod config;
pub mod error;
pub mod item;
pub mod link;
pub mod place;
pub mod reader;
pub mod renderer;
pub mod template;

use std::sync::Arc;

pub use config::{Config, ImportSet, LinkMap};
pub use error::{BuildError, UnresolvedTypeError};
pub use item::{organize_tags, DocData, ItemRegistry, TaggedItem, TypeRef};
pub use link::{Link, LinkOutcome, TypeLinker};
pub use reader::{JsonReader, Reader};
pub use renderer::{Format, MarkdownFilter, MarkdownOptions};

use renderer::RenderInput;

/// Build the document described by `config`
///
/// Without `data`, items are read from `config.items` with [`JsonReader`].
pub fn build(config: &Config, data: Option<DocData>) -> Result<String, BuildError> {
    let data = match data {
        Some(data) => data,
        None => JsonReader.read(config)?,
    };
    build_data(config, &data)
}

/// Build the document, reading items with a custom [`Reader`]
pub fn build_with_reader(config: &Config, reader: &dyn Reader) -> Result<String, BuildError> {
    let data = reader.read(config)?;
    build_data(config, &data)
}

fn build_data(config: &Config, data: &DocData) -> Result<String, BuildError> {
    let registry = ItemRegistry::from_raw(&data.items);
    tracing::info!(items = registry.len(), format = %config.format, "building documentation");

    let main = std::fs::read_to_string(&config.main).map_err(|e| BuildError::io(&config.main, e))?;

    // Top-level items are linkable even when the reader left `all` empty
    let documented = data.all.keys().chain(data.items.keys()).cloned();
    let linker = Arc::new(TypeLinker::from_config(config, documented));

    renderer::render_document(
        config,
        RenderInput {
            main: &main,
            registry: &registry,
            linker,
        },
    )
}
