//! Template definitions used to render items
//!
//! Each build gets its own [`TemplateSet`]: a table of named definitions
//! (`item`, `type`, ...) filled from the configured template directory first
//! and the built-in defaults second, plus the functions templates call back
//! into (`def`, `link_type`, `markdown`, ...).
//!
//! # Example
//!
//! ```text
//! {# type.md #}
//! {% set link = link_type(type) %}
//! {% if link %}[{{ type.type }}]({{ link }}){% else %}{{ type.type }}{% endif %}
//! ```

mod functions;
mod registry;

pub use functions::{has_description, indent, TemplateEnv};
pub use registry::{TemplateKind, TemplateSet};

use crate::config::Config;
use crate::error::BuildError;

/// Assemble the definitions for one build
pub fn load_templates(
    kind: TemplateKind,
    config: &Config,
    env: TemplateEnv,
) -> Result<TemplateSet, BuildError> {
    let mut set = TemplateSet::new(kind);
    if let Some(dir) = &config.templates {
        set.load_dir(dir)?;
    }
    set.load_defaults()?;
    env.install(&mut set);
    Ok(set)
}
