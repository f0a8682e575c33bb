//! Sources of documented items
//!
//! Comment parsing happens elsewhere. A reader only turns its output into
//! [`DocData`].

use std::path::Path;

use crate::config::Config;
use crate::error::BuildError;
use crate::item::DocData;

/// Supplies the items for a build that was not handed data directly
pub trait Reader {
    fn read(&self, config: &Config) -> Result<DocData, BuildError>;
}

/// Reads a JSON dump of `{ items, all, extraText }` from `config.items`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReader;

impl JsonReader {
    pub fn read_file(path: &Path) -> Result<DocData, BuildError> {
        let content = std::fs::read_to_string(path).map_err(|e| BuildError::io(path, e))?;
        let data: DocData = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), items = data.items.len(), "read item data");
        Ok(data)
    }
}

impl Reader for JsonReader {
    fn read(&self, config: &Config) -> Result<DocData, BuildError> {
        let path = config.items.as_deref().ok_or(BuildError::NoItemData)?;
        Self::read_file(path)
    }
}
