//! Markdown to HTML conversion backed by comrak

use super::config::{MarkdownFilter, MarkdownOptions};

/// Converts Markdown to HTML with the configured options
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    options: MarkdownOptions,
    filter: Option<MarkdownFilter>,
}

impl MarkdownRenderer {
    pub fn new(options: MarkdownOptions, filter: Option<MarkdownFilter>) -> Self {
        Self { options, filter }
    }

    /// Convert a whole document; the filter is not applied
    pub fn convert(&self, text: &str) -> String {
        comrak::markdown_to_html(text, &self.options.to_comrak())
    }

    /// Convert a doc-comment fragment, running the filter first
    pub fn render(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        match &self.filter {
            Some(filter) => self.convert(&filter.apply(text)),
            None => self.convert(text),
        }
    }
}
