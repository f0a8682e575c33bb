//! Configuration for Markdown rendering

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

/// Options handed to the Markdown renderer
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
    /// Pass raw HTML through
    pub html: bool,

    /// Enable `term\n: definition` lists
    pub description_lists: bool,

    pub tables: bool,

    pub strikethrough: bool,

    pub autolink: bool,

    pub footnotes: bool,

    /// Smart punctuation
    pub smart: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            html: true,
            description_lists: true,
            tables: false,
            strikethrough: false,
            autolink: false,
            footnotes: false,
            smart: false,
        }
    }
}

impl MarkdownOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether raw HTML passes through
    pub fn with_html(mut self, html: bool) -> Self {
        self.html = html;
        self
    }

    pub fn with_tables(mut self, tables: bool) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_strikethrough(mut self, strikethrough: bool) -> Self {
        self.strikethrough = strikethrough;
        self
    }

    pub fn with_smart(mut self, smart: bool) -> Self {
        self.smart = smart;
        self
    }

    pub(crate) fn to_comrak(&self) -> comrak::Options<'static> {
        let mut options = comrak::Options::default();
        options.render.r#unsafe = self.html;
        options.extension.description_lists = self.description_lists;
        options.extension.table = self.tables;
        options.extension.strikethrough = self.strikethrough;
        options.extension.autolink = self.autolink;
        options.extension.footnotes = self.footnotes;
        options.parse.smart = self.smart;
        options
    }
}

/// Text hook applied to doc-comment Markdown before it is rendered
#[derive(Clone)]
pub struct MarkdownFilter(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl MarkdownFilter {
    pub fn new(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn apply(&self, text: &str) -> String {
        (self.0)(text)
    }
}

impl fmt::Debug for MarkdownFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MarkdownFilter(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = MarkdownOptions::default();
        assert!(options.html);
        assert!(options.description_lists);
        assert!(!options.tables);
    }

    #[test]
    fn test_builder_pattern() {
        let options = MarkdownOptions::new()
            .with_html(false)
            .with_tables(true)
            .with_strikethrough(true)
            .with_smart(true);

        assert!(!options.html);
        assert!(options.tables);
        assert!(options.strikethrough);
        assert!(options.smart);
    }

    #[test]
    fn test_comrak_options() {
        let options = MarkdownOptions::default().with_tables(true).to_comrak();
        assert!(options.render.r#unsafe);
        assert!(options.extension.description_lists);
        assert!(options.extension.table);
    }

    #[test]
    fn test_filter_applies() {
        let filter = MarkdownFilter::new(|s| s.to_uppercase());
        assert_eq!(filter.apply("abc"), "ABC");
    }
}
