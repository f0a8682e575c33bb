//! Error types for the documentation build

use std::path::PathBuf;

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::item::Loc;

/// Byte range in the main template
pub type Span = std::ops::Range<usize>;

/// A cited type could not be linked anywhere
#[derive(Debug, Clone, Error)]
#[error("unknown type '{name}' at {}", display_loc(.loc))]
pub struct UnresolvedTypeError {
    pub name: String,
    pub loc: Option<Loc>,
}

fn display_loc(loc: &Option<Loc>) -> String {
    match loc {
        Some(loc) => loc.to_string(),
        None => "<unknown location>".to_string(),
    }
}

/// Errors that abort a documentation build
#[derive(Debug, Error)]
pub enum BuildError {
    /// The same placeholder appears twice in the main template
    #[error("item {name} is included in doc template twice")]
    DuplicatePlacement { name: String, span: Span },

    /// A placeholder names something that was not documented
    #[error("unknown item {name} included in doc template")]
    UnknownItem { name: String, span: Span },

    /// A documented item has no placeholder
    #[error("item {name} is missing from the doc template")]
    MissingItem { name: String },

    #[error(transparent)]
    UnresolvedType(#[from] UnresolvedTypeError),

    #[error("unsupported output format '{format}' (expected html or markdown)")]
    UnsupportedFormat { format: String },

    /// Template compilation or rendering failed
    #[error("template error: {0}")]
    Template(minijinja::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No item data was passed and no `items` file is configured
    #[error("no item data: pass it to the build or set `items` in the config")]
    NoItemData,

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to parse item data: {0}")]
    Data(#[from] serde_json::Error),
}

impl From<minijinja::Error> for BuildError {
    /// Template functions smuggle their own errors through minijinja as the
    /// error source; surface those unchanged.
    fn from(err: minijinja::Error) -> Self {
        let mut source = std::error::Error::source(&err);
        while let Some(inner) = source {
            if let Some(unresolved) = inner.downcast_ref::<UnresolvedTypeError>() {
                return BuildError::UnresolvedType(unresolved.clone());
            }
            source = inner.source();
        }
        BuildError::Template(err)
    }
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Span of the offending placeholder in the main template, if any
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::DuplicatePlacement { span, .. } | Self::UnknownItem { span, .. } => Some(span),
            _ => None,
        }
    }

    /// Format the error with main-template context using ariadne
    ///
    /// Errors without a template span fall back to their plain message.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span() else {
            return self.to_string();
        };

        let note = match self {
            Self::DuplicatePlacement { .. } => "placed again here",
            _ => "not a documented item",
        };

        // ariadne counts characters, spans count bytes
        let to_char = |byte: usize| source.get(..byte).map_or(byte, |prefix| prefix.chars().count());
        let span = to_char(span.start)..to_char(span.end);

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(note)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_type_display() {
        let err = UnresolvedTypeError {
            name: "Widgte".to_string(),
            loc: Some(Loc {
                file: PathBuf::from("src/widget.js"),
                line: 40,
                column: None,
            }),
        };
        assert_eq!(err.to_string(), "unknown type 'Widgte' at src/widget.js:40");
    }

    #[test]
    fn test_unresolved_type_without_loc() {
        let err = UnresolvedTypeError {
            name: "Foo".to_string(),
            loc: None,
        };
        assert!(err.to_string().contains("<unknown location>"));
    }

    #[test]
    fn test_placement_error_display() {
        let err = BuildError::DuplicatePlacement {
            name: "widget".to_string(),
            span: 0..7,
        };
        assert_eq!(err.to_string(), "item widget is included in doc template twice");

        let err = BuildError::MissingItem {
            name: "gadget".to_string(),
        };
        assert_eq!(err.to_string(), "item gadget is missing from the doc template");
    }

    #[test]
    fn test_format_with_span() {
        let source = "Intro\n@nope\n";
        let err = BuildError::UnknownItem {
            name: "nope".to_string(),
            span: 6..11,
        };
        let report = err.format(source, "main.md");
        assert!(report.contains("unknown item nope"));
        assert!(report.contains("main.md"));
    }

    #[test]
    fn test_format_span_after_multibyte_text() {
        let source = "Überblick → API\n@nope\n";
        let start = source.find('@').unwrap();
        let err = BuildError::UnknownItem {
            name: "nope".to_string(),
            span: start..start + 5,
        };
        let report = err.format(source, "main.md");
        assert!(report.contains("main.md:2:1"));
        assert!(report.contains("not a documented item"));
    }

    #[test]
    fn test_format_without_span() {
        let err = BuildError::UnsupportedFormat {
            format: "pdf".to_string(),
        };
        assert_eq!(err.format("", "main.md"), err.to_string());
    }

    #[test]
    fn test_unresolved_type_survives_minijinja() {
        let inner = UnresolvedTypeError {
            name: "Foo".to_string(),
            loc: None,
        };
        let err = minijinja::Error::new(minijinja::ErrorKind::InvalidOperation, "link failed")
            .with_source(inner);
        assert!(matches!(
            BuildError::from(err),
            BuildError::UnresolvedType(UnresolvedTypeError { ref name, .. }) if name == "Foo"
        ));
    }
}
