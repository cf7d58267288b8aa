//! Error types for reading layout documents

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::layout::Preset;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("failed to read layout document: {0}")]
    Io(#[from] std::io::Error),

    #[error("syntax error: {message}")]
    Syntax { message: String, span: Span },

    #[error("undefined entity '{name}'")]
    UndefinedEntity {
        name: String,
        span: Span,
        suggestions: Vec<String>,
    },

    #[error("entity '{name}' is declared more than once")]
    DuplicateEntity { name: String, span: Span },

    #[error("binding '{preset}' on '{entity}' needs a target")]
    MissingTarget {
        entity: String,
        preset: Preset,
        span: Span,
    },

    #[error("invalid binding on '{entity}': {message}")]
    InvalidBinding {
        entity: String,
        message: String,
        span: Span,
    },

    #[error("{dimension} of '{entity}' must be a finite number")]
    InvalidSize {
        entity: String,
        dimension: &'static str,
        span: Span,
    },
}

impl DocumentError {
    /// Create an undefined entity error with suggestions
    pub fn undefined(name: impl Into<String>, span: Span, suggestions: Vec<String>) -> Self {
        Self::UndefinedEntity {
            name: name.into(),
            span,
            suggestions,
        }
    }

    /// Create an invalid binding error
    pub fn invalid_binding(entity: impl Into<String>, message: impl Into<String>, span: Span) -> Self {
        Self::InvalidBinding {
            entity: entity.into(),
            message: message.into(),
            span,
        }
    }

    /// Get the source span if available
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::Io(_) => None,
            Self::Syntax { span, .. }
            | Self::UndefinedEntity { span, .. }
            | Self::DuplicateEntity { span, .. }
            | Self::MissingTarget { span, .. }
            | Self::InvalidBinding { span, .. }
            | Self::InvalidSize { span, .. } => Some(span),
        }
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::UndefinedEntity { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span() else {
            return self.to_string();
        };

        let label = match self.suggestions() {
            Some(suggestions) if !suggestions.is_empty() => {
                format!("did you mean: {}?", suggestions.join(", "))
            }
            _ => self.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span.clone()))
                    .with_message(label)
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

impl From<toml::de::Error> for DocumentError {
    fn from(err: toml::de::Error) -> Self {
        Self::Syntax {
            message: err.message().to_string(),
            span: err.span().unwrap_or(0..0),
        }
    }
}
