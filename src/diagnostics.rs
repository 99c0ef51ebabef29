//! Diagnostics for the pushdown engine.
//!
//! # Overview
//!
//! A rejected input is *not* an error: it is a normal verdict that carries its
//! reason in the last step of the trace. The types in this module cover the
//! failures that happen around a validation run instead: an unknown validator
//! name, unreadable files, malformed configuration and malformed YAML suites.
//!
//! # Error Construction Macros
//!
//! - **Use `err_msg!` for simple, message-only errors.**
//!   - `err_msg!(Io, "Failed to read {}: {}", path, e)`
//!
//! - **Use `err_ctx!` for errors that point into a source document.**
//!   - `err_ctx!(Config, "Invalid field", src, span, help)`
//!
//! Never build an `ErrorContext` by hand when one of the macros fits.

use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Named source shared between a diagnostic and its labels.
pub type SourceArc = Arc<NamedSource<String>>;

/// Byte range inside a source document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Type-safe error classification that corresponds to `PdaError` variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// The caller named a validator that does not exist
    UnknownValidator,
    /// Filesystem failures
    Io,
    /// Malformed configuration files
    Config,
    /// An input that cannot be fed to the selected validator
    Input,
    /// Malformed YAML suites
    Suite,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::UnknownValidator => "UnknownValidator",
            ErrorType::Io => "Io",
            ErrorType::Config => "Config",
            ErrorType::Input => "Input",
            ErrorType::Suite => "Suite",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Minimal, composable error context for diagnostics.
#[derive(Debug, Default)]
pub struct ErrorContext {
    /// The primary source for this error (if any).
    pub source: Option<SourceArc>,
    /// The primary span for this error (if any).
    pub span: Option<Span>,
    /// An optional help message.
    pub help: Option<String>,
}

impl ErrorContext {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_help(help: impl Into<String>) -> Self {
        Self {
            help: Some(help.into()),
            ..Self::default()
        }
    }
}

/// Every failure mode of the engine's surroundings.
#[derive(Debug, Error)]
pub enum PdaError {
    #[error("Unknown validator: {message}")]
    UnknownValidator { message: String, ctx: ErrorContext },
    #[error("IO error: {message}")]
    Io {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<std::io::Error>,
    },
    #[error("Configuration error: {message}")]
    Config { message: String, ctx: ErrorContext },
    #[error("Input error: {message}")]
    Input { message: String, ctx: ErrorContext },
    #[error("Suite error: {message}")]
    Suite { message: String, ctx: ErrorContext },
}

impl PdaError {
    fn get_ctx(&self) -> &ErrorContext {
        match self {
            PdaError::UnknownValidator { ctx, .. } => ctx,
            PdaError::Io { ctx, .. } => ctx,
            PdaError::Config { ctx, .. } => ctx,
            PdaError::Input { ctx, .. } => ctx,
            PdaError::Suite { ctx, .. } => ctx,
        }
    }

    fn message(&self) -> &str {
        match self {
            PdaError::UnknownValidator { message, .. }
            | PdaError::Io { message, .. }
            | PdaError::Config { message, .. }
            | PdaError::Input { message, .. }
            | PdaError::Suite { message, .. } => message,
        }
    }

    pub fn error_type(&self) -> ErrorType {
        match self {
            PdaError::UnknownValidator { .. } => ErrorType::UnknownValidator,
            PdaError::Io { .. } => ErrorType::Io,
            PdaError::Config { .. } => ErrorType::Config,
            PdaError::Input { .. } => ErrorType::Input,
            PdaError::Suite { .. } => ErrorType::Suite,
        }
    }

    /// Stable diagnostic code, e.g. `pushdown::unknown_validator`.
    pub fn code_suffix(&self) -> &'static str {
        match self {
            PdaError::UnknownValidator { .. } => "unknown_validator",
            PdaError::Io { .. } => "io",
            PdaError::Config { .. } => "config",
            PdaError::Input { .. } => "input",
            PdaError::Suite { .. } => "suite",
        }
    }

    /// Wraps a `std::io::Error` raised while touching `path`.
    pub fn io(path: impl std::fmt::Display, err: std::io::Error) -> Self {
        PdaError::Io {
            message: format!("{}: {}", path, err),
            ctx: ErrorContext::none(),
            source: Some(err),
        }
    }
}

impl Diagnostic for PdaError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(format!("pushdown::{}", self.code_suffix())))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.get_ctx()
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.get_ctx()
            .source
            .as_ref()
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.get_ctx().span?;
        let len = if span.end > span.start {
            span.end - span.start
        } else {
            1
        };
        let label = LabeledSpan::new(Some(self.message().to_string()), span.start, len);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Converts a source string into an `Arc<NamedSource<String>>` for use in error contexts.
pub fn to_error_source(name: impl AsRef<str>, source: impl AsRef<str>) -> SourceArc {
    Arc::new(NamedSource::new(
        name.as_ref(),
        source.as_ref().to_string(),
    ))
}

/// Maps a `serde_yaml` failure onto a labeled diagnostic pointing into the document.
pub fn yaml_span(err: &serde_yaml::Error, source: &str) -> Option<Span> {
    let location = err.location()?;
    let start = location.index().min(source.len());
    let end = source
        .get(start..)?
        .find('\n')
        .map(|offset| start + offset)
        .unwrap_or(source.len());
    Some(Span { start, end })
}

/// Prints a `PdaError` with full miette diagnostics on stderr.
pub fn print_error(error: PdaError) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}

/// Constructs a `PdaError` variant with a formatted message and no context.
#[macro_export]
macro_rules! err_msg {
    (Io, $($fmt:tt)+) => {
        $crate::PdaError::Io {
            message: format!($($fmt)+),
            ctx: $crate::ErrorContext::none(),
            source: None,
        }
    };
    ($variant:ident, $($fmt:tt)+) => {
        $crate::PdaError::$variant {
            message: format!($($fmt)+),
            ctx: $crate::ErrorContext::none(),
        }
    };
}

/// Constructs a `PdaError` variant that points into a named source.
///
/// `$src` must be a `&SourceArc`; `$span` an `Option<Span>`.
#[macro_export]
macro_rules! err_ctx {
    ($variant:ident, $msg:expr, $src:expr, $span:expr, $help:expr) => {
        $crate::PdaError::$variant {
            message: $msg.to_string(),
            ctx: $crate::ErrorContext {
                source: Some($crate::diagnostics::SourceArc::clone($src)),
                span: $span,
                help: Some(format!("{}", $help)),
            },
        }
    };
    ($variant:ident, $msg:expr, $src:expr, $span:expr) => {
        $crate::PdaError::$variant {
            message: $msg.to_string(),
            ctx: $crate::ErrorContext {
                source: Some($crate::diagnostics::SourceArc::clone($src)),
                span: $span,
                help: None,
            },
        }
    };
}

#[cfg(test)]
mod diagnostics_tests {
    use super::*;

    #[test]
    fn unknown_validator_has_code_and_help() {
        let err = PdaError::UnknownValidator {
            message: "'json'".to_string(),
            ctx: ErrorContext::with_help("expected one of: filename, content"),
        };
        assert_eq!(err.error_type(), ErrorType::UnknownValidator);
        assert_eq!(err.to_string(), "Unknown validator: 'json'");
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("pushdown::unknown_validator"));
        assert!(err.help().is_some());
        assert!(err.labels().is_none());
    }

    #[test]
    fn err_msg_formats_arguments() {
        let err = err_msg!(Input, "{} is not text", "photo.png");
        assert_eq!(err.to_string(), "Input error: photo.png is not text");
        let io = err_msg!(Io, "missing {}", "a.txt");
        assert_eq!(io.error_type(), ErrorType::Io);
    }

    #[test]
    fn err_ctx_labels_the_span() {
        let src = to_error_source("pushdown.yaml", "max_content_chars: lots\n");
        let err = err_ctx!(
            Config,
            "invalid type",
            &src,
            Some(Span { start: 19, end: 23 }),
            "use an integer"
        );
        let labels: Vec<_> = err.labels().expect("labels").collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 19);
        assert_eq!(labels[0].len(), 4);
    }

    #[test]
    fn yaml_span_points_at_the_failing_line() {
        let source = "max_content_chars: 10\npreview_chars: nope\n";
        let err = serde_yaml::from_str::<std::collections::BTreeMap<String, u32>>(source)
            .expect_err("invalid integer");
        let span = yaml_span(&err, source).expect("location");
        assert!(span.start >= 22);
        assert!(span.end <= source.len());
    }
}
