//! Error types for the conversion pipeline
//!
//! This module provides error handling using the `thiserror` crate.
//! The pipeline itself never fails in lenient mode: malformed constructs are
//! recovered and reported as [`Anomaly`] values. Strict callers turn those
//! anomalies into a [`YardError::Malformed`].

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for the conversion pipeline
#[derive(Error, Debug)]
pub enum YardError {
    /// The pattern contained constructs that were recovered in lenient mode
    #[error("malformed pattern: {}", format_anomalies(.0))]
    Malformed(Vec<Anomaly>),

    /// A pattern source could not be read
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        /// Path of the source that failed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A pattern source contained nothing but whitespace
    #[error("no pattern to convert")]
    EmptyInput,
}

fn format_anomalies(anomalies: &[Anomaly]) -> String {
    anomalies
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Specific kinds of recovered defects
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyKind {
    /// `[` without a later `]`, lexed as a literal `[`
    #[error("unclosed character class")]
    UnclosedClass,

    /// `{` without a later `}`, lexed as a literal `{`
    #[error("unclosed repetition count")]
    UnclosedRepetition,

    /// `)` with no open group, dropped
    #[error("unmatched `)`")]
    UnmatchedCloseParen,

    /// `(` never closed, emitted verbatim into the postfix output
    #[error("unmatched `(`")]
    UnmatchedOpenParen,
}

/// A defect the pipeline recovered from, with its location in the cleaned input
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at position {}", .span.start)]
pub struct Anomaly {
    /// What went wrong
    pub kind: AnomalyKind,
    /// Where it happened
    pub span: Span,
}

impl Anomaly {
    /// Create a new anomaly
    pub fn new(kind: AnomalyKind, span: Span) -> Self {
        Anomaly { kind, span }
    }
}

/// A span of char offsets in the cleaned pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start position (inclusive)
    pub start: usize,
    /// End position (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Create a span for a single character
    pub fn single(pos: usize) -> Self {
        Span {
            start: pos,
            end: pos + 1,
        }
    }

    /// Create a zero-width span, used for synthetic tokens
    pub fn empty(pos: usize) -> Self {
        Span {
            start: pos,
            end: pos,
        }
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, YardError>;
