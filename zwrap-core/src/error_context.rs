//! Error Context for Value Extraction.
//!
//! Wraps a [`ValueError`] with a stack of context messages so that a failure
//! deep inside a conversion can say which constant or model entry it was
//! processing when it failed.

use crate::error::{ErrorKind, ValueError};
use std::fmt;

/// Result type carrying an [`ErrorContext`].
pub type ContextResult<T> = Result<T, ErrorContext>;

/// A [`ValueError`] plus the context it occurred in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// The underlying error.
    pub error: ValueError,
    /// Context messages, innermost first.
    pub context_stack: Vec<String>,
    /// Suggestions for fixing the error.
    pub suggestions: Vec<String>,
}

impl ErrorContext {
    /// Create a new error context.
    pub fn new(error: ValueError) -> Self {
        Self {
            error,
            context_stack: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Push a context message.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context_stack.push(context.into());
        self
    }

    /// Add a suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Kind of the underlying error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    /// Full multi-line report.
    pub fn format_full(&self) -> String {
        let mut output = format!("Error: {}\n", self.error.detailed_message());

        if !self.context_stack.is_empty() {
            output.push_str("\nContext:\n");
            for (i, ctx) in self.context_stack.iter().rev().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, ctx));
            }
        }

        if !self.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for suggestion in &self.suggestions {
                output.push_str(&format!("  • {}\n", suggestion));
            }
        }

        output
    }
}

impl From<ValueError> for ErrorContext {
    fn from(error: ValueError) -> Self {
        Self::new(error)
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_full())
    }
}

impl std::error::Error for ErrorContext {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Extension trait for adding context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> ContextResult<T>;

    /// Add context computed lazily, only on error.
    fn with_context<F>(self, f: F) -> ContextResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, ValueError> {
    fn context(self, context: impl Into<String>) -> ContextResult<T> {
        self.map_err(|e| ErrorContext::new(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> ContextResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| ErrorContext::new(e).with_context(f()))
    }
}

impl<T> ResultExt<T> for ContextResult<T> {
    fn context(self, context: impl Into<String>) -> ContextResult<T> {
        self.map_err(|mut e| {
            e.context_stack.push(context.into());
            e
        })
    }

    fn with_context<F>(self, f: F) -> ContextResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|mut e| {
            e.context_stack.push(f());
            e
        })
    }
}
