//! Error types for the substitution engine.

use std::fmt;

/// A single problem found while resolving one scalar field.
///
/// These are collected rather than returned so one pass over a sub-tree
/// reports every unresolved placeholder.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReplacementError {
    #[error("missing secret value for placeholder <{placeholder}> in field {key}: {value}")]
    MissingPlaceholder {
        key: String,
        value: String,
        placeholder: String,
    },

    #[error("secret value for placeholder <{placeholder}> in field {key} is a {found} and cannot be stored as bytes")]
    UnsupportedValue {
        key: String,
        placeholder: String,
        found: &'static str,
    },
}

impl ReplacementError {
    /// Field key the error was recorded against.
    pub fn key(&self) -> &str {
        match self {
            ReplacementError::MissingPlaceholder { key, .. }
            | ReplacementError::UnsupportedValue { key, .. } => key,
        }
    }

    pub fn placeholder(&self) -> &str {
        match self {
            ReplacementError::MissingPlaceholder { placeholder, .. }
            | ReplacementError::UnsupportedValue { placeholder, .. } => placeholder,
        }
    }
}

/// Ordered sink for [`ReplacementError`]s, threaded through a walk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplacementErrors(Vec<ReplacementError>);

impl ReplacementErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReplacementError> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<ReplacementError> {
        self.0
    }
}

impl Extend<ReplacementError> for ReplacementErrors {
    fn extend<T: IntoIterator<Item = ReplacementError>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ReplacementErrors {
    type Item = &'a ReplacementError;
    type IntoIter = std::slice::Iter<'a, ReplacementError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ReplacementErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, error) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {error}")?;
        }
        Ok(())
    }
}

/// The decoded document does not have a shape the walker can handle.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StructuralError {
    #[error("expected a mapping at '{path}', found {found}")]
    NotAMapping { path: String, found: &'static str },

    #[error("mapping at '{path}' has non-string key {key}")]
    NonStringKey { path: String, key: String },

    #[error("tagged value {tag} at '{path}' is not supported")]
    Tagged { path: String, tag: String },

    #[error("number {value} at '{path}' cannot be represented")]
    InvalidNumber { path: String, value: String },
}

/// Errors surfaced by a document template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("could not replace all placeholders in {kind} {subtree} ({} error(s)):\n{errors}", .errors.len())]
    Replacement {
        kind: &'static str,
        subtree: &'static str,
        errors: ReplacementErrors,
    },

    #[error("malformed manifest: {0}")]
    Structural(#[from] StructuralError),

    #[error("could not convert replaced template into {kind}: {reason}")]
    Export { kind: &'static str, reason: String },

    #[error("unsupported kind: {0}")]
    UnsupportedKind(String),

    #[error("{0} template exported before a successful replace")]
    NotReplaced(&'static str),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
