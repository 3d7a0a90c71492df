//! Domain errors: validation failures in names, field definitions, and
//! method selection. All are caller-input problems, never I/O.

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("invalid resource name '{name}': {reason}")]
    InvalidResourceName { name: String, reason: String },

    #[error("invalid field definition '{token}': {reason}")]
    InvalidFieldDef { token: String, reason: String },

    #[error("unknown field type '{tag}' (expected string, number, or boolean)")]
    UnknownFieldType { tag: String },

    #[error("unsupported HTTP method '{method}'")]
    UnsupportedMethod { method: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidResourceName { name, reason } => vec![
                format!("Resource name '{}' is invalid: {}", name, reason),
                "Use alphanumeric characters, hyphens, and underscores".into(),
                "Examples: widget, publishers, blog_post".into(),
            ],
            Self::InvalidFieldDef { token, .. } => vec![
                format!("Field definition '{}' could not be parsed", token),
                "Use name:type pairs, e.g. color:string rating:number active:boolean".into(),
            ],
            Self::UnknownFieldType { tag } => vec![
                format!("'{}' is not a recognised field type", tag),
                "Supported types: string, number, boolean".into(),
            ],
            Self::UnsupportedMethod { method } => vec![
                format!("'{}' is not a supported HTTP method", method),
                "Supported methods: get, post, put, delete".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        // Every domain error is a validation failure today; the enum exists
        // so the CLI mapping survives future variants.
        ErrorCategory::Validation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
