//! Error types for banksampah-core
//!
//! The aggregation engine is pure, so every failure here is a contract
//! violation by the caller (a reversed date range, an unsupported preset).
//! Errors carry a code and suggestions so front-ends can localize them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Start of a range lies after its end
    InvalidRange,
    /// Unsupported range preset
    InvalidPreset,
    /// Custom range requested without dates
    MissingCustomRange,
    /// Unrecognized transaction kind
    UnknownKind,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::InvalidRange => write!(f, "INVALID_RANGE"),
            ErrorCode::InvalidPreset => write!(f, "INVALID_PRESET"),
            ErrorCode::MissingCustomRange => write!(f, "MISSING_CUSTOM_RANGE"),
            ErrorCode::UnknownKind => write!(f, "UNKNOWN_KIND"),
        }
    }
}

/// Detailed error information for front-ends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Warning,
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for banksampah-core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: String, end: String },

    #[error("Unsupported range preset: {preset}")]
    InvalidPreset { preset: String },

    #[error("Custom range requires both a start and an end date")]
    MissingCustomRange,

    #[error("Unknown transaction kind: {value}")]
    UnknownKind { value: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::InvalidRange { .. } => ErrorCode::InvalidRange,
            CoreError::InvalidPreset { .. } => ErrorCode::InvalidPreset,
            CoreError::MissingCustomRange => ErrorCode::MissingCustomRange,
            CoreError::UnknownKind { .. } => ErrorCode::UnknownKind,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::InvalidRange { .. } => ErrorSeverity::Error,
            CoreError::InvalidPreset { .. } => ErrorSeverity::Warning,
            CoreError::MissingCustomRange => ErrorSeverity::Warning,
            CoreError::UnknownKind { .. } => ErrorSeverity::Warning,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::InvalidRange { start, end } => details
                .with_detail(serde_json::json!({ "start": start, "end": end }))
                .with_suggestion("Pick an end date on or after the start date.".to_string()),
            CoreError::InvalidPreset { .. } => details
                .with_suggestion("Supported windows are the last 7, 14 or 30 days.".to_string()),
            CoreError::MissingCustomRange => details
                .with_suggestion("Pass both --from and --to (YYYY-MM-DD).".to_string()),
            CoreError::UnknownKind { .. } => details.with_suggestion(
                "Use one of: purchase, sale, withdrawal, income, expense.".to_string(),
            ),
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Organization the operation was scoped to
    pub organization_id: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            organization_id: None,
        }
    }

    pub fn with_organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Error => log::error!(
                target: "banksampah::error",
                "[{}] {} - Operation: {} - Organization: {:?}",
                error.code(),
                error,
                context.operation,
                context.organization_id
            ),
            _ => log::warn!(
                target: "banksampah::error",
                "[{}] {} - Operation: {} - Organization: {:?}",
                error.code(),
                error,
                context.operation,
                context.organization_id
            ),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::InvalidRange.to_string(), "INVALID_RANGE");
        assert_eq!(ErrorCode::MissingCustomRange.to_string(), "MISSING_CUSTOM_RANGE");
    }

    #[test]
    fn test_core_error_severity() {
        let error = CoreError::InvalidRange {
            start: "2024-06-10".to_string(),
            end: "2024-06-01".to_string(),
        };
        assert_eq!(error.code(), ErrorCode::InvalidRange);
        assert_eq!(error.severity(), ErrorSeverity::Error);

        let error = CoreError::InvalidPreset { preset: "last 9 days".to_string() };
        assert_eq!(error.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_every_error_has_a_reportable_severity() {
        let errors = [
            CoreError::InvalidRange { start: "b".to_string(), end: "a".to_string() },
            CoreError::InvalidPreset { preset: "last 9 days".to_string() },
            CoreError::MissingCustomRange,
            CoreError::UnknownKind { value: "barter".to_string() },
        ];
        for error in &errors {
            let label = error.severity().to_string();
            assert!(label == "warning" || label == "error", "{}: {}", error, label);
        }
        assert_eq!(ErrorSeverity::Warning.to_string(), "warning");
    }

    #[test]
    fn test_error_details_invalid_range() {
        let error = CoreError::InvalidRange {
            start: "2024-06-10".to_string(),
            end: "2024-06-01".to_string(),
        };
        let details = error.to_details();

        assert_eq!(details.code, ErrorCode::InvalidRange);
        assert!(details.details.is_some());
        assert!(!details.suggestions.is_empty());
        assert!(details.to_string().starts_with("[INVALID_RANGE]"));
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("build_daily_profit").with_organization("bs-melati");
        assert_eq!(context.operation, "build_daily_profit");
        assert_eq!(context.organization_id.as_deref(), Some("bs-melati"));
    }
}
