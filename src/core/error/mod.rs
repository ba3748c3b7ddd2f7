use crate::core::types::{ErrorCategory, ErrorSeverity};
use crate::core::upgrade::UpgradeError;
use std::collections::HashMap;

#[derive(Debug)]
pub struct AppError {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub code: String,
    pub message: String,
    pub context: HashMap<String, String>,
    pub recovery_suggestions: Vec<String>,
    pub source: Option<anyhow::Error>,
}

impl AppError {
    pub fn new<T: Into<String>>(category: ErrorCategory, message: T) -> Self {
        let severity = match category {
            ErrorCategory::UsageError => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        };
        AppError {
            category,
            severity,
            code: category.default_code().to_string(),
            message: message.into(),
            context: HashMap::new(),
            recovery_suggestions: vec![],
            source: None,
        }
    }

    pub fn with_source<T: Into<String>>(
        category: ErrorCategory,
        message: T,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        let mut error = AppError::new(category, message);
        error.source = Some(anyhow::anyhow!(source));
        error
    }

    pub fn with_context<T: Into<String>>(mut self, context: T) -> Self {
        self.context.insert("context".to_string(), context.into());
        self
    }

    pub fn with_code<T: Into<String>>(mut self, code: T) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_suggestion<T: Into<String>>(mut self, suggestion: T) -> Self {
        self.recovery_suggestions.push(suggestion.into());
        self
    }

    pub fn add_context(&mut self, key: &str, value: &str) {
        self.context.insert(key.to_string(), value.to_string());
    }

    pub fn severity(&self) -> ErrorSeverity {
        self.severity
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.category, self.message)?;
        if !self.context.is_empty() {
            let mut pairs: Vec<_> = self.context.iter().collect();
            pairs.sort();
            write!(f, " (Context: {:?})", pairs)?;
        }
        if let Some(ref source) = self.source {
            write!(f, "\nCaused by: {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

impl From<UpgradeError> for AppError {
    fn from(e: UpgradeError) -> Self {
        let category = match &e {
            UpgradeError::Read { .. } => ErrorCategory::IoError,
            UpgradeError::Parse { .. } | UpgradeError::EmptyDocument { .. } => {
                ErrorCategory::SerializationError
            }
            UpgradeError::MissingClass
            | UpgradeError::MissingField { .. }
            | UpgradeError::UnexpectedShape { .. } => ErrorCategory::ValidationError,
        };
        let suggestion = match category {
            ErrorCategory::IoError => "Check file permissions and paths",
            ErrorCategory::SerializationError => "Check that the file is valid YAML",
            _ => "Check that the document is a draft-3 CommandLineTool, ExpressionTool or Workflow",
        };
        AppError::new(category, e.to_string())
            .with_suggestion(suggestion)
            .with_source_error(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::new(ErrorCategory::IoError, e.to_string())
            .with_suggestion("Check file permissions and paths")
            .with_source_error(e)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        let mut error = AppError::new(ErrorCategory::InternalError, e.to_string())
            .with_suggestion("Check the error details");
        error.source = Some(e);
        error
    }
}

impl AppError {
    fn with_source_error<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(anyhow::Error::new(source));
        self
    }
}

pub trait ErrorReporter {
    fn report_error(&self, error: &AppError);
    fn report_warning(&self, message: &str, context: Option<String>);
}

/// Writes errors to stderr. Stdout stays reserved for upgraded documents.
pub struct DefaultErrorReporter;

impl DefaultErrorReporter {
    pub fn new() -> Self {
        DefaultErrorReporter
    }
}

impl Default for DefaultErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorReporter for DefaultErrorReporter {
    fn report_error(&self, error: &AppError) {
        eprintln!("[ERROR] {}: {}", error.code, error.message);
        if !error.context.is_empty() {
            eprintln!("  Context: {:?}", error.context);
        }
        for suggestion in &error.recovery_suggestions {
            eprintln!("  Hint: {}", suggestion);
        }
    }

    fn report_warning(&self, message: &str, context: Option<String>) {
        eprintln!("[WARNING] {}", message);
        if let Some(ref ctx) = context {
            eprintln!("  Context: {}", ctx);
        }
    }
}
