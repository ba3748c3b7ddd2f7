use serde::{Deserialize, Serialize};

/// Error category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Input document parsed but has the wrong structure.
    ValidationError,
    /// Input text is not a readable document.
    SerializationError,
    IoError,
    ConfigurationError,
    UsageError,
    InternalError,
}

impl ErrorCategory {
    /// Stable code used when no more specific code is attached.
    pub fn default_code(self) -> &'static str {
        match self {
            ErrorCategory::ValidationError => "CWL-SHAPE-001",
            ErrorCategory::SerializationError => "CWL-LOAD-001",
            ErrorCategory::IoError => "CWL-IO-001",
            ErrorCategory::ConfigurationError => "CWL-CONFIG-001",
            ErrorCategory::UsageError => "CWL-USAGE-001",
            ErrorCategory::InternalError => "CWL-INTERNAL-001",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Error severity enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Error,
    Warning,
}
