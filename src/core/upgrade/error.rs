use std::io;

/// Failures raised while loading or rewriting a single document.
///
/// Unsupported-but-valid shapes (wide unions, nested optionals) are never
/// reported here; they are left unconverted.
#[derive(Debug, thiserror::Error)]
pub enum UpgradeError {
    #[error("document has no `class` field")]
    MissingClass,

    #[error("{block}[{index}] is missing required field `{field}`")]
    MissingField {
        block: String,
        index: usize,
        field: &'static str,
    },

    #[error("{block}[{index}] must be {expected}")]
    UnexpectedShape {
        block: String,
        index: usize,
        expected: &'static str,
    },

    #[error("{origin} does not contain a document")]
    EmptyDocument { origin: String },

    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        source: serde_yaml::Error,
    },

    #[error("failed to read {origin}: {source}")]
    Read { origin: String, source: io::Error },
}

impl UpgradeError {
    pub(crate) fn missing_field(block: &str, index: usize, field: &'static str) -> Self {
        UpgradeError::MissingField {
            block: block.to_string(),
            index,
            field,
        }
    }

    pub(crate) fn unexpected_shape(block: &str, index: usize, expected: &'static str) -> Self {
        UpgradeError::UnexpectedShape {
            block: block.to_string(),
            index,
            expected,
        }
    }
}
