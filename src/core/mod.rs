pub mod batch;
pub mod config;
pub mod document;
pub mod error;
pub mod output;
pub mod types;
pub mod upgrade;

pub use batch::{upgrade_file, upgrade_tree, BatchOptions, BatchReport};
pub use config::{ConfigLoader, UpgraderConfig};
pub use document::{load_path, load_reader, load_str, Node};
pub use error::{AppError, DefaultErrorReporter, ErrorReporter};
pub use output::assemble;
pub use types::*;
pub use upgrade::{upgrade_document, UpgradeError};
