use crate::cli::Args;
use std::path::Path;

/// Execution contexts that influence how logging is routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionContext {
    /// A single document is upgraded and written to stdout.
    Stream,
    /// A directory tree is mirrored and upgraded in place.
    Batch,
}

impl ExecutionContext {
    /// Returns `true` when stdout carries the command's payload and must not
    /// receive log lines.
    pub fn owns_stdout(self) -> bool {
        matches!(self, ExecutionContext::Stream)
    }
}

/// Derive the active execution context from the parsed CLI arguments.
pub fn detect_context(args: &Args) -> ExecutionContext {
    if args.target != Path::new("-") && args.target.is_dir() {
        ExecutionContext::Batch
    } else {
        ExecutionContext::Stream
    }
}
