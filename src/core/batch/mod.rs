#![allow(clippy::result_large_err)]

//! Directory mode: mirror a tree of documents and upgrade every match in the
//! mirror.

use crate::core::document::load_path;
use crate::core::error::AppError;
use crate::core::output::assemble;
use crate::core::types::ErrorCategory;
use crate::core::upgrade::upgrade_document;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_EXTENSION: &str = "cwl";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// File extension, without the dot, of the documents to upgrade.
    pub extension: String,
    /// Stop at the first document that fails instead of recording it.
    pub fail_fast: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        BatchOptions {
            extension: DEFAULT_EXTENSION.to_string(),
            fail_fast: false,
        }
    }
}

#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: AppError,
}

/// Outcome of one directory run. Paths are relative to the source root.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub upgraded: Vec<PathBuf>,
    pub failed: Vec<FileFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} document(s) upgraded, {} failed",
            self.upgraded.len(),
            self.failed.len()
        )
    }
}

/// Copy `src` to `dst`. An existing `dst` is removed and the copy retried once.
pub fn mirror_tree(src: &Path, dst: &Path) -> Result<(), AppError> {
    match copy_tree(src, dst) {
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            tracing::warn!(path = %dst.display(), "output location exists, replacing it");
            remove_existing(dst).map_err(|e| io_error("remove", dst, e))?;
            copy_tree(src, dst).map_err(|e| io_error("copy", src, e))
        }
        other => other.map_err(|e| io_error("copy", src, e)),
    }
}

fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir(dst)?;
    let skip = fs::canonicalize(dst)?;
    let mut pending = vec![(src.to_path_buf(), dst.to_path_buf())];
    while let Some((from, to)) = pending.pop() {
        for entry in fs::read_dir(&from)? {
            let entry = entry?;
            let source = entry.path();
            let target = to.join(entry.file_name());
            if fs::metadata(&source)?.is_dir() {
                if fs::canonicalize(&source)? == skip {
                    continue;
                }
                fs::create_dir(&target)?;
                pending.push((source, target));
            } else {
                fs::copy(&source, &target)?;
            }
        }
    }
    Ok(())
}

fn remove_existing(path: &Path) -> io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Files under `root` whose name ends in `.<extension>`, sorted.
pub fn collect_documents(root: &Path, extension: &str) -> Result<Vec<PathBuf>, AppError> {
    let suffix = format!(".{}", extension);
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = fs::read_dir(&dir).map_err(|e| io_error("scan", &dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| io_error("scan", &dir, e))?;
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if entry.file_name().to_string_lossy().ends_with(&suffix) {
                found.push(path);
            }
        }
    }
    found.sort();
    Ok(found)
}

/// Mirror `src` into `dst`, then replace each matching document in the mirror
/// with its upgraded form.
pub fn upgrade_tree(src: &Path, dst: &Path, options: &BatchOptions) -> Result<BatchReport, AppError> {
    mirror_tree(src, dst)?;
    let documents = collect_documents(src, &options.extension)?;
    tracing::info!(
        source = %src.display(),
        output = %dst.display(),
        count = documents.len(),
        "upgrading directory"
    );

    let mut report = BatchReport::default();
    for source in documents {
        let relative = source.strip_prefix(src).unwrap_or(&source).to_path_buf();
        let target = dst.join(&relative);
        match upgrade_file(&source, &target) {
            Ok(()) => {
                tracing::info!(path = %relative.display(), "upgraded");
                report.upgraded.push(relative);
            }
            Err(mut error) => {
                tracing::warn!(path = %relative.display(), error = %error.message, "upgrade failed");
                error.add_context("path", &relative.display().to_string());
                if options.fail_fast {
                    return Err(error);
                }
                report.failed.push(FileFailure {
                    path: relative,
                    error,
                });
            }
        }
    }
    Ok(report)
}

/// Upgrade the document at `source` and write the result to `target`.
pub fn upgrade_file(source: &Path, target: &Path) -> Result<(), AppError> {
    let doc = load_path(source)?;
    let upgraded = upgrade_document(doc)?;
    fs::write(target, assemble(upgraded)).map_err(|e| io_error("write", target, e))
}

fn io_error(action: &str, path: &Path, err: io::Error) -> AppError {
    AppError::with_source(
        ErrorCategory::IoError,
        format!("Failed to {} {}: {}", action, path.display(), err),
        Box::new(err),
    )
}
