use crate::{
    cli::Args,
    core::{
        assemble, load_path, load_reader, upgrade_document, upgrade_tree, AppError, BatchOptions,
        ConfigLoader, DefaultErrorReporter, ErrorCategory, ErrorReporter,
    },
    Result,
};
use std::{
    env,
    io::{self, Write},
    path::Path,
    process::ExitCode,
};

const STDIN_TARGET: &str = "-";

/// Upgrade a single document to stdout, or a directory tree into `--outdir`.
pub fn upgrade(args: Args) -> Result<ExitCode> {
    let cwd = env::current_dir()?;
    let config_path = ConfigLoader::resolve_path(args.config.as_deref(), &cwd);
    let config = ConfigLoader::load(&config_path)?;

    let mut options = config.batch_options();
    if let Some(extension) = args.cwl_extension {
        options.extension = extension.trim_start_matches('.').to_string();
    }
    options.fail_fast |= args.fail_fast;

    let target = args.target.as_path();
    if target != Path::new(STDIN_TARGET) && target.is_dir() {
        let Some(outdir) = args.outdir else {
            return Err(AppError::new(
                ErrorCategory::UsageError,
                "Missing --outdir: a directory TARGET is copied into --outdir before upgrading",
            )
            .with_context(target.display().to_string())
            .into());
        };
        return upgrade_directory(target, &outdir, &options);
    }

    if let Some(outdir) = &args.outdir {
        tracing::warn!(outdir = %outdir.display(), "--outdir is ignored for a single document");
    }
    upgrade_single(target)
}

fn upgrade_single(target: &Path) -> Result<ExitCode> {
    let doc = if target == Path::new(STDIN_TARGET) {
        load_reader(io::stdin().lock(), "<stdin>")
    } else {
        load_path(target)
    }
    .map_err(AppError::from)?;

    let upgraded = upgrade_document(doc).map_err(|e| {
        AppError::from(e).with_context(target.display().to_string())
    })?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(assemble(upgraded).as_bytes())?;
    stdout.flush()?;
    Ok(ExitCode::SUCCESS)
}

fn upgrade_directory(source: &Path, outdir: &Path, options: &BatchOptions) -> Result<ExitCode> {
    let report = upgrade_tree(source, outdir, options)?;
    let reporter = DefaultErrorReporter::new();
    for failure in &report.failed {
        reporter.report_error(&failure.error);
    }
    println!("{}", report.summary());

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
