use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cwl-upgrader")]
#[command(version = crate::VERSION)]
#[command(about = "Transform CWL documents from draft-3 to v1.0")]
#[command(help_template = super::HELP_TEMPLATE)]
#[command(
    after_long_help = "A single document is written to stdout. A directory is copied to --outdir and every matching document in the copy is upgraded."
)]
pub struct Args {
    /// draft-3 document to upgrade, `-` for stdin, or a directory tree
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory that receives a copy of the TARGET tree (required for directories)
    #[arg(long, value_name = "DIR")]
    pub outdir: Option<PathBuf>,

    /// Extension used to find documents when a directory is upgraded (default: cwl)
    #[arg(long, value_name = "EXT")]
    pub cwl_extension: Option<String>,

    /// Stop a directory run at the first document that fails
    #[arg(long)]
    pub fail_fast: bool,

    /// Path to custom config file (default: ./cwl-upgrader.toml)
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,

    /// Log rewrite decisions at debug level
    #[arg(long, help_heading = "Output Options")]
    pub verbose: bool,
}
