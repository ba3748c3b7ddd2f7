pub mod args;
pub mod commands;

pub use args::Args;

use std::process::ExitCode;

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\n{all-args}\n";

pub fn run(args: Args) -> crate::Result<ExitCode> {
    commands::upgrade(args)
}
