use clap::Parser;
use std::path::PathBuf;

/// Document rewritten when no path is given
pub const DEFAULT_DOCUMENT: &str = "index.html";

/// section-reorder - put the engine sections in order and alternate their layout
#[derive(Parser, Debug)]
#[command(name = "section-reorder")]
#[command(about = "Reorders the seven engine sections of a page and alternates image/text layout")]
#[command(version)]
pub struct Cli {
    /// Markup document to rewrite in place
    #[arg(value_name = "FILE", default_value = DEFAULT_DOCUMENT)]
    pub file: PathBuf,

    /// JSON profile replacing the built-in anchors, markers and separators
    #[arg(short, long, value_name = "PATH")]
    pub profile: Option<PathBuf>,

    /// Write the active profile as JSON to PATH and exit
    #[arg(long, value_name = "PATH")]
    pub save_profile: Option<PathBuf>,

    /// Dry-run mode: extract, relayout and splice without writing the file
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }
}
