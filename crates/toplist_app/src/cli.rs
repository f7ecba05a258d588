use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "toplist", version, about = "Browse the GitHub toplist from a terminal")]
pub struct Cli {
    /// Path to the RON config file; defaults apply when it does not exist.
    #[arg(long, default_value = "toplist.ron")]
    pub config: PathBuf,

    /// Fragment present at load time, e.g. `rust/2`.
    #[arg(long, default_value = "")]
    pub fragment: String,

    /// Overrides `api_base` from the config file.
    #[arg(long)]
    pub api: Option<String>,
}
