use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "todo", about = concat!("todomvc v", env!("CARGO_PKG_VERSION"), " - a task list for your terminal"), version)]
pub struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Write debug logs to this file (overrides [log] file in the config)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}
