use clap::Parser;
use todomvc::cli::commands::Cli;
use todomvc::io::{config_io, logging};

fn main() {
    let cli = Cli::parse();

    let mut config = match config_io::read_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(path) = cli.log_file {
        config.log.file = Some(path);
    }

    // Held until exit so buffered log lines reach the file
    let log_guard = match logging::init_logging(&config.log) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = todomvc::tui::run(&config) {
        tracing::error!(error = %e, "tui exited with error");
        eprintln!("error: {}", e);
        drop(log_guard);
        std::process::exit(1);
    }
}
