//! pdf-assistant CLI binary.

use std::process::ExitCode;

use clap::Parser;
use pdf_assistant::cli::{Cli, execute};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(&cli) {
        Ok(output) => {
            if !output.is_empty() {
                #[allow(clippy::print_stdout)]
                {
                    if output.ends_with('\n') {
                        print!("{output}");
                    } else {
                        println!("{output}");
                    }
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout carries answers and MCP traffic.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,pdf_assistant=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
