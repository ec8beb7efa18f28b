//! Seqdiag CLI - Build Mermaid.js sequence diagrams from JSON scripts

mod cli;
mod script;

use clap::Parser;

fn main() {
    // Logging is initialized in run() once the flags are known
    let cli_args = cli::Cli::parse();

    let mut app = cli::SeqdiagApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
