//! Command-line interface for the seqdiag utility
//!
//! Replays JSON build scripts through the sequence diagram builder.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::script::{parse_script, replay};
use seqdiag::core::logging::init_logging;
use seqdiag::{
    mermaid_code_block, Arrow, BlockKind, DiagramConfig, LineEnding, NestingPolicy,
    NotePlacement, SequenceDiagram,
};

/// Seqdiag - Build Mermaid.js sequence diagrams from scripts
#[derive(Parser)]
#[command(name = "seqdiag")]
#[command(about = "A Rust utility to build Mermaid.js sequence diagrams from JSON scripts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a diagram from a script and write it out
    Build {
        /// Input script (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the diagram (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Wrap the diagram in a ```mermaid Markdown code block
        #[arg(long)]
        markdown: bool,

        /// Line separator of the rendered diagram
        #[arg(long, value_enum, default_value_t = LineEndingChoice::Lf)]
        line_ending: LineEndingChoice,

        /// How block and activation pairing is checked
        #[arg(long, value_enum, default_value_t = NestingChoice::Strict)]
        nesting: NestingChoice,
    },

    /// Replay a script and report construction errors without writing
    Check {
        /// Input script (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// How block and activation pairing is checked
        #[arg(long, value_enum, default_value_t = NestingChoice::Strict)]
        nesting: NestingChoice,
    },

    /// Show the statement keywords and arrow tokens
    Tokens {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Supported line separators
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum LineEndingChoice {
    #[default]
    Lf,
    Crlf,
    Native,
}

impl From<LineEndingChoice> for LineEnding {
    fn from(value: LineEndingChoice) -> Self {
        match value {
            LineEndingChoice::Lf => LineEnding::Lf,
            LineEndingChoice::Crlf => LineEnding::CrLf,
            LineEndingChoice::Native => LineEnding::Native,
        }
    }
}

/// Block pairing policies
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum NestingChoice {
    /// Report unmatched, mismatched and unclosed blocks
    #[default]
    Strict,
    /// Trust the script's start/end pairing
    Trusting,
}

impl From<NestingChoice> for NestingPolicy {
    fn from(value: NestingChoice) -> Self {
        match value {
            NestingChoice::Strict => NestingPolicy::Strict,
            NestingChoice::Trusting => NestingPolicy::Trusting,
        }
    }
}

/// Main CLI application
pub struct SeqdiagApp {
    config: DiagramConfig,
}

impl SeqdiagApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::with_config(DiagramConfig::default())
    }

    /// Create a new application instance with a diagram config
    pub fn with_config(config: DiagramConfig) -> Self {
        Self { config }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("SEQDIAG_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("SEQDIAG_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Seqdiag v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Build {
                input,
                output,
                markdown,
                line_ending,
                nesting,
            } => {
                self.config = DiagramConfig::new(line_ending.into(), nesting.into());
                self.build_command(input, output, markdown, cli.verbose)
            }
            Commands::Check { input, nesting } => {
                self.config = self.config.with_nesting(nesting.into());
                self.check_command(input, cli.verbose)
            }
            Commands::Tokens { json } => self.tokens_command(json, cli.verbose),
        }
    }

    /// Handle the build command
    fn build_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        markdown: bool,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }
        let steps = parse_script(&content)?;

        let to_stdout = is_stdout(output.as_deref());
        let sink = self.open_output(output.as_deref())?;

        if markdown {
            // The fence needs the finished text, so build into memory first
            let mut diagram = SequenceDiagram::with_config(Vec::new(), self.config);
            replay(&steps, &mut diagram);
            let finalized = diagram.finalize();

            // Written even when construction failed
            let text = String::from_utf8(diagram.into_inner())?;
            let block = mermaid_code_block(&text, self.config.line_ending.as_str());
            let mut sink = sink;
            sink.write_all(block.as_bytes())?;
            sink.flush()?;
            finalized?;
            finish_output(sink, to_stdout)?;
        } else {
            let mut diagram = SequenceDiagram::with_config(sink, self.config);
            replay(&steps, &mut diagram);
            diagram.finalize()?;
            finish_output(diagram.into_inner(), to_stdout)?;
        }

        info!(steps = steps.len(), markdown, "Built diagram");
        if verbose {
            eprintln!("Successfully built diagram from {} steps", steps.len());
        }
        Ok(())
    }

    /// Handle the check command
    fn check_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }
        let steps = parse_script(&content)?;

        let mut diagram = SequenceDiagram::with_config(io::sink(), self.config);
        replay(&steps, &mut diagram);

        match diagram.check() {
            Ok(()) => {
                println!(
                    "✓ Valid sequence diagram ({} lines)",
                    diagram.line_count()
                );
                Ok(())
            }
            Err(e) => {
                println!("✗ Invalid sequence diagram: {}", e);
                Err(e.into())
            }
        }
    }

    /// Handle the tokens command
    fn tokens_command(&self, json: bool, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing statement tokens");
        }

        if json {
            let arrows: Vec<_> = Arrow::ALL
                .iter()
                .map(|a| serde_json::json!({ "name": a.name(), "token": a.token() }))
                .collect();
            let blocks: Vec<_> = BlockKind::ALL
                .iter()
                .map(|b| {
                    serde_json::json!({
                        "keyword": b.keyword(),
                        "branch": b.branch_keyword(),
                    })
                })
                .collect();
            let notes: Vec<_> = NotePlacement::ALL.iter().map(|p| p.keyword()).collect();
            let tokens = serde_json::json!({
                "arrows": arrows,
                "blocks": blocks,
                "note_placements": notes,
            });
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        } else {
            println!("Arrows:");
            for arrow in Arrow::ALL {
                println!("  {:<16} {}", arrow.name(), arrow.token());
            }
            println!();
            println!("Blocks:");
            for kind in BlockKind::ALL {
                match kind.branch_keyword() {
                    Some(branch) => println!("  {:<16} {} ... end", kind.keyword(), branch),
                    None => println!("  {:<16} end", kind.keyword()),
                }
            }
            println!();
            println!("Notes:");
            for placement in NotePlacement::ALL {
                println!("  Note {}", placement);
            }
        }

        Ok(())
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Open the output destination: a file, or stdout for none or `-`
    pub fn open_output(&self, output: Option<&Path>) -> Result<Box<dyn Write>> {
        match output {
            Some(path) if !is_stdout(Some(path)) => {
                debug!(path = %path.display(), "Opening output file");
                let file = File::create(path).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
                Ok(Box::new(BufWriter::new(file)))
            }
            _ => Ok(Box::new(io::stdout())),
        }
    }

    /// Get the diagram config (for testing)
    #[cfg(test)]
    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }
}

impl Default for SeqdiagApp {
    fn default() -> Self {
        Self::new()
    }
}

fn is_stdout(output: Option<&Path>) -> bool {
    match output {
        None => true,
        Some(path) => path.to_string_lossy() == "-",
    }
}

/// Terminate stdout output with a newline and flush
fn finish_output(mut sink: Box<dyn Write>, to_stdout: bool) -> Result<()> {
    if to_stdout {
        sink.write_all(b"\n")?;
    }
    sink.flush()?;
    Ok(())
}
