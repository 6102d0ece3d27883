//! Command line argument parsing for the smart-speller CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// smart-speller - frequency-weighted spelling and sentence correction
#[derive(Parser, Debug, Clone)]
#[command(name = "smart-speller")]
#[command(about = "Frequency-weighted spelling and sentence correction")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SpellerArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Frequency corpus (one `word [frequency]` per line); the bundled English
    /// corpus is used when absent
    #[arg(short, long, value_name = "PATH", env = "SMART_SPELLER_DICTIONARY")]
    pub dictionary: Option<PathBuf>,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SpellerArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Correct individual words
    Correct(CorrectArgs),

    /// List ranked suggestions for a word
    Candidates(CandidatesArgs),

    /// Rank corrected versions of a sentence
    Process(ProcessArgs),

    /// Show dictionary and index statistics
    Stats,

    /// Correct sentences read from stdin
    Interactive(InteractiveArgs),
}

/// Arguments for correcting words
#[derive(Parser, Debug, Clone)]
pub struct CorrectArgs {
    /// Words to correct
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,
}

/// Arguments for listing suggestions
#[derive(Parser, Debug, Clone)]
pub struct CandidatesArgs {
    /// Word to look up
    #[arg(value_name = "WORD")]
    pub word: String,

    /// Maximum edit distance (defaults to the configured distance)
    #[arg(short = 'm', long)]
    pub max_distance: Option<usize>,

    /// Maximum number of suggestions to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for processing sentences
#[derive(Parser, Debug, Clone)]
pub struct ProcessArgs {
    /// Sentence to correct
    #[arg(value_name = "SENTENCE", required_unless_present = "input")]
    pub sentence: Option<String>,

    /// File with one sentence per line, processed in parallel
    #[arg(short, long, value_name = "FILE", conflicts_with = "sentence")]
    pub input: Option<PathBuf>,

    /// Number of ranked candidates to show per sentence
    #[arg(short = 'n', long, default_value = "5")]
    pub top: usize,
}

/// Arguments for the interactive loop
#[derive(Parser, Debug, Clone)]
pub struct InteractiveArgs {
    /// Input line that ends the session
    #[arg(long, default_value = "xxx")]
    pub stop_word: String,

    /// Number of ranked candidates to show per sentence
    #[arg(short = 'n', long, default_value = "1")]
    pub top: usize,
}

/// Output formats supported by the CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
