use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use subtitle_realign::formats::Format;

#[derive(Debug, Parser)]
#[command(name = "subrealign")]
#[command(about = "Re-time subtitles so each caption is one complete sentence.")]
pub struct Args {
    /// Path to config TOML (defaults to ./config.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Realign cues to sentence boundaries and write a subtitle file
    Realign(RealignCmd),
    /// Write the realigned sentences as plain text, one per line
    Extract(ExtractCmd),
    /// Print the effective default config as TOML and exit
    PrintDefaultConfig,
}

#[derive(Debug, ClapArgs)]
pub struct IoArgs {
    /// Input file path, or '-' for stdin
    pub input: String,

    /// Output file path (optional)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Force input format (otherwise inferred from extension or content)
    #[arg(long, value_enum)]
    pub from: Option<Format>,

    /// Write to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Allow overwriting output file
    #[arg(long)]
    pub overwrite: bool,

    /// Merge sentences with at most this many characters into the previous one
    #[arg(long)]
    pub min_sentence_length: Option<usize>,
}

#[derive(Debug, Parser)]
pub struct RealignCmd {
    #[command(flatten)]
    pub io: IoArgs,

    /// Target format (defaults to the input format, or VTT for TXT/JSON input)
    #[arg(long, value_enum)]
    pub to: Option<Format>,

    /// File with one translated line per output sentence
    #[arg(long)]
    pub translations: Option<PathBuf>,

    /// Language of the translations (used in the VTT/JSON header)
    #[arg(long)]
    pub target_language: Option<String>,
}

#[derive(Debug, Parser)]
pub struct ExtractCmd {
    #[command(flatten)]
    pub io: IoArgs,
}
