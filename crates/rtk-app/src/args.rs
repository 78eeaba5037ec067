use std::path::PathBuf;

use clap::{ArgAction, Parser};
use rtk_config::output::OutputFormat;

/// Find kanji by the primitives they are built from
#[derive(Parser, Debug, Clone)]
#[command(name = "rtk-lookup")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Kanji dictionary file
    pub dictionary: PathBuf,

    /// Primitives the kanji must contain. Without any, one query per
    /// stdin line is read instead.
    pub primitives: Vec<String>,

    /// Output format (text or json)
    #[arg(short = 'f', long = "format")]
    pub format: Option<OutputFormat>,

    /// JSON config file, replaces the environment defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Log filter forced by the command line, if any
    pub fn log_override(&self) -> Option<&'static str> {
        if self.quiet {
            return Some("error");
        }
        match self.verbose {
            0 => None,
            1 => Some("info"),
            _ => Some("debug"),
        }
    }
}
