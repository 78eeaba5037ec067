use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use rtk_config::Config;
use rtk_core::Session;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod args;
mod output;

use self::args::Args;

fn main() -> ExitCode {
    // Optional .env in the working directory
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: failed to load config {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Config::new(),
    };
    if let Some(format) = args.format {
        config.output.format = format;
    }

    init_tracing(&args, &config);

    let session = match Session::open(&args.dictionary) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    match run(session, &args.primitives, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(args: &Args, config: &Config) {
    let filter = match args.log_override() {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// One batch query from the command line, or one query per stdin line
fn run(mut session: Session, primitives: &[String], config: &Config) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !primitives.is_empty() {
        lookup(&mut session, primitives, config, &mut out)?;
    } else {
        tracing::info!("Reading queries from stdin");
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read query from stdin")?;
            let query: Vec<String> = line.split_whitespace().map(str::to_string).collect();
            if query.is_empty() {
                continue;
            }
            lookup(&mut session, &query, config, &mut out)?;
            out.flush()?;
        }
    }

    session.shutdown();
    Ok(())
}

fn lookup<W: Write>(
    session: &mut Session,
    query: &[String],
    config: &Config,
    out: &mut W,
) -> anyhow::Result<()> {
    let results = session
        .query(query)
        .with_context(|| format!("Lookup failed for {query:?}"))?;

    output::render(out, &config.output, query, &results, session.primitives())
}
