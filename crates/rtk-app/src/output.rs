use std::io::Write;

use rtk_config::output::{OutputConfig, OutputFormat};
use rtk_core::{MatchResult, PrimitiveStatus};
use serde::Serialize;

#[derive(Serialize)]
struct QueryReport<'a> {
    query: &'a [String],
    results: &'a [MatchResult],
    unmatched: Vec<&'a str>,
}

/// Write the outcome of one query
pub fn render<W: Write>(
    out: &mut W,
    config: &OutputConfig,
    query: &[String],
    results: &[MatchResult],
    primitives: &[PrimitiveStatus],
) -> anyhow::Result<()> {
    let unmatched = primitives
        .iter()
        .filter(|p| !p.found)
        .map(|p| p.primitive.as_str());

    match config.format {
        OutputFormat::Text => {
            for result in results {
                writeln!(out, "found: [{}] {} {}", result.id, result.kanji, result.meaning)?;
            }
            if results.is_empty() && config.show_unmatched {
                for primitive in unmatched {
                    writeln!(out, "not found: {primitive}")?;
                }
            }
        }
        OutputFormat::Json => {
            let report = QueryReport {
                query,
                results,
                unmatched: unmatched.collect(),
            };
            serde_json::to_writer(&mut *out, &report)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
