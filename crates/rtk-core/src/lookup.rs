//! Lookup by primitive.
//!
//! A single forward pass over the dictionary. Every query primitive carries
//! an alias set that starts empty and grows as records are scanned: when a
//! record names a primitive directly, its other glosses become aliases, and
//! when a record is built out of a primitive (or one of its aliases), that
//! record's own glosses become aliases too. Later, larger kanji can then be
//! matched through the simpler ones that preceded them. Order matters: a
//! primitive has to be defined before anything that is composed from it.

use std::io::BufRead;

use crate::dictionary::{DictionaryRecord, Records};
use crate::error::LookupError;
use crate::preprocess::normalize;
use crate::types::{MatchResult, PrimitiveStatus, ScanStats};

/// Per-query working state of one user supplied primitive
#[derive(Debug)]
struct QueryPrimitive {
    raw: String,
    normalized: String,
    aliases: Vec<String>,
    found: bool,
}

impl QueryPrimitive {
    fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            normalized: normalize(raw),
            aliases: Vec::new(),
            found: false,
        }
    }

    /// The primitive itself or anything it has been aliased to so far
    fn is_part_of(&self, sub_primitives: &[String]) -> bool {
        std::iter::once(&self.normalized)
            .chain(&self.aliases)
            .any(|alias| sub_primitives.contains(alias))
    }

    fn into_status(self) -> PrimitiveStatus {
        PrimitiveStatus {
            primitive: self.raw,
            normalized: self.normalized,
            found: self.found,
        }
    }
}

/// Everything a finished scan produced
#[derive(Debug, Clone, Default)]
pub struct LookupOutcome {
    pub results: Vec<MatchResult>,
    pub primitives: Vec<PrimitiveStatus>,
    pub stats: ScanStats,
}

/// Matching state for one query. Feed it records in dictionary order.
#[derive(Debug)]
pub struct Lookup {
    primitives: Vec<QueryPrimitive>,
    results: Vec<MatchResult>,
}

impl Lookup {
    pub fn new<S: AsRef<str>>(primitives: &[S]) -> Self {
        Self {
            primitives: primitives
                .iter()
                .map(|p| QueryPrimitive::new(p.as_ref()))
                .collect(),
            results: Vec::new(),
        }
    }

    /// Match one record against the query, updating alias sets.
    /// Returns true when the record was added to the results.
    pub fn feed(&mut self, record: &DictionaryRecord) -> bool {
        let wanted = self.primitives.len();
        if wanted == 0 {
            return false;
        }

        let meanings: Vec<String> = record.meanings().map(normalize).collect();
        let skip = record.skip;

        // Direct hits on the meaning/alternates. Only the first primitive
        // hit in this record picks up the other glosses as aliases.
        let mut direct = 0;
        for primitive in &mut self.primitives {
            let Some(pos) = meanings.iter().position(|m| *m == primitive.normalized) else {
                continue;
            };

            direct += 1;
            primitive.found = true;

            if direct == 1 && pos >= skip {
                let aliases = meanings
                    .iter()
                    .enumerate()
                    .skip(skip)
                    .filter(|(k, _)| *k != pos)
                    .map(|(_, m)| m.clone());
                primitive.aliases.extend(aliases);
            }
        }

        let matched = match &record.sub_primitives {
            None => direct == wanted,
            Some(subs) => {
                let subs: Vec<String> = subs.iter().map(|s| normalize(s)).collect();
                self.decompose(&meanings, &subs, skip) >= wanted
            }
        };

        if matched && record.id != 0 {
            tracing::debug!(id = record.id, kanji = %record.kanji, "record matched");
            self.results
                .push(MatchResult::new(record.id, &record.kanji, &record.meaning));
            return true;
        }

        false
    }

    /// Count how many primitives this composite kanji satisfies.
    ///
    /// A primitive that appears (itself or via an alias) among the
    /// sub-primitives counts once and learns this kanji's glosses. One that
    /// does not still counts for every gloss that names it directly.
    /// So `tree` alone matches a `forest` record listing `tree` as a part.
    fn decompose(&mut self, meanings: &[String], subs: &[String], skip: usize) -> usize {
        let mut count = 0;

        for primitive in &mut self.primitives {
            if primitive.is_part_of(subs) {
                count += 1;
                primitive
                    .aliases
                    .extend(meanings.iter().skip(skip).cloned());
            } else {
                count += meanings
                    .iter()
                    .filter(|m| **m == primitive.normalized)
                    .count();
            }
        }

        count
    }

    /// Matches accumulated so far, in scan order
    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn finish(self, stats: ScanStats) -> LookupOutcome {
        LookupOutcome {
            stats: ScanStats {
                matches: self.results.len(),
                ..stats
            },
            results: self.results,
            primitives: self
                .primitives
                .into_iter()
                .map(QueryPrimitive::into_status)
                .collect(),
        }
    }
}

/// Run one query over a dictionary stream from its current position to
/// the end. Malformed lines are logged and skipped.
pub fn scan<R: BufRead, S: AsRef<str>>(
    reader: R,
    primitives: &[S],
) -> Result<LookupOutcome, LookupError> {
    let mut lookup = Lookup::new(primitives);
    let mut records = Records::new(reader);
    let mut stats = ScanStats::default();

    for item in records.by_ref() {
        match item? {
            Ok(record) => {
                stats.records += 1;
                lookup.feed(&record);
            }
            Err(e) => {
                stats.malformed += 1;
                tracing::warn!("{e}");
            }
        }
    }
    stats.lines = records.line_number();

    let outcome = lookup.finish(stats);
    tracing::debug!(
        records = outcome.stats.records,
        malformed = outcome.stats.malformed,
        matches = outcome.stats.matches,
        "scan finished"
    );

    Ok(outcome)
}
