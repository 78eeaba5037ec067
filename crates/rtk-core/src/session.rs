use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

use crate::error::LookupError;
use crate::lookup::scan;
use crate::types::{MatchResult, PrimitiveStatus, ScanStats};

/// An open dictionary plus the diagnostics of the last query.
///
/// Every query rescans the stream from the start; nothing but the stream
/// itself survives from one query to the next. Queries take `&mut self`,
/// so callers are serialized by construction.
pub struct Session<R = BufReader<File>> {
    dictionary: R,
    primitives: Vec<PrimitiveStatus>,
    stats: ScanStats,
}

impl Session<BufReader<File>> {
    /// Open a dictionary file. Failing here is fatal for the caller.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LookupError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LookupError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Opened kanji dictionary: {}", path.display());
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead + Seek> Session<R> {
    pub fn from_reader(dictionary: R) -> Self {
        Self {
            dictionary,
            primitives: Vec::new(),
            stats: ScanStats::default(),
        }
    }

    /// Find every kanji composed of all the given primitives.
    ///
    /// Results are in dictionary order and owned by the caller. An empty
    /// primitive list matches nothing and leaves the stream untouched.
    pub fn query<S: AsRef<str>>(&mut self, primitives: &[S]) -> Result<Vec<MatchResult>, LookupError> {
        self.reset();
        if primitives.is_empty() {
            return Ok(Vec::new());
        }

        let outcome = scan(&mut self.dictionary, primitives);
        self.dictionary.rewind()?;
        let outcome = outcome?;

        tracing::info!(
            "Query {:?}: {} matches in {} records",
            primitives.iter().map(|p| p.as_ref()).collect::<Vec<&str>>(),
            outcome.results.len(),
            outcome.stats.records
        );

        self.primitives = outcome.primitives;
        self.stats = outcome.stats;
        Ok(outcome.results)
    }

    /// Per-primitive found flags of the last query, in input order
    pub fn primitives(&self) -> &[PrimitiveStatus] {
        &self.primitives
    }

    /// Found flag of the primitive at `index` in the last query
    pub fn is_found(&self, index: usize) -> Option<bool> {
        self.primitives.get(index).map(|p| p.found)
    }

    /// Primitives of the last query that no record named directly
    pub fn unmatched(&self) -> impl Iterator<Item = &PrimitiveStatus> {
        self.primitives.iter().filter(|p| !p.found)
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Forget the diagnostics of the last query
    pub fn reset(&mut self) {
        self.primitives.clear();
        self.stats = ScanStats::default();
    }

    /// Close the dictionary
    pub fn shutdown(self) {
        tracing::info!("Closing kanji dictionary");
    }
}
