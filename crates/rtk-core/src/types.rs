use serde::{Deserialize, Serialize};

/// A kanji whose composition satisfied every query primitive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: u32,
    pub kanji: String,
    pub meaning: String,
}

impl MatchResult {
    pub fn new(id: u32, kanji: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            id,
            kanji: kanji.into(),
            meaning: meaning.into(),
        }
    }
}

/// Outcome of one query primitive after a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimitiveStatus {
    /// As typed by the user
    pub primitive: String,
    pub normalized: String,
    /// Some record's meaning or alternate named this primitive directly
    pub found: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub lines: usize,
    pub records: usize,
    pub malformed: usize,
    pub matches: usize,
}
