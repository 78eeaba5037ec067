use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Failed to open dictionary {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A dictionary line that could not be turned into a record.
/// Never fatal; the scan logs it and moves on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to parse line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("missing {0} field")]
    MissingField(&'static str),

    #[error("empty {0} field")]
    EmptyField(&'static str),

    #[error("more than six fields")]
    TooManyFields,

    #[error("not valid UTF-8")]
    InvalidUtf8,
}
