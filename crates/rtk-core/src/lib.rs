pub mod dictionary;
pub mod error;
pub mod lookup;
pub mod preprocess;
pub mod session;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{LookupError, ParseError, ParseErrorKind};
pub use session::Session;
pub use types::{MatchResult, PrimitiveStatus, ScanStats};
