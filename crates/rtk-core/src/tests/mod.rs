use std::io::Cursor;

use crate::session::Session;
use crate::types::MatchResult;


fn session(dictionary: &str) -> Session<Cursor<Vec<u8>>> {
    Session::from_reader(Cursor::new(dictionary.as_bytes().to_vec()))
}

fn ids(results: &[MatchResult]) -> Vec<u32> {
    results.iter().map(|r| r.id).collect()
}
