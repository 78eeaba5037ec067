use std::io::BufRead;
use std::str::FromStr;

use crate::error::{ParseError, ParseErrorKind};

const FIELD_NAMES: [&str; 6] = ["id", "skip", "kanji", "meaning", "alternates", "sub-primitives"];

/// Marks the end of a `/` list, or an atomic kanji when it is the whole
/// sub-primitive field
const SENTINEL: &str = "-";

/// One line of the kanji dictionary:
///
/// `<id>:<skip>:<kanji>:<meaning>:<alt1>/<alt2>/.../-:<sub1>/<sub2>/.../-`
///
/// Strings are kept as written; normalization happens at match time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryRecord {
    /// 0 for numberless kanji, which are never reported
    pub id: u32,
    /// Leading meaning/alternate entries kept out of alias propagation
    pub skip: usize,
    pub kanji: String,
    pub meaning: String,
    pub alternates: Vec<String>,
    /// `None` when the kanji has no decomposition
    pub sub_primitives: Option<Vec<String>>,
}

impl DictionaryRecord {
    pub fn is_atomic(&self) -> bool {
        self.sub_primitives.is_none()
    }

    /// Primary meaning followed by the alternates, in file order
    pub fn meanings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.meaning.as_str()).chain(self.alternates.iter().map(String::as_str))
    }
}

/// Parse a single dictionary line.
///
/// Returns `Ok(None)` for blank lines and `#` comments.
pub fn parse_record(line: &str, line_number: usize) -> Result<Option<DictionaryRecord>, ParseError> {
    let line = line.trim_end_matches(['\n', '\r']);
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let fail = |kind| ParseError {
        line: line_number,
        kind,
    };

    let fields: Vec<&str> = line.split(':').collect();
    if fields.len() > FIELD_NAMES.len() {
        return Err(fail(ParseErrorKind::TooManyFields));
    }
    if fields.len() < FIELD_NAMES.len() {
        return Err(fail(ParseErrorKind::MissingField(FIELD_NAMES[fields.len()])));
    }
    if let Some(idx) = fields.iter().position(|f| f.is_empty()) {
        return Err(fail(ParseErrorKind::EmptyField(FIELD_NAMES[idx])));
    }

    let sub_primitives = match fields[5] {
        SENTINEL => None,
        list => Some(split_list(list)),
    };

    Ok(Some(DictionaryRecord {
        id: parse_number(fields[0]),
        skip: parse_number(fields[1]),
        kanji: fields[2].to_string(),
        meaning: fields[3].to_string(),
        alternates: split_list(fields[4]),
        sub_primitives,
    }))
}

/// `/` separated list, cut at the first lone `-`
fn split_list(field: &str) -> Vec<String> {
    field
        .split('/')
        .take_while(|token| *token != SENTINEL)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Decimal digits only; anything else counts as 0
fn parse_number<T: FromStr + Default>(field: &str) -> T {
    if !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit()) {
        field.parse().unwrap_or_default()
    } else {
        T::default()
    }
}

/// Streams records out of a dictionary reader, one line at a time.
///
/// Comments are skipped. Malformed lines are yielded as `Ok(Err(_))` so the
/// caller can report them and keep going; `Err(_)` is a read failure.
pub struct Records<R> {
    reader: R,
    buf: Vec<u8>,
    line: usize,
}

impl<R: BufRead> Records<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line: 0,
        }
    }

    /// Number of lines consumed so far
    pub fn line_number(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = std::io::Result<Result<DictionaryRecord, ParseError>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }
            self.line += 1;

            let parsed = match std::str::from_utf8(&self.buf) {
                Ok(text) => parse_record(text, self.line),
                Err(_) => Err(ParseError {
                    line: self.line,
                    kind: ParseErrorKind::InvalidUtf8,
                }),
            };

            if let Some(item) = parsed.transpose() {
                return Some(Ok(item));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_parse_full_record() {
        let record = parse_record("42:1:明:bright:light/clear/-:sun/moon\n", 3)
            .unwrap()
            .unwrap();

        assert_eq!(record.id, 42);
        assert_eq!(record.skip, 1);
        assert_eq!(record.kanji, "明");
        assert_eq!(record.meaning, "bright");
        assert_eq!(record.alternates, vec!["light", "clear"]);
        assert_eq!(
            record.sub_primitives,
            Some(vec!["sun".to_string(), "moon".to_string()])
        );
        assert!(!record.is_atomic());
        assert_eq!(record.meanings().collect::<Vec<_>>(), vec!["bright", "light", "clear"]);
    }

    #[test]
    fn test_parse_atomic_record() {
        let record = parse_record("7:0:水:water:-:-\r\n", 1).unwrap().unwrap();
        assert!(record.is_atomic());
        assert!(record.alternates.is_empty());
        assert_eq!(record.meanings().collect::<Vec<_>>(), vec!["water"]);
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        assert_eq!(parse_record("\n", 1), Ok(None));
        assert_eq!(parse_record("", 1), Ok(None));
        assert_eq!(parse_record("# 1:0:水:water:-:-\n", 2), Ok(None));
    }

    #[test]
    fn test_missing_fields() {
        let err = parse_record("1:0:水:water:-\n", 5).unwrap_err();
        assert_eq!(err.line, 5);
        assert_eq!(err.kind, ParseErrorKind::MissingField("sub-primitives"));

        let err = parse_record("garbage\n", 9).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingField("skip"));
    }

    #[test]
    fn test_empty_sub_primitive_field_is_rejected() {
        let err = parse_record("1:0:水:water:-:\n", 4).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EmptyField("sub-primitives"));

        let err = parse_record("1:0::water:-:-\n", 4).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EmptyField("kanji"));
    }

    #[test]
    fn test_too_many_fields() {
        let err = parse_record("1:0:水:water:-:-:extra", 1).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TooManyFields);
    }

    #[test]
    fn test_alternate_sentinel_vs_embedded_hyphen() {
        let record = parse_record("1:0:X:walking stick:walking-stick/cane/-/ignored:-", 1)
            .unwrap()
            .unwrap();
        assert_eq!(record.alternates, vec!["walking-stick", "cane"]);

        let record = parse_record("1:0:X:one:-/two:-", 1).unwrap().unwrap();
        assert!(record.alternates.is_empty());
    }

    #[test]
    fn test_sub_primitive_list_stops_at_sentinel() {
        let record = parse_record("3:0:林:grove:-:tree/tree/-", 1).unwrap().unwrap();
        assert_eq!(
            record.sub_primitives,
            Some(vec!["tree".to_string(), "tree".to_string()])
        );
    }

    #[test]
    fn test_non_numeric_fields_parse_as_zero() {
        let record = parse_record("x1:two:丶:drop:-:-", 1).unwrap().unwrap();
        assert_eq!(record.id, 0);
        assert_eq!(record.skip, 0);

        let record = parse_record("99999999999:0:丶:drop:-:-", 1).unwrap().unwrap();
        assert_eq!(record.id, 0);

        let record = parse_record(" 5:0:丶:drop:-:-", 1).unwrap().unwrap();
        assert_eq!(record.id, 0);
    }

    #[test]
    fn test_records_iterator_reports_line_numbers() {
        let data = "# header\n\n1:0:口:mouth:-:-\nbroken line\n2:0:日:sun:day/-:-\n";
        let mut records = Records::new(Cursor::new(data));

        let first = records.next().unwrap().unwrap().unwrap();
        assert_eq!(first.kanji, "口");
        assert_eq!(records.line_number(), 3);

        let broken = records.next().unwrap().unwrap().unwrap_err();
        assert_eq!(broken.line, 4);

        let second = records.next().unwrap().unwrap().unwrap();
        assert_eq!(second.kanji, "日");

        assert!(records.next().is_none());
        assert_eq!(records.line_number(), 5);
    }

    #[test]
    fn test_records_iterator_flags_invalid_utf8() {
        let mut data = b"1:0:".to_vec();
        data.extend_from_slice(&[0xff, 0xfe]);
        data.extend_from_slice(":bad:-:-\n2:0:口:mouth:-:-".as_bytes());

        let mut records = Records::new(Cursor::new(data));
        let bad = records.next().unwrap().unwrap().unwrap_err();
        assert_eq!(bad.kind, ParseErrorKind::InvalidUtf8);

        // Last line has no terminator
        let good = records.next().unwrap().unwrap().unwrap();
        assert_eq!(good.id, 2);
        assert!(good.is_atomic());
    }
}
