#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Line-oriented CSV tokenizer.
//!
//! The bundled datasets are simple enough that a single pass over each line
//! is sufficient: a `"` toggles quoting, a `,` outside quotes ends a field,
//! and every field is trimmed. There is no escaped-quote support; a `"`
//! inside a quoted field simply closes the quoting. The fixture files depend
//! on this exact behavior.

use thiserror::Error;

/// Tokenizes one line into trimmed fields.
///
/// The final field is always emitted, even when empty, so a line with `n`
/// unquoted commas always yields `n + 1` fields.
#[must_use]
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut inside_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => inside_quotes = !inside_quotes,
            ',' if !inside_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    fields.push(current.trim().to_string());
    fields
}

/// A problem with a single data row. Rows are never fatal to a load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// The row's field count differs from the header's.
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        /// 1-based line number in the source text.
        line: usize,
        /// Field count of the header.
        expected: usize,
        /// Field count of this row.
        found: usize,
    },
}

/// One parsed data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number in the source text.
    pub line: usize,
    /// Trimmed fields, exactly as many as the header has.
    pub fields: Vec<String>,
}

impl Record {
    /// Returns the field at `index`, or `""` if the index is out of range.
    #[must_use]
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", String::as_str)
    }
}

/// Iterates the data rows of a CSV document.
///
/// Line 0 is the header. Lines end at `\n` or `\r\n`; blank lines are
/// skipped. Rows whose field count does not match the header are yielded as
/// [`RowError::FieldCount`] so the caller can record them and move on.
pub struct Reader<'a> {
    header: Vec<String>,
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Reader<'a> {
    /// Creates a reader over `text`, consuming the header line.
    ///
    /// Empty input produces a single empty header field and no rows.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let mut lines = text.lines().enumerate();
        let header = lines
            .next()
            .map_or_else(|| parse_line(""), |(_, line)| parse_line(line));

        Self { header, lines }
    }

    /// The parsed header fields.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }
}

impl Iterator for Reader<'_> {
    type Item = Result<Record, RowError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, line) = self.lines.next()?;
            if line.trim().is_empty() {
                continue;
            }

            let fields = parse_line(line);
            let line = index + 1;

            if fields.len() != self.header.len() {
                return Some(Err(RowError::FieldCount {
                    line,
                    expected: self.header.len(),
                    found: fields.len(),
                }));
            }

            return Some(Ok(Record { line, fields }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_plain_fields() {
        assert_eq!(parse_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn field_count_is_commas_plus_one() {
        let line = "1,2,,4,";
        let commas = line.matches(',').count();
        assert_eq!(parse_line(line).len(), commas + 1);
    }

    #[test]
    fn trims_whitespace_around_fields() {
        assert_eq!(parse_line("  a , b\t,c  "), vec!["a", "b", "c"]);
    }

    #[test]
    fn keeps_commas_inside_quotes() {
        assert_eq!(
            parse_line(r#"1,"Austin, TX",3"#),
            vec!["1", "Austin, TX", "3"]
        );
    }

    #[test]
    fn always_emits_trailing_empty_field() {
        assert_eq!(parse_line("a,"), vec!["a", ""]);
        assert_eq!(parse_line(""), vec![""]);
    }

    #[test]
    fn doubled_quotes_are_not_escapes() {
        // `""` toggles twice and contributes nothing.
        assert_eq!(parse_line(r#""say ""hi""",x"#), vec!["say hi", "x"]);
    }

    #[test]
    fn unbalanced_quote_swallows_rest_of_line() {
        assert_eq!(parse_line(r#"a,"b,c"#), vec!["a", "b,c"]);
    }

    #[test]
    fn reader_skips_blank_lines_and_reports_line_numbers() {
        let text = "h1,h2\n1,2\n\n3,4\r\n";
        let rows: Vec<_> = Reader::new(text).collect();
        assert_eq!(rows.len(), 2);
        let first = rows[0].as_ref().unwrap();
        assert_eq!(first.line, 2);
        assert_eq!(first.fields, vec!["1", "2"]);
        let second = rows[1].as_ref().unwrap();
        assert_eq!(second.line, 4);
    }

    #[test]
    fn reader_flags_field_count_mismatch() {
        let text = "h1,h2,h3\n1,2\n1,2,3";
        let mut reader = Reader::new(text);
        assert_eq!(reader.header().len(), 3);
        assert_eq!(
            reader.next(),
            Some(Err(RowError::FieldCount {
                line: 2,
                expected: 3,
                found: 2,
            }))
        );
        assert!(reader.next().unwrap().is_ok());
        assert!(reader.next().is_none());
    }

    #[test]
    fn reader_over_empty_text_yields_nothing() {
        let mut reader = Reader::new("");
        assert_eq!(reader.header(), &[String::new()]);
        assert!(reader.next().is_none());
    }

    #[test]
    fn record_field_out_of_range_is_empty() {
        let record = Record {
            line: 1,
            fields: vec!["x".to_string()],
        };
        assert_eq!(record.field(0), "x");
        assert_eq!(record.field(5), "");
    }
}
