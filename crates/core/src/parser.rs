//! Reader for the line-based venue recommendation format.
//!
//! ```text
//! Q1 Offsite
//! March 2025
//! 2
//! R1.venue_name=Grand Hotel
//! R2.venue_name=Lakeside Inn
//! ```
//!
//! The first three non-empty lines are the heading, the date and the record
//! count. Every later line of the form `R<i>.<field>=<value>` sets a field on
//! record `i`. Anything else after the header is dropped without error.

use crate::error::{Error, Result};
use crate::types::ParsedInput;
use regex::Regex;
use std::sync::LazyLock;

/// Record reference prefix: `R` followed by ASCII digits.
static RECORD_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^R([0-9]+)$").unwrap());

/// Parser for venue recommendation text.
#[derive(Debug, Clone, Default)]
pub struct InputParser {
    /// Optional upper bound on the declared record count. Unbounded by default.
    max_records: Option<usize>,
}

impl InputParser {
    /// Create a parser that accepts any record count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject record counts above `max_records`.
    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = Some(max_records);
        self
    }

    /// Parse the full request text.
    pub fn parse(&self, text: &str) -> Result<ParsedInput> {
        let mut lines = text.split('\n').map(str::trim).filter(|l| !l.is_empty());

        let (heading, date_to_present, count_line) = match (lines.next(), lines.next(), lines.next())
        {
            (Some(h), Some(d), Some(c)) => (h, d, c),
            (h, d, _) => {
                let found = [h, d].iter().filter(|l| l.is_some()).count();
                return Err(Error::MalformedInput(format!(
                    "expected heading, date and record count lines, found {} non-empty line(s)",
                    found
                )));
            }
        };

        let record_count = self.parse_count(count_line)?;
        let mut input = ParsedInput::new(heading, date_to_present, record_count);

        for line in lines {
            match record_assignment(line) {
                Some((number, field, value)) => match input.records.get_mut(number.wrapping_sub(1)) {
                    Some(record) => record.set(field, value),
                    None => log::debug!(
                        "Dropping assignment to R{} (record count is {})",
                        number,
                        record_count
                    ),
                },
                None => log::debug!("Dropping unrecognized line: {}", line),
            }
        }

        Ok(input)
    }

    fn parse_count(&self, line: &str) -> Result<usize> {
        let count: usize = line.parse().map_err(|_| {
            Error::MalformedInput(format!(
                "record count '{}' is not a valid non-negative integer",
                line
            ))
        })?;

        if let Some(max) = self.max_records.filter(|&max| count > max) {
            return Err(Error::MalformedInput(format!(
                "record count {} exceeds the limit of {}",
                count, max
            )));
        }

        Ok(count)
    }
}

/// Parse text with the default parser.
pub fn parse(text: &str) -> Result<ParsedInput> {
    InputParser::new().parse(text)
}

/// Split `R<i>.<field>=<value>` into its parts.
///
/// Returns the 1-based record number as written. `None` means the line is
/// not a record assignment.
fn record_assignment(line: &str) -> Option<(usize, &str, &str)> {
    let (key, value) = line.split_once('=')?;
    let (prefix, field) = key.split_once('.')?;
    let digits = RECORD_PREFIX_REGEX.captures(prefix)?.get(1)?.as_str();

    // Numbers too large for usize can never be in range.
    let number = digits.parse::<usize>().ok()?;
    Some((number, field, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{fields, VenueRecord};
    use proptest::prelude::*;

    const SCENARIO: &str = "Q1 Offsite\nMarch 2025\n2\nR1.venue_name=Grand Hotel\nR1.venue_city=Austin\nR2.venue_name=Lakeside Inn\nbadline\nR9.venue_name=Ignored";

    fn record(pairs: &[(&str, &str)]) -> VenueRecord {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_scenario() {
        let input = parse(SCENARIO).unwrap();

        assert_eq!(input.heading, "Q1 Offsite");
        assert_eq!(input.date_to_present, "March 2025");
        assert_eq!(input.record_count, 2);
        assert_eq!(
            input.records,
            vec![
                record(&[("venue_name", "Grand Hotel"), ("venue_city", "Austin")]),
                record(&[("venue_name", "Lakeside Inn")]),
            ]
        );
    }

    #[test]
    fn test_non_numeric_count_is_fatal() {
        let err = parse("Q1 Offsite\nMarch 2025\ntwo\nR1.venue_name=Grand Hotel").unwrap_err();
        assert!(err.is_input_error());
        assert!(err.to_string().contains("'two'"));
    }

    #[test]
    fn test_negative_count_is_fatal() {
        assert!(parse("H\nD\n-1").unwrap_err().is_input_error());
    }

    #[test]
    fn test_too_few_lines_is_fatal() {
        assert!(parse("").unwrap_err().is_input_error());
        assert!(parse("Heading only").unwrap_err().is_input_error());
        assert!(parse("Heading\n\n   \nDate\n").unwrap_err().is_input_error());
    }

    #[test]
    fn test_large_count_is_accepted_by_default() {
        let input = parse("H\nD\n1001\nR1001.venue_name=Last").unwrap();
        assert_eq!(input.record_count, 1001);
        assert_eq!(input.records.len(), 1001);
        assert_eq!(input.records[1000].get(fields::VENUE_NAME), Some("Last"));
    }

    #[test]
    fn test_opt_in_count_limit() {
        let parser = InputParser::new().with_max_records(3);
        assert_eq!(parser.parse("H\nD\n3").unwrap().records.len(), 3);
        assert!(parser.parse("H\nD\n4").unwrap_err().is_input_error());
    }

    #[test]
    fn test_zero_records() {
        let input = parse("H\nD\n0\nR1.venue_name=Nowhere").unwrap();
        assert_eq!(input.record_count, 0);
        assert!(input.records.is_empty());
    }

    #[test]
    fn test_value_keeps_later_equals_signs() {
        let input = parse("H\nD\n1\nR1.note=a=b=c").unwrap();
        assert_eq!(input.records[0].get("note"), Some("a=b=c"));
    }

    #[test]
    fn test_field_name_keeps_later_dots() {
        let input = parse("H\nD\n1\nR1.venue.name=Grand").unwrap();
        assert_eq!(input.records[0].get("venue.name"), Some("Grand"));
    }

    #[test]
    fn test_malformed_lines_are_dropped() {
        let text = "H\nD\n1\nno equals sign\nnodot=x\nX1.venue_name=bad\nR.venue_name=bad\nRx1.venue_name=bad\nr1.venue_name=bad\nR1.venue_city=Austin";
        let input = parse(text).unwrap();
        assert_eq!(input.records, vec![record(&[(fields::VENUE_CITY, "Austin")])]);
    }

    #[test]
    fn test_out_of_range_indices_are_dropped() {
        let text = "H\nD\n2\nR0.venue_name=zero\nR3.venue_name=three\nR99999999999999999999999.venue_name=huge\nR2.venue_name=two";
        let input = parse(text).unwrap();
        assert!(input.records[0].is_empty());
        assert_eq!(input.records[1].get(fields::VENUE_NAME), Some("two"));
    }

    #[test]
    fn test_leading_zeros_in_index() {
        let input = parse("H\nD\n2\nR02.venue_name=two").unwrap();
        assert_eq!(input.records[1].get(fields::VENUE_NAME), Some("two"));
    }

    #[test]
    fn test_later_assignment_wins() {
        let input = parse("H\nD\n1\nR1.venue_name=first\nR1.venue_name=second").unwrap();
        assert_eq!(input.records[0].get(fields::VENUE_NAME), Some("second"));
    }

    #[test]
    fn test_lines_are_trimmed() {
        let input = parse("  Heading  \r\n\tDate\r\n 1 \r\n  R1.venue_name=Grand Hotel  \r\n").unwrap();
        assert_eq!(input.heading, "Heading");
        assert_eq!(input.date_to_present, "Date");
        assert_eq!(input.records[0].get(fields::VENUE_NAME), Some("Grand Hotel"));
    }

    #[test]
    fn test_empty_value_and_field_are_kept() {
        let input = parse("H\nD\n1\nR1.venue_city=\nR1.=orphan").unwrap();
        assert_eq!(input.records[0].get(fields::VENUE_CITY), Some(""));
        assert_eq!(input.records[0].get(""), Some("orphan"));
    }

    #[test]
    fn test_record_assignment() {
        assert_eq!(record_assignment("R1.a=b"), Some((1, "a", "b")));
        assert_eq!(record_assignment("R12.a=b=c"), Some((12, "a", "b=c")));
        assert_eq!(record_assignment("R1.a"), None);
        assert_eq!(record_assignment("R1a=b"), None);
        assert_eq!(record_assignment("R 1.a=b"), None);
        assert_eq!(record_assignment("R١.a=b"), None);
    }

    fn field_line() -> impl Strategy<Value = String> {
        (1usize..6, "[a-z_]{1,8}", "[A-Za-z0-9 =.]{0,12}")
            .prop_map(|(i, field, value)| format!("R{}.{}={}", i, field, value.trim()))
    }

    proptest! {
        #[test]
        fn prop_record_count_matches(n in 0usize..40) {
            let input = parse(&format!("H\nD\n{}", n)).unwrap();
            prop_assert_eq!(input.records.len(), n);
        }

        #[test]
        fn prop_blank_lines_do_not_matter(
            lines in prop::collection::vec(field_line(), 0..12),
            blanks in prop::collection::vec(0usize..3, 16),
        ) {
            let mut plain = vec!["H".to_string(), "D".to_string(), "3".to_string()];
            plain.extend(lines);

            let mut padded = Vec::new();
            for (i, line) in plain.iter().enumerate() {
                for _ in 0..blanks[i % blanks.len()] {
                    padded.push("   ".to_string());
                }
                padded.push(line.clone());
            }
            padded.push(String::new());

            prop_assert_eq!(parse(&plain.join("\n")).unwrap(), parse(&padded.join("\n")).unwrap());
        }

        #[test]
        fn prop_out_of_range_lines_have_no_effect(
            lines in prop::collection::vec(field_line(), 0..12),
        ) {
            let all = format!("H\nD\n3\n{}", lines.join("\n"));
            let in_range: Vec<&String> = lines
                .iter()
                .filter(|l| matches!(record_assignment(l), Some((i, _, _)) if i <= 3))
                .collect();
            let filtered = format!(
                "H\nD\n3\n{}",
                in_range.iter().map(|s| s.as_str()).collect::<Vec<_>>().join("\n")
            );

            prop_assert_eq!(parse(&all).unwrap(), parse(&filtered).unwrap());
        }

        #[test]
        fn prop_junk_lines_do_not_affect_others(
            lines in prop::collection::vec(field_line(), 0..8),
            junk in prop::collection::vec("[a-zA-Z0-9 ]{1,10}|[a-z]{1,5}=[a-z]{0,5}|X[0-9]\\.[a-z]{1,4}=[a-z]{0,4}", 0..8),
        ) {
            let clean = format!("H\nD\n5\n{}", lines.join("\n"));
            let mut mixed = lines.clone();
            for (i, j) in junk.into_iter().enumerate() {
                mixed.insert(i.min(mixed.len()), j);
            }
            let noisy = format!("H\nD\n5\n{}", mixed.join("\n"));

            prop_assert_eq!(parse(&clean).unwrap(), parse(&noisy).unwrap());
        }
    }
}
