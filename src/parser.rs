//! Run-log parsing
//!
//! Parses tab-delimited run logs into per-file totals. The first line is a
//! header and is skipped unvalidated; each remaining line carries
//! `distance<TAB>time` with distance in kilometers and time in seconds.
//! Malformed lines are recorded and skipped, never aborting the file.

use crate::types::{RunSample, RunTotals};
use serde::Serialize;

/// Why a data line was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Fewer than two tab-separated fields
    MissingFields,
    /// A field did not parse as a finite, non-negative number
    InvalidNumber,
}

/// A data line that could not be folded into the totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number within the file (the header is line 1)
    pub line_number: usize,
    pub reason: SkipReason,
    /// The offending line, verbatim
    pub content: String,
}

/// Result of parsing one run log
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLog {
    pub totals: RunTotals,
    pub skipped: Vec<SkippedLine>,
}

/// Parser for tab-delimited run logs
pub struct RunLogParser;

impl RunLogParser {
    /// Parse the full text of a run log
    pub fn parse(text: &str) -> ParsedLog {
        Self::parse_lines(text.lines())
    }

    /// Parse an already-split sequence of lines
    pub fn parse_lines<'a, I>(lines: I) -> ParsedLog
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut totals = RunTotals::default();
        let mut skipped = Vec::new();

        // Line 1 is the header; it is not validated.
        for (index, line) in lines.into_iter().enumerate().skip(1) {
            match parse_line(line) {
                Ok(sample) => totals.add(sample),
                Err(reason) => skipped.push(SkippedLine {
                    line_number: index + 1,
                    reason,
                    content: line.to_string(),
                }),
            }
        }

        ParsedLog { totals, skipped }
    }
}

/// Parse a single data line into a sample
fn parse_line(line: &str) -> Result<RunSample, SkipReason> {
    // Fields beyond the first two are ignored.
    let mut fields = line.split('\t');
    let (Some(distance), Some(time)) = (fields.next(), fields.next()) else {
        return Err(SkipReason::MissingFields);
    };

    Ok(RunSample {
        distance_km: parse_field(distance)?,
        time_seconds: parse_field(time)?,
    })
}

/// Parse one numeric field, trimming surrounding whitespace
fn parse_field(field: &str) -> Result<f64, SkipReason> {
    let value: f64 = field.trim().parse().map_err(|_| SkipReason::InvalidNumber)?;
    // Totals only ever grow, so samples must be finite and non-negative.
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SkipReason::InvalidNumber)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_is_skipped() {
        let parsed = RunLogParser::parse("distance\ttime\n5.0\t1800");

        assert_eq!(parsed.totals.distance_km, 5.0);
        assert_eq!(parsed.totals.time_seconds, 1800.0);
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_sums_all_valid_lines() {
        let parsed = RunLogParser::parse("distance\ttime\n5.0\t1800\n3.0\t1200\n");

        assert_eq!(parsed.totals.distance_km, 8.0);
        assert_eq!(parsed.totals.time_seconds, 3000.0);
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_missing_field_is_skipped() {
        let parsed = RunLogParser::parse("header\n5.0\n3.0\t1200");

        assert_eq!(parsed.totals.distance_km, 3.0);
        assert_eq!(parsed.totals.time_seconds, 1200.0);
        assert_eq!(
            parsed.skipped,
            vec![SkippedLine {
                line_number: 2,
                reason: SkipReason::MissingFields,
                content: "5.0".to_string(),
            }]
        );
    }

    #[test]
    fn test_invalid_number_is_skipped() {
        let parsed = RunLogParser::parse("header\nabc\t1200\n5.0\t1800");

        assert_eq!(parsed.totals.distance_km, 5.0);
        assert_eq!(parsed.totals.time_seconds, 1800.0);
        assert_eq!(parsed.skipped.len(), 1);
        assert_eq!(parsed.skipped[0].reason, SkipReason::InvalidNumber);
        assert_eq!(parsed.skipped[0].content, "abc\t1200");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let parsed = RunLogParser::parse("header\n 5.0 \t 1800 ");

        assert_eq!(parsed.totals.distance_km, 5.0);
        assert_eq!(parsed.totals.time_seconds, 1800.0);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let parsed = RunLogParser::parse("header\n5.0\t1800\t140\ttrail run");

        assert_eq!(parsed.totals.distance_km, 5.0);
        assert_eq!(parsed.totals.time_seconds, 1800.0);
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_negative_value_is_skipped() {
        let parsed = RunLogParser::parse("header\n-5.0\t1800\nNaN\t60");

        assert_eq!(parsed.totals, RunTotals::default());
        assert_eq!(parsed.skipped.len(), 2);
        assert!(parsed
            .skipped
            .iter()
            .all(|line| line.reason == SkipReason::InvalidNumber));
    }

    #[test]
    fn test_empty_input_yields_zero_totals() {
        let parsed = RunLogParser::parse("");

        assert_eq!(parsed.totals, RunTotals::default());
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_header_only_yields_zero_totals() {
        let parsed = RunLogParser::parse("distance\ttime\n");

        assert_eq!(parsed.totals, RunTotals::default());
        assert!(parsed.skipped.is_empty());
    }
}
