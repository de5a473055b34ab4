// src/extractors/records.rs

use crate::utils::error::ExtractError;

/// One line of a `ctsdata` section: a citation URN and its passage text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub urn: String,
    pub text: String,
}

/// Decodes a section body into its records, one per line, exactly two
/// fields per record.
///
/// When `filter` is present only records whose URN contains it as a
/// substring are kept, in source order. An empty pattern is contained in
/// every URN and so keeps everything, same as `None`.
///
/// Blank lines (typically the trailing one before the next section
/// marker) are skipped. A non-empty line that does not split into
/// exactly two fields fails the whole parse with `MalformedRecord`;
/// the format guarantees fixed arity, so a violation means the input is
/// corrupt rather than irregular.
pub fn parse_records(
    section: &str,
    delimiter: char,
    filter: Option<&str>,
) -> Result<Vec<Record>, ExtractError> {
    let mut records = Vec::new();

    for (number, line) in section.lines().enumerate() {
        if line.is_empty() {
            continue;
        }

        let mut fields = split_fields(line, delimiter);
        if fields.len() != 2 {
            tracing::warn!(
                "Rejecting section: line {} has {} fields",
                number + 1,
                fields.len()
            );
            return Err(ExtractError::MalformedRecord {
                line: number + 1,
                fields: fields.len(),
            });
        }

        let text = fields.pop().unwrap_or_default();
        let urn = fields.pop().unwrap_or_default();

        if let Some(pattern) = filter {
            if !urn.contains(pattern) {
                continue;
            }
        }

        records.push(Record { urn, text });
    }

    Ok(records)
}

/// Splits one record line on `delimiter` with lazy quote handling, the
/// tolerance real corpus text needs: a double quote opens a quoted span
/// only at the start of a field, `""` inside a span is a literal quote,
/// a quote anywhere else is kept as-is, and an unterminated span simply
/// runs to the end of the line.
fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else if c == delimiter {
            fields.push(std::mem::take(&mut field));
            at_field_start = true;
            continue;
        } else if c == '"' && at_field_start {
            in_quotes = true;
        } else {
            field.push(c);
        }
        at_field_start = false;
    }
    fields.push(field);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    const ILIAD: &str = "urn:cts:greekLit:tlg0012.tlg001:1.1#Mh=nin a)/eide\nurn:cts:greekLit:tlg0012.tlg001:1.2#qea/\n";

    #[test]
    fn parses_two_field_records_in_order() {
        let records = parse_records(ILIAD, '#', None).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].urn, "urn:cts:greekLit:tlg0012.tlg001:1.1");
        assert_eq!(records[0].text, "Mh=nin a)/eide");
        assert_eq!(records[1].urn, "urn:cts:greekLit:tlg0012.tlg001:1.2");
        assert_eq!(records[1].text, "qea/");
    }

    #[test]
    fn filter_keeps_matching_urns_only() {
        let records = parse_records(ILIAD, '#', Some("1.2")).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].urn, "urn:cts:greekLit:tlg0012.tlg001:1.2");
    }

    #[test]
    fn filter_matches_are_case_sensitive() {
        let records = parse_records(ILIAD, '#', Some("GREEKLIT")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let records = parse_records(ILIAD, '#', Some("")).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn filter_applies_to_urn_not_text() {
        let records = parse_records(ILIAD, '#', Some("qea")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn crlf_line_endings_are_tolerated() {
        let records = parse_records("urn:a#alpha\r\nurn:b#beta\r\n", '#', None).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "alpha");
        assert_eq!(records[1].text, "beta");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let records = parse_records("\nurn:a#alpha\n\n\nurn:b#beta\n\n", '#', None).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn empty_section_yields_no_records() {
        assert!(parse_records("", '#', None).unwrap().is_empty());
    }

    #[test]
    fn one_field_line_is_malformed() {
        let err = parse_records("justaurn\n", '#', None).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedRecord { line: 1, fields: 1 }));
    }

    #[test]
    fn three_field_line_is_malformed() {
        let err = parse_records("urn:a#alpha#extra\n", '#', None).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedRecord { line: 1, fields: 3 }));
    }

    #[test]
    fn malformed_line_number_counts_from_one() {
        let err = parse_records("urn:a#alpha\nbad line\n", '#', None).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn malformed_line_fails_even_when_filter_would_drop_it() {
        let err = parse_records("urn:a#alpha\nbad line\n", '#', Some("urn:a")).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn quoted_field_may_contain_the_delimiter() {
        let records = parse_records("urn:a#\"alpha # beta\"\n", '#', None).unwrap();
        assert_eq!(records[0].text, "alpha # beta");
    }

    #[test]
    fn doubled_quote_inside_quoted_field_is_literal() {
        let records = parse_records("urn:a#\"he said \"\"wait\"\"\"\n", '#', None).unwrap();
        assert_eq!(records[0].text, "he said \"wait\"");
    }

    #[test]
    fn stray_quotes_inside_unquoted_field_are_kept() {
        let records = parse_records("urn:a#it's \"loosely\" quoted\n", '#', None).unwrap();
        assert_eq!(records[0].text, "it's \"loosely\" quoted");
    }

    #[test]
    fn unterminated_quote_runs_to_end_of_line() {
        let records = parse_records("urn:a#\"no closing quote\n", '#', None).unwrap();
        assert_eq!(records[0].text, "no closing quote");
    }

    #[test]
    fn text_after_closing_quote_is_appended() {
        let records = parse_records("urn:a#\"qea/\" spoke she\n", '#', None).unwrap();
        assert_eq!(records[0].text, "qea/ spoke she");
    }

    #[test]
    fn empty_text_field_is_allowed() {
        let records = parse_records("urn:a#\n", '#', None).unwrap();
        assert_eq!(records[0].urn, "urn:a");
        assert_eq!(records[0].text, "");
    }
}
