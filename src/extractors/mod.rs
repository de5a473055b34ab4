// src/extractors/mod.rs
pub mod records;
pub mod section;

use serde::Serialize;

use crate::utils::error::ExtractError;
use records::parse_records;
use section::extract_section;

/// Name of the CEX section holding the citable passages.
pub const CTS_DATA_MARKER: &str = "ctsdata";

/// Field delimiter used by CTS corpora.
pub const FIELD_DELIMITER: char = '#';

/// Index projection element: the citation URN alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrnIndex {
    pub urn: String,
}

/// Node projection element: the citation URN and its passage text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationNode {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Text")]
    pub text: String,
}

/// Projects the `ctsdata` records of `document` down to their URNs,
/// optionally keeping only URNs containing `filter`.
pub fn get_identifiers(
    document: &str,
    filter: Option<&str>,
) -> Result<Vec<UrnIndex>, ExtractError> {
    let data = extract_section(document, CTS_DATA_MARKER)?;
    let records = parse_records(data, FIELD_DELIMITER, filter)?;

    Ok(records
        .into_iter()
        .map(|record| UrnIndex { urn: record.urn })
        .collect())
}

/// Projects the `ctsdata` records of `document` to URN/text pairs,
/// optionally keeping only records whose URN contains `filter`.
///
/// Filtering happens entirely in the record parser; projection never
/// reorders or drops anything on its own.
pub fn get_nodes(document: &str, filter: Option<&str>) -> Result<Vec<CitationNode>, ExtractError> {
    let data = extract_section(document, CTS_DATA_MARKER)?;
    let records = parse_records(data, FIELD_DELIMITER, filter)?;

    Ok(records
        .into_iter()
        .map(|record| CitationNode {
            id: record.urn,
            text: record.text,
        })
        .collect())
}
