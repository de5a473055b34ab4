// src/extractors/section.rs

use crate::utils::error::ExtractError;

// Every section of a CEX document opens with a line of the form
// `#!<name>`; the two-character sentinel therefore also bounds the
// preceding section.
pub const MARKER_PREFIX: &str = "#!";

/// Returns the body of the named section: everything between the end of
/// the marker line and the next section marker, or the end of the
/// document when no further section follows.
///
/// Fails with `SectionNotFound` when the marker never occurs; an absent
/// section is a corrupt document, not an empty one.
pub fn extract_section<'a>(document: &'a str, marker: &str) -> Result<&'a str, ExtractError> {
    let token = format!("{}{}", MARKER_PREFIX, marker);

    let start = document
        .find(&token)
        .ok_or_else(|| ExtractError::SectionNotFound(marker.to_string()))?;

    // Section content begins on the line after the marker token.
    let after_token = &document[start + token.len()..];
    let body = match after_token.find('\n') {
        Some(newline) => &after_token[newline + 1..],
        None => "",
    };

    let end = body.find(MARKER_PREFIX).unwrap_or(body.len());
    let section = &body[..end];

    tracing::debug!("Extracted section '{}' ({} bytes)", marker, section.len());

    Ok(section)
}
