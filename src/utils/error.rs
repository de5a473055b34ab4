// src/utils/error.rs
use thiserror::Error;

// One error enum per concern; AppError is the umbrella main() reports.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 500 Internal Server Error, 403 Forbidden

    #[error("Could not find source document: {0}")]
    DocNotFound(String), // 404 from the corpus host
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Malformed record on line {line}: expected 2 fields, got {fields}")]
    MalformedRecord { line: usize, fields: usize },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Document retrieval failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),
}
