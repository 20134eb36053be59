// Core types: price rules and errors
use thiserror::Error;

/// Prices are whole currency units.
pub type Price = i64;

/// Declarative price for one region of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceRule {
    Fixed(Price),
    /// Uniform pick from `min, min + step, ..., max`.
    Range { min: Price, max: Price, step: Price },
}

impl PriceRule {
    pub fn range(min: Price, max: Price, step: Price) -> Self {
        PriceRule::Range { min, max, step }
    }
}

/// The specific range condition a rule breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("min {min} is greater than max {max}")]
    MinAboveMax { min: Price, max: Price },
    #[error("step {step} must be greater than 0")]
    NonPositiveStep { step: Price },
    #[error("span from {min} to {max} does not fit in a price")]
    SpanOverflow { min: Price, max: Price },
    #[error("max - min ({max} - {min}) is not a multiple of step {step}")]
    SpanOffGrid { min: Price, max: Price, step: Price },
    #[error("min {min} is not a multiple of step {step}")]
    MinOffGrid { min: Price, step: Price },
}

/// One malformed range rule found by catalog validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("keyword '{keyword}', region '{region}': {violation}")]
pub struct ValidationError {
    pub keyword: String,
    pub region: String,
    pub violation: Violation,
}

/// Per (row, region) resolution failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("keyword '{keyword}' has no price configured for region '{region}'")]
    MissingRegionConfig { keyword: String, region: String },
    #[error("keyword '{keyword}', region '{region}' has an unusable range: {violation}")]
    InvalidRange {
        keyword: String,
        region: String,
        violation: Violation,
    },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to access catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog root must be a JSON object, got {0}")]
    NotAnObject(String),
    #[error("entry '{0}' must be an object mapping region codes to prices")]
    EntryNotAnObject(String),
    #[error("keyword '{keyword}', region '{region}': {reason}")]
    InvalidRule {
        keyword: String,
        region: String,
        reason: String,
    },
    #[error("catalog keywords must not be empty")]
    EmptyKeyword,
    #[error("keyword '{0}' has an empty region code")]
    EmptyRegion(String),
    #[error("keyword '{keyword}' lists region '{region}' twice (region codes are case-insensitive)")]
    DuplicateRegion { keyword: String, region: String },
    #[error("duplicate keyword '{0}' (keywords are case-insensitive)")]
    DuplicateKeyword(String),
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("catalog has {0} invalid price rule(s)")]
    InvalidCatalog(usize),
    #[error("no regions selected")]
    NoRegions,
    #[error("unknown region code(s): {}", .0.join(", "))]
    UnknownRegions(Vec<String>),
    #[error("records file must be a JSON array of objects")]
    NotRecords,
    #[error("missing required column: {0}")]
    MissingColumn(String),
    #[error("missing required price column(s): {}", .0.join(", "))]
    MissingPriceColumns(Vec<String>),
    #[error("{0} product name(s) matched no catalog keyword")]
    Unmatched(usize),
}
