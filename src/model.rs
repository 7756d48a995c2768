//! Core data types for the EA water-quality archive (WIMS) client.
//!
//! This module defines the shared domain model imported by all other
//! modules. It contains no logic beyond query-fragment rendering and
//! no I/O — only types and constants.

// ---------------------------------------------------------------------------
// API constants
// ---------------------------------------------------------------------------

/// Base URL of the Environment Agency water-quality archive.
pub const BASE_URL: &str = "http://environment.data.gov.uk/water-quality";

/// Default initial page-size limit for paginated fetches.
///
/// The archive has no cursor parameter; the fetch loop uses `_limit` as an
/// exhaustion heuristic and doubles it whenever a page comes back full.
pub const DEFAULT_LIMIT: usize = 500;

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// The two paginated data endpoints supported by this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `/data/measurement` — individual determinand measurements.
    Measurement,
    /// `/data/sample` — sampling events. The sample endpoint does not
    /// accept a determinand filter; any supplied determinand is ignored
    /// when building sample URLs.
    Sample,
}

impl Endpoint {
    /// URL path fragment for this endpoint, e.g. `/data/measurement`.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Measurement => "/data/measurement",
            Endpoint::Sample => "/data/sample",
        }
    }

    /// Whether this endpoint honors a determinand filter.
    pub fn accepts_determinand(&self) -> bool {
        matches!(self, Endpoint::Measurement)
    }
}

// ---------------------------------------------------------------------------
// Sub-areas
// ---------------------------------------------------------------------------

/// An administrative water-quality sub-area, identified by its notation
/// code from `/id/ea-subarea`.
///
/// The archive partitions its data by sub-area, so every paginated fetch
/// queries one sub-area at a time. Notation codes are opaque strings and
/// are immutable for the duration of a fetch call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubArea {
    pub notation: String,
}

impl SubArea {
    pub fn new(notation: impl Into<String>) -> Self {
        SubArea { notation: notation.into() }
    }

    /// Query fragment selecting this sub-area, e.g. `subArea=1-34`.
    pub fn query_fragment(&self) -> String {
        format!("subArea={}", self.notation)
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A single record from the archive.
///
/// Records are arbitrarily nested mappings with no fixed schema — the set
/// of keys varies by endpoint and even between records — so they are kept
/// as raw JSON values until flattened.
pub type Record = serde_json::Value;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when fetching or decoding WIMS data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WimsError {
    /// Non-200 HTTP response from the archive.
    HttpStatus(u16),
    /// Connection-level failure that survived the transport retry policy.
    Transport(String),
    /// The response body could not be decoded as JSON.
    Decode(String),
    /// The response decoded but carried no `items` array.
    MissingItems,
}

impl std::fmt::Display for WimsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WimsError::HttpStatus(code) => write!(f, "HTTP status: {}", code),
            WimsError::Transport(msg) => write!(f, "Transport error: {}", msg),
            WimsError::Decode(msg) => write!(f, "Decode error: {}", msg),
            WimsError::MissingItems => write!(f, "Response contained no items array"),
        }
    }
}

impl std::error::Error for WimsError {}

impl From<reqwest::Error> for WimsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            WimsError::Decode(err.to_string())
        } else {
            WimsError::Transport(err.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
