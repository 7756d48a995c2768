//! Sub-area discovery for the EA water-quality archive.
//!
//! The archive partitions its records by administrative sub-area, and
//! the paginated endpoints are queried one sub-area at a time. The
//! first step of any fetch is therefore one GET to `/id/ea-subarea` to
//! pull the current list of sub-area notation codes.

use serde::Deserialize;
use serde_json::Value;

use crate::client::{self, ApiBody};
use crate::model::{BASE_URL, SubArea, WimsError};

// ---------------------------------------------------------------------------
// Listing response structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SubAreaListing {
    items: Vec<SubAreaEntry>,
}

#[derive(Debug, Deserialize)]
struct SubAreaEntry {
    notation: String,
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Fetch the list of sub-areas, in the order the archive returns them.
///
/// This is a single GET with no retry; a non-JSON or malformed body
/// propagates as a decode error rather than being swallowed, since
/// nothing downstream can run without the sub-area list.
pub fn fetch_sub_areas(client: &reqwest::blocking::Client) -> Result<Vec<SubArea>, WimsError> {
    let url = format!("{}/id/ea-subarea", BASE_URL);
    match client::get_api_response(client, &url)? {
        ApiBody::Json(body) => parse_sub_areas(&body),
        ApiBody::Raw(_) => Err(WimsError::Decode(
            "sub-area listing was not JSON".to_string(),
        )),
    }
}

/// Parse a sub-area listing body into notation codes.
fn parse_sub_areas(body: &Value) -> Result<Vec<SubArea>, WimsError> {
    let listing: SubAreaListing = serde_json::from_value(body.clone())
        .map_err(|e| WimsError::Decode(e.to_string()))?;

    Ok(listing
        .items
        .into_iter()
        .map(|entry| SubArea::new(entry.notation))
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
