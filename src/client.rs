//! HTTP session plumbing for the EA WIMS API.
//!
//! Each paginated fetch runs on its own connection-pooled blocking
//! session with a transport-level retry policy: up to 5 retries on
//! connection failure with exponential backoff (factor 0.8). HTTP
//! error statuses are never retried here — the pagination loop decides
//! what to do with them. No timeout is configured; a hung endpoint
//! blocks the fetch.

use std::thread;
use std::time::Duration;

use serde_json::Value;

use crate::logging;
use crate::model::WimsError;

/// Connection-level retries per request.
pub const CONNECT_RETRIES: u32 = 5;

/// Exponential backoff factor, in seconds.
pub const BACKOFF_FACTOR: f64 = 0.8;

/// Build a fresh connection-pooled session.
///
/// The fetch loop creates one of these per sub-area/year iteration so
/// pooled connections never outlive the iteration they belong to.
pub fn build_session() -> Result<reqwest::blocking::Client, WimsError> {
    Ok(reqwest::blocking::Client::builder().build()?)
}

/// Backoff delay before retry number `retry` (0-based): 0.8 * 2^retry.
fn backoff_delay(retry: u32) -> Duration {
    Duration::from_secs_f64(BACKOFF_FACTOR * f64::from(1u32 << retry))
}

/// Issue a GET, retrying connection-level failures.
///
/// Only connection failures are retried; any response, success or not,
/// is returned to the caller as-is.
pub fn get_with_retry(
    client: &reqwest::blocking::Client,
    url: &str,
) -> Result<reqwest::blocking::Response, WimsError> {
    let mut retry = 0;
    loop {
        match client.get(url).send() {
            Ok(response) => return Ok(response),
            Err(e) if e.is_connect() && retry < CONNECT_RETRIES => {
                logging::warn(
                    None,
                    &format!(
                        "connection failed (retry {}/{}): {}",
                        retry + 1,
                        CONNECT_RETRIES,
                        e
                    ),
                );
                thread::sleep(backoff_delay(retry));
                retry += 1;
            }
            Err(e) => return Err(WimsError::Transport(e.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Generic response helper
// ---------------------------------------------------------------------------

/// Decoded body from [`get_api_response`].
#[derive(Debug)]
pub enum ApiBody {
    Json(Value),
    /// The archive serves HTML for some `/id/` endpoints; those bodies
    /// come back raw instead of being decoded.
    Raw(String),
}

/// Send a single GET and decode the response.
///
/// No retry is applied here — the retry policy belongs to the paginated
/// sessions, not to one-shot lookups like area discovery. HTML bodies
/// are returned raw; anything else is decoded as JSON, with decode
/// failures propagated to the caller.
pub fn get_api_response(
    client: &reqwest::blocking::Client,
    url: &str,
) -> Result<ApiBody, WimsError> {
    logging::debug(None, url);

    let response = client.get(url).send()?;

    logging::debug(None, &format!("API status code: {}", response.status().as_u16()));

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if content_type.starts_with("text/html") {
        Ok(ApiBody::Raw(response.text()?))
    } else {
        Ok(ApiBody::Json(response.json::<Value>()?))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
