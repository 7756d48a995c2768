//! Paginated fetch against the WIMS measurement and sample endpoints.
//!
//! The archive has no pagination cursor. The `_limit` parameter is used
//! as an exhaustion heuristic instead: a page whose item count equals
//! the requested limit means more records may remain, so the limit is
//! doubled and the whole page re-fetched from the start. Only the final
//! short page is kept — earlier full pages are prefixes of it and are
//! discarded, never merged. Worst case this costs
//! O(log(N / initial_limit)) full re-fetches with strictly growing
//! response bodies.

use std::ops::RangeInclusive;

use serde_json::Value;

use crate::areas;
use crate::client;
use crate::logging;
use crate::model::{BASE_URL, DEFAULT_LIMIT, Endpoint, Record, SubArea, WimsError};

// ---------------------------------------------------------------------------
// Request parameters
// ---------------------------------------------------------------------------

/// Filters shared by every page request of one fetch call.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub endpoint: Endpoint,
    /// Already query-shaped, e.g. `determinand=0172`. Only honored by
    /// the measurement endpoint.
    pub determinand: Option<String>,
    /// Starting page-size limit; reset for every sub-area/year tuple.
    pub initial_limit: usize,
}

impl FetchRequest {
    pub fn new(endpoint: Endpoint) -> Self {
        FetchRequest {
            endpoint,
            determinand: None,
            initial_limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_determinand(mut self, determinand: impl Into<String>) -> Self {
        self.determinand = Some(determinand.into());
        self
    }

    pub fn with_initial_limit(mut self, limit: usize) -> Self {
        self.initial_limit = limit;
        self
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// A sub-area whose fetch loop aborted. The sub-area contributes zero
/// records for that year; earlier sub-areas are unaffected.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaFailure {
    pub sub_area: SubArea,
    pub year: i32,
    pub error: WimsError,
}

/// Records plus per-sub-area failures from one fetch call.
///
/// Failures never abort the overall fetch; the caller decides whether a
/// partial result set is acceptable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchReport {
    pub records: Vec<Record>,
    pub failures: Vec<AreaFailure>,
}

impl FetchReport {
    /// True when every sub-area/year tuple fetched cleanly.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Assemble the URL for one page request.
///
/// Shape: `{base}{endpoint}?{determinand}&year={y}&_limit={n}&subArea={code}`.
/// The determinand fragment is dropped for endpoints that do not accept
/// one (the sample endpoint).
pub fn build_page_url(
    endpoint: Endpoint,
    determinand: Option<&str>,
    year: i32,
    limit: usize,
    sub_area: &SubArea,
) -> String {
    let mut url = format!("{}{}?", BASE_URL, endpoint.path());
    if endpoint.accepts_determinand() {
        if let Some(determinand) = determinand {
            url.push_str(determinand);
            url.push('&');
        }
    }
    url.push_str(&format!(
        "year={}&_limit={}&{}",
        year,
        limit,
        sub_area.query_fragment()
    ));
    url
}

// ---------------------------------------------------------------------------
// Page-set loop
// ---------------------------------------------------------------------------

/// Run the grow-and-refetch loop for a single filter tuple.
///
/// `fetch_page` is called with the current limit and returns the items
/// of one complete re-fetch. A full page doubles the limit and retries
/// from the start; a short page is the complete result. Any error ends
/// the loop — a tuple either fetches cleanly or contributes nothing.
///
/// This seam exists so the growth strategy can be swapped for real
/// cursor pagination without touching the area/year iteration.
fn drain_pages<F>(initial_limit: usize, mut fetch_page: F) -> Result<Vec<Record>, WimsError>
where
    F: FnMut(usize) -> Result<Vec<Record>, WimsError>,
{
    // a limit of 0 would never detect exhaustion
    let mut limit = initial_limit.max(1);
    loop {
        let items = fetch_page(limit)?;
        if items.len() == limit {
            limit *= 2;
            continue;
        }
        return Ok(items);
    }
}

/// Fetch one page and extract its `items` array.
fn fetch_page(
    client: &reqwest::blocking::Client,
    url: &str,
) -> Result<Vec<Record>, WimsError> {
    logging::debug(None, url);

    let response = client::get_with_retry(client, url)?;
    let status = response.status().as_u16();
    if status != 200 {
        logging::error(
            None,
            &format!("Unable to fetch data. Status Code: {}", status),
        );
        return Err(WimsError::HttpStatus(status));
    }

    let body: Value = response.json()?;
    let items = body
        .get("items")
        .and_then(Value::as_array)
        .ok_or(WimsError::MissingItems)?;

    logging::info(None, &format!("Number of items retrieved: {}", items.len()));
    Ok(items.clone())
}

/// Retrieve every record for one sub-area and year.
pub fn fetch_area(
    client: &reqwest::blocking::Client,
    request: &FetchRequest,
    year: i32,
    sub_area: &SubArea,
) -> Result<Vec<Record>, WimsError> {
    drain_pages(request.initial_limit, |limit| {
        let url = build_page_url(
            request.endpoint,
            request.determinand.as_deref(),
            year,
            limit,
            sub_area,
        );
        fetch_page(client, &url)
    })
}

// ---------------------------------------------------------------------------
// Area/year iteration
// ---------------------------------------------------------------------------

/// Drive the fetch across every (year, sub-area) tuple.
///
/// Years iterate outermost so each year's records land contiguously;
/// sub-areas keep their discovery order within a year. A failed tuple
/// is recorded and skipped; iteration continues with the next
/// sub-area.
fn collect_years<F>(
    sub_areas: &[SubArea],
    years: RangeInclusive<i32>,
    mut fetch_area: F,
) -> FetchReport
where
    F: FnMut(&SubArea, i32) -> Result<Vec<Record>, WimsError>,
{
    let mut report = FetchReport::default();
    for year in years {
        let mut year_records = Vec::new();
        for sub_area in sub_areas {
            match fetch_area(sub_area, year) {
                Ok(records) => year_records.extend(records),
                Err(error) => {
                    logging::warn(
                        Some(sub_area.notation.as_str()),
                        &format!("fetch aborted for year {}: {}", year, error),
                    );
                    report.failures.push(AreaFailure {
                        sub_area: sub_area.clone(),
                        year,
                        error,
                    });
                }
            }
        }
        report.records.append(&mut year_records);
    }
    report
}

/// Fetch all records across every sub-area for a single year.
///
/// Sub-areas are discovered once per call. Discovery errors propagate;
/// per-sub-area fetch errors are collected in the report instead.
pub fn fetch_all_areas(request: &FetchRequest, year: i32) -> Result<FetchReport, WimsError> {
    fetch_all_areas_year_range(request, year, year)
}

/// Fetch all records across every sub-area for each year in
/// `start_year..=end_year`.
pub fn fetch_all_areas_year_range(
    request: &FetchRequest,
    start_year: i32,
    end_year: i32,
) -> Result<FetchReport, WimsError> {
    let discovery = client::build_session()?;
    let sub_areas = areas::fetch_sub_areas(&discovery)?;

    let report = collect_years(&sub_areas, start_year..=end_year, |sub_area, year| {
        // fresh pooled session per sub-area/year tuple
        let session = client::build_session()?;
        fetch_area(&session, request, year, sub_area)
    });

    logging::info(
        None,
        &format!("Total length of the list: {}", report.records.len()),
    );
    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
