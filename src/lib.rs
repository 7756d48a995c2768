//! Client for the Environment Agency water-quality archive (WIMS).
//!
//! Retrieves measurement and sample records across every administrative
//! sub-area, optionally over a range of years, and flattens the nested
//! JSON records into a single table.
//!
//! The archive's paged endpoints have no cursor: the page-size limit is
//! doubled and the page re-fetched from scratch until a short page
//! proves a sub-area exhausted. See [`fetch`] for the loop and
//! [`flatten`] for the tabular view.
//!
//! ```no_run
//! use wims_client::{fetch_all_areas, Endpoint, FetchRequest, FlatTable};
//!
//! let request = FetchRequest::new(Endpoint::Measurement)
//!     .with_determinand("determinand=0172");
//! let report = fetch_all_areas(&request, 2021)?;
//! let table = FlatTable::from_records(&report.records);
//! # Ok::<(), wims_client::WimsError>(())
//! ```

pub mod areas;
pub mod client;
pub mod fetch;
pub mod flatten;
pub mod logging;
pub mod model;

pub use fetch::{AreaFailure, FetchReport, FetchRequest, fetch_all_areas, fetch_all_areas_year_range};
pub use flatten::{FlatRow, FlatTable, flatten_record};
pub use model::{Endpoint, Record, SubArea, WimsError};
