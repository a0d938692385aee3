//! Authenticated access to the GIS service.
//!
//! This crate owns the narrow fetch contract the map controller consumes:
//! - `GisFetch`: authenticated GET returning JSON or a reachability flag
//! - `HttpFetch`: the `reqwest` implementation with injected credentials
//! - query-string building and endpoint paths for the cohort geodata API

pub mod credentials;
pub mod error;
pub mod fetch;
pub mod http;
pub mod protocol;
pub mod query;

pub use credentials::*;
pub use error::*;
pub use fetch::*;
pub use http::*;
pub use protocol::*;
pub use query::*;
