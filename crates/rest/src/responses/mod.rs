//! Response building for the customer REST API.
//!
//! - [`headers`] - Response header generation (Content-Type, Location)

pub mod headers;

pub use headers::CustomerHeaders;
