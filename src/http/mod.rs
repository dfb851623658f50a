//! HTTP layer for the device catalog client
//!
//! This module provides the request builder and response wrappers used by
//! every API call. Requests are single-shot: the service contract leaves
//! nothing to retry.

pub use request::RequestBuilder;
pub use response::{RawResponse, Response};

mod request;
mod response;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
