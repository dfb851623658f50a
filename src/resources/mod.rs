//! API resource endpoints
//!
//! This module contains the implementation of the API endpoints,
//! organized by resource type.

pub mod objects;

pub use objects::{Objects, ObjectsRaw};

use crate::client::Client;

/// Base trait for API resources.
pub trait Resource {
    /// Get a reference to the client.
    fn client(&self) -> &Client;
}
