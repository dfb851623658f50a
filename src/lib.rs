//! # devprobe
//!
//! Typed async client and contract scenarios for the public device catalog
//! at <https://api.restful-api.dev>, supporting:
//! - Listing the catalog and fetching single devices
//! - Server-side id filtering via the `id` query parameter
//! - Creating and deleting devices
//! - Raw-response mode exposing status, headers, and timing
//! - A scenario layer that checks the documented service contract and
//!   reports every mismatch with the expected and actual values
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use devprobe::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new();
//!
//!     let devices = client.objects().list().await?;
//!     println!("catalog holds {} devices", devices.len());
//!
//!     let device = client.objects().get("12").await?;
//!     println!("{}: {}", device.id, device.name);
//!     Ok(())
//! }
//! ```
//!
//! ## Running the contract scenarios
//!
//! ```rust,no_run
//! use devprobe::ClientConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let reports = devprobe::scenario::run_all(&ClientConfig::default()).await;
//!     for report in &reports {
//!         match &report.outcome {
//!             Ok(()) => println!("PASS {}", report.name),
//!             Err(e) => println!("FAIL {}: {}", report.name, e),
//!         }
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// Re-export commonly used types
pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, Result};
pub use http::{RawResponse, Response};
pub use resources::{Objects, ObjectsRaw};
pub use scenario::{ScenarioError, ScenarioReport, ScenarioResult};
pub use types::*;

// Module declarations
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod resources;
pub mod scenario;
pub mod types;

// Re-export key dependencies for convenience
pub use serde::{Deserialize, Serialize};
pub use serde_json::Value as JsonValue;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use devprobe::prelude::*;
/// ```
pub mod prelude {

    pub use crate::{
        Client, ClientConfig, Error, Result,
        scenario::{ScenarioError, ScenarioReport},
        types::{AttrValue, CreatedDevice, Device, NewDevice, NewDeviceData},
    };
}

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.restful-api.dev";


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_constants() {
        assert_eq!(DEFAULT_BASE_URL, "https://api.restful-api.dev");
    }
}
