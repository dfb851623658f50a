//! Device catalog endpoint

use super::Resource;
use crate::{
    client::Client,
    error::{Error, Result},
    http::RawResponse,
    types::{CreatedDevice, Device, NewDevice},
};
use tracing::{debug, info, warn};

/// Device catalog resource.
///
/// Covers the collection endpoint (`objects`) and the per-resource
/// endpoint (`objects/{id}`).
#[derive(Clone)]
pub struct Objects {
    client: Client,
}

impl Objects {
    /// Create a new Objects resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List the full device catalog.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Device>> {
        debug!("Fetching the device catalog");
        let start = std::time::Instant::now();

        let result: Result<Vec<Device>> = self
            .client
            .request(http::Method::GET, "objects")?
            .send()
            .await?
            .parse_result();

        let elapsed = start.elapsed();
        match &result {
            Ok(devices) => {
                info!(
                    elapsed_ms = elapsed.as_millis(),
                    count = devices.len(),
                    "Device catalog retrieved"
                );
            }
            Err(e) => {
                warn!(elapsed_ms = elapsed.as_millis(), error = %e, "Catalog listing failed");
            }
        }

        result
    }

    /// List only the devices with the given ids.
    ///
    /// The ids travel as one comma-joined `id` query parameter, which is the
    /// filter shape the service expects.
    #[tracing::instrument(skip(self))]
    pub async fn list_by_ids(&self, ids: &[&str]) -> Result<Vec<Device>> {
        if ids.is_empty() {
            return Err(Error::InvalidRequest(
                "At least one device id is required to filter the catalog".to_string(),
            ));
        }

        debug!(requested = ids.len(), "Fetching devices by id");

        let devices: Vec<Device> = self
            .client
            .request(http::Method::GET, "objects")?
            .query("id", ids.join(","))
            .send()
            .await?
            .parse_result()?;

        info!(
            requested = ids.len(),
            returned = devices.len(),
            "Filtered device listing retrieved"
        );

        Ok(devices)
    }

    /// Get a single device by id.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Device> {
        let response = self
            .client
            .request(http::Method::GET, &format!("objects/{}", id))?
            .send()
            .await?;

        response.parse_result()
    }

    /// Create a new device and return the service's echo of it.
    #[tracing::instrument(skip(self, device), fields(name = %device.name))]
    pub async fn create(&self, device: &NewDevice) -> Result<CreatedDevice> {
        debug!("Creating device");
        let start = std::time::Instant::now();

        let result: Result<CreatedDevice> = self
            .client
            .request(http::Method::POST, "objects")?
            .body(serde_json::to_vec(device)?)
            .send()
            .await?
            .parse_result();

        let elapsed = start.elapsed();
        match &result {
            Ok(created) => {
                info!(
                    elapsed_ms = elapsed.as_millis(),
                    id = created.id.as_deref().unwrap_or("<missing>"),
                    "Device created"
                );
            }
            Err(e) => {
                warn!(elapsed_ms = elapsed.as_millis(), error = %e, "Device creation failed");
            }
        }

        result
    }

    /// Delete a device by id.
    ///
    /// The documented contract answers 204 No Content; any other success
    /// status is accepted and logged.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .request(http::Method::DELETE, &format!("objects/{}", id))?
            .send()
            .await?;

        if response.is_error() {
            return Err(Error::from_response(
                response.status_code(),
                &response.text()?,
            ));
        }

        if response.status_code() != 204 {
            debug!(
                status = response.status_code(),
                id, "Delete answered with a non-204 success status"
            );
        }

        info!(id, "Device deleted");
        Ok(())
    }

    /// Enable raw response mode for the next request.
    ///
    /// Returns a wrapper that provides access to response headers,
    /// status codes, and timing along with the parsed body.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use devprobe::Client;
    /// # async fn example(client: Client) -> Result<(), Box<dyn std::error::Error>> {
    /// let raw = client.objects().with_raw_response().get("12").await?;
    ///
    /// println!("Status: {}", raw.status_code());
    /// println!("Device: {}", raw.parsed().name);
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_raw_response(&self) -> ObjectsRaw {
        ObjectsRaw {
            client: self.client.clone(),
        }
    }
}

impl Resource for Objects {
    fn client(&self) -> &Client {
        &self.client
    }
}

/// Device catalog resource in raw response mode.
///
/// This wrapper provides the same operations as `Objects`, but returns
/// `RawResponse<T>` instead of `T`, giving access to HTTP metadata.
#[derive(Clone)]
pub struct ObjectsRaw {
    client: Client,
}

impl ObjectsRaw {
    /// List the full device catalog and return the raw response.
    pub async fn list(&self) -> Result<RawResponse<Vec<Device>>> {
        self.client
            .request(http::Method::GET, "objects")?
            .send()
            .await?
            .into_parsed_raw()
    }

    /// Get a single device by id and return the raw response.
    pub async fn get(&self, id: &str) -> Result<RawResponse<Device>> {
        self.client
            .request(http::Method::GET, &format!("objects/{}", id))?
            .send()
            .await?
            .into_parsed_raw()
    }

    /// Create a new device and return the raw response.
    pub async fn create(&self, device: &NewDevice) -> Result<RawResponse<CreatedDevice>> {
        self.client
            .request(http::Method::POST, "objects")?
            .body(serde_json::to_vec(device)?)
            .send()
            .await?
            .into_parsed_raw()
    }
}
