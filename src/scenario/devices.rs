//! The device catalog scenarios
//!
//! Five sequences covering the catalog's documented behavior: the full
//! listing, a lookup by id, a lookup by name, a server-side id filter,
//! and a create/verify/delete round trip. Expected values mirror the
//! service's published sample data.

use super::{ScenarioError, ScenarioResult, client_for, decode, ensure, ensure_status, send};
use crate::{
    client::Client,
    config::ClientConfig,
    http::Method,
    types::{AttrValue, CreatedDevice, Device, NewDevice, NewDeviceData},
};
use tracing::{debug, warn};
use uuid::Uuid;

const EXPECTED_CATALOG_SIZE: usize = 13;

const LOOKUP_ID: &str = "12";
const LOOKUP_NAME: &str = "Apple iPad Air";
const LOOKUP_GENERATION: &str = "4th";
const LOOKUP_PRICE: &str = "419.99";
const LOOKUP_CAPACITY: &str = "64 GB";

const SEARCH_NAME: &str = "Apple iPad Mini 5th Gen";
const SEARCH_REQUIRED_ATTRS: [&str; 2] = ["Capacity", "Screen size"];

const FILTER_IDS: [&str; 3] = ["3", "4", "10"];
const FILTER_NAME_FRAGMENT: &str = "Apple";

const CREATE_NAME: &str = "Google Pixel 6 Pro";
const CREATE_COLOR: &str = "Cloudy White";
const CREATE_CAPACITY: &str = "128 GB";

/// Fetch the whole catalog and check the documented response envelope:
/// status 200, a JSON content type, a non-empty body, at least one header,
/// and exactly the documented number of records.
#[tracing::instrument(skip(config))]
pub async fn list_devices(config: &ClientConfig) -> ScenarioResult {
    let client = client_for(config)?;

    let response = send("list devices", client.request(Method::GET, "objects")).await?;
    ensure_status("list devices", 200, &response)?;

    let content_type = response.content_type().unwrap_or_default();
    ensure(
        "content type",
        content_type.starts_with("application/json"),
        format!("expected a content type starting with `application/json`, got `{content_type}`"),
    )?;
    ensure(
        "response body",
        !response.body().is_empty(),
        "expected a non-empty response body",
    )?;
    ensure(
        "response headers",
        !response.headers().is_empty(),
        "expected at least one response header",
    )?;

    let devices: Vec<Device> = decode("catalog body", &response)?;
    ensure(
        "catalog size",
        devices.len() == EXPECTED_CATALOG_SIZE,
        format!(
            "expected exactly {EXPECTED_CATALOG_SIZE} devices, got {}",
            devices.len()
        ),
    )?;

    Ok(())
}

/// Fetch the catalog, locate the documented device by id, and check its
/// name and attribute literals.
#[tracing::instrument(skip(config))]
pub async fn find_device_by_id(config: &ClientConfig) -> ScenarioResult {
    let client = client_for(config)?;
    let devices = fetch_catalog(&client).await?;

    let Some(device) = devices.iter().find(|device| device.id == LOOKUP_ID) else {
        return Err(ScenarioError::Check {
            check: "device lookup".to_string(),
            message: format!("no device found with id `{LOOKUP_ID}`"),
        });
    };

    ensure(
        "device name",
        device.name == LOOKUP_NAME,
        format!(
            "expected the name `{LOOKUP_NAME}`, got `{}`",
            device.name
        ),
    )?;

    for (key, expected) in [
        ("Generation", LOOKUP_GENERATION),
        ("Price", LOOKUP_PRICE),
        ("Capacity", LOOKUP_CAPACITY),
    ] {
        let value = required_attr(device, key)?;
        let actual = value.to_string();
        ensure(
            key,
            actual == expected,
            format!("expected {key} `{expected}`, got `{actual}`"),
        )?;
    }

    Ok(())
}

/// Fetch the catalog and check that every device carrying the documented
/// name also carries the attributes the listing promises for it.
#[tracing::instrument(skip(config))]
pub async fn find_devices_by_name(config: &ClientConfig) -> ScenarioResult {
    let client = client_for(config)?;
    let devices = fetch_catalog(&client).await?;

    let matches: Vec<&Device> = devices
        .iter()
        .filter(|device| device.name == SEARCH_NAME)
        .collect();

    ensure(
        "name search",
        !matches.is_empty(),
        format!("no devices found with the name `{SEARCH_NAME}`"),
    )?;

    for device in matches {
        for key in SEARCH_REQUIRED_ATTRS {
            ensure(
                "search result attributes",
                device.has_attr(key),
                format!("device `{}` is missing the `{key}` attribute", device.id),
            )?;
        }
    }

    Ok(())
}

/// Ask the service to filter by a fixed id set and check the result is
/// exactly that set, with every name matching the expected family.
#[tracing::instrument(skip(config))]
pub async fn filter_devices_by_ids(config: &ClientConfig) -> ScenarioResult {
    let client = client_for(config)?;

    let request = client
        .request(Method::GET, "objects")
        .map(|request| request.query("id", FILTER_IDS.join(",")));
    let response = send("filter devices", request).await?;
    ensure_status("filter devices", 200, &response)?;

    let devices: Vec<Device> = decode("filtered body", &response)?;
    ensure(
        "filtered count",
        devices.len() == FILTER_IDS.len(),
        format!(
            "expected exactly {} devices, got {}",
            FILTER_IDS.len(),
            devices.len()
        ),
    )?;

    for id in FILTER_IDS {
        ensure(
            "filtered ids",
            devices.iter().any(|device| device.id == id),
            format!("device with id `{id}` not found in the filtered results"),
        )?;
    }

    for device in &devices {
        ensure(
            "filtered names",
            device.name.contains(FILTER_NAME_FRAGMENT),
            format!(
                "expected device `{}` to have a name containing `{FILTER_NAME_FRAGMENT}`, got `{}`",
                device.id, device.name
            ),
        )?;
    }

    Ok(())
}

/// Create a uniquely named device, check the echoed record, delete it,
/// and confirm the service no longer serves it.
#[tracing::instrument(skip(config))]
pub async fn create_and_delete_device(config: &ClientConfig) -> ScenarioResult {
    let client = client_for(config)?;

    // The run marker keeps overlapping runs from confusing each other's records.
    let run_marker = Uuid::new_v4();
    let name = format!("{CREATE_NAME} {run_marker}");
    let new_device = NewDevice {
        name: name.clone(),
        data: NewDeviceData {
            color: CREATE_COLOR.to_string(),
            capacity: CREATE_CAPACITY.to_string(),
        },
    };

    let body = serde_json::to_vec(&new_device).map_err(|e| ScenarioError::Request {
        step: "create device".to_string(),
        source: crate::Error::Serialization(e),
    })?;

    let request = client
        .request(Method::POST, "objects")
        .map(|request| request.body(body));
    let response = send("create device", request).await?;
    ensure_status("create device", 200, &response)?;

    let created: CreatedDevice = decode("create echo", &response)?;

    let Some(id) = created.id.as_deref() else {
        return Err(ScenarioError::Check {
            check: "create echo".to_string(),
            message: "the created device echo is missing an id".to_string(),
        });
    };
    let Some(echoed_name) = created.name.as_deref() else {
        return Err(ScenarioError::Check {
            check: "create echo".to_string(),
            message: "the created device echo is missing a name".to_string(),
        });
    };
    let Some(data) = created.data.as_ref() else {
        return Err(ScenarioError::Check {
            check: "create echo".to_string(),
            message: "the created device echo is missing its data payload".to_string(),
        });
    };

    ensure(
        "create echo",
        echoed_name == name,
        format!("expected the created name `{name}`, got `{echoed_name}`"),
    )?;
    ensure(
        "create echo",
        data.color == CREATE_COLOR,
        format!("expected the color `{CREATE_COLOR}`, got `{}`", data.color),
    )?;
    ensure(
        "create echo",
        data.capacity == CREATE_CAPACITY,
        format!(
            "expected the capacity `{CREATE_CAPACITY}`, got `{}`",
            data.capacity
        ),
    )?;

    if created.created_at.is_none() {
        debug!(id, "The create echo carried no createdAt timestamp");
    }

    let response = send(
        "delete device",
        client.request(Method::DELETE, &format!("objects/{id}")),
    )
    .await?;
    if response.status_code() != 204 {
        warn!(
            id,
            status = response.status_code(),
            "The created device may still be present"
        );
    }
    ensure_status("delete device", 204, &response)?;

    let response = send(
        "verify removal",
        client.request(Method::GET, &format!("objects/{id}")),
    )
    .await?;
    ensure_status("verify removal", 404, &response)?;

    Ok(())
}

/// List the catalog and decode it, for scenarios that search client-side.
async fn fetch_catalog(client: &Client) -> Result<Vec<Device>, ScenarioError> {
    let response = send("list devices", client.request(Method::GET, "objects")).await?;
    ensure_status("list devices", 200, &response)?;
    decode("catalog body", &response)
}

fn required_attr<'a>(device: &'a Device, key: &str) -> Result<&'a AttrValue, ScenarioError> {
    device.attr(key).ok_or_else(|| ScenarioError::Check {
        check: format!("attribute `{key}`"),
        message: format!("attribute `{key}` not found for device `{}`", device.id),
    })
}
