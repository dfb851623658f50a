//! Integration tests for the contract scenarios using wiremock
//!
//! Every scenario runs twice over: once against a faithful stand-in for the
//! service to prove the pass path, and once against deliberately drifted
//! responses to prove each check fails with the expected and actual values
//! in its message.

mod common;

use devprobe::scenario::{self, ScenarioError};
use devprobe::{ClientConfig, Error};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

fn config_for(mock_server: &MockServer) -> ClientConfig {
    ClientConfig::with_base_url(mock_server.uri())
}

fn catalog_json() -> serde_json::Value {
    serde_json::from_str(&common::load_response_fixture("devices"))
        .expect("Fixture should be valid JSON")
}

fn catalog_subset(ids: &[&str]) -> serde_json::Value {
    let catalog = catalog_json();
    let subset: Vec<serde_json::Value> = catalog
        .as_array()
        .expect("Fixture should be an array")
        .iter()
        .filter(|device| ids.iter().any(|id| device["id"] == *id))
        .cloned()
        .collect();
    serde_json::Value::Array(subset)
}

async fn mount_catalog(mock_server: &MockServer, body: &serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/objects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(mock_server)
        .await;
}

/// Echoes the posted device back with a server-assigned id and timestamp,
/// the way the live service answers a create.
struct CreateEcho;

impl Respond for CreateEcho {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut body: serde_json::Value =
            serde_json::from_slice(&request.body).unwrap_or_else(|_| serde_json::json!({}));
        if let Some(map) = body.as_object_mut() {
            map.insert("id".to_string(), serde_json::json!("ffe1"));
            map.insert(
                "createdAt".to_string(),
                serde_json::json!("2026-08-21T10:30:45.123+00:00"),
            );
        }
        ResponseTemplate::new(200).set_body_json(body)
    }
}

/// Echoes the posted device back with one attribute silently changed.
struct DriftingEcho;

impl Respond for DriftingEcho {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut body: serde_json::Value =
            serde_json::from_slice(&request.body).unwrap_or_else(|_| serde_json::json!({}));
        if let Some(map) = body.as_object_mut() {
            map.insert("id".to_string(), serde_json::json!("ffe1"));
        }
        if let Some(data) = body.get_mut("data").and_then(|data| data.as_object_mut()) {
            data.insert("capacity".to_string(), serde_json::json!("256 GB"));
        }
        ResponseTemplate::new(200).set_body_json(body)
    }
}

// ===== Listing =====

#[tokio::test]
async fn test_list_devices_passes_against_full_catalog() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server, &catalog_json()).await;

    scenario::list_devices(&config_for(&mock_server))
        .await
        .expect("Scenario should pass against the full catalog");
}

#[tokio::test]
async fn test_list_devices_accepts_content_type_with_charset() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/objects"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            common::load_response_fixture("devices"),
            "application/json; charset=utf-8",
        ))
        .mount(&mock_server)
        .await;

    scenario::list_devices(&config_for(&mock_server))
        .await
        .expect("A charset suffix on the content type should be accepted");
}

#[tokio::test]
async fn test_list_devices_flags_catalog_size_drift() {
    let mock_server = MockServer::start().await;

    let mut catalog = catalog_json();
    catalog.as_array_mut().expect("array").pop();
    mount_catalog(&mock_server, &catalog).await;

    let result = scenario::list_devices(&config_for(&mock_server)).await;
    match result {
        Err(ScenarioError::Check { check, message }) => {
            assert_eq!(check, "catalog size");
            assert!(message.contains("13"), "Expected count in: {}", message);
            assert!(message.contains("12"), "Actual count in: {}", message);
        }
        other => panic!("Expected a failed check, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_list_devices_flags_missing_content_type() {
    let mock_server = MockServer::start().await;

    // set_body_string attaches no content-type header at all
    Mock::given(method("GET"))
        .and(path("/objects"))
        .respond_with(ResponseTemplate::new(200).set_body_string(common::load_response_fixture("devices")))
        .mount(&mock_server)
        .await;

    let result = scenario::list_devices(&config_for(&mock_server)).await;
    match result {
        Err(ScenarioError::Check { check, message }) => {
            assert_eq!(check, "content type");
            assert!(
                message.contains("application/json"),
                "Expected content type in: {}",
                message
            );
        }
        other => panic!("Expected a failed check, got: {:?}", other),
    }
}

// ===== Lookup by id =====

#[tokio::test]
async fn test_find_device_by_id_passes() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server, &catalog_json()).await;

    scenario::find_device_by_id(&config_for(&mock_server))
        .await
        .expect("Scenario should pass against the full catalog");
}

#[tokio::test]
async fn test_find_device_by_id_flags_missing_device() {
    let mock_server = MockServer::start().await;

    let mut catalog = catalog_json();
    catalog
        .as_array_mut()
        .expect("array")
        .retain(|device| device["id"] != "12");
    mount_catalog(&mock_server, &catalog).await;

    let result = scenario::find_device_by_id(&config_for(&mock_server)).await;
    match result {
        Err(ScenarioError::Check { check, message }) => {
            assert_eq!(check, "device lookup");
            assert!(message.contains("`12`"), "Expected the id in: {}", message);
        }
        other => panic!("Expected a failed check, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_find_device_by_id_flags_price_drift() {
    let mock_server = MockServer::start().await;

    let mut catalog = catalog_json();
    for device in catalog.as_array_mut().expect("array") {
        if device["id"] == "12" {
            device["data"]["Price"] = serde_json::json!("399.99");
        }
    }
    mount_catalog(&mock_server, &catalog).await;

    let result = scenario::find_device_by_id(&config_for(&mock_server)).await;
    match result {
        Err(ScenarioError::Check { check, message }) => {
            assert_eq!(check, "Price");
            assert!(message.contains("419.99"), "Expected value in: {}", message);
            assert!(message.contains("399.99"), "Actual value in: {}", message);
        }
        other => panic!("Expected a failed check, got: {:?}", other),
    }
}

// ===== Lookup by name =====

#[tokio::test]
async fn test_find_devices_by_name_passes() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server, &catalog_json()).await;

    scenario::find_devices_by_name(&config_for(&mock_server))
        .await
        .expect("Scenario should pass against the full catalog");
}

#[tokio::test]
async fn test_find_devices_by_name_flags_zero_matches() {
    let mock_server = MockServer::start().await;

    let mut catalog = catalog_json();
    catalog
        .as_array_mut()
        .expect("array")
        .retain(|device| device["name"] != "Apple iPad Mini 5th Gen");
    mount_catalog(&mock_server, &catalog).await;

    let result = scenario::find_devices_by_name(&config_for(&mock_server)).await;
    match result {
        Err(ScenarioError::Check { check, message }) => {
            assert_eq!(check, "name search");
            assert!(
                message.contains("Apple iPad Mini 5th Gen"),
                "Expected the name in: {}",
                message
            );
        }
        other => panic!("Expected a failed check, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_find_devices_by_name_flags_missing_attribute() {
    let mock_server = MockServer::start().await;

    let mut catalog = catalog_json();
    for device in catalog.as_array_mut().expect("array") {
        if device["id"] == "10" {
            device["data"]
                .as_object_mut()
                .expect("data object")
                .remove("Screen size");
        }
    }
    mount_catalog(&mock_server, &catalog).await;

    let result = scenario::find_devices_by_name(&config_for(&mock_server)).await;
    match result {
        Err(ScenarioError::Check { check, message }) => {
            assert_eq!(check, "search result attributes");
            assert!(
                message.contains("Screen size"),
                "Expected the attribute in: {}",
                message
            );
            assert!(message.contains("`10`"), "Expected the id in: {}", message);
        }
        other => panic!("Expected a failed check, got: {:?}", other),
    }
}

// ===== Server-side id filter =====

#[tokio::test]
async fn test_filter_devices_passes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/objects"))
        .and(query_param("id", "3,4,10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_subset(&["3", "4", "10"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    scenario::filter_devices_by_ids(&config_for(&mock_server))
        .await
        .expect("Scenario should pass against the filtered subset");

    mock_server.verify().await;
}

#[tokio::test]
async fn test_filter_devices_flags_count_mismatch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/objects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_subset(&["3", "4"])))
        .mount(&mock_server)
        .await;

    let result = scenario::filter_devices_by_ids(&config_for(&mock_server)).await;
    match result {
        Err(ScenarioError::Check { check, message }) => {
            assert_eq!(check, "filtered count");
            assert!(message.contains('3'), "Expected count in: {}", message);
            assert!(message.contains('2'), "Actual count in: {}", message);
        }
        other => panic!("Expected a failed check, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_filter_devices_flags_missing_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/objects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_subset(&["3", "4", "11"])))
        .mount(&mock_server)
        .await;

    let result = scenario::filter_devices_by_ids(&config_for(&mock_server)).await;
    match result {
        Err(ScenarioError::Check { check, message }) => {
            assert_eq!(check, "filtered ids");
            assert!(message.contains("`10`"), "Expected the id in: {}", message);
        }
        other => panic!("Expected a failed check, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_filter_devices_flags_foreign_name() {
    let mock_server = MockServer::start().await;

    let mut subset = catalog_subset(&["3", "4"]);
    subset
        .as_array_mut()
        .expect("array")
        .push(serde_json::json!({
            "id": "10",
            "name": "Samsung Galaxy Z Fold2",
            "data": {"Capacity": "64 GB"}
        }));

    Mock::given(method("GET"))
        .and(path("/objects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(subset))
        .mount(&mock_server)
        .await;

    let result = scenario::filter_devices_by_ids(&config_for(&mock_server)).await;
    match result {
        Err(ScenarioError::Check { check, message }) => {
            assert_eq!(check, "filtered names");
            assert!(message.contains("Apple"), "Expected fragment in: {}", message);
            assert!(message.contains("`10`"), "Expected the id in: {}", message);
        }
        other => panic!("Expected a failed check, got: {:?}", other),
    }
}

// ===== Create, delete, verify removal =====

#[tokio::test]
async fn test_create_and_delete_passes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/objects"))
        .respond_with(CreateEcho)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/objects/ffe1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/objects/ffe1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": "Oject with id=ffe1 was not found."
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    scenario::create_and_delete_device(&config_for(&mock_server))
        .await
        .expect("Scenario should pass against a faithful echo");

    mock_server.verify().await;
}

#[tokio::test]
async fn test_create_flags_missing_echo_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/objects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;

    let result = scenario::create_and_delete_device(&config_for(&mock_server)).await;
    match result {
        Err(ScenarioError::Check { check, message }) => {
            assert_eq!(check, "create echo");
            assert!(
                message.contains("missing an id"),
                "Expected the missing field in: {}",
                message
            );
        }
        other => panic!("Expected a failed check, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_create_flags_capacity_drift() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/objects"))
        .respond_with(DriftingEcho)
        .mount(&mock_server)
        .await;

    // The scenario must fail before it ever reaches the delete step
    Mock::given(method("DELETE"))
        .and(path("/objects/ffe1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = scenario::create_and_delete_device(&config_for(&mock_server)).await;
    match result {
        Err(ScenarioError::Check { check, message }) => {
            assert_eq!(check, "create echo");
            assert!(message.contains("128 GB"), "Expected value in: {}", message);
            assert!(message.contains("256 GB"), "Actual value in: {}", message);
        }
        other => panic!("Expected a failed check, got: {:?}", other),
    }

    mock_server.verify().await;
}

#[tokio::test]
async fn test_delete_failure_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/objects"))
        .respond_with(CreateEcho)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/objects/ffe1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": "Internal server error"
        })))
        .mount(&mock_server)
        .await;

    let result = scenario::create_and_delete_device(&config_for(&mock_server)).await;
    match result {
        Err(ScenarioError::Check { check, message }) => {
            assert_eq!(check, "delete device");
            assert!(message.contains("204"), "Expected status in: {}", message);
            assert!(message.contains("500"), "Actual status in: {}", message);
        }
        other => panic!("Expected a failed check, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_removed_device_still_served_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/objects"))
        .respond_with(CreateEcho)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/objects/ffe1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    // The service keeps answering for the record it claimed to delete
    Mock::given(method("GET"))
        .and(path("/objects/ffe1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "ffe1",
            "name": "Google Pixel 6 Pro",
            "data": {"color": "Cloudy White", "capacity": "128 GB"}
        })))
        .mount(&mock_server)
        .await;

    let result = scenario::create_and_delete_device(&config_for(&mock_server)).await;
    match result {
        Err(ScenarioError::Check { check, message }) => {
            assert_eq!(check, "verify removal");
            assert!(message.contains("404"), "Expected status in: {}", message);
            assert!(message.contains("200"), "Actual status in: {}", message);
        }
        other => panic!("Expected a failed check, got: {:?}", other),
    }
}

// ===== Transport faults =====

#[tokio::test]
async fn test_connection_refused_is_a_request_fault() {
    // Nothing listens on the discard port
    let mut config = ClientConfig::with_base_url("http://127.0.0.1:9");
    config.timeout = Duration::from_secs(2);

    let result = scenario::list_devices(&config).await;
    match result {
        Err(ScenarioError::Request { step, source }) => {
            assert_eq!(step, "list devices");
            assert!(
                matches!(source, Error::Connection(_) | Error::Timeout(_)),
                "Expected a transport error, got: {}",
                source
            );
        }
        other => panic!("Expected a failed request step, got: {:?}", other),
    }
}

// ===== Full run =====

#[tokio::test]
async fn test_run_all_reports_every_scenario() {
    let mock_server = MockServer::start().await;

    // The filter mock must win over the catalog mock for the same path
    Mock::given(method("GET"))
        .and(path("/objects"))
        .and(query_param("id", "3,4,10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_subset(&["3", "4", "10"])))
        .with_priority(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    let catalog = catalog_json();
    Mock::given(method("GET"))
        .and(path("/objects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&catalog))
        .expect(3) // listing, lookup by id, lookup by name
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/objects"))
        .respond_with(CreateEcho)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/objects/ffe1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/objects/ffe1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": "Oject with id=ffe1 was not found."
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reports = scenario::run_all(&config_for(&mock_server)).await;

    assert_eq!(reports.len(), 5);
    let names: Vec<&str> = reports.iter().map(|report| report.name).collect();
    assert_eq!(
        names,
        vec![
            "list_devices",
            "find_device_by_id",
            "find_devices_by_name",
            "filter_devices_by_ids",
            "create_and_delete_device",
        ]
    );
    for report in &reports {
        assert!(
            report.passed(),
            "Scenario {} failed: {:?}",
            report.name,
            report.outcome
        );
    }

    mock_server.verify().await;
}

#[tokio::test]
async fn test_run_all_keeps_going_after_a_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/objects"))
        .and(query_param("id", "3,4,10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_subset(&["3", "4", "10"])))
        .with_priority(1)
        .mount(&mock_server)
        .await;

    // One record short, so the listing scenario fails on the count check
    let mut catalog = catalog_json();
    catalog
        .as_array_mut()
        .expect("array")
        .retain(|device| device["id"] != "13");
    Mock::given(method("GET"))
        .and(path("/objects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&catalog))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/objects"))
        .respond_with(CreateEcho)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/objects/ffe1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/objects/ffe1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": "Oject with id=ffe1 was not found."
        })))
        .mount(&mock_server)
        .await;

    let reports = scenario::run_all(&config_for(&mock_server)).await;

    assert_eq!(reports.len(), 5);
    assert!(!reports[0].passed(), "The listing scenario should fail");
    for report in &reports[1..] {
        assert!(
            report.passed(),
            "Scenario {} failed: {:?}",
            report.name,
            report.outcome
        );
    }
}
