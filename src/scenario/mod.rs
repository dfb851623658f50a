//! Contract scenarios for the device catalog service
//!
//! Each scenario is an independent request/assert sequence against the
//! service (or any stand-in at the configured base URL). Scenarios build
//! their own client, fetch their own data, and report every failed
//! expectation with the expected and actual values. Transport faults,
//! setup faults, and failed checks are kept apart so a refused connection
//! never reads like a contract violation.

pub mod devices;

pub use devices::{
    create_and_delete_device, filter_devices_by_ids, find_device_by_id, find_devices_by_name,
    list_devices,
};

use crate::{
    client::Client,
    config::ClientConfig,
    http::{RequestBuilder, Response},
};
use thiserror::Error;
use tracing::{info, warn};

/// How a scenario failed.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Client construction failed before any request was made.
    #[error("scenario setup failed: {source}")]
    Setup {
        /// Underlying client error
        #[source]
        source: crate::Error,
    },

    /// A request step failed at the transport level.
    #[error("step `{step}` failed: {source}")]
    Request {
        /// The step that was executing
        step: String,
        /// Underlying client error
        #[source]
        source: crate::Error,
    },

    /// An expectation about the service's answer did not hold.
    #[error("check `{check}` failed: {message}")]
    Check {
        /// The check that failed
        check: String,
        /// Expected-vs-actual description
        message: String,
    },
}

/// Outcome of a single scenario run.
pub type ScenarioResult = Result<(), ScenarioError>;

/// A named scenario outcome produced by [`run_all`].
#[derive(Debug)]
pub struct ScenarioReport {
    /// Scenario name
    pub name: &'static str,
    /// Pass/fail outcome
    pub outcome: ScenarioResult,
}

impl ScenarioReport {
    /// Whether the scenario passed every check.
    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Run every scenario in order and collect one report per scenario.
///
/// Scenarios run sequentially; a failure in one never stops the others.
pub async fn run_all(config: &ClientConfig) -> Vec<ScenarioReport> {
    let mut reports = Vec::with_capacity(5);

    reports.push(report("list_devices", devices::list_devices(config).await));
    reports.push(report(
        "find_device_by_id",
        devices::find_device_by_id(config).await,
    ));
    reports.push(report(
        "find_devices_by_name",
        devices::find_devices_by_name(config).await,
    ));
    reports.push(report(
        "filter_devices_by_ids",
        devices::filter_devices_by_ids(config).await,
    ));
    reports.push(report(
        "create_and_delete_device",
        devices::create_and_delete_device(config).await,
    ));

    reports
}

fn report(name: &'static str, outcome: ScenarioResult) -> ScenarioReport {
    match &outcome {
        Ok(()) => info!(scenario = name, "Scenario passed"),
        Err(e) => warn!(scenario = name, error = %e, "Scenario failed"),
    }
    ScenarioReport { name, outcome }
}

/// Build a client for a scenario, mapping failures to setup errors.
pub(crate) fn client_for(config: &ClientConfig) -> Result<Client, ScenarioError> {
    Client::from_config(config.clone()).map_err(|source| ScenarioError::Setup { source })
}

/// Issue one request step, mapping transport faults to the step name.
pub(crate) async fn send(
    step: &str,
    request: crate::Result<RequestBuilder>,
) -> Result<Response, ScenarioError> {
    let request = request.map_err(|source| ScenarioError::Request {
        step: step.to_string(),
        source,
    })?;

    request
        .send()
        .await
        .map_err(|source| ScenarioError::Request {
            step: step.to_string(),
            source,
        })
}

/// Fail the named check unless the condition holds.
pub(crate) fn ensure(check: &str, condition: bool, message: impl Into<String>) -> ScenarioResult {
    if condition {
        Ok(())
    } else {
        Err(ScenarioError::Check {
            check: check.to_string(),
            message: message.into(),
        })
    }
}

/// Check a response's numeric status code.
pub(crate) fn ensure_status(step: &str, expected: u16, response: &Response) -> ScenarioResult {
    let actual = response.status_code();
    ensure(
        step,
        actual == expected,
        format!("expected status code {expected}, but received {actual}"),
    )
}

/// Decode a response body, mapping parse faults to a failed check.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(
    check: &str,
    response: &Response,
) -> Result<T, ScenarioError> {
    response.json().map_err(|e| ScenarioError::Check {
        check: check.to_string(),
        message: format!("response body did not decode as the expected shape: {e}"),
    })
}
