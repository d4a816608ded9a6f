// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! GraphQL over HTTP implementation of the device API.

use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderValue, ORIGIN, REFERER};
use serde_json::{Value, json};

use super::{ApiConfig, DeviceApi};
use crate::device::{Device, DeviceId};
use crate::error::{ParseError, Result, TransportError};
use crate::register::{RegisterId, RegisterTable};
use crate::state::RegisterObservation;

const BROADCAST_QUERY: &str = "query ($deviceIds: [String]!) {
  BroadcastDeviceStatuses(deviceIds: $deviceIds)
}";

const GET_VIEW_QUERY: &str = "query ($input: GetViewInputType!) {
  GetView(input: $input) {
    children {
      type
      properties
    }
  }
}";

const ACCOUNT_DEVICES_QUERY: &str = "query GetLoggedInAccount {
  GetAccountDevices {
    identifier
    name
    street
    zipcode
    city
    country
    deviceType {
      entry
      module
      scope
      type
    }
  }
}";

const WRITE_QUERY: &str = "mutation ($input: WriteDataItemsInput!) {
  WriteDataItems(input: $input)
}";

/// HTTP client for the Home Solutions GraphQL endpoints.
///
/// Every request carries the access token in the `x-access-token` header.
/// Device-level requests additionally name the device in `device-id`.
///
/// # Examples
///
/// ```no_run
/// use systemair_lib::protocol::{ApiConfig, DeviceApi, HttpApi};
/// use systemair_lib::types::UserMode;
///
/// # async fn example(access_token: &str) -> systemair_lib::Result<()> {
/// let api = HttpApi::new(ApiConfig::default())?;
///
/// for device in api.account_devices(access_token).await? {
///     let registers = api.fetch_registers(access_token, device.id()).await?;
///     println!("{}: {} registers", device.name(), registers.len());
///     api.set_user_mode(access_token, device.id(), UserMode::Away).await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpApi {
    config: ApiConfig,
    client: Client,
}

impl HttpApi {
    /// Creates an API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(TransportError::Http)?;
        Ok(Self { config, client })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Posts a GraphQL document and returns the decoded response body.
    async fn graphql(
        &self,
        url: &str,
        access_token: &str,
        device_id: Option<&DeviceId>,
        body: Value,
    ) -> Result<Value> {
        let timeout = self.config.timeout();
        let token = HeaderValue::from_str(access_token)
            .map_err(|_| TransportError::InvalidHeader("x-access-token"))?;

        let mut request = self
            .client
            .post(url)
            .header(ACCEPT, "*/*")
            .header("x-access-token", token)
            .header(ORIGIN, self.config.origin())
            .header(REFERER, self.config.referer())
            .json(&body);
        if let Some(device_id) = device_id {
            let device = HeaderValue::from_str(device_id.as_str())
                .map_err(|_| TransportError::InvalidHeader("device-id"))?;
            request = request
                .header("device-id", device)
                .header("device-type", "LEGACY");
        }

        tracing::debug!(url = %url, device_id = ?device_id.map(DeviceId::as_str), "Sending GraphQL request");

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::from_status(status).into());
        }

        let text = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(e, timeout))?;
        tracing::debug!(body = %text, "Received GraphQL response");

        let value: Value = serde_json::from_str(&text).map_err(ParseError::Json)?;
        if let Some(errors) = value
            .get("errors")
            .filter(|e| e.as_array().is_some_and(|a| !a.is_empty()))
        {
            return Err(ParseError::Backend(errors.to_string()).into());
        }
        Ok(value)
    }
}

/// Returns `data.<field>` of a GraphQL response.
fn data_field<'a>(response: &'a Value, field: &str) -> Result<&'a Value> {
    response
        .get("data")
        .and_then(|data| data.get(field))
        .filter(|value| !value.is_null())
        .ok_or_else(|| ParseError::MissingField(format!("data.{field}")).into())
}

/// Collects the register data items of a `GetView` response.
fn parse_view(response: &Value) -> Result<Vec<RegisterObservation>> {
    let children = data_field(response, "GetView")?
        .get("children")
        .and_then(Value::as_array)
        .ok_or_else(|| ParseError::MissingField("data.GetView.children".to_string()))?;

    Ok(children
        .iter()
        .filter_map(|child| child.get("properties")?.get("dataItem"))
        .filter_map(RegisterObservation::from_data_item)
        .collect())
}

impl DeviceApi for HttpApi {
    async fn account_devices(&self, access_token: &str) -> Result<Vec<Device>> {
        let body = json!({
            "operationName": "GetLoggedInAccount",
            "variables": {},
            "query": ACCOUNT_DEVICES_QUERY,
        });
        let response = self
            .graphql(self.config.gateway_url(), access_token, None, body)
            .await?;

        let devices = data_field(&response, "GetAccountDevices")?.clone();
        let devices: Vec<Device> = serde_json::from_value(devices).map_err(ParseError::Json)?;
        tracing::debug!(count = devices.len(), "Fetched account devices");
        Ok(devices)
    }

    async fn fetch_registers(
        &self,
        access_token: &str,
        device_id: &DeviceId,
    ) -> Result<Vec<RegisterObservation>> {
        let body = json!({
            "variables": {"input": {"route": "/home", "viewId": ""}},
            "query": GET_VIEW_QUERY,
        });
        let response = self
            .graphql(self.config.remote_url(), access_token, Some(device_id), body)
            .await?;

        let observations = parse_view(&response)?;
        tracing::debug!(device_id = %device_id, registers = observations.len(), "Fetched device view");
        Ok(observations)
    }

    async fn broadcast_device_statuses(
        &self,
        access_token: &str,
        device_ids: &[DeviceId],
    ) -> Result<()> {
        let body = json!({
            "variables": {"deviceIds": device_ids},
            "query": BROADCAST_QUERY,
        });
        self.graphql(self.config.gateway_url(), access_token, None, body)
            .await?;
        tracing::debug!(count = device_ids.len(), "Requested status broadcast");
        Ok(())
    }

    async fn write_register(
        &self,
        access_token: &str,
        device_id: &DeviceId,
        register: RegisterId,
        value: i64,
    ) -> Result<bool> {
        let body = json!({
            "variables": {
                "input": {"dataPoints": [{"id": register, "value": value.to_string()}]}
            },
            "query": WRITE_QUERY,
        });
        let response = self
            .graphql(self.config.remote_url(), access_token, Some(device_id), body)
            .await?;

        let accepted = response
            .get("data")
            .and_then(|data| data.get("WriteDataItems"))
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let name = RegisterTable::global()
            .short_name(register)
            .unwrap_or("UNKNOWN");
        if accepted {
            tracing::info!(device_id = %device_id, register = name, value, "Register written");
        } else {
            tracing::warn!(device_id = %device_id, register = name, value, "Register write rejected");
        }
        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_items_become_observations() {
        let response = json!({"data": {"GetView": {"children": [
            {"type": "mode", "properties": {"dataItem": {"id": 29, "value": 1}}},
            {"type": "label", "properties": {"text": "no data item"}},
            {"type": "temp", "properties": {"dataItem": {"id": 32, "value": "210"}}},
            {"type": "broken", "properties": {"dataItem": {"id": 31}}},
            {"type": "empty"}
        ]}}});

        let observations = parse_view(&response).unwrap();
        assert_eq!(
            observations,
            vec![
                RegisterObservation::new(29, 1),
                RegisterObservation::new(32, 210)
            ]
        );
    }

    #[test]
    fn view_without_children_is_a_parse_error() {
        let err = parse_view(&json!({"data": {"GetView": null}})).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Parse(ParseError::MissingField(ref f)) if f == "data.GetView"
        ));

        let err = parse_view(&json!({"data": {"GetView": {}}})).unwrap_err();
        assert!(matches!(err, crate::Error::Parse(ParseError::MissingField(_))));
    }

    #[test]
    fn api_uses_configured_timeout() {
        let config = ApiConfig::default().with_timeout(std::time::Duration::from_secs(3));
        let api = HttpApi::new(config).unwrap();
        assert_eq!(api.config().timeout(), std::time::Duration::from_secs(3));
    }
}
