// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request/response API of the Home Solutions backend.
//!
//! The backend speaks GraphQL over HTTP on two endpoints: a gateway for
//! account-level queries and a remote API for device-level reads and writes.
//! [`HttpApi`] implements the [`DeviceApi`] trait against them; the session
//! loop only depends on the trait.

mod config;
mod http;

use std::future::Future;

pub use config::ApiConfig;
pub use http::HttpApi;

use crate::device::{Device, DeviceId};
use crate::error::Result;
use crate::register::{RegisterId, ids};
use crate::state::RegisterObservation;
use crate::types::UserMode;

/// Calls available on an authenticated account.
///
/// Every call takes the access token it runs with, so a rotated credential
/// is picked up by the next call without rebuilding the API.
pub trait DeviceApi: Send + Sync {
    /// Lists the devices bound to the account.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response has no device list.
    fn account_devices(
        &self,
        access_token: &str,
    ) -> impl Future<Output = Result<Vec<Device>>> + Send;

    /// Fetches a pull snapshot of a device's registers.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response has no view.
    fn fetch_registers(
        &self,
        access_token: &str,
        device_id: &DeviceId,
    ) -> impl Future<Output = Result<Vec<RegisterObservation>>> + Send;

    /// Asks the backend to push the current status of the devices over the
    /// push channel.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    fn broadcast_device_statuses(
        &self,
        access_token: &str,
        device_ids: &[DeviceId],
    ) -> impl Future<Output = Result<()>> + Send;

    /// Writes a register value. Returns whether the backend accepted it.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    fn write_register(
        &self,
        access_token: &str,
        device_id: &DeviceId,
        register: RegisterId,
        value: i64,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// Requests a user mode change.
    ///
    /// The change-request register expects the mode value plus one.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    fn set_user_mode(
        &self,
        access_token: &str,
        device_id: &DeviceId,
        mode: UserMode,
    ) -> impl Future<Output = Result<bool>> + Send {
        self.write_register(
            access_token,
            device_id,
            ids::USERMODE_HMI_CHANGE_REQUEST,
            i64::from(mode.change_request_value()),
        )
    }
}
