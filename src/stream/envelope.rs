// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Push frame envelopes.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ParseError;
use crate::state::PushDelta;

const SYSTEM_EVENT: &str = "SYSTEM_EVENT";
const DEVICE_STATUS_UPDATE: &str = "DEVICE_STATUS_UPDATE";

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    properties: Option<Value>,
}

/// Extracts the device delta carried by a push frame.
///
/// Returns `Ok(None)` for well-formed envelopes that are not device status
/// updates.
///
/// # Errors
///
/// Returns [`ParseError`] if the frame is not a JSON envelope, or if a
/// status update has no usable properties.
pub fn parse_frame(text: &str) -> Result<Option<PushDelta>, ParseError> {
    let envelope: Envelope = serde_json::from_str(text)?;

    let is_status_update = envelope.kind.as_deref() == Some(SYSTEM_EVENT)
        && envelope.action.as_deref() == Some(DEVICE_STATUS_UPDATE);
    if !is_status_update {
        return Ok(None);
    }

    let properties = envelope
        .properties
        .ok_or_else(|| ParseError::MissingField("properties".to_string()))?;
    Ok(Some(serde_json::from_value(properties)?))
}
