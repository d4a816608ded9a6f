// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `systemair_lib` library.
//!
//! Each concern has its own error enum: authentication, access-token
//! decoding, HTTP transport, response parsing and the push stream. They are
//! all convertible into the top-level [`enum@Error`].

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Login, token exchange or refresh failed.
    #[error("authentication error: {0}")]
    Authentication(#[from] AuthenticationError),

    /// An access token could not be decoded.
    #[error("token decode error: {0}")]
    TokenDecode(#[from] TokenDecodeError),

    /// A network call failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A response body could not be interpreted.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The push channel failed.
    #[error("stream error: {0}")]
    Stream(#[from] StreamError),

    /// A value is outside its allowed domain.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// An update referenced a device that is not registered.
    #[error(transparent)]
    UnknownDevice(#[from] UnknownDeviceWarning),

    /// No credential is held yet.
    #[error("not authenticated")]
    NotAuthenticated,
}

impl Error {
    /// Returns `true` if the error invalidates the current session attempt.
    ///
    /// Authentication and token errors require a new login; everything else
    /// is skipped for the current cycle.
    #[must_use]
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            Self::Authentication(_) | Self::TokenDecode(_) | Self::NotAuthenticated
        )
    }
}

/// Errors related to value validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// An unknown user mode name or number was provided.
    #[error("invalid user mode: {0}")]
    InvalidUserMode(String),
}

/// Errors raised while driving the login or refresh flow.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    /// The login page contains no form.
    #[error("login form not found")]
    FormNotFound,

    /// The login form has no usable `action` attribute.
    #[error("login form has no valid action: {0}")]
    InvalidFormAction(String),

    /// The form submission did not answer with a redirect.
    #[error("login did not redirect (HTTP {status})")]
    NoRedirect {
        /// Status returned by the submission.
        status: u16,
    },

    /// The redirect target carries no authorization code.
    #[error("authorization code not found in redirect target")]
    CodeNotFound,

    /// The token endpoint rejected the exchange.
    #[error("token exchange rejected (HTTP {status}): {body}")]
    ExchangeRejected {
        /// Status returned by the token endpoint.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// No refresh token is held.
    #[error("no refresh token available, authenticate first")]
    NoRefreshToken,

    /// The token endpoint returned an unusable access token.
    #[error("invalid access token: {0}")]
    InvalidToken(#[from] TokenDecodeError),

    /// A network call of the flow failed.
    #[error("transport failure during authentication: {0}")]
    Transport(#[from] TransportError),
}

/// Errors raised while decoding the expiry claim of an access token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenDecodeError {
    /// The token does not have three dot-separated segments.
    #[error("token is not a three-part JWT")]
    Malformed,

    /// The payload segment is not valid base64.
    #[error("token payload is not valid base64: {0}")]
    Base64(String),

    /// The payload segment is not a JSON object.
    #[error("token payload is not valid JSON: {0}")]
    Json(String),

    /// The payload carries no `exp` claim.
    #[error("token carries no expiry claim")]
    MissingExpiry,

    /// The `exp` claim is not a representable instant.
    #[error("token expiry {0} is out of range")]
    ExpiryOutOfRange(i64),
}

/// Errors related to HTTP communication with the backend.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The backend answered with a non-success status.
    #[error("HTTP {status} - {reason}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase.
        reason: String,
    },

    /// A header value could not be built.
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),
}

impl TransportError {
    /// Converts a `reqwest` error, separating timeouts from other failures.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: std::time::Duration) -> Self {
        if err.is_timeout() {
            // Safe: request timeouts never approach u64::MAX milliseconds
            #[allow(clippy::cast_possible_truncation)]
            let ms = timeout.as_millis() as u64;
            Self::Timeout(ms)
        } else {
            Self::Http(err)
        }
    }

    /// Builds a status error from a response status code.
    pub(crate) fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }
}

/// Errors related to parsing backend responses and push frames.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// The GraphQL endpoint reported errors.
    #[error("backend reported errors: {0}")]
    Backend(String),
}

/// Errors related to the push channel.
#[derive(Debug, Error)]
pub enum StreamError {
    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// The handshake request could not be built.
    #[error("invalid handshake request: {0}")]
    InvalidRequest(String),

    /// The handshake did not complete in time.
    #[error("handshake timed out after {0} ms")]
    Timeout(u64),

    /// The connection was closed by the peer.
    #[error("connection closed")]
    Closed,

    /// The supervisor holds no connection.
    #[error("stream is not connected")]
    NotConnected,
}

/// A push delta or pull snapshot referenced an unregistered device.
///
/// This is a warning: the update is discarded and processing continues.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("update for unknown device {device_id} discarded")]
pub struct UnknownDeviceWarning {
    /// The identifier carried by the update.
    pub device_id: String,
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
