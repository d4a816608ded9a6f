// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Push channel transports.

use std::future::Future;
use std::time::Duration;

use futures::StreamExt;
use futures::stream::BoxStream;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::http::header::{ORIGIN, SEC_WEBSOCKET_PROTOCOL};

use crate::error::StreamError;
use crate::protocol::ApiConfig;

/// Text frames received on an open push connection.
///
/// The stream ends when the connection is closed. Dropping it releases the
/// connection.
pub type FrameStream = BoxStream<'static, Result<String, StreamError>>;

/// Opens push connections authenticated with an access token.
pub trait Transport: Send + Sync {
    /// Opens a connection.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError`] if the connection cannot be established.
    fn open(&self, access_token: &str) -> impl Future<Output = Result<FrameStream, StreamError>> + Send;
}

/// WebSocket push transport.
///
/// The backend expects the access token inside the
/// `Sec-WebSocket-Protocol` header, next to the `accessToken` protocol name.
/// The handshake is bounded by the configured request timeout.
#[derive(Debug, Clone)]
pub struct WebSocketTransport {
    url: String,
    origin: String,
    timeout: Duration,
}

impl WebSocketTransport {
    /// Creates a transport for the configured streaming endpoint.
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            url: config.stream_url().to_string(),
            origin: config.origin().to_string(),
            timeout: config.timeout(),
        }
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transport for WebSocketTransport {
    async fn open(&self, access_token: &str) -> Result<FrameStream, StreamError> {
        let mut request = self.url.as_str().into_client_request()?;
        let protocol = HeaderValue::from_str(&format!("accessToken, {access_token}"))
            .map_err(|e| StreamError::InvalidRequest(e.to_string()))?;
        let origin = HeaderValue::from_str(&self.origin)
            .map_err(|e| StreamError::InvalidRequest(e.to_string()))?;
        request.headers_mut().insert(SEC_WEBSOCKET_PROTOCOL, protocol);
        request.headers_mut().insert(ORIGIN, origin);

        tracing::debug!(url = %self.url, "Opening push connection");
        let (ws_stream, _) = tokio::time::timeout(self.timeout, connect_async(request))
            .await
            .map_err(|_| {
                #[allow(clippy::cast_possible_truncation)]
                let ms = self.timeout.as_millis() as u64;
                tracing::debug!(url = %self.url, timeout_ms = ms, "Push handshake timed out");
                StreamError::Timeout(ms)
            })??;

        let frames = ws_stream.filter_map(|message| async move {
            match message {
                Ok(Message::Text(text)) => Some(Ok(text.as_str().to_owned())),
                Ok(Message::Binary(bytes)) => String::from_utf8(bytes.to_vec()).ok().map(Ok),
                Ok(Message::Close(_)) => Some(Err(StreamError::Closed)),
                Ok(_) => None,
                Err(e) => Some(Err(StreamError::WebSocket(e))),
            }
        });
        Ok(frames.boxed())
    }
}
