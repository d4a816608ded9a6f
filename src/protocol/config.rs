// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Backend endpoints and request settings.

use std::time::Duration;

/// Endpoints and request settings of the Home Solutions backend.
///
/// The defaults point at the production backend. Every endpoint can be
/// replaced, which is how tests run against a local mock server.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use systemair_lib::protocol::ApiConfig;
///
/// let config = ApiConfig::default();
/// assert_eq!(config.client_id(), "iot-application");
/// assert_eq!(config.timeout(), Duration::from_secs(10));
///
/// let config = ApiConfig::default()
///     .with_gateway_url("http://127.0.0.1:8080/gateway/api")
///     .with_timeout(Duration::from_secs(2));
/// assert_eq!(config.gateway_url(), "http://127.0.0.1:8080/gateway/api");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    auth_url: String,
    token_url: String,
    gateway_url: String,
    remote_url: String,
    stream_url: String,
    origin: String,
    client_id: String,
    redirect_uri: String,
    timeout: Duration,
}

impl ApiConfig {
    /// OpenID Connect authorization endpoint.
    pub const DEFAULT_AUTH_URL: &'static str =
        "https://sso.systemair.com/auth/realms/iot/protocol/openid-connect/auth";
    /// OpenID Connect token endpoint.
    pub const DEFAULT_TOKEN_URL: &'static str =
        "https://sso.systemair.com/auth/realms/iot/protocol/openid-connect/token";
    /// Account-level GraphQL endpoint.
    pub const DEFAULT_GATEWAY_URL: &'static str =
        "https://homesolutions.systemair.com/gateway/api";
    /// Device-level GraphQL endpoint.
    pub const DEFAULT_REMOTE_URL: &'static str = "https://homesolutions.systemair.com/remote-api/";
    /// Push channel endpoint.
    pub const DEFAULT_STREAM_URL: &'static str = "wss://homesolutions.systemair.com/streaming/";
    /// Origin of the web application.
    pub const DEFAULT_ORIGIN: &'static str = "https://homesolutions.systemair.com";
    /// OAuth client identifier of the web application.
    pub const DEFAULT_CLIENT_ID: &'static str = "iot-application";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Sets the authorization endpoint.
    #[must_use]
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    /// Sets the token endpoint.
    #[must_use]
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Sets the account-level GraphQL endpoint.
    #[must_use]
    pub fn with_gateway_url(mut self, url: impl Into<String>) -> Self {
        self.gateway_url = url.into();
        self
    }

    /// Sets the device-level GraphQL endpoint.
    #[must_use]
    pub fn with_remote_url(mut self, url: impl Into<String>) -> Self {
        self.remote_url = url.into();
        self
    }

    /// Sets the push channel endpoint.
    #[must_use]
    pub fn with_stream_url(mut self, url: impl Into<String>) -> Self {
        self.stream_url = url.into();
        self
    }

    /// Sets the origin sent with API and stream requests.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Sets the OAuth client identifier.
    #[must_use]
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Sets the OAuth redirect target.
    #[must_use]
    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = uri.into();
        self
    }

    /// Sets the timeout applied to every request.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the authorization endpoint.
    #[must_use]
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// Returns the token endpoint.
    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Returns the account-level GraphQL endpoint.
    #[must_use]
    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }

    /// Returns the device-level GraphQL endpoint.
    #[must_use]
    pub fn remote_url(&self) -> &str {
        &self.remote_url
    }

    /// Returns the push channel endpoint.
    #[must_use]
    pub fn stream_url(&self) -> &str {
        &self.stream_url
    }

    /// Returns the origin.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns the OAuth client identifier.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the OAuth redirect target.
    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the referer sent with API requests.
    #[must_use]
    pub(crate) fn referer(&self) -> String {
        format!("{}/device/home", self.origin.trim_end_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            auth_url: Self::DEFAULT_AUTH_URL.to_string(),
            token_url: Self::DEFAULT_TOKEN_URL.to_string(),
            gateway_url: Self::DEFAULT_GATEWAY_URL.to_string(),
            remote_url: Self::DEFAULT_REMOTE_URL.to_string(),
            stream_url: Self::DEFAULT_STREAM_URL.to_string(),
            origin: Self::DEFAULT_ORIGIN.to_string(),
            client_id: Self::DEFAULT_CLIENT_ID.to_string(),
            redirect_uri: Self::DEFAULT_ORIGIN.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_production() {
        let config = ApiConfig::default();
        assert_eq!(config.auth_url(), ApiConfig::DEFAULT_AUTH_URL);
        assert_eq!(config.token_url(), ApiConfig::DEFAULT_TOKEN_URL);
        assert_eq!(config.stream_url(), "wss://homesolutions.systemair.com/streaming/");
        assert_eq!(config.redirect_uri(), "https://homesolutions.systemair.com");
        assert_eq!(config.referer(), "https://homesolutions.systemair.com/device/home");
    }

    #[test]
    fn builders_override_each_setting() {
        let config = ApiConfig::default()
            .with_auth_url("http://mock/auth")
            .with_token_url("http://mock/token")
            .with_remote_url("http://mock/remote")
            .with_stream_url("ws://mock/stream")
            .with_origin("http://mock/")
            .with_client_id("test-client")
            .with_redirect_uri("http://mock/callback")
            .with_timeout(Duration::from_millis(250));

        assert_eq!(config.auth_url(), "http://mock/auth");
        assert_eq!(config.token_url(), "http://mock/token");
        assert_eq!(config.remote_url(), "http://mock/remote");
        assert_eq!(config.stream_url(), "ws://mock/stream");
        assert_eq!(config.client_id(), "test-client");
        assert_eq!(config.redirect_uri(), "http://mock/callback");
        assert_eq!(config.timeout(), Duration::from_millis(250));
        assert_eq!(config.referer(), "http://mock/device/home");
    }
}
