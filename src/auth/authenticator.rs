// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Login and refresh flows against the identity provider.

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::header::{ACCEPT, LOCATION, ORIGIN, USER_AGENT};
use reqwest::redirect::Policy;
use reqwest::{Client, Url};
use serde::Deserialize;
use uuid::Uuid;

use super::CredentialSource;
use super::credential::Credential;
use super::login_form::LoginForm;
use crate::error::{AuthenticationError, TransportError};
use crate::protocol::ApiConfig;

/// User agent presented to the identity provider's login pages.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Progress of the authenticator.
///
/// A login walks `Unauthenticated → AuthorizationRequested →
/// LoginFormSubmitted → CodeCaptured → TokenAcquired`. A refresh is only
/// possible from `TokenAcquired` and passes through `Refreshing`. Any failed
/// step ends in `Failed`, from which only a new login proceeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// No login was attempted yet.
    Unauthenticated,
    /// The login page was requested.
    AuthorizationRequested,
    /// The login form was submitted.
    LoginFormSubmitted,
    /// The authorization code was read from the redirect.
    CodeCaptured,
    /// A credential is held.
    TokenAcquired(Credential),
    /// A refresh exchange is in flight.
    Refreshing,
    /// The last login or refresh failed.
    Failed(String),
}

impl AuthState {
    /// Returns the held credential, if any.
    #[must_use]
    pub fn credential(&self) -> Option<&Credential> {
        match self {
            Self::TokenAcquired(credential) => Some(credential),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Drives the browser-emulating login and the token refresh.
///
/// The identity provider offers no password grant for this client, so a
/// login fetches the provider's HTML login page, submits its form with the
/// account credentials and captures the authorization code from the single
/// redirect that follows. The code is then exchanged for tokens.
///
/// # Examples
///
/// ```no_run
/// use systemair_lib::auth::Authenticator;
/// use systemair_lib::protocol::ApiConfig;
///
/// # async fn example() -> systemair_lib::Result<()> {
/// let mut auth = Authenticator::new(ApiConfig::default(), "user@example.com", "secret")?;
/// let credential = auth.login().await?;
/// println!("token valid until {}", credential.expiry());
///
/// let credential = auth.refresh().await?;
/// # Ok(())
/// # }
/// ```
pub struct Authenticator {
    config: ApiConfig,
    client: Client,
    username: String,
    password: String,
    state: AuthState,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("username", &self.username)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    /// Creates an authenticator for an account.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(
        config: ApiConfig,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, AuthenticationError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(TransportError::Http)?;

        Ok(Self {
            config,
            client,
            username: username.into(),
            password: password.into(),
            state: AuthState::Unauthenticated,
        })
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Returns the held credential, if any.
    #[must_use]
    pub fn credential(&self) -> Option<&Credential> {
        self.state.credential()
    }

    /// Builds the authorization request URL for an anti-replay `state`.
    #[must_use]
    pub fn authorization_url(&self, state: &str) -> String {
        format!(
            "{}?client_id={}&response_type=code&state={}&redirect_uri={}&scope=openid",
            self.config.auth_url(),
            urlencoding::encode(self.config.client_id()),
            urlencoding::encode(state),
            urlencoding::encode(self.config.redirect_uri()),
        )
    }

    /// Runs the full login flow and stores the resulting credential.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticationError`] if the login page has no form, the
    /// submission does not redirect, the redirect carries no code, the code
    /// exchange is rejected, or a request fails or times out.
    pub async fn login(&mut self) -> Result<Credential, AuthenticationError> {
        let result = self.run_login().await;
        self.settle(result)
    }

    /// Exchanges the held refresh token for a new credential.
    ///
    /// Both tokens are rotated. On failure the authenticator moves to
    /// [`AuthState::Failed`] and a new [`login`](Self::login) is required.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticationError::NoRefreshToken`] if no credential with
    /// a refresh token is held, or another [`AuthenticationError`] if the
    /// exchange fails.
    pub async fn refresh(&mut self) -> Result<Credential, AuthenticationError> {
        let refresh_token = self
            .credential()
            .and_then(Credential::refresh_token)
            .cloned()
            .ok_or(AuthenticationError::NoRefreshToken)?;

        self.state = AuthState::Refreshing;
        tracing::debug!("Refreshing access token");

        let result = self
            .exchange(&[
                ("grant_type", "refresh_token"),
                ("client_id", self.config.client_id()),
                ("refresh_token", refresh_token.as_str()),
                ("redirect_uri", self.config.redirect_uri()),
            ])
            .await;
        self.settle(result)
    }

    fn settle(
        &mut self,
        result: Result<Credential, AuthenticationError>,
    ) -> Result<Credential, AuthenticationError> {
        match result {
            Ok(credential) => {
                tracing::info!(expiry = %credential.expiry(), "Credential acquired");
                self.state = AuthState::TokenAcquired(credential.clone());
                Ok(credential)
            }
            Err(e) => {
                self.state = AuthState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    async fn run_login(&mut self) -> Result<Credential, AuthenticationError> {
        let timeout = self.config.timeout();
        // Both clients share one cookie jar, like a single browser session
        let jar = Arc::new(Jar::default());
        let browser = self.browser_client(&jar, Policy::default())?;
        let submitter = self.browser_client(&jar, Policy::none())?;

        let anti_replay = Uuid::new_v4().to_string();
        let auth_url = self.authorization_url(&anti_replay);
        self.state = AuthState::AuthorizationRequested;
        tracing::debug!(url = %self.config.auth_url(), "Requesting login page");

        let response = browser
            .get(&auth_url)
            .header(ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(e, timeout))?;
        if !response.status().is_success() {
            return Err(TransportError::from_status(response.status()).into());
        }
        let page_url = response.url().clone();
        let html = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(e, timeout))?;

        let form = LoginForm::parse(&html, &page_url, &self.username, &self.password)?;
        tracing::debug!(action = %form.action, fields = form.fields.len(), "Submitting login form");

        let response = submitter
            .post(form.action.clone())
            .form(&form.fields)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(e, timeout))?;
        self.state = AuthState::LoginFormSubmitted;

        let status = response.status();
        if !status.is_redirection() {
            return Err(AuthenticationError::NoRedirect {
                status: status.as_u16(),
            });
        }
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthenticationError::CodeNotFound)?;
        let code = authorization_code(&form.action, location)?;
        self.state = AuthState::CodeCaptured;
        tracing::debug!("Authorization code captured");

        self.exchange(&[
            ("grant_type", "authorization_code"),
            ("code", code.as_str()),
            ("redirect_uri", self.config.redirect_uri()),
            ("client_id", self.config.client_id()),
        ])
        .await
    }

    fn browser_client(&self, jar: &Arc<Jar>, policy: Policy) -> Result<Client, TransportError> {
        Client::builder()
            .cookie_provider(Arc::clone(jar))
            .redirect(policy)
            .user_agent(BROWSER_USER_AGENT)
            .timeout(self.config.timeout())
            .build()
            .map_err(TransportError::Http)
    }

    async fn exchange(&self, params: &[(&str, &str)]) -> Result<Credential, AuthenticationError> {
        let timeout = self.config.timeout();

        let response = self
            .client
            .post(self.config.token_url())
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(ACCEPT, "application/json, text/plain, */*")
            .header(ORIGIN, self.config.origin())
            .form(params)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), body = %body, "Token exchange rejected");
            return Err(AuthenticationError::ExchangeRejected {
                status: status.as_u16(),
                body,
            });
        }

        let tokens: TokenResponse = response
            .json()
            .await
            .map_err(|e| TransportError::from_reqwest(e, timeout))?;
        Ok(Credential::from_tokens(
            tokens.access_token,
            tokens.refresh_token,
        )?)
    }
}

/// Reads the `code` query parameter of a redirect target.
fn authorization_code(base: &Url, location: &str) -> Result<String, AuthenticationError> {
    let target = base
        .join(location)
        .map_err(|_| AuthenticationError::CodeNotFound)?;
    target
        .query_pairs()
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
        .filter(|code| !code.is_empty())
        .ok_or(AuthenticationError::CodeNotFound)
}

impl CredentialSource for Authenticator {
    async fn login(&mut self) -> Result<Credential, AuthenticationError> {
        Authenticator::login(self).await
    }

    async fn refresh(&mut self) -> Result<Credential, AuthenticationError> {
        Authenticator::refresh(self).await
    }

    fn credential(&self) -> Option<&Credential> {
        self.state.credential()
    }
}
