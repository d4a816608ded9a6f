// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Access credentials and their validity.

use std::fmt;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, TimeDelta, Utc};

use crate::error::TokenDecodeError;

/// Margin applied when checking a credential against the clock.
///
/// A credential that expires within this margin is already treated as
/// expired, so no call starts with a token that lapses mid-flight.
pub const DEFAULT_SKEW: Duration = Duration::from_secs(30);

/// A non-empty refresh token.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Wraps a refresh token, rejecting empty strings.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// Returns the token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RefreshToken(..)")
    }
}

/// An access token together with its refresh token and expiry.
///
/// The expiry is always read from the access token itself; there is no way
/// to construct a credential with an arbitrary expiry. A credential is never
/// modified: refreshing produces a new one.
///
/// # Examples
///
/// ```
/// use base64::Engine;
/// use base64::engine::general_purpose::URL_SAFE_NO_PAD;
/// use chrono::{TimeZone, Utc};
/// use systemair_lib::auth::{Credential, DEFAULT_SKEW};
///
/// let payload = URL_SAFE_NO_PAD.encode(r#"{"exp":1700000000}"#);
/// let token = format!("header.{payload}.signature");
///
/// let credential = Credential::from_tokens(token, Some("refresh".to_string())).unwrap();
/// let expiry = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
/// assert_eq!(credential.expiry(), expiry);
///
/// let now = expiry - chrono::TimeDelta::seconds(31);
/// assert!(credential.is_valid(now, DEFAULT_SKEW));
/// assert!(!credential.is_valid(now + chrono::TimeDelta::seconds(1), DEFAULT_SKEW));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    access_token: String,
    refresh_token: Option<RefreshToken>,
    expiry: DateTime<Utc>,
}

impl Credential {
    /// Builds a credential from a token response.
    ///
    /// An empty refresh token is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`TokenDecodeError`] if the access token carries no readable
    /// expiry claim.
    pub fn from_tokens(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
    ) -> Result<Self, TokenDecodeError> {
        let access_token = access_token.into();
        let expiry = token_expiry(&access_token)?;
        Ok(Self {
            access_token,
            refresh_token: refresh_token.and_then(RefreshToken::new),
            expiry,
        })
    }

    /// Returns the access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the refresh token, if one was issued.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&RefreshToken> {
        self.refresh_token.as_ref()
    }

    /// Returns the expiry of the access token.
    #[must_use]
    pub fn expiry(&self) -> DateTime<Utc> {
        self.expiry
    }

    /// Returns `true` if `now + skew` is strictly before the expiry.
    #[must_use]
    pub fn is_valid(&self, now: DateTime<Utc>, skew: Duration) -> bool {
        TimeDelta::from_std(skew)
            .ok()
            .and_then(|skew| now.checked_add_signed(skew))
            .is_some_and(|deadline| deadline < self.expiry)
    }

    /// Returns `true` if the credential is valid now, with the default skew.
    #[must_use]
    pub fn is_valid_now(&self) -> bool {
        self.is_valid(Utc::now(), DEFAULT_SKEW)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"..")
            .field("refresh_token", &self.refresh_token)
            .field("expiry", &self.expiry)
            .finish()
    }
}

/// Reads the `exp` claim of a JWT access token.
///
/// The token is not verified; only its payload segment is decoded.
///
/// # Errors
///
/// Returns [`TokenDecodeError`] if the token does not have three segments,
/// its payload is not base64url-encoded JSON, or it has no usable `exp`.
pub fn token_expiry(token: &str) -> Result<DateTime<Utc>, TokenDecodeError> {
    let mut segments = token.split('.');
    let (Some(_), Some(payload), Some(_), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenDecodeError::Malformed);
    };
    if payload.is_empty() {
        return Err(TokenDecodeError::Malformed);
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| TokenDecodeError::Base64(e.to_string()))?;
    let claims: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| TokenDecodeError::Json(e.to_string()))?;

    let exp = claims.get("exp").ok_or(TokenDecodeError::MissingExpiry)?;
    let seconds = exp
        .as_i64()
        .or_else(|| exp.as_f64().map(f64_to_seconds))
        .ok_or(TokenDecodeError::MissingExpiry)?;

    DateTime::from_timestamp(seconds, 0).ok_or(TokenDecodeError::ExpiryOutOfRange(seconds))
}

// Saturating float to integer conversion; fractional seconds are dropped
#[allow(clippy::cast_possible_truncation)]
fn f64_to_seconds(value: f64) -> i64 {
    value as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(claims: &str) -> String {
        format!("eyJhbGciOiJSUzI1NiJ9.{}.sig", URL_SAFE_NO_PAD.encode(claims))
    }

    fn credential(expiry: i64) -> Credential {
        Credential::from_tokens(token_with(&format!(r#"{{"exp":{expiry}}}"#)), None).unwrap()
    }

    // ========================================================================
    // Expiry decoding
    // ========================================================================

    #[test]
    fn expiry_is_read_from_payload() {
        let expiry = token_expiry(&token_with(r#"{"sub":"user","exp":1700000000}"#)).unwrap();
        assert_eq!(expiry.timestamp(), 1_700_000_000);
    }

    #[test]
    fn padded_payload_is_accepted() {
        // Ten bytes of JSON encode with two padding characters
        let payload = base64::engine::general_purpose::URL_SAFE.encode(r#"{"exp":10}"#);
        assert!(payload.ends_with("=="));
        let expiry = token_expiry(&format!("h.{payload}.s")).unwrap();
        assert_eq!(expiry.timestamp(), 10);
    }

    #[test]
    fn float_expiry_is_truncated() {
        let expiry = token_expiry(&token_with(r#"{"exp":1700000000.75}"#)).unwrap();
        assert_eq!(expiry.timestamp(), 1_700_000_000);
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert_eq!(token_expiry("not-a-jwt"), Err(TokenDecodeError::Malformed));
        assert_eq!(token_expiry("a..c"), Err(TokenDecodeError::Malformed));
        assert_eq!(token_expiry("a.b.c.d"), Err(TokenDecodeError::Malformed));
        assert!(matches!(
            token_expiry("a.!!!.c"),
            Err(TokenDecodeError::Base64(_))
        ));
        assert!(matches!(
            token_expiry(&format!("a.{}.c", URL_SAFE_NO_PAD.encode("nope"))),
            Err(TokenDecodeError::Json(_))
        ));
    }

    #[test]
    fn missing_expiry_is_rejected() {
        assert_eq!(
            token_expiry(&token_with(r#"{"sub":"user"}"#)),
            Err(TokenDecodeError::MissingExpiry)
        );
        assert_eq!(
            token_expiry(&token_with(r#"{"exp":"soon"}"#)),
            Err(TokenDecodeError::MissingExpiry)
        );
    }

    #[test]
    fn out_of_range_expiry_is_rejected() {
        assert_eq!(
            token_expiry(&token_with(r#"{"exp":9223372036854775807}"#)),
            Err(TokenDecodeError::ExpiryOutOfRange(i64::MAX))
        );
    }

    // ========================================================================
    // Validity
    // ========================================================================

    #[test]
    fn validity_boundary_is_exact_at_skew() {
        let credential = credential(1_000_000);
        let expiry = credential.expiry();

        let at_boundary = expiry - TimeDelta::seconds(30);
        assert!(!credential.is_valid(at_boundary, DEFAULT_SKEW));
        assert!(credential.is_valid(at_boundary - TimeDelta::milliseconds(1), DEFAULT_SKEW));
        assert!(!credential.is_valid(expiry, DEFAULT_SKEW));
    }

    #[test]
    fn expiring_in_ten_seconds_is_invalid() {
        let credential = credential(1_000_000);
        let now = credential.expiry() - TimeDelta::seconds(10);
        assert!(!credential.is_valid(now, DEFAULT_SKEW));
        assert!(credential.is_valid(now, Duration::from_secs(5)));
    }

    #[test]
    fn empty_refresh_token_is_absent() {
        let credential =
            Credential::from_tokens(token_with(r#"{"exp":1}"#), Some(String::new())).unwrap();
        assert!(credential.refresh_token().is_none());

        let credential =
            Credential::from_tokens(token_with(r#"{"exp":1}"#), Some("r".to_string())).unwrap();
        assert_eq!(credential.refresh_token().unwrap().as_str(), "r");
    }

    #[test]
    fn debug_hides_tokens() {
        let credential =
            Credential::from_tokens(token_with(r#"{"exp":1}"#), Some("secret".to_string()))
                .unwrap();
        let debug = format!("{credential:?}");
        assert!(!debug.contains("secret"));
        assert!(!debug.contains("eyJ"));
    }
}
