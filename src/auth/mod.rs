// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authentication against the Systemair identity provider.
//!
//! The [`Authenticator`] performs the login and refresh flows and holds the
//! resulting [`Credential`]. The session loop only depends on the
//! [`CredentialSource`] trait, so it can be driven by another credential
//! provider.

mod authenticator;
mod credential;
mod login_form;

use std::future::Future;

pub use authenticator::{AuthState, Authenticator};
pub use credential::{Credential, DEFAULT_SKEW, RefreshToken, token_expiry};

use crate::error::AuthenticationError;

/// A provider of access credentials.
pub trait CredentialSource: Send {
    /// Acquires a new credential from scratch.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticationError`] if the login fails.
    fn login(&mut self) -> impl Future<Output = Result<Credential, AuthenticationError>> + Send;

    /// Replaces the current credential using its refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticationError`] if no refresh token is held or the
    /// exchange fails.
    fn refresh(&mut self) -> impl Future<Output = Result<Credential, AuthenticationError>> + Send;

    /// Returns the current credential, if any.
    fn credential(&self) -> Option<&Credential>;
}
