// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parsing of the identity provider's login page.

use reqwest::Url;
use scraper::{Html, Selector};

use crate::error::AuthenticationError;

/// The login form of the identity provider, filled with credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LoginForm {
    /// Absolute submission target.
    pub(crate) action: Url,
    /// Form fields in document order.
    pub(crate) fields: Vec<(String, String)>,
}

impl LoginForm {
    /// Extracts the first form of `html` and fills it.
    ///
    /// Inputs named `username` and `password` receive the credentials; all
    /// other named inputs keep their default value. The `action` attribute is
    /// resolved against `page_url`.
    ///
    /// The parsed document is not `Send`, so this stays synchronous and must
    /// not be held across an await point.
    pub(crate) fn parse(
        html: &str,
        page_url: &Url,
        username: &str,
        password: &str,
    ) -> Result<Self, AuthenticationError> {
        let document = Html::parse_document(html);
        let form_selector =
            Selector::parse("form").map_err(|_| AuthenticationError::FormNotFound)?;
        let input_selector =
            Selector::parse("input[name]").map_err(|_| AuthenticationError::FormNotFound)?;

        let form = document
            .select(&form_selector)
            .next()
            .ok_or(AuthenticationError::FormNotFound)?;

        let action = form
            .value()
            .attr("action")
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| AuthenticationError::InvalidFormAction(String::new()))?;
        let action = page_url
            .join(action)
            .map_err(|_| AuthenticationError::InvalidFormAction(action.to_string()))?;

        let fields = form
            .select(&input_selector)
            .filter_map(|input| {
                let name = input.value().attr("name")?;
                let value = match name {
                    "username" => username,
                    "password" => password,
                    _ => input.value().attr("value").unwrap_or_default(),
                };
                Some((name.to_string(), value.to_string()))
            })
            .collect();

        Ok(Self { action, fields })
    }

    /// Returns the value submitted for a field.
    #[cfg(test)]
    fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <form id="kc-form-login" method="post"
                action="/auth/realms/iot/login-actions/authenticate?session_code=abc&amp;tab_id=x">
            <input type="text" name="username" value="prefilled">
            <input type="password" name="password">
            <input type="hidden" name="credentialId" value="">
            <input type="checkbox" name="rememberMe" value="on">
            <input type="submit" value="Sign In">
          </form>
          <form action="/other"><input name="ignored" value="1"></form>
        </body></html>
    "#;

    fn page_url() -> Url {
        Url::parse("https://sso.example.com/auth/realms/iot/protocol/openid-connect/auth?x=1")
            .unwrap()
    }

    #[test]
    fn fills_credentials_and_keeps_defaults() {
        let form = LoginForm::parse(PAGE, &page_url(), "user@example.com", "hunter2").unwrap();

        assert_eq!(form.field("username"), Some("user@example.com"));
        assert_eq!(form.field("password"), Some("hunter2"));
        assert_eq!(form.field("credentialId"), Some(""));
        assert_eq!(form.field("rememberMe"), Some("on"));
        assert_eq!(form.field("ignored"), None);
        // Unnamed submit button is not a field
        assert_eq!(form.fields.len(), 4);
    }

    #[test]
    fn resolves_relative_action() {
        let form = LoginForm::parse(PAGE, &page_url(), "u", "p").unwrap();
        assert_eq!(
            form.action.as_str(),
            "https://sso.example.com/auth/realms/iot/login-actions/authenticate?session_code=abc&tab_id=x"
        );
    }

    #[test]
    fn keeps_absolute_action() {
        let html = r#"<form action="https://idp.example.org/submit"><input name="username"></form>"#;
        let form = LoginForm::parse(html, &page_url(), "u", "p").unwrap();
        assert_eq!(form.action.as_str(), "https://idp.example.org/submit");
    }

    #[test]
    fn missing_form_is_an_error() {
        let err = LoginForm::parse("<html><p>Maintenance</p></html>", &page_url(), "u", "p")
            .unwrap_err();
        assert!(matches!(err, AuthenticationError::FormNotFound));
    }

    #[test]
    fn missing_action_is_an_error() {
        let err = LoginForm::parse("<form><input name=\"username\"></form>", &page_url(), "u", "p")
            .unwrap_err();
        assert!(matches!(err, AuthenticationError::InvalidFormAction(_)));
    }
}
