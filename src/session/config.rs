// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session loop settings.

use std::time::Duration;

use crate::auth::DEFAULT_SKEW;

/// Settings of the session loop.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use systemair_lib::session::{BackoffPolicy, SessionConfig};
///
/// let config = SessionConfig::default()
///     .with_poll_period(Duration::from_secs(30))
///     .with_backoff(BackoffPolicy::default().with_max_delay(Duration::from_secs(120)));
///
/// assert_eq!(config.poll_period(), Duration::from_secs(30));
/// assert_eq!(config.skew(), Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    poll_period: Duration,
    skew: Duration,
    backoff: BackoffPolicy,
}

impl SessionConfig {
    /// Default time between two cycles.
    pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_secs(60);

    /// Sets the time between two cycles.
    #[must_use]
    pub fn with_poll_period(mut self, period: Duration) -> Self {
        self.poll_period = period;
        self
    }

    /// Sets the margin before expiry at which a credential is renewed.
    #[must_use]
    pub fn with_skew(mut self, skew: Duration) -> Self {
        self.skew = skew;
        self
    }

    /// Sets the delays applied after failed logins.
    #[must_use]
    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Returns the time between two cycles.
    #[must_use]
    pub fn poll_period(&self) -> Duration {
        self.poll_period
    }

    /// Returns the credential validity margin.
    #[must_use]
    pub fn skew(&self) -> Duration {
        self.skew
    }

    /// Returns the login backoff policy.
    #[must_use]
    pub fn backoff(&self) -> &BackoffPolicy {
        &self.backoff
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_period: Self::DEFAULT_POLL_PERIOD,
            skew: DEFAULT_SKEW,
            backoff: BackoffPolicy::default(),
        }
    }
}

/// Exponential backoff between failed login attempts.
///
/// The delay never drops below the poll period in the session loop, so a
/// failing backend is retried at most once per period.
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffPolicy {
    /// Delay after the first failure.
    pub initial_delay: Duration,
    /// Upper bound of the delay.
    pub max_delay: Duration,
    /// Growth factor between consecutive failures.
    pub multiplier: f64,
}

impl BackoffPolicy {
    /// Sets the delay after the first failure.
    #[must_use]
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the upper bound of the delay.
    #[must_use]
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the growth factor.
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Returns the delay after `failures` consecutive failures.
    ///
    /// No failure means no delay.
    #[must_use]
    pub fn delay_for(&self, failures: u32) -> Duration {
        if failures == 0 {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(failures - 1).unwrap_or(i32::MAX);
        let delay = self.initial_delay.as_secs_f64() * self.multiplier.max(1.0).powi(exponent);
        Duration::try_from_secs_f64(delay)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(60),
            max_delay: Duration::from_secs(15 * 60),
            multiplier: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.poll_period(), Duration::from_secs(60));
        assert_eq!(config.skew(), Duration::from_secs(30));
        assert_eq!(config.backoff(), &BackoffPolicy::default());
    }

    #[test]
    fn backoff_grows_exponentially() {
        let policy = BackoffPolicy::default()
            .with_initial_delay(Duration::from_secs(1))
            .with_max_delay(Duration::from_secs(60));

        assert_eq!(policy.delay_for(0), Duration::ZERO);
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for(4), Duration::from_secs(8));
    }

    #[test]
    fn backoff_is_capped() {
        let policy = BackoffPolicy::default()
            .with_initial_delay(Duration::from_secs(1))
            .with_max_delay(Duration::from_secs(10));

        assert_eq!(policy.delay_for(5), Duration::from_secs(10));
        assert_eq!(policy.delay_for(u32::MAX), Duration::from_secs(10));
    }

    #[test]
    fn shrinking_multiplier_is_clamped() {
        let policy = BackoffPolicy::default()
            .with_initial_delay(Duration::from_secs(3))
            .with_multiplier(0.5);
        assert_eq!(policy.delay_for(3), Duration::from_secs(3));
    }
}
