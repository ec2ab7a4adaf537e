//! Assertion waiter
//!
//! Poll-until-true primitive behind every post-action verification and the
//! `wait` command. The probe runs immediately, then on each interval tick
//! until it succeeds or the timeout elapses; the caller always receives
//! the last probe outcome.

use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::time::sleep;

/// Timeout and poll interval for one wait
#[derive(Debug, Clone, Copy)]
pub struct WaitConfig {
    /// Total time budget
    pub timeout: Duration,
    /// Delay between probes
    pub interval: Duration,
}

impl WaitConfig {
    /// Defaults for post-action verification: 1000 ms / 50 ms
    #[must_use]
    pub fn verifier() -> Self {
        Self {
            timeout: Duration::from_millis(1000),
            interval: Duration::from_millis(50),
        }
    }

    /// Defaults for the `wait` command: 5000 ms / 100 ms
    #[must_use]
    pub fn wait_action() -> Self {
        Self {
            timeout: Duration::from_millis(5000),
            interval: Duration::from_millis(100),
        }
    }

    /// Override the timeout from a per-call option
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        if let Some(ms) = timeout_ms {
            self.timeout = Duration::from_millis(ms);
        }
        self
    }

    /// Override the interval from a per-call option
    #[must_use]
    pub fn with_interval_ms(mut self, interval_ms: Option<u64>) -> Self {
        if let Some(ms) = interval_ms {
            self.interval = Duration::from_millis(ms.max(1));
        }
        self
    }
}

/// The result of one probe
#[derive(Debug, Clone)]
pub struct PollOutcome {
    /// Whether the condition held
    pub success: bool,
    /// Failure description
    pub error: Option<String>,
    /// Expected value, for verification mismatches
    pub expected: Option<Value>,
    /// Actual value, for verification mismatches
    pub actual: Option<Value>,
}

impl PollOutcome {
    /// The condition held
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
            expected: None,
            actual: None,
        }
    }

    /// The condition did not hold
    #[must_use]
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            expected: None,
            actual: None,
        }
    }

    /// The condition did not hold; record the mismatch
    #[must_use]
    pub fn mismatch(error: impl Into<String>, expected: Value, actual: Value) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            expected: Some(expected),
            actual: Some(actual),
        }
    }
}

/// Poll a predicate until it succeeds or the timeout elapses.
///
/// Returns the successful outcome, or the last failing outcome at expiry.
/// Cooperative: each iteration yields through a scheduled delay.
pub async fn poll_until<F>(config: &WaitConfig, mut probe: F) -> PollOutcome
where
    F: FnMut() -> PollOutcome,
{
    let start = Instant::now();
    loop {
        let outcome = probe();
        if outcome.success || start.elapsed() >= config.timeout {
            return outcome;
        }
        sleep(config.interval).await;
    }
}
