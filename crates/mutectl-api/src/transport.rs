// Transport configuration for building reqwest::Client instances.
//
// The control API is plain local HTTP, so the only knob that matters is the
// request timeout: a hung controller must surface as a connectivity error
// within a few seconds, never as a request left pending.

use std::time::Duration;

use crate::error::Error;

/// Transport settings shared by every request the client makes.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(3),
        }
    }
}

impl TransportConfig {
    /// Transport with the given timeout in whole seconds.
    pub fn with_timeout_secs(secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(secs),
        }
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("mutectl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))
    }
}
