use std::time::Duration;

use tracing::debug;

use crate::client::FlagApi;
use crate::config::Config;

/// Polls the flag listing until the server answers or the attempts run out.
#[derive(Debug, Clone, Copy)]
pub struct HealthCheck {
    max_attempts: u32,
    interval: Duration,
}

impl HealthCheck {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            interval,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.health_max_attempts, config.health_interval)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// One probe: the server is healthy when listing flags succeeds.
    pub async fn healthcheck<C>(&self, client: &C) -> bool
    where
        C: FlagApi + ?Sized,
    {
        client.get_all_flags().await.is_success()
    }

    /// Returns `false` once `max_attempts` probes have failed. Never errors;
    /// the caller decides what an unhealthy server means.
    pub async fn await_healthy<C>(&self, client: &C) -> bool
    where
        C: FlagApi + ?Sized,
    {
        let mut tries = 0;

        while !self.healthcheck(client).await {
            tries += 1;
            debug!(attempt = tries, max_attempts = self.max_attempts, "Roxy not healthy yet");

            tokio::time::sleep(self.interval).await;

            if tries >= self.max_attempts {
                return false;
            }
        }

        true
    }
}
