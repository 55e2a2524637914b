use serde_json::Value;
use tracing::{debug, info, warn};

use crate::client::{FlagApi, Response};
use crate::container::{ContainerError, ContainerLifecycle};
use crate::flags::{INSPECTED_FLAG, SEED_DATA};
use crate::health::HealthCheck;

/// Outcome of a full seeding run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub healthy: bool,
    pub seeded: Vec<String>,
    pub failed: Vec<String>,
}

/// Wires the container, the flag client and the health check into the
/// teardown → setup → wait → clear → seed → verify sequence.
pub struct Scaffold<C, S> {
    client: C,
    service: S,
    healthcheck: HealthCheck,
}

impl<C, S> Scaffold<C, S>
where
    C: FlagApi,
    S: ContainerLifecycle,
{
    pub fn new(client: C, service: S, healthcheck: HealthCheck) -> Self {
        Self {
            client,
            service,
            healthcheck,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// `stop` subcommand: tear the container down and nothing else.
    pub async fn stop(&self) -> Result<(), ContainerError> {
        info!("Tearing down Roxy server...");
        self.service.teardown().await
    }

    pub async fn run(&self) -> Result<SeedReport, ContainerError> {
        let mut report = SeedReport::default();

        // clears out whatever an earlier run left behind
        info!("Tearing down existing services...");
        self.service.teardown().await?;

        info!("Setting up Roxy server...");
        self.service.setup().await?;

        info!("Awaiting healthy server...");
        report.healthy = self.healthcheck.await_healthy(&self.client).await;
        if !report.healthy {
            warn!(
                attempts = self.healthcheck.max_attempts(),
                "Roxy server never reported healthy, continuing anyway"
            );
        }

        info!("Deleting any existing flags...");
        let res = self.client.delete_all_flags().await;
        debug!(status = res.status(), "Deleted existing flags");

        info!("Seeding data...");
        for seed in &SEED_DATA {
            let res = self.client.update_flag(seed.name, seed.expression).await;
            if res.is_success() {
                report.seeded.push(seed.name.to_string());
            } else {
                warn!(flag = seed.name, status = res.status(), "Failed to seed flag");
                report.failed.push(seed.name.to_string());
            }
        }

        info!("Seeding complete...");

        let res = self.client.get_all_flags().await;
        debug!(flags = %render(&res), "Current flags");

        let res = self.client.get_flag(INSPECTED_FLAG).await;
        debug!(flag = INSPECTED_FLAG, status = res.status(), data = %render(&res), "Inspected flag");

        info!(
            seeded = report.seeded.len(),
            failed = report.failed.len(),
            "Successfully set up integration test seed data"
        );

        Ok(report)
    }
}

fn render(res: &Response) -> String {
    res.data().map(Value::to_string).unwrap_or_else(|| "null".to_string())
}
