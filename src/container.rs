//! Lifecycle of the Roxy container, driven through the runtime's CLI.
//!
//! Both operations are fire-and-forget: a non-zero exit from the runtime is
//! logged and tolerated (stopping a container that is not running is the
//! common case). Only a runtime that cannot be launched at all is an error.

use std::process::ExitStatus;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::Config;

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("failed to launch container runtime '{runtime}': {source}")]
    Spawn {
        runtime: String,
        #[source]
        source: std::io::Error,
    },
}

#[async_trait]
pub trait ContainerLifecycle: Send + Sync {
    async fn setup(&self) -> Result<(), ContainerError>;

    async fn teardown(&self) -> Result<(), ContainerError>;
}

#[derive(Debug, Clone)]
pub struct ContainerService {
    runtime: String,
    container_name: String,
    image: String,
    host_port: u16,
    container_port: u16,
}

impl ContainerService {
    pub fn from_config(config: &Config) -> Self {
        Self {
            runtime: config.container_runtime.clone(),
            container_name: config.container_name.clone(),
            image: config.image_name.clone(),
            host_port: config.port,
            container_port: config.container_port,
        }
    }

    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    /// `run --rm --name <name> -p <host>:<container> -d <image>`
    pub fn run_args(&self) -> Vec<String> {
        vec![
            "run".to_string(),
            "--rm".to_string(),
            "--name".to_string(),
            self.container_name.clone(),
            "-p".to_string(),
            format!("{}:{}", self.host_port, self.container_port),
            "-d".to_string(),
            self.image.clone(),
        ]
    }

    /// `stop <name>`
    pub fn stop_args(&self) -> Vec<String> {
        vec!["stop".to_string(), self.container_name.clone()]
    }

    async fn invoke(&self, args: &[String]) -> Result<ExitStatus, ContainerError> {
        debug!(runtime = %self.runtime, ?args, "Invoking container runtime");

        let status = Command::new(&self.runtime)
            .args(args)
            .status()
            .await
            .map_err(|source| ContainerError::Spawn {
                runtime: self.runtime.clone(),
                source,
            })?;

        if !status.success() {
            warn!(
                runtime = %self.runtime,
                container = %self.container_name,
                command = %args.first().map(String::as_str).unwrap_or_default(),
                %status,
                "Container runtime exited unsuccessfully"
            );
        }

        Ok(status)
    }
}

#[async_trait]
impl ContainerLifecycle for ContainerService {
    async fn setup(&self) -> Result<(), ContainerError> {
        self.invoke(&self.run_args()).await.map(|_| ())
    }

    async fn teardown(&self) -> Result<(), ContainerError> {
        self.invoke(&self.stop_args()).await.map(|_| ())
    }
}
