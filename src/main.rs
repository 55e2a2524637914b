use clap::Parser;
use tracing::info;

use roxy_scaffold::{
    cli::{Cli, Command},
    client::RoxyClient,
    config::Config,
    container::ContainerService,
    health::HealthCheck,
    logging,
    scaffold::Scaffold,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env()?;
    logging::init(config.log_level);

    info!(
        roxy = %config.base_url(),
        container = %config.container_name,
        log_level = config.log_level.as_str(),
        "Starting roxy-scaffold"
    );

    let client = RoxyClient::from_config(&config);
    let service = ContainerService::from_config(&config);
    let scaffold = Scaffold::new(client, service, HealthCheck::from_config(&config));

    match cli.command {
        Some(Command::Stop) => scaffold.stop().await?,
        None | Some(Command::Run) => {
            scaffold.run().await?;
        }
    }

    Ok(())
}
