use cargotower::cli::{self, Cli};
use cargotower::config::{self, ConfigLoadResult};
use cargotower::{bootstrap, logger};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match config::load_config(cli.config.as_deref()) {
        ConfigLoadResult::Success(config) => config,
        ConfigLoadResult::LoadError(msg) | ConfigLoadResult::DeserializeError(msg) => {
            return Err(msg.into());
        }
    };

    logger::setup_logger(config.logging())?;

    let provider = bootstrap::build_provider(&config);
    let output = cli::execute(&cli.command, &provider).await?;
    println!("{output}");
    Ok(())
}
