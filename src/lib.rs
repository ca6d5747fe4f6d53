pub mod cli;
pub mod core;
pub mod models;
pub mod platform;

use clap::Parser;
use cli::Cli;

pub fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.load_config()?;
    let summary = cli::run_session(&cli, &config)?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
