pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod pipeline;
pub mod rating;
pub mod services;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::cli::ListArgs;
use crate::config::settings::AppConfig;
use crate::services::listing::ListingService;
use crate::services::server::ServerService;

pub fn interpret() -> Cli {
    Cli::parse()
}

fn load_config(data_dir: Option<PathBuf>) -> AppConfig {
    let config = AppConfig::from_env();
    match data_dir {
        Some(dir) => config.with_data_dir(dir),
        None => config,
    }
}

pub fn handle_serve(port: u16, data_dir: Option<PathBuf>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = load_config(data_dir);
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_players(args: &ListArgs, data_dir: Option<PathBuf>) -> Result<()> {
    ListingService::new(load_config(data_dir))?.players(args)
}

pub fn handle_teams(args: &ListArgs, data_dir: Option<PathBuf>) -> Result<()> {
    ListingService::new(load_config(data_dir))?.teams(args)
}

pub fn handle_events(args: &ListArgs, data_dir: Option<PathBuf>) -> Result<()> {
    ListingService::new(load_config(data_dir))?.events(args)
}

pub fn handle_tiers() -> Result<()> {
    ListingService::new(AppConfig::from_env())?.tiers();
    Ok(())
}

pub fn handle_decay(source: &str, base_rp: f64, days: f64) -> Result<()> {
    ListingService::new(AppConfig::from_env())?.decay(source, base_rp, days)
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}
