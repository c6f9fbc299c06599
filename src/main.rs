use anyhow::Result;

use proam_rankings::cli::{Cli, Command};
use proam_rankings::{
    handle_completions, handle_decay, handle_events, handle_players, handle_serve, handle_teams, handle_tiers,
    interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(cli)
}

fn execute_command(cli: Cli) -> Result<()> {
    let data_dir = cli.data_dir;
    match &cli.command {
        Command::Serve { port } => handle_serve(*port, data_dir),
        Command::Players(args) => handle_players(args, data_dir),
        Command::Teams(args) => handle_teams(args, data_dir),
        Command::Events(args) => handle_events(args, data_dir),
        Command::Tiers => handle_tiers(),
        Command::Decay { source, base_rp, days } => handle_decay(source, *base_rp, *days),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
