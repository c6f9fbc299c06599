use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::config::settings::DATA_DIR_ENV;

#[derive(Parser, Debug)]
#[command(author, version, about = "NBA 2K Pro Am rankings and leaderboards")]
pub struct Cli {
    /// Directory holding players.json, teams.json and events.json
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    pub data_dir: Option<PathBuf>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the API server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// List players
    Players(ListArgs),
    /// List teams
    Teams(ListArgs),
    /// List events
    Events(ListArgs),
    /// Print the ranking reference tables
    Tiers,
    /// Compute decayed RP for a source after some days
    Decay {
        /// RP source, e.g. event, franchise_weekly, verified_league
        source: String,
        /// RP before decay
        base_rp: f64,
        /// Days since the RP was earned
        days: f64,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Default)]
pub struct ListArgs {
    /// Case-insensitive text search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category filter as key=value, repeatable (e.g. position=PG)
    #[arg(short, long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,

    /// Field to sort by
    #[arg(long)]
    pub sort_by: Option<String>,

    /// asc or desc (defaults to the field's natural order)
    #[arg(long)]
    pub order: Option<String>,

    /// Zero-based page index
    #[arg(long, default_value_t = 0)]
    pub page: usize,

    /// Records per page
    #[arg(long)]
    pub page_size: Option<usize>,
}
