//! Command definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use policy_api::DashboardQuery;

/// Policy registry CLI
#[derive(Parser, Debug)]
#[command(name = "policy")]
#[command(version)]
#[command(about = "Policy registry server and data tools")]
pub struct Cli {
    /// Directory holding the JSON data files (env: POLICY_DATA_DIR)
    #[arg(short, long, env = "POLICY_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Output format (json, table)
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Table format (human-readable)
    #[default]
    Table,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to (env: POLICY_BIND_ADDR)
        #[arg(short = 'H', long, env = "POLICY_BIND_ADDR", default_value = "0.0.0.0")]
        host: String,
        /// Port to listen on (env: POLICY_PORT)
        #[arg(short, long, env = "POLICY_PORT", default_value = "1000")]
        port: u16,
        /// Disable CORS headers
        #[arg(long)]
        no_cors: bool,
    },

    /// Create the data directory and empty data files
    Init,

    /// Dropdown options
    #[command(subcommand)]
    Options(OptionsCommands),

    /// Search the dashboard policies
    List(ListArgs),
}

/// Dropdown option commands
#[derive(Subcommand, Debug)]
pub enum OptionsCommands {
    /// Print the stored options
    Show,
    /// Recompute the options from the stored policies
    Rebuild,
}

/// Dashboard search arguments
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    #[arg(long)]
    pub jurisdiction: Option<String>,
    #[arg(long)]
    pub business_area: Option<String>,
    #[arg(long)]
    pub inventory_type: Option<String>,
    #[arg(long)]
    pub entity_type: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub policy_parameter: Option<String>,
    /// Zero-based page number
    #[arg(long)]
    pub page: Option<String>,
    /// Page size
    #[arg(long)]
    pub size: Option<String>,
    /// Field to sort by
    #[arg(long)]
    pub sort_by: Option<String>,
    /// asc or desc
    #[arg(long)]
    pub direction: Option<String>,
}

impl From<ListArgs> for DashboardQuery {
    fn from(args: ListArgs) -> Self {
        DashboardQuery {
            jurisdiction: args.jurisdiction,
            business_area: args.business_area,
            inventory_type: args.inventory_type,
            entity_type: args.entity_type,
            status: args.status,
            policy_parameter: args.policy_parameter,
            page: args.page,
            size: args.size,
            sort_by: args.sort_by,
            direction: args.direction,
        }
    }
}
