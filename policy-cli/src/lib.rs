//! Policy CLI
//!
//! Runs the policy API server and works on the JSON data files directly.
//!
//! # Usage
//!
//! ```text
//! policy [OPTIONS] <COMMAND>
//!
//! Commands:
//!   serve     Start the API server
//!   init      Create the data directory and empty data files
//!   options   Show or rebuild the dropdown options
//!   list      Search the dashboard policies
//!
//! Options:
//!   -d, --data-dir <DIR>   Data directory [env: POLICY_DATA_DIR] [default: data]
//!   -f, --format <FORMAT>  Output format (json, table) [default: table]
//!   -v, --verbose          Enable debug logging
//! ```
//!
//! # Examples
//!
//! ```text
//! policy init
//! policy serve --port 1000
//! policy list --jurisdiction US --sort-by effectiveDate --direction desc
//! policy -f json options rebuild
//! ```

pub mod commands;
pub mod error;
pub mod handler;
pub mod output;

pub use commands::{Cli, Commands, OptionsCommands, OutputFormat};
pub use error::{CliError, CliResult};
