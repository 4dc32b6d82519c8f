//! Command Handlers

use std::path::{Path, PathBuf};

use policy_api::{
    metrics::{init_metrics, MetricsConfig},
    run_server, ApiEnvelope, DashboardQuery, ServerConfig,
};
use policy_core::{DropdownOptions, Page, Policy};
use policy_store::{AppPolicyStore, DashboardRepository, DashboardStore};

use crate::commands::{Cli, Commands, OptionsCommands};
use crate::error::{CliError, CliResult};
use crate::output;

/// Run the CLI with parsed arguments
pub async fn run(cli: Cli) -> CliResult<()> {
    let format = cli.format;
    let data_dir = cli.data_dir;

    match cli.command {
        Commands::Serve {
            host,
            port,
            no_cors,
        } => handle_serve(data_dir, host, port, no_cors).await,
        Commands::Init => {
            let created = init_data_dir(&data_dir).await?;
            output::print_init(&data_dir, &created);
            Ok(())
        }
        Commands::Options(OptionsCommands::Show) => {
            let options = show_options(&data_dir).await?;
            output::print_options(&options, format)
        }
        Commands::Options(OptionsCommands::Rebuild) => {
            let options = rebuild_options(&data_dir).await?;
            output::print_options(&options, format)
        }
        Commands::List(args) => {
            let max_page_size = ServerConfig::from_env().max_page_size;
            let envelope = search(&data_dir, args.into(), max_page_size).await?;
            output::print_page(&envelope, format)
        }
    }
}

/// Start the API server; flags override the environment
async fn handle_serve(
    data_dir: PathBuf,
    host: String,
    port: u16,
    no_cors: bool,
) -> CliResult<()> {
    let mut config = ServerConfig::from_env();
    config.data_dir = data_dir;
    config.bind_addr = host;
    config.port = port;
    if no_cors {
        config.enable_cors = false;
    }

    init_metrics(&MetricsConfig::from_env())
        .map_err(|e| CliError::config(format!("Metrics exporter failed: {}", e)))?;

    tracing::info!(
        data_dir = %config.data_dir.display(),
        cors = config.enable_cors,
        "Starting policy API server"
    );

    run_server(config)
        .await
        .map_err(|e| CliError::server(e.to_string()))
}

/// Create any missing data files
pub async fn init_data_dir(data_dir: &Path) -> CliResult<Vec<PathBuf>> {
    let mut created = DashboardStore::initialize(data_dir).await?;
    created.extend(AppPolicyStore::initialize(data_dir).await?);
    Ok(created)
}

pub async fn show_options(data_dir: &Path) -> CliResult<DropdownOptions> {
    let store = DashboardStore::open(data_dir).await?;
    Ok(store.options().await)
}

pub async fn rebuild_options(data_dir: &Path) -> CliResult<DropdownOptions> {
    let store = DashboardStore::open(data_dir).await?;
    Ok(store.rebuild_options().await?)
}

/// Run a dashboard search against the local data files
pub async fn search(
    data_dir: &Path,
    query: DashboardQuery,
    max_page_size: usize,
) -> CliResult<ApiEnvelope<Page<Policy>>> {
    let request = query.page_request(max_page_size)?;
    let store = DashboardStore::open(data_dir).await?;
    let page = store.search(&query.filters(), &request).await;
    Ok(ApiEnvelope::success("Policy search successful", page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use policy_store::{DROPDOWN_OPTIONS_FILE, POLICY_LIST_FILE};
    use serde_json::json;
    use tempfile::TempDir;

    fn seed(dir: &Path) {
        let list = json!({
            "data": {
                "content": [
                    {"id": 1, "jurisdiction": "US", "businessArea": "Retail", "status": "Approved"},
                    {"id": 2, "jurisdiction": "CA", "businessArea": "Wealth", "status": "Pending"},
                    {"id": 3, "jurisdiction": "US", "businessArea": "Corporate", "status": "Pending"}
                ]
            }
        });
        std::fs::write(dir.join(POLICY_LIST_FILE), list.to_string()).unwrap();
        std::fs::write(
            dir.join(DROPDOWN_OPTIONS_FILE),
            json!({"jurisdictions": ["MX"], "regions": ["NA"]}).to_string(),
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_init_creates_all_files_once() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("data");

        let created = init_data_dir(&data_dir).await.unwrap();
        assert_eq!(created.len(), 4);
        assert!(init_data_dir(&data_dir).await.unwrap().is_empty());

        let options = show_options(&data_dir).await.unwrap();
        assert!(options.is_empty());
    }

    #[tokio::test]
    async fn test_rebuild_options() {
        let dir = TempDir::new().unwrap();
        seed(dir.path());

        let before = show_options(dir.path()).await.unwrap();
        assert_eq!(before.get("jurisdictions").unwrap(), ["MX"]);

        let after = rebuild_options(dir.path()).await.unwrap();
        assert_eq!(after.get("jurisdictions").unwrap(), ["CA", "US"]);
        assert_eq!(after.get("regions").unwrap(), ["NA"]);

        let reloaded = show_options(dir.path()).await.unwrap();
        assert_eq!(reloaded, after);
    }

    #[tokio::test]
    async fn test_search_local() {
        let dir = TempDir::new().unwrap();
        seed(dir.path());

        let query = DashboardQuery {
            jurisdiction: Some("US".to_string()),
            sort_by: Some("businessArea".to_string()),
            ..Default::default()
        };
        let envelope = search(dir.path(), query, 100).await.unwrap();
        let page = envelope.data.unwrap();
        assert_eq!(page.total_elements, 2);
        assert_eq!(page.content[0].id, 3);
        assert_eq!(page.content[1].id, 1);
    }

    #[tokio::test]
    async fn test_search_rejects_bad_page() {
        let dir = TempDir::new().unwrap();
        seed(dir.path());

        let query = DashboardQuery {
            page: Some("-1".to_string()),
            ..Default::default()
        };
        let result = search(dir.path(), query, 100).await;
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }
}
