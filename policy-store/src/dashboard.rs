//! Dashboard store
//!
//! Holds the searchable policy list and the dropdown options learned from
//! it. Both files live in the same data directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use policy_core::{query, DropdownOptions, FilterSet, NewPolicy, Page, PageRequest, Policy};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::{StoreError, StoreResult};
use crate::json_file::JsonFile;
use crate::traits::DashboardRepository;

pub const POLICY_LIST_FILE: &str = "policy-list.json";
pub const DROPDOWN_OPTIONS_FILE: &str = "policy-dropdown-options.json";

const SAVED_MESSAGE: &str = "Policy list updated successfully";

/// On-disk shape of the policy list
#[derive(Debug, Default, Deserialize)]
struct PolicyListFile {
    #[serde(default)]
    data: Option<PolicyListData>,
}

#[derive(Debug, Default, Deserialize)]
struct PolicyListData {
    #[serde(default)]
    content: Vec<Policy>,
}

#[derive(Serialize)]
struct PolicyListOut<'a> {
    message: &'a str,
    status: &'a str,
    data: PolicyListDataOut<'a>,
}

#[derive(Serialize)]
struct PolicyListDataOut<'a> {
    content: &'a [Policy],
}

impl<'a> PolicyListOut<'a> {
    fn new(content: &'a [Policy]) -> Self {
        Self {
            message: SAVED_MESSAGE,
            status: "success",
            data: PolicyListDataOut { content },
        }
    }
}

struct DashboardState {
    policies: Vec<Policy>,
    options: DropdownOptions,
}

/// File-backed dashboard store
pub struct DashboardStore {
    data_dir: PathBuf,
    policy_file: JsonFile,
    options_file: JsonFile,
    state: RwLock<DashboardState>,
}

impl DashboardStore {
    /// Open the store, creating the data directory if needed.
    ///
    /// Missing files load as empty; malformed files are an error.
    pub async fn open(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)
            .await
            .map_err(|source| StoreError::Write {
                path: data_dir.clone(),
                source,
            })?;

        let policy_file = JsonFile::new(data_dir.join(POLICY_LIST_FILE));
        let options_file = JsonFile::new(data_dir.join(DROPDOWN_OPTIONS_FILE));

        let policies = match policy_file.read::<PolicyListFile>().await? {
            Some(file) => file.data.unwrap_or_default().content,
            None => {
                info!("{} not found, starting with an empty list", POLICY_LIST_FILE);
                Vec::new()
            }
        };

        let options = match options_file.read::<DropdownOptions>().await? {
            Some(options) => options,
            None => {
                info!("{} not found, starting with empty options", DROPDOWN_OPTIONS_FILE);
                DropdownOptions::new()
            }
        };

        info!(
            policies = policies.len(),
            option_lists = options.lists().count(),
            "Dashboard store loaded from {}",
            data_dir.display()
        );

        Ok(Self {
            data_dir,
            policy_file,
            options_file,
            state: RwLock::new(DashboardState { policies, options }),
        })
    }

    /// Write empty dashboard files into `data_dir`, keeping any that exist.
    ///
    /// Returns the files that were created.
    pub async fn initialize(data_dir: impl AsRef<Path>) -> StoreResult<Vec<PathBuf>> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)
            .await
            .map_err(|source| StoreError::Write {
                path: data_dir.to_path_buf(),
                source,
            })?;

        let mut created = Vec::new();

        let policy_file = JsonFile::new(data_dir.join(POLICY_LIST_FILE));
        if !policy_file.exists().await {
            policy_file.write(&PolicyListOut::new(&[])).await?;
            created.push(policy_file.path().to_path_buf());
        }

        let options_file = JsonFile::new(data_dir.join(DROPDOWN_OPTIONS_FILE));
        if !options_file.exists().await {
            options_file.write(&DropdownOptions::new()).await?;
            created.push(options_file.path().to_path_buf());
        }

        Ok(created)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[async_trait]
impl DashboardRepository for DashboardStore {
    async fn search(&self, filters: &FilterSet, request: &PageRequest) -> Page<Policy> {
        let state = self.state.read().await;
        query(state.policies.iter(), filters, request).map(Policy::clone)
    }

    async fn options(&self) -> DropdownOptions {
        self.state.read().await.options.clone()
    }

    async fn create(&self, new_policy: NewPolicy) -> StoreResult<Policy> {
        let mut state = self.state.write().await;

        let last_id = state.policies.iter().map(|p| p.id).max().unwrap_or(0);
        let next_id = last_id
            .checked_add(1)
            .ok_or(StoreError::IdExhausted(last_id))?;
        let policy = new_policy.into_policy(next_id);

        state.policies.push(policy.clone());
        let saved = self
            .policy_file
            .write(&PolicyListOut::new(&state.policies))
            .await;
        if let Err(e) = saved {
            state.policies.pop();
            return Err(e);
        }

        let mut options = state.options.clone();
        if options.absorb(&policy) {
            self.options_file.write(&options).await?;
            state.options = options;
        }

        info!(policy_id = policy.id, "Policy added");
        Ok(policy)
    }

    async fn rebuild_options(&self) -> StoreResult<DropdownOptions> {
        let mut state = self.state.write().await;

        let mut options = state.options.clone();
        options.rebuild(state.policies.iter());
        self.options_file.write(&options).await?;
        state.options = options.clone();

        info!(option_lists = options.lists().count(), "Dropdown options rebuilt");
        Ok(options)
    }

    async fn count(&self) -> usize {
        self.state.read().await.policies.len()
    }

    async fn is_ready(&self) -> bool {
        let ready = fs::try_exists(&self.data_dir).await.unwrap_or(false);
        if !ready {
            warn!("Dashboard data directory {} is gone", self.data_dir.display());
        }
        ready
    }
}
