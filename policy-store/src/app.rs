//! My-app policy store
//!
//! The application's policy listing is read-only. Policy details are
//! editable one field at a time and rewritten to disk on each change.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use indexmap::IndexMap;
use policy_core::{query, AppPolicy, FilterSet, Page, PageRequest, PolicyDetails};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::{StoreError, StoreResult};
use crate::json_file::JsonFile;
use crate::traits::AppPolicyRepository;

pub const APP_POLICIES_FILE: &str = "my-app-policies.data.json";
pub const POLICY_DETAILS_FILE: &str = "policy-details.data.json";

type DetailsMap = IndexMap<String, PolicyDetails>;

/// File-backed store for the application's policies
pub struct AppPolicyStore {
    data_dir: PathBuf,
    policies: Vec<AppPolicy>,
    details_file: JsonFile,
    details: RwLock<DetailsMap>,
}

impl AppPolicyStore {
    /// Open the store. Both data files must exist and parse.
    pub async fn open(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();

        let policies_file = JsonFile::new(data_dir.join(APP_POLICIES_FILE));
        let policies: Vec<AppPolicy> = policies_file
            .read()
            .await?
            .ok_or_else(|| StoreError::MissingFile(policies_file.path().to_path_buf()))?;

        let details_file = JsonFile::new(data_dir.join(POLICY_DETAILS_FILE));
        let details: DetailsMap = details_file
            .read()
            .await?
            .ok_or_else(|| StoreError::MissingFile(details_file.path().to_path_buf()))?;

        info!(
            policies = policies.len(),
            details = details.len(),
            "App policy store loaded from {}",
            data_dir.display()
        );

        Ok(Self {
            data_dir,
            policies,
            details_file,
            details: RwLock::new(details),
        })
    }

    /// Write an empty listing and details file into `data_dir`, keeping
    /// any that exist. Returns the files that were created.
    pub async fn initialize(data_dir: impl AsRef<Path>) -> StoreResult<Vec<PathBuf>> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)
            .await
            .map_err(|source| StoreError::Write {
                path: data_dir.to_path_buf(),
                source,
            })?;

        let mut created = Vec::new();

        let policies_file = JsonFile::new(data_dir.join(APP_POLICIES_FILE));
        if !policies_file.exists().await {
            policies_file.write::<[AppPolicy]>(&[]).await?;
            created.push(policies_file.path().to_path_buf());
        }

        let details_file = JsonFile::new(data_dir.join(POLICY_DETAILS_FILE));
        if !details_file.exists().await {
            details_file.write(&DetailsMap::new()).await?;
            created.push(details_file.path().to_path_buf());
        }

        Ok(created)
    }

    /// Update the expiration date, stamping `today` as the update date.
    pub async fn update_expiration_on(
        &self,
        policy_id: &str,
        expiration_date: &str,
        today: NaiveDate,
    ) -> StoreResult<PolicyDetails> {
        let mut details = self.details.write().await;

        let entry = details
            .get_mut(policy_id)
            .ok_or_else(|| StoreError::NotFound(policy_id.to_string()))?;
        let previous = (entry.expiration_date.clone(), entry.updated_date.clone());
        entry.set_expiration(expiration_date, today.format("%Y-%m-%d").to_string());
        let updated = entry.clone();

        if let Err(e) = self.details_file.write(&*details).await {
            if let Some(entry) = details.get_mut(policy_id) {
                entry.set_expiration(previous.0, previous.1);
            }
            return Err(e);
        }

        info!(policy_id, expiration_date, "Expiration date updated");
        Ok(updated)
    }
}

#[async_trait]
impl AppPolicyRepository for AppPolicyStore {
    async fn list(&self, request: &PageRequest) -> Page<AppPolicy> {
        query(self.policies.iter(), &FilterSet::new(), request).map(AppPolicy::clone)
    }

    async fn details(&self, policy_id: &str) -> Option<PolicyDetails> {
        self.details.read().await.get(policy_id).cloned()
    }

    async fn update_expiration(
        &self,
        policy_id: &str,
        expiration_date: &str,
    ) -> StoreResult<PolicyDetails> {
        self.update_expiration_on(policy_id, expiration_date, Utc::now().date_naive())
            .await
    }

    async fn is_ready(&self) -> bool {
        let ready = fs::try_exists(&self.data_dir).await.unwrap_or(false);
        if !ready {
            warn!("App policy data directory {} is gone", self.data_dir.display());
        }
        ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use policy_core::SortDirection;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn seed(dir: &Path) {
        let policies = json!([
            {"malcode": "ZED", "policyId": "P-3", "status": "Pending"},
            {"malcode": "ABC", "policyId": "P-1", "status": "Approved"},
            {"malcode": "MID", "policyId": "P-2", "status": "Rejected"}
        ]);
        let details = json!({
            "P-2": {"policyId": "P-2", "malcode": "MID", "expirationDate": "2030-01-01"},
            "P-1": {
                "policyId": "P-1",
                "malcode": "ABC",
                "expirationDate": "2029-12-31",
                "approvers": [{"approvalGroup": "Legal", "status": "Approved"}],
                "customField": "kept"
            }
        });
        std::fs::write(dir.join(APP_POLICIES_FILE), policies.to_string()).unwrap();
        std::fs::write(dir.join(POLICY_DETAILS_FILE), details.to_string()).unwrap();
    }

    async fn open_seeded() -> (AppPolicyStore, TempDir) {
        let dir = TempDir::new().unwrap();
        seed(dir.path());
        let store = AppPolicyStore::open(dir.path()).await.unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn test_open_requires_both_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(APP_POLICIES_FILE), "[]").unwrap();

        let result = AppPolicyStore::open(dir.path()).await;
        assert!(matches!(result, Err(StoreError::MissingFile(_))));
    }

    #[tokio::test]
    async fn test_open_rejects_malformed_listing() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(APP_POLICIES_FILE), "{\"not\": \"a list\"}").unwrap();
        std::fs::write(dir.path().join(POLICY_DETAILS_FILE), "{}").unwrap();

        let result = AppPolicyStore::open(dir.path()).await;
        assert!(matches!(result, Err(StoreError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_initialize_then_open() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("fresh");

        let created = AppPolicyStore::initialize(&data_dir).await.unwrap();
        assert_eq!(created.len(), 2);
        assert!(AppPolicyStore::initialize(&data_dir).await.unwrap().is_empty());

        let store = AppPolicyStore::open(&data_dir).await.unwrap();
        assert_eq!(store.list(&PageRequest::default()).await.total_elements, 0);
        assert!(store.details("P-1").await.is_none());
    }

    #[tokio::test]
    async fn test_list_sorted_and_paged() {
        let (store, _dir) = open_seeded().await;

        let request = PageRequest::new(0, 2).sorted_by("malcode", SortDirection::Asc);
        let page = store.list(&request).await;
        let ids: Vec<_> = page.content.iter().map(|p| p.policy_id.text()).collect();
        assert_eq!(ids, vec!["P-1", "P-2"]);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 2);
        assert!(!page.last);
    }

    #[tokio::test]
    async fn test_list_unsorted_keeps_file_order() {
        let (store, _dir) = open_seeded().await;

        let page = store.list(&PageRequest::default()).await;
        let ids: Vec<_> = page.content.iter().map(|p| p.policy_id.text()).collect();
        assert_eq!(ids, vec!["P-3", "P-1", "P-2"]);
    }

    #[tokio::test]
    async fn test_details_lookup() {
        let (store, _dir) = open_seeded().await;

        let details = store.details("P-1").await.unwrap();
        assert_eq!(details.malcode, "ABC");
        assert_eq!(details.approvers[0].approval_group, "Legal");
        assert!(store.details("P-404").await.is_none());
    }

    #[tokio::test]
    async fn test_update_expiration_persists() {
        let (store, dir) = open_seeded().await;
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        let updated = store
            .update_expiration_on("P-1", "2035-01-01", today)
            .await
            .unwrap();
        assert_eq!(updated.expiration_date, "2035-01-01");
        assert_eq!(updated.updated_date, "2026-10-19");

        let raw: Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join(POLICY_DETAILS_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(raw["P-1"]["expirationDate"], "2035-01-01");
        assert_eq!(raw["P-1"]["updatedDate"], "2026-10-19");
        assert_eq!(raw["P-1"]["customField"], "kept");
        assert_eq!(raw["P-2"]["expirationDate"], "2030-01-01");
        assert_eq!(raw.as_object().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_null_and_numeric_fields_load_and_sort() {
        let dir = TempDir::new().unwrap();
        let policies = json!([
            {"malcode": "ZED", "policyId": "P-3", "retentionPeriod": 10},
            {"malcode": null, "policyId": "P-1", "retentionPeriod": 3},
            {"malcode": "MID", "policyId": "P-2", "retentionPeriod": null}
        ]);
        let details = json!({
            "P-1": {"policyId": "P-1", "expirationDate": null, "retentionCode": 7}
        });
        std::fs::write(dir.path().join(APP_POLICIES_FILE), policies.to_string()).unwrap();
        std::fs::write(dir.path().join(POLICY_DETAILS_FILE), details.to_string()).unwrap();
        let store = AppPolicyStore::open(dir.path()).await.unwrap();

        let request = PageRequest::default().sorted_by("retentionPeriod", SortDirection::Asc);
        let page = store.list(&request).await;
        let ids: Vec<_> = page.content.iter().map(|p| p.policy_id.text()).collect();
        assert_eq!(ids, vec!["P-2", "P-1", "P-3"]);

        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let updated = store
            .update_expiration_on("P-1", "2035-01-01", today)
            .await
            .unwrap();
        assert_eq!(updated.expiration_date, "2035-01-01");

        let raw: Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join(POLICY_DETAILS_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(raw["P-1"]["retentionCode"], 7);
        assert_eq!(raw["P-1"]["expirationDate"], "2035-01-01");
    }

    #[tokio::test]
    async fn test_update_expiration_unknown_policy() {
        let (store, _dir) = open_seeded().await;

        let result = store.update_expiration("P-404", "2035-01-01").await;
        assert!(matches!(result, Err(ref e) if e.is_not_found()));
    }

    #[tokio::test]
    async fn test_update_expiration_rolls_back_on_write_failure() {
        let (store, dir) = open_seeded().await;
        let data_dir = dir.path().to_path_buf();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        std::fs::remove_dir_all(&data_dir).unwrap();

        let result = store.update_expiration_on("P-1", "2035-01-01", today).await;
        assert!(matches!(result, Err(StoreError::Write { .. })));

        let details = store.details("P-1").await.unwrap();
        assert_eq!(details.expiration_date, "2029-12-31");
        assert_eq!(details.updated_date, "");
        assert!(!store.is_ready().await);
    }
}
