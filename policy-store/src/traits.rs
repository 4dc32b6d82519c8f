//! Repository traits
//!
//! The API layer talks to these traits; the file-backed stores in this
//! crate are the production implementations.

use async_trait::async_trait;
use policy_core::{AppPolicy, DropdownOptions, FilterSet, NewPolicy, Page, PageRequest, Policy, PolicyDetails};

use crate::error::StoreResult;

/// Policies and dropdown options behind the policy dashboard
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Filter, sort and page the stored policies
    async fn search(&self, filters: &FilterSet, request: &PageRequest) -> Page<Policy>;

    /// Current dropdown options
    async fn options(&self) -> DropdownOptions;

    /// Store a new pending policy and learn its dropdown values
    async fn create(&self, new_policy: NewPolicy) -> StoreResult<Policy>;

    /// Recompute dropdown options from the stored policies
    async fn rebuild_options(&self) -> StoreResult<DropdownOptions>;

    /// Number of stored policies
    async fn count(&self) -> usize;

    /// Whether the backing storage is reachable
    async fn is_ready(&self) -> bool;
}

/// Policies owned by the current application and their details
#[async_trait]
pub trait AppPolicyRepository: Send + Sync {
    /// Sort and page the application's policies
    async fn list(&self, request: &PageRequest) -> Page<AppPolicy>;

    /// Full details for one policy
    async fn details(&self, policy_id: &str) -> Option<PolicyDetails>;

    /// Set the expiration date and stamp today's date as updated
    async fn update_expiration(
        &self,
        policy_id: &str,
        expiration_date: &str,
    ) -> StoreResult<PolicyDetails>;

    /// Whether the backing storage is reachable
    async fn is_ready(&self) -> bool;
}
