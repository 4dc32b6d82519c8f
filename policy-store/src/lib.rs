//! Policy Store
//!
//! Flat JSON files as the registry's datastore. Each store loads its
//! files once at startup, answers reads from memory and rewrites the
//! whole file on every change.
//!
//! ## Files
//!
//! | Store               | File                           | Shape                                  |
//! |---------------------|--------------------------------|----------------------------------------|
//! | [`DashboardStore`]  | `policy-list.json`             | `{message, status, data: {content}}`   |
//! | [`DashboardStore`]  | `policy-dropdown-options.json` | `{listName: [values]}`                 |
//! | [`AppPolicyStore`]  | `my-app-policies.data.json`    | `[policy]`                             |
//! | [`AppPolicyStore`]  | `policy-details.data.json`     | `{policyId: details}`                  |

pub mod app;
pub mod dashboard;
pub mod error;
pub mod json_file;
pub mod traits;

pub use app::{AppPolicyStore, APP_POLICIES_FILE, POLICY_DETAILS_FILE};
pub use dashboard::{DashboardStore, DROPDOWN_OPTIONS_FILE, POLICY_LIST_FILE};
pub use error::{StoreError, StoreResult};
pub use json_file::JsonFile;
pub use traits::{AppPolicyRepository, DashboardRepository};
