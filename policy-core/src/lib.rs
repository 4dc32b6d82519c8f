//! Policy Core
//!
//! Domain records for the records-retention policy registry and the
//! page/filter/sort contract shared by every list endpoint.
//!
//! A list query is always the same three steps over an in-memory
//! collection:
//!
//! 1. keep the records matching every non-empty filter ([`FilterSet`])
//! 2. stable-sort by an arbitrary field ([`sort_records`])
//! 3. slice out one page ([`paginate`])
//!
//! [`query`] runs all three.

pub mod error;
pub mod model;
pub mod options;
pub mod query;

pub use error::{QueryError, QueryResult};
pub use model::{AppPolicy, Approver, NewPolicy, Policy, PolicyDetails, Scalar, PENDING_STATUS};
pub use options::{DropdownOptions, OPTION_FIELDS};
pub use query::{
    compare_fields, paginate, query, sort_records, FieldValue, FilterSet, Page, PageRequest,
    Record, SortDirection, DEFAULT_PAGE_SIZE,
};
