//! Dropdown options
//!
//! The set of valid filter values per field, learned from the policies
//! that have been stored. Lists are kept sorted and free of duplicates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::query::{FieldValue, Record};

/// Policy field → option list it feeds
pub const OPTION_FIELDS: &[(&str, &str)] = &[
    ("jurisdiction", "jurisdictions"),
    ("businessArea", "businessAreas"),
    ("inventoryType", "inventoryTypes"),
    ("entityType", "entityTypes"),
    ("status", "approvalStatuses"),
    ("policyParameter", "policyTypes"),
];

/// Option lists keyed by list name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DropdownOptions(BTreeMap<String, Vec<String>>);

impl DropdownOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the option lists from scratch.
    pub fn derive<R: Record>(records: impl IntoIterator<Item = R>) -> Self {
        let mut options = Self::new();
        options.rebuild(records);
        options
    }

    pub fn get(&self, list: &str) -> Option<&[String]> {
        self.0.get(list).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn lists(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Learn any new values carried by `record`.
    ///
    /// Returns true if at least one list changed.
    pub fn absorb<R: Record>(&mut self, record: &R) -> bool {
        let mut changed = false;

        for (field, list) in OPTION_FIELDS {
            let value = match record.field(field) {
                Some(FieldValue::Text(v)) if !v.is_empty() => v,
                _ => continue,
            };

            let values = self.0.entry((*list).to_string()).or_default();
            if !values.contains(&value) {
                values.push(value);
                values.sort();
                changed = true;
            }
        }

        changed
    }

    /// Recompute the field-derived lists from `records`.
    ///
    /// Lists not fed by a policy field are left alone.
    pub fn rebuild<R: Record>(&mut self, records: impl IntoIterator<Item = R>) {
        for (_, list) in OPTION_FIELDS {
            self.0.remove(*list);
        }
        for record in records {
            self.absorb(&record);
        }
    }
}
