//! Policy records
//!
//! Field names follow the JSON files and the front end (camelCase).
//! Fields the registry does not know about are kept in `extra` so a
//! load/save cycle never drops data. Known fields are [`Scalar`]s: the
//! files mostly hold text, but a number, boolean or null is loaded and
//! written back unchanged.

use std::borrow::Cow;
use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::query::{FieldValue, Record};

/// Status assigned to every newly created policy
pub const PENDING_STATUS: &str = "Pending";

// ============ Field values ============

/// A known record field, kept as the JSON value found in the file.
///
/// Defaults to empty text when the key is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scalar(Value);

impl Default for Scalar {
    fn default() -> Self {
        Scalar(Value::String(String::new()))
    }
}

impl Scalar {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The string, if the stored value is one
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }

    /// Sortable projection
    pub fn value(&self) -> FieldValue {
        FieldValue::from_json(&self.0)
    }

    /// Display text; null and `false` read as empty.
    pub fn text(&self) -> Cow<'_, str> {
        match &self.0 {
            Value::String(s) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(FieldValue::from_json(other).text().into_owned()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value().is_empty()
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar(Value::String(s))
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar(Value::String(s.to_string()))
    }
}

impl From<Value> for Scalar {
    fn from(value: Value) -> Self {
        Scalar(value)
    }
}

impl PartialEq<str> for Scalar {
    fn eq(&self, other: &str) -> bool {
        self.0.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Scalar {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_str() == Some(*other)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.text())
    }
}

fn field(value: &Scalar) -> Option<FieldValue> {
    Some(value.value())
}

fn extra_field(extra: &Map<String, Value>, name: &str) -> Option<FieldValue> {
    extra.get(name).map(FieldValue::from_json)
}

/// Policy ids: a non-negative integer, a numeric string, or null (0).
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let id = match &value {
        Value::Null => Some(0),
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f < u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    id.ok_or_else(|| de::Error::custom(format!("invalid policy id {}", value)))
}

// ============ Dashboard policies ============

/// A policy as listed on the policy dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: u64,
    #[serde(default)]
    pub jurisdiction: Scalar,
    #[serde(default)]
    pub business_area: Scalar,
    #[serde(default)]
    pub inventory_type: Scalar,
    #[serde(default)]
    pub entity_type: Scalar,
    #[serde(default)]
    pub description: Scalar,
    #[serde(default)]
    pub retention_period: Scalar,
    #[serde(default)]
    pub effective_date: Scalar,
    #[serde(default)]
    pub policy_parameter: Scalar,
    #[serde(default)]
    pub status: Scalar,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for Policy {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Number(self.id as f64)),
            "jurisdiction" => field(&self.jurisdiction),
            "businessArea" => field(&self.business_area),
            "inventoryType" => field(&self.inventory_type),
            "entityType" => field(&self.entity_type),
            "description" => field(&self.description),
            "retentionPeriod" => field(&self.retention_period),
            "effectiveDate" => field(&self.effective_date),
            "policyParameter" => field(&self.policy_parameter),
            "status" => field(&self.status),
            other => extra_field(&self.extra, other),
        }
    }
}

/// Payload accepted when a policy is added from the dashboard.
///
/// Only the searchable/displayable fields are kept; status is not
/// accepted from the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPolicy {
    pub jurisdiction: String,
    pub business_area: String,
    pub inventory_type: String,
    pub entity_type: String,
    pub description: String,
    pub retention_period: String,
    pub effective_date: String,
    pub policy_parameter: String,
}

impl NewPolicy {
    /// Read the payload out of an arbitrary JSON body.
    ///
    /// Returns `None` unless the body is a JSON object. Scalars are
    /// rendered to text; null, arrays and nested objects read as empty.
    pub fn from_json(body: &Value) -> Option<Self> {
        let object = body.as_object()?;
        let get = |key: &str| coerce_text(object.get(key));

        Some(Self {
            jurisdiction: get("jurisdiction"),
            business_area: get("businessArea"),
            inventory_type: get("inventoryType"),
            entity_type: get("entityType"),
            description: get("description"),
            retention_period: get("retentionPeriod"),
            effective_date: get("effectiveDate"),
            policy_parameter: get("policyParameter"),
        })
    }

    /// Materialize the stored record under `id`, always as pending.
    pub fn into_policy(self, id: u64) -> Policy {
        Policy {
            id,
            jurisdiction: self.jurisdiction.into(),
            business_area: self.business_area.into(),
            inventory_type: self.inventory_type.into(),
            entity_type: self.entity_type.into(),
            description: self.description.into(),
            retention_period: self.retention_period.into(),
            effective_date: self.effective_date.into(),
            policy_parameter: self.policy_parameter.into(),
            status: PENDING_STATUS.into(),
            extra: Map::new(),
        }
    }
}

fn coerce_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(v @ (Value::Number(_) | Value::Bool(true))) => {
            FieldValue::from_json(v).text().into_owned()
        }
        _ => String::new(),
    }
}

// ============ My-app policies ============

/// A policy row in the "my application policies" listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppPolicy {
    #[serde(default)]
    pub malcode: Scalar,
    #[serde(default)]
    pub policy_id: Scalar,
    #[serde(default)]
    pub asset_dbor_code: Scalar,
    #[serde(default)]
    pub record_type: Scalar,
    #[serde(default)]
    pub inventory_type: Scalar,
    #[serde(default)]
    pub retention_period: Scalar,
    #[serde(default)]
    pub effective_date: Scalar,
    #[serde(default)]
    pub status: Scalar,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for AppPolicy {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "malcode" => field(&self.malcode),
            "policyId" => field(&self.policy_id),
            "assetDborCode" => field(&self.asset_dbor_code),
            "recordType" => field(&self.record_type),
            "inventoryType" => field(&self.inventory_type),
            "retentionPeriod" => field(&self.retention_period),
            "effectiveDate" => field(&self.effective_date),
            "status" => field(&self.status),
            other => extra_field(&self.extra, other),
        }
    }
}

/// One approval step on a policy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approver {
    #[serde(default)]
    pub approval_group: Scalar,
    #[serde(default)]
    pub status: Scalar,
    #[serde(default)]
    pub approver_id: Scalar,
    #[serde(default)]
    pub created: Scalar,
    #[serde(default)]
    pub decision_date: Scalar,
    #[serde(default)]
    pub comments: Scalar,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full policy record shown on the view-policy page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDetails {
    #[serde(default)]
    pub policy_id: Scalar,
    #[serde(default)]
    pub malcode: Scalar,
    #[serde(default)]
    pub asset_dbor_code: Scalar,
    #[serde(default)]
    pub record_type: Scalar,
    #[serde(default)]
    pub inventory_type: Scalar,
    #[serde(default)]
    pub retention_period: Scalar,
    #[serde(default)]
    pub effective_date: Scalar,
    #[serde(default)]
    pub status: Scalar,
    #[serde(default)]
    pub policy_parameter: Scalar,
    #[serde(default)]
    pub jurisdiction: Scalar,
    #[serde(default)]
    pub business_area: Scalar,
    #[serde(default)]
    pub business_capability: Scalar,
    #[serde(default)]
    pub media_storage_type: Scalar,
    #[serde(default)]
    pub retention_code: Scalar,
    #[serde(default)]
    pub retention_trigger: Scalar,
    #[serde(default)]
    pub expiration_date: Scalar,
    #[serde(default)]
    pub created_by: Scalar,
    #[serde(default)]
    pub updated_by: Scalar,
    #[serde(default)]
    pub created_date: Scalar,
    #[serde(default)]
    pub updated_date: Scalar,
    #[serde(default)]
    pub description: Scalar,
    #[serde(default)]
    pub approvers: Vec<Approver>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PolicyDetails {
    /// Set a new expiration date and stamp `updatedDate` (YYYY-MM-DD).
    pub fn set_expiration(&mut self, expiration_date: impl Into<Scalar>, today: impl Into<Scalar>) {
        self.expiration_date = expiration_date.into();
        self.updated_date = today.into();
    }
}
