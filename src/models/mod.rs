use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Short text fields (names, icon keys, activity types) are capped at 50
/// characters and must be non-empty.
pub const MAX_SHORT_STRING: usize = 50;

pub fn short_string_ok(s: &str) -> bool {
    !s.is_empty() && s.chars().count() <= MAX_SHORT_STRING
}

/// Structured payload stored on an Item as JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    pub fa_icon: String,
    pub count: f64,
}

impl Activity {
    /// Shape validation applied on write. `frequency` is optional; the rest
    /// must be present and well-formed.
    pub fn is_valid(&self) -> bool {
        short_string_ok(&self.label) && short_string_ok(&self.fa_icon) && self.count.is_finite()
    }
}

/// A trackable activity (habit). `title` doubles as the icon key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub title: String,
    /// Tri-state in storage: true, false, or never set.
    pub is_selected: Option<bool>,
    pub category_id: Option<String>,
    pub activity_json: Option<Activity>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCategory {
    pub id: String,
    pub name: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Display-ordering relation for an Item. Not guaranteed unique per item:
/// the create path always inserts index 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOrder {
    pub id: String,
    pub item_id: String,
    pub order_index: f64,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Append-only log of toggle/track actions. `timestamp` is string-encoded
/// epoch milliseconds; rows are never mutated after insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: String,
    pub item_id: String,
    pub activity_type: String,
    pub timestamp: String,
    pub score: f64,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==================== View rows ====================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub id: String,
    pub name: String,
}

/// Raw items-view row as read from the store, before `is_selected`
/// normalization.
#[derive(Debug, Clone)]
pub struct ItemJoinRow {
    pub id: String,
    pub title: String,
    pub is_selected: Option<bool>,
    pub activity_json: Option<Activity>,
    pub category_name: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub order_index: Option<f64>,
}

/// Denormalized item projection consumed by the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: String,
    pub title: String,
    pub is_selected: bool,
    pub activity_json: Option<Activity>,
    pub category_name: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub order_index: Option<f64>,
}

/// Denormalized activity-log projection. Item-side fields are nullable
/// because the join is a left join.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityView {
    pub timestamp: String,
    pub title: Option<String>,
    pub activity_type: String,
    pub score: f64,
    pub category_name: Option<String>,
    pub activity_json: Option<Activity>,
    pub item_id: Option<String>,
}

/// One item's own log rows, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemLogEntry {
    pub timestamp: String,
    pub activity_type: String,
    pub score: f64,
}

// ==================== API types ====================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppName {
    pub name: String,
    pub version: String,
    pub is_beta: bool,
}
