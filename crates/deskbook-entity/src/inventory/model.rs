//! Stored inventory rows and the inputs accepted by the inventory store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::validation::non_blank;

/// A stored area row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AreaRecord {
    /// Opaque area identifier, unique across all areas.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional floor-plan reference (path or URL).
    pub floor_plan: Option<String>,
    /// When the area was created.
    pub created_at: DateTime<Utc>,
    /// When the area was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A stored item group row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ItemGroupRecord {
    /// Opaque item group identifier, unique across all item groups.
    pub id: String,
    /// The owning area.
    pub area_id: String,
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional floor-plan reference (path or URL).
    pub floor_plan: Option<String>,
    /// When the item group was created.
    pub created_at: DateTime<Utc>,
    /// When the item group was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A stored item row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ItemRecord {
    /// Opaque item identifier, unique across all items.
    pub id: String,
    /// The owning item group.
    pub item_group_id: String,
    /// Display name.
    pub name: String,
    /// Equipment tags (monitor, dock, ...).
    pub equipment: Vec<String>,
    /// Optional warning shown to bookers.
    pub warning: Option<String>,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create an area.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewArea {
    #[validate(custom(function = "non_blank"))]
    pub id: String,
    #[validate(custom(function = "non_blank"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub floor_plan: Option<String>,
}

/// Replacement attributes for an existing area.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AreaChanges {
    #[validate(custom(function = "non_blank"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub floor_plan: Option<String>,
}

/// Data required to create an item group.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewItemGroup {
    #[validate(custom(function = "non_blank"))]
    pub id: String,
    #[validate(custom(function = "non_blank"))]
    pub area_id: String,
    #[validate(custom(function = "non_blank"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub floor_plan: Option<String>,
}

/// Replacement attributes for an existing item group. The owning area is
/// fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ItemGroupChanges {
    #[validate(custom(function = "non_blank"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub floor_plan: Option<String>,
}

/// Data required to create an item.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewItem {
    #[validate(custom(function = "non_blank"))]
    pub id: String,
    #[validate(custom(function = "non_blank"))]
    pub item_group_id: String,
    #[validate(custom(function = "non_blank"))]
    pub name: String,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub warning: Option<String>,
}

/// Replacement attributes for an existing item.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ItemChanges {
    #[validate(custom(function = "non_blank"))]
    pub name: String,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub warning: Option<String>,
}
