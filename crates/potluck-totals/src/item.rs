//! Contributed Item
//!
//! The flat, room-scoped record the aggregation works on. Dishes and drinks
//! from the store are converted into this shape before grouping.

use serde::{Deserialize, Serialize};

/// Dish quantities are grams, drink quantities are liters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Dish,
    Drink,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Dish => "dish",
            ItemKind::Drink => "drink",
        }
    }

    /// Unit suffix of the stored base quantity
    pub fn base_unit(&self) -> &'static str {
        match self {
            ItemKind::Dish => "g",
            ItemKind::Drink => "L",
        }
    }
}

/// A dish or drink somebody registered to bring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributedItem {
    pub id: u32,
    pub kind: ItemKind,
    pub display_name: String,
    /// Drinks only
    pub brand: Option<String>,
    pub quantity: f64,
    pub category: String,
    /// Label used when `category` is `"Other"`
    pub other_category: Option<String>,
    pub contributor_name: String,
    /// 1-based index into the room's family list
    pub contributor_affiliation_index: i64,
    pub room_id: u32,
}

impl ContributedItem {
    pub fn dish(
        display_name: impl Into<String>,
        quantity: f64,
        category: impl Into<String>,
        contributor_name: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            kind: ItemKind::Dish,
            display_name: display_name.into(),
            brand: None,
            quantity,
            category: category.into(),
            other_category: None,
            contributor_name: contributor_name.into(),
            contributor_affiliation_index: 0,
            room_id: 0,
        }
    }

    pub fn drink(
        display_name: impl Into<String>,
        brand: Option<&str>,
        quantity: f64,
        category: impl Into<String>,
        contributor_name: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            kind: ItemKind::Drink,
            display_name: display_name.into(),
            brand: brand.map(str::to_string),
            quantity,
            category: category.into(),
            other_category: None,
            contributor_name: contributor_name.into(),
            contributor_affiliation_index: 0,
            room_id: 0,
        }
    }

    pub fn with_other_category(mut self, label: impl Into<String>) -> Self {
        self.other_category = Some(label.into());
        self
    }

    pub fn with_affiliation(mut self, index: i64) -> Self {
        self.contributor_affiliation_index = index;
        self
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }
}

/// Room-scoped context threaded into resolution and sorting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomContext {
    /// Ordered family labels; item affiliation indices point into this
    pub families: Vec<String>,
}

impl RoomContext {
    pub fn new(families: Vec<String>) -> Self {
        Self { families }
    }

    /// Family label for a contributor's affiliation index
    pub fn family_name(&self, index: i64) -> &str {
        crate::family::resolve_family_name(index, &self.families)
    }
}
