//! Ordering Policy
//!
//! Two independent orderings live here:
//! - the category order of aggregated buckets
//! - the user-selected sort of the raw, ungrouped item list

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::category::category_key;
use crate::item::{ContributedItem, ItemKind, RoomContext};
use crate::reducer::Bucket;

/// Rank given to every category missing from the meal-course table
pub const UNRANKED: u32 = 999;

/// Fixed meal-course priority: Entree, Main Course, Desert, then the rest
pub fn meal_course_rank(category_key: &str) -> u32 {
    match category_key {
        "Entree" => 1,
        "Main Course" => 2,
        "Desert" => 3,
        _ => UNRANKED,
    }
}

/// How aggregated buckets are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryOrder {
    /// Meal-course table; unranked keys stay in first-seen order
    MealCourse,
    /// Display key, byte-wise ascending
    Alphabetical,
}

impl CategoryOrder {
    pub fn for_kind(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Dish => CategoryOrder::MealCourse,
            ItemKind::Drink => CategoryOrder::Alphabetical,
        }
    }

    /// Drink-only lists sort alphabetically; anything else uses the table
    pub fn for_items(items: &[ContributedItem]) -> Self {
        if !items.is_empty() && items.iter().all(|i| i.kind == ItemKind::Drink) {
            CategoryOrder::Alphabetical
        } else {
            CategoryOrder::MealCourse
        }
    }

    /// Flatten reduced buckets into display order.
    ///
    /// Both sorts are stable, so ties keep the reducer's first-seen order.
    pub fn order_buckets(self, buckets: IndexMap<String, Bucket>) -> Vec<Bucket> {
        let mut list: Vec<Bucket> = buckets.into_values().collect();
        match self {
            CategoryOrder::MealCourse => {
                list.sort_by_key(|b| meal_course_rank(&b.category_key));
            }
            CategoryOrder::Alphabetical => {
                list.sort_by(|a, b| a.category_key.cmp(&b.category_key));
            }
        }
        list
    }
}

/// Sort modes offered on the editable item list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Fetch order, untouched
    #[default]
    None,
    QuantityDescending,
    QuantityAscending,
    FamilyNameAscending,
    CategoryAscending,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::None => "none",
            SortMode::QuantityDescending => "quantity_descending",
            SortMode::QuantityAscending => "quantity_ascending",
            SortMode::FamilyNameAscending => "family_name_ascending",
            SortMode::CategoryAscending => "category_ascending",
        }
    }
}

impl std::str::FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(SortMode::None),
            "quantity_descending" => Ok(SortMode::QuantityDescending),
            "quantity_ascending" => Ok(SortMode::QuantityAscending),
            "family_name_ascending" => Ok(SortMode::FamilyNameAscending),
            "category_ascending" => Ok(SortMode::CategoryAscending),
            other => Err(format!("unknown sort mode '{}'", other)),
        }
    }
}

fn compare_categories(a: &ContributedItem, b: &ContributedItem) -> Ordering {
    match (a.kind, b.kind) {
        (ItemKind::Drink, ItemKind::Drink) => category_key(a).cmp(category_key(b)),
        _ => category_rank(a).cmp(&category_rank(b)),
    }
}

fn category_rank(item: &ContributedItem) -> u32 {
    match item.kind {
        ItemKind::Dish => meal_course_rank(category_key(item)),
        ItemKind::Drink => UNRANKED,
    }
}

/// Apply a user sort to the raw list.
///
/// `SortMode::None` returns the items in the order given. Every other mode
/// is a stable sort; family names are resolved through `room` first, so
/// unresolvable indices sort as the literal `"Unknown"`.
pub fn sorted_items<'a>(
    items: &'a [ContributedItem],
    mode: SortMode,
    room: &RoomContext,
) -> Vec<&'a ContributedItem> {
    let mut sorted: Vec<&ContributedItem> = items.iter().collect();
    match mode {
        SortMode::None => {}
        SortMode::QuantityDescending => sorted.sort_by(|a, b| b.quantity.total_cmp(&a.quantity)),
        SortMode::QuantityAscending => sorted.sort_by(|a, b| a.quantity.total_cmp(&b.quantity)),
        SortMode::FamilyNameAscending => sorted.sort_by(|a, b| {
            room.family_name(a.contributor_affiliation_index)
                .cmp(room.family_name(b.contributor_affiliation_index))
        }),
        SortMode::CategoryAscending => sorted.sort_by(|a, b| compare_categories(a, b)),
    }
    sorted
}
