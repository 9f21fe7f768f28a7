//! Dish Entity
//!
//! A dish somebody brings, measured in grams.

use potluck_totals::{ContributedItem, ItemKind};
use serde::{Deserialize, Serialize};

use super::entity::{check_quantity, check_required, DomainResult, Entity, RoomScoped};

/// A meal course offered in the dish form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealType {
    pub id: u32,
    pub name: String,
}

/// Courses offered in the dish form, in serving order
pub const MEAL_TYPES: [&str; 3] = ["Entree", "Main Course", "Desert"];

pub fn meal_types() -> Vec<MealType> {
    MEAL_TYPES
        .iter()
        .zip(1..)
        .map(|(name, id)| MealType {
            id,
            name: name.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: u32,
    pub room_id: u32,
    pub name: String,
    /// Grams
    pub quantity: f64,
    /// Contributor's display name
    #[serde(rename = "fullName")]
    pub full_name: String,
    /// 1-based index into the room's family list
    pub member_id: i64,
    pub meal_type: String,
    pub created_at: Option<i64>,
}

/// Fields a client sends to create or replace a dish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishInput {
    pub room_id: u32,
    pub name: String,
    pub quantity: f64,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub member_id: i64,
    pub meal_type: String,
}

impl DishInput {
    pub fn validate(&self) -> DomainResult<()> {
        check_required("name", &self.name)?;
        check_required("fullName", &self.full_name)?;
        check_required("meal_type", &self.meal_type)?;
        check_quantity("quantity", self.quantity)
    }

    /// Build the entity; `id` 0 means "not stored yet"
    pub fn into_dish(self, id: u32) -> Dish {
        Dish {
            id,
            room_id: self.room_id,
            name: self.name,
            quantity: self.quantity,
            full_name: self.full_name,
            member_id: self.member_id,
            meal_type: self.meal_type,
            created_at: None,
        }
    }
}

impl Entity for Dish {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl RoomScoped for Dish {
    fn room_id(&self) -> u32 {
        self.room_id
    }
}

impl From<&Dish> for ContributedItem {
    fn from(dish: &Dish) -> Self {
        ContributedItem {
            id: dish.id,
            kind: ItemKind::Dish,
            display_name: dish.name.clone(),
            brand: None,
            quantity: dish.quantity,
            category: dish.meal_type.clone(),
            other_category: None,
            contributor_name: dish.full_name.clone(),
            contributor_affiliation_index: dish.member_id,
            room_id: dish.room_id,
        }
    }
}
