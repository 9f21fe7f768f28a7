//! Drink Entity
//!
//! A drink somebody brings, measured in liters. Drinks use a fixed category
//! list with an "Other" escape hatch that carries its own label.

use potluck_totals::{ContributedItem, ItemKind, OTHER_CATEGORY};
use serde::{Deserialize, Serialize};

use super::entity::{check_quantity, check_required, DomainError, DomainResult, Entity, RoomScoped};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrinkCategory {
    Spirits,
    Wine,
    Beer,
    #[serde(rename = "Soft Drinks")]
    SoftDrinks,
    Mixers,
    Other,
}

impl DrinkCategory {
    pub const ALL: [DrinkCategory; 6] = [
        DrinkCategory::Spirits,
        DrinkCategory::Wine,
        DrinkCategory::Beer,
        DrinkCategory::SoftDrinks,
        DrinkCategory::Mixers,
        DrinkCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DrinkCategory::Spirits => "Spirits",
            DrinkCategory::Wine => "Wine",
            DrinkCategory::Beer => "Beer",
            DrinkCategory::SoftDrinks => "Soft Drinks",
            DrinkCategory::Mixers => "Mixers",
            DrinkCategory::Other => OTHER_CATEGORY,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// Category option as listed to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkCategoryOption {
    pub id: u32,
    pub name: String,
}

pub fn drink_categories() -> Vec<DrinkCategoryOption> {
    DrinkCategory::ALL
        .iter()
        .zip(1..)
        .map(|(c, id)| DrinkCategoryOption {
            id,
            name: c.as_str().to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drink {
    pub id: u32,
    pub room_id: u32,
    /// What the drink is; optional, brand or category stand in when absent
    pub name: Option<String>,
    /// Contributor's display name
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub category: String,
    pub other_category: Option<String>,
    pub brand: Option<String>,
    /// Liters
    pub quantity: f64,
    /// 1-based index into the room's family list
    pub member_id: i64,
    pub created_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkInput {
    pub room_id: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub category: String,
    #[serde(default)]
    pub other_category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    pub quantity: f64,
    pub member_id: i64,
}

impl DrinkInput {
    pub fn validate(&self) -> DomainResult<()> {
        check_required("fullName", &self.full_name)?;
        check_quantity("quantity", self.quantity)?;

        let category = DrinkCategory::parse(&self.category)
            .ok_or_else(|| DomainError::InvalidInput("Invalid drink category".to_string()))?;

        let has_label = self
            .other_category
            .as_deref()
            .is_some_and(|label| !label.trim().is_empty());
        if category == DrinkCategory::Other && !has_label {
            return Err(DomainError::InvalidInput(
                "Other category description is required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn into_drink(self, id: u32) -> Drink {
        // The label only means something under "Other"
        let other_category = if self.category == OTHER_CATEGORY {
            self.other_category
        } else {
            None
        };
        Drink {
            id,
            room_id: self.room_id,
            name: self.name.filter(|n| !n.trim().is_empty()),
            full_name: self.full_name,
            category: self.category,
            other_category,
            brand: self.brand.filter(|b| !b.trim().is_empty()),
            quantity: self.quantity,
            member_id: self.member_id,
            created_at: None,
        }
    }
}

impl Drink {
    /// Name shown for the drink: its own name, else brand, else category
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.brand.as_deref())
            .or(self.other_category.as_deref())
            .unwrap_or(&self.category)
    }
}

impl Entity for Drink {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl RoomScoped for Drink {
    fn room_id(&self) -> u32 {
        self.room_id
    }
}

impl From<&Drink> for ContributedItem {
    fn from(drink: &Drink) -> Self {
        ContributedItem {
            id: drink.id,
            kind: ItemKind::Drink,
            display_name: drink.display_name().to_string(),
            brand: drink.brand.clone(),
            quantity: drink.quantity,
            category: drink.category.clone(),
            other_category: drink.other_category.clone(),
            contributor_name: drink.full_name.clone(),
            contributor_affiliation_index: drink.member_id,
            room_id: drink.room_id,
        }
    }
}
