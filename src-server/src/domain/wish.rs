//! Wishlist Entities
//!
//! Things a room would like somebody to bring. A wish is resolved by a
//! participant registering the actual dish or drink for it.

use serde::{Deserialize, Serialize};

use super::entity::{check_quantity, check_required, DomainResult, Entity, RoomScoped};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishWish {
    pub id: u32,
    pub room_id: u32,
    pub dish_name: String,
    /// Grams
    pub requested_quantity: f64,
    pub notes: Option<String>,
    pub created_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishWishInput {
    pub room_id: u32,
    pub dish_name: String,
    pub requested_quantity: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl DishWishInput {
    pub fn validate(&self) -> DomainResult<()> {
        check_required("dish_name", &self.dish_name)?;
        check_quantity("requested_quantity", self.requested_quantity)
    }

    pub fn into_wish(self, id: u32) -> DishWish {
        DishWish {
            id,
            room_id: self.room_id,
            dish_name: self.dish_name,
            requested_quantity: self.requested_quantity,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
            created_at: None,
        }
    }
}

impl Entity for DishWish {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl RoomScoped for DishWish {
    fn room_id(&self) -> u32 {
        self.room_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkWish {
    pub id: u32,
    pub room_id: u32,
    pub drink_name: String,
    pub brand: Option<String>,
    pub description: Option<String>,
    /// Who the drink is asked from, free text
    pub requested_from: Option<String>,
    /// Liters
    pub requested_quantity: f64,
    pub created_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkWishInput {
    pub room_id: u32,
    pub drink_name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requested_from: Option<String>,
    pub requested_quantity: f64,
}

impl DrinkWishInput {
    pub fn validate(&self) -> DomainResult<()> {
        check_required("drink_name", &self.drink_name)?;
        check_quantity("requested_quantity", self.requested_quantity)
    }

    pub fn into_wish(self, id: u32) -> DrinkWish {
        DrinkWish {
            id,
            room_id: self.room_id,
            drink_name: self.drink_name,
            brand: self.brand,
            description: self.description,
            requested_from: self.requested_from,
            requested_quantity: self.requested_quantity,
            created_at: None,
        }
    }
}

impl Entity for DrinkWish {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl RoomScoped for DrinkWish {
    fn room_id(&self) -> u32 {
        self.room_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dish_wish_validation() {
        let wish = DishWishInput {
            room_id: 1,
            dish_name: "Sarmale".to_string(),
            requested_quantity: 2000.0,
            notes: Some("  ".to_string()),
        };
        assert!(wish.validate().is_ok());
        assert_eq!(wish.clone().into_wish(3).notes, None);

        let unnamed = DishWishInput {
            dish_name: String::new(),
            ..wish
        };
        assert!(unnamed.validate().is_err());
    }

    #[test]
    fn test_drink_wish_optional_fields_default() {
        let parsed: DrinkWishInput = serde_json::from_str(
            r#"{"room_id":2,"drink_name":"Palinca","requested_quantity":0.5}"#,
        )
        .unwrap();
        assert!(parsed.validate().is_ok());
        assert_eq!(parsed.brand, None);
        assert_eq!(parsed.requested_from, None);
    }

    #[test]
    fn test_drink_wish_rejects_bad_quantity() {
        let wish = DrinkWishInput {
            room_id: 1,
            drink_name: "Tuica".to_string(),
            brand: None,
            description: None,
            requested_from: None,
            requested_quantity: f64::NAN,
        };
        assert!(wish.validate().is_err());
    }
}
