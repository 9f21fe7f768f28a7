//! Room Entity
//!
//! A room scopes every dish, drink and wish. It is created `pending` with
//! no settings and becomes `active` once somebody fills in its settings.

use potluck_totals::RoomContext;
use serde::{Deserialize, Serialize};

use super::entity::{check_required, DomainError, DomainResult, Entity};

/// Length of a room seed
pub const SEED_LENGTH: usize = 6;
/// Characters a room seed is drawn from
pub const SEED_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Pending,
    Active,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Pending => "pending",
            RoomStatus::Active => "active",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "active" => RoomStatus::Active,
            _ => RoomStatus::Pending,
        }
    }
}

/// What kind of event the room plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MealPlan {
    #[default]
    Default,
    Large,
    Drinks,
}

/// Settings chosen when a room is activated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSettings {
    pub participant_count: u32,
    pub meal_count: u32,
    pub language: String,
    /// Ordered family labels; contributors pick one by 1-based index
    pub families: Vec<String>,
    #[serde(default)]
    pub meal_type: MealPlan,
}

impl RoomSettings {
    pub fn validate(&self) -> DomainResult<()> {
        check_required("language", &self.language)?;
        if let Some(pos) = self.families.iter().position(|f| f.trim().is_empty()) {
            return Err(DomainError::InvalidInput(format!(
                "family #{} has an empty name",
                pos + 1
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: u32,
    /// Short shareable code participants join with
    pub seed: String,
    pub status: RoomStatus,
    pub settings: Option<RoomSettings>,
    /// Unix milliseconds
    pub created_at: i64,
}

impl Room {
    pub fn new(id: u32, seed: String, created_at: i64) -> Self {
        Self {
            id,
            seed,
            status: RoomStatus::Pending,
            settings: None,
            created_at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == RoomStatus::Active
    }

    /// Context the aggregation core resolves families against.
    ///
    /// A room without settings has no families, so every contributor
    /// resolves to "Unknown".
    pub fn context(&self) -> RoomContext {
        RoomContext::new(
            self.settings
                .as_ref()
                .map(|s| s.families.clone())
                .unwrap_or_default(),
        )
    }
}

impl Entity for Room {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(families: &[&str]) -> RoomSettings {
        RoomSettings {
            participant_count: 8,
            meal_count: 2,
            language: "UK".to_string(),
            families: families.iter().map(|f| f.to_string()).collect(),
            meal_type: MealPlan::Default,
        }
    }

    #[test]
    fn test_new_room_is_pending() {
        let room = Room::new(1, "ABC123".to_string(), 0);
        assert_eq!(room.status, RoomStatus::Pending);
        assert!(!room.is_active());
        assert!(room.context().families.is_empty());
    }

    #[test]
    fn test_context_uses_families() {
        let mut room = Room::new(1, "ABC123".to_string(), 0);
        room.settings = Some(settings(&["Razvan", "Andrei"]));
        let ctx = room.context();
        assert_eq!(ctx.family_name(2), "Andrei");
        assert_eq!(ctx.family_name(3), "Unknown");
    }

    #[test]
    fn test_settings_json_is_camel_case() {
        let json = serde_json::to_value(settings(&["A"])).unwrap();
        assert_eq!(json["participantCount"], 8);
        assert_eq!(json["mealType"], "default");

        let parsed: RoomSettings = serde_json::from_str(
            r#"{"participantCount":4,"mealCount":1,"language":"RO","families":["X"]}"#,
        )
        .unwrap();
        assert_eq!(parsed.meal_type, MealPlan::Default);
    }

    #[test]
    fn test_settings_validation() {
        assert!(settings(&["A", "B"]).validate().is_ok());
        assert!(settings(&[]).validate().is_ok());
        assert!(settings(&["A", " "]).validate().is_err());

        let mut no_language = settings(&["A"]);
        no_language.language = String::new();
        assert!(no_language.validate().is_err());
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(RoomStatus::from_str(RoomStatus::Active.as_str()), RoomStatus::Active);
        assert_eq!(RoomStatus::from_str("garbage"), RoomStatus::Pending);
    }
}
