//! Room Commands
//!
//! Create rooms, look them up by seed and activate them.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{DomainError, DomainResult, Room, RoomSettings, RoomStatus};
use crate::AppState;

static SEED_PATTERN: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| Regex::new("^[A-Z0-9]{6}$"));

/// Lightweight answer for clients polling a room before it is set up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomStatusView {
    pub id: u32,
    pub seed: String,
    pub status: RoomStatus,
    pub is_active: bool,
}

/// Create a new pending room with a unique seed
pub async fn create_room(state: &AppState) -> DomainResult<Room> {
    let room = state.rooms.create_room().await?;
    info!(room_id = room.id, seed = %room.seed, "room created");
    Ok(room)
}

pub async fn get_room(state: &AppState, seed: &str) -> DomainResult<Room> {
    check_seed(seed)?;
    state
        .rooms
        .find_by_seed(seed)
        .await?
        .ok_or_else(|| DomainError::NotFound("Room not found".to_string()))
}

pub async fn get_room_status(state: &AppState, seed: &str) -> DomainResult<RoomStatusView> {
    let room = get_room(state, seed).await?;
    Ok(RoomStatusView {
        id: room.id,
        is_active: room.is_active(),
        seed: room.seed,
        status: room.status,
    })
}

/// Store settings and mark the room active; activating again replaces them
pub async fn activate_room(
    state: &AppState,
    seed: &str,
    settings: RoomSettings,
) -> DomainResult<Room> {
    check_seed(seed)?;
    settings.validate()?;

    let room = state.rooms.activate(seed, &settings).await?;
    info!(
        room_id = room.id,
        seed = %room.seed,
        families = settings.families.len(),
        "room activated"
    );
    Ok(room)
}

/// Load a room by id or fail with `NotFound`
pub(crate) async fn require_room(state: &AppState, room_id: u32) -> DomainResult<Room> {
    state
        .rooms
        .find_by_id(room_id)
        .await?
        .ok_or_else(|| DomainError::NotFound("Room not found".to_string()))
}

/// Like `require_room`, but the room must also be active
pub(crate) async fn require_active_room(state: &AppState, room_id: u32) -> DomainResult<Room> {
    let room = require_room(state, room_id).await?;
    if !room.is_active() {
        debug!(room_id, "rejected change in pending room");
        return Err(DomainError::InvalidInput("Room is not active".to_string()));
    }
    Ok(room)
}

fn check_seed(seed: &str) -> DomainResult<()> {
    let pattern = SEED_PATTERN
        .as_ref()
        .map_err(|e| DomainError::Internal(e.to_string()))?;
    if !pattern.is_match(seed) {
        return Err(DomainError::InvalidInput(format!("Malformed room seed '{}'", seed)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_seed_shape() {
        for _ in 0..3 {
            assert!(check_seed("AB12CD").is_ok());
            assert!(matches!(check_seed("ab12cd"), Err(DomainError::InvalidInput(_))));
            assert!(matches!(check_seed("AB12C"), Err(DomainError::InvalidInput(_))));
            assert!(matches!(check_seed("AB12CD7"), Err(DomainError::InvalidInput(_))));
        }
    }
}
