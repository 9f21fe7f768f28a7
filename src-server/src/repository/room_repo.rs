//! Room Repository
//!
//! Rooms are looked up by their shareable seed; seeds are generated here so
//! the uniqueness check and the insert happen under one connection lock.

use rand::Rng;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{DomainError, DomainResult, Room, RoomSettings, RoomStatus, SEED_ALPHABET, SEED_LENGTH};
use super::db::{db_err, not_initialized, now_millis, SharedConnection};

/// Give up after this many colliding seeds
const MAX_SEED_ATTEMPTS: usize = 32;

const ROOM_COLUMNS: &str = "id, seed, status, settings, created_at";

pub struct RoomRepository {
    conn: SharedConnection,
}

impl RoomRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Create a pending room under a fresh unique seed
    pub async fn create_room(&self) -> DomainResult<Room> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        for _ in 0..MAX_SEED_ATTEMPTS {
            let seed = generate_seed();
            if seed_taken(conn, &seed)? {
                continue;
            }
            return insert_room(conn, &Room::new(0, seed, now_millis()));
        }
        Err(DomainError::Conflict(
            "Could not allocate a unique room seed".to_string(),
        ))
    }

    pub async fn find_by_id(&self, id: u32) -> DomainResult<Option<Room>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        conn.query_row(
            &format!("SELECT {} FROM rooms WHERE id = ?", ROOM_COLUMNS),
            params![id],
            row_to_room,
        )
        .optional()
        .map_err(db_err)
    }

    pub async fn find_by_seed(&self, seed: &str) -> DomainResult<Option<Room>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        conn.query_row(
            &format!("SELECT {} FROM rooms WHERE seed = ?", ROOM_COLUMNS),
            params![seed],
            row_to_room,
        )
        .optional()
        .map_err(db_err)
    }

    /// Mark the room active and store its settings (overwrites earlier ones)
    pub async fn activate(&self, seed: &str, settings: &RoomSettings) -> DomainResult<Room> {
        let settings_json = serde_json::to_string(settings)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let changed = conn
            .execute(
                "UPDATE rooms SET status = ?, settings = ? WHERE seed = ?",
                params![RoomStatus::Active.as_str(), settings_json, seed],
            )
            .map_err(db_err)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Room {}", seed)));
        }

        conn.query_row(
            &format!("SELECT {} FROM rooms WHERE seed = ?", ROOM_COLUMNS),
            params![seed],
            row_to_room,
        )
        .map_err(db_err)
    }
}

fn generate_seed() -> String {
    let mut rng = rand::rng();
    (0..SEED_LENGTH)
        .map(|_| SEED_ALPHABET[rng.random_range(0..SEED_ALPHABET.len())] as char)
        .collect()
}

fn seed_taken(conn: &Connection, seed: &str) -> DomainResult<bool> {
    conn.query_row("SELECT 1 FROM rooms WHERE seed = ?", params![seed], |_| Ok(()))
        .optional()
        .map(|found| found.is_some())
        .map_err(db_err)
}

fn insert_room(conn: &Connection, room: &Room) -> DomainResult<Room> {
    let settings_json = room
        .settings
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    conn.execute(
        "INSERT INTO rooms (seed, status, settings, created_at) VALUES (?, ?, ?, ?)",
        params![room.seed, room.status.as_str(), settings_json, room.created_at],
    )
    .map_err(db_err)?;

    let mut stored = room.clone();
    stored.id = conn.last_insert_rowid() as u32;
    Ok(stored)
}

fn row_to_room(row: &Row) -> rusqlite::Result<Room> {
    let status: String = row.get(2)?;
    let settings: Option<String> = row.get(3)?;
    Ok(Room {
        id: row.get(0)?,
        seed: row.get(1)?,
        status: RoomStatus::from_str(&status),
        // A settings blob that no longer parses reads as "not configured"
        settings: settings.and_then(|json| serde_json::from_str(&json).ok()),
        created_at: row.get(4)?,
    })
}
