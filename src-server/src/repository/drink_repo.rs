//! Drink Repository
//!
//! SQLite-backed CRUD for drinks, scoped by room.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{DomainError, DomainResult, Drink};
use super::db::{db_err, not_initialized, now_millis, sql_limit, SharedConnection};
use super::traits::{EditableRepository, Page, Repository, RoomScopedRepository};

const DRINK_COLUMNS: &str =
    "id, room_id, name, full_name, category, other_category, brand, quantity, member_id, created_at";

pub struct DrinkRepository {
    conn: SharedConnection,
}

impl DrinkRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Every drink of a room, oldest first, for totals
    pub async fn all_in_room(&self, room_id: u32) -> DomainResult<Vec<Drink>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM drinks WHERE room_id = ? ORDER BY created_at ASC, id ASC",
                DRINK_COLUMNS
            ))
            .map_err(db_err)?;
        let drinks = stmt
            .query_map(params![room_id], row_to_drink)
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;
        Ok(drinks)
    }
}

#[async_trait]
impl Repository<Drink> for DrinkRepository {
    async fn create(&self, entity: &Drink) -> DomainResult<Drink> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        insert_drink(conn, entity)
    }
}

#[async_trait]
impl RoomScopedRepository<Drink> for DrinkRepository {
    async fn list_by_room(&self, room_id: u32, page: Page) -> DomainResult<Vec<Drink>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM drinks WHERE room_id = ?
                 ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
                DRINK_COLUMNS
            ))
            .map_err(db_err)?;
        let drinks = stmt
            .query_map(params![room_id, sql_limit(page.limit), page.skip], row_to_drink)
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;
        Ok(drinks)
    }

    async fn find_in_room(&self, room_id: u32, id: u32) -> DomainResult<Option<Drink>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        conn.query_row(
            &format!("SELECT {} FROM drinks WHERE id = ? AND room_id = ?", DRINK_COLUMNS),
            params![id, room_id],
            row_to_drink,
        )
        .optional()
        .map_err(db_err)
    }

    async fn delete_in_room(&self, room_id: u32, id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let changed = conn
            .execute(
                "DELETE FROM drinks WHERE id = ? AND room_id = ?",
                params![id, room_id],
            )
            .map_err(db_err)?;
        if changed == 0 {
            return Err(DomainError::NotFound("Drink not found in this room".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl EditableRepository<Drink> for DrinkRepository {
    async fn update(&self, entity: &Drink) -> DomainResult<Drink> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let changed = conn
            .execute(
                "UPDATE drinks SET name = ?, full_name = ?, category = ?, other_category = ?, brand = ?,
                 quantity = ?, member_id = ?
                 WHERE id = ? AND room_id = ?",
                params![
                    entity.name,
                    entity.full_name,
                    entity.category,
                    entity.other_category,
                    entity.brand,
                    entity.quantity,
                    entity.member_id,
                    entity.id,
                    entity.room_id,
                ],
            )
            .map_err(db_err)?;
        if changed == 0 {
            return Err(DomainError::NotFound("Drink not found in this room".to_string()));
        }

        conn.query_row(
            &format!("SELECT {} FROM drinks WHERE id = ?", DRINK_COLUMNS),
            params![entity.id],
            row_to_drink,
        )
        .map_err(db_err)
    }
}

/// Insert on an open connection or transaction
pub(super) fn insert_drink(conn: &Connection, drink: &Drink) -> DomainResult<Drink> {
    let created_at = now_millis();
    conn.execute(
        "INSERT INTO drinks (room_id, name, full_name, category, other_category, brand, quantity, member_id, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            drink.room_id,
            drink.name,
            drink.full_name,
            drink.category,
            drink.other_category,
            drink.brand,
            drink.quantity,
            drink.member_id,
            created_at,
        ],
    )
    .map_err(db_err)?;

    let mut stored = drink.clone();
    stored.id = conn.last_insert_rowid() as u32;
    stored.created_at = Some(created_at);
    Ok(stored)
}

fn row_to_drink(row: &Row) -> rusqlite::Result<Drink> {
    Ok(Drink {
        id: row.get(0)?,
        room_id: row.get(1)?,
        name: row.get(2)?,
        full_name: row.get(3)?,
        category: row.get(4)?,
        other_category: row.get(5)?,
        brand: row.get(6)?,
        quantity: row.get(7)?,
        member_id: row.get(8)?,
        created_at: row.get(9)?,
    })
}
