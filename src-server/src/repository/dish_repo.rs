//! Dish Repository
//!
//! SQLite-backed CRUD for dishes, scoped by room.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{DomainError, DomainResult, Dish};
use super::db::{db_err, not_initialized, now_millis, sql_limit, SharedConnection};
use super::traits::{EditableRepository, Page, Repository, RoomScopedRepository};

const DISH_COLUMNS: &str = "id, room_id, name, quantity, full_name, member_id, meal_type, created_at";

pub struct DishRepository {
    conn: SharedConnection,
}

impl DishRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Every dish of a room, oldest first, for totals
    pub async fn all_in_room(&self, room_id: u32) -> DomainResult<Vec<Dish>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM dishes WHERE room_id = ? ORDER BY created_at ASC, id ASC",
                DISH_COLUMNS
            ))
            .map_err(db_err)?;
        let dishes = stmt
            .query_map(params![room_id], row_to_dish)
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;
        Ok(dishes)
    }
}

#[async_trait]
impl Repository<Dish> for DishRepository {
    async fn create(&self, entity: &Dish) -> DomainResult<Dish> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        insert_dish(conn, entity)
    }
}

#[async_trait]
impl RoomScopedRepository<Dish> for DishRepository {
    async fn list_by_room(&self, room_id: u32, page: Page) -> DomainResult<Vec<Dish>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM dishes WHERE room_id = ?
                 ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
                DISH_COLUMNS
            ))
            .map_err(db_err)?;
        let dishes = stmt
            .query_map(params![room_id, sql_limit(page.limit), page.skip], row_to_dish)
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;
        Ok(dishes)
    }

    async fn find_in_room(&self, room_id: u32, id: u32) -> DomainResult<Option<Dish>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        conn.query_row(
            &format!("SELECT {} FROM dishes WHERE id = ? AND room_id = ?", DISH_COLUMNS),
            params![id, room_id],
            row_to_dish,
        )
        .optional()
        .map_err(db_err)
    }

    async fn delete_in_room(&self, room_id: u32, id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let changed = conn
            .execute(
                "DELETE FROM dishes WHERE id = ? AND room_id = ?",
                params![id, room_id],
            )
            .map_err(db_err)?;
        if changed == 0 {
            return Err(DomainError::NotFound("Dish not found in this room".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl EditableRepository<Dish> for DishRepository {
    /// Replace the editable fields; room and creation time stay
    async fn update(&self, entity: &Dish) -> DomainResult<Dish> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let changed = conn
            .execute(
                "UPDATE dishes SET name = ?, quantity = ?, full_name = ?, member_id = ?, meal_type = ?
                 WHERE id = ? AND room_id = ?",
                params![
                    entity.name,
                    entity.quantity,
                    entity.full_name,
                    entity.member_id,
                    entity.meal_type,
                    entity.id,
                    entity.room_id,
                ],
            )
            .map_err(db_err)?;
        if changed == 0 {
            return Err(DomainError::NotFound("Dish not found in this room".to_string()));
        }

        conn.query_row(
            &format!("SELECT {} FROM dishes WHERE id = ?", DISH_COLUMNS),
            params![entity.id],
            row_to_dish,
        )
        .map_err(db_err)
    }
}

/// Insert on an open connection or transaction
pub(super) fn insert_dish(conn: &Connection, dish: &Dish) -> DomainResult<Dish> {
    let created_at = now_millis();
    conn.execute(
        "INSERT INTO dishes (room_id, name, quantity, full_name, member_id, meal_type, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        params![
            dish.room_id,
            dish.name,
            dish.quantity,
            dish.full_name,
            dish.member_id,
            dish.meal_type,
            created_at,
        ],
    )
    .map_err(db_err)?;

    let mut stored = dish.clone();
    stored.id = conn.last_insert_rowid() as u32;
    stored.created_at = Some(created_at);
    Ok(stored)
}

fn row_to_dish(row: &Row) -> rusqlite::Result<Dish> {
    Ok(Dish {
        id: row.get(0)?,
        room_id: row.get(1)?,
        name: row.get(2)?,
        quantity: row.get(3)?,
        full_name: row.get(4)?,
        member_id: row.get(5)?,
        meal_type: row.get(6)?,
        created_at: row.get(7)?,
    })
}
