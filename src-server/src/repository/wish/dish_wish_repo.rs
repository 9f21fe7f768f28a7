//! Dish Wishlist Repository
//!
//! Dish wishes: create, list, delete, and resolve into a registered dish.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};

use crate::domain::{Dish, DishWish, DomainError, DomainResult};
use super::super::db::{db_err, not_initialized, now_millis, sql_limit, SharedConnection};
use super::super::dish_repo::insert_dish;
use super::super::traits::{Page, Repository, RoomScopedRepository};

const WISH_COLUMNS: &str = "id, room_id, dish_name, requested_quantity, notes, created_at";

pub struct DishWishRepository {
    conn: SharedConnection,
}

impl DishWishRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Register `dish` and drop the wish it fulfils, atomically.
    ///
    /// Fails with `NotFound` (and stores nothing) when the wish is not in
    /// the dish's room.
    pub async fn resolve(&self, wish_id: u32, dish: &Dish) -> DomainResult<Dish> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let tx = conn.unchecked_transaction().map_err(db_err)?;

        let removed = tx
            .execute(
                "DELETE FROM wishlist_items WHERE id = ? AND room_id = ?",
                params![wish_id, dish.room_id],
            )
            .map_err(db_err)?;
        if removed == 0 {
            return Err(DomainError::NotFound(
                "Wishlist item not found in this room".to_string(),
            ));
        }

        let stored = insert_dish(&tx, dish)?;
        tx.commit().map_err(db_err)?;
        Ok(stored)
    }
}

#[async_trait]
impl Repository<DishWish> for DishWishRepository {
    async fn create(&self, entity: &DishWish) -> DomainResult<DishWish> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let created_at = now_millis();
        conn.execute(
            "INSERT INTO wishlist_items (room_id, dish_name, requested_quantity, notes, created_at)
             VALUES (?, ?, ?, ?, ?)",
            params![
                entity.room_id,
                entity.dish_name,
                entity.requested_quantity,
                entity.notes,
                created_at,
            ],
        )
        .map_err(db_err)?;

        let mut stored = entity.clone();
        stored.id = conn.last_insert_rowid() as u32;
        stored.created_at = Some(created_at);
        Ok(stored)
    }
}

#[async_trait]
impl RoomScopedRepository<DishWish> for DishWishRepository {
    async fn list_by_room(&self, room_id: u32, page: Page) -> DomainResult<Vec<DishWish>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM wishlist_items WHERE room_id = ?
                 ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
                WISH_COLUMNS
            ))
            .map_err(db_err)?;
        let wishes = stmt
            .query_map(params![room_id, sql_limit(page.limit), page.skip], row_to_wish)
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;
        Ok(wishes)
    }

    async fn find_in_room(&self, room_id: u32, id: u32) -> DomainResult<Option<DishWish>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        conn.query_row(
            &format!(
                "SELECT {} FROM wishlist_items WHERE id = ? AND room_id = ?",
                WISH_COLUMNS
            ),
            params![id, room_id],
            row_to_wish,
        )
        .optional()
        .map_err(db_err)
    }

    async fn delete_in_room(&self, room_id: u32, id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let changed = conn
            .execute(
                "DELETE FROM wishlist_items WHERE id = ? AND room_id = ?",
                params![id, room_id],
            )
            .map_err(db_err)?;
        if changed == 0 {
            return Err(DomainError::NotFound(
                "Wishlist item not found in this room".to_string(),
            ));
        }
        Ok(())
    }
}

fn row_to_wish(row: &Row) -> rusqlite::Result<DishWish> {
    Ok(DishWish {
        id: row.get(0)?,
        room_id: row.get(1)?,
        dish_name: row.get(2)?,
        requested_quantity: row.get(3)?,
        notes: row.get(4)?,
        created_at: row.get(5)?,
    })
}
