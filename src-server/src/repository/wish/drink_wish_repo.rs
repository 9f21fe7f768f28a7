//! Drink Wishlist Repository

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};

use crate::domain::{DomainError, DomainResult, Drink, DrinkWish};
use super::super::db::{db_err, not_initialized, now_millis, sql_limit, SharedConnection};
use super::super::drink_repo::insert_drink;
use super::super::traits::{Page, Repository, RoomScopedRepository};

const WISH_COLUMNS: &str =
    "id, room_id, drink_name, brand, description, requested_from, requested_quantity, created_at";

pub struct DrinkWishRepository {
    conn: SharedConnection,
}

impl DrinkWishRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Register `drink` and drop the wish it fulfils, atomically
    pub async fn resolve(&self, wish_id: u32, drink: &Drink) -> DomainResult<Drink> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let tx = conn.unchecked_transaction().map_err(db_err)?;

        let removed = tx
            .execute(
                "DELETE FROM drink_wishlist_items WHERE id = ? AND room_id = ?",
                params![wish_id, drink.room_id],
            )
            .map_err(db_err)?;
        if removed == 0 {
            return Err(DomainError::NotFound("Drink wish not found".to_string()));
        }

        let stored = insert_drink(&tx, drink)?;
        tx.commit().map_err(db_err)?;
        Ok(stored)
    }
}

#[async_trait]
impl Repository<DrinkWish> for DrinkWishRepository {
    async fn create(&self, entity: &DrinkWish) -> DomainResult<DrinkWish> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let created_at = now_millis();
        conn.execute(
            "INSERT INTO drink_wishlist_items
             (room_id, drink_name, brand, description, requested_from, requested_quantity, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                entity.room_id,
                entity.drink_name,
                entity.brand,
                entity.description,
                entity.requested_from,
                entity.requested_quantity,
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
impl RoomScopedRepository<DrinkWish> for DrinkWishRepository {
    async fn list_by_room(&self, room_id: u32, page: Page) -> DomainResult<Vec<DrinkWish>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM drink_wishlist_items WHERE room_id = ?
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

    async fn find_in_room(&self, room_id: u32, id: u32) -> DomainResult<Option<DrinkWish>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        conn.query_row(
            &format!(
                "SELECT {} FROM drink_wishlist_items WHERE id = ? AND room_id = ?",
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
                "DELETE FROM drink_wishlist_items WHERE id = ? AND room_id = ?",
                params![id, room_id],
            )
            .map_err(db_err)?;
        if changed == 0 {
            return Err(DomainError::NotFound("Drink wish not found".to_string()));
        }
        Ok(())
    }
}

fn row_to_wish(row: &Row) -> rusqlite::Result<DrinkWish> {
    Ok(DrinkWish {
        id: row.get(0)?,
        room_id: row.get(1)?,
        drink_name: row.get(2)?,
        brand: row.get(3)?,
        description: row.get(4)?,
        requested_from: row.get(5)?,
        requested_quantity: row.get(6)?,
        created_at: row.get(7)?,
    })
}
