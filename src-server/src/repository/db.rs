//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::DomainError;

/// Connection handle every repository shares
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    conn: SharedConnection,
}

impl DbState {
    /// State with no connection; every repository call on it fails
    pub fn uninitialized() -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
        }
    }

    pub fn connection(&self) -> SharedConnection {
        self.conn.clone()
    }

    pub async fn is_initialized(&self) -> bool {
        self.conn.lock().await.is_some()
    }

    /// Drop the connection; pending writes are already committed
    pub async fn close(&self) {
        self.conn.lock().await.take();
    }
}

/// Initialize database with path (`:memory:` for a throwaway store)
pub async fn init_db(db_path: &Path) -> Result<DbState, String> {
    let conn = Connection::open(db_path)
        .map_err(|e| format!("Failed to open db {}: {}", db_path.display(), e))?;

    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|e| format!("Failed to enable foreign keys: {}", e))?;

    run_migrations(&conn)?;

    let state = DbState::uninitialized();
    *state.conn.lock().await = Some(conn);

    Ok(state)
}

/// Storage failures surface as internal errors
pub(super) fn db_err(e: rusqlite::Error) -> DomainError {
    DomainError::Internal(e.to_string())
}

pub(super) fn not_initialized() -> DomainError {
    DomainError::Internal("Database not initialized".to_string())
}

pub(super) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// SQLite reads a negative LIMIT as "no limit"
pub(super) fn sql_limit(limit: Option<u32>) -> i64 {
    limit.map(i64::from).unwrap_or(-1)
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({})", table);
    let Ok(mut stmt) = conn.prepare(&query) else {
        return false;
    };
    let Ok(names) = stmt.query_map([], |row| row.get::<_, String>(1)) else {
        return false;
    };
    let found = names.flatten().any(|name| name == column);
    found
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS rooms (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            seed TEXT NOT NULL UNIQUE,
            status TEXT NOT NULL DEFAULT 'pending',
            settings TEXT,
            created_at INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| e.to_string())?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS dishes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            room_id INTEGER NOT NULL REFERENCES rooms(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            quantity REAL NOT NULL,
            full_name TEXT NOT NULL,
            member_id INTEGER NOT NULL DEFAULT 0,
            meal_type TEXT NOT NULL,
            created_at INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| e.to_string())?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS drinks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            room_id INTEGER NOT NULL REFERENCES rooms(id) ON DELETE CASCADE,
            full_name TEXT NOT NULL,
            category TEXT NOT NULL,
            brand TEXT,
            quantity REAL NOT NULL,
            member_id INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| e.to_string())?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS wishlist_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            room_id INTEGER NOT NULL REFERENCES rooms(id) ON DELETE CASCADE,
            dish_name TEXT NOT NULL,
            requested_quantity REAL NOT NULL,
            notes TEXT,
            created_at INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| e.to_string())?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS drink_wishlist_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            room_id INTEGER NOT NULL REFERENCES rooms(id) ON DELETE CASCADE,
            drink_name TEXT NOT NULL,
            brand TEXT,
            description TEXT,
            requested_from TEXT,
            requested_quantity REAL NOT NULL,
            created_at INTEGER NOT NULL
        )",
        [],
    )
    .map_err(|e| e.to_string())?;

    // Drinks gained a free name and the "Other" label after the first release
    if !column_exists(conn, "drinks", "name") {
        conn.execute("ALTER TABLE drinks ADD COLUMN name TEXT", [])
            .map_err(|e| format!("Failed to add drinks.name: {}", e))?;
    }

    if !column_exists(conn, "drinks", "other_category") {
        conn.execute("ALTER TABLE drinks ADD COLUMN other_category TEXT", [])
            .map_err(|e| format!("Failed to add drinks.other_category: {}", e))?;
    }

    for table in ["dishes", "drinks", "wishlist_items", "drink_wishlist_items"] {
        conn.execute(
            &format!("CREATE INDEX IF NOT EXISTS idx_{0}_room ON {0}(room_id)", table),
            [],
        )
        .map_err(|e| e.to_string())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_init_in_memory() {
        let state = init_db(&PathBuf::from(":memory:")).await.unwrap();
        assert!(state.is_initialized().await);

        let conn = state.connection();
        let guard = conn.lock().await;
        let conn = guard.as_ref().unwrap();
        assert!(column_exists(conn, "drinks", "other_category"));
        assert!(column_exists(conn, "drinks", "name"));
        assert!(!column_exists(conn, "dishes", "brand"));
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("potluck.db");

        let first = init_db(&path).await.unwrap();
        first.close().await;
        assert!(!first.is_initialized().await);

        let second = init_db(&path).await.unwrap();
        assert!(second.is_initialized().await);
    }

    #[tokio::test]
    async fn test_migrations_upgrade_old_drinks_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(
                "CREATE TABLE drinks (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    room_id INTEGER NOT NULL,
                    full_name TEXT NOT NULL,
                    category TEXT NOT NULL,
                    brand TEXT,
                    quantity REAL NOT NULL,
                    member_id INTEGER NOT NULL DEFAULT 0,
                    created_at INTEGER NOT NULL
                );
                INSERT INTO drinks (room_id, full_name, category, brand, quantity, created_at)
                VALUES (1, 'Ann', 'Beer', 'Ursus', 2.0, 0);",
            )
            .unwrap();
            assert!(!column_exists(&conn, "drinks", "name"));
        }

        let state = init_db(&path).await.unwrap();
        let conn = state.connection();
        let guard = conn.lock().await;
        let conn = guard.as_ref().unwrap();
        assert!(column_exists(conn, "drinks", "name"));
        assert!(column_exists(conn, "drinks", "other_category"));

        let brand: String = conn
            .query_row("SELECT brand FROM drinks WHERE id = 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(brand, "Ursus");
    }

    #[test]
    fn test_column_exists_on_missing_table() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(!column_exists(&conn, "nowhere", "id"));
    }

    #[test]
    fn test_sql_limit() {
        assert_eq!(sql_limit(None), -1);
        assert_eq!(sql_limit(Some(25)), 25);
    }
}
