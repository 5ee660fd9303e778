//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! Route handlers call store methods; they never execute SQL directly.

use crate::{
    error::{CasaError, CasaResult},
    types::{EntityId, Timestamp},
};
use rusqlite::Connection;

mod campaign;
mod competitor;
mod initiative;
mod segment;

pub struct CasaStore {
    conn: Connection,
}

impl CasaStore {
    pub fn open(path: &str) -> CasaResult<Self> {
        if path == ":memory:" {
            return Self::in_memory();
        }
        let conn = Connection::open(path)?;
        // WAL only matters for real files.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> CasaResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Create any missing tables.
    pub fn migrate(&self) -> CasaResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    /// Drop every table and recreate the empty schema.
    pub fn reset(&self) -> CasaResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/reset.sql"))?;
        self.migrate()
    }

    /// Row count of one of the four entity tables.
    pub fn table_count(&self, table: &str) -> CasaResult<i64> {
        let table = match table {
            "segment" | "competitor" | "initiative" | "campaign" => table,
            other => {
                return Err(CasaError::Validation(format!("unknown table '{other}'")));
            }
        };
        let n: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(n)
    }

    /// Run `f` inside a single transaction; rolls back on error.
    pub fn in_transaction<T, F>(&self, f: F) -> CasaResult<T>
    where
        F: FnOnce(&Self) -> CasaResult<T>,
    {
        self.conn.execute_batch("BEGIN")?;
        match f(self) {
            Ok(v) => {
                self.conn.execute_batch("COMMIT")?;
                Ok(v)
            }
            Err(e) => {
                let _ = self.conn.execute_batch("ROLLBACK");
                Err(e)
            }
        }
    }
}

fn new_id() -> EntityId {
    uuid::Uuid::new_v4().to_string()
}

fn now() -> Timestamp {
    chrono::Utc::now().to_rfc3339()
}

/// Map a zero-row UPDATE/DELETE to NotFound.
fn expect_row(changed: usize, entity: &'static str, id: &str) -> CasaResult<()> {
    if changed == 0 {
        return Err(CasaError::NotFound {
            entity,
            id: id.to_string(),
        });
    }
    Ok(())
}
