use std::path::Path;

use chrono::Local;
use parking_lot::{Mutex, MutexGuard};
use rusqlite::Connection;
use tracing::info;

use hostel_core::Result;

use crate::{schema, seed};

/// Handle over the SQLite database. One connection, serialized behind a
/// mutex; handlers borrow it for the duration of a single request.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Opens (creating if necessary) the database at `path` and brings the
    /// schema up to date.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        let store = Self::from_connection(conn)?;
        info!(path = %path.display(), "opened hostel database");
        Ok(store)
    }

    /// Throwaway database for tests and `:memory:` configurations.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        schema::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Inserts the sample fixture data into an empty database. A database
    /// that already has an admin account is left alone.
    pub fn seed(&self) -> Result<()> {
        let mut conn = self.conn.lock();
        seed::seed_if_empty(&mut conn)
    }

    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }
}

/// Calendar date in the `%Y-%m-%d` form every date column uses.
pub(crate) fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Timestamp for `created_at`-style columns.
pub(crate) fn now_timestamp() -> String {
    Local::now().to_rfc3339()
}

/// Weekday name used as the `menu.day` key.
pub(crate) fn today_weekday() -> String {
    Local::now().format("%A").to_string()
}
