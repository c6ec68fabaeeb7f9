use rusqlite::params;
use serde::Deserialize;

use hostel_core::{Announcement, Result};

use crate::store::{today, Store};

#[derive(Debug, Clone, Deserialize)]
pub struct NewAnnouncement {
    pub title: String,
    pub message: String,
    pub category: String,
}

impl Store {
    pub fn list_announcements(&self) -> Result<Vec<Announcement>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, title, message, category, date FROM announcements ORDER BY date DESC",
        )?;
        let announcements = stmt
            .query_map([], |row| {
                Ok(Announcement {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    message: row.get(2)?,
                    category: row.get(3)?,
                    date: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(announcements)
    }

    pub fn create_announcement(&self, new: &NewAnnouncement) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO announcements (title, message, category, date) VALUES (?1, ?2, ?3, ?4)",
            params![new.title, new.message, new.category, today()],
        )?;
        Ok(conn.last_insert_rowid())
    }
}
