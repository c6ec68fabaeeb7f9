use rusqlite::{params, Row};
use serde::Deserialize;

use hostel_core::{MaintenanceRequest, Priority, Result};

use crate::store::{now_timestamp, Store};

#[derive(Debug, Clone, Deserialize)]
pub struct NewMaintenanceRequest {
    pub student_id: Option<i64>,
    pub room_id: Option<i64>,
    pub category: String,
    pub description: String,
    pub priority: Option<Priority>,
}

fn map_request(row: &Row<'_>) -> rusqlite::Result<MaintenanceRequest> {
    Ok(MaintenanceRequest {
        request_id: row.get(0)?,
        student_id: row.get(1)?,
        room_id: row.get(2)?,
        category: row.get(3)?,
        description: row.get(4)?,
        priority: row.get(5)?,
        status: row.get(6)?,
        created_at: row.get(7)?,
        resolved_at: row.get(8)?,
    })
}

const MAINTENANCE_COLUMNS: &str = "request_id, student_id, room_id, category, description, \
     priority, status, created_at, resolved_at";

impl Store {
    pub fn list_maintenance(&self) -> Result<Vec<MaintenanceRequest>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {MAINTENANCE_COLUMNS} FROM maintenance_requests ORDER BY created_at DESC"
        ))?;
        let requests = stmt
            .query_map([], map_request)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(requests)
    }

    pub fn create_maintenance(&self, new: &NewMaintenanceRequest) -> Result<i64> {
        let priority = new.priority.unwrap_or(Priority::Medium);
        let conn = self.conn();
        conn.execute(
            "INSERT INTO maintenance_requests
                 (student_id, room_id, category, description, priority, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, 'Pending', ?6)",
            params![
                new.student_id,
                new.room_id,
                new.category,
                new.description,
                priority,
                now_timestamp()
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn maintenance_for_student(&self, student_id: i64) -> Result<Vec<MaintenanceRequest>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {MAINTENANCE_COLUMNS} FROM maintenance_requests
             WHERE student_id = ?1 ORDER BY created_at DESC"
        ))?;
        let requests = stmt
            .query_map(params![student_id], map_request)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(requests)
    }
}
