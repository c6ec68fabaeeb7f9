use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

use hostel_core::{Complaint, ComplaintStatus, HostelError, Result};

use crate::store::{today, Store};

#[derive(Debug, Clone, Serialize)]
pub struct ComplaintView {
    #[serde(flatten)]
    pub complaint: Complaint,
    pub name: String,
    pub room_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewComplaint {
    pub student_id: i64,
    pub room_id: Option<i64>,
    pub complaint_type: String,
    pub description: String,
}

pub(crate) fn map_complaint(row: &Row<'_>) -> rusqlite::Result<Complaint> {
    Ok(Complaint {
        complaint_id: row.get(0)?,
        student_id: row.get(1)?,
        room_id: row.get(2)?,
        complaint_type: row.get(3)?,
        description: row.get(4)?,
        status: row.get(5)?,
        raised_date: row.get(6)?,
        resolved_date: row.get(7)?,
    })
}

pub(crate) const COMPLAINT_COLUMNS: &str = "c.complaint_id, c.student_id, c.room_id, \
     c.complaint_type, c.description, c.status, c.raised_date, c.resolved_date";

impl Store {
    /// All complaints, or just one student's when a filter is given, newest
    /// first.
    pub fn list_complaints(&self, student_id: Option<i64>) -> Result<Vec<ComplaintView>> {
        let conn = self.conn();
        let base = format!(
            "SELECT {COMPLAINT_COLUMNS}, s.name, r.room_number
             FROM complaints c
             JOIN students s ON c.student_id = s.student_id
             LEFT JOIN rooms r ON c.room_id = r.room_id"
        );
        let map = |row: &Row<'_>| {
            Ok(ComplaintView {
                complaint: map_complaint(row)?,
                name: row.get(8)?,
                room_number: row.get(9)?,
            })
        };
        let complaints = match student_id {
            Some(id) => {
                let mut stmt = conn.prepare(&format!(
                    "{base} WHERE c.student_id = ?1 ORDER BY c.raised_date DESC"
                ))?;
                let rows = stmt.query_map(params![id], map)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            None => {
                let mut stmt = conn.prepare(&format!("{base} ORDER BY c.raised_date DESC"))?;
                let rows = stmt.query_map([], map)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };
        Ok(complaints)
    }

    pub fn create_complaint(&self, new: &NewComplaint) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO complaints (student_id, room_id, complaint_type, description, raised_date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new.student_id,
                new.room_id,
                new.complaint_type,
                new.description,
                today()
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Status transition; Resolved stamps `resolved_date`, anything else
    /// clears it again.
    pub fn update_complaint_status(&self, complaint_id: i64, status: ComplaintStatus) -> Result<()> {
        let resolved_date = match status {
            ComplaintStatus::Resolved => Some(today()),
            _ => None,
        };
        let conn = self.conn();
        let changed = conn.execute(
            "UPDATE complaints SET status = ?1, resolved_date = ?2 WHERE complaint_id = ?3",
            params![status, resolved_date, complaint_id],
        )?;
        if changed == 0 {
            return Err(HostelError::NotFound(format!(
                "Complaint {complaint_id} not found"
            )));
        }
        Ok(())
    }

    /// The five most recent complaints for the student dashboard.
    pub fn recent_complaints(&self, student_id: i64) -> Result<Vec<Complaint>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {COMPLAINT_COLUMNS} FROM complaints c
             WHERE c.student_id = ?1
             ORDER BY c.raised_date DESC LIMIT 5"
        ))?;
        let complaints = stmt
            .query_map(params![student_id], map_complaint)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(complaints)
    }
}
