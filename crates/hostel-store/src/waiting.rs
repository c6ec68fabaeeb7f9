use rusqlite::{params, OptionalExtension, Row};
use serde::Deserialize;
use tracing::info;

use hostel_core::{HostelError, Result, WaitingEntry, WaitingStatus};

use crate::rooms::find_room;
use crate::store::{today, Store};

#[derive(Debug, Clone, Deserialize)]
pub struct NewWaitingEntry {
    pub student_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub join_date: String,
}

/// Password given to accounts created off the waiting list; students are
/// expected to change it on first login.
const STARTER_PASSWORD: &str = "student123";

fn map_entry(row: &Row<'_>) -> rusqlite::Result<WaitingEntry> {
    Ok(WaitingEntry {
        id: row.get(0)?,
        student_name: row.get(1)?,
        phone: row.get(2)?,
        email: row.get(3)?,
        join_date: row.get(4)?,
        status: row.get(5)?,
    })
}

/// Username for a promoted student: email local part when present,
/// otherwise the lowercased name with spaces removed.
fn derive_username(entry: &WaitingEntry) -> String {
    match entry.email.as_deref().and_then(|e| e.split('@').next()) {
        Some(local) if !local.is_empty() => local.to_string(),
        _ => entry.student_name.to_lowercase().replace(' ', ""),
    }
}

impl Store {
    /// Join-date FIFO; ties and rendering are the frontend's concern.
    pub fn list_waiting(&self) -> Result<Vec<WaitingEntry>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, student_name, phone, email, join_date, status
             FROM waiting_list ORDER BY join_date ASC",
        )?;
        let entries = stmt
            .query_map([], map_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    pub fn join_waiting_list(&self, new: &NewWaitingEntry) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO waiting_list (student_name, phone, email, join_date)
             VALUES (?1, ?2, ?3, ?4)",
            params![new.student_name, new.phone, new.email, new.join_date],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Promotes a waiting entry into a real student account in the given
    /// room. The capacity check, the account insert, the occupancy bump and
    /// the status flip all commit together or not at all. Returns the new
    /// student id.
    pub fn assign_waiting(&self, waiting_id: i64, room_identifier: &str) -> Result<i64> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let room = find_room(&tx, room_identifier)?
            .ok_or_else(|| HostelError::NotFound(format!("Room {room_identifier} not found")))?;
        if room.current_occupancy >= room.capacity {
            return Err(HostelError::RoomFull(format!(
                "Room {} is full",
                room.room_number
            )));
        }

        let entry = tx
            .query_row(
                "SELECT id, student_name, phone, email, join_date, status
                 FROM waiting_list WHERE id = ?1",
                params![waiting_id],
                map_entry,
            )
            .optional()?
            .ok_or_else(|| {
                HostelError::NotFound(format!("Waiting entry {waiting_id} not found"))
            })?;
        if entry.status == WaitingStatus::Assigned {
            return Err(HostelError::InvalidOperation(format!(
                "Waiting entry {waiting_id} was already assigned"
            )));
        }

        let username = derive_username(&entry);
        let email = entry.email.clone().unwrap_or_default();
        // students.email and students.username are unique; catch a clash
        // here so the caller gets a usable error instead of a constraint
        // violation
        let taken = tx
            .query_row(
                "SELECT student_id FROM students WHERE email = ?1 OR username = ?2",
                params![email, username],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        if taken.is_some() {
            return Err(HostelError::InvalidOperation(format!(
                "An account named {username} already exists"
            )));
        }
        tx.execute(
            "INSERT INTO students (name, username, email, password, room_id, phone, status, joined_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'Active', ?7)",
            params![
                entry.student_name,
                username,
                email,
                STARTER_PASSWORD,
                room.room_id,
                entry.phone,
                today()
            ],
        )?;
        let student_id = tx.last_insert_rowid();

        tx.execute(
            "UPDATE rooms SET current_occupancy = current_occupancy + 1 WHERE room_id = ?1",
            params![room.room_id],
        )?;
        tx.execute(
            "UPDATE waiting_list SET status = 'Assigned' WHERE id = ?1",
            params![waiting_id],
        )?;

        tx.commit()?;
        info!(waiting_id, student_id, room = %room.room_number, "assigned waiting student");
        Ok(student_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Store {
        let store = Store::open_in_memory().unwrap();
        store.seed().unwrap();
        store
    }

    fn waiting(store: &Store, name: &str, email: Option<&str>, date: &str) -> i64 {
        store
            .join_waiting_list(&NewWaitingEntry {
                student_name: name.into(),
                phone: "5550100".into(),
                email: email.map(String::from),
                join_date: date.into(),
            })
            .unwrap()
    }

    #[test]
    fn list_is_join_date_fifo() {
        let store = seeded();
        waiting(&store, "Late", None, "2026-02-01");
        waiting(&store, "Early", None, "2026-01-01");
        let names: Vec<String> = store
            .list_waiting()
            .unwrap()
            .into_iter()
            .map(|e| e.student_name)
            .collect();
        assert_eq!(names, vec!["Early", "Late"]);
    }

    #[test]
    fn assign_creates_account_and_bumps_occupancy() {
        let store = seeded();
        let id = waiting(&store, "Alice Wonder", Some("alice@example.com"), "2026-01-01");

        // room 202 (capacity 2, one seeded student occupies room 2 only)
        let student_id = store.assign_waiting(id, "202").unwrap();

        let student = store.get_student(student_id).unwrap().unwrap();
        assert_eq!(student.username, "alice");
        assert_eq!(student.name, "Alice Wonder");

        let rooms = store.list_rooms().unwrap();
        let room = rooms.iter().find(|r| r.room.room_number == "202").unwrap();
        assert_eq!(room.room.current_occupancy, 1);

        let entry = &store.list_waiting().unwrap()[0];
        assert_eq!(entry.status, WaitingStatus::Assigned);
    }

    #[test]
    fn username_falls_back_to_name_without_email() {
        let store = seeded();
        let id = waiting(&store, "Bob Builder", None, "2026-01-01");
        let student_id = store.assign_waiting(id, "203").unwrap();
        let student = store.get_student(student_id).unwrap().unwrap();
        assert_eq!(student.username, "bobbuilder");
    }

    #[test]
    fn full_room_is_rejected_and_nothing_changes() {
        let store = seeded();
        // room 201 has capacity 1; fill it first
        let first = waiting(&store, "First", None, "2026-01-01");
        store.assign_waiting(first, "201").unwrap();

        let second = waiting(&store, "Second", None, "2026-01-02");
        let err = store.assign_waiting(second, "201").unwrap_err();
        assert!(matches!(err, HostelError::RoomFull(_)));

        let entries = store.list_waiting().unwrap();
        let second_entry = entries.iter().find(|e| e.student_name == "Second").unwrap();
        assert_eq!(second_entry.status, WaitingStatus::Waiting);
    }

    #[test]
    fn second_assignment_without_email_is_rejected_cleanly() {
        let store = seeded();
        let first = waiting(&store, "No Mail One", None, "2026-01-01");
        store.assign_waiting(first, "203").unwrap();

        // both accounts would carry an empty email, which is unique
        let second = waiting(&store, "No Mail Two", None, "2026-01-02");
        let err = store.assign_waiting(second, "203").unwrap_err();
        assert!(matches!(err, HostelError::InvalidOperation(_)));

        let entries = store.list_waiting().unwrap();
        let stuck = entries.iter().find(|e| e.student_name == "No Mail Two").unwrap();
        assert_eq!(stuck.status, WaitingStatus::Waiting);
        let rooms = store.list_rooms().unwrap();
        let room = rooms.iter().find(|r| r.room.room_number == "203").unwrap();
        assert_eq!(room.room.current_occupancy, 1);
    }

    #[test]
    fn double_assignment_is_rejected() {
        let store = seeded();
        let id = waiting(&store, "Alice Wonder", Some("alice@example.com"), "2026-01-01");
        store.assign_waiting(id, "202").unwrap();
        let err = store.assign_waiting(id, "203").unwrap_err();
        assert!(matches!(err, HostelError::InvalidOperation(_)));
    }

    #[test]
    fn unknown_room_or_entry_is_not_found() {
        let store = seeded();
        let id = waiting(&store, "A", None, "2026-01-01");
        assert!(matches!(
            store.assign_waiting(id, "999").unwrap_err(),
            HostelError::NotFound(_)
        ));
        assert!(matches!(
            store.assign_waiting(404, "202").unwrap_err(),
            HostelError::NotFound(_)
        ));
    }
}
