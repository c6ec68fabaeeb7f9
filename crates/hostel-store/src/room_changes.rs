use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};
use tracing::info;

use hostel_core::{HostelError, RequestStatus, Result};

use crate::store::{now_timestamp, Store};

/// Pending request joined with the student and both room numbers, shaped
/// for the admin review screen.
#[derive(Debug, Clone, Serialize)]
pub struct RoomChangeView {
    pub request_id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub student_email: String,
    pub current_room: Option<i64>,
    pub current_room_number: Option<String>,
    pub requested_room: i64,
    pub requested_room_number: Option<String>,
    pub reason: String,
    pub status: RequestStatus,
    pub request_date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewRoomChange {
    pub student_id: i64,
    pub current_room: Option<i64>,
    pub requested_room: i64,
    pub reason: String,
}

impl Store {
    pub fn list_pending_room_changes(&self) -> Result<Vec<RoomChangeView>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT rcr.request_id, rcr.student_id, s.name, s.email,
                    rcr.current_room, r1.room_number,
                    rcr.requested_room, r2.room_number,
                    rcr.reason, rcr.status, rcr.request_date
             FROM room_change_requests rcr
             JOIN students s ON rcr.student_id = s.student_id
             LEFT JOIN rooms r1 ON rcr.current_room = r1.room_id
             LEFT JOIN rooms r2 ON rcr.requested_room = r2.room_id
             WHERE rcr.status = 'Pending'
             ORDER BY rcr.request_date DESC",
        )?;
        let requests = stmt
            .query_map([], |row| {
                Ok(RoomChangeView {
                    request_id: row.get(0)?,
                    student_id: row.get(1)?,
                    student_name: row.get(2)?,
                    student_email: row.get(3)?,
                    current_room: row.get(4)?,
                    current_room_number: row.get(5)?,
                    requested_room: row.get(6)?,
                    requested_room_number: row.get(7)?,
                    reason: row.get(8)?,
                    status: row.get(9)?,
                    request_date: row.get(10)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(requests)
    }

    pub fn create_room_change(&self, new: &NewRoomChange) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO room_change_requests
                 (student_id, current_room, requested_room, reason, status, request_date)
             VALUES (?1, ?2, ?3, ?4, 'Pending', ?5)",
            params![
                new.student_id,
                new.current_room,
                new.requested_room,
                new.reason,
                now_timestamp()
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Moves the student and rebalances both occupancy counters in one
    /// transaction. Only Pending requests can be approved, so the counters
    /// move exactly once per request.
    pub fn approve_room_change(&self, request_id: i64) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let (student_id, current_room, requested_room, status) = tx
            .query_row(
                "SELECT student_id, current_room, requested_room, status
                 FROM room_change_requests WHERE request_id = ?1",
                params![request_id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, Option<i64>>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, RequestStatus>(3)?,
                    ))
                },
            )
            .optional()?
            .ok_or_else(|| HostelError::NotFound(format!("Request {request_id} not found")))?;
        if status != RequestStatus::Pending {
            return Err(HostelError::InvalidOperation(format!(
                "Request {request_id} was already {status}"
            )));
        }

        let (capacity, occupancy) = tx
            .query_row(
                "SELECT capacity, current_occupancy FROM rooms WHERE room_id = ?1",
                params![requested_room],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()?
            .ok_or_else(|| HostelError::NotFound(format!("Room {requested_room} not found")))?;
        if occupancy >= capacity {
            return Err(HostelError::RoomFull(format!(
                "Room {requested_room} is full"
            )));
        }

        tx.execute(
            "UPDATE students SET room_id = ?1 WHERE student_id = ?2",
            params![requested_room, student_id],
        )?;
        if let Some(old_room) = current_room {
            tx.execute(
                "UPDATE rooms SET current_occupancy = current_occupancy - 1 WHERE room_id = ?1",
                params![old_room],
            )?;
        }
        tx.execute(
            "UPDATE rooms SET current_occupancy = current_occupancy + 1 WHERE room_id = ?1",
            params![requested_room],
        )?;
        tx.execute(
            "UPDATE room_change_requests SET status = 'Approved' WHERE request_id = ?1",
            params![request_id],
        )?;

        tx.commit()?;
        info!(request_id, student_id, requested_room, "approved room change");
        Ok(())
    }

    pub fn deny_room_change(&self, request_id: i64) -> Result<()> {
        let conn = self.conn();
        let status = conn
            .query_row(
                "SELECT status FROM room_change_requests WHERE request_id = ?1",
                params![request_id],
                |row| row.get::<_, RequestStatus>(0),
            )
            .optional()?
            .ok_or_else(|| HostelError::NotFound(format!("Request {request_id} not found")))?;
        if status != RequestStatus::Pending {
            return Err(HostelError::InvalidOperation(format!(
                "Request {request_id} was already {status}"
            )));
        }
        conn.execute(
            "UPDATE room_change_requests SET status = 'Denied' WHERE request_id = ?1",
            params![request_id],
        )?;
        Ok(())
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

    fn request(store: &Store, student_id: i64, from: Option<i64>, to: i64) -> i64 {
        store
            .create_room_change(&NewRoomChange {
                student_id,
                current_room: from,
                requested_room: to,
                reason: "closer to classes".into(),
            })
            .unwrap()
    }

    fn occupancy(store: &Store, number: &str) -> i64 {
        store
            .list_rooms()
            .unwrap()
            .into_iter()
            .find(|r| r.room.room_number == number)
            .unwrap()
            .room
            .current_occupancy
    }

    #[test]
    fn approval_moves_student_and_counters() {
        let store = seeded();
        // John (student 1) in room 1 ("101") wants room 5 ("202")
        let id = request(&store, 1, Some(1), 5);
        store.approve_room_change(id).unwrap();

        let john = store.get_student(1).unwrap().unwrap();
        assert_eq!(john.room_id, Some(5));
        assert_eq!(occupancy(&store, "101"), 0);
        assert_eq!(occupancy(&store, "202"), 1);
        assert!(store.list_pending_room_changes().unwrap().is_empty());
    }

    #[test]
    fn approval_rejects_full_target_room() {
        let store = seeded();
        // room 4 ("201") has capacity 1; Jane moves in first
        let first = request(&store, 2, Some(2), 4);
        store.approve_room_change(first).unwrap();

        let second = request(&store, 3, Some(3), 4);
        let err = store.approve_room_change(second).unwrap_err();
        assert!(matches!(err, HostelError::RoomFull(_)));
        // Mike stays put
        assert_eq!(store.get_student(3).unwrap().unwrap().room_id, Some(3));
    }

    #[test]
    fn approving_twice_is_rejected() {
        let store = seeded();
        let id = request(&store, 1, Some(1), 5);
        store.approve_room_change(id).unwrap();
        let err = store.approve_room_change(id).unwrap_err();
        assert!(matches!(err, HostelError::InvalidOperation(_)));
        // counters moved exactly once
        assert_eq!(occupancy(&store, "202"), 1);
    }

    #[test]
    fn deny_leaves_everything_in_place() {
        let store = seeded();
        let id = request(&store, 1, Some(1), 5);
        store.deny_room_change(id).unwrap();
        assert_eq!(store.get_student(1).unwrap().unwrap().room_id, Some(1));
        assert!(store.list_pending_room_changes().unwrap().is_empty());
    }

    #[test]
    fn deny_reports_missing_and_decided_differently() {
        let store = seeded();
        assert!(matches!(
            store.deny_room_change(404).unwrap_err(),
            HostelError::NotFound(_)
        ));

        let id = request(&store, 1, Some(1), 5);
        store.deny_room_change(id).unwrap();
        // same split as the approve path: a decided request is a bad
        // operation, not a missing one
        assert!(matches!(
            store.deny_room_change(id).unwrap_err(),
            HostelError::InvalidOperation(_)
        ));
        assert!(matches!(
            store.approve_room_change(id).unwrap_err(),
            HostelError::InvalidOperation(_)
        ));
    }

    #[test]
    fn listing_only_shows_pending() {
        let store = seeded();
        let keep = request(&store, 1, Some(1), 5);
        let drop = request(&store, 2, Some(2), 6);
        store.deny_room_change(drop).unwrap();

        let pending = store.list_pending_room_changes().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].request_id, keep);
        assert_eq!(pending[0].student_name, "John Doe");
        assert_eq!(pending[0].requested_room_number.as_deref(), Some("202"));
    }
}
