use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;

use hostel_core::{HostelError, Result, Room};

use crate::store::Store;

/// Room row plus the comma-joined names of its occupants, as the rooms
/// listing has always returned them.
#[derive(Debug, Clone, Serialize)]
pub struct RoomOverview {
    #[serde(flatten)]
    pub room: Room,
    pub students: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomOccupant {
    pub student_id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub branch: Option<String>,
    pub year_of_study: Option<i64>,
    /// `category: description (status)` strings aggregated from the
    /// student's maintenance requests.
    pub maintenance_problems: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomDetails {
    pub room_number: String,
    pub capacity: i64,
    pub current_occupancy: i64,
    pub students: Vec<RoomOccupant>,
}

pub(crate) fn map_room(row: &Row<'_>) -> rusqlite::Result<Room> {
    Ok(Room {
        room_id: row.get(0)?,
        room_number: row.get(1)?,
        capacity: row.get(2)?,
        current_occupancy: row.get(3)?,
        room_type: row.get(4)?,
        floor: row.get(5)?,
        price: row.get(6)?,
    })
}

/// Resolves a room by its number first, then by numeric id, so a room
/// numbered "101" always wins over room_id 101.
pub(crate) fn find_room(conn: &Connection, identifier: &str) -> Result<Option<Room>> {
    let by_number = conn
        .query_row(
            "SELECT room_id, room_number, capacity, current_occupancy, room_type, floor, price
             FROM rooms WHERE room_number = ?1",
            params![identifier],
            map_room,
        )
        .optional()?;
    if by_number.is_some() {
        return Ok(by_number);
    }

    let Ok(id) = identifier.parse::<i64>() else {
        return Ok(None);
    };
    let by_id = conn
        .query_row(
            "SELECT room_id, room_number, capacity, current_occupancy, room_type, floor, price
             FROM rooms WHERE room_id = ?1",
            params![id],
            map_room,
        )
        .optional()?;
    Ok(by_id)
}

impl Store {
    pub fn list_rooms(&self) -> Result<Vec<RoomOverview>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT r.room_id, r.room_number, r.capacity, r.current_occupancy,
                    r.room_type, r.floor, r.price,
                    GROUP_CONCAT(s.name) AS students
             FROM rooms r
             LEFT JOIN students s ON r.room_id = s.room_id
             GROUP BY r.room_id
             ORDER BY r.room_number",
        )?;
        let rooms = stmt
            .query_map([], |row| {
                Ok(RoomOverview {
                    room: map_room(row)?,
                    students: row.get(7)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rooms)
    }

    /// Room plus its occupants and their maintenance history. `identifier`
    /// may be a room number or a room id.
    pub fn room_details(&self, identifier: &str) -> Result<RoomDetails> {
        let conn = self.conn();
        let room = find_room(&conn, identifier)?
            .ok_or_else(|| HostelError::NotFound(format!("Room {identifier} not found")))?;

        let mut stmt = conn.prepare(
            "SELECT s.student_id, s.name, s.email, s.phone, s.branch, s.year_of_study,
                    GROUP_CONCAT(m.category || ': ' || m.description || ' (' || m.status || ')')
                        AS maintenance_problems
             FROM students s
             LEFT JOIN maintenance_requests m ON s.student_id = m.student_id
             WHERE s.room_id = ?1
             GROUP BY s.student_id",
        )?;
        let students = stmt
            .query_map(params![room.room_id], |row| {
                Ok(RoomOccupant {
                    student_id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    phone: row.get(3)?,
                    branch: row.get(4)?,
                    year_of_study: row.get(5)?,
                    maintenance_problems: row.get(6)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(RoomDetails {
            room_number: room.room_number,
            capacity: room.capacity,
            current_occupancy: room.current_occupancy,
            students,
        })
    }
}
