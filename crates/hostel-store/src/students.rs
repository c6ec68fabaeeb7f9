use rusqlite::{params, OptionalExtension, Row};

use hostel_core::{Result, Student};

use crate::store::Store;

/// Shared SELECT list so every student query maps identically. The password
/// column is deliberately not part of it.
pub(crate) const STUDENT_COLUMNS: &str = "s.student_id, s.name, s.username, s.email, s.room_id, \
     s.phone, s.parent_name, s.parent_phone, s.address, s.branch, s.year_of_study, \
     s.status, s.joined_date";

pub(crate) fn map_student(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        student_id: row.get(0)?,
        name: row.get(1)?,
        username: row.get(2)?,
        email: row.get(3)?,
        room_id: row.get(4)?,
        phone: row.get(5)?,
        parent_name: row.get(6)?,
        parent_phone: row.get(7)?,
        address: row.get(8)?,
        branch: row.get(9)?,
        year_of_study: row.get(10)?,
        status: row.get(11)?,
        joined_date: row.get(12)?,
    })
}

impl Store {
    pub fn get_student(&self, student_id: i64) -> Result<Option<Student>> {
        let conn = self.conn();
        let student = conn
            .query_row(
                &format!("SELECT {STUDENT_COLUMNS} FROM students s WHERE s.student_id = ?1"),
                params![student_id],
                map_student,
            )
            .optional()?;
        Ok(student)
    }

    /// Names of the other students sharing a room.
    pub fn roommates(&self, room_id: i64, exclude_student: i64) -> Result<Vec<String>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT name FROM students WHERE room_id = ?1 AND student_id != ?2 ORDER BY name",
        )?;
        let names = stmt
            .query_map(params![room_id, exclude_student], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }
}
