use rusqlite::params;
use serde::Serialize;

use hostel_core::{Complaint, HostelError, MaintenanceRequest, MenuDay, Payment, Result, Student};

use crate::store::Store;

#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub total_rooms: i64,
    pub occupancy_rate: f64,
    pub pending_payments: i64,
    pub pending_complaints: i64,
    pub waiting_list: i64,
    pub today_menu: Option<MenuDay>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentProfile {
    #[serde(flatten)]
    pub student: Student,
    pub room_number: Option<String>,
    pub capacity: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentDashboard {
    pub student: StudentProfile,
    pub roommates: Vec<String>,
    pub payment: Option<Payment>,
    pub today_menu: Option<MenuDay>,
    pub recent_complaints: Vec<Complaint>,
    pub maintenance_problems: Vec<MaintenanceRequest>,
}

impl Store {
    pub fn admin_dashboard(&self) -> Result<AdminDashboard> {
        let (total_rooms, occupied, total_capacity) = {
            let conn = self.conn();
            conn.query_row(
                "SELECT COUNT(*),
                        COALESCE(SUM(current_occupancy), 0),
                        COALESCE(SUM(capacity), 0)
                 FROM rooms",
                [],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, i64>(2)?,
                    ))
                },
            )?
        };
        // one decimal, 0 when the hostel has no capacity at all
        let occupancy_rate = if total_capacity > 0 {
            (occupied as f64 / total_capacity as f64 * 1000.0).round() / 10.0
        } else {
            0.0
        };

        let (pending_payments, pending_complaints, waiting_list) = {
            let conn = self.conn();
            conn.query_row(
                "SELECT
                    (SELECT COUNT(*) FROM payments WHERE status = 'Unpaid'),
                    (SELECT COUNT(*) FROM complaints WHERE status = 'Pending'),
                    (SELECT COUNT(*) FROM waiting_list)",
                [],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, i64>(2)?,
                    ))
                },
            )?
        };

        Ok(AdminDashboard {
            total_rooms,
            occupancy_rate,
            pending_payments,
            pending_complaints,
            waiting_list,
            today_menu: self.todays_menu()?,
        })
    }

    pub fn student_dashboard(&self, student_id: i64) -> Result<StudentDashboard> {
        let student = self
            .get_student(student_id)?
            .ok_or_else(|| HostelError::NotFound(format!("Student {student_id} not found")))?;

        let (room_number, capacity) = match student.room_id {
            Some(room_id) => {
                let conn = self.conn();
                conn.query_row(
                    "SELECT room_number, capacity FROM rooms WHERE room_id = ?1",
                    params![room_id],
                    |row| Ok((row.get::<_, Option<String>>(0)?, row.get::<_, Option<i64>>(1)?)),
                )?
            }
            None => (None, None),
        };

        let roommates = match student.room_id {
            Some(room_id) => self.roommates(room_id, student_id)?,
            None => Vec::new(),
        };

        Ok(StudentDashboard {
            roommates,
            payment: self.latest_payment_for(student_id)?,
            today_menu: self.todays_menu()?,
            recent_complaints: self.recent_complaints(student_id)?,
            maintenance_problems: self.maintenance_for_student(student_id)?,
            student: StudentProfile {
                student,
                room_number,
                capacity,
            },
        })
    }
}
