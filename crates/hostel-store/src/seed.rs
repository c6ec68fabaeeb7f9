use chrono::{Duration, Local};
use rusqlite::{params, Connection};
use tracing::info;

use hostel_core::Result;

use crate::store::today;

/// Sample fixture data matching the original deployment: one admin, six
/// rooms, three housed students with an open payment each, a full weekly
/// menu and a pair of announcements. No-op unless the database is empty.
pub(crate) fn seed_if_empty(conn: &mut Connection) -> Result<()> {
    let admins: i64 = conn.query_row("SELECT COUNT(*) FROM admins", [], |r| r.get(0))?;
    if admins > 0 {
        return Ok(());
    }

    let tx = conn.transaction()?;

    tx.execute(
        "INSERT INTO admins (username, password, email) VALUES (?1, ?2, ?3)",
        params!["admin", "admin123", "admin@hostel.com"],
    )?;

    let rooms: [(&str, i64, &str, i64, f64); 6] = [
        ("101", 2, "Single", 1, 8000.0),
        ("102", 2, "Shared", 1, 6000.0),
        ("103", 3, "Shared", 1, 5000.0),
        ("201", 1, "Single", 2, 9000.0),
        ("202", 2, "Shared", 2, 6500.0),
        ("203", 3, "Shared", 2, 5500.0),
    ];
    for (number, capacity, room_type, floor, price) in rooms {
        tx.execute(
            "INSERT INTO rooms (room_number, capacity, room_type, floor, price)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![number, capacity, room_type, floor, price],
        )?;
    }

    let students: [(&str, &str, &str, &str, i64, &str); 3] = [
        ("John Doe", "student", "john@example.com", "student123", 1, "9876543210"),
        ("Jane Smith", "jane", "jane@example.com", "password123", 2, "9876543211"),
        ("Mike Johnson", "mike", "mike@example.com", "password123", 3, "9876543212"),
    ];
    let deadline = (Local::now() + Duration::days(30)).format("%Y-%m-%d").to_string();
    for (name, username, email, password, room_id, phone) in students {
        tx.execute(
            "INSERT INTO students (name, username, email, password, room_id, phone, status, joined_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'Active', ?7)",
            params![name, username, email, password, room_id, phone, today()],
        )?;
        let student_id = tx.last_insert_rowid();
        tx.execute(
            "UPDATE rooms SET current_occupancy = current_occupancy + 1 WHERE room_id = ?1",
            params![room_id],
        )?;
        tx.execute(
            "INSERT INTO payments (student_id, amount, deadline, payment_type, status)
             VALUES (?1, 5000, ?2, 'Hostel Fee', 'Pending')",
            params![student_id, deadline],
        )?;
    }

    let menu: [(&str, &str, &str, &str, &str); 7] = [
        ("Monday", "Idli Sambhar", "Rice & Curry", "Biscuits", "Chapati & Dal"),
        ("Tuesday", "Dosa", "Lemon Rice", "Cake", "Veg Biryani"),
        ("Wednesday", "Pongal", "Sambar Rice", "Puffs", "Curd Rice"),
        ("Thursday", "Upma", "Fried Rice", "Samosa", "Roti & Sabji"),
        ("Friday", "Poori", "Full Meals", "Bajji", "Pulav"),
        ("Saturday", "Vada", "Variety Rice", "Sundal", "Noodles"),
        ("Sunday", "Bread Omelette", "Chicken Biryani", "Corn", "Parotta"),
    ];
    for (day, breakfast, lunch, snacks, dinner) in menu {
        tx.execute(
            "INSERT INTO menu (day, breakfast, lunch, snacks, dinner)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![day, breakfast, lunch, snacks, dinner],
        )?;
    }

    let earlier = (Local::now() - Duration::days(5)).format("%Y-%m-%d").to_string();
    tx.execute(
        "INSERT INTO announcements (title, message, category, date) VALUES
         ('Welcome to the Hostel Management System',
          'We are pleased to announce the launch of our new hostel management platform.',
          'General', ?1),
         ('Maintenance Schedule',
          'Regular maintenance will be conducted on all floors this weekend.',
          'Maintenance', ?2)",
        params![today(), earlier],
    )?;

    tx.commit()?;
    info!("seeded empty hostel database with sample data");
    Ok(())
}
