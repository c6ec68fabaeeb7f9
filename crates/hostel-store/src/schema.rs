use rusqlite::Connection;

use hostel_core::Result;

/// Creates the base schema and applies additive column migrations. Safe to
/// run on every startup.
pub(crate) fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS admins (
            admin_id   INTEGER PRIMARY KEY AUTOINCREMENT,
            username   TEXT NOT NULL UNIQUE,
            password   TEXT NOT NULL,
            email      TEXT,
            created_at TEXT DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS rooms (
            room_id           INTEGER PRIMARY KEY AUTOINCREMENT,
            room_number       TEXT NOT NULL UNIQUE,
            capacity          INTEGER NOT NULL,
            current_occupancy INTEGER DEFAULT 0,
            room_type         TEXT NOT NULL,
            floor             INTEGER NOT NULL,
            price             REAL NOT NULL
        );

        CREATE TABLE IF NOT EXISTS students (
            student_id    INTEGER PRIMARY KEY AUTOINCREMENT,
            name          TEXT NOT NULL,
            username      TEXT NOT NULL UNIQUE,
            email         TEXT NOT NULL UNIQUE,
            password      TEXT NOT NULL,
            room_id       INTEGER,
            phone         TEXT,
            parent_name   TEXT,
            parent_phone  TEXT,
            address       TEXT,
            branch        TEXT,
            year_of_study INTEGER,
            status        TEXT DEFAULT 'Active',
            joined_date   TEXT,
            FOREIGN KEY (room_id) REFERENCES rooms (room_id)
        );

        CREATE TABLE IF NOT EXISTS payments (
            payment_id     INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id     INTEGER NOT NULL,
            amount         REAL NOT NULL,
            payment_date   TEXT,
            deadline       TEXT NOT NULL,
            payment_type   TEXT NOT NULL,
            status         TEXT DEFAULT 'Pending',
            transaction_id TEXT,
            FOREIGN KEY (student_id) REFERENCES students (student_id)
        );

        CREATE TABLE IF NOT EXISTS complaints (
            complaint_id   INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id     INTEGER NOT NULL,
            room_id        INTEGER,
            complaint_type TEXT NOT NULL,
            description    TEXT NOT NULL,
            status         TEXT DEFAULT 'Pending',
            raised_date    TEXT NOT NULL,
            resolved_date  TEXT,
            FOREIGN KEY (student_id) REFERENCES students (student_id),
            FOREIGN KEY (room_id) REFERENCES rooms (room_id)
        );

        CREATE TABLE IF NOT EXISTS menu (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            day       TEXT NOT NULL UNIQUE,
            breakfast TEXT,
            lunch     TEXT,
            snacks    TEXT,
            dinner    TEXT
        );

        CREATE TABLE IF NOT EXISTS waiting_list (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            student_name TEXT NOT NULL,
            phone        TEXT NOT NULL,
            email        TEXT,
            join_date    TEXT NOT NULL,
            status       TEXT DEFAULT 'Waiting'
        );

        CREATE TABLE IF NOT EXISTS maintenance_requests (
            request_id  INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id  INTEGER,
            room_id     INTEGER,
            category    TEXT NOT NULL,
            description TEXT NOT NULL,
            priority    TEXT DEFAULT 'Medium',
            status      TEXT DEFAULT 'Pending',
            created_at  TEXT NOT NULL,
            resolved_at TEXT,
            FOREIGN KEY (student_id) REFERENCES students (student_id),
            FOREIGN KEY (room_id) REFERENCES rooms (room_id)
        );

        CREATE TABLE IF NOT EXISTS room_change_requests (
            request_id     INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id     INTEGER NOT NULL,
            current_room   INTEGER,
            requested_room INTEGER,
            reason         TEXT NOT NULL,
            status         TEXT DEFAULT 'Pending',
            request_date   TEXT NOT NULL,
            FOREIGN KEY (student_id) REFERENCES students (student_id),
            FOREIGN KEY (current_room) REFERENCES rooms (room_id),
            FOREIGN KEY (requested_room) REFERENCES rooms (room_id)
        );

        CREATE TABLE IF NOT EXISTS announcements (
            id       INTEGER PRIMARY KEY AUTOINCREMENT,
            title    TEXT NOT NULL,
            message  TEXT NOT NULL,
            category TEXT NOT NULL,
            date     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_students_room          ON students(room_id);
        CREATE INDEX IF NOT EXISTS idx_payments_student       ON payments(student_id);
        CREATE INDEX IF NOT EXISTS idx_complaints_student     ON complaints(student_id);
        CREATE INDEX IF NOT EXISTS idx_maintenance_student    ON maintenance_requests(student_id);
        CREATE INDEX IF NOT EXISTS idx_room_changes_status    ON room_change_requests(status);
        ",
    )?;

    apply_additive_migrations(conn)?;

    Ok(())
}

/// Column additions for databases created before the column existed. Each
/// check is idempotent, so reopening an old file upgrades it in place.
fn apply_additive_migrations(conn: &Connection) -> Result<()> {
    add_column_if_missing(conn, "students", "branch", "TEXT")?;
    add_column_if_missing(conn, "students", "year_of_study", "INTEGER")?;
    add_column_if_missing(conn, "waiting_list", "email", "TEXT")?;
    add_column_if_missing(
        conn,
        "waiting_list",
        "status",
        "TEXT DEFAULT 'Waiting'",
    )?;
    Ok(())
}

fn add_column_if_missing(
    conn: &Connection,
    table: &str,
    column: &str,
    definition: &str,
) -> Result<()> {
    let present = conn
        .prepare(&format!("SELECT {column} FROM {table} LIMIT 0"))
        .is_ok();
    if !present {
        conn.execute_batch(&format!(
            "ALTER TABLE {table} ADD COLUMN {column} {definition};"
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrate_twice_is_safe() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        migrate(&conn).unwrap();
    }

    #[test]
    fn additive_migration_upgrades_old_table() {
        let conn = Connection::open_in_memory().unwrap();
        // waiting_list as it existed before the status/email columns
        conn.execute_batch(
            "CREATE TABLE waiting_list (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                student_name TEXT NOT NULL,
                phone        TEXT NOT NULL,
                join_date    TEXT NOT NULL
            );",
        )
        .unwrap();

        migrate(&conn).unwrap();

        conn.execute(
            "INSERT INTO waiting_list (student_name, phone, join_date) VALUES ('A', '1', '2026-01-01')",
            [],
        )
        .unwrap();
        let status: String = conn
            .query_row("SELECT status FROM waiting_list WHERE id = 1", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(status, "Waiting");
    }
}
