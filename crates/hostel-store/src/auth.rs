use rusqlite::{params, OptionalExtension};

use hostel_core::{Admin, Result, Student};

use crate::store::Store;

impl Store {
    /// Admin credential check by username. Returns `None` when the
    /// credentials do not match; the caller decides how to report that.
    pub fn authenticate_admin(&self, username: &str, password: &str) -> Result<Option<Admin>> {
        let conn = self.conn();
        let admin = conn
            .query_row(
                "SELECT admin_id, username, email, created_at
                 FROM admins WHERE username = ?1 AND password = ?2",
                params![username, password],
                |row| {
                    Ok(Admin {
                        admin_id: row.get(0)?,
                        username: row.get(1)?,
                        email: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(admin)
    }

    /// Student credential check. `identity` matches either the email or the
    /// username, covering both generations of the login form.
    pub fn authenticate_student(&self, identity: &str, password: &str) -> Result<Option<Student>> {
        let conn = self.conn();
        let student = conn
            .query_row(
                &format!(
                    "SELECT {} FROM students s
                     WHERE (s.email = ?1 OR s.username = ?1) AND s.password = ?2",
                    crate::students::STUDENT_COLUMNS
                ),
                params![identity, password],
                crate::students::map_student,
            )
            .optional()?;
        Ok(student)
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

    #[test]
    fn admin_login_by_username() {
        let store = seeded();
        let admin = store.authenticate_admin("admin", "admin123").unwrap();
        assert_eq!(admin.unwrap().username, "admin");
        assert!(store.authenticate_admin("admin", "wrong").unwrap().is_none());
    }

    #[test]
    fn student_login_by_email_or_username() {
        let store = seeded();
        let by_email = store
            .authenticate_student("john@example.com", "student123")
            .unwrap()
            .unwrap();
        let by_username = store
            .authenticate_student("student", "student123")
            .unwrap()
            .unwrap();
        assert_eq!(by_email.student_id, by_username.student_id);
        assert!(store
            .authenticate_student("john@example.com", "nope")
            .unwrap()
            .is_none());
    }
}
