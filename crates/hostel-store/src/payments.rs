use rusqlite::{params, OptionalExtension, Row};
use serde::Serialize;

use hostel_core::{HostelError, Payment, PaymentStatus, Result};

use crate::store::{today, Store};

/// Payment joined with the paying student and their room, ordered by
/// deadline for the admin payments screen.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentView {
    #[serde(flatten)]
    pub payment: Payment,
    pub name: String,
    pub email: String,
    pub room_number: Option<String>,
}

pub(crate) fn map_payment(row: &Row<'_>) -> rusqlite::Result<Payment> {
    Ok(Payment {
        payment_id: row.get(0)?,
        student_id: row.get(1)?,
        amount: row.get(2)?,
        payment_date: row.get(3)?,
        deadline: row.get(4)?,
        payment_type: row.get(5)?,
        status: row.get(6)?,
        transaction_id: row.get(7)?,
    })
}

const PAYMENT_COLUMNS: &str = "p.payment_id, p.student_id, p.amount, p.payment_date, \
     p.deadline, p.payment_type, p.status, p.transaction_id";

impl Store {
    pub fn list_payments(&self) -> Result<Vec<PaymentView>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {PAYMENT_COLUMNS}, s.name, s.email, r.room_number
             FROM payments p
             JOIN students s ON p.student_id = s.student_id
             LEFT JOIN rooms r ON s.room_id = r.room_id
             ORDER BY p.deadline ASC"
        ))?;
        let payments = stmt
            .query_map([], |row| {
                Ok(PaymentView {
                    payment: map_payment(row)?,
                    name: row.get(8)?,
                    email: row.get(9)?,
                    room_number: row.get(10)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(payments)
    }

    /// Most recent payment row for a student, by deadline.
    pub fn latest_payment_for(&self, student_id: i64) -> Result<Option<Payment>> {
        let conn = self.conn();
        let payment = conn
            .query_row(
                &format!(
                    "SELECT {PAYMENT_COLUMNS} FROM payments p
                     WHERE p.student_id = ?1
                     ORDER BY p.deadline DESC LIMIT 1"
                ),
                params![student_id],
                map_payment,
            )
            .optional()?;
        Ok(payment)
    }

    /// Marks a payment Paid/Unpaid/Pending. Paid stamps today's date into
    /// `payment_date`; any other status clears it.
    pub fn update_payment_status(&self, payment_id: i64, status: PaymentStatus) -> Result<()> {
        let payment_date = match status {
            PaymentStatus::Paid => Some(today()),
            _ => None,
        };
        let conn = self.conn();
        let changed = conn.execute(
            "UPDATE payments SET status = ?1, payment_date = ?2 WHERE payment_id = ?3",
            params![status, payment_date, payment_id],
        )?;
        if changed == 0 {
            return Err(HostelError::NotFound(format!(
                "Payment {payment_id} not found"
            )));
        }
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

    #[test]
    fn list_joins_student_and_room() {
        let store = seeded();
        let payments = store.list_payments().unwrap();
        assert_eq!(payments.len(), 3);
        assert!(payments.iter().any(|p| p.name == "John Doe"));
        assert!(payments.iter().all(|p| p.room_number.is_some()));
    }

    #[test]
    fn marking_paid_stamps_the_date_and_back_out_clears_it() {
        let store = seeded();
        store.update_payment_status(1, PaymentStatus::Paid).unwrap();
        let paid = store.latest_payment_for(1).unwrap().unwrap();
        assert_eq!(paid.status, PaymentStatus::Paid);
        assert_eq!(paid.payment_date.as_deref(), Some(today().as_str()));

        store.update_payment_status(1, PaymentStatus::Unpaid).unwrap();
        let unpaid = store.latest_payment_for(1).unwrap().unwrap();
        assert_eq!(unpaid.status, PaymentStatus::Unpaid);
        assert!(unpaid.payment_date.is_none());
    }

    #[test]
    fn updating_missing_payment_is_not_found() {
        let store = seeded();
        let err = store
            .update_payment_status(404, PaymentStatus::Paid)
            .unwrap_err();
        assert!(matches!(err, HostelError::NotFound(_)));
    }
}
