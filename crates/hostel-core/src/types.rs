use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raised when a TEXT status column holds a value outside the known vocabulary.
#[derive(Debug, thiserror::Error)]
#[error("unknown status value: {0}")]
pub struct UnknownStatus(pub String);

macro_rules! text_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownStatus;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(UnknownStatus(other.to_string())),
                }
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|e| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

text_enum!(PaymentStatus {
    Pending => "Pending",
    Paid => "Paid",
    Unpaid => "Unpaid",
});

text_enum!(ComplaintStatus {
    Pending => "Pending",
    InProgress => "In Progress",
    Resolved => "Resolved",
});

text_enum!(MaintenanceStatus {
    Pending => "Pending",
    InProgress => "In Progress",
    Resolved => "Resolved",
});

text_enum!(RequestStatus {
    Pending => "Pending",
    Approved => "Approved",
    Denied => "Denied",
});

text_enum!(WaitingStatus {
    Waiting => "Waiting",
    Assigned => "Assigned",
});

text_enum!(Priority {
    Low => "Low",
    Medium => "Medium",
    High => "High",
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub student_id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub room_id: Option<i64>,
    pub phone: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub address: Option<String>,
    pub branch: Option<String>,
    pub year_of_study: Option<i64>,
    pub status: String,
    pub joined_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub room_id: i64,
    pub room_number: String,
    pub capacity: i64,
    pub current_occupancy: i64,
    pub room_type: String,
    pub floor: i64,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: i64,
    pub student_id: i64,
    pub amount: f64,
    pub payment_date: Option<String>,
    pub deadline: String,
    pub payment_type: String,
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    pub complaint_id: i64,
    pub student_id: i64,
    pub room_id: Option<i64>,
    pub complaint_type: String,
    pub description: String,
    pub status: ComplaintStatus,
    pub raised_date: String,
    pub resolved_date: Option<String>,
}

/// One row per weekday, four meal columns. The source system briefly carried
/// a day+meal_type table as well; the live endpoints only ever read this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuDay {
    pub id: i64,
    pub day: String,
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub snacks: Option<String>,
    pub dinner: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitingEntry {
    pub id: i64,
    pub student_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub join_date: String,
    pub status: WaitingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceRequest {
    pub request_id: i64,
    pub student_id: Option<i64>,
    pub room_id: Option<i64>,
    pub category: String,
    pub description: String,
    pub priority: Priority,
    pub status: MaintenanceStatus,
    pub created_at: String,
    pub resolved_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomChangeRequest {
    pub request_id: i64,
    pub student_id: i64,
    pub current_room: Option<i64>,
    pub requested_room: i64,
    pub reason: String,
    pub status: RequestStatus,
    pub request_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub message: String,
    pub category: String,
    pub date: String,
}

/// Admin account. The password column never leaves the store layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub admin_id: i64,
    pub username: String,
    pub email: Option<String>,
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_round_trips() {
        assert_eq!(PaymentStatus::Paid.as_str(), "Paid");
        assert_eq!("Unpaid".parse::<PaymentStatus>().unwrap(), PaymentStatus::Unpaid);
        assert_eq!(
            "In Progress".parse::<ComplaintStatus>().unwrap(),
            ComplaintStatus::InProgress
        );
        assert!("Lost".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn status_serde_uses_db_vocabulary() {
        let json = serde_json::to_string(&ComplaintStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let back: WaitingStatus = serde_json::from_str("\"Assigned\"").unwrap();
        assert_eq!(back, WaitingStatus::Assigned);
    }
}
