//! SQLite-backed relational store for the hostel backend.
//!
//! [`Store`] owns the connection; every query is parameterized SQL grouped
//! into one module per domain area. Multi-statement flows (waiting-list
//! assignment, room-change approval) run inside explicit transactions so the
//! occupancy counters are never observable half-updated.

mod schema;
mod seed;
mod store;

mod announcements;
mod auth;
mod complaints;
mod dashboard;
mod maintenance;
mod menu;
mod payments;
mod room_changes;
mod rooms;
mod students;
mod waiting;

pub use announcements::NewAnnouncement;
pub use complaints::{ComplaintView, NewComplaint};
pub use dashboard::{AdminDashboard, StudentDashboard, StudentProfile};
pub use maintenance::NewMaintenanceRequest;
pub use payments::PaymentView;
pub use room_changes::{NewRoomChange, RoomChangeView};
pub use rooms::{RoomDetails, RoomOccupant, RoomOverview};
pub use store::Store;
pub use waiting::NewWaitingEntry;
