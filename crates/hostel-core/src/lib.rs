//! Core types, errors and configuration shared by the hostel backend crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::{DatabaseConfig, HostelConfig, ServerConfig};
pub use error::{HostelError, Result};
pub use types::*;
