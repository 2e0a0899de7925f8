//! Wire-level DTOs for the dashboard API.
//!
//! These are the serde/utoipa types exchanged with dashboard clients.
//! Conversion from entity models happens at the controller boundary.

pub mod api;
pub mod auth;
pub mod case;
pub mod guild;
pub mod stats;
pub mod ticket;
