//! Domain logic for the cookbook service.
//!
//! Everything in this crate is pure: no database access, no HTTP. The API
//! crate feeds repository rows into these helpers and renders the results.

pub mod error;
pub mod forms;
pub mod history;
pub mod meal_plan;
pub mod password_policy;
pub mod preferences;
pub mod roles;
pub mod shopping;
pub mod types;
