//! Database row structs and input DTOs.
//!
//! Each submodule contains the `FromRow` entity structs for one table group
//! and the DTOs used to insert into it.

pub mod book;
pub mod comment;
pub mod log;
pub mod meal_plan;
pub mod preference;
pub mod recipe;
pub mod role;
pub mod session;
pub mod user;
