//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod book_repo;
pub mod comment_repo;
pub mod log_repo;
pub mod meal_plan_repo;
pub mod preference_repo;
pub mod recipe_repo;
pub mod role_repo;
pub mod session_repo;
pub mod user_repo;

pub use book_repo::BookRepo;
pub use comment_repo::CommentRepo;
pub use log_repo::LogRepo;
pub use meal_plan_repo::MealPlanRepo;
pub use preference_repo::PreferenceRepo;
pub use recipe_repo::RecipeRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
