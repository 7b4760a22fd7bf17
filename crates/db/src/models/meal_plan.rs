//! Meal plan model and DTOs.

use chrono::NaiveDate;
use cookbook_core::meal_plan::MealType;
use cookbook_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A `meal_plans` row joined with the optional recipe name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MealPlan {
    pub id: DbId,
    pub date: NaiveDate,
    pub meal_type: String,
    pub recipe_id: Option<DbId>,
    pub recipe_name: Option<String>,
    pub title: String,
    pub note: String,
    pub created_by: DbId,
    pub shared_with: Option<DbId>,
    pub created_at: Timestamp,
}

impl MealPlan {
    /// The typed meal type. The column is constrained to known values.
    pub fn meal_type(&self) -> MealType {
        self.meal_type.parse().unwrap_or(MealType::Other)
    }

    /// Whether `user_id` owns the entry or it is shared with them.
    pub fn is_visible_to(&self, user_id: DbId) -> bool {
        self.created_by == user_id || self.shared_with == Some(user_id)
    }
}

/// DTO for creating a meal plan entry.
#[derive(Debug)]
pub struct CreateMealPlan {
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub recipe_id: Option<DbId>,
    pub title: String,
    pub note: String,
    pub created_by: DbId,
    pub shared_with: Option<DbId>,
}
