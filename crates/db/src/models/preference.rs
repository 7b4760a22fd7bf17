//! User preference model and DTOs.

use cookbook_core::preferences::PreferenceSettings;
use cookbook_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_preferences` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserPreference {
    pub id: DbId,
    pub user_id: DbId,
    pub theme: String,
    pub nav_color: String,
    pub default_unit: String,
    pub default_page: String,
    pub search_style: String,
    pub show_recent: bool,
    pub comment_notifications: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserPreference {
    /// Typed view of the stored values.
    pub fn settings(&self) -> PreferenceSettings {
        PreferenceSettings::from_stored(
            &self.theme,
            &self.nav_color,
            &self.default_unit,
            &self.default_page,
            &self.search_style,
            self.show_recent,
            self.comment_notifications,
        )
    }
}

/// DTO for upserting a user's preference row.
#[derive(Debug, Clone)]
pub struct UpsertPreference {
    pub theme: String,
    pub nav_color: String,
    pub default_unit: String,
    pub default_page: String,
    pub search_style: String,
    pub show_recent: bool,
    pub comment_notifications: bool,
}

impl From<&PreferenceSettings> for UpsertPreference {
    fn from(settings: &PreferenceSettings) -> Self {
        Self {
            theme: settings.theme.to_string(),
            nav_color: settings.nav_color.to_string(),
            default_unit: settings.default_unit.clone(),
            default_page: settings.default_page.to_string(),
            search_style: settings.search_style.to_string(),
            show_recent: settings.show_recent,
            comment_notifications: settings.comment_notifications,
        }
    }
}
