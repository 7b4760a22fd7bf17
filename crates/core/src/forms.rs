//! Form payloads and their field-level validation.
//!
//! Every form derives [`Validate`]; handlers call [`validate_form`] and, on
//! failure, render the page again with the returned [`FieldErrors`] instead
//! of failing the request. Missing fields deserialize to empty values so they
//! surface as field errors too.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::meal_plan::WeekKey;
use crate::preferences::{DefaultPage, NavColor, PreferenceSettings, SearchStyle, Theme};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Field errors
// ---------------------------------------------------------------------------

/// Field name → messages, serialized as a JSON object.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single error on a single field.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn add_all(&mut self, field: &str, messages: impl IntoIterator<Item = String>) {
        for message in messages {
            self.add(field, message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(())` when no error was collected.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            let field = field.to_string();
            for err in errs {
                out.add(&field, describe(err));
            }
        }
        out
    }
}

fn describe(err: &ValidationError) -> String {
    match &err.message {
        Some(message) => message.to_string(),
        None => format!("Invalid value ({})", err.code),
    }
}

/// Run a form's validators, converting failures into [`FieldErrors`].
pub fn validate_form<T: Validate>(form: &T) -> Result<(), FieldErrors> {
    form.validate().map_err(FieldErrors::from)
}

/// Text fields are stored trimmed, so they are trimmed before validation.
fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

// ---------------------------------------------------------------------------
// Custom validators
// ---------------------------------------------------------------------------

fn invalid_choice(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn validate_week(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<WeekKey>()
        .map(|_| ())
        .map_err(|_| invalid_choice("week", format!("'{value}' is not a valid week (YYYY-Www)")))
}

fn validate_theme(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Theme>()
        .map(|_| ())
        .map_err(|e| invalid_choice("choice", e))
}

fn validate_nav_color(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<NavColor>()
        .map(|_| ())
        .map_err(|e| invalid_choice("choice", e))
}

fn validate_default_page(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<DefaultPage>()
        .map(|_| ())
        .map_err(|e| invalid_choice("choice", e))
}

fn validate_search_style(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<SearchStyle>()
        .map(|_| ())
        .map_err(|e| invalid_choice("choice", e))
}

// ---------------------------------------------------------------------------
// Recipe page forms
// ---------------------------------------------------------------------------

/// Comment on a recipe.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CommentForm {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 4000, message = "Comment must be 1-4000 characters"))]
    pub text: String,
}

/// Bookmark a recipe into one of the user's books.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct BookmarkForm {
    #[validate(range(min = 1, message = "Select a recipe book"))]
    pub book: DbId,
}

/// Record that the user cooked a recipe.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct CookLogForm {
    #[validate(range(min = 1, max = 1000, message = "Servings must be between 1 and 1000"))]
    pub servings: i32,
    #[validate(range(min = 0, max = 5, message = "Rating must be between 0 and 5"))]
    pub rating: Option<i32>,
}

impl Default for CookLogForm {
    fn default() -> Self {
        Self {
            servings: 1,
            rating: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Meal plan / shopping forms
// ---------------------------------------------------------------------------

/// Week selector on the meal plan page.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct MealPlanWeekForm {
    #[validate(custom(function = "validate_week"))]
    pub week: String,
}

impl MealPlanWeekForm {
    /// The selected week. Only meaningful after validation succeeded.
    pub fn week_key(&self) -> Option<WeekKey> {
        self.week.parse().ok()
    }
}

/// Recipe selection for the shopping list.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ShoppingForm {
    #[validate(length(min = 1, message = "Select at least one recipe"))]
    pub recipe: Vec<DbId>,
    pub markdown_format: bool,
}

// ---------------------------------------------------------------------------
// Settings forms
// ---------------------------------------------------------------------------

/// Display and behaviour preferences.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PreferenceForm {
    #[validate(custom(function = "validate_theme"))]
    pub theme: String,
    #[validate(custom(function = "validate_nav_color"))]
    pub nav_color: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 32, message = "Default unit must be 1-32 characters"))]
    pub default_unit: String,
    #[validate(custom(function = "validate_default_page"))]
    pub default_page: String,
    #[validate(custom(function = "validate_search_style"))]
    pub search_style: String,
    pub show_recent: bool,
    pub comment_notifications: bool,
    /// Users who can see this user's meal plans.
    pub plan_share: Vec<DbId>,
}

impl Default for PreferenceForm {
    fn default() -> Self {
        Self::from_settings(&PreferenceSettings::default(), Vec::new())
    }
}

impl PreferenceForm {
    /// Pre-filled form for the current settings.
    pub fn from_settings(settings: &PreferenceSettings, plan_share: Vec<DbId>) -> Self {
        Self {
            theme: settings.theme.to_string(),
            nav_color: settings.nav_color.to_string(),
            default_unit: settings.default_unit.clone(),
            default_page: settings.default_page.to_string(),
            search_style: settings.search_style.to_string(),
            show_recent: settings.show_recent,
            comment_notifications: settings.comment_notifications,
            plan_share,
        }
    }

    /// Typed settings. Only meaningful after validation succeeded.
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

/// Display name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UserNameForm {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(max = 150, message = "First name must be at most 150 characters"))]
    pub first_name: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(max = 150, message = "Last name must be at most 150 characters"))]
    pub last_name: String,
}

/// Password change for the signed-in user.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct PasswordChangeForm {
    #[validate(length(min = 1, message = "This field is required."))]
    pub old_password: String,
    #[validate(length(min = 1, message = "This field is required."))]
    pub new_password1: String,
    #[validate(
        length(min = 1, message = "This field is required."),
        must_match(other = "new_password1", message = "The two password fields didn't match.")
    )]
    pub new_password2: String,
}

/// First-run superuser creation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SuperUserForm {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 150, message = "Name must be 1-150 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "This field is required."))]
    pub password: String,
    #[validate(length(min = 1, message = "This field is required."))]
    pub password_confirm: String,
}

impl SuperUserForm {
    /// Field-level check that both password entries agree, reported on the
    /// `password` field.
    pub fn check_confirmation(&self) -> Result<(), FieldErrors> {
        if self.password == self.password_confirm {
            Ok(())
        } else {
            Err(FieldErrors::single("password", "Passwords dont match!"))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_comment_is_field_error() {
        let errors = validate_form(&CommentForm::default()).unwrap_err();
        assert_eq!(
            errors.get("text"),
            Some(&["Comment must be 1-4000 characters".to_string()][..])
        );
    }

    #[test]
    fn blank_comment_is_field_error() {
        let form: CommentForm = serde_json::from_value(serde_json::json!({"text": "   "})).unwrap();
        assert_eq!(form.text, "");
        assert!(validate_form(&form).unwrap_err().get("text").is_some());
    }

    #[test]
    fn bookmark_requires_book() {
        let errors = validate_form(&BookmarkForm::default()).unwrap_err();
        assert!(errors.get("book").is_some());
        assert!(validate_form(&BookmarkForm { book: 3 }).is_ok());
    }

    #[test]
    fn cook_log_rating_is_bounded() {
        let form = CookLogForm {
            servings: 2,
            rating: Some(6),
        };
        let errors = validate_form(&form).unwrap_err();
        assert!(errors.get("rating").is_some());
        assert!(errors.get("servings").is_none());
        assert!(validate_form(&CookLogForm::default()).is_ok());
    }

    #[test]
    fn week_form_validates_key() {
        let ok = MealPlanWeekForm {
            week: "2024-W10".into(),
        };
        assert!(validate_form(&ok).is_ok());
        assert_eq!(ok.week_key().unwrap().to_string(), "2024-W10");

        let bad = MealPlanWeekForm {
            week: "next tuesday".into(),
        };
        let errors = validate_form(&bad).unwrap_err();
        assert!(errors.get("week").is_some());
    }

    #[test]
    fn shopping_form_requires_selection() {
        assert!(validate_form(&ShoppingForm::default()).is_err());
        let form = ShoppingForm {
            recipe: vec![1, 2],
            markdown_format: true,
        };
        assert!(validate_form(&form).is_ok());
    }

    #[test]
    fn default_preference_form_is_valid() {
        let form = PreferenceForm::default();
        assert!(validate_form(&form).is_ok());
        assert_eq!(form.settings(), PreferenceSettings::default());
    }

    #[test]
    fn preference_form_rejects_unknown_choices() {
        let form = PreferenceForm {
            theme: "neon".into(),
            default_page: "kitchen".into(),
            ..PreferenceForm::default()
        };
        let errors = validate_form(&form).unwrap_err();
        assert!(errors.get("theme").is_some());
        assert!(errors.get("default_page").is_some());
        assert!(errors.get("nav_color").is_none());
    }

    #[test]
    fn preference_form_yields_typed_settings() {
        let form = PreferenceForm {
            default_page: "plan".into(),
            search_style: "small".into(),
            show_recent: false,
            ..PreferenceForm::default()
        };
        let settings = form.settings();
        assert_eq!(settings.default_page, DefaultPage::Plan);
        assert_eq!(settings.search_style, SearchStyle::Small);
        assert!(!settings.show_recent);
    }

    #[test]
    fn password_change_requires_matching_new_passwords() {
        let form = PasswordChangeForm {
            old_password: "old-secret".into(),
            new_password1: "new-secret-1".into(),
            new_password2: "new-secret-2".into(),
        };
        let errors = validate_form(&form).unwrap_err();
        assert_eq!(
            errors.get("new_password2"),
            Some(&["The two password fields didn't match.".to_string()][..])
        );
    }

    #[test]
    fn superuser_confirmation_mismatch_lands_on_password() {
        let form = SuperUserForm {
            name: "admin".into(),
            password: "one-password".into(),
            password_confirm: "another-password".into(),
        };
        assert!(validate_form(&form).is_ok());
        let errors = form.check_confirmation().unwrap_err();
        assert_eq!(errors.get("password"), Some(&["Passwords dont match!".to_string()][..]));
    }

    #[test]
    fn superuser_name_is_trimmed_before_validation() {
        let blank: SuperUserForm = serde_json::from_value(serde_json::json!({
            "name": "   ",
            "password": "braised-leeks-42",
            "password_confirm": "braised-leeks-42",
        }))
        .unwrap();
        assert!(validate_form(&blank).unwrap_err().get("name").is_some());

        let padded: SuperUserForm =
            serde_json::from_value(serde_json::json!({"name": "  chef "})).unwrap();
        assert_eq!(padded.name, "chef");
    }

    #[test]
    fn field_errors_accumulate_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("password", "too short");
        errors.add_all("password", vec!["too common".to_string()]);
        assert_eq!(errors.get("password").unwrap().len(), 2);
        assert!(errors.into_result().is_err());
        assert!(FieldErrors::new().into_result().is_ok());
    }
}
