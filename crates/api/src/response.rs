//! Response envelopes shared by every page handler.
//!
//! A handler answers with either a [`Page`] (`200`, `{ template, data,
//! messages }`) or a [`Redirect`] (`303` with `Location`, `{ redirect,
//! messages }`). Errors use the `{ error, code }` envelope from
//! [`crate::error`].

use std::collections::BTreeMap;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cookbook_core::forms::FieldErrors;
use serde::Serialize;

use crate::notices::Notices;

/// Prefix every page route is mounted under.
pub const API_PREFIX: &str = "/api/v1";

/// Well-known page paths, relative to [`API_PREFIX`].
pub mod paths {
    pub const LANDING: &str = "/";
    pub const SEARCH: &str = "/search";
    pub const SETUP: &str = "/setup";
    pub const LOGIN: &str = "/auth/login";

    /// Detail page of one recipe.
    pub fn recipe(id: cookbook_core::types::DbId) -> String {
        format!("/recipes/{id}")
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// A rendered page: the template name clients render and its context.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub template: &'static str,
    pub data: T,
    pub messages: Notices,
}

impl<T: Serialize> Page<T> {
    pub fn new(template: &'static str, data: T) -> Self {
        Self {
            template,
            data,
            messages: Notices::new(),
        }
    }

    pub fn with_messages(mut self, messages: Notices) -> Self {
        self.messages = messages;
        self
    }
}

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Redirect
// ---------------------------------------------------------------------------

/// A `303 See Other` to another page, carrying notices for it.
#[derive(Debug, Serialize)]
pub struct Redirect {
    #[serde(rename = "redirect")]
    pub location: String,
    pub messages: Notices,
}

impl Redirect {
    /// Redirect to a path relative to [`API_PREFIX`].
    pub fn to(path: &str) -> Self {
        let location = if path == paths::LANDING {
            API_PREFIX.to_string()
        } else {
            format!("{API_PREFIX}{path}")
        };
        Self {
            location,
            messages: Notices::new(),
        }
    }

    pub fn with_messages(mut self, messages: Notices) -> Self {
        self.messages = messages;
        self
    }
}

impl IntoResponse for Redirect {
    fn into_response(self) -> Response {
        let location = self.location.clone();
        (StatusCode::SEE_OTHER, [(LOCATION, location)], Json(self)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Form errors
// ---------------------------------------------------------------------------

/// Field errors of every submitted form on a page, keyed by form name.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<&'static str, FieldErrors>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the errors of `form`; empty error sets are ignored.
    pub fn insert(&mut self, form: &'static str, errors: FieldErrors) {
        if !errors.is_empty() {
            self.0.insert(form, errors);
        }
    }

    pub fn get(&self, form: &str) -> Option<&FieldErrors> {
        self.0.get(form)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_prefixes_api_path() {
        assert_eq!(Redirect::to(paths::SEARCH).location, "/api/v1/search");
        assert_eq!(Redirect::to(paths::LANDING).location, "/api/v1");
        assert_eq!(Redirect::to(&paths::recipe(7)).location, "/api/v1/recipes/7");
    }

    #[test]
    fn redirect_response_is_see_other_with_location() {
        let response = Redirect::to(paths::LOGIN).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/api/v1/auth/login");
    }

    #[test]
    fn form_errors_skip_empty_sets() {
        let mut errors = FormErrors::new();
        errors.insert("comment", FieldErrors::new());
        assert!(errors.is_empty());
        errors.insert("bookmark", FieldErrors::single("book", "Select a recipe book"));
        assert!(errors.get("bookmark").is_some());
    }
}
