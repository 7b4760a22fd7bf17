//! One-shot user notices ("Comment saved!", "Passwords dont match!") attached
//! to a page or redirect response.

use serde::Serialize;

/// Severity of a notice, used by clients to pick a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Error,
}

/// A single notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: Level,
    pub text: String,
}

/// Notices collected while handling one request.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct Notices(Vec<Notice>);

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: Level, text: impl Into<String>) {
        self.0.push(Notice {
            level,
            text: text.into(),
        });
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(Level::Success, text);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(Level::Info, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(Level::Error, text);
    }

    /// A collection holding one error notice.
    pub fn with_error(text: impl Into<String>) -> Self {
        let mut notices = Self::new();
        notices.error(text);
        notices
    }

    /// A collection holding one success notice.
    pub fn with_success(text: impl Into<String>) -> Self {
        let mut notices = Self::new();
        notices.success(text);
        notices
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.0.iter()
    }
}
