//! User preference vocabulary.
//!
//! Preferences are stored as plain text columns; these enums are the
//! canonical set of accepted values and the defaults applied when a user has
//! never saved the settings form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default unit offered when entering ingredient amounts.
pub const DEFAULT_UNIT: &str = "g";

/// Declares a text-backed preference enum with `as_str`, `Display`,
/// `FromStr` and an `ALL` slice.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(format!(concat!("unknown ", $label, " '{}'"), other)),
                }
            }
        }
    };
}

text_enum! {
    /// Stylesheet applied to every page.
    Theme, "theme" {
        Tandoor => "tandoor",
        Bootstrap => "bootstrap",
        Darkly => "darkly",
        Flatly => "flatly",
        Superhero => "superhero",
    }
}

text_enum! {
    /// Navigation bar colour.
    NavColor, "navigation color" {
        Primary => "primary",
        Secondary => "secondary",
        Success => "success",
        Info => "info",
        Warning => "warning",
        Danger => "danger",
        Light => "light",
        Dark => "dark",
    }
}

text_enum! {
    /// Page the landing route redirects an authenticated user to.
    DefaultPage, "default page" {
        Search => "search",
        Plan => "plan",
        Books => "books",
    }
}

text_enum! {
    /// Layout of the recipe table on the search page.
    SearchStyle, "search style" {
        Small => "small",
        Large => "large",
    }
}

impl DefaultPage {
    /// Route path (relative to the API prefix) for this landing page.
    pub fn path(self) -> &'static str {
        match self {
            Self::Search => "/search",
            Self::Plan => "/plan",
            Self::Books => "/books",
        }
    }
}

/// Effective preference values for a user, with defaults filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreferenceSettings {
    pub theme: Theme,
    pub nav_color: NavColor,
    pub default_unit: String,
    pub default_page: DefaultPage,
    pub search_style: SearchStyle,
    pub show_recent: bool,
    pub comment_notifications: bool,
}

impl Default for PreferenceSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Flatly,
            nav_color: NavColor::Primary,
            default_unit: DEFAULT_UNIT.to_string(),
            default_page: DefaultPage::Search,
            search_style: SearchStyle::Large,
            show_recent: true,
            comment_notifications: true,
        }
    }
}

impl PreferenceSettings {
    /// Build settings from stored text values.
    ///
    /// Values that no longer parse (e.g. a theme removed since the row was
    /// written) fall back to the default for that field.
    #[allow(clippy::too_many_arguments)]
    pub fn from_stored(
        theme: &str,
        nav_color: &str,
        default_unit: &str,
        default_page: &str,
        search_style: &str,
        show_recent: bool,
        comment_notifications: bool,
    ) -> Self {
        let defaults = Self::default();
        Self {
            theme: theme.parse().unwrap_or(defaults.theme),
            nav_color: nav_color.parse().unwrap_or(defaults.nav_color),
            default_unit: if default_unit.trim().is_empty() {
                defaults.default_unit
            } else {
                default_unit.to_string()
            },
            default_page: default_page.parse().unwrap_or(defaults.default_page),
            search_style: search_style.parse().unwrap_or(defaults.search_style),
            show_recent,
            comment_notifications,
        }
    }
}
