pub const THEME_STORAGE_KEY: &str = "theme";
pub const AUTH_STORAGE_KEY: &str = "carr15_auth";
pub const LOGIN_PATH: &str = "/login/";
pub const HOME_PATH: &str = "/home/";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

// Client-side gate only; not a security boundary.
const FAMILY_USERNAME: &str = "family";
const FAMILY_PASSWORD: &str = "carr123";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_attr(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn from_attr(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    /// Toggle target from the current `data-theme`; anything but dark becomes dark.
    pub fn next_from_attr(current: Option<&str>) -> Self {
        match current.and_then(ThemeMode::from_attr) {
            Some(ThemeMode::Dark) => ThemeMode::Light,
            _ => ThemeMode::Dark,
        }
    }
}

/// Theme to apply at load. A stored value is applied verbatim, even one
/// this crate does not recognize, so the page stylesheet stays in charge.
pub fn initial_theme(saved: Option<&str>, prefers_dark: bool) -> Option<String> {
    match saved {
        Some(value) if !value.is_empty() => Some(value.to_string()),
        _ if prefers_dark => Some(ThemeMode::Dark.as_attr().to_string()),
        _ => None,
    }
}

pub fn check_family_login(username: &str, password: &str) -> bool {
    username == FAMILY_USERNAME && password == FAMILY_PASSWORD
}

pub fn member_url(subdomain: &str) -> String {
    format!("https://{}", subdomain.trim())
}

pub fn is_logged_in(auth_flag: Option<&str>) -> bool {
    auth_flag == Some("true")
}

/// Where a gated link should go.
pub fn gated_destination(logged_in: bool, path: &str) -> String {
    if logged_in {
        path.to_string()
    } else {
        LOGIN_PATH.to_string()
    }
}
