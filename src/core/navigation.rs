//! Navigation intents issued by guards and flows

use crate::core::config::RoutePaths;

/// Query parameter carrying the path the user was denied
pub const FROM_PARAM: &str = "from";

/// A redirect instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationIntent {
    pub target_path: String,
    /// Replace the current history entry instead of pushing
    pub replace: bool,
    /// Path to return to after a successful login
    pub preserved_from: Option<String>,
}

impl NavigationIntent {
    /// Redirect replacing the current history entry
    pub fn redirect(target_path: impl Into<String>) -> Self {
        Self {
            target_path: target_path.into(),
            replace: true,
            preserved_from: None,
        }
    }

    /// Plain navigation pushing a new history entry
    pub fn push(target_path: impl Into<String>) -> Self {
        Self {
            target_path: target_path.into(),
            replace: false,
            preserved_from: None,
        }
    }

    pub fn preserving(mut self, from: impl Into<String>) -> Self {
        self.preserved_from = Some(from.into());
        self
    }

    /// Location to hand to the router, with `?from=` when a path is preserved
    pub fn href(&self) -> String {
        match &self.preserved_from {
            Some(from) => format!(
                "{}?{}={}",
                self.target_path,
                FROM_PARAM,
                urlencoding::encode(from)
            ),
            None => self.target_path.clone(),
        }
    }
}

/// Where a successful login should land
///
/// Only same-origin absolute paths are honoured, and never the anonymous-only
/// pages themselves; anything else falls back to the dashboard.
pub fn post_login_target(preserved_from: Option<&str>, paths: &RoutePaths) -> String {
    preserved_from
        .filter(|from| is_internal_path(from) && !paths.is_anonymous_only(from))
        .map(str::to_string)
        .unwrap_or_else(|| paths.dashboard.clone())
}

fn is_internal_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_replaces_and_push_does_not() {
        assert!(NavigationIntent::redirect("/admin/login").replace);
        assert!(!NavigationIntent::push("/admin/login").replace);
    }

    #[test]
    fn test_href_without_preserved_path() {
        let intent = NavigationIntent::redirect("/admin/dashboard");
        assert_eq!(intent.href(), "/admin/dashboard");
    }

    #[test]
    fn test_href_encodes_preserved_path() {
        let intent = NavigationIntent::redirect("/admin/login").preserving("/admin/dashboard?tab=a&b");
        assert_eq!(
            intent.href(),
            "/admin/login?from=%2Fadmin%2Fdashboard%3Ftab%3Da%26b"
        );
    }

    #[test]
    fn test_post_login_target_uses_preserved_path() {
        let paths = RoutePaths::default();
        assert_eq!(
            post_login_target(Some("/admin/dashboard/projects"), &paths),
            "/admin/dashboard/projects"
        );
    }

    #[test]
    fn test_post_login_target_falls_back_to_dashboard() {
        let paths = RoutePaths::default();

        for from in [
            None,
            Some("https://evil.example"),
            Some("//evil.example"),
            Some("/\\evil.example"),
            Some("/admin/login"),
            Some("/admin/register"),
            Some(""),
        ] {
            assert_eq!(post_login_target(from, &paths), "/admin/dashboard", "{from:?}");
        }
    }
}
