//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Bare `$VAR` syntax is not expanded (only `${VAR}` with braces).
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SITENAV_TEST_SNAPSHOTS", "/srv/cache/navigation");
        }
        let result = expand_env("${SITENAV_TEST_SNAPSHOTS}", "graph.snapshot_dir").unwrap();
        assert_eq!(result, "/srv/cache/navigation");
        unsafe {
            std::env::remove_var("SITENAV_TEST_SNAPSHOTS");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SITENAV_UNSET_TEST");
        }
        let result = expand_env("${SITENAV_UNSET_TEST:-var/navigation}", "graph.snapshot_dir")
            .unwrap();
        assert_eq!(result, "var/navigation");
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SITENAV_THEME_TEST", "bootstrap");
        }
        let result = expand_env("themes/${SITENAV_THEME_TEST}/templates", "templates.dir").unwrap();
        assert_eq!(result, "themes/bootstrap/templates");
        unsafe {
            std::env::remove_var("SITENAV_THEME_TEST");
        }
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SITENAV_MISSING_TEST");
        }
        let err = expand_env("${SITENAV_MISSING_TEST}", "templates.dir").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("SITENAV_MISSING_TEST"));
        assert!(err.to_string().contains("templates.dir"));
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("cache/$LANG", "graph.snapshot_dir").unwrap();
        assert_eq!(result, "cache/$LANG");
    }
}
