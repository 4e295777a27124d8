//! Environment and home directory expansion for path settings.

use crate::ConfigError;

/// Expand `~`, `${VAR}` and `${VAR:-default}` in a configured path.
///
/// Unset variables without a default are an error naming `field`.
pub(crate) fn expand_path(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains('$') && !value.starts_with('~') {
        return Ok(value.to_owned());
    }

    shellexpand::full_with_context(
        value,
        || std::env::var("HOME").ok(),
        |var| std::env::var(var).map(Some),
    )
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.var_name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value_unchanged() {
        assert_eq!(expand_path("out/sheets", "output.dir").unwrap(), "out/sheets");
    }

    #[test]
    fn test_expand_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("STATBLOCK_TEST_EXPAND_DIR", "/srv/sheets");
        }
        let result = expand_path("${STATBLOCK_TEST_EXPAND_DIR}/out", "output.dir").unwrap();
        assert_eq!(result, "/srv/sheets/out");
        unsafe {
            std::env::remove_var("STATBLOCK_TEST_EXPAND_DIR");
        }
    }

    #[test]
    fn test_expand_default() {
        let result =
            expand_path("${STATBLOCK_TEST_UNSET_DIR:-fallback}/out", "output.dir").unwrap();
        assert_eq!(result, "fallback/out");
    }

    #[test]
    fn test_expand_home() {
        let previous = std::env::var_os("HOME");
        // SAFETY: no other test in this crate reads HOME
        unsafe {
            std::env::set_var("HOME", "/home/dm");
        }
        let result = expand_path("~/sheets/out", "output.dir");
        let untouched = expand_path("data/~spells.json", "spells.path");
        unsafe {
            match previous {
                Some(home) => std::env::set_var("HOME", home),
                None => std::env::remove_var("HOME"),
            }
        }
        assert_eq!(result.unwrap(), "/home/dm/sheets/out");
        assert_eq!(untouched.unwrap(), "data/~spells.json");
    }

    #[test]
    fn test_unset_var_names_field() {
        let err = expand_path("${STATBLOCK_TEST_MISSING_VAR}", "spells.path").unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::EnvVar { field, message }
                if field == "spells.path" && message == "${STATBLOCK_TEST_MISSING_VAR} not set"
        ));
    }
}
