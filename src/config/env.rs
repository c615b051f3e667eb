use std::collections::HashMap;
use std::fmt;

use super::source::Resolver;

/// Resolves keys against a snapshot of the process environment.
///
/// The environment is read once, when the resolver is created; later changes
/// to the process environment are not observed. Variables whose name or value
/// is not valid UTF-8 are skipped.
#[derive(Clone)]
pub struct EnvResolver {
    prefix: String,
    vars: HashMap<String, String>,
}

impl EnvResolver {
    pub fn new() -> Self {
        Self::with_prefix("")
    }

    /// Creates a resolver that looks up `{prefix}{key}` for every key.
    ///
    /// With prefix `"MYAPP_"`, a field keyed `PORT` is read from `MYAPP_PORT`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self {
            prefix: prefix.into(),
            vars,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for EnvResolver {
    fn default() -> Self {
        Self::new()
    }
}

// Values are left out: environments routinely carry credentials.
impl fmt::Debug for EnvResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvResolver")
            .field("prefix", &self.prefix)
            .field("vars", &self.vars.len())
            .finish()
    }
}

impl Resolver for EnvResolver {
    fn lookup(&self, key: &str) -> Option<String> {
        if self.prefix.is_empty() {
            return self.vars.get(key).cloned();
        }
        self.vars.get(&format!("{}{}", self.prefix, key)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_returns_exact_value() {
        temp_env::with_var("ENVBIND_TEST_EXACT", Some("  spaced=value  "), || {
            let resolver = EnvResolver::new();
            assert_eq!(
                resolver.lookup("ENVBIND_TEST_EXACT").as_deref(),
                Some("  spaced=value  ")
            );
        });
    }

    #[test]
    fn test_lookup_matches_process_environment() {
        temp_env::with_var("ENVBIND_TEST_ANY", Some("1"), || {
            let resolver = EnvResolver::new();
            let vars = std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
            for (key, value) in vars {
                assert_eq!(resolver.lookup(&key), Some(value));
            }
        });
    }

    #[test]
    fn test_unknown_key_is_absent() {
        temp_env::with_var_unset("__definitely_unset__", || {
            let resolver = EnvResolver::new();
            assert_eq!(resolver.lookup("__definitely_unset__"), None);
        });
    }

    #[test]
    fn test_snapshot_ignores_later_changes() {
        temp_env::with_var_unset("ENVBIND_TEST_LATE", || {
            let resolver = EnvResolver::new();
            temp_env::with_var("ENVBIND_TEST_LATE", Some("late"), || {
                assert_eq!(resolver.lookup("ENVBIND_TEST_LATE"), None);
            });
        });
    }

    #[test]
    fn test_prefix_is_prepended() {
        temp_env::with_vars(
            [
                ("ENVBIND_TEST_APP_PORT", Some("8080")),
                ("PORT", None::<&str>),
            ],
            || {
                let resolver = EnvResolver::with_prefix("ENVBIND_TEST_APP_");
                assert_eq!(resolver.prefix(), "ENVBIND_TEST_APP_");
                assert_eq!(resolver.lookup("PORT").as_deref(), Some("8080"));
                assert_eq!(resolver.lookup("ENVBIND_TEST_APP_PORT"), None);
            },
        );
    }

    #[test]
    fn test_debug_hides_values() {
        temp_env::with_var("ENVBIND_TEST_SECRET", Some("hunter2"), || {
            let resolver = EnvResolver::new();
            assert!(!format!("{resolver:?}").contains("hunter2"));
        });
    }
}
