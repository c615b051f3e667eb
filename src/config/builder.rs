use std::collections::HashMap;

use super::bind::bind_with;
use super::env::EnvResolver;
use super::field::Bindable;
use super::source::{LayeredResolver, MapResolver, Resolver};
use super::BindError;

/// Builder for binding configuration from several sources.
///
/// Sources are consulted in reverse registration order: a key found in a later
/// source overrides the same key in an earlier one. A field none of the sources
/// know keeps its default.
///
/// ## Example
///
/// ```no_run
/// use std::collections::HashMap;
/// use envbind::{Bindable, BoxError, Config, Fields};
///
/// #[derive(Debug)]
/// struct AppConfig {
///     name: String,
///     port: u16,
/// }
///
/// impl Bindable for AppConfig {
///     fn instantiate() -> Result<Self, BoxError> {
///         Ok(Self { name: "app".into(), port: 8080 })
///     }
///
///     fn fields() -> Fields<Self> {
///         Fields::<Self>::new()
///             .keyed("name", "NAME", |c| &mut c.name)
///             .keyed("port", "PORT", |c| &mut c.port)
///     }
/// }
///
/// let defaults = HashMap::from([("PORT".to_string(), "3000".to_string())]);
///
/// // built-in defaults -> map -> MYAPP_* environment variables
/// let config: AppConfig = Config::builder()
///     .with_map(defaults)
///     .with_env_prefix("MYAPP_")
///     .build()?;
/// # Ok::<(), envbind::BindError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct Config {
    resolver: LayeredResolver,
}

impl Config {
    /// Creates a new configuration builder.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Adds a snapshot of the whole process environment.
    pub fn with_env(self) -> Self {
        self.with_resolver(EnvResolver::new())
    }

    /// Adds a snapshot of the process environment where every key is looked up
    /// as `{prefix}{key}`.
    pub fn with_env_prefix(self, prefix: impl Into<String>) -> Self {
        self.with_resolver(EnvResolver::with_prefix(prefix))
    }

    /// Adds a fixed key/value map.
    pub fn with_map(self, values: HashMap<String, String>) -> Self {
        self.with_resolver(MapResolver::new(values))
    }

    /// Adds any other resolver.
    pub fn with_resolver(mut self, resolver: impl Resolver + 'static) -> Self {
        self.resolver = self.resolver.push(resolver);
        self
    }

    /// Returns the layered resolver without binding, for reuse across several types.
    pub fn into_resolver(self) -> LayeredResolver {
        self.resolver
    }

    /// Binds `T` against all registered sources.
    pub fn build<T: Bindable>(self) -> Result<T, BindError> {
        bind_with(&self.resolver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::error::BoxError;
    use crate::config::field::Fields;

    #[derive(Debug, PartialEq)]
    struct Server {
        host: String,
        port: u16,
        debug: bool,
    }

    impl Bindable for Server {
        fn instantiate() -> Result<Self, BoxError> {
            Ok(Self {
                host: "localhost".into(),
                port: 80,
                debug: false,
            })
        }

        fn fields() -> Fields<Self> {
            Fields::<Self>::new()
                .keyed("host", "HOST", |s| &mut s.host)
                .keyed("port", "PORT", |s| &mut s.port)
                .keyed("debug", "DEBUG", |s| &mut s.debug)
        }
    }

    fn map(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_builder_keeps_defaults() {
        let server: Server = Config::builder().build().unwrap();
        assert_eq!(server, Server::instantiate().unwrap());
    }

    #[test]
    fn test_later_source_overrides_earlier() {
        let server: Server = Config::builder()
            .with_map(map(&[("HOST", "base.example"), ("PORT", "8080")]))
            .with_map(map(&[("PORT", "9090")]))
            .build()
            .unwrap();

        assert_eq!(server.host, "base.example");
        assert_eq!(server.port, 9090);
        assert!(!server.debug);
    }

    #[test]
    fn test_env_prefix_overrides_map() {
        temp_env::with_vars(
            [
                ("ENVBIND_BUILDER_PORT", Some("7000")),
                ("ENVBIND_BUILDER_DEBUG", Some("true")),
                ("ENVBIND_BUILDER_HOST", None),
            ],
            || {
                let server: Server = Config::builder()
                    .with_map(map(&[("HOST", "from-map"), ("PORT", "8080")]))
                    .with_env_prefix("ENVBIND_BUILDER_")
                    .build()
                    .unwrap();

                assert_eq!(server.host, "from-map");
                assert_eq!(server.port, 7000);
                assert!(server.debug);
            },
        );
    }

    #[test]
    fn test_map_registered_after_env_wins() {
        temp_env::with_var("HOST", Some("from-env"), || {
            let server: Server = Config::builder()
                .with_env()
                .with_map(map(&[("HOST", "from-map")]))
                .build()
                .unwrap();
            assert_eq!(server.host, "from-map");
        });
    }

    #[test]
    fn test_build_propagates_coercion_errors() {
        let result = Config::builder()
            .with_map(map(&[("PORT", "eighty")]))
            .build::<Server>();
        assert!(matches!(result, Err(BindError::Coercion { .. })));
    }

    #[test]
    fn test_into_resolver_is_reusable() {
        let resolver = Config::builder()
            .with_map(map(&[("PORT", "1234")]))
            .into_resolver();

        let first: Server = bind_with(&resolver).unwrap();
        let second: Server = bind_with(&resolver).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.port, 1234);
    }
}
