//! Populate plain structs from environment variables or in-memory maps.
//!
//! A type opts in by implementing [`Bindable`]: it says how to build a default
//! instance and lists the fields that take part, each with an optional lookup
//! key. [`bind_with`] then overwrites those fields with whatever a [`Resolver`]
//! knows, coercing strings by the field's declared type.
//!
//! ```
//! use envbind::{bind_with, Bindable, BoxError, Fields, MapResolver};
//!
//! struct Database {
//!     url: String,
//!     pool_size: u32,
//!     verbose: bool,
//! }
//!
//! impl Bindable for Database {
//!     fn instantiate() -> Result<Self, BoxError> {
//!         Ok(Self { url: "postgres://localhost/app".into(), pool_size: 4, verbose: false })
//!     }
//!
//!     fn fields() -> Fields<Self> {
//!         Fields::<Self>::new()
//!             .keyed("url", "DATABASE_URL", |d| &mut d.url)
//!             .keyed("pool_size", "DATABASE_POOL", |d| &mut d.pool_size)
//!             .field("verbose", |d| &mut d.verbose)
//!     }
//! }
//!
//! let resolver: MapResolver = [("DATABASE_POOL", "16"), ("verbose", "true")].into_iter().collect();
//! let db: Database = bind_with(&resolver)?;
//!
//! assert_eq!(db.url, "postgres://localhost/app");
//! assert_eq!(db.pool_size, 16);
//! assert!(db.verbose);
//! # Ok::<(), envbind::BindError>(())
//! ```

pub mod config;

pub use config::{
    bind, bind_with, coerce, BindError, Bindable, BoxError, Coerce, CoerceError, Config,
    EnvResolver, Field, FieldWriteError, Fields, LayeredResolver, MapResolver, Resolver, TypeTag,
    Value,
};
