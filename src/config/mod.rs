//! Binding of external key/value configuration onto typed fields.

mod bind;
mod builder;
mod coerce;
mod env;
mod error;
mod field;
mod source;

pub use bind::{bind, bind_with};
pub use builder::Config;
pub use coerce::{coerce, Coerce, TypeTag, Value};
pub use env::EnvResolver;
pub use error::{BindError, BoxError, CoerceError, FieldWriteError};
pub use field::{Bindable, Field, Fields};
pub use source::{LayeredResolver, MapResolver, Resolver};
