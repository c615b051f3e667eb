//! Populating [`Bindable`] types from a [`Resolver`].

use tracing::{debug, trace};

use super::coerce::coerce;
use super::env::EnvResolver;
use super::error::{BindError, CoerceError};
use super::field::{Bindable, Field};
use super::source::Resolver;

/// Binds `T` against a fresh snapshot of the process environment.
pub fn bind<T: Bindable>() -> Result<T, BindError> {
    bind_with(&EnvResolver::new())
}

/// Creates a `T` and overwrites its participating fields with values from `resolver`.
///
/// Fields whose key the resolver does not know keep the value `T::instantiate`
/// gave them. The first field that fails to coerce or apply aborts the whole
/// call; the partially populated instance is dropped.
pub fn bind_with<T, R>(resolver: &R) -> Result<T, BindError>
where
    T: Bindable,
    R: Resolver + ?Sized,
{
    let type_name = std::any::type_name::<T>();
    let mut instance = T::instantiate()
        .map_err(|source| BindError::Instantiation { type_name, source })?;

    let fields = T::fields();
    debug!(target_type = type_name, fields = fields.len(), "binding configuration");

    for field in &fields {
        bind_field(&mut instance, field, resolver)?;
    }

    debug!(target_type = type_name, "configuration bound");
    Ok(instance)
}

fn bind_field<T, R>(instance: &mut T, field: &Field<T>, resolver: &R) -> Result<(), BindError>
where
    R: Resolver + ?Sized,
{
    let key = field.effective_key();

    let Some(raw) = resolver.lookup(key) else {
        trace!(field = field.name(), key, "no value for key, keeping default");
        return Ok(());
    };

    let value = match coerce(&raw, field.type_tag()) {
        Ok(Some(value)) => value,
        Ok(None) => {
            trace!(field = field.name(), key, "value is empty, keeping default");
            return Ok(());
        }
        Err(CoerceError::Malformed { target, reason, .. }) => {
            return Err(BindError::Coercion {
                field: field.name(),
                key: key.to_owned(),
                raw,
                target,
                reason,
            });
        }
        Err(CoerceError::Unsupported(type_name)) => {
            return Err(BindError::UnsupportedType {
                field: field.name(),
                key: key.to_owned(),
                type_name,
            });
        }
    };

    field
        .apply(instance, value)
        .map_err(|source| BindError::FieldWrite {
            field: field.name(),
            key: key.to_owned(),
            source,
        })?;

    trace!(field = field.name(), key, "applied configured value");
    Ok(())
}
