use thiserror::Error;

use super::coerce::TypeTag;

/// Boxed error returned by a failing [`Bindable::instantiate`](super::Bindable::instantiate).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindError {
    #[error("could not create instance of '{type_name}': {source}")]
    Instantiation {
        type_name: &'static str,
        source: BoxError,
    },

    #[error("invalid value '{raw}' for field '{field}' (key '{key}'), expected {target}: {reason}")]
    Coercion {
        field: &'static str,
        key: String,
        raw: String,
        target: TypeTag,
        reason: String,
    },

    #[error("field '{field}' (key '{key}') has unsupported type '{type_name}'")]
    UnsupportedType {
        field: &'static str,
        key: String,
        type_name: &'static str,
    },

    #[error("failed to set configuration field '{field}' (key '{key}'): {source}")]
    FieldWrite {
        field: &'static str,
        key: String,
        source: FieldWriteError,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CoerceError {
    #[error("cannot convert '{raw}' to {target}: {reason}")]
    Malformed {
        raw: String,
        target: TypeTag,
        reason: String,
    },

    #[error("no conversion available for type '{0}'")]
    Unsupported(&'static str),
}

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum FieldWriteError {
    #[error("field holds {expected} but was given {found}")]
    Mismatch {
        expected: TypeTag,
        found: &'static str,
    },
}
