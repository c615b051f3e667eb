//! Static field tables describing which fields of a type take part in binding.

use std::fmt;

use super::coerce::{Coerce, TypeTag, Value};
use super::error::{BoxError, FieldWriteError};

/// A type that can be populated from external configuration.
///
/// ```
/// use envbind::{Bindable, BoxError, Fields};
///
/// #[derive(Debug, Default)]
/// struct Server {
///     host: String,
///     port: u16,
///     name: String,
/// }
///
/// impl Bindable for Server {
///     fn instantiate() -> Result<Self, BoxError> {
///         Ok(Self {
///             host: "127.0.0.1".into(),
///             port: 8080,
///             ..Self::default()
///         })
///     }
///
///     fn fields() -> Fields<Self> {
///         Fields::<Self>::new()
///             .keyed("host", "SERVER_HOST", |s| &mut s.host)
///             .keyed("port", "SERVER_PORT", |s| &mut s.port)
///         // `name` is not listed, so binding never touches it.
///     }
/// }
/// ```
pub trait Bindable: Sized {
    /// Zero-argument construction path. The returned instance supplies the
    /// defaults for every field the resolver has no value for.
    fn instantiate() -> Result<Self, BoxError>;

    /// The participating fields.
    fn fields() -> Fields<Self>;
}

type ApplyFn<T> = Box<dyn Fn(&mut T, Value) -> Result<(), FieldWriteError> + Send + Sync>;

/// One participating field.
pub struct Field<T> {
    name: &'static str,
    declared_key: Option<String>,
    type_tag: TypeTag,
    apply: ApplyFn<T>,
}

impl<T> Field<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn declared_key(&self) -> Option<&str> {
        self.declared_key.as_deref()
    }

    /// The key used to query the resolver: the declared key when it is
    /// non-empty, the field name otherwise.
    pub fn effective_key(&self) -> &str {
        match self.declared_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => self.name,
        }
    }

    pub fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    pub(crate) fn apply(&self, target: &mut T, value: Value) -> Result<(), FieldWriteError> {
        (self.apply)(target, value)
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("declared_key", &self.declared_key)
            .field("type_tag", &self.type_tag)
            .finish_non_exhaustive()
    }
}

/// Builder for the field table of a [`Bindable`] type.
#[must_use]
pub struct Fields<T> {
    fields: Vec<Field<T>>,
}

impl<T> Fields<T> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Adds a field looked up under its own name.
    pub fn field<F>(self, name: &'static str, access: fn(&mut T) -> &mut F) -> Self
    where
        F: Coerce + 'static,
        T: 'static,
    {
        self.push_typed(name, None, access)
    }

    /// Adds a field looked up under `key`. An empty key falls back to the field name.
    pub fn keyed<F>(
        self,
        name: &'static str,
        key: impl Into<String>,
        access: fn(&mut T) -> &mut F,
    ) -> Self
    where
        F: Coerce + 'static,
        T: 'static,
    {
        self.push_typed(name, Some(key.into()), access)
    }

    /// Adds a field with an explicit type tag and write function.
    ///
    /// For descriptors assembled at runtime. Unlike [`field`](Self::field), the
    /// type is not checked at compile time: a tag without a coercion rule fails
    /// the bind with an unsupported-type error, and `apply` may reject values.
    pub fn raw<A>(
        mut self,
        name: &'static str,
        key: Option<String>,
        type_tag: TypeTag,
        apply: A,
    ) -> Self
    where
        A: Fn(&mut T, Value) -> Result<(), FieldWriteError> + Send + Sync + 'static,
    {
        self.fields.push(Field {
            name,
            declared_key: key,
            type_tag,
            apply: Box::new(apply),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field<T>> {
        self.fields.iter()
    }

    fn push_typed<F>(
        mut self,
        name: &'static str,
        declared_key: Option<String>,
        access: fn(&mut T) -> &mut F,
    ) -> Self
    where
        F: Coerce + 'static,
        T: 'static,
    {
        self.fields.push(Field {
            name,
            declared_key,
            type_tag: F::TYPE,
            apply: Box::new(move |target: &mut T, value: Value| {
                let found = value.kind();
                let value = F::from_value(value).ok_or(FieldWriteError::Mismatch {
                    expected: F::TYPE,
                    found,
                })?;
                *access(target) = value;
                Ok(())
            }),
        });
        self
    }
}

impl<T> Default for Fields<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Fields<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.fields).finish()
    }
}

impl<'a, T> IntoIterator for &'a Fields<T> {
    type Item = &'a Field<T>;
    type IntoIter = std::slice::Iter<'a, Field<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Sample {
        simple: String,
        count: i32,
    }

    #[test]
    fn test_effective_key_prefers_declared_key() {
        let fields = Fields::<Sample>::new()
            .keyed("simple", "ONE", |s| &mut s.simple)
            .field("count", |s| &mut s.count);

        let keys: Vec<_> = fields.iter().map(Field::effective_key).collect();
        assert_eq!(keys, ["ONE", "count"]);
    }

    #[test]
    fn test_empty_declared_key_falls_back_to_name() {
        let fields = Fields::<Sample>::new().keyed("simple", "", |s| &mut s.simple);
        let field = fields.iter().next().unwrap();

        assert_eq!(field.declared_key(), Some(""));
        assert_eq!(field.effective_key(), "simple");
    }

    #[test]
    fn test_type_tag_follows_field_type() {
        let fields = Fields::<Sample>::new()
            .field("simple", |s| &mut s.simple)
            .field("count", |s| &mut s.count);

        let tags: Vec<_> = fields.iter().map(Field::type_tag).collect();
        assert_eq!(tags, [TypeTag::String, TypeTag::I32]);
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_apply_writes_matching_value() {
        let fields = Fields::<Sample>::new().field("count", |s| &mut s.count);
        let mut sample = Sample::default();

        fields.iter().next().unwrap().apply(&mut sample, Value::Int(3)).unwrap();
        assert_eq!(sample.count, 3);
    }

    #[test]
    fn test_apply_rejects_mismatched_value() {
        let fields = Fields::<Sample>::new().field("count", |s| &mut s.count);
        let mut sample = Sample::default();

        let err = fields
            .iter()
            .next()
            .unwrap()
            .apply(&mut sample, Value::Bool(true))
            .unwrap_err();
        assert_eq!(
            err,
            FieldWriteError::Mismatch {
                expected: TypeTag::I32,
                found: "bool"
            }
        );
        assert_eq!(sample.count, 0);
    }
}
