//! String-to-value coercion for configuration fields.
//!
//! The policy is strict and locale-free:
//!
//! - `string` and `path` take the raw text unchanged, including the empty string.
//! - For every other type an empty string means "no value" and the field keeps its default.
//! - `bool` accepts `true` / `false` in any letter case and nothing else.
//! - Integers are parsed at the declared width; out-of-range input fails rather than truncating.
//! - Floats accept whatever [`f64::from_str`](std::str::FromStr) accepts, including `inf` and `NaN`,
//!   but a finite literal too large for the declared width fails instead of becoming infinite.
//! - Surrounding whitespace is never trimmed.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::error::CoerceError;

/// Declared type of a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    String,
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Path,
    /// A type with no coercion rule, carrying its name for error reporting.
    Other(&'static str),
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeTag::String => "string",
            TypeTag::Bool => "bool",
            TypeTag::Char => "char",
            TypeTag::I8 => "i8",
            TypeTag::I16 => "i16",
            TypeTag::I32 => "i32",
            TypeTag::I64 => "i64",
            TypeTag::Isize => "isize",
            TypeTag::U8 => "u8",
            TypeTag::U16 => "u16",
            TypeTag::U32 => "u32",
            TypeTag::U64 => "u64",
            TypeTag::Usize => "usize",
            TypeTag::F32 => "f32",
            TypeTag::F64 => "f64",
            TypeTag::Path => "path",
            TypeTag::Other(name) => *name,
        };
        f.write_str(name)
    }
}

/// A coerced configuration value.
///
/// Integers are widened to 64 bits; the declared width was already enforced by [`coerce`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Bool(bool),
    Char(char),
    Int(i64),
    UInt(u64),
    Float(f64),
    Path(PathBuf),
}

impl Value {
    /// Short name of the variant, used in field-write errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::Int(_) => "integer",
            Value::UInt(_) => "unsigned integer",
            Value::Float(_) => "float",
            Value::Path(_) => "path",
        }
    }
}

/// Converts `raw` into a value of the `target` type.
///
/// Returns `Ok(None)` when the input carries no value for the type (an empty
/// string for a non-textual type). The caller should keep the field's default then.
pub fn coerce(raw: &str, target: TypeTag) -> Result<Option<Value>, CoerceError> {
    let value = match target {
        TypeTag::Other(name) => return Err(CoerceError::Unsupported(name)),
        TypeTag::String => Value::String(raw.to_owned()),
        TypeTag::Path => Value::Path(PathBuf::from(raw)),
        _ if raw.is_empty() => return Ok(None),
        TypeTag::Bool => Value::Bool(parse_bool(raw, target)?),
        TypeTag::Char => Value::Char(parse_char(raw, target)?),
        TypeTag::I8 => Value::Int(parse::<i8>(raw, target)?.into()),
        TypeTag::I16 => Value::Int(parse::<i16>(raw, target)?.into()),
        TypeTag::I32 => Value::Int(parse::<i32>(raw, target)?.into()),
        TypeTag::I64 => Value::Int(parse::<i64>(raw, target)?),
        TypeTag::Isize => {
            let n = parse::<isize>(raw, target)?;
            Value::Int(i64::try_from(n).map_err(|e| malformed(raw, target, e))?)
        }
        TypeTag::U8 => Value::UInt(parse::<u8>(raw, target)?.into()),
        TypeTag::U16 => Value::UInt(parse::<u16>(raw, target)?.into()),
        TypeTag::U32 => Value::UInt(parse::<u32>(raw, target)?.into()),
        TypeTag::U64 => Value::UInt(parse::<u64>(raw, target)?),
        TypeTag::Usize => {
            let n = parse::<usize>(raw, target)?;
            Value::UInt(u64::try_from(n).map_err(|e| malformed(raw, target, e))?)
        }
        TypeTag::F32 => Value::Float(parse_float::<f32>(raw, target)?.into()),
        TypeTag::F64 => Value::Float(parse_float::<f64>(raw, target)?),
    };
    Ok(Some(value))
}

fn parse<N>(raw: &str, target: TypeTag) -> Result<N, CoerceError>
where
    N: FromStr,
    N::Err: fmt::Display,
{
    raw.parse::<N>().map_err(|e| malformed(raw, target, e))
}

/// Like [`parse`], but rejects finite literals that overflow to infinity.
fn parse_float<N>(raw: &str, target: TypeTag) -> Result<N, CoerceError>
where
    N: FromStr + Into<f64> + Copy,
    N::Err: fmt::Display,
{
    let n = parse::<N>(raw, target)?;
    let unsigned = raw.trim_start_matches(['+', '-']);
    let spelled_infinite =
        unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity");
    if n.into().is_infinite() && !spelled_infinite {
        return Err(malformed(raw, target, "number out of range"));
    }
    Ok(n)
}

fn parse_bool(raw: &str, target: TypeTag) -> Result<bool, CoerceError> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(malformed(raw, target, "expected 'true' or 'false'"))
    }
}

fn parse_char(raw: &str, target: TypeTag) -> Result<char, CoerceError> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(malformed(raw, target, "expected exactly one character")),
    }
}

fn malformed(raw: &str, target: TypeTag, reason: impl fmt::Display) -> CoerceError {
    CoerceError::Malformed {
        raw: raw.to_owned(),
        target,
        reason: reason.to_string(),
    }
}

/// Field types the binder can populate.
///
/// `TYPE` is handed to [`coerce`]; `from_value` unpacks the result into the field's
/// own type and returns `None` if the value is of a different kind.
pub trait Coerce: Sized {
    const TYPE: TypeTag;

    fn from_value(value: Value) -> Option<Self>;
}

impl Coerce for String {
    const TYPE: TypeTag = TypeTag::String;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Coerce for bool {
    const TYPE: TypeTag = TypeTag::Bool;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl Coerce for char {
    const TYPE: TypeTag = TypeTag::Char;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Char(c) => Some(c),
            _ => None,
        }
    }
}

impl Coerce for PathBuf {
    const TYPE: TypeTag = TypeTag::Path;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Path(p) => Some(p),
            _ => None,
        }
    }
}

macro_rules! coerce_int {
    ($($ty:ty => $tag:ident, $variant:ident;)*) => {
        $(
            impl Coerce for $ty {
                const TYPE: TypeTag = TypeTag::$tag;

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(n) => <$ty>::try_from(n).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

coerce_int! {
    i8 => I8, Int;
    i16 => I16, Int;
    i32 => I32, Int;
    i64 => I64, Int;
    isize => Isize, Int;
    u8 => U8, UInt;
    u16 => U16, UInt;
    u32 => U32, UInt;
    u64 => U64, UInt;
    usize => Usize, UInt;
}

impl Coerce for f64 {
    const TYPE: TypeTag = TypeTag::F64;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }
}

impl Coerce for f32 {
    const TYPE: TypeTag = TypeTag::F32;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            // Produced from an f32 by `coerce`, so narrowing is exact.
            Value::Float(f) => Some(f as f32),
            _ => None,
        }
    }
}

/// Optional fields bind to `Some(v)` when a value is found and keep their default otherwise.
impl<F: Coerce> Coerce for Option<F> {
    const TYPE: TypeTag = F::TYPE;

    fn from_value(value: Value) -> Option<Self> {
        F::from_value(value).map(Some)
    }
}
