use crate::record::{Record, RecordField, RecordType};
use crate::{Error, Result};

use jiff::Timestamp;

/// Maximum nesting depth considered when deciding whether an embedded record
/// is blank. Self-referential record shapes bottom out here instead of
/// recursing without bound; anything deeper counts as non-blank.
pub(crate) const MAX_EMBED_DEPTH: usize = 32;

/// A runtime snapshot of one field value.
///
/// Records surface their field values through this enum instead of language
/// reflection; the classifier dispatches on the variant to derive blank
/// state, storage typing, and association roles.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Null value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit floating point value
    F64(f64),

    /// String value
    String(String),

    /// An instant in time. `Timestamp::UNIX_EPOCH` is the zero value.
    Timestamp(Timestamp),

    /// A sequence of scalar values
    List(Vec<Value>),

    /// A value with an explicit validity flag, the nullable-column capability
    Nullable(Nullable),

    /// A single nested record
    Embedded(EmbeddedRecord),

    /// A sequence of nested records
    Collection(Collection),
}

/// A value paired with a validity flag.
///
/// The inner value is always present so storage typing can inspect it even
/// when invalid; blankness is decided by the flag alone.
#[derive(Debug, Clone, PartialEq)]
pub struct Nullable {
    pub valid: bool,
    pub value: Box<Value>,
}

impl Nullable {
    pub fn valid(value: impl Into<Value>) -> Self {
        Self {
            valid: true,
            value: Box::new(value.into()),
        }
    }

    /// An invalid value. `zero` carries the underlying type so the dialect
    /// can still resolve a storage tag.
    pub fn invalid(zero: impl Into<Value>) -> Self {
        Self {
            valid: false,
            value: Box::new(zero.into()),
        }
    }
}

/// Snapshot of a nested record: its type name plus sub-fields in declaration
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedRecord {
    pub type_name: &'static str,
    pub fields: Vec<RecordField>,
}

impl EmbeddedRecord {
    pub fn snapshot<R: Record + ?Sized>(record: &R) -> Self {
        Self {
            type_name: record.type_name(),
            fields: record.fields(),
        }
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|field| field.name == name)
    }
}

/// Snapshot of a sequence of nested records.
///
/// The element type's field names are carried statically so foreign-key
/// detection works even when the sequence is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub element_type: &'static str,
    pub element_fields: &'static [&'static str],
    pub items: Vec<EmbeddedRecord>,
}

impl Collection {
    pub fn element_has_field(&self, name: &str) -> bool {
        self.element_fields.contains(&name)
    }
}

impl Value {
    /// Wraps a nested record.
    pub fn embedded<R: Record>(record: &R) -> Self {
        Self::Embedded(EmbeddedRecord::snapshot(record))
    }

    /// Wraps a sequence of nested records.
    pub fn collection<R: RecordType>(items: &[R]) -> Self {
        Self::Collection(Collection {
            element_type: R::TYPE_NAME,
            element_fields: R::FIELD_NAMES,
            items: items.iter().map(EmbeddedRecord::snapshot).collect(),
        })
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_timestamp(&self) -> bool {
        matches!(self, Self::Timestamp(_))
    }

    /// True if the value equals its type's zero value.
    ///
    /// An embedded record is blank iff all of its sub-fields are blank,
    /// recursively, up to a fixed depth cap.
    pub fn is_blank(&self) -> bool {
        self.is_blank_at(0)
    }

    fn is_blank_at(&self, depth: usize) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(value) => !value,
            Self::I32(value) => *value == 0,
            Self::I64(value) => *value == 0,
            Self::F64(value) => *value == 0.0,
            Self::String(value) => value.is_empty(),
            Self::Timestamp(value) => *value == Timestamp::UNIX_EPOCH,
            Self::List(items) => items.is_empty(),
            Self::Nullable(nullable) => !nullable.valid,
            Self::Collection(collection) => collection.items.is_empty(),
            Self::Embedded(embedded) => {
                if depth >= MAX_EMBED_DEPTH {
                    return false;
                }
                embedded
                    .fields
                    .iter()
                    .all(|field| field.value.is_blank_at(depth + 1))
            }
        }
    }

    /// The value's integer magnitude, if it holds one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::I32(value) => Some(i64::from(*value)),
            Self::I64(value) => Some(*value),
            _ => None,
        }
    }

    pub fn to_i64(self) -> Result<i64> {
        match self {
            Self::I32(value) => Ok(i64::from(value)),
            Self::I64(value) => Ok(value),
            _ => Err(Error::type_conversion(&self, "i64")),
        }
    }

    pub fn to_i32(self) -> Result<i32> {
        match self {
            Self::I32(value) => Ok(value),
            Self::I64(value) => {
                i32::try_from(value).map_err(|_| Error::type_conversion(&Self::I64(value), "i32"))
            }
            _ => Err(Error::type_conversion(&self, "i32")),
        }
    }

    pub fn to_f64(self) -> Result<f64> {
        match self {
            Self::F64(value) => Ok(value),
            Self::I32(value) => Ok(f64::from(value)),
            Self::I64(value) => Ok(value as f64),
            _ => Err(Error::type_conversion(&self, "f64")),
        }
    }

    pub fn to_bool(self) -> Result<bool> {
        match self {
            Self::Bool(value) => Ok(value),
            _ => Err(Error::type_conversion(&self, "bool")),
        }
    }

    pub fn to_string(self) -> Result<String> {
        match self {
            Self::String(value) => Ok(value),
            _ => Err(Error::type_conversion(&self, "String")),
        }
    }

    pub fn to_timestamp(self) -> Result<Timestamp> {
        match self {
            Self::Timestamp(value) => Ok(value),
            _ => Err(Error::type_conversion(&self, "Timestamp")),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Variant name, used in type-conversion error messages.
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool(_) => "Bool",
            Self::I32(_) => "I32",
            Self::I64(_) => "I64",
            Self::F64(_) => "F64",
            Self::String(_) => "String",
            Self::Timestamp(_) => "Timestamp",
            Self::List(_) => "List",
            Self::Nullable(_) => "Nullable",
            Self::Embedded(_) => "Embedded",
            Self::Collection(_) => "Collection",
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I32(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<Timestamp> for Value {
    fn from(src: Timestamp) -> Self {
        Self::Timestamp(src)
    }
}

impl From<Nullable> for Value {
    fn from(src: Nullable) -> Self {
        Self::Nullable(src)
    }
}

impl<T> From<Option<T>> for Value
where
    Self: From<T>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::from(value),
            None => Self::Null,
        }
    }
}
