use crate::Value;

/// A caller-supplied record instance that can describe and mutate itself.
///
/// Implementations surface every exported, non-embedded field in declaration
/// order. The engine never stores a record; handles borrow the caller's
/// instance for the duration of one operation and may mutate it in place
/// through [`set_field`](Record::set_field) (timestamp autofill, column-value
/// application).
pub trait Record {
    /// The record type's own identifier, e.g. `"User"`.
    fn type_name(&self) -> &'static str;

    /// Explicit table-name override. When present it is used verbatim,
    /// bypassing snake-case derivation and pluralization.
    fn table_name(&self) -> Option<String> {
        None
    }

    /// The record's fields, in declaration order.
    fn fields(&self) -> Vec<RecordField>;

    /// Assigns a new value to the named field, converting representation as
    /// needed. Returns false when the field does not exist or the value
    /// cannot be converted.
    fn set_field(&mut self, name: &str, value: Value) -> bool;
}

/// Static shape of a record type, independent of any instance.
///
/// Needed wherever structure must be known without a value at hand, e.g.
/// foreign-key detection on an empty [`Collection`](crate::Collection).
pub trait RecordType: Record {
    const TYPE_NAME: &'static str;

    /// Field identifiers in declaration order.
    const FIELD_NAMES: &'static [&'static str];
}

/// One field of a record: identifier, optional declared type tag, and the
/// current value.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    pub name: &'static str,

    /// Declared type-tag override, e.g. `"size:255"`, `"type:uuid"`, or `"-"`
    /// to suppress persistence. See [`Tag`](crate::dialect::Tag).
    pub tag: Option<&'static str>,

    pub value: Value,
}

impl RecordField {
    pub fn new(name: &'static str, value: impl Into<Value>) -> Self {
        Self {
            name,
            tag: None,
            value: value.into(),
        }
    }

    pub fn with_tag(name: &'static str, tag: &'static str, value: impl Into<Value>) -> Self {
        Self {
            name,
            tag: Some(tag),
            value: value.into(),
        }
    }
}
