use crate::Value;

/// Persistence ordering of an association relative to the owning record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssociationRole {
    /// The owner references this record: it must be persisted first so its
    /// generated key can populate the owner's foreign-key column.
    Before,

    /// This record references the owner: it is persisted once the owner's
    /// own key is known.
    After,
}

/// Classified metadata for one record field.
///
/// Derived once per operation by [`Model::fields`](crate::Model::fields) and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Declared field identifier, e.g. `"CreatedAt"`.
    pub name: &'static str,

    /// snake_case column name, e.g. `"created_at"`.
    pub db_name: String,

    /// The field's value at classification time.
    pub value: Value,

    /// Dialect-resolved storage type tag. `None` means the field is not a
    /// persisted column (association, or suppressed via a `-` tag).
    pub storage_type: Option<String>,

    /// True iff `db_name` equals the primary-key column name.
    pub is_primary_key: bool,

    /// True iff the value equaled its type's zero value when classification
    /// began, before any timestamp autofill.
    pub is_blank: bool,

    /// True for a timestamp field named `created_at`.
    pub auto_create_time: bool,

    /// True for a timestamp field named `updated_at`.
    pub auto_update_time: bool,

    /// Set when the field links to another record.
    pub association: Option<AssociationRole>,

    /// Identifier of the linking field when an association was detected.
    pub foreign_key: Option<String>,
}

impl FieldDescriptor {
    /// True if the field maps to a table column.
    pub fn is_persisted(&self) -> bool {
        self.storage_type.is_some()
    }

    pub fn is_association(&self) -> bool {
        self.association.is_some()
    }
}
