use crate::dialect::{Dialect, Tag};
use crate::field::{AssociationRole, FieldDescriptor};
use crate::name::{self, TableNames};
use crate::record::{Record, RecordField};
use crate::value::Value;
use crate::{err, Error, Errors};

use indexmap::IndexMap;
use jiff::Timestamp;
use std::collections::HashMap;

/// Identifier of the conventional primary-key field.
const PRIMARY_KEY_FIELD: &str = "Id";

/// snake_case form of [`PRIMARY_KEY_FIELD`].
const PRIMARY_KEY_COLUMN: &str = "id";

const CREATED_AT_COLUMN: &str = "created_at";
const UPDATED_AT_COLUMN: &str = "updated_at";

/// The operation a classification pass serves. Controls timestamp autofill
/// and keys the per-handle metadata cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operation {
    /// Insert-shaped pass: fills zero-valued `created_at`/`updated_at`.
    Create,

    /// Update-shaped pass: unconditionally refreshes `updated_at`.
    Update,

    /// Read-only pass with no side effects.
    Inspect,
}

/// Shared mapping configuration: the dialect used for storage type tags and
/// the table-naming convention. One `Mapping` hands out any number of
/// per-operation [`Model`] handles.
pub struct Mapping {
    dialect: Box<dyn Dialect>,
    table_names: TableNames,
}

impl Mapping {
    pub fn new(dialect: impl Dialect + 'static) -> Self {
        Self::with_table_names(dialect, TableNames::default())
    }

    pub fn with_table_names(dialect: impl Dialect + 'static, table_names: TableNames) -> Self {
        Self {
            dialect: Box::new(dialect),
            table_names,
        }
    }

    /// Binds a record to a new handle for one logical operation.
    pub fn model<'a>(&'a self, record: &'a mut dyn Record, errors: &'a Errors) -> Model<'a> {
        Model {
            mapping: self,
            record: Some(record),
            errors,
            cache: HashMap::new(),
        }
    }

    /// A handle with no record bound. Metadata queries degrade to empty
    /// results and report through the sink instead of panicking.
    pub fn unbound_model<'a>(&'a self, errors: &'a Errors) -> Model<'a> {
        Model {
            mapping: self,
            record: None,
            errors,
            cache: HashMap::new(),
        }
    }
}

/// A per-operation handle over one borrowed record.
///
/// The handle memoizes classified field sets per [`Operation`]; metadata is
/// computed at most once per distinct operation and never invalidated within
/// the handle's lifetime. Callers needing fresh metadata construct a new
/// handle. One handle belongs to exactly one logical flow: classification
/// under `Create`/`Update` mutates the record in place, so the handle is
/// deliberately neither `Sync` nor designed for concurrent use.
pub struct Model<'a> {
    mapping: &'a Mapping,
    record: Option<&'a mut dyn Record>,
    errors: &'a Errors,
    cache: HashMap<Operation, Vec<FieldDescriptor>>,
}

impl Model<'_> {
    /// Classifies the record's fields for `operation`, memoized per
    /// operation.
    ///
    /// The first `Create`/`Update` call runs timestamp autofill before the
    /// (otherwise read-only) classification pass; because the result is
    /// cached, the autofill side effect executes at most once per operation
    /// per handle. Blank state always reflects the values before autofill,
    /// so a just-filled timestamp reports blank with its new value.
    pub fn fields(&mut self, operation: Operation) -> &[FieldDescriptor] {
        if !self.cache.contains_key(&operation) {
            let fields = self.classify(operation);
            self.cache.insert(operation, fields);
        }
        &self.cache[&operation]
    }

    /// The timestamp-autofill step, independently callable so classification
    /// can be verified without observing mutation.
    ///
    /// `Create` fills `created_at` and `updated_at` only when currently
    /// zero, both with the same instant. `Update` overwrites `updated_at`
    /// unconditionally. `Inspect` does nothing.
    pub fn touch_timestamps(&mut self, operation: Operation) {
        if let Some(record) = self.record.as_deref_mut() {
            touch_timestamps(record, operation);
        }
    }

    /// Non-blank fields for `operation`.
    pub fn columns_with_value(&mut self, operation: Operation) -> Vec<FieldDescriptor> {
        self.fields(operation)
            .iter()
            .filter(|field| !field.is_blank)
            .cloned()
            .collect()
    }

    /// Column name to value pairs for a write payload: every persisted,
    /// non-primary-key column, blank or not, in declaration order.
    pub fn columns_for_write(&mut self, operation: Operation) -> IndexMap<String, Value> {
        if self.record.is_none() {
            return IndexMap::new();
        }

        self.fields(operation)
            .iter()
            .filter(|field| !field.is_primary_key && field.is_persisted())
            .map(|field| (field.db_name.clone(), field.value.clone()))
            .collect()
    }

    /// Merges a column-keyed value map onto the record, reporting whether
    /// any value actually changed.
    ///
    /// Column names are converted back to field identifiers; keys with no
    /// matching field are skipped silently. Integer values are coerced
    /// between widths. When the map carries a non-null `updated_at` value
    /// and anything changed, the update timestamp is stamped with the
    /// current time so freshness is driven by "did anything change" rather
    /// than by the caller's own timestamp value.
    ///
    /// With no record bound the map is treated as already-final output and
    /// this reports changed unconditionally.
    pub fn apply_column_values(&mut self, values: &IndexMap<String, Value>) -> bool {
        let Some(record) = self.record.as_deref_mut() else {
            return true;
        };

        let mut any_changed = false;

        for (column, value) in values {
            let field_name = name::upper_camel_case(column);
            let fields = record.fields();
            let Some(current) = fields.iter().find(|field| field.name == field_name) else {
                continue;
            };

            let differs = match (current.value.as_int(), value.as_int()) {
                (Some(current), Some(new)) => current != new,
                _ => current.value != *value,
            };

            if differs {
                if record.set_field(&field_name, value.clone()) {
                    any_changed = true;
                } else {
                    self.errors
                        .report(err!("field {field_name} rejected value {value:?}"));
                }
            }
        }

        let stamp = values
            .get(UPDATED_AT_COLUMN)
            .is_some_and(|value| !value.is_null());
        if any_changed && stamp {
            record.set_field(
                &name::upper_camel_case(UPDATED_AT_COLUMN),
                Value::Timestamp(Timestamp::now()),
            );
        }

        any_changed
    }

    /// Non-blank associations that must be persisted before the record.
    pub fn before_associations(&mut self) -> Vec<FieldDescriptor> {
        self.association_fields(AssociationRole::Before)
    }

    /// Non-blank associations that must be persisted after the record.
    pub fn after_associations(&mut self) -> Vec<FieldDescriptor> {
        self.association_fields(AssociationRole::After)
    }

    fn association_fields(&mut self, role: AssociationRole) -> Vec<FieldDescriptor> {
        self.fields(Operation::Inspect)
            .iter()
            .filter(|field| field.association == Some(role) && !field.is_blank)
            .cloned()
            .collect()
    }

    /// Resolves the record's table name: an explicit override wins, else the
    /// type name is snake-cased and pluralized per the mapping's convention.
    pub fn table_name(&self) -> String {
        let Some(record) = self.record.as_deref() else {
            self.errors.report(Error::model_not_set());
            return String::new();
        };

        if let Some(table_name) = record.table_name() {
            return table_name;
        }

        let singular = name::snake_case(record.type_name());
        match self.mapping.table_names {
            TableNames::Plural => name::pluralize(&singular),
            TableNames::Singular => singular,
        }
    }

    pub fn primary_key_column(&self) -> &'static str {
        PRIMARY_KEY_COLUMN
    }

    /// The integer value of the primary-key field; 0 when the field is
    /// missing or not an integer, -1 when no record is bound.
    pub fn primary_key_value(&self) -> i64 {
        let Some(record) = self.record.as_deref() else {
            return -1;
        };

        record
            .fields()
            .iter()
            .find(|field| field.name == PRIMARY_KEY_FIELD)
            .and_then(|field| field.value.as_int())
            .unwrap_or(0)
    }

    /// True when the primary key has not been assigned yet.
    pub fn primary_key_unset(&self) -> bool {
        self.primary_key_value() <= 0
    }

    fn classify(&mut self, operation: Operation) -> Vec<FieldDescriptor> {
        let Some(record) = self.record.as_deref_mut() else {
            self.errors.report(Error::model_not_set());
            return Vec::new();
        };

        // Blank state is decided from the values as found; a timestamp the
        // autofill below fills in still classifies as blank.
        let mut fields = record.fields();
        let pre_blank: Vec<bool> = fields.iter().map(|field| field.value.is_blank()).collect();

        if matches!(operation, Operation::Create | Operation::Update) {
            touch_timestamps(&mut *record, operation);
            fields = record.fields();
        }

        let type_name = record.type_name();

        fields
            .iter()
            .zip(&pre_blank)
            .map(|(field, &is_blank)| describe(self.mapping, type_name, &fields, field, is_blank))
            .collect()
    }
}

fn touch_timestamps(record: &mut dyn Record, operation: Operation) {
    let now = Timestamp::now();

    for field in record.fields() {
        let Value::Timestamp(current) = field.value else {
            continue;
        };

        let db_name = name::snake_case(field.name);
        let fill = match operation {
            Operation::Create => {
                (db_name == CREATED_AT_COLUMN || db_name == UPDATED_AT_COLUMN)
                    && current == Timestamp::UNIX_EPOCH
            }
            Operation::Update => db_name == UPDATED_AT_COLUMN,
            Operation::Inspect => false,
        };

        if fill {
            record.set_field(field.name, Value::Timestamp(now));
        }
    }
}

/// Classifies one field: column naming, storage typing, and association
/// role, per the rules in the crate docs. `is_blank` is the field's blank
/// state before any autofill ran.
fn describe(
    mapping: &Mapping,
    owner_type: &str,
    siblings: &[RecordField],
    field: &RecordField,
    is_blank: bool,
) -> FieldDescriptor {
    let db_name = name::snake_case(field.name);
    let is_primary_key = db_name == PRIMARY_KEY_COLUMN;
    let is_timestamp = field.value.is_timestamp();
    let auto_create_time = is_timestamp && db_name == CREATED_AT_COLUMN;
    let auto_update_time = is_timestamp && db_name == UPDATED_AT_COLUMN;

    let mut storage_type = None;
    let mut association = None;
    let mut foreign_key = None;

    if is_timestamp || is_primary_key {
        storage_type = resolve_storage_type(mapping, field, is_primary_key);
    } else {
        match &field.value {
            Value::Collection(collection) => {
                let key = format!("{owner_type}Id");
                if collection.element_has_field(&key) {
                    foreign_key = Some(key);
                }
                association = Some(AssociationRole::After);
            }
            Value::Embedded(embedded) => {
                let sibling_key = format!("{}Id", field.name);
                if siblings.iter().any(|sibling| sibling.name == sibling_key) {
                    foreign_key = Some(sibling_key);
                    association = Some(AssociationRole::Before);
                } else {
                    let key = format!("{owner_type}Id");
                    if embedded.has_field(&key) {
                        foreign_key = Some(key);
                    }
                    association = Some(AssociationRole::After);
                }
            }
            // Nullable values and every scalar kind are plain columns.
            _ => {
                storage_type = resolve_storage_type(mapping, field, false);
            }
        }
    }

    FieldDescriptor {
        name: field.name,
        db_name,
        value: field.value.clone(),
        storage_type,
        is_primary_key,
        is_blank,
        auto_create_time,
        auto_update_time,
        association,
        foreign_key,
    }
}

/// Resolves the storage type tag for a persisted field, honoring the
/// declared tag override before falling back to the dialect.
fn resolve_storage_type(
    mapping: &Mapping,
    field: &RecordField,
    is_primary_key: bool,
) -> Option<String> {
    let tag = Tag::parse(field.tag);

    if tag.skip {
        return None;
    }

    let mut ty = match tag.ty {
        Some(ty) => ty,
        None if is_primary_key => mapping.dialect.primary_key_tag(&field.value, tag.size),
        None => mapping.dialect.sql_tag(&field.value, tag.size),
    };

    if let Some(modifiers) = &tag.modifiers {
        ty.push(' ');
        ty.push_str(modifiers);
    }

    Some(ty)
}
