//! SQLite storage type tags.

use relmap::{Dialect, Value};

#[derive(Debug, Default, Clone, Copy)]
pub struct Sqlite;

impl Sqlite {
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for Sqlite {
    fn sql_tag(&self, value: &Value, size: Option<u32>) -> String {
        match value {
            // Nullable columns are typed by their inner value.
            Value::Nullable(nullable) => self.sql_tag(&nullable.value, size),
            Value::Bool(_) => "bool".to_string(),
            Value::I32(_) => "integer".to_string(),
            Value::I64(_) => "bigint".to_string(),
            Value::F64(_) => "real".to_string(),
            Value::Timestamp(_) => "datetime".to_string(),
            Value::String(_) => match size {
                Some(size) if size > 0 && size < 65532 => format!("varchar({size})"),
                _ => "text".to_string(),
            },
            _ => "text".to_string(),
        }
    }

    fn primary_key_tag(&self, _value: &Value, _size: Option<u32>) -> String {
        "integer primary key autoincrement".to_string()
    }
}
