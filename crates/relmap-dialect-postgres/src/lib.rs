//! PostgreSQL storage type tags.

use relmap::{Dialect, Value};

#[derive(Debug, Default, Clone, Copy)]
pub struct Postgres;

impl Postgres {
    pub fn new() -> Self {
        Self
    }
}

impl Dialect for Postgres {
    fn sql_tag(&self, value: &Value, size: Option<u32>) -> String {
        match value {
            Value::Nullable(nullable) => self.sql_tag(&nullable.value, size),
            Value::Bool(_) => "boolean".to_string(),
            Value::I32(_) => "integer".to_string(),
            Value::I64(_) => "bigint".to_string(),
            Value::F64(_) => "double precision".to_string(),
            Value::Timestamp(_) => "timestamp with time zone".to_string(),
            Value::String(_) => match size {
                Some(size) if size > 0 && size < 65532 => format!("varchar({size})"),
                _ => "text".to_string(),
            },
            _ => "text".to_string(),
        }
    }

    fn primary_key_tag(&self, value: &Value, _size: Option<u32>) -> String {
        match value {
            Value::I64(_) => "bigserial".to_string(),
            _ => "serial".to_string(),
        }
    }
}
