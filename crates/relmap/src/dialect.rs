//! Storage-type tagging boundary.
//!
//! Dialects turn a representative [`Value`] into the type string used when
//! generating column definitions. SQL construction and execution live behind
//! this boundary and are out of scope for the engine.

use crate::Value;

/// Resolves storage type tags for a specific database.
pub trait Dialect {
    /// Type tag for a plain column holding values shaped like `value`.
    fn sql_tag(&self, value: &Value, size: Option<u32>) -> String;

    /// Type tag for the primary-key column.
    fn primary_key_tag(&self, value: &Value, size: Option<u32>) -> String;
}

/// A parsed per-field type-tag override.
///
/// Tags are semicolon-separated items: `type:T` fixes the storage type,
/// `size:N` supplies a size hint, a lone `-` suppresses persistence entirely,
/// and anything else accumulates into the modifier string appended after the
/// resolved type (e.g. `not null;unique`). Malformed items are ignored and
/// resolution falls through to dialect defaults.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tag {
    /// The field is not persisted at all.
    pub skip: bool,

    /// Explicit storage type, bypassing the dialect.
    pub ty: Option<String>,

    /// Additional column modifiers, space-joined.
    pub modifiers: Option<String>,

    /// Size hint forwarded to the dialect.
    pub size: Option<u32>,
}

impl Tag {
    pub fn parse(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return Self::default();
        };

        let mut parsed = Self::default();
        let mut modifiers = Vec::new();

        for item in tag.split(';').map(str::trim).filter(|item| !item.is_empty()) {
            if item == "-" {
                parsed.skip = true;
            } else if let Some(size) = item.strip_prefix("size:") {
                parsed.size = size.trim().parse().ok();
            } else if let Some(ty) = item.strip_prefix("type:") {
                let ty = ty.trim();
                if !ty.is_empty() {
                    parsed.ty = Some(ty.to_string());
                }
            } else {
                modifiers.push(item);
            }
        }

        if !modifiers.is_empty() {
            parsed.modifiers = Some(modifiers.join(" "));
        }

        parsed
    }
}
