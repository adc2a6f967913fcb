//! Identifier casing and table-name pluralization.

/// Controls whether derived table names are pluralized.
///
/// This is explicit configuration on the [`Mapping`](crate::Mapping) rather
/// than a process-wide switch, so two mappings with different conventions can
/// coexist.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableNames {
    /// `User` maps to the `user` table.
    Singular,
    /// `User` maps to the `users` table.
    #[default]
    Plural,
}

/// Converts a PascalCase identifier to a snake_case column name.
///
/// An underscore is inserted only at a case transition boundary (lowercase or
/// digit followed by uppercase), so acronym runs stay together: `UserId`
/// becomes `user_id` while `HTTPStatus` becomes `httpstatus`. The function is
/// idempotent on its own output.
pub fn snake_case(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len() + 4);
    let mut at_boundary = false;

    for ch in identifier.chars() {
        if ch.is_ascii_uppercase() {
            if at_boundary {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
            at_boundary = false;
        } else {
            at_boundary = ch.is_ascii_lowercase() || ch.is_ascii_digit();
            out.push(ch);
        }
    }

    out
}

/// Converts a snake_case column name back to a PascalCase field identifier.
///
/// Inverse of [`snake_case`] for identifiers without ambiguous acronym
/// boundaries: `upper_camel_case(snake_case("UserId"))` is `"UserId"` again.
pub fn upper_camel_case(column: &str) -> String {
    let mut out = String::with_capacity(column.len());

    for part in column.split('_') {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    out
}

/// Ordered suffix substitutions, first match wins. The `ss` rule must come
/// before the generic trailing-`s` rule so `class` becomes `classes`.
const PLURAL_RULES: &[(&str, &str)] = &[
    ("ch", "ches"),
    ("ss", "sses"),
    ("sh", "shes"),
    ("day", "days"),
    ("y", "ies"),
    ("x", "xes"),
    ("s", "ses"),
];

/// Applies English pluralization rules to a singular table name.
pub fn pluralize(singular: &str) -> String {
    for (suffix, replacement) in PLURAL_RULES {
        if let Some(stem) = singular.strip_suffix(suffix) {
            return format!("{stem}{replacement}");
        }
    }
    format!("{singular}s")
}
