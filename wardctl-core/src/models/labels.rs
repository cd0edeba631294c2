//! Static label tables for the enumerations stored in text columns.
//!
//! Each enum declared through [`labelled_enum!`] carries a `LABELS` table of
//! `(variant, label)` pairs. Display, parsing, serde and SQLite conversion all
//! go through that one table, so the label written to a row is always the
//! label read back.

use super::ValidationError;

/// Look up the label for a variant.
pub(crate) fn label_of<T: Copy + PartialEq>(table: &[(T, &'static str)], value: T) -> &'static str {
    table
        .iter()
        .find(|(variant, _)| *variant == value)
        .map(|(_, label)| *label)
        .unwrap_or("")
}

/// Parse a label, ignoring case and treating `_` / `-` as spaces
/// (so `under-treatment` matches `Under treatment`).
pub(crate) fn parse_label<T: Copy>(
    table: &[(T, &'static str)],
    field: &'static str,
    input: &str,
) -> Result<T, ValidationError> {
    let wanted = normalize(input);
    table
        .iter()
        .find(|(_, label)| normalize(label) == wanted)
        .map(|(variant, _)| *variant)
        .ok_or_else(|| ValidationError::InvalidVariant {
            field,
            value: input.to_owned(),
        })
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '_' | '-' => ' ',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Declare a C-like enum backed by a static label table.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident as $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant paired with the label stored in the database.
            pub const LABELS: &'static [($name, &'static str)] = &[
                $( ($name::$variant, $label) ),+
            ];

            /// Stored / displayed label.
            pub fn as_str(self) -> &'static str {
                $crate::models::labels::label_of(Self::LABELS, self)
            }

            /// Iterate over all variants in declaration order.
            pub fn all() -> impl Iterator<Item = Self> {
                Self::LABELS.iter().map(|(variant, _)| *variant)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $crate::models::labels::parse_label(Self::LABELS, $field, s)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }

        impl rusqlite::types::ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
                Ok(rusqlite::types::ToSqlOutput::from(self.as_str()))
            }
        }

        impl From<$name> for rusqlite::types::Value {
            fn from(value: $name) -> Self {
                rusqlite::types::Value::Text(value.as_str().to_owned())
            }
        }

        impl rusqlite::types::FromSql for $name {
            fn column_result(value: rusqlite::types::ValueRef<'_>) -> rusqlite::types::FromSqlResult<Self> {
                let raw = value.as_str()?;
                raw.parse()
                    .map_err(|err| rusqlite::types::FromSqlError::Other(Box::new(err)))
            }
        }
    };
}

pub(crate) use labelled_enum;
