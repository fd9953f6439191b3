//! Host-supplied descriptions of the data a gadget receives.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// A single data record, mapping field names to their values.
pub type Record = Map<String, JsonValue>;

/// Describes one column of the data available to a gadget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub field_name: String,
    #[serde(rename = "type", default)]
    pub field_type: String,
    // Anything else the host attaches to a field is carried along untouched.
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Field {
    /// Convenience constructor for a field without any extra properties.
    pub fn new<N, T>(field_name: N, field_type: T) -> Self
    where
        N: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            field_name: field_name.as_ref().to_string(),
            field_type: field_type.as_ref().to_string(),
            extra: Map::new(),
        }
    }
}

/// The ordered set of columns available to a gadget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSchema(Vec<Field>);

impl FieldSchema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self(fields)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.0.iter()
    }

    /// Field names, in schema order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|f| f.field_name.as_str())
    }
}

impl From<Vec<Field>> for FieldSchema {
    fn from(fields: Vec<Field>) -> Self {
        Self(fields)
    }
}
