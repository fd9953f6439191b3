//! Types understood by the visualization grammar renderer.

use serde::{Deserialize, Serialize};

use crate::FieldSchema;

/// Column metadata for a visualization grammar data table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Column names, in the same order as the values of each row.
    pub names: Vec<String>,
    /// Scale type for each column (`linear`, `ordinal` or `time`).
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTable {
    pub metadata: Metadata,
}

/// The renderer's own schema representation. A list of tables, of which
/// charts only ever use the first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VizSchema(Vec<DataTable>);

impl VizSchema {
    /// Column names of the primary table.
    pub fn names(&self) -> &[String] {
        self.0
            .first()
            .map(|t| t.metadata.names.as_slice())
            .unwrap_or(&[])
    }

    pub fn tables(&self) -> &[DataTable] {
        &self.0
    }
}

/// Converts a host field schema into the renderer's schema, preserving field
/// order and names.
pub fn to_viz_grammar_schema(schema: &FieldSchema) -> VizSchema {
    let mut metadata = Metadata::default();
    for field in schema.iter() {
        metadata.names.push(field.field_name.clone());
        metadata.types.push(scale_type(&field.field_type).to_string());
    }
    VizSchema(vec![DataTable { metadata }])
}

fn scale_type(field_type: &str) -> &'static str {
    match field_type.to_ascii_lowercase().as_str() {
        "int" | "long" | "float" | "double" => "linear",
        "time" | "timestamp" => "time",
        _ => "ordinal",
    }
}

/// One plot within a chart specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartEntry {
    #[serde(rename = "type")]
    pub chart_type: String,
    pub y: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// The renderer's instructions for drawing a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub x: String,
    pub charts: Vec<ChartEntry>,
}
