//! Chart configuration, both as a form template presented to the user and as
//! the choices the user made with it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Sentinel value for an optional visual channel that is not in use.
pub const NONE: &str = "None";

/// A single entry of a chart's configuration form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigField {
    pub field_name: String,
    /// The values a user may choose from, if this field is a selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_set: Option<Vec<String>>,
    // Labels, field types, defaults and the like are only meaningful to the
    // form renderer.
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl ConfigField {
    pub fn new<N: AsRef<str>>(field_name: N) -> Self {
        Self {
            field_name: field_name.as_ref().to_string(),
            value_set: None,
            extra: Map::new(),
        }
    }
}

/// The ordered configuration form for a chart type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartTemplateConfig(Vec<ConfigField>);

impl ChartTemplateConfig {
    pub fn new(fields: Vec<ConfigField>) -> Self {
        Self(fields)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigField> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ConfigField> {
        self.0.iter_mut()
    }

    /// Look up a form entry by its field name.
    pub fn get<N: AsRef<str>>(&self, field_name: N) -> Option<&ConfigField> {
        self.0
            .iter()
            .find(|f| f.field_name == field_name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<ConfigField>> for ChartTemplateConfig {
    fn from(fields: Vec<ConfigField>) -> Self {
        Self(fields)
    }
}

/// The on-disk shape of a chart template resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateResource {
    pub config: ChartTemplateConfig,
}

/// The choices a user made in a scatter chart's configuration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserChartConfig {
    pub x: String,
    pub y: String,
    #[serde(default = "none_sentinel")]
    pub color: String,
    #[serde(default = "none_sentinel")]
    pub size: String,
}

impl UserChartConfig {
    /// A configuration plotting `y` against `x`, with no color or size
    /// channel.
    pub fn new<X: AsRef<str>, Y: AsRef<str>>(x: X, y: Y) -> Self {
        Self {
            x: x.as_ref().to_string(),
            y: y.as_ref().to_string(),
            color: none_sentinel(),
            size: none_sentinel(),
        }
    }

    pub fn with_color<C: AsRef<str>>(mut self, color: C) -> Self {
        self.color = color.as_ref().to_string();
        self
    }

    pub fn with_size<S: AsRef<str>>(mut self, size: S) -> Self {
        self.size = size.as_ref().to_string();
        self
    }
}

fn none_sentinel() -> String {
    NONE.to_string()
}
