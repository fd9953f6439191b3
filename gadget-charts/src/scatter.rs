//! Scatter plot chart template.

use eyre::Result;
use log::{debug, error, trace};
use serde_json::Value as JsonValue;

use crate::config::NONE;
use crate::gadget::{RenderStatus, CHART_ID};
use crate::view::{DataMode, DataProvider, ViewDescriptor};
use crate::{
    to_viz_grammar_schema, ChartEntry, ChartSpec, ChartTemplate, ChartTemplateConfig,
    FieldSchema, TemplateLoader, UserChartConfig, Widget,
};

/// Name of the scatter chart's template resource.
pub const SCATTER_CHART: &str = "scatter-chart";

/// Form fields that let the user pick an optional data column.
const COLUMN_FIELDS: &[&str] = &["color", "size"];

/// Scatter plot chart template, plotting one column against another with
/// optional color and point size channels.
#[derive(Debug, Clone)]
pub struct ScatterChart<L> {
    loader: L,
}

impl<L: TemplateLoader> ScatterChart<L> {
    pub fn new(loader: L) -> Self {
        Self { loader }
    }
}

impl<L: TemplateLoader> ChartTemplate for ScatterChart<L> {
    fn get_config(&self, schema: &FieldSchema) -> Result<ChartTemplateConfig> {
        let mut config = self.loader.load(SCATTER_CHART)?;
        let columns = std::iter::once(NONE)
            .chain(schema.field_names())
            .map(String::from)
            .collect::<Vec<String>>();
        for field in config.iter_mut() {
            if COLUMN_FIELDS.contains(&field.field_name.as_str()) {
                field.value_set = Some(columns.clone());
            }
        }
        Ok(config)
    }

    fn validate(&self, _chart_config: &JsonValue) -> bool {
        true
    }

    fn is_provider_required(&self) -> Option<bool> {
        None
    }

    fn draw(
        &self,
        widget: &mut dyn Widget,
        placeholder: &str,
        chart_config: &UserChartConfig,
        schema: &FieldSchema,
        data: Vec<JsonValue>,
    ) -> RenderStatus {
        let schema = to_viz_grammar_schema(schema);
        let names = schema.names().to_vec();
        let view = ViewDescriptor {
            id: CHART_ID.to_string(),
            schema,
            chart_config: build_chart_config(chart_config),
            data_provider: Some(DataProvider::new(names, data)),
        };
        debug!("Drawing scatter chart at {}", placeholder);
        trace!("View: {:?}", view);

        let result = widget
            .init(placeholder, view)
            .and_then(|_| widget.load(CHART_ID));
        match result {
            Ok(handle) => RenderStatus::Rendered(handle),
            Err(e) => {
                error!("Failed to render scatter chart at {}: {:?}", placeholder, e);
                RenderStatus::Failed(e.to_string())
            }
        }
    }

    fn update(&self, widget: &mut dyn Widget, data: Vec<JsonValue>) -> Result<()> {
        widget.on_data_ready(data, DataMode::Append)
    }
}

fn build_chart_config(config: &UserChartConfig) -> ChartSpec {
    let channel = |value: &String| (value != NONE).then(|| value.clone());
    ChartSpec {
        x: config.x.clone(),
        charts: vec![ChartEntry {
            chart_type: "scatter".to_string(),
            y: config.y.clone(),
            color: channel(&config.color),
            size: channel(&config.size),
        }],
    }
}
