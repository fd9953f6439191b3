//! The interface a dashboard host uses to drive a chart template.

use eyre::Result;
use serde_json::Value as JsonValue;

use crate::view::ViewHandle;
use crate::{ChartTemplateConfig, FieldSchema, UserChartConfig, Widget};

/// ID under which a chart template mounts its view.
pub const CHART_ID: &str = "chart-0";

/// Outcome of a best-effort render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderStatus {
    Rendered(ViewHandle),
    /// The widget failed to render the chart. The failure has already been
    /// logged.
    Failed(String),
}

impl RenderStatus {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }
}

/// A chart template pairs a configuration form with a rendering adapter for
/// one type of chart.
///
/// Hosts call [`ChartTemplate::get_config`] to build the configuration form,
/// [`ChartTemplate::validate`] on the user's choices, [`ChartTemplate::draw`]
/// once and then [`ChartTemplate::update`] as new data arrives.
pub trait ChartTemplate {
    /// The configuration form for this chart, populated from the given
    /// schema.
    fn get_config(&self, schema: &FieldSchema) -> Result<ChartTemplateConfig>;

    /// Whether the given chart configuration is acceptable.
    fn validate(&self, chart_config: &JsonValue) -> bool;

    /// Whether the host needs to run a separate data provider configuration
    /// step. `None` leaves the decision to the host.
    fn is_provider_required(&self) -> Option<bool>;

    /// Mount and render a chart in the widget. Never fails: rendering errors
    /// are logged and reported through the returned status.
    fn draw(
        &self,
        widget: &mut dyn Widget,
        placeholder: &str,
        chart_config: &UserChartConfig,
        schema: &FieldSchema,
        data: Vec<JsonValue>,
    ) -> RenderStatus;

    /// Append rows to the chart previously drawn in the widget.
    fn update(&self, widget: &mut dyn Widget, data: Vec<JsonValue>) -> Result<()>;
}
