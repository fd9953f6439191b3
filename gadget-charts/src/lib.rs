//! Chart templates for dashboard gadgets.
//!
//! A chart template turns a host's data schema into a configuration form,
//! and the user's choices in that form plus the host's data into a view that
//! a chart widget can render. For a command line host, see the
//! `gadget-charts-cli` crate.

mod config;
mod error;
mod gadget;
mod loader;
mod scatter;
mod schema;
pub mod view;
mod viz;
mod widget;

pub use config::{ChartTemplateConfig, ConfigField, TemplateResource, UserChartConfig, NONE};
pub use error::Error;
pub use gadget::{ChartTemplate, RenderStatus, CHART_ID};
pub use loader::{FsTemplateLoader, MemoryTemplateLoader, TemplateLoader};
pub use scatter::{ScatterChart, SCATTER_CHART};
pub use schema::{Field, FieldSchema, Record};
pub use view::{DataMode, DataSink, ViewDescriptor, ViewHandle};
pub use viz::{to_viz_grammar_schema, ChartEntry, ChartSpec, DataTable, Metadata, VizSchema};
pub use widget::{HtmlWidget, Widget, DEFAULT_RUNTIME_URL};
