//! Chart widgets: the runtime that actually puts a chart on screen.

use eyre::Result;
use handlebars::Handlebars;
use log::{debug, trace};
use serde::Serialize;
use serde_json::{json, Value as JsonValue};

use crate::view::{DataMode, DataSink, ViewDescriptor, ViewHandle};
use crate::Error;

/// A chart rendering runtime.
///
/// A widget owns at most one mounted chart at a time. Mounting a new view
/// replaces whatever was mounted before.
pub trait Widget: DataSink {
    /// Mount the given view at the given placeholder.
    fn init(&mut self, placeholder: &str, view: ViewDescriptor) -> Result<()>;

    /// Render the mounted view with the given ID. This is when the view's data
    /// provider is invoked.
    fn load(&mut self, id: &str) -> Result<ViewHandle>;
}

const PAGE_TEMPLATE: &str = "page";

/// Where the HTML page loads the visualization grammar runtime from, unless
/// configured otherwise.
pub const DEFAULT_RUNTIME_URL: &str = "js/VizGrammar.min.js";

#[derive(Debug)]
struct Mounted {
    placeholder: String,
    view: ViewDescriptor,
    rows: Vec<JsonValue>,
}

/// A widget that renders its chart as a standalone HTML page driving the
/// visualization grammar runtime in the browser.
pub struct HtmlWidget<'reg> {
    hb: Handlebars<'reg>,
    runtime_url: String,
    mounted: Option<Mounted>,
}

impl<'reg> HtmlWidget<'reg> {
    /// Constructor.
    pub fn new() -> Result<Self> {
        let mut hb = Handlebars::new();
        hb.set_strict_mode(true);
        hb.register_template_string(PAGE_TEMPLATE, include_str!("page.hbs"))
            .map_err(Error::from)?;
        Ok(Self {
            hb,
            runtime_url: DEFAULT_RUNTIME_URL.to_string(),
            mounted: None,
        })
    }

    /// Load the visualization grammar runtime from the given URL.
    pub fn with_runtime_url<S: AsRef<str>>(mut self, url: S) -> Self {
        self.runtime_url = url.as_ref().to_string();
        self
    }

    /// Rows currently held by the mounted view.
    pub fn rows(&self) -> Option<&[JsonValue]> {
        self.mounted.as_ref().map(|m| m.rows.as_slice())
    }

    /// Render the mounted chart as an HTML document.
    pub fn render_html(&self) -> Result<String> {
        let mounted = self.mounted.as_ref().ok_or(Error::NoChartMounted)?;
        let ctx = json!({
            "title": mounted.view.id,
            "runtime_url": self.runtime_url,
            "placeholder": mounted.placeholder,
            "view_id": mounted.view.id,
            "schema": script_json(&mounted.view.schema)?,
            "chart_config": script_json(&mounted.view.chart_config)?,
            "rows": script_json(&mounted.rows)?,
        });
        let html = self
            .hb
            .render(PAGE_TEMPLATE, &ctx)
            .map_err(|e| Error::TemplateRender(PAGE_TEMPLATE.to_string(), e))?;
        Ok(html)
    }
}

impl<'reg> DataSink for HtmlWidget<'reg> {
    fn on_data_ready(&mut self, rows: Vec<JsonValue>, mode: DataMode) -> Result<()> {
        let mounted = self.mounted.as_mut().ok_or(Error::NoChartMounted)?;
        debug!(
            "View {} received {} row(s) ({:?})",
            mounted.view.id,
            rows.len(),
            mode
        );
        match mode {
            DataMode::Initial => mounted.rows = rows,
            DataMode::Append => mounted.rows.extend(rows),
        }
        Ok(())
    }
}

impl<'reg> Widget for HtmlWidget<'reg> {
    fn init(&mut self, placeholder: &str, view: ViewDescriptor) -> Result<()> {
        if let Some(prev) = &self.mounted {
            debug!(
                "Replacing view {} mounted at {}",
                prev.view.id, prev.placeholder
            );
        }
        debug!("Mounting view {} at {}", view.id, placeholder);
        self.mounted = Some(Mounted {
            placeholder: placeholder.to_string(),
            view,
            rows: Vec::new(),
        });
        Ok(())
    }

    fn load(&mut self, id: &str) -> Result<ViewHandle> {
        let mounted = self.mounted.as_mut().ok_or(Error::NoChartMounted)?;
        if mounted.view.id != id {
            return Err(Error::NoSuchView(id.to_string()).into());
        }
        match mounted.view.data_provider.take() {
            Some(provider) => provider.provide(self)?,
            None => trace!("View {} has no pending data provider", id),
        }
        Ok(ViewHandle { id: id.to_string() })
    }
}

// Serializes a value for embedding inside an inline <script> element.
fn script_json<T: Serialize>(value: &T) -> Result<String> {
    let s = serde_json::to_string(value).map_err(Error::from)?;
    Ok(s.replace("</", "<\\/"))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::view::DataProvider;
    use crate::{ChartEntry, ChartSpec, Field, FieldSchema};

    fn view(records: Vec<JsonValue>) -> ViewDescriptor {
        let schema = crate::to_viz_grammar_schema(&FieldSchema::new(vec![
            Field::new("a", "INT"),
            Field::new("b", "STRING"),
        ]));
        let names = schema.names().to_vec();
        ViewDescriptor {
            id: "chart-0".to_string(),
            schema,
            chart_config: ChartSpec {
                x: "a".to_string(),
                charts: vec![ChartEntry {
                    chart_type: "scatter".to_string(),
                    y: "b".to_string(),
                    color: None,
                    size: None,
                }],
            },
            data_provider: Some(DataProvider::new(names, records)),
        }
    }

    #[test]
    fn load_pulls_data_from_provider() {
        let mut widget = HtmlWidget::new().unwrap();
        widget
            .init("chart", view(vec![json!({"a": 1, "b": "x"})]))
            .unwrap();
        assert_eq!(widget.rows().unwrap().len(), 0);
        let handle = widget.load("chart-0").unwrap();
        assert_eq!(handle.id, "chart-0");
        assert_eq!(widget.rows().unwrap(), &[json!([1, "x"])]);

        // The provider is consumed by the first load.
        widget
            .on_data_ready(vec![json!([2, "y"])], DataMode::Append)
            .unwrap();
        widget.load("chart-0").unwrap();
        assert_eq!(widget.rows().unwrap(), &[json!([1, "x"]), json!([2, "y"])]);
    }

    #[test]
    fn unknown_view_and_unmounted_widget_fail() {
        let mut widget = HtmlWidget::new().unwrap();
        assert!(widget.load("chart-0").is_err());
        assert!(widget
            .on_data_ready(vec![json!([1])], DataMode::Append)
            .is_err());
        assert!(widget.render_html().is_err());

        widget.init("chart", view(vec![])).unwrap();
        let err = widget.load("chart-1").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::NoSuchView(_))
        ));
    }

    #[test]
    fn renders_page_with_embedded_view() {
        let mut widget = HtmlWidget::new()
            .unwrap()
            .with_runtime_url("https://example.com/viz.js");
        widget
            .init("my-chart", view(vec![json!({"a": 1, "b": "</script>"})]))
            .unwrap();
        widget.load("chart-0").unwrap();
        let html = widget.render_html().unwrap();
        assert!(html.contains(r#"<div id="my-chart" data-view="chart-0">"#));
        assert!(html.contains(r#"src="https://example.com/viz.js""#));
        assert!(html.contains(r#"{"x":"a","charts":[{"type":"scatter","y":"b"}]}"#));
        assert!(html.contains(r#"[[1,"<\/script>"]]"#));
        assert!(html.contains(r#""names":["a","b"]"#));
    }
}
