//! The view model handed over to a chart widget.

use eyre::Result;
use log::{debug, trace};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::{ChartSpec, Error, Record, VizSchema};

/// Data rows in positional form, ordered by the view schema's column names.
pub type RowMatrix = Vec<Vec<JsonValue>>;

/// How data delivered to a widget relates to what it already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    /// The initial data set for a freshly loaded view.
    Initial,
    /// Rows to be added to the data the view already has.
    Append,
}

/// Anything that can receive rows of chart data.
pub trait DataSink {
    fn on_data_ready(&mut self, rows: Vec<JsonValue>, mode: DataMode) -> Result<()>;
}

/// Converts records into positional rows by reading the given columns from
/// each record, in order.
///
/// Fails if a record is not an object or lacks one of the columns.
pub fn records_to_rows(names: &[String], records: &[JsonValue]) -> Result<RowMatrix> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let record = record.as_object().ok_or(Error::RecordNotObject(i))?;
            row_from_record(names, record, i)
        })
        .collect()
}

fn row_from_record(names: &[String], record: &Record, row: usize) -> Result<Vec<JsonValue>> {
    names
        .iter()
        .map(|name| {
            record.get(name).cloned().ok_or_else(|| {
                eyre::Report::from(Error::MissingField {
                    field: name.clone(),
                    row,
                })
            })
        })
        .collect()
}

/// Supplies a view's data when the widget asks for it.
///
/// Records are only converted into rows once the provider is invoked, and a
/// provider can be invoked at most once.
#[derive(Debug, Clone, Default)]
pub struct DataProvider {
    names: Vec<String>,
    records: Vec<JsonValue>,
}

impl DataProvider {
    pub fn new(names: Vec<String>, records: Vec<JsonValue>) -> Self {
        Self { names, records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Converts the records and hands them to the sink as the initial data
    /// set. Does nothing if there are no records.
    pub fn provide(self, sink: &mut dyn DataSink) -> Result<()> {
        if self.records.is_empty() {
            debug!("No data to provide");
            return Ok(());
        }
        let rows = records_to_rows(&self.names, &self.records)?;
        trace!("Providing rows: {:?}", rows);
        sink.on_data_ready(
            rows.into_iter().map(JsonValue::Array).collect(),
            DataMode::Initial,
        )
    }
}

/// Everything a widget needs to mount and render a chart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewDescriptor {
    pub id: String,
    pub schema: VizSchema,
    pub chart_config: ChartSpec,
    #[serde(skip)]
    pub data_provider: Option<DataProvider>,
}

/// Identifies a view that a widget has loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewHandle {
    pub id: String,
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[derive(Default)]
    struct Collector(Vec<(Vec<JsonValue>, DataMode)>);

    impl DataSink for Collector {
        fn on_data_ready(&mut self, rows: Vec<JsonValue>, mode: DataMode) -> Result<()> {
            self.0.push((rows, mode));
            Ok(())
        }
    }

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn records_become_rows_in_column_order() {
        let records = vec![json!({"b": 2, "a": 1}), json!({"a": 3, "b": 4, "c": 9})];
        let rows = records_to_rows(&names(&["a", "b"]), &records).unwrap();
        assert_eq!(rows, vec![vec![json!(1), json!(2)], vec![json!(3), json!(4)]]);
    }

    #[test]
    fn missing_field_is_reported() {
        let records = vec![json!({"a": 1, "b": 2}), json!({"a": 3})];
        let err = records_to_rows(&names(&["a", "b"]), &records).unwrap_err();
        match err.downcast_ref::<Error>() {
            Some(Error::MissingField { field, row }) => {
                assert_eq!(field, "b");
                assert_eq!(*row, 1);
            }
            other => panic!("expected a missing field error, but got {:?}", other),
        }
    }

    #[test]
    fn explicit_null_is_not_missing() {
        let rows = records_to_rows(&names(&["a"]), &[json!({"a": null})]).unwrap();
        assert_eq!(rows, vec![vec![JsonValue::Null]]);
    }

    #[test]
    fn non_object_record_is_rejected() {
        let err = records_to_rows(&names(&["a"]), &[json!([1])]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::RecordNotObject(0))
        ));
    }

    #[test]
    fn provider_delivers_initial_rows() {
        let provider = DataProvider::new(
            names(&["a", "b"]),
            vec![json!({"a": 1, "b": 2}), json!({"a": 3, "b": 4})],
        );
        let mut sink = Collector::default();
        provider.provide(&mut sink).unwrap();
        assert_eq!(
            sink.0,
            vec![(vec![json!([1, 2]), json!([3, 4])], DataMode::Initial)]
        );
    }

    #[test]
    fn empty_provider_delivers_nothing() {
        let mut sink = Collector::default();
        DataProvider::new(names(&["a"]), vec![])
            .provide(&mut sink)
            .unwrap();
        assert!(sink.0.is_empty());
    }
}
