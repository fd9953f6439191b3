use std::path::PathBuf;

use thiserror::Error;

/// The primary error type that can be produced by the chart templates.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load chart template resource \"{0}\": {1}")]
    ResourceLoad(String, String),
    #[error("unsupported template resource file type: {0}")]
    UnsupportedFileType(String),
    #[error("cannot determine file type of file: {0}")]
    CannotDetermineFileType(PathBuf),
    #[error("record {row} has no value for field \"{field}\"")]
    MissingField { field: String, row: usize },
    #[error("record {0} is not an object")]
    RecordNotObject(usize),
    #[error("no chart has been mounted yet")]
    NoChartMounted,
    #[error("no such view: {0}")]
    NoSuchView(String),
    #[error("I/O error {0}: {1}")]
    Io(String, std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("template error: {0}")]
    Template(#[from] handlebars::TemplateError),
    #[error("failed to render template \"{0}\": {1}")]
    TemplateRender(String, handlebars::RenderError),
}
