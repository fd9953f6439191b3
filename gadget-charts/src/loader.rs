//! Loading of chart template resources.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use eyre::Result;
use log::{debug, trace, warn};
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::{ChartTemplateConfig, Error, TemplateResource};

/// File stem of a chart template's configuration resource.
const CONFIG_STEM: &str = "config";

/// Supported configuration resource extensions, in lookup order.
const CONFIG_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Provides the configuration form template for a given chart type.
///
/// Implementations must return a fresh copy on each call, since callers are
/// free to mutate what they get back.
pub trait TemplateLoader {
    fn load(&self, chart_type: &str) -> Result<ChartTemplateConfig>;
}

impl<L: TemplateLoader + ?Sized> TemplateLoader for &L {
    fn load(&self, chart_type: &str) -> Result<ChartTemplateConfig> {
        (**self).load(chart_type)
    }
}

impl<L: TemplateLoader + ?Sized> TemplateLoader for Box<L> {
    fn load(&self, chart_type: &str) -> Result<ChartTemplateConfig> {
        (**self).load(chart_type)
    }
}

/// Loads chart templates laid out on the file system as
/// `<base>/<chart type>/config.json` (YAML is accepted too).
#[derive(Debug, Clone)]
pub struct FsTemplateLoader {
    base_path: PathBuf,
}

impl FsTemplateLoader {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Names of all chart types that have a configuration resource under the
    /// base path, sorted.
    pub fn available(&self) -> Result<Vec<String>> {
        let pattern = self.base_path.join("*").join(format!("{}.*", CONFIG_STEM));
        let pattern = pattern.to_string_lossy();
        let mut names = Vec::new();
        for entry_result in glob::glob(&pattern)? {
            let entry = entry_result?;
            if !entry.is_file() || !has_supported_extension(&entry) {
                continue;
            }
            let chart_type = entry
                .parent()
                .and_then(Path::file_name)
                .and_then(|n| n.to_str());
            match chart_type {
                Some(name) => names.push(name.to_string()),
                None => warn!("Skipping template with unusable path: {}", entry.display()),
            }
        }
        names.sort();
        names.dedup();
        Ok(names)
    }

    fn resource_path(&self, chart_type: &str) -> Option<PathBuf> {
        let dir = self.base_path.join(chart_type);
        CONFIG_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{}.{}", CONFIG_STEM, ext)))
            .find(|p| p.is_file())
    }
}

impl TemplateLoader for FsTemplateLoader {
    fn load(&self, chart_type: &str) -> Result<ChartTemplateConfig> {
        let path = self.resource_path(chart_type).ok_or_else(|| {
            Error::ResourceLoad(
                chart_type.to_string(),
                format!("no configuration resource under {}", self.base_path.display()),
            )
        })?;
        debug!("Loading {} template from {}", chart_type, path.display());
        let resource = load_resource(&path)
            .map_err(|e| Error::ResourceLoad(chart_type.to_string(), e.to_string()))?;
        Ok(resource.config)
    }
}

/// Serves chart templates from memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateLoader {
    templates: HashMap<String, ChartTemplateConfig>,
}

impl MemoryTemplateLoader {
    /// A loader serving the chart templates that ship with this crate.
    pub fn bundled() -> Result<Self> {
        let mut loader = Self::default();
        loader.insert_json(
            crate::scatter::SCATTER_CHART,
            include_str!("../templates/scatter-chart/config.json"),
        )?;
        Ok(loader)
    }

    /// Chart types this loader knows about, sorted.
    pub fn available(&self) -> Vec<String> {
        let mut names = self.templates.keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }

    /// Convenience method for registering a template.
    pub fn with<N: AsRef<str>>(mut self, chart_type: N, config: ChartTemplateConfig) -> Self {
        let _ = self.insert(chart_type, config);
        self
    }

    pub fn insert<N: AsRef<str>>(
        &mut self,
        chart_type: N,
        config: ChartTemplateConfig,
    ) -> Option<ChartTemplateConfig> {
        self.templates
            .insert(chart_type.as_ref().to_string(), config)
    }

    /// Parses and registers a template resource document in JSON format.
    pub fn insert_json<N: AsRef<str>, S: AsRef<str>>(
        &mut self,
        chart_type: N,
        resource: S,
    ) -> Result<()> {
        let resource = serde_json::from_str::<TemplateResource>(resource.as_ref())?;
        let _ = self.insert(chart_type, resource.config);
        Ok(())
    }
}

impl TemplateLoader for MemoryTemplateLoader {
    fn load(&self, chart_type: &str) -> Result<ChartTemplateConfig> {
        trace!("Loading {} template from memory", chart_type);
        self.templates.get(chart_type).cloned().ok_or_else(|| {
            Error::ResourceLoad(chart_type.to_string(), "not registered".to_string()).into()
        })
    }
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| CONFIG_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// Load a template resource from the given file, choosing the format based on
/// the file's extension.
fn load_resource(path: &Path) -> Result<TemplateResource> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| Error::CannotDetermineFileType(path.to_path_buf()))?;
    let content =
        fs::read_to_string(path).map_err(|e| Error::Io(path.display().to_string(), e))?;
    let value = match ext {
        "json" => serde_json::from_str::<JsonValue>(&content).map_err(Error::from)?,
        "yml" | "yaml" => {
            let yaml = serde_yaml::from_str::<YamlValue>(&content).map_err(Error::from)?;
            serde_json::to_value(yaml).map_err(Error::from)?
        }
        _ => return Err(Error::UnsupportedFileType(ext.to_string()).into()),
    };
    Ok(serde_json::from_value(value).map_err(Error::from)?)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ConfigField;

    fn write(dir: &Path, chart_type: &str, file_name: &str, content: &str) {
        let chart_dir = dir.join(chart_type);
        fs::create_dir_all(&chart_dir).unwrap();
        fs::write(chart_dir.join(file_name), content).unwrap();
    }

    #[test]
    fn loads_json_and_yaml_resources() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "scatter-chart",
            "config.json",
            r#"{"config": [{"fieldName": "x"}, {"fieldName": "color", "valueSet": []}]}"#,
        );
        write(
            dir.path(),
            "line-chart",
            "config.yaml",
            "config:\n  - fieldName: x\n    fieldType: dropDown\n",
        );

        let loader = FsTemplateLoader::new(dir.path());
        let scatter = loader.load("scatter-chart").unwrap();
        assert_eq!(scatter.len(), 2);
        assert_eq!(scatter.get("color").unwrap().value_set, Some(vec![]));

        let line = loader.load("line-chart").unwrap();
        assert_eq!(line.len(), 1);
        assert_eq!(
            line.get("x").unwrap().extra.get("fieldType").unwrap(),
            "dropDown"
        );

        assert_eq!(
            loader.available().unwrap(),
            vec!["line-chart".to_string(), "scatter-chart".to_string()]
        );
    }

    #[test]
    fn missing_resource_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsTemplateLoader::new(dir.path())
            .load("scatter-chart")
            .unwrap_err();
        match err.downcast_ref::<Error>() {
            Some(Error::ResourceLoad(name, _)) => assert_eq!(name, "scatter-chart"),
            other => panic!("expected a resource load error, but got {:?}", other),
        }
    }

    #[test]
    fn malformed_resource_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "scatter-chart", "config.json", r#"{"conf": []}"#);
        let err = FsTemplateLoader::new(dir.path())
            .load("scatter-chart")
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::ResourceLoad(_, _))
        ));
    }

    #[test]
    fn memory_loader_hands_out_copies() {
        let loader = MemoryTemplateLoader::default().with(
            "scatter-chart",
            ChartTemplateConfig::new(vec![ConfigField::new("color")]),
        );
        let mut first = loader.load("scatter-chart").unwrap();
        for field in first.iter_mut() {
            field.value_set = Some(vec!["None".to_string()]);
        }
        let second = loader.load("scatter-chart").unwrap();
        assert_eq!(second.get("color").unwrap().value_set, None);
        assert!(loader.load("pie-chart").is_err());
    }

    #[test]
    fn bundled_templates_include_scatter_chart() {
        let loader = MemoryTemplateLoader::bundled().unwrap();
        assert_eq!(loader.available(), vec!["scatter-chart".to_string()]);
        let config = loader.load("scatter-chart").unwrap();
        assert!(config.get("color").is_some());
        assert!(config.get("size").is_some());
    }
}
