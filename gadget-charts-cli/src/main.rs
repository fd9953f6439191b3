use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use eyre::{eyre, Result, WrapErr};
use gadget_charts::{
    ChartTemplate, FieldSchema, FsTemplateLoader, HtmlWidget, MemoryTemplateLoader, RenderStatus,
    ScatterChart, TemplateLoader, UserChartConfig, DEFAULT_RUNTIME_URL,
};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

#[derive(Parser, Debug)]
#[clap(name = "gadget-charts", about, version)]
struct Args {
    /// Increase output logging verbosity.
    #[clap(short, long)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the scatter chart's configuration form for a data schema.
    Config {
        /// JSON file containing the data schema.
        #[clap(long, parse(from_os_str))]
        schema: PathBuf,
        /// Directory containing chart templates (defaults to the bundled
        /// templates).
        #[clap(long, parse(from_os_str))]
        templates: Option<PathBuf>,
    },
    /// Check a chart configuration.
    Validate {
        /// JSON file containing the chart configuration.
        #[clap(long, parse(from_os_str))]
        config: PathBuf,
    },
    /// Render a scatter chart to an HTML page.
    Draw {
        #[clap(long, parse(from_os_str))]
        schema: PathBuf,
        #[clap(long, parse(from_os_str))]
        config: PathBuf,
        /// JSON file containing an array of data records.
        #[clap(long, parse(from_os_str))]
        data: Option<PathBuf>,
        /// JSON files containing arrays of rows to append after drawing.
        #[clap(long, parse(from_os_str))]
        append: Vec<PathBuf>,
        /// ID of the element the chart is mounted in.
        #[clap(long, default_value = "chart")]
        placeholder: String,
        /// Where the page loads the visualization grammar runtime from.
        #[clap(long, default_value = DEFAULT_RUNTIME_URL)]
        runtime_url: String,
        #[clap(long, parse(from_os_str))]
        templates: Option<PathBuf>,
        /// Output HTML file.
        #[clap(short, long, parse(from_os_str))]
        out: PathBuf,
    },
    /// List the available chart templates.
    List {
        #[clap(long, parse(from_os_str))]
        templates: Option<PathBuf>,
    },
}

fn main() {
    let args = Args::parse();
    simple_logger::init_with_level(if args.verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    })
    .unwrap();

    if let Err(e) = run(args.command) {
        log::error!("Failed: {:?}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Config { schema, templates } => {
            let schema: FieldSchema = read_json(&schema)?;
            let chart = ScatterChart::new(loader(templates)?);
            let config = chart.get_config(&schema)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Command::Validate { config } => {
            let config: JsonValue = read_json(&config)?;
            let chart = ScatterChart::new(MemoryTemplateLoader::default());
            println!("{}", chart.validate(&config));
        }
        Command::Draw {
            schema,
            config,
            data,
            append,
            placeholder,
            runtime_url,
            templates,
            out,
        } => {
            let schema: FieldSchema = read_json(&schema)?;
            let config: UserChartConfig = read_json(&config)?;
            let data: Vec<JsonValue> = match data {
                Some(path) => read_json(&path)?,
                None => Vec::new(),
            };
            let chart = ScatterChart::new(loader(templates)?);
            let mut widget = HtmlWidget::new()?.with_runtime_url(runtime_url);
            if let RenderStatus::Failed(reason) =
                chart.draw(&mut widget, &placeholder, &config, &schema, data)
            {
                return Err(eyre!("chart was not rendered: {}", reason));
            }
            for path in append {
                let rows: Vec<JsonValue> = read_json(&path)?;
                debug!("Appending {} row(s) from {}", rows.len(), path.display());
                chart.update(&mut widget, rows)?;
            }
            fs::write(&out, widget.render_html()?)
                .wrap_err_with(|| format!("failed to write {}", out.display()))?;
            info!("Wrote chart to {}", out.display());
        }
        Command::List { templates } => {
            let names = match templates {
                Some(path) => FsTemplateLoader::new(path).available()?,
                None => MemoryTemplateLoader::bundled()?.available(),
            };
            for name in names {
                println!("{}", name);
            }
        }
    }
    Ok(())
}

fn loader(templates: Option<PathBuf>) -> Result<Box<dyn TemplateLoader>> {
    Ok(match templates {
        Some(path) => Box::new(FsTemplateLoader::new(path)),
        None => Box::new(MemoryTemplateLoader::bundled()?),
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).wrap_err_with(|| format!("failed to parse {}", path.display()))
}
