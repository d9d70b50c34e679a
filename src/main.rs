//! Chartify Titles - title catalog EDA dashboard
//!
//! Opens the interactive dashboard by default; `export` runs the pipeline once
//! and writes the cleaned CSV plus chart images.

use anyhow::{Context, Result};
use chartify_titles::charts::StaticChartRenderer;
use chartify_titles::config::AppConfig;
use chartify_titles::data::{DataWriter, TypeFilter};
use chartify_titles::gui::DashboardApp;
use chartify_titles::pipeline;
use clap::{Args, Parser, Subcommand};
use eframe::egui;
use std::fs::File;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Title catalog cleaning and EDA dashboard", long_about = None)]
struct Cli {
    /// Configuration file (defaults to chartify_titles.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Source CSV, overriding the configured path
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive dashboard
    Dashboard,
    /// Run the pipeline once and write the cleaned CSV and chart images
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Type to keep ("All" keeps every row)
    #[arg(long = "type", default_value = "All")]
    type_filter: String,

    /// Cleaned CSV path, overriding the configured one
    #[arg(long)]
    output: Option<PathBuf>,

    /// Directory for the PNG charts, overriding the configured one
    #[arg(long)]
    chart_dir: Option<PathBuf>,

    /// Also write the aggregates as JSON
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(source) = cli.source {
        config.source_path = source;
    }

    match cli.command.unwrap_or(Command::Dashboard) {
        Command::Dashboard => run_dashboard(config),
        Command::Export(args) => run_export(config, args),
    }
}

fn run_dashboard(config: AppConfig) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Netflix EDA Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Chartify Titles",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard exited with error: {e}"))
}

fn run_export(mut config: AppConfig, args: ExportArgs) -> Result<()> {
    if let Some(output) = args.output {
        config.cleaned_path = output;
    }
    if let Some(chart_dir) = args.chart_dir {
        config.chart_dir = chart_dir;
    }

    let selection = TypeFilter::from_selection(&args.type_filter);
    let mut analysis = pipeline::run(
        &config.source_path,
        &selection,
        &config.aggregate_settings(),
    )
    .with_context(|| format!("running pipeline on {}", config.source_path.display()))?;

    let charts = StaticChartRenderer::render_all(
        &analysis.aggregates,
        &config.chart_dir,
        (config.chart_width, config.chart_height),
    )
    .context("rendering charts")?;
    info!(count = charts.len(), dir = %config.chart_dir.display(), "Charts written");

    if let Some(summary_path) = args.summary {
        let file = File::create(&summary_path)
            .with_context(|| format!("creating {}", summary_path.display()))?;
        serde_json::to_writer_pretty(file, &analysis.aggregates).context("writing summary")?;
        info!(path = %summary_path.display(), "Summary written");
    }

    DataWriter::write_csv(&mut analysis.table, &config.cleaned_path)
        .context("writing cleaned CSV")?;
    println!("✅ {}", DataWriter::acknowledgment(&config.cleaned_path));
    Ok(())
}
