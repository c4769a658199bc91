//! Batch plotter: one combined accelerometer/gyroscope chart per label.
//!
//! Each chart opens in its own window; the next label is shown once the
//! window is closed.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use imu_segment_viewer::app::{ChartWindowApp, native_options};
use imu_segment_viewer::chart::{ChartData, PlotMode};
use imu_segment_viewer::data::loader::load_file;

#[derive(Parser, Debug)]
#[command(name = "segment_plot")]
#[command(about = "Plot every labeled IMU segment of a table, one window per label")]
struct Args {
    /// Table to read (.csv, .tsv, .json or .parquet)
    #[arg(default_value = "IMU_motion_labeled.csv")]
    path: PathBuf,

    /// Numeric column for the x axis (default: row position)
    #[arg(long)]
    index_column: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let table = load_file(&args.path)?;
    log::info!("Loaded {} rows from {}", table.len(), args.path.display());

    let labels = table.unique_labels();
    println!("Unique labels: {labels:?}");

    for label in &labels {
        let rows = table.rows_with_label(label);
        let chart = ChartData::build(&table, args.index_column.as_deref(), label, &rows)
            .with_context(|| format!("preparing chart for label '{label}'"))?;
        log::info!("Showing {} rows for label '{label}'", chart.len());

        let title = format!("Segment {label}");
        eframe::run_native(
            &title,
            native_options(&title),
            Box::new(move |_cc| Ok(Box::new(ChartWindowApp::new(chart, PlotMode::Combined)))),
        )
        .map_err(|e| anyhow!("chart window for label '{label}' failed: {e}"))?;
    }

    Ok(())
}
