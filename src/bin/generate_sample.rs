use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const SAMPLE_RATE_HZ: f64 = 100.0;
const GRAVITY: f64 = 9.81;

#[derive(Parser, Debug)]
#[command(about = "Write a labeled IMU sample table (CSV and Parquet)")]
struct Args {
    /// Directory for IMU_motion_labeled.csv / .parquet
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Rows per labeled segment
    #[arg(long, default_value_t = 400)]
    rows_per_segment: usize,
}

/// One row of the generated table, in column order.
#[derive(Debug, Clone, Serialize)]
struct ImuRow {
    timestamp: f64,
    sample: i64,
    accel_x: f64,
    accel_y: f64,
    accel_z: f64,
    gyr_x: f64,
    gyr_y: f64,
    gyr_z: f64,
    label: String,
}

/// Motion profile of one activity: oscillation frequency (Hz), accelerometer
/// amplitude (m/s²), gyroscope amplitude (°/s), noise std-dev.
struct Activity {
    label: &'static str,
    freq: f64,
    accel_amp: f64,
    gyro_amp: f64,
    noise: f64,
}

const ACTIVITIES: [Activity; 5] = [
    Activity { label: "idle", freq: 0.2, accel_amp: 0.05, gyro_amp: 0.5, noise: 0.02 },
    Activity { label: "walk", freq: 1.8, accel_amp: 2.5, gyro_amp: 40.0, noise: 0.15 },
    Activity { label: "run", freq: 2.8, accel_amp: 7.0, gyro_amp: 120.0, noise: 0.4 },
    Activity { label: "jump", freq: 1.1, accel_amp: 12.0, gyro_amp: 60.0, noise: 0.6 },
    Activity { label: "walk", freq: 1.7, accel_amp: 2.3, gyro_amp: 35.0, noise: 0.15 },
];

/// SplitMix64 stream with a Box-Muller normal sampler; deterministic output.
struct NoiseSource(u64);

impl NoiseSource {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn normal(&mut self, std_dev: f64) -> f64 {
        let u1 = self.uniform().max(1e-15);
        let u2 = self.uniform();
        std_dev * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }
}

fn generate_rows(rows_per_segment: usize) -> Vec<ImuRow> {
    let mut noise = NoiseSource(42);
    let mut rows = Vec::with_capacity(rows_per_segment * ACTIVITIES.len());

    for activity in &ACTIVITIES {
        for _ in 0..rows_per_segment {
            let sample = rows.len() as i64;
            let t = sample as f64 / SAMPLE_RATE_HZ;
            let phase = std::f64::consts::TAU * activity.freq * t;
            let mut n = |scale: f64| noise.normal(activity.noise * scale);

            rows.push(ImuRow {
                timestamp: t,
                sample,
                accel_x: activity.accel_amp * phase.sin() + n(1.0),
                accel_y: 0.5 * activity.accel_amp * (2.0 * phase).sin() + n(1.0),
                accel_z: GRAVITY + activity.accel_amp * phase.cos() + n(1.0),
                gyr_x: activity.gyro_amp * (phase + 0.3).sin() + n(10.0),
                gyr_y: 0.6 * activity.gyro_amp * phase.cos() + n(10.0),
                gyr_z: 0.3 * activity.gyro_amp * (0.5 * phase).sin() + n(10.0),
                label: activity.label.to_string(),
            });
        }
    }
    rows
}

fn to_record_batch(rows: &[ImuRow]) -> Result<RecordBatch> {
    let float_col = |f: fn(&ImuRow) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("timestamp", DataType::Float64, false),
        Field::new("sample", DataType::Int64, false),
        Field::new("accel_x", DataType::Float64, false),
        Field::new("accel_y", DataType::Float64, false),
        Field::new("accel_z", DataType::Float64, false),
        Field::new("gyr_x", DataType::Float64, false),
        Field::new("gyr_y", DataType::Float64, false),
        Field::new("gyr_z", DataType::Float64, false),
        Field::new("label", DataType::Utf8, false),
    ]));

    RecordBatch::try_new(
        schema,
        vec![
            float_col(|r| r.timestamp),
            Arc::new(Int64Array::from(rows.iter().map(|r| r.sample).collect::<Vec<_>>())),
            float_col(|r| r.accel_x),
            float_col(|r| r.accel_y),
            float_col(|r| r.accel_z),
            float_col(|r| r.gyr_x),
            float_col(|r| r.gyr_y),
            float_col(|r| r.gyr_z),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.label.as_str()).collect::<Vec<_>>(),
            )),
        ],
    )
    .context("building record batch")
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let rows = generate_rows(args.rows_per_segment);

    // CSV
    let csv_path = args.output_dir.join("IMU_motion_labeled.csv");
    let mut writer = csv::Writer::from_path(&csv_path)
        .with_context(|| format!("creating {}", csv_path.display()))?;
    for row in &rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;

    // Parquet
    let batch = to_record_batch(&rows)?;
    let parquet_path = args.output_dir.join("IMU_motion_labeled.parquet");
    let file = std::fs::File::create(&parquet_path)
        .with_context(|| format!("creating {}", parquet_path.display()))?;
    let mut parquet_writer = ArrowWriter::try_new(file, batch.schema(), None)
        .context("creating parquet writer")?;
    parquet_writer.write(&batch).context("writing parquet batch")?;
    parquet_writer.close().context("closing parquet writer")?;

    let preview = pretty_format_batches(&[batch.slice(0, rows.len().min(5))])
        .context("formatting preview")?;
    println!("{preview}");
    println!(
        "Wrote {} rows ({} segments) to {} and {}",
        rows.len(),
        ACTIVITIES.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
