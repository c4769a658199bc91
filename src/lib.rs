//! Viewer for labeled IMU recordings.
//!
//! A table of accelerometer and gyroscope samples tagged with segment labels
//! is loaded from disk; one label at a time is windowed over a chosen index
//! column and charted either as two grouped charts or as six per-channel
//! charts.

pub mod app;
pub mod chart;
pub mod color;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;

pub use error::{Result, ViewerError};
