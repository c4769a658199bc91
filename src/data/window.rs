use std::ops::RangeInclusive;

use crate::error::{Result, ViewerError};

use super::model::Table;

/// Window length used when no shorter span is available or the length field
/// cannot be read.
pub const DEFAULT_WINDOW_LENGTH: f64 = 100.0;

// ---------------------------------------------------------------------------
// Window – half-open range over the index column
// ---------------------------------------------------------------------------

/// `[start, start + length)` over the selected index column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub start: f64,
    pub length: f64,
}

impl Window {
    /// Derived end of the window (exclusive).
    pub fn end(&self) -> f64 {
        self.start + self.length
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.start && value < self.end()
    }
}

// ---------------------------------------------------------------------------
// Extent – index range covered by one label
// ---------------------------------------------------------------------------

/// Minimum and maximum index value of a label subset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    /// Extent of the given values, ignoring NaN and infinities. `None` when
    /// nothing is left.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<Extent>, v| match acc {
                None => Some(Extent { min: v, max: v }),
                Some(e) => Some(Extent {
                    min: e.min.min(v),
                    max: e.max.max(v),
                }),
            })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Window shown right after a label or index column is picked.
    ///
    /// A zero-width subset gets the default length so its samples stay
    /// inside the half-open window.
    pub fn default_window(&self) -> Window {
        let span = self.span();
        let length = if span > 0.0 {
            span.min(DEFAULT_WINDOW_LENGTH)
        } else {
            DEFAULT_WINDOW_LENGTH
        };
        Window {
            start: self.min,
            length,
        }
    }

    /// Clamp a requested start into `[min, max - length]`.
    ///
    /// The lower bound wins when the window is longer than the data.
    pub fn clamp_start(&self, requested: f64, length: f64) -> f64 {
        requested.min(self.max - length).max(self.min)
    }

    /// Integer slider positions that keep the window inside the extent.
    pub fn slider_range(&self, length: f64) -> RangeInclusive<i64> {
        let lo = self.min.floor() as i64;
        let hi = ((self.max - length).floor() as i64).max(lo);
        lo..=hi
    }
}

/// Index extent of the rows carrying `label`.
pub fn label_extent(table: &Table, index_column: &str, label: &str) -> Result<Option<Extent>> {
    let index = table.column(index_column)?;
    Ok(Extent::of(
        table.rows_with_label(label).into_iter().map(|r| index[r]),
    ))
}

/// Rows with `label` whose index value falls inside `window`.
pub fn window_rows(table: &Table, index_column: &str, label: &str, window: &Window) -> Result<Vec<usize>> {
    let index = table.column(index_column)?;
    Ok(table
        .labels()
        .iter()
        .zip(index)
        .enumerate()
        .filter(|(_, (l, x))| l.as_str() == label && window.contains(**x))
        .map(|(i, _)| i)
        .collect())
}

// ---------------------------------------------------------------------------
// Text field parsing
// ---------------------------------------------------------------------------

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse the start and length fields into a window.
pub fn parse_window(start_text: &str, length_text: &str) -> Result<Window> {
    let start = parse_number(start_text).ok_or_else(|| ViewerError::InvalidRange {
        field: "start",
        text: start_text.trim().to_string(),
    })?;
    let length = parse_number(length_text)
        .filter(|l| *l > 0.0)
        .ok_or_else(|| ViewerError::InvalidRange {
            field: "length",
            text: length_text.trim().to_string(),
        })?;
    Ok(Window { start, length })
}

/// Length field as read by the slider: unusable text falls back to the default.
pub fn parse_length_or_default(text: &str) -> f64 {
    parse_number(text)
        .filter(|l| *l > 0.0)
        .unwrap_or(DEFAULT_WINDOW_LENGTH)
}

/// Format a window value for a text field. The text parses back to the
/// exact same `f64`.
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}
