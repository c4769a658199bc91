use std::collections::{HashMap, HashSet};

use anyhow::{bail, ensure};

use crate::error::{Result, ViewerError};

/// Name of the categorical segment column every table must carry.
pub const LABEL_COLUMN: &str = "label";

// ---------------------------------------------------------------------------
// Table – the complete loaded file
// ---------------------------------------------------------------------------

/// A loaded sensor table, stored column-major.
///
/// Every column except [`LABEL_COLUMN`] is numeric. Missing numeric cells are
/// kept as `NaN`; labels are never empty.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Numeric column names in header order.
    column_names: Vec<String>,
    /// column name → position in `columns`.
    lookup: HashMap<String, usize>,
    columns: Vec<Vec<f64>>,
    labels: Vec<String>,
}

impl Table {
    /// Build a table from numeric columns and the label column.
    ///
    /// Fails when a column length differs from the number of labels or a
    /// column name is repeated.
    pub fn from_columns(columns: Vec<(String, Vec<f64>)>, labels: Vec<String>) -> anyhow::Result<Self> {
        let mut table = Table {
            labels,
            ..Table::default()
        };
        for (name, values) in columns {
            ensure!(
                values.len() == table.labels.len(),
                "column '{name}' has {} values but the table has {} rows",
                values.len(),
                table.labels.len()
            );
            if name == LABEL_COLUMN || table.lookup.contains_key(&name) {
                bail!("duplicate column '{name}'");
            }
            table.lookup.insert(name.clone(), table.columns.len());
            table.column_names.push(name);
            table.columns.push(values);
        }
        Ok(table)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Numeric column names in header order (candidates for the index column).
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Values of a numeric column.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.lookup
            .get(name)
            .map(|&i| self.columns[i].as_slice())
            .ok_or_else(|| ViewerError::MissingColumn(name.to_string()))
    }

    /// Per-row labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Distinct labels in order of first appearance.
    pub fn unique_labels(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.labels
            .iter()
            .filter(|l| seen.insert(l.as_str()))
            .cloned()
            .collect()
    }

    /// Row indices whose label equals `label`.
    pub fn rows_with_label(&self, label: &str) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, l)| l.as_str() == label)
            .map(|(i, _)| i)
            .collect()
    }
}
