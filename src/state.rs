use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use crate::chart::{ChartData, PlotMode};
use crate::data::loader::load_file;
use crate::data::model::Table;
use crate::data::window::{
    Extent, Window, format_value, label_extent, parse_length_or_default, parse_window, window_rows,
};
use crate::error::{Result, ViewerError};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// File the current table came from.
    pub source_path: Option<PathBuf>,

    /// Loaded table (None until user loads a file).
    pub table: Option<Table>,

    /// Column used as x axis and windowing axis.
    pub index_column: Option<String>,

    /// Selected segment label.
    pub label: Option<String>,

    /// Distinct labels offered in the label selector.
    pub label_choices: Vec<String>,

    /// Index range of the selected label (None for an empty subset).
    pub extent: Option<Extent>,

    /// Window slider position.
    pub slider_pos: i64,

    /// Window text fields. `end_text` is always derived.
    pub start_text: String,
    pub length_text: String,
    pub end_text: String,

    pub plot_mode: PlotMode,

    /// Data behind the chart currently on screen.
    pub chart: Option<ChartData>,

    /// Blocking warning shown until dismissed.
    pub notice: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            source_path: None,
            table: None,
            index_column: None,
            label: None,
            label_choices: Vec::new(),
            extent: None,
            slider_pos: 0,
            start_text: "0".to_string(),
            length_text: "100".to_string(),
            end_text: "100".to_string(),
            plot_mode: PlotMode::default(),
            chart: None,
            notice: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Load a table from disk. On failure the previous table stays active.
    pub fn open_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows with columns {:?} from {}",
                    table.len(),
                    table.column_names(),
                    path.display()
                );
                self.set_table(path.to_path_buf(), table);
            }
            Err(e) => {
                log::error!("{e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded table and select its first index column.
    pub fn set_table(&mut self, path: PathBuf, table: Table) {
        let first_column = table.column_names().first().cloned();
        self.source_path = Some(path);
        self.table = Some(table);
        self.chart = None;
        self.status_message = None;
        match first_column {
            Some(col) => self.select_index_column(&col),
            None => {
                self.index_column = None;
                self.label_choices.clear();
                self.label = None;
                self.extent = None;
                self.status_message = Some("Table has no numeric columns".to_string());
            }
        }
    }

    /// Numeric columns offered in the index-column selector.
    pub fn index_choices(&self) -> &[String] {
        self.table
            .as_ref()
            .map(|t| t.column_names())
            .unwrap_or_default()
    }

    /// Switch the index column, repopulate labels and reset the window.
    pub fn select_index_column(&mut self, column: &str) {
        let Some(table) = &self.table else {
            return;
        };
        log::debug!("index column -> {column}");
        self.index_column = Some(column.to_string());
        self.label_choices = table.unique_labels();
        self.label = self.label_choices.first().cloned();
        self.reset_window();
    }

    /// Switch the label and reset the window.
    pub fn select_label(&mut self, label: &str) {
        log::debug!("label -> {label}");
        self.label = Some(label.to_string());
        self.reset_window();
    }

    /// Recompute the default window for the current index column and label.
    fn reset_window(&mut self) {
        let (Some(table), Some(column), Some(label)) = (&self.table, &self.index_column, &self.label)
        else {
            self.extent = None;
            return;
        };
        match label_extent(table, column, label) {
            Ok(Some(extent)) => {
                let window = extent.default_window();
                self.extent = Some(extent);
                self.slider_pos = window.start.floor() as i64;
                self.write_window(&window);
            }
            Ok(None) => {
                log::warn!("label '{label}' has no usable '{column}' values");
                self.extent = None;
            }
            Err(e) => {
                log::warn!("{e}");
                self.extent = None;
                self.status_message = Some(e.to_string());
            }
        }
    }

    fn write_window(&mut self, window: &Window) {
        self.start_text = format_value(window.start);
        self.length_text = format_value(window.length);
        self.end_text = format_value(window.end());
    }

    /// Slider bounds for the current length field, if a window exists.
    pub fn slider_range(&self) -> Option<RangeInclusive<i64>> {
        self.extent
            .map(|e| e.slider_range(parse_length_or_default(&self.length_text)))
    }

    /// Slider moved: clamp the window to the label's data, then render.
    pub fn move_slider(&mut self, position: i64) -> Result<()> {
        self.slider_pos = position;
        let Some(extent) = self.extent else {
            return Ok(());
        };
        let length = parse_length_or_default(&self.length_text);
        let start = extent.clamp_start(position as f64, length);
        self.slider_pos = start.floor() as i64;
        self.write_window(&Window { start, length });
        self.plot()
    }

    /// Re-derive the end field after the start or length text was edited.
    pub fn refresh_end(&mut self) {
        if let Ok(window) = parse_window(&self.start_text, &self.length_text) {
            self.end_text = format_value(window.end());
        }
    }

    /// Filter the table with the current text fields and rebuild the chart.
    ///
    /// On error the previous chart is kept and a notice is raised.
    pub fn plot(&mut self) -> Result<()> {
        let (Some(table), Some(column), Some(label)) = (&self.table, &self.index_column, &self.label)
        else {
            return Ok(());
        };

        let rendered = parse_window(&self.start_text, &self.length_text).and_then(|window| {
            let rows = window_rows(table, column, label, &window)?;
            let chart = ChartData::build(table, Some(column), label, &rows)?;
            Ok((window, chart))
        });

        match rendered {
            Ok((window, chart)) => {
                log::info!(
                    "plotting {} rows of '{label}' in [{}, {}) ({} mode)",
                    chart.len(),
                    window.start,
                    window.end(),
                    self.plot_mode.name()
                );
                self.end_text = format_value(window.end());
                self.chart = Some(chart);
                Ok(())
            }
            Err(e) => {
                log::warn!("render aborted: {e}");
                self.notice = Some(notice_text(&e));
                Err(e)
            }
        }
    }

    /// Flip between combined and separate charts, then render.
    pub fn toggle_mode(&mut self) -> Result<()> {
        self.plot_mode = self.plot_mode.toggled();
        self.plot()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

fn notice_text(err: &ViewerError) -> String {
    match err {
        ViewerError::InvalidRange { .. } => {
            format!("Please enter valid start and length values.\n{err}")
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::channel::Channel;

    /// `t = 0..n`, one label, the six channels derived from `t`.
    fn walk_table(n: usize) -> Table {
        let t: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let mut columns = vec![("t".to_string(), t.clone())];
        for (k, ch) in Channel::ALL.iter().enumerate() {
            columns.push((
                ch.column().to_string(),
                t.iter().map(|v| v * (k + 1) as f64).collect(),
            ));
        }
        Table::from_columns(columns, vec!["walk".to_string(); n]).unwrap()
    }

    fn loaded(table: Table) -> AppState {
        let mut state = AppState::default();
        state.set_table(PathBuf::from("mem.csv"), table);
        state
    }

    #[test]
    fn loading_selects_first_column_and_label() {
        let state = loaded(walk_table(200));
        assert_eq!(state.index_column.as_deref(), Some("t"));
        assert_eq!(state.label.as_deref(), Some("walk"));
        assert_eq!(state.label_choices, vec!["walk"]);
        assert_eq!(state.start_text, "0");
        assert_eq!(state.length_text, "100");
        assert_eq!(state.end_text, "100");
        assert_eq!(state.slider_range(), Some(0..=99));
    }

    #[test]
    fn fifty_row_window() {
        let mut state = loaded(walk_table(200));
        state.start_text = "0".into();
        state.length_text = "50".into();
        state.plot().unwrap();
        let chart = state.chart.as_ref().unwrap();
        assert_eq!(chart.len(), 50);
        assert!(chart.x.iter().all(|&t| (0.0..50.0).contains(&t)));
        assert_eq!(state.end_text, "50");
    }

    #[test]
    fn toggling_mode_keeps_filtered_data() {
        let mut state = loaded(walk_table(200));
        state.length_text = "50".into();
        state.plot().unwrap();
        let before = state.chart.clone().unwrap();
        assert_eq!(before.panels(state.plot_mode).len(), 2);

        state.toggle_mode().unwrap();
        assert_eq!(state.plot_mode, PlotMode::Separate);
        let after = state.chart.clone().unwrap();
        assert_eq!(after, before);
        assert_eq!(after.panels(state.plot_mode).len(), 6);
    }

    #[test]
    fn invalid_length_keeps_previous_chart() {
        let mut state = loaded(walk_table(200));
        state.plot().unwrap();
        let before = state.chart.clone();

        state.length_text = "abc".into();
        let err = state.plot().unwrap_err();
        assert!(matches!(err, ViewerError::InvalidRange { field: "length", .. }));
        assert!(state.notice.is_some());
        assert_eq!(state.chart, before);

        state.dismiss_notice();
        assert!(state.notice.is_none());
    }

    #[test]
    fn slider_clamps_to_label_data() {
        let mut state = loaded(walk_table(200));
        state.length_text = "50".into();
        state.move_slider(180).unwrap();
        assert_eq!(state.start_text, "149");
        assert_eq!(state.end_text, "199");
        assert_eq!(state.chart.as_ref().unwrap().len(), 50);

        state.move_slider(-20).unwrap();
        assert_eq!(state.start_text, "0");
        assert_eq!(state.slider_pos, 0);
    }

    #[test]
    fn clamped_slider_position_follows_start() {
        let mut state = loaded(walk_table(200));
        state.length_text = "50".into();
        state.move_slider(180).unwrap();
        assert_eq!(state.slider_pos, 149);
    }

    #[test]
    fn fractional_index_plots_subset_min_row() {
        let t: Vec<f64> = (2..12).map(|i| i as f64 / 3.0).collect();
        let mut columns = vec![("t".to_string(), t.clone())];
        for ch in Channel::ALL {
            columns.push((ch.column().to_string(), vec![0.0; t.len()]));
        }
        let table = Table::from_columns(columns, vec!["walk".to_string(); t.len()]).unwrap();
        let mut state = loaded(table);
        assert_eq!(state.start_text.parse::<f64>().unwrap(), t[0]);

        state.plot().unwrap();
        let chart = state.chart.as_ref().unwrap();
        assert_eq!(chart.x.first(), Some(&t[0]));
        assert!(chart.len() >= t.len() - 1);
    }

    #[test]
    fn slider_with_unreadable_length_uses_default() {
        let mut state = loaded(walk_table(500));
        state.length_text = "ten".into();
        state.move_slider(30).unwrap();
        assert_eq!(state.length_text, "100");
        assert_eq!(state.end_text, "130");
    }

    #[test]
    fn label_change_resets_window_to_subset() {
        let mut labels = vec!["walk".to_string(); 100];
        labels.extend(vec!["run".to_string(); 30]);
        let t: Vec<f64> = (0..130).map(|i| i as f64).collect();
        let table = Table::from_columns(vec![("t".to_string(), t)], labels).unwrap();
        let mut state = loaded(table);

        state.select_label("run");
        assert_eq!(state.extent, Some(Extent { min: 100.0, max: 129.0 }));
        assert_eq!(state.start_text, "100");
        assert_eq!(state.length_text, "29");
        assert_eq!(state.end_text, "129");
    }

    #[test]
    fn missing_sensor_columns_surface_at_render() {
        let table = Table::from_columns(
            vec![("t".to_string(), vec![0.0, 1.0])],
            vec!["walk".to_string(); 2],
        )
        .unwrap();
        let mut state = loaded(table);
        let err = state.plot().unwrap_err();
        assert_eq!(err, ViewerError::MissingColumn("accel_x".into()));
        assert!(state.chart.is_none());
        assert!(state.notice.unwrap().contains("accel_x"));
    }

    #[test]
    fn failed_load_keeps_previous_table() {
        let mut state = loaded(walk_table(10));
        state.open_path(Path::new("/definitely/not/here.csv"));
        assert!(state.status_message.as_deref().unwrap().starts_with("Error"));
        assert_eq!(state.table.as_ref().unwrap().len(), 10);
    }

    #[test]
    fn editing_fields_rederives_end() {
        let mut state = loaded(walk_table(200));
        state.start_text = "12.5".into();
        state.length_text = "20".into();
        state.refresh_end();
        assert_eq!(state.end_text, "32.5");

        state.length_text = "x".into();
        state.refresh_end();
        assert_eq!(state.end_text, "32.5");
    }

    #[test]
    fn plot_without_table_is_a_no_op() {
        let mut state = AppState::default();
        assert!(state.plot().is_ok());
        assert!(state.chart.is_none());
        assert!(state.move_slider(5).is_ok());
    }
}
