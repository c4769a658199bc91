use crate::data::channel::{Channel, ChannelGroup};
use crate::data::model::Table;
use crate::error::Result;

/// X axis name used when charting by row position.
pub const ROW_INDEX_NAME: &str = "Index";

// ---------------------------------------------------------------------------
// Plot mode
// ---------------------------------------------------------------------------

/// Chart layout: two grouped charts or one chart per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotMode {
    #[default]
    Combined,
    Separate,
}

impl PlotMode {
    pub fn toggled(self) -> Self {
        match self {
            PlotMode::Combined => PlotMode::Separate,
            PlotMode::Separate => PlotMode::Combined,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PlotMode::Combined => "Combined",
            PlotMode::Separate => "Separate",
        }
    }
}

// ---------------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------------

/// One chart of the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Stable widget id.
    pub id: String,
    pub title: String,
    pub y_label: String,
    pub channels: Vec<Channel>,
}

impl Panel {
    /// Legends are only drawn when a panel overlays several series.
    pub fn shows_legend(&self) -> bool {
        self.channels.len() > 1
    }
}

// ---------------------------------------------------------------------------
// ChartData – filtered rows ready for plotting
// ---------------------------------------------------------------------------

/// The rows selected for one render, independent of the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub label: String,
    /// Name of the x axis (index column, or [`ROW_INDEX_NAME`]).
    pub index_name: String,
    pub x: Vec<f64>,
    /// Channel values in [`Channel::ALL`] order, each the same length as `x`.
    series: Vec<Vec<f64>>,
}

impl ChartData {
    /// Gather the index and the six channel columns for `rows`.
    ///
    /// With no index column the x axis is the row position in the table.
    pub fn build(table: &Table, index_column: Option<&str>, label: &str, rows: &[usize]) -> Result<Self> {
        let (index_name, x) = match index_column {
            Some(name) => {
                let col = table.column(name)?;
                (name.to_string(), rows.iter().map(|&r| col[r]).collect())
            }
            None => (
                ROW_INDEX_NAME.to_string(),
                rows.iter().map(|&r| r as f64).collect(),
            ),
        };

        let series = Channel::ALL
            .iter()
            .map(|ch| {
                let col = table.column(ch.column())?;
                Ok(rows.iter().map(|&r| col[r]).collect())
            })
            .collect::<Result<Vec<Vec<f64>>>>()?;

        Ok(ChartData {
            label: label.to_string(),
            index_name,
            x,
            series,
        })
    }

    /// Number of plotted rows.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn values(&self, channel: Channel) -> &[f64] {
        let i = Channel::ALL
            .iter()
            .position(|c| *c == channel)
            .unwrap_or_default();
        &self.series[i]
    }

    /// `[x, y]` pairs for one channel.
    pub fn points(&self, channel: Channel) -> Vec<[f64; 2]> {
        self.x
            .iter()
            .zip(self.values(channel))
            .map(|(&x, &y)| [x, y])
            .collect()
    }

    /// Charts to draw for `mode`, in display order.
    pub fn panels(&self, mode: PlotMode) -> Vec<Panel> {
        match mode {
            PlotMode::Combined => ChannelGroup::ALL
                .iter()
                .map(|g| Panel {
                    id: format!("combined_{}", g.quantity().to_lowercase()),
                    title: format!("{} Data for Label {}", g.quantity(), self.label),
                    y_label: g.quantity().to_string(),
                    channels: g.channels().to_vec(),
                })
                .collect(),
            PlotMode::Separate => Channel::ALL
                .iter()
                .map(|&ch| Panel {
                    id: format!("separate_{}", ch.column()),
                    title: format!("{} for Label {}", ch.name(), self.label),
                    y_label: ch.name().to_string(),
                    channels: vec![ch],
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imu_table() -> Table {
        let n = 6;
        let mut columns = vec![("t".to_string(), (0..n).map(|i| i as f64 * 0.5).collect())];
        for (k, ch) in Channel::ALL.iter().enumerate() {
            columns.push((
                ch.column().to_string(),
                (0..n).map(|i| (k * 10 + i) as f64).collect(),
            ));
        }
        let labels = ["walk", "walk", "run", "walk", "run", "run"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        Table::from_columns(columns, labels).unwrap()
    }

    #[test]
    fn chart_takes_index_and_channels_from_rows() {
        let table = imu_table();
        let chart = ChartData::build(&table, Some("t"), "walk", &[0, 3]).unwrap();
        assert_eq!(chart.index_name, "t");
        assert_eq!(chart.x, vec![0.0, 1.5]);
        assert_eq!(chart.values(Channel::AccelX), &[0.0, 3.0]);
        assert_eq!(chart.values(Channel::GyroZ), &[50.0, 53.0]);
        assert_eq!(chart.points(Channel::AccelY), vec![[0.0, 10.0], [1.5, 13.0]]);
    }

    #[test]
    fn chart_without_index_column_uses_row_positions() {
        let table = imu_table();
        let rows = table.rows_with_label("run");
        let chart = ChartData::build(&table, None, "run", &rows).unwrap();
        assert_eq!(chart.index_name, ROW_INDEX_NAME);
        assert_eq!(chart.x, vec![2.0, 4.0, 5.0]);
    }

    #[test]
    fn missing_sensor_column_fails_the_build() {
        let table = Table::from_columns(
            vec![("t".to_string(), vec![0.0]), ("accel_x".to_string(), vec![1.0])],
            vec!["walk".to_string()],
        )
        .unwrap();
        let err = ChartData::build(&table, Some("t"), "walk", &[0]).unwrap_err();
        assert_eq!(err, crate::error::ViewerError::MissingColumn("accel_y".into()));
    }

    #[test]
    fn combined_layout_groups_by_sensor() {
        let chart = ChartData::build(&imu_table(), Some("t"), "walk", &[0]).unwrap();
        let panels = chart.panels(PlotMode::Combined);
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].title, "Acceleration Data for Label walk");
        assert_eq!(panels[0].y_label, "Acceleration");
        assert_eq!(panels[1].title, "Gyrometer Data for Label walk");
        assert_eq!(panels[1].channels, vec![Channel::GyroX, Channel::GyroY, Channel::GyroZ]);
        assert!(panels.iter().all(Panel::shows_legend));
    }

    #[test]
    fn separate_layout_has_one_panel_per_channel_in_order() {
        let chart = ChartData::build(&imu_table(), Some("t"), "run", &[2]).unwrap();
        let panels = chart.panels(PlotMode::Separate);
        let order: Vec<Channel> = panels.iter().map(|p| p.channels[0]).collect();
        assert_eq!(order, Channel::ALL.to_vec());
        assert_eq!(panels[3].title, "Gyro X for Label run");
        assert_eq!(panels[3].y_label, "Gyro X");
        assert!(!panels[0].shows_legend());
    }

    #[test]
    fn mode_toggles_between_two_values() {
        assert_eq!(PlotMode::default(), PlotMode::Combined);
        assert_eq!(PlotMode::Combined.toggled(), PlotMode::Separate);
        assert_eq!(PlotMode::Combined.toggled().toggled(), PlotMode::Combined);
    }
}
