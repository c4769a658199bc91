use eframe::egui::{RichText, Ui};
use egui_extras::{Size, StripBuilder};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::chart::{ChartData, Panel, PlotMode};
use crate::color::channel_color;

/// Plots share one x-axis link group so zooming one pans the others.
const AXIS_LINK_GROUP: &str = "imu_index_axis";

// ---------------------------------------------------------------------------
// Chart surface (central panel)
// ---------------------------------------------------------------------------

/// Render the current chart, or a hint when nothing has been plotted yet.
pub fn chart_view(ui: &mut Ui, chart: Option<&ChartData>, mode: PlotMode) {
    let Some(chart) = chart else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file and press Plot Data  (File → Open…)");
        });
        return;
    };

    let panels = chart.panels(mode);
    match mode {
        PlotMode::Combined => {
            StripBuilder::new(ui)
                .sizes(Size::remainder(), panels.len())
                .vertical(|mut strip| {
                    for panel in &panels {
                        strip.cell(|ui: &mut Ui| panel_plot(ui, chart, panel));
                    }
                });
        }
        PlotMode::Separate => {
            // 3 rows × 2 columns, filled row by row.
            StripBuilder::new(ui)
                .sizes(Size::remainder(), panels.len().div_ceil(2))
                .vertical(|mut strip| {
                    for row in panels.chunks(2) {
                        strip.strip(|builder| {
                            builder
                                .sizes(Size::remainder(), 2)
                                .horizontal(|mut strip| {
                                    for panel in row {
                                        strip.cell(|ui: &mut Ui| panel_plot(ui, chart, panel));
                                    }
                                });
                        });
                    }
                });
        }
    }
}

/// One titled chart filling the available cell.
fn panel_plot(ui: &mut Ui, chart: &ChartData, panel: &Panel) {
    ui.label(RichText::new(&panel.title).strong());

    let mut plot = Plot::new(&panel.id)
        .x_axis_label(chart.index_name.as_str())
        .y_axis_label(panel.y_label.as_str())
        .link_axis(AXIS_LINK_GROUP, [true, false])
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if panel.shows_legend() {
        plot = plot.legend(Legend::default());
    }

    plot.show(ui, |plot_ui| {
        for &channel in &panel.channels {
            let points: PlotPoints = chart.points(channel).into_iter().collect();
            let line = Line::new(points)
                .name(channel.name())
                .color(channel_color(channel))
                .width(1.5);
            plot_ui.line(line);
        }
    });
}
