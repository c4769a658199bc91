use eframe::egui;

use crate::chart::{ChartData, PlotMode};
use crate::state::AppState;
use crate::ui::{panels, plot};

/// Native window options shared by the viewer and the batch chart windows.
pub fn native_options(title: &str) -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Interactive viewer
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct SegmentViewerApp {
    pub state: AppState,
}

impl eframe::App for SegmentViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: label and window controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::chart_view(ui, self.state.chart.as_ref(), self.state.plot_mode);
        });

        panels::notice_window(ctx, &mut self.state);
    }
}

// ---------------------------------------------------------------------------
// Single chart window (batch plotting)
// ---------------------------------------------------------------------------

/// Shows one fixed chart until the window is closed.
pub struct ChartWindowApp {
    chart: ChartData,
    mode: PlotMode,
}

impl ChartWindowApp {
    pub fn new(chart: ChartData, mode: PlotMode) -> Self {
        Self { chart, mode }
    }
}

impl eframe::App for ChartWindowApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::chart_view(ui, Some(&self.chart), self.mode);
        });
    }
}
