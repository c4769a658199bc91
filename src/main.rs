use imu_segment_viewer::app::{SegmentViewerApp, native_options};

fn main() -> eframe::Result {
    env_logger::init();

    eframe::run_native(
        "IMU Segment Viewer",
        native_options("IMU Segment Viewer"),
        Box::new(|_cc| Ok(Box::new(SegmentViewerApp::default()))),
    )
}
