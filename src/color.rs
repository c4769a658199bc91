use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::channel::Channel;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.75, 0.55).into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Channel colours: X / Y / Z share a hue across both sensors
// ---------------------------------------------------------------------------

/// Line colour for a channel, keyed on its spatial axis.
pub fn channel_color(channel: Channel) -> Color32 {
    generate_palette(3)
        .get(channel.axis())
        .copied()
        .unwrap_or(Color32::LIGHT_BLUE)
}
