use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Okabe–Ito colour-blind-friendly palette, used for the first streams.
pub const COLORBLIND_FRIENDLY: [Color32; 8] = [
    Color32::from_rgb(0xE6, 0x9F, 0x00),
    Color32::from_rgb(0x56, 0xB4, 0xE9),
    Color32::from_rgb(0x00, 0x9E, 0x73),
    Color32::from_rgb(0xF0, 0xE4, 0x42),
    Color32::from_rgb(0x00, 0x72, 0xB2),
    Color32::from_rgb(0xD5, 0x5E, 0x00),
    Color32::from_rgb(0xCC, 0x79, 0xA7),
    Color32::from_rgb(0x99, 0x99, 0x99),
];

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// `n` colours: the fixed palette first, generated hues after it.
pub fn stream_palette(n: usize) -> Vec<Color32> {
    let extra = n.saturating_sub(COLORBLIND_FRIENDLY.len());
    COLORBLIND_FRIENDLY
        .iter()
        .copied()
        .take(n)
        .chain(generate_palette(extra))
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: stream → Color32
// ---------------------------------------------------------------------------

/// Maps every stream of the dataset to a fixed colour, so both charts agree
/// no matter which streams are currently filtered in.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    /// Build a colour map from the streams in dataset order.
    pub fn new(streams: &[String]) -> Self {
        let mapping = streams
            .iter()
            .cloned()
            .zip(stream_palette(streams.len()))
            .collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a stream.
    pub fn color_for(&self, stream: &str) -> Color32 {
        self.mapping.get(stream).copied().unwrap_or(Color32::GRAY)
    }
}
