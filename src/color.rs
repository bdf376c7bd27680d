use eframe::egui::Color32;
use plotters::style::{RGBAColor, RGBColor};

// ---------------------------------------------------------------------------
// Series colours
// ---------------------------------------------------------------------------

/// An opaque sRGB colour shared by the static renderer and the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// matplotlib "tab:blue".
pub const TAB_BLUE: Rgb = Rgb(31, 119, 180);
/// matplotlib "tab:red".
pub const TAB_RED: Rgb = Rgb(214, 39, 40);
/// Grid lines.
pub const GRID_GRAY: Rgb = Rgb(176, 176, 176);

impl Rgb {
    /// Colour for egui with the given opacity (0.0 ..= 1.0).
    pub fn to_color32(self, alpha: f64) -> Color32 {
        Color32::from_rgba_unmultiplied(self.0, self.1, self.2, alpha_byte(alpha))
    }

    pub fn to_plotters(self) -> RGBColor {
        RGBColor(self.0, self.1, self.2)
    }

    pub fn to_plotters_alpha(self, alpha: f64) -> RGBAColor {
        RGBAColor(self.0, self.1, self.2, alpha.clamp(0.0, 1.0))
    }
}

fn alpha_byte(alpha: f64) -> u8 {
    (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
}
