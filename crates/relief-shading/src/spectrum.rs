//! Height-spectrum colorizer for heightmap surfaces.
//!
//! Maps a scalar elevation and the current \[min, max\] data range onto a
//! fixed 7-band color spectrum running dark grey → blue → cyan → green →
//! red/yellow → white. The mapping is a pure function of its inputs and is
//! total: out-of-range and non-finite elevations still produce a defined
//! color rather than failing.

use glam::Vec4;

/// Fixed color returned while no elevation data is loaded: near-transparent
/// white, so an empty surface reads as a faint ghost rather than a colored
/// artifact.
pub const NO_DATA_COLOR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 0.1);

/// Alpha of every colorized fragment. The surface is drawn translucent and
/// relies on host-side blending.
pub const SURFACE_ALPHA: f32 = 0.5;

/// Number of color bands the normalized range is divided into.
pub const BAND_COUNT: u32 = 7;

/// The current elevation data range, owned and updated by the host per frame
/// or per dataset load.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeightRange {
    pub min: f32,
    pub max: f32,
}

impl HeightRange {
    /// Sentinel meaning "no data loaded yet".
    pub const UNSET: Self = Self { min: 0.0, max: 0.0 };

    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// True for the no-data sentinel (both bounds exactly zero). Checked
    /// before normalization so the zero-width division never happens.
    pub fn is_unset(&self) -> bool {
        self.min == 0.0 && self.max == 0.0
    }

    /// Width of the range. Zero or negative for degenerate ranges other than
    /// the sentinel; the colorizer does not guard those, matching the
    /// original shader.
    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}

/// Colorize one elevation sample against the current range.
///
/// The range is split into seven bands; within a band the color interpolates
/// linearly, and every transition from band 1 upward lands exactly on the
/// next band's start color. The one seam is the first boundary, where the
/// 0.2 grey floor of band 0 steps down to pure blue — kept as-is, it is part
/// of the palette. Elevations outside \[min, max\] are not clamped:
/// they extrapolate within the nearest band formula, and once the band index
/// leaves 0..=6 the output falls through to opaque-channel white.
pub fn spectrum_color(height: f32, range: HeightRange) -> Vec4 {
    if range.is_unset() {
        return NO_DATA_COLOR;
    }

    let a = 6.0 * (height - range.min) / range.span();
    let x = a.floor();
    let y = a - x;

    let [r, g, b] = band_color(x as i32, y);
    Vec4::new(r, g, b, SURFACE_ALPHA)
}

/// Color of band `band` at fractional position `y` within the band.
///
/// This table is the contract; do not reorder or renumber it.
fn band_color(band: i32, y: f32) -> [f32; 3] {
    match band {
        0 => [0.2, 0.2, y],       // dark grey, fading in blue
        1 => [0.0, y, 1.0],       // blue → cyan
        2 => [0.0, 1.0, 1.0 - y], // cyan → green
        3 => [y, 1.0 - y, 0.0],   // green → red
        4 => [1.0, y, 0.0],       // red → yellow
        5 => [1.0, 1.0, y],       // yellow → white
        6 => [1.0, 1.0, 1.0],     // white (height == max lands here)
        _ => [1.0, 1.0, 1.0],     // out of range, white fallback
    }
}
