use plotters::style::{Color, HSLColor, RGBColor};

/// Font family requested for every piece of chart text.
pub const FONT_FAMILY: &str = "sans-serif";

// ── Palettes ──────────────────────────────────────────────────────────────────

/// Nine-colour qualitative palette ("Set1"), used for the year-wise boxes.
pub const SET1: [RGBColor; 9] = [
    RGBColor(228, 26, 28),
    RGBColor(55, 126, 184),
    RGBColor(77, 175, 74),
    RGBColor(152, 78, 163),
    RGBColor(255, 127, 0),
    RGBColor(255, 255, 51),
    RGBColor(166, 86, 40),
    RGBColor(247, 129, 191),
    RGBColor(153, 153, 153),
];

/// Ten-colour categorical cycle, used for the monthly bar series.
pub const TAB10: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// `n` colours with evenly spaced hues at fixed saturation and lightness.
///
/// Used for the month-wise boxes so that neighbouring months read as a
/// continuous colour wheel.
pub fn evenly_spaced_hues(n: usize) -> Vec<RGBColor> {
    (0..n)
        .map(|i| {
            let hue = (0.01 + i as f64 / n as f64).fract();
            let (r, g, b) = HSLColor(hue, 0.65, 0.6).rgb();
            RGBColor(r, g, b)
        })
        .collect()
}

/// Cyclic lookup into `palette`; wraps once the palette is exhausted.
///
/// Falls back to black for an empty palette.
pub fn palette_color(palette: &[RGBColor], index: usize) -> RGBColor {
    if palette.is_empty() {
        return RGBColor(0, 0, 0);
    }
    palette[index % palette.len()]
}

// ── ChartTheme ────────────────────────────────────────────────────────────────

/// Colours and font sizes shared by all three renderers.
#[derive(Debug, Clone)]
pub struct ChartTheme {
    pub background: RGBColor,
    pub text: RGBColor,
    /// Series colour of the daily line chart.
    pub line: RGBColor,
    /// Outline colour of boxes, whiskers and medians.
    pub box_edge: RGBColor,
    /// Opacity of background grid lines.
    pub grid_alpha: f64,

    pub title_size: u32,
    pub axis_desc_size: u32,
    pub tick_size: u32,
    pub legend_size: u32,

    /// Half-diagonal of flier diamonds, in pixels.
    pub flier_radius: i32,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: RGBColor(255, 255, 255),
            text: RGBColor(0, 0, 0),
            line: RGBColor(255, 0, 0),
            box_edge: RGBColor(61, 61, 61),
            grid_alpha: 0.15,

            title_size: 24,
            axis_desc_size: 18,
            tick_size: 14,
            legend_size: 14,

            flier_radius: 2,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
