use plotters::style::{Palette, Palette99, RGBAColor};

/// Chart theme configuration
pub struct ChartTheme {
    pub background_color: RGBAColor,
    pub text_color: RGBAColor,
    pub grid_color: RGBAColor,
    pub axis_color: RGBAColor,
    pub legend_background: RGBAColor,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: RGBAColor(0, 0, 0, 0.94),
            text_color: RGBAColor(255, 255, 255, 0.8),
            grid_color: RGBAColor(255, 255, 255, 0.15),
            axis_color: RGBAColor(255, 255, 255, 0.8),
            legend_background: RGBAColor(0, 0, 0, 0.8),
        }
    }
}

impl ChartTheme {
    /// Line color for the repository drawn at `index`.
    pub fn series_color(&self, index: usize) -> RGBAColor {
        let (r, g, b) = Palette99::COLORS[index % Palette99::COLORS.len()];
        RGBAColor(r, g, b, 0.9)
    }
}

/// Chart style configuration
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub line_width: u32,
    pub font_size: f64,
    pub caption_size: f64,
    pub margin: u32,
    pub label_area_size: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 960,
            height: 420,
            line_width: 2,
            font_size: 15.0,
            caption_size: 24.0,
            margin: 10,
            label_area_size: 50,
        }
    }
}
