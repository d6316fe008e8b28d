mod chart;
pub mod styles;


pub use chart::{chart_lines, render_weekly_chart, ChartImage, ChartLine, PlotError};
pub use styles::{ChartStyle, ChartTheme};
