use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::coord::Shift;
use std::collections::hash_map::DefaultHasher;
use std::error::Error;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use lru::LruCache;
use once_cell::sync::Lazy;

use super::styles::{ChartStyle, ChartTheme};
use crate::types::{Repo, UnifiedWeeklyRow};
use crate::utils::WeekLabel;

pub type PlotError = Box<dyn Error + Send + Sync>;

type WeeklyChart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

// Rendered charts keyed by a hash of everything that went into them
static CHART_CACHE: Lazy<Mutex<LruCache<u64, Arc<ChartImage>>>> =
    Lazy::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(8).expect("non-zero"))));

/// An RGB raster of a rendered chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

/// One repository's weekly commits, oldest week first.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLine {
    pub key: String,
    pub points: Vec<(f64, f64)>,
}

fn cache_key(rows: &[UnifiedWeeklyRow], repos: &[Repo], use_log_scale: bool, style: &ChartStyle) -> u64 {
    let mut hasher = DefaultHasher::new();
    rows.hash(&mut hasher);
    repos.hash(&mut hasher);
    use_log_scale.hash(&mut hasher);
    (style.width, style.height).hash(&mut hasher);
    hasher.finish()
}

/// Build one line per repository over the weeks in `rows`.
///
/// `rows` arrive newest first; the x axis runs oldest to newest. Weeks where a
/// repository has no data plot as zero.
pub fn chart_lines(rows: &[UnifiedWeeklyRow], repos: &[Repo]) -> Vec<ChartLine> {
    repos
        .iter()
        .map(|repo| {
            let key = repo.key();
            let points = rows
                .iter()
                .rev()
                .enumerate()
                .map(|(i, row)| (i as f64, row.commits_for(&key) as f64))
                .collect();
            ChartLine { key, points }
        })
        .collect()
}

/// Render the weekly comparison chart, reusing a cached raster when the
/// inputs have not changed.
pub fn render_weekly_chart(
    rows: &[UnifiedWeeklyRow],
    repos: &[Repo],
    use_log_scale: bool,
) -> Result<Arc<ChartImage>, PlotError> {
    let style = ChartStyle::default();
    let key = cache_key(rows, repos, use_log_scale, &style);

    if let Some(image) = CHART_CACHE.lock().map_err(|e| e.to_string())?.get(&key) {
        return Ok(Arc::clone(image));
    }

    let image = Arc::new(render(rows, repos, use_log_scale, &style)?);
    CHART_CACHE
        .lock()
        .map_err(|e| e.to_string())?
        .put(key, Arc::clone(&image));
    Ok(image)
}

fn render(
    rows: &[UnifiedWeeklyRow],
    repos: &[Repo],
    use_log_scale: bool,
    style: &ChartStyle,
) -> Result<ChartImage, PlotError> {
    let theme = ChartTheme::default();
    let mut rgb = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut rgb, (style.width, style.height))
            .into_drawing_area();
        root.fill(&theme.background_color)?;

        if !rows.is_empty() && !repos.is_empty() {
            draw_weekly_lines(&root, rows, repos, use_log_scale, &theme, style)?;
        }
        root.present()?;
    }
    Ok(ChartImage {
        width: style.width,
        height: style.height,
        rgb,
    })
}

fn scale(value: f64, use_log_scale: bool) -> f64 {
    if use_log_scale {
        (value + 1.0).log10()
    } else {
        value
    }
}

fn draw_weekly_lines(
    root: &DrawingArea<BitMapBackend, Shift>,
    rows: &[UnifiedWeeklyRow],
    repos: &[Repo],
    use_log_scale: bool,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    let lines: Vec<ChartLine> = chart_lines(rows, repos)
        .into_iter()
        .map(|line| ChartLine {
            points: line
                .points
                .into_iter()
                .map(|(x, y)| (x, scale(y, use_log_scale)))
                .collect(),
            ..line
        })
        .collect();

    let values: Vec<f64> = lines
        .iter()
        .flat_map(|line| line.points.iter().map(|&(_, y)| y))
        .collect();
    let (min_val, max_val) = calculate_adaptive_range(&values);
    let x_max = (rows.len().max(2) - 1) as f64;

    let mut chart = ChartBuilder::on(root)
        .caption(
            "Weekly Commits",
            ("sans-serif", style.caption_size)
                .into_font()
                .color(&theme.text_color),
        )
        .margin(style.margin)
        .set_all_label_area_size(style.label_area_size)
        .build_cartesian_2d(0f64..x_max, min_val..max_val)?;

    // Week titles, oldest first, to match the x axis
    let labels: Vec<String> = rows
        .iter()
        .rev()
        .map(|row| {
            WeekLabel::from_epoch(row.week_start)
                .map(|label| format!("W{} {}", label.number, label.year))
                .unwrap_or_default()
        })
        .collect();
    let x_label_formatter = move |x: &f64| {
        let idx = x.round() as usize;
        let step = (labels.len() / 6).max(1);
        if idx < labels.len() && (idx % step == 0 || idx == labels.len() - 1) {
            labels[idx].clone()
        } else {
            String::new()
        }
    };
    let y_label_formatter = move |y: &f64| {
        let y = if use_log_scale { 10f64.powf(*y) - 1.0 } else { *y };
        if y.abs() >= 1_000.0 {
            format!("{:.1}K", y / 1_000.0)
        } else {
            format!("{:.0}", y)
        }
    };

    chart
        .configure_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(theme.grid_color)
        .axis_style(theme.axis_color)
        .y_desc("Commits")
        .label_style(("sans-serif", style.font_size).into_font().color(&theme.text_color))
        .x_label_formatter(&x_label_formatter)
        .y_label_formatter(&y_label_formatter)
        .x_label_style(
            ("sans-serif", style.font_size)
                .into_font()
                .color(&theme.text_color)
                .pos(Pos::new(HPos::Center, VPos::Top)),
        )
        .draw()?;

    for (index, line) in lines.into_iter().enumerate() {
        draw_line(&mut chart, line, theme.series_color(index), style.line_width)?;
    }

    chart
        .configure_series_labels()
        .background_style(theme.legend_background)
        .border_style(theme.axis_color)
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(("sans-serif", style.font_size).into_font().color(&theme.text_color))
        .draw()?;

    Ok(())
}

fn draw_line(
    chart: &mut WeeklyChart<'_, '_>,
    line: ChartLine,
    color: RGBAColor,
    line_width: u32,
) -> Result<(), PlotError> {
    chart
        .draw_series(LineSeries::new(line.points, color.stroke_width(line_width)))?
        .label(line.key)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    Ok(())
}

/// Vertical range for `values`, keeping one outlier from flattening the rest.
pub(super) fn calculate_adaptive_range(values: &[f64]) -> (f64, f64) {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let Some(&absolute_max) = sorted.last() else {
        return (0.0, 1.0);
    };
    if absolute_max <= 0.0 {
        return (0.0, 1.0);
    }

    let p95_idx = ((sorted.len() as f64 * 0.95) as usize)
        .max(1)
        .min(sorted.len() - 1);
    let normal_max = sorted[p95_idx];

    let display_max = if absolute_max > normal_max * 2.0 && normal_max > 0.0 {
        normal_max * 1.2
    } else {
        absolute_max * 1.1
    };

    (0.0, display_max)
}
