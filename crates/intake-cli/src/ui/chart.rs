//! Area chart drawing for a calorie series.
//!
//! The series is resampled across the plot width by linear interpolation
//! and filled from the baseline up. The baseline is `min(0, lowest value)`
//! so negative entries still render.

use super::context::UiContext;
use super::theme::{styled, styles};

const EIGHTHS: [char; 9] = [
    ' ', '\u{2581}', '\u{2582}', '\u{2583}', '\u{2584}', '\u{2585}', '\u{2586}', '\u{2587}',
    '\u{2588}',
];

/// Draw `series` as an area chart with a labeled y axis.
///
/// `width` and `height` size the plot area, not counting the axis. Returns
/// no lines for an empty series.
pub fn area_chart(ctx: &UiContext, series: &[f64], width: usize, height: usize) -> Vec<String> {
    if series.is_empty() || width == 0 || height == 0 {
        return Vec::new();
    }

    let (lower, upper) = value_range(series);
    let columns: Vec<f64> = (0..width)
        .map(|col| (sample(series, col, width) - lower) / (upper - lower) * height as f64)
        .collect();

    let top_label = format!("{:.0}", upper);
    let bottom_label = format!("{:.0}", lower);
    let label_width = top_label.len().max(bottom_label.len());
    let (axis, corner, rule) = if ctx.unicode {
        ('\u{2502}', '\u{2514}', '\u{2500}')
    } else {
        ('|', '+', '-')
    };

    let mut lines = Vec::with_capacity(height + 1);
    for row in (0..height).rev() {
        let label = if row == height - 1 {
            top_label.as_str()
        } else if row == 0 {
            bottom_label.as_str()
        } else {
            ""
        };
        let body: String = columns
            .iter()
            .map(|level| cell(*level, row, ctx.unicode))
            .collect();
        lines.push(format!(
            "{:>lw$} {}{}",
            label,
            axis,
            styled(&body, styles::area(), ctx.color),
            lw = label_width
        ));
    }
    lines.push(format!(
        "{:>lw$} {}{}",
        "",
        corner,
        rule.to_string().repeat(width),
        lw = label_width
    ));
    lines
}

fn value_range(series: &[f64]) -> (f64, f64) {
    let lower = series.iter().copied().fold(0.0_f64, f64::min);
    let upper = series.iter().copied().fold(0.0_f64, f64::max);
    if upper > lower {
        (lower, upper)
    } else {
        (lower, lower + 1.0)
    }
}

/// Value at plot column `col`, interpolated between neighbouring points.
fn sample(series: &[f64], col: usize, width: usize) -> f64 {
    if series.len() == 1 || width == 1 {
        return series[0];
    }
    let position = col as f64 * (series.len() - 1) as f64 / (width - 1) as f64;
    let left = position.floor() as usize;
    let right = (left + 1).min(series.len() - 1);
    let t = position - left as f64;
    series[left] + (series[right] - series[left]) * t
}

fn cell(level: f64, row: usize, unicode: bool) -> char {
    let fill = (level - row as f64).clamp(0.0, 1.0);
    if unicode {
        EIGHTHS[(fill * 8.0).round() as usize]
    } else if fill >= 0.5 {
        '#'
    } else if fill >= 0.125 {
        '.'
    } else {
        ' '
    }
}
