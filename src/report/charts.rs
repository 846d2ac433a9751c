//! PNG chart rendering for the processed dataset.
//!
//! Two artifacts per run, regenerated wholesale:
//!
//! - `supply.png` - total supply with the trailing-mean overlay
//! - `holders.png` - top-holder and top-10 share of supply
//!
//! Output depends only on the dataset rows and chart configuration, never
//! on the wall clock, so identical input reproduces identical artifacts.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use plotters::prelude::*;

use crate::error::RenderError;
use crate::store::{DataLayout, ProcessedRow};

/// Bitmap dimensions for every rendered chart.
pub const CHART_WIDTH: u32 = 800;
pub const CHART_HEIGHT: u32 = 480;

/// Fraction of the value span added above and below the series.
const Y_PADDING: f64 = 0.05;

/// Render every chart artifact into the reports directory, returning the
/// paths written. Fails with [`RenderError::EmptyDataset`] before touching
/// the backend when there is nothing to draw.
pub fn render_charts(
    mint: &str,
    rows: &[ProcessedRow],
    layout: &DataLayout,
) -> Result<Vec<PathBuf>, RenderError> {
    if rows.is_empty() {
        return Err(RenderError::EmptyDataset);
    }

    let supply_path = layout.supply_chart();
    render_supply_chart(mint, rows, &supply_path)?;

    let holders_path = layout.holders_chart();
    render_holders_chart(mint, rows, &holders_path)?;

    Ok(vec![supply_path, holders_path])
}

fn render_supply_chart(mint: &str, rows: &[ProcessedRow], path: &Path) -> Result<(), RenderError> {
    let (x_start, x_end) = time_bounds(rows);
    let (y_min, y_max) = padded_bounds(rows.iter().flat_map(|r| [r.supply, r.supply_ma]));

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(RenderError::backend)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{} supply", short_mint(mint)), ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_start..x_end, y_min..y_max)
        .map_err(RenderError::backend)?;

    chart
        .configure_mesh()
        .x_labels(6)
        .x_label_formatter(&|dt: &DateTime<Utc>| dt.format("%Y-%m-%d").to_string())
        .y_desc("Supply (UI units)")
        .draw()
        .map_err(RenderError::backend)?;

    chart
        .draw_series(LineSeries::new(rows.iter().map(|r| (r.timestamp, r.supply)), &BLUE))
        .map_err(RenderError::backend)?
        .label("supply")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    // Markers keep single-row datasets visible
    chart
        .draw_series(rows.iter().map(|r| Circle::new((r.timestamp, r.supply), 3, BLUE.filled())))
        .map_err(RenderError::backend)?;

    chart
        .draw_series(LineSeries::new(rows.iter().map(|r| (r.timestamp, r.supply_ma)), &RED))
        .map_err(RenderError::backend)?
        .label("7-run mean")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(RenderError::backend)?;

    root.present().map_err(RenderError::backend)?;
    Ok(())
}

fn render_holders_chart(mint: &str, rows: &[ProcessedRow], path: &Path) -> Result<(), RenderError> {
    let (x_start, x_end) = time_bounds(rows);
    let (y_min, y_max) =
        padded_bounds(rows.iter().flat_map(|r| [r.top_holder_share_pct, r.top10_share_pct]));

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(RenderError::backend)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{} holder concentration", short_mint(mint)), ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_start..x_end, y_min..y_max)
        .map_err(RenderError::backend)?;

    chart
        .configure_mesh()
        .x_labels(6)
        .x_label_formatter(&|dt: &DateTime<Utc>| dt.format("%Y-%m-%d").to_string())
        .y_desc("Share of supply (%)")
        .draw()
        .map_err(RenderError::backend)?;

    chart
        .draw_series(LineSeries::new(
            rows.iter().map(|r| (r.timestamp, r.top10_share_pct)),
            &BLUE,
        ))
        .map_err(RenderError::backend)?
        .label("top 10 accounts")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(
            rows.iter().map(|r| Circle::new((r.timestamp, r.top10_share_pct), 3, BLUE.filled())),
        )
        .map_err(RenderError::backend)?;

    chart
        .draw_series(LineSeries::new(
            rows.iter().map(|r| (r.timestamp, r.top_holder_share_pct)),
            &RED,
        ))
        .map_err(RenderError::backend)?
        .label("top account")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(RenderError::backend)?;

    root.present().map_err(RenderError::backend)?;
    Ok(())
}

/// X-axis range covering all rows, widened by 12h per side when the dataset
/// has a single row so the range never degenerates.
fn time_bounds(rows: &[ProcessedRow]) -> (DateTime<Utc>, DateTime<Utc>) {
    let first = rows.first().map(|r| r.timestamp).unwrap_or_default();
    let last = rows.last().map(|r| r.timestamp).unwrap_or(first);

    if first == last {
        (first - Duration::hours(12), last + Duration::hours(12))
    } else {
        (first, last)
    }
}

/// Min/max over `values` padded by [`Y_PADDING`] of the span. The lower
/// bound never drops below zero, matching the non-negative series drawn
/// here. Flat series get a fixed margin instead of a zero-height range.
fn padded_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }

    let span = max - min;
    let margin = if span > 0.0 { span * Y_PADDING } else { (max.abs() * Y_PADDING).max(1.0) };

    ((min - margin).max(0.0), max + margin)
}

/// Abbreviate a base58 mint for chart captions.
fn short_mint(mint: &str) -> String {
    if mint.len() <= 12 {
        mint.to_string()
    } else {
        format!("{}..{}", &mint[..4], &mint[mint.len() - 4..])
    }
}
