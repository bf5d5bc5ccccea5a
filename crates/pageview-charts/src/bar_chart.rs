//! Average daily page views per month, grouped by year.

use std::path::{Path, PathBuf};

use pageview_core::calendar::month_name;
use pageview_core::error::Result;
use pageview_core::formatting::{format_axis_value, format_category};
use pageview_core::models::{MonthlyPivot, PageViewTable};
use pageview_data::aggregator::{monthly_means, pivot_monthly};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::backend::FontSafeBackend;
use crate::chart::{ensure_not_empty, render_error, value_axis, ChartKind};
use crate::themes::{palette_color, ChartTheme, FONT_FAMILY, TAB10};

/// Title of the legend listing the month series.
pub const LEGEND_TITLE: &str = "Months";

/// Share of each year slot covered by its bars.
const GROUP_WIDTH: f64 = 0.8;

/// Draw the monthly averages and write `bar_plot.png` into `output_dir`.
pub fn draw_bar_plot(table: &PageViewTable, output_dir: &Path) -> Result<PathBuf> {
    let kind = ChartKind::Bar;
    ensure_not_empty(table, kind)?;

    let pivot = pivot_monthly(&monthly_means(table));
    let path = kind.output_path(output_dir);
    let backend = BitMapBackend::new(&path, kind.size());
    let root = FontSafeBackend::new(backend).into_drawing_area();
    draw_bars(root, &pivot, &ChartTheme::default()).map_err(|e| render_error(kind, e))?;

    Ok(path)
}

/// Zero-based months that have data in at least one year, in calendar order.
fn present_months(pivot: &MonthlyPivot) -> Vec<usize> {
    (0..12).filter(|m| pivot.has_month(*m)).collect()
}

/// Horizontal span of bar `slot` out of `slots` inside the year at `center`.
fn bar_span(center: f64, slot: usize, slots: usize) -> (f64, f64) {
    let width = GROUP_WIDTH / slots.max(1) as f64;
    let left = center - GROUP_WIDTH / 2.0 + slot as f64 * width;
    (left, left + width)
}

fn draw_bars<DB>(
    root: DrawingArea<DB, Shift>,
    pivot: &MonthlyPivot,
    theme: &ChartTheme,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&theme.background)?;

    let year_labels: Vec<String> = pivot.years.iter().map(|y| y.to_string()).collect();
    let months = present_months(pivot);
    let y_range = value_axis(
        pivot.min_mean().unwrap_or(0.0),
        pivot.max_mean().unwrap_or(0.0),
        true,
    );
    let x_max = year_labels.len().max(1) as f64 - 0.5;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5f64..x_max, y_range)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Years")
        .y_desc("Average Page Views")
        .x_labels(year_labels.len().max(1))
        .y_labels(10)
        .x_label_formatter(&|x: &f64| format_category(*x, &year_labels))
        .y_label_formatter(&|v: &f64| format_axis_value(*v))
        .axis_desc_style((FONT_FAMILY, theme.axis_desc_size))
        .label_style((FONT_FAMILY, theme.tick_size))
        .light_line_style(TRANSPARENT)
        .bold_line_style(theme.text.mix(theme.grid_alpha))
        .draw()?;

    // Heading entry for the legend box; it draws nothing on the plot.
    chart
        .draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())?
        .label(LEGEND_TITLE)
        .legend(|(x, y)| EmptyElement::at((x, y)));

    for (slot, &month_idx) in months.iter().enumerate() {
        let color = palette_color(&TAB10, month_idx);
        let bars = pivot.rows.iter().enumerate().filter_map(|(year_idx, row)| {
            let mean = row[month_idx]?;
            let (left, right) = bar_span(year_idx as f64, slot, months.len());
            Some(Rectangle::new([(left, 0.0), (right, mean)], color.filled()))
        });

        let name = month_name(month_idx as u32 + 1).unwrap_or_default();
        chart
            .draw_series(bars)?
            .label(name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(theme.background.mix(0.8))
        .border_style(theme.text.mix(0.3))
        .label_font((FONT_FAMILY, theme.legend_size))
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}
