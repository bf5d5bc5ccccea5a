//! Year-wise and month-wise distributions side by side.

use std::path::{Path, PathBuf};

use pageview_core::error::Result;
use pageview_core::formatting::{format_axis_value, format_category};
use pageview_core::models::PageViewTable;
use pageview_core::stats::BoxStats;
use pageview_data::aggregator::{group_by_month, group_by_year, ValueGroup};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::backend::FontSafeBackend;
use crate::chart::{ensure_not_empty, render_error, value_axis, ChartKind};
use crate::themes::{evenly_spaced_hues, palette_color, ChartTheme, FONT_FAMILY, SET1};

pub const YEAR_PANEL_TITLE: &str = "Year-wise Box Plot (Trend)";
pub const MONTH_PANEL_TITLE: &str = "Month-wise Box Plot (Seasonality)";

/// Share of each category slot covered by its box.
const BOX_WIDTH: f64 = 0.8;

/// One side of the figure.
struct Panel<'a> {
    title: &'static str,
    x_desc: &'static str,
    groups: &'a [ValueGroup],
    colors: Vec<RGBColor>,
}

/// Draw both distribution panels and write `box_plot.png` into `output_dir`.
pub fn draw_box_plot(table: &PageViewTable, output_dir: &Path) -> Result<PathBuf> {
    let kind = ChartKind::Box;
    ensure_not_empty(table, kind)?;

    let years = group_by_year(table);
    let months = group_by_month(table);
    let panels = [
        Panel {
            title: YEAR_PANEL_TITLE,
            x_desc: "Year",
            groups: &years,
            colors: (0..years.len()).map(|i| palette_color(&SET1, i)).collect(),
        },
        Panel {
            title: MONTH_PANEL_TITLE,
            x_desc: "Month",
            groups: &months,
            colors: evenly_spaced_hues(months.len()),
        },
    ];

    let path = kind.output_path(output_dir);
    let backend = BitMapBackend::new(&path, kind.size());
    let root = FontSafeBackend::new(backend).into_drawing_area();
    draw_panels(root, &panels, &ChartTheme::default()).map_err(|e| render_error(kind, e))?;

    Ok(path)
}

fn draw_panels<DB>(
    root: DrawingArea<DB, Shift>,
    panels: &[Panel<'_>],
    theme: &ChartTheme,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&theme.background)?;

    let areas = root.split_evenly((1, panels.len().max(1)));
    for (area, panel) in areas.iter().zip(panels) {
        draw_box_panel(area, panel, theme)?;
    }

    root.present()?;
    Ok(())
}

fn draw_box_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel<'_>,
    theme: &ChartTheme,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let labels: Vec<String> = panel.groups.iter().map(|g| g.label.clone()).collect();
    let stats: Vec<Option<BoxStats>> = panel.groups.iter().map(ValueGroup::box_stats).collect();

    let bottom = stats
        .iter()
        .flatten()
        .map(BoxStats::lower_extent)
        .min_by(f64::total_cmp)
        .unwrap_or(0.0);
    let top = stats
        .iter()
        .flatten()
        .map(BoxStats::upper_extent)
        .max_by(f64::total_cmp)
        .unwrap_or(0.0);
    let x_max = labels.len().max(1) as f64 - 0.5;

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, (FONT_FAMILY, theme.title_size))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5f64..x_max, value_axis(bottom, top, false))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(panel.x_desc)
        .y_desc("Page Views")
        .x_labels(labels.len().max(1))
        .y_labels(10)
        .x_label_formatter(&|x: &f64| format_category(*x, &labels))
        .y_label_formatter(&|v: &f64| format_axis_value(*v))
        .axis_desc_style((FONT_FAMILY, theme.axis_desc_size))
        .label_style((FONT_FAMILY, theme.tick_size))
        .light_line_style(TRANSPARENT)
        .bold_line_style(theme.text.mix(theme.grid_alpha))
        .draw()?;

    let edge = theme.box_edge;
    let half = BOX_WIDTH / 2.0;
    let cap = BOX_WIDTH / 4.0;
    let boxes: Vec<(f64, &BoxStats, RGBColor)> = stats
        .iter()
        .enumerate()
        .filter_map(|(i, s)| {
            let color = panel.colors.get(i).copied().unwrap_or(edge);
            s.as_ref().map(|s| (i as f64, s, color))
        })
        .collect();

    // Box body.
    chart.draw_series(boxes.iter().map(|(x, s, color)| {
        Rectangle::new([(x - half, s.q1), (x + half, s.q3)], color.filled())
    }))?;
    chart.draw_series(boxes.iter().map(|(x, s, _)| {
        Rectangle::new([(x - half, s.q1), (x + half, s.q3)], edge.stroke_width(1))
    }))?;

    // Whiskers with their caps, then the median on top of the body.
    chart.draw_series(boxes.iter().flat_map(|(x, s, _)| {
        [
            PathElement::new(vec![(*x, s.whisker_low), (*x, s.q1)], edge.stroke_width(1)),
            PathElement::new(vec![(*x, s.q3), (*x, s.whisker_high)], edge.stroke_width(1)),
            PathElement::new(
                vec![(x - cap, s.whisker_low), (x + cap, s.whisker_low)],
                edge.stroke_width(1),
            ),
            PathElement::new(
                vec![(x - cap, s.whisker_high), (x + cap, s.whisker_high)],
                edge.stroke_width(1),
            ),
            PathElement::new(
                vec![(x - half, s.median), (x + half, s.median)],
                edge.stroke_width(2),
            ),
        ]
    }))?;

    let r = theme.flier_radius;
    chart.draw_series(boxes.iter().flat_map(|(x, s, _)| {
        s.outliers.iter().map(move |v| {
            EmptyElement::at((*x, *v))
                + Polygon::new(vec![(0, -r), (r, 0), (0, r), (-r, 0)], edge.filled())
        })
    }))?;

    Ok(())
}
