//! Daily page views as a single line over time.

use std::path::{Path, PathBuf};

use pageview_core::calendar::date_to_axis;
use pageview_core::error::Result;
use pageview_core::formatting::{format_axis_days, format_axis_value};
use pageview_core::models::PageViewTable;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::backend::FontSafeBackend;
use crate::chart::{ensure_not_empty, render_error, value_axis, ChartKind};
use crate::themes::{ChartTheme, FONT_FAMILY};

pub const LINE_PLOT_TITLE: &str = "Daily freeCodeCamp Forum Page Views 5/2016-12/2019";

/// Draw value against date and write `line_plot.png` into `output_dir`.
pub fn draw_line_plot(table: &PageViewTable, output_dir: &Path) -> Result<PathBuf> {
    let kind = ChartKind::Line;
    ensure_not_empty(table, kind)?;

    let path = kind.output_path(output_dir);
    let backend = BitMapBackend::new(&path, kind.size());
    let root = FontSafeBackend::new(backend).into_drawing_area();
    draw_line(root, table, &ChartTheme::default()).map_err(|e| render_error(kind, e))?;

    Ok(path)
}

fn draw_line<DB>(
    root: DrawingArea<DB, Shift>,
    table: &PageViewTable,
    theme: &ChartTheme,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&theme.background)?;

    let (Some(first), Some(last)) = (table.first_date(), table.last_date()) else {
        return Ok(());
    };
    let x_start = date_to_axis(first);
    // A single-day series still needs a non-degenerate axis.
    let x_end = date_to_axis(last).max(x_start + 1);
    let y_range = value_axis(
        table.min_value().unwrap_or(0.0),
        table.max_value().unwrap_or(0.0),
        false,
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(LINE_PLOT_TITLE, (FONT_FAMILY, theme.title_size))
        .margin(25)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(x_start..x_end, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Page Views")
        .x_labels(16)
        .y_labels(10)
        .x_label_formatter(&|d: &i32| format_axis_days(*d))
        .y_label_formatter(&|v: &f64| format_axis_value(*v))
        .axis_desc_style((FONT_FAMILY, theme.axis_desc_size))
        .label_style((FONT_FAMILY, theme.tick_size))
        .light_line_style(theme.text.mix(theme.grid_alpha / 2.0))
        .bold_line_style(theme.text.mix(theme.grid_alpha))
        .draw()?;

    chart.draw_series(LineSeries::new(
        table.iter().map(|r| (date_to_axis(r.date), r.value)),
        &theme.line,
    ))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_table;
    use chrono::NaiveDate;
    use pageview_core::error::VisualizerError;
    use pageview_core::models::PageViewRecord;
    use tempfile::TempDir;

    #[test]
    fn test_line_plot_writes_png() {
        let dir = TempDir::new().unwrap();
        let path = draw_line_plot(&sample_table(), dir.path()).unwrap();

        assert_eq!(path, dir.path().join("line_plot.png"));
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_line_plot_caption_drawn_without_font() {
        // Nothing in the test suite registers a font, so the caption must come
        // from the bitmap glyph fallback.
        let (w, h) = ChartKind::Line.size();
        let mut buf = vec![0u8; (w * h * 3) as usize];
        {
            let backend = BitMapBackend::with_buffer(&mut buf, (w, h));
            let root = FontSafeBackend::new(backend).into_drawing_area();
            draw_line(root, &sample_table(), &ChartTheme::default()).unwrap();
        }

        let dark_in_caption = (20..70u32).any(|y| {
            (900..1500u32).any(|x| {
                let i = ((y * w + x) * 3) as usize;
                buf[i..i + 3].iter().all(|c| *c < 100)
            })
        });
        assert!(dark_in_caption, "caption band must not be blank");
    }

    #[test]
    fn test_line_plot_single_row() {
        let dir = TempDir::new().unwrap();
        let table = PageViewTable::new(vec![PageViewRecord::new(
            NaiveDate::from_ymd_opt(2018, 3, 1).unwrap(),
            1500.0,
        )]);
        let path = draw_line_plot(&table, dir.path()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_line_plot_negative_values() {
        let dir = TempDir::new().unwrap();
        let day = |d| NaiveDate::from_ymd_opt(2018, 3, d).unwrap();
        let table = PageViewTable::new(vec![
            PageViewRecord::new(day(1), -250.0),
            PageViewRecord::new(day(2), 400.0),
            PageViewRecord::new(day(3), -80.0),
        ]);
        assert!(draw_line_plot(&table, dir.path()).unwrap().exists());
    }

    #[test]
    fn test_line_plot_empty_table() {
        let dir = TempDir::new().unwrap();
        let err = draw_line_plot(&PageViewTable::default(), dir.path()).unwrap_err();
        assert!(matches!(err, VisualizerError::EmptyDataset(_)));
    }
}
