mod bootstrap;

use anyhow::{Context, Result};
use pageview_charts::{register_chart_font, render_charts, ChartKind};
use pageview_core::settings::Settings;
use pageview_data::cleaner::remove_outliers;
use pageview_data::reader::load_page_views;

fn main() -> Result<()> {
    let settings = Settings::load();
    settings.validate()?;

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Page view visualizer v{} starting", env!("CARGO_PKG_VERSION"));

    if let Some(font) = register_chart_font(settings.font.as_deref()) {
        tracing::debug!("Chart text uses {}", font.display());
    }

    let table = load_page_views(&settings.data_file)
        .with_context(|| format!("Failed to load {}", settings.data_file.display()))?;

    let report = remove_outliers(&table, settings.band()?);
    if report.table.is_empty() {
        anyhow::bail!("No rows left after outlier removal");
    }

    let kinds = settings
        .charts
        .iter()
        .map(|name| name.parse::<ChartKind>())
        .collect::<Result<Vec<_>, _>>()?;

    bootstrap::ensure_output_dir(&settings.output_dir)?;

    let written = render_charts(&report.table, &settings.output_dir, &kinds)?;
    for path in &written {
        println!("{}", path.display());
    }

    Ok(())
}
