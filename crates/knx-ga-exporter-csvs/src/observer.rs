/*!
# Export Observer

Conversion progress is reported through an [`ExportObserver`] handed to the extractor and
the renderer, instead of the components reaching for a process-wide logger.
*/

use std::path::Path;

use crate::rendering::RenderSettings;
use crate::schemas::GroupAddress;

/// Receives conversion events. Every method defaults to doing nothing.
pub trait ExportObserver {
    /// The input workbook is about to be read.
    fn workbook_loading(&self, _path: &Path) {}

    /// A sheet row was accepted as a group address.
    fn record_extracted(&self, _row: usize, _record: &GroupAddress) {}

    /// A sheet row was dropped by the template-row pre-filter.
    fn row_skipped(&self, _row: usize) {}

    /// Rendering is about to start.
    fn export_started(&self, _settings: &RenderSettings, _path: Option<&Path>) {}

    /// A main group header row was written.
    fn main_group_exported(&self, _main: &str, _name: &str) {}

    /// A middle group header row was written.
    fn middle_group_exported(&self, _main: &str, _middle: &str, _name: &str) {}

    /// A leaf row was written.
    fn leaf_exported(&self, _record: &GroupAddress) {}
}

/// Observer that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ExportObserver for NoopObserver {}

/// Observer that forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ExportObserver for TracingObserver {
    fn workbook_loading(&self, path: &Path) {
        tracing::info!("Loading XLSX input file '{}'", path.display());
    }

    fn record_extracted(&self, _row: usize, record: &GroupAddress) {
        tracing::debug!("Parsed GA: {}", record);
    }

    fn row_skipped(&self, row: usize) {
        tracing::trace!(row, "Skipping incomplete or template row");
    }

    fn export_started(&self, settings: &RenderSettings, path: Option<&Path>) {
        let target = path.map_or_else(|| "<memory>".to_string(), |p| p.display().to_string());
        tracing::info!(
            "Exporting group addresses into CSV file '{}'. format: {}, separator: '{}', encoding: {}",
            target,
            settings.format,
            settings.separator.display_char(),
            settings.encoding,
        );
    }

    fn main_group_exported(&self, main: &str, name: &str) {
        tracing::debug!("Exporting main group {:<10} | {} |", main, name);
    }

    fn middle_group_exported(&self, main: &str, middle: &str, name: &str) {
        tracing::debug!(
            "Exporting   middle group {:<8} | {} |",
            format!("{main}/{middle}"),
            name
        );
    }

    fn leaf_exported(&self, record: &GroupAddress) {
        tracing::debug!("Exporting     sub group: {}", record);
    }
}
