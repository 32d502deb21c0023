use knx_ga_exporter_csvs::{convert_workbook, TracingObserver};

use crate::config::ExporterConfig;
use crate::error::CliResult;

pub fn execute(config: &ExporterConfig) -> CliResult<()> {
    let summary = convert_workbook(
        &config.input_file,
        &config.layout,
        &config.output_file,
        &config.settings,
        &TracingObserver,
    )?;

    tracing::debug!(
        "Statistics: #GA: {}, #rows: {}",
        summary.group_addresses,
        summary.rows
    );
    tracing::info!("Conversion successfully finished.");

    Ok(())
}
