/*!
# Conversion Pipeline

Workbook → extracted group addresses → CSV file, in one sequential pass.
*/

use std::path::Path;

use crate::{
    errors::ExporterResult,
    extraction::{extract, LayoutConfig},
    observer::ExportObserver,
    rendering::{export_csv, RenderSettings},
    workbook::Workbook,
};

/// Figures of a finished conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionSummary {
    /// Sheet rows inspected
    pub rows: usize,
    /// Group addresses written
    pub group_addresses: usize,
}

/// Convert the planning workbook at `input` into the CSV file at `output`.
///
/// The layout is validated before the workbook is opened, and `output` is only created once
/// every row rendered.
pub fn convert_workbook<P, Q>(
    input: P,
    layout: &LayoutConfig,
    output: Q,
    settings: &RenderSettings,
    observer: &dyn ExportObserver,
) -> ExporterResult<ConversionSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    layout.validate()?;

    observer.workbook_loading(input.as_ref());
    let mut workbook = Workbook::open(input)?;
    let rows = workbook.rows(&layout.sheet_name, layout.first_row, layout.last_column)?;
    let n_rows = rows.len();

    let gas = extract(rows, layout, observer)?;
    export_csv(output, &gas, settings, observer)?;

    Ok(ConversionSummary {
        rows: n_rows,
        group_addresses: gas.len(),
    })
}
