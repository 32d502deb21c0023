/*!
# KNX Group Address CSV Export

This crate converts a KNX planning spreadsheet into the group address CSV the ETS
configuration tool imports.

## Pipeline

- **`workbook`**: opens the workbook and yields sheet rows (`calamine`)
- **`extraction`**: maps row cells to [`GroupAddress`] records under a [`LayoutConfig`],
  skipping template rows and failing fast on incomplete ones
- **`grouping`**: main / middle group hierarchy in first-seen (or ascending) order
- **`rendering`**: the `1/1` and `3/3` CSV layouts, always quoted, in the selected encoding,
  committed atomically

Progress is reported through an injected [`ExportObserver`]; [`TracingObserver`] forwards it to
`tracing`.

## Usage

```rust,no_run
use knx_ga_exporter_csvs::{
    convert_workbook, ExporterResult, LayoutConfig, RenderSettings, TracingObserver,
};

fn example() -> ExporterResult<()> {
    let summary = convert_workbook(
        "KNX-planning.xlsx",
        &LayoutConfig::default(),
        "knx-ga-addresses.csv",
        &RenderSettings::default(),
        &TracingObserver,
    )?;
    println!("{} group addresses", summary.group_addresses);
    Ok(())
}
```
*/

pub mod cells;
pub mod encoding;
pub mod errors;
pub mod extraction;
pub mod grouping;
pub mod observer;
pub mod pipeline;
pub mod rendering;
pub mod schemas;
pub mod workbook;

// Re-export main types for convenience
pub use cells::{CellValue, Row};
pub use encoding::{OutputEncoding, OUTPUT_ENCODING_DEFAULT};
pub use errors::{
    ConfigError, EncodeError, ExporterError, ExporterResult, ExtractError, RecordError,
    RenderError, WorkbookError,
};
pub use extraction::{extract, is_template_row, LayoutConfig, DEFAULT_SHEET_NAME};
pub use grouping::{group_addresses, GroupOrder, MainGroup, MiddleGroup};
pub use observer::{ExportObserver, NoopObserver, TracingObserver};
pub use pipeline::{convert_workbook, ConversionSummary};
pub use rendering::{
    export_csv, format_ga_description, format_ga_name, render, CsvFormat, CsvSeparator,
    RenderSettings,
};
pub use schemas::{
    GroupAddress, FULL_HIERARCHY_CSV_HEADERS, NAME_ADDRESS_CSV_HEADERS, SECURITY_AUTO,
};
pub use workbook::Workbook;
