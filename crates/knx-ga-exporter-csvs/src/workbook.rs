/*!
# Workbook Row Source

Reads the planning workbook (XLSX, XLSM, XLS, ODS) through `calamine` and hands out sheet rows
addressed the way the sheet shows them: 1-based row numbers, columns counted from column A.
*/

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};

use crate::cells::{CellValue, Row};
use crate::errors::WorkbookError;

/// An opened workbook.
pub struct Workbook {
    sheets: Sheets<BufReader<File>>,
}

impl Workbook {
    /// Open the workbook at `path`.
    ///
    /// A path that is not a readable file fails before any parsing is attempted.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, WorkbookError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(WorkbookError::InputNotFound(path.to_path_buf()));
        }

        let sheets = open_workbook_auto(path).map_err(|source| WorkbookError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self { sheets })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    /// Rows of `sheet_name` from `first_row` (1-based) to the last used row, each holding
    /// `last_column` cells.
    pub fn rows(
        &mut self,
        sheet_name: &str,
        first_row: usize,
        last_column: usize,
    ) -> Result<Vec<Row>, WorkbookError> {
        let available = self.sheet_names();
        if !available.iter().any(|name| name == sheet_name) {
            return Err(WorkbookError::SheetNotFound {
                name: sheet_name.to_string(),
                available,
            });
        }

        let range = self
            .sheets
            .worksheet_range(sheet_name)
            .map_err(|source| WorkbookError::Read {
                name: sheet_name.to_string(),
                source,
            })?;

        Ok(rows_from_range(&range, first_row, last_column))
    }
}

/// Cut absolute sheet rows out of a used range.
///
/// `calamine` ranges start at the first used cell; positions here are absolute so that row 8
/// stays row 8 and column A stays index 0 whatever the used range looks like.
pub fn rows_from_range(range: &Range<Data>, first_row: usize, last_column: usize) -> Vec<Row> {
    let Some((end_row, _)) = range.end() else {
        return Vec::new();
    };
    let n_row_start = u32::try_from(first_row.saturating_sub(1)).unwrap_or(u32::MAX);
    let n_col_end = u32::try_from(last_column).unwrap_or(u32::MAX);

    (n_row_start..=end_row)
        .map(|n_row| {
            let cells = (0..n_col_end)
                .map(|n_col| {
                    range
                        .get_value((n_row, n_col))
                        .map(CellValue::from)
                        .unwrap_or_default()
                })
                .collect();
            Row::new(n_row as usize + 1, cells)
        })
        .collect()
}
