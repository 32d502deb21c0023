/*!
# Group Address Extraction

Walks planning sheet rows under a [`LayoutConfig`] column mapping and builds
[`GroupAddress`] records.

Template and placeholder rows are dropped before any record is built: a row without a
datapoint type, or without a compiled address when that column is configured, is skipped
silently. Every other row must yield a complete record; the first one that does not aborts
the extraction.
*/

use crate::{
    cells::{CellValue, Row},
    errors::{ConfigError, ExtractError},
    observer::ExportObserver,
    schemas::GroupAddress,
};

// ================================================================================================
// Layout
// ================================================================================================

/// Default name of the sheet holding the group addresses
pub const DEFAULT_SHEET_NAME: &str = "KNX Group Addresses";

/// Where the group address data lives in the workbook.
///
/// `first_row` is 1-based like the sheet itself; all column indices are zero-based from
/// column A.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    pub sheet_name: String,
    pub first_row: usize,
    pub last_column: usize,
    pub main_id_column: usize,
    pub main_name_column: usize,
    pub middle_id_column: usize,
    pub middle_name_column: usize,
    pub sub_id_column: usize,
    pub sub_name_column: usize,
    pub dpt_column: usize,
    pub target_id_column: usize,
    pub compiled_address_column: Option<usize>,
    pub comment_column: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            first_row: 8,
            last_column: 10,
            main_id_column: 0,
            main_name_column: 1,
            middle_id_column: 2,
            middle_name_column: 3,
            sub_id_column: 4,
            sub_name_column: 8,
            dpt_column: 5,
            target_id_column: 6,
            compiled_address_column: Some(7),
            comment_column: 9,
        }
    }
}

impl LayoutConfig {
    /// Check row/column bounds before any workbook is opened.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sheet_name.is_empty() {
            return Err(ConfigError::InvalidLayout(
                "sheet name must not be empty".to_string(),
            ));
        }
        if self.first_row == 0 {
            return Err(ConfigError::InvalidLayout(
                "first row is 1-based and must be at least 1".to_string(),
            ));
        }
        if self.last_column == 0 {
            return Err(ConfigError::InvalidLayout(
                "last column must be at least 1".to_string(),
            ));
        }

        for (name, column) in self.columns() {
            if column >= self.last_column {
                return Err(ConfigError::InvalidLayout(format!(
                    "{name} column {column} is outside the last column bound {}",
                    self.last_column
                )));
            }
        }

        Ok(())
    }

    fn columns(&self) -> Vec<(&'static str, usize)> {
        let mut columns = vec![
            ("main ID", self.main_id_column),
            ("main name", self.main_name_column),
            ("middle ID", self.middle_id_column),
            ("middle name", self.middle_name_column),
            ("sub ID", self.sub_id_column),
            ("sub name", self.sub_name_column),
            ("DPT", self.dpt_column),
            ("target ID", self.target_id_column),
            ("comment", self.comment_column),
        ];
        if let Some(column) = self.compiled_address_column {
            columns.push(("compiled GA", column));
        }
        columns
    }
}

// ================================================================================================
// Extraction
// ================================================================================================

/// True for template rows: no datapoint type, or no compiled address when that column is set.
pub fn is_template_row(row: &Row, layout: &LayoutConfig) -> bool {
    let dpt = row.cell(layout.dpt_column);
    if dpt.is_absent() || dpt.is_zero() {
        return true;
    }

    layout.compiled_address_column.is_some_and(|column| {
        let compiled = row.cell(column);
        compiled.is_absent() || compiled.is_zero()
    })
}

/// Extract group addresses from `rows` in traversal order.
///
/// Fails on the first row that passes the template filter but lacks a mandatory field.
pub fn extract<I>(
    rows: I,
    layout: &LayoutConfig,
    observer: &dyn ExportObserver,
) -> Result<Vec<GroupAddress>, ExtractError>
where
    I: IntoIterator<Item = Row>,
{
    let mut gas = Vec::new();

    for row in rows {
        if is_template_row(&row, layout) {
            observer.row_skipped(row.number);
            continue;
        }

        let text = |column: usize| row.cell(column).to_text();
        let ga = GroupAddress::new(
            text(layout.main_id_column),
            text(layout.middle_id_column),
            text(layout.sub_id_column),
            text(layout.main_name_column),
            text(layout.middle_name_column),
            text(layout.sub_name_column),
            target_id(row.cell(layout.target_id_column)),
            text(layout.dpt_column),
            text(layout.comment_column),
        )
        .map_err(|source| ExtractError::Record {
            row: row.number,
            source,
        })?;

        observer.record_extracted(row.number, &ga);
        gas.push(ga);
    }

    Ok(gas)
}

fn target_id(cell: &CellValue) -> Option<String> {
    if cell.is_zero() {
        return None;
    }
    cell.to_text()
}

// ================================================================================================
// Tests
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RecordError;
    use crate::observer::NoopObserver;
    use std::cell::RefCell;

    /// Row in the default layout: ids, names, dpt, target, compiled GA, sub name, comment
    #[allow(clippy::too_many_arguments)]
    fn row(
        number: usize,
        main: CellValue,
        main_name: CellValue,
        middle: CellValue,
        middle_name: CellValue,
        sub: CellValue,
        dpt: CellValue,
        target: CellValue,
        compiled: CellValue,
        sub_name: CellValue,
        comment: CellValue,
    ) -> Row {
        Row::new(
            number,
            vec![
                main,
                main_name,
                middle,
                middle_name,
                sub,
                dpt,
                target,
                compiled,
                sub_name,
                comment,
            ],
        )
    }

    fn leaf(number: usize, sub: i64, sub_name: &str) -> Row {
        row(
            number,
            1i64.into(),
            "Home".into(),
            1i64.into(),
            "Lights".into(),
            sub.into(),
            "1.001".into(),
            CellValue::Empty,
            format!("1/1/{sub}").into(),
            sub_name.into(),
            CellValue::Empty,
        )
    }

    fn with_cell(mut row: Row, column: usize, value: CellValue) -> Row {
        row.cells[column] = value;
        row
    }

    #[derive(Default)]
    struct RecordingObserver {
        extracted: RefCell<Vec<(usize, String)>>,
        skipped: RefCell<Vec<usize>>,
    }

    impl ExportObserver for RecordingObserver {
        fn record_extracted(&self, row: usize, record: &GroupAddress) {
            self.extracted.borrow_mut().push((row, record.address()));
        }

        fn row_skipped(&self, row: usize) {
            self.skipped.borrow_mut().push(row);
        }
    }

    #[test]
    fn test_extracts_in_row_order() {
        let layout = LayoutConfig::default();
        let rows = vec![leaf(8, 1, "Kitchen"), leaf(9, 2, "Hallway")];

        let gas = extract(rows, &layout, &NoopObserver).unwrap();

        assert_eq!(gas.len(), 2);
        assert_eq!(gas[0].address(), "1/1/1");
        assert_eq!(gas[0].sub_name(), "Kitchen");
        assert_eq!(gas[0].main_name(), "Home");
        assert_eq!(gas[0].dpt(), "1.001");
        assert_eq!(gas[0].target_id(), None);
        assert_eq!(gas[1].address(), "1/1/2");
    }

    #[test]
    fn test_template_rows_are_skipped() {
        let layout = LayoutConfig::default();
        let rows = vec![
            with_cell(leaf(8, 1, "no dpt"), layout.dpt_column, CellValue::Empty),
            with_cell(leaf(9, 2, "zero dpt"), layout.dpt_column, 0i64.into()),
            with_cell(leaf(10, 3, "no GA"), 7, CellValue::Empty),
            with_cell(leaf(11, 4, "zero GA"), 7, 0.0.into()),
            leaf(12, 5, "kept"),
            Row::new(13, vec![]),
        ];
        let observer = RecordingObserver::default();

        let gas = extract(rows, &layout, &observer).unwrap();

        assert_eq!(gas.len(), 1);
        assert_eq!(gas[0].sub_name(), "kept");
        assert_eq!(*observer.skipped.borrow(), vec![8, 9, 10, 11, 13]);
        assert_eq!(*observer.extracted.borrow(), vec![(12, "1/1/5".to_string())]);
    }

    #[test]
    fn test_skipped_template_row_with_missing_names_raises_nothing() {
        let layout = LayoutConfig::default();
        let template = row(
            8,
            1i64.into(),
            CellValue::Empty,
            CellValue::Empty,
            CellValue::Empty,
            CellValue::Empty,
            CellValue::Empty,
            CellValue::Empty,
            CellValue::Empty,
            CellValue::Empty,
            CellValue::Empty,
        );

        assert!(extract(vec![template], &layout, &NoopObserver)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_incomplete_row_aborts_extraction() {
        let layout = LayoutConfig::default();
        let rows = vec![
            leaf(8, 1, "Kitchen"),
            with_cell(leaf(9, 0, "Missing main group name"), 1, CellValue::Empty),
            leaf(10, 2, "Hallway"),
        ];

        let err = extract(rows, &layout, &NoopObserver).unwrap_err();

        let ExtractError::Record { row, source } = &err;
        assert_eq!(*row, 9);
        let RecordError::Incomplete { missing, .. } = source;
        assert_eq!(missing, &vec!["main_name"]);
        assert!(err.to_string().contains("1/1/0"));
        assert!(err.to_string().contains("Missing main group name"));
    }

    #[test]
    fn test_compiled_column_can_be_disabled() {
        let layout = LayoutConfig {
            compiled_address_column: None,
            ..Default::default()
        };
        let rows = vec![with_cell(leaf(8, 1, "Kitchen"), 7, CellValue::Empty)];

        assert_eq!(extract(rows, &layout, &NoopObserver).unwrap().len(), 1);
    }

    #[test]
    fn test_target_id_and_comment() {
        let layout = LayoutConfig::default();
        let rows = vec![
            with_cell(
                with_cell(leaf(8, 1, "Lamp"), 6, "T1".into()),
                9,
                "Line1\nLine2".into(),
            ),
            with_cell(leaf(9, 2, "Lamp"), 6, 0i64.into()),
        ];

        let gas = extract(rows, &layout, &NoopObserver).unwrap();

        assert_eq!(gas[0].target_id(), Some("T1"));
        assert_eq!(gas[0].comment(), Some("Line1\nLine2"));
        assert_eq!(gas[1].target_id(), None);
    }

    #[test]
    fn test_numeric_dpt_renders_as_text() {
        let layout = LayoutConfig::default();
        let rows = vec![with_cell(leaf(8, 1, "Dimmer"), 5, 5.001.into())];

        let gas = extract(rows, &layout, &NoopObserver).unwrap();

        assert_eq!(gas[0].dpt(), "5.001");
    }

    #[test]
    fn test_layout_validation() {
        assert!(LayoutConfig::default().validate().is_ok());

        let zero_row = LayoutConfig {
            first_row: 0,
            ..Default::default()
        };
        assert!(matches!(zero_row.validate(), Err(ConfigError::InvalidLayout(_))));

        let narrow = LayoutConfig {
            last_column: 9,
            ..Default::default()
        };
        let err = narrow.validate().unwrap_err();
        assert!(err.to_string().contains("comment column 9"));
    }
}
