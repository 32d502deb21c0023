/*!
# Cell Values

Type-coerced spreadsheet cells as handed over by a row source: numbers as numbers,
text as text and absent cells as [`CellValue::Empty`].
*/

use calamine::Data;

/// Value of a single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Absent or blank cell.
    #[default]
    Empty,
    /// Numeric cell. Integers are exact.
    Number(f64),
    /// Text cell.
    Text(String),
    /// Boolean cell.
    Bool(bool),
}

impl CellValue {
    /// True only for a blank cell.
    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// True only for a numeric cell holding zero. Text `"0"` is not zero.
    pub fn is_zero(&self) -> bool {
        matches!(self, CellValue::Number(n) if *n == 0.0)
    }

    /// Render the cell as text, `None` for a blank cell.
    ///
    /// Numbers use the shortest round-trip representation, so integral values
    /// carry no fraction (`1.0` renders as `"1"`).
    pub fn to_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Bool(true) => Some("TRUE".to_string()),
            CellValue::Bool(false) => Some("FALSE".to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

impl From<&Data> for CellValue {
    fn from(value: &Data) -> Self {
        match value {
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(_) | Data::Empty => CellValue::Empty,
        }
    }
}

/// One spreadsheet row, indexed by zero-based column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    /// 1-based sheet row number.
    pub number: usize,
    /// Cells from column A onwards.
    pub cells: Vec<CellValue>,
}

impl Row {
    pub fn new(number: usize, cells: Vec<CellValue>) -> Self {
        Self { number, cells }
    }

    /// Cell at `column`, blank when the row is shorter.
    pub fn cell(&self, column: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.cells.get(column).unwrap_or(&EMPTY)
    }
}
