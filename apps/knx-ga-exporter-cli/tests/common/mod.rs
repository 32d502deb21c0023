#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

pub const SHEET_NAME: &str = "KNX Group Addresses";

/// One spreadsheet cell of a fixture row
#[derive(Debug, Clone, Copy)]
pub enum Cell {
    Num(f64),
    Text(&'static str),
    Blank,
}

use Cell::{Blank, Num, Text};

/// Columns in the default layout order:
/// main id, main name, middle id, middle name, sub id, DPT, target id, compiled GA, sub name,
/// comment
pub type PlanRow = [Cell; 10];

/// A small plan with one template row and one zero target id
pub fn standard_plan() -> Vec<PlanRow> {
    vec![
        [
            Num(1.0),
            Text("Ground Floor"),
            Num(1.0),
            Text("Lights"),
            Num(1.0),
            Text("1.001"),
            Text("L1"),
            Text("1/1/1"),
            Text("Kitchen"),
            Text("Ceiling\nspot"),
        ],
        [
            Num(1.0),
            Text("Ground Floor"),
            Num(1.0),
            Text("Lights"),
            Num(2.0),
            Text("1.001"),
            Blank,
            Text("1/1/2"),
            Text("Hallway"),
            Blank,
        ],
        [
            Num(1.0),
            Text("Ground Floor"),
            Num(1.0),
            Text("Lights"),
            Num(3.0),
            Blank,
            Blank,
            Text("1/1/3"),
            Text("Reserve"),
            Blank,
        ],
        [
            Num(1.0),
            Text("Ground Floor"),
            Num(2.0),
            Text("Blinds"),
            Num(1.0),
            Text("1.008"),
            Num(0.0),
            Text("1/2/1"),
            Text("Top Floor Bedroom"),
            Blank,
        ],
        [
            Num(2.0),
            Text("Top Floor"),
            Num(0.0),
            Text("Heating"),
            Num(1.0),
            Text("9.001"),
            Blank,
            Text("2/0/1"),
            Text("Temperature"),
            Text("°C"),
        ],
    ]
}

/// Expected `1/1` output of [`standard_plan`] with tabulator separator
pub const STANDARD_NAME_ADDRESS_CSV: &str = concat!(
    "\"Group name\"\t\"Address\"\t\"Central\"\t\"Unfiltered\"\t\"Description\"\t\"DatapointType\"\t\"Security\"\r\n",
    "\"Ground Floor\"\t\"1/-/-\"\t\"\"\t\"\"\t\"\"\t\"\"\t\"Auto\"\r\n",
    "\"Lights\"\t\"1/1/-\"\t\"\"\t\"\"\t\"\"\t\"\"\t\"Auto\"\r\n",
    "\"L1 - Kitchen\"\t\"1/1/1\"\t\"\"\t\"\"\t\"Ceiling|spot\"\t\"1.001\"\t\"Auto\"\r\n",
    "\"Hallway\"\t\"1/1/2\"\t\"\"\t\"\"\t\"\"\t\"1.001\"\t\"Auto\"\r\n",
    "\"Blinds\"\t\"1/2/-\"\t\"\"\t\"\"\t\"\"\t\"\"\t\"Auto\"\r\n",
    "\"Top Floor Bedroom\"\t\"1/2/1\"\t\"\"\t\"\"\t\"\"\t\"1.008\"\t\"Auto\"\r\n",
    "\"Top Floor\"\t\"2/-/-\"\t\"\"\t\"\"\t\"\"\t\"\"\t\"Auto\"\r\n",
    "\"Heating\"\t\"2/0/-\"\t\"\"\t\"\"\t\"\"\t\"\"\t\"Auto\"\r\n",
    "\"Temperature\"\t\"2/0/1\"\t\"\"\t\"\"\t\"°C\"\t\"9.001\"\t\"Auto\"\r\n",
);

/// Write `rows` into `sheet_name` starting at the 1-based `first_row`, behind a title row and a
/// leading notes sheet.
pub fn write_plan(path: &Path, sheet_name: &str, first_row: u32, rows: &[PlanRow]) {
    let mut workbook = Workbook::new();

    let notes = workbook.add_worksheet();
    notes.set_name("Notes").unwrap();
    notes.write_string(0, 0, "Building notes").unwrap();

    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name).unwrap();
    sheet.write_string(0, 0, "KNX group address plan").unwrap();

    for (offset, row) in rows.iter().enumerate() {
        let sheet_row = first_row - 1 + offset as u32;
        for (column, cell) in row.iter().enumerate() {
            let column = column as u16;
            match cell {
                Num(value) => {
                    sheet.write_number(sheet_row, column, *value).unwrap();
                }
                Text(value) => {
                    sheet.write_string(sheet_row, column, *value).unwrap();
                }
                Blank => {}
            }
        }
    }

    workbook.save(path).unwrap();
}

/// Temporary working directory holding `plan.xlsx` built from `rows` in the default layout
pub fn plan_dir(rows: &[PlanRow]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plan.xlsx");
    write_plan(&path, SHEET_NAME, 8, rows);
    (dir, path)
}

/// The exporter binary, run inside `dir` so no stray `config.json` is picked up
pub fn exporter(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("knx-ga-exporter").unwrap();
    cmd.current_dir(dir);
    cmd
}

/// Decode ISO-8859-1 output bytes
pub fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&byte| char::from(byte)).collect()
}
