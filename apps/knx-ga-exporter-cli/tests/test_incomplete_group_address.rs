mod common;

use common::Cell::{Blank, Num, Text};
use predicates::prelude::*;

/// A row with DPT and compiled address but no main group name aborts the run
#[test]
fn test_incomplete_group_address() {
    let mut rows = common::standard_plan();
    rows.push([
        Num(1.0),
        Blank,
        Num(0.0),
        Text("Central"),
        Num(0.0),
        Text("1.001"),
        Blank,
        Text("1/0/0"),
        Text("All off"),
        Blank,
    ]);
    let (dir, input) = common::plan_dir(&rows);
    let output = dir.path().join("out.csv");

    common::exporter(dir.path())
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Incomplete KNX group address detected"))
        .stderr(predicate::str::contains("1/0/0"))
        .stderr(predicate::str::contains("Sheet row 13"))
        .stderr(predicate::str::contains("main_name"));

    assert!(!output.exists());
}
