/*!
# Hierarchy Grouping

Groups leaf records into main groups and, within each, middle groups. Group labels come from
the first record seen for the group.
*/

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::schemas::GroupAddress;

/// Order in which main and middle groups are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum GroupOrder {
    /// Order of first appearance in the sheet.
    #[default]
    FirstSeen,
    /// Ascending group id (numerically when both ids are numbers).
    Ascending,
}

/// A main group with its middle groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainGroup<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub middles: Vec<MiddleGroup<'a>>,
}

/// A middle group with its leaves in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiddleGroup<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub leaves: Vec<&'a GroupAddress>,
}

/// Group `records` by main id, then by middle id.
pub fn group_addresses(records: &[GroupAddress], order: GroupOrder) -> Vec<MainGroup<'_>> {
    let mut mains: Vec<MainGroup<'_>> = Vec::new();
    let mut main_index: HashMap<&str, usize> = HashMap::new();
    let mut middle_index: HashMap<(&str, &str), usize> = HashMap::new();

    for record in records {
        let n_main = *main_index.entry(record.main()).or_insert_with(|| {
            mains.push(MainGroup {
                id: record.main(),
                name: record.main_name(),
                middles: Vec::new(),
            });
            mains.len() - 1
        });
        let main = &mut mains[n_main];

        let n_middle = *middle_index
            .entry((record.main(), record.middle()))
            .or_insert_with(|| {
                main.middles.push(MiddleGroup {
                    id: record.middle(),
                    name: record.middle_name(),
                    leaves: Vec::new(),
                });
                main.middles.len() - 1
            });
        main.middles[n_middle].leaves.push(record);
    }

    if order == GroupOrder::Ascending {
        mains.sort_by(|a, b| compare_ids(a.id, b.id));
        for main in &mut mains {
            main.middles.sort_by(|a, b| compare_ids(a.id, b.id));
        }
    }

    mains
}

fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
