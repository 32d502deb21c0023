/*!
# Group Address Schema

This module defines the leaf record extracted from a planning spreadsheet and the
header rows of the two CSV layouts understood by the ETS group address import.
*/

use std::fmt;

use crate::errors::RecordError;

// ================================================================================================
// CSV Headers
// ================================================================================================

/// Headers of the `1/1` layout (name / address) in exact order
pub const NAME_ADDRESS_CSV_HEADERS: &[&str] = &[
    "Group name",
    "Address",
    "Central",
    "Unfiltered",
    "Description",
    "DatapointType",
    "Security",
];

/// Headers of the `3/3` layout (main/middle/sub names, main/middle/sub ids) in exact order
pub const FULL_HIERARCHY_CSV_HEADERS: &[&str] = &[
    "Main",
    "Middle",
    "Sub",
    "Main",
    "Middle",
    "Sub",
    "Central",
    "Unfiltered",
    "Description",
    "DatapointType",
    "Security",
];

/// Value of the `Security` column on every row
pub const SECURITY_AUTO: &str = "Auto";

// ================================================================================================
// Group Address
// ================================================================================================

/// One KNX group address leaf: `main/middle/sub` plus its labels and metadata.
///
/// Only [`GroupAddress::new`] builds one, so every instance carries all mandatory fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupAddress {
    main: String,
    middle: String,
    sub: String,
    main_name: String,
    middle_name: String,
    sub_name: String,
    target_id: Option<String>,
    dpt: String,
    comment: Option<String>,
}

impl GroupAddress {
    /// Build a group address, failing when any mandatory field is absent.
    ///
    /// `target_id` and `comment` are optional; everything else is required.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        main: Option<String>,
        middle: Option<String>,
        sub: Option<String>,
        main_name: Option<String>,
        middle_name: Option<String>,
        sub_name: Option<String>,
        target_id: Option<String>,
        dpt: Option<String>,
        comment: Option<String>,
    ) -> Result<Self, RecordError> {
        match (main, middle, sub, main_name, middle_name, sub_name, dpt) {
            (
                Some(main),
                Some(middle),
                Some(sub),
                Some(main_name),
                Some(middle_name),
                Some(sub_name),
                Some(dpt),
            ) => Ok(Self {
                main,
                middle,
                sub,
                main_name,
                middle_name,
                sub_name,
                target_id,
                dpt,
                comment,
            }),
            (main, middle, sub, main_name, middle_name, sub_name, dpt) => {
                let fields = [
                    ("main", &main),
                    ("middle", &middle),
                    ("sub", &sub),
                    ("main_name", &main_name),
                    ("middle_name", &middle_name),
                    ("sub_name", &sub_name),
                    ("dpt", &dpt),
                ];
                let missing = fields
                    .iter()
                    .filter(|(_, value)| value.is_none())
                    .map(|(name, _)| *name)
                    .collect();

                Err(RecordError::Incomplete {
                    display: format_display(
                        main.as_deref(),
                        middle.as_deref(),
                        sub.as_deref(),
                        main_name.as_deref(),
                        middle_name.as_deref(),
                        sub_name.as_deref(),
                        target_id.as_deref(),
                        dpt.as_deref(),
                    ),
                    missing,
                })
            }
        }
    }

    pub fn main(&self) -> &str {
        &self.main
    }

    pub fn middle(&self) -> &str {
        &self.middle
    }

    pub fn sub(&self) -> &str {
        &self.sub
    }

    pub fn main_name(&self) -> &str {
        &self.main_name
    }

    pub fn middle_name(&self) -> &str {
        &self.middle_name
    }

    pub fn sub_name(&self) -> &str {
        &self.sub_name
    }

    pub fn target_id(&self) -> Option<&str> {
        self.target_id.as_deref()
    }

    pub fn dpt(&self) -> &str {
        &self.dpt
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Composite address `main/middle/sub`
    pub fn address(&self) -> String {
        format!("{}/{}/{}", self.main, self.middle, self.sub)
    }
}

impl fmt::Display for GroupAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_display(
            Some(&self.main),
            Some(&self.middle),
            Some(&self.sub),
            Some(&self.main_name),
            Some(&self.middle_name),
            Some(&self.sub_name),
            self.target_id.as_deref(),
            Some(&self.dpt),
        ))
    }
}

/// `main/middle/sub | main_name | middle_name | dpt | target_id - sub_name`, absent parts as `None`
#[allow(clippy::too_many_arguments)]
fn format_display(
    main: Option<&str>,
    middle: Option<&str>,
    sub: Option<&str>,
    main_name: Option<&str>,
    middle_name: Option<&str>,
    sub_name: Option<&str>,
    target_id: Option<&str>,
    dpt: Option<&str>,
) -> String {
    let or_none = |value: Option<&str>| value.unwrap_or("None").to_string();
    let address = format!("{}/{}/{}", or_none(main), or_none(middle), or_none(sub));
    format!(
        "{address:<8} | {} | {} | {} | {} - {}",
        or_none(main_name),
        or_none(middle_name),
        or_none(dpt),
        or_none(target_id),
        or_none(sub_name),
    )
}

// ================================================================================================
// Tests
// ================================================================================================
