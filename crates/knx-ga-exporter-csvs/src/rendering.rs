/*!
# CSV Rendering

Serialises grouped group addresses into one of the ETS CSV layouts.

Every field is quoted and records end in CRLF. Each record is quoted as UTF-8 text and then
encoded line by line with the selected [`OutputEncoding`]. The complete output is built in
memory; [`export_csv`] writes it to a temporary file next to the destination and renames it into place
only after every row encoded, so a failed run never leaves a partial file behind.
*/

use std::fmt;
use std::io::{self, Write};
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::{
    encoding::OutputEncoding,
    errors::RenderError,
    grouping::{group_addresses, GroupOrder},
    observer::ExportObserver,
    schemas::{GroupAddress, FULL_HIERARCHY_CSV_HEADERS, NAME_ADDRESS_CSV_HEADERS, SECURITY_AUTO},
};

// ================================================================================================
// Settings
// ================================================================================================

/// CSV output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum CsvFormat {
    /// `1/1`: group name / address
    #[default]
    #[serde(rename = "1/1")]
    #[cfg_attr(feature = "clap", value(name = "1/1"))]
    NameAddress,
    /// `3/3`: main, middle, sub names / main, middle, sub ids
    #[serde(rename = "3/3")]
    #[cfg_attr(feature = "clap", value(name = "3/3"))]
    FullHierarchy,
}

impl fmt::Display for CsvFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CsvFormat::NameAddress => "1/1",
            CsvFormat::FullHierarchy => "3/3",
        })
    }
}

/// CSV field separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum CsvSeparator {
    /// `\t`
    #[default]
    Tabulator,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
}

impl CsvSeparator {
    pub fn byte(&self) -> u8 {
        match self {
            CsvSeparator::Tabulator => b'\t',
            CsvSeparator::Comma => b',',
            CsvSeparator::Semicolon => b';',
        }
    }

    /// Printable form for log output
    pub fn display_char(&self) -> &'static str {
        match self {
            CsvSeparator::Tabulator => "[TAB]",
            CsvSeparator::Comma => ",",
            CsvSeparator::Semicolon => ";",
        }
    }
}

impl fmt::Display for CsvSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CsvSeparator::Tabulator => "tabulator",
            CsvSeparator::Comma => "comma",
            CsvSeparator::Semicolon => "semicolon",
        })
    }
}

/// Everything that shapes the rendered bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSettings {
    pub format: CsvFormat,
    pub separator: CsvSeparator,
    pub encoding: OutputEncoding,
    pub group_order: GroupOrder,
}

// ================================================================================================
// Field Formatting
// ================================================================================================

/// Leaf name: `sub_name`, prefixed by `"{target_id} - "` for a non-zero target id, with
/// line breaks replaced by `_`.
pub fn format_ga_name(ga: &GroupAddress) -> String {
    let name = match ga.target_id() {
        Some(target_id) if !is_zero_text(target_id) => {
            format!("{target_id} - {}", ga.sub_name())
        }
        _ => ga.sub_name().to_string(),
    };
    replace_line_breaks(&name, "_")
}

/// Leaf description: the comment with line breaks replaced by `|`, empty when absent.
pub fn format_ga_description(ga: &GroupAddress) -> String {
    ga.comment()
        .map(|comment| replace_line_breaks(comment, "|"))
        .unwrap_or_default()
}

fn replace_line_breaks(text: &str, replacement: &str) -> String {
    text.replace("\r\n", replacement)
        .replace(['\r', '\n'], replacement)
}

fn is_zero_text(text: &str) -> bool {
    text.trim().parse::<f64>().is_ok_and(|value| value == 0.0)
}

// ================================================================================================
// Encoded CSV Writer
// ================================================================================================

/// Always-quoting CSV writer. Each record is quoted as text first and then encoded as a whole
/// line, so stateful encodings never see a field boundary.
struct EncodedCsvWriter {
    builder: WriterBuilder,
    encoding: OutputEncoding,
    output: Vec<u8>,
}

impl EncodedCsvWriter {
    fn new(settings: &RenderSettings) -> Self {
        let mut builder = WriterBuilder::new();
        builder
            .delimiter(settings.separator.byte())
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::CRLF);

        Self {
            builder,
            encoding: settings.encoding,
            output: Vec::new(),
        }
    }

    fn write_row<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<(), RenderError> {
        let fields: Vec<&str> = fields.iter().map(AsRef::as_ref).collect();
        let line = self.format_line(&fields)?;

        let encoded = self
            .encoding
            .encode(&line)
            .map_err(|source| RenderError::Encoding {
                row: format!("{fields:?}"),
                source,
            })?;

        self.output.extend_from_slice(&encoded);
        Ok(())
    }

    fn format_line(&self, fields: &[&str]) -> Result<String, RenderError> {
        let mut line = self.builder.from_writer(Vec::new());
        line.write_record(fields)?;
        let bytes = line
            .into_inner()
            .map_err(|err| RenderError::Io(io::Error::new(err.error().kind(), err.to_string())))?;
        String::from_utf8(bytes)
            .map_err(|err| RenderError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
    }

    fn into_bytes(self) -> Vec<u8> {
        self.output
    }
}

// ================================================================================================
// Rendering
// ================================================================================================

/// Render `records` into fully encoded CSV bytes.
pub fn render(
    records: &[GroupAddress],
    settings: &RenderSettings,
    observer: &dyn ExportObserver,
) -> Result<Vec<u8>, RenderError> {
    observer.export_started(settings, None);
    render_rows(records, settings, observer)
}

/// Render `records` and atomically write the result to `path`.
///
/// Nothing is written to `path` unless the whole output rendered and encoded.
pub fn export_csv<P: AsRef<Path>>(
    path: P,
    records: &[GroupAddress],
    settings: &RenderSettings,
    observer: &dyn ExportObserver,
) -> Result<(), RenderError> {
    let path = path.as_ref();
    observer.export_started(settings, Some(path));

    let bytes = render_rows(records, settings, observer)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(&bytes)?;
    file.flush()?;
    file.persist(path).map_err(|err| RenderError::Persist {
        path: path.to_path_buf(),
        source: err.error,
    })?;

    Ok(())
}

fn render_rows(
    records: &[GroupAddress],
    settings: &RenderSettings,
    observer: &dyn ExportObserver,
) -> Result<Vec<u8>, RenderError> {
    let mut writer = EncodedCsvWriter::new(settings);
    let groups = group_addresses(records, settings.group_order);

    match settings.format {
        CsvFormat::NameAddress => {
            writer.write_row(NAME_ADDRESS_CSV_HEADERS)?;

            for main in &groups {
                observer.main_group_exported(main.id, main.name);
                writer.write_row(&[
                    main.name,
                    format!("{}/-/-", main.id).as_str(),
                    "",
                    "",
                    "",
                    "",
                    SECURITY_AUTO,
                ])?;

                for middle in &main.middles {
                    observer.middle_group_exported(main.id, middle.id, middle.name);
                    writer.write_row(&[
                        middle.name,
                        format!("{}/{}/-", main.id, middle.id).as_str(),
                        "",
                        "",
                        "",
                        "",
                        SECURITY_AUTO,
                    ])?;

                    for ga in &middle.leaves {
                        observer.leaf_exported(ga);
                        writer.write_row(&[
                            format_ga_name(ga).as_str(),
                            ga.address().as_str(),
                            "",
                            "",
                            format_ga_description(ga).as_str(),
                            ga.dpt(),
                            SECURITY_AUTO,
                        ])?;
                    }
                }
            }
        }
        CsvFormat::FullHierarchy => {
            writer.write_row(FULL_HIERARCHY_CSV_HEADERS)?;

            for main in &groups {
                observer.main_group_exported(main.id, main.name);
                writer.write_row(&[
                    main.name,
                    "",
                    "",
                    main.id,
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    SECURITY_AUTO,
                ])?;

                for middle in &main.middles {
                    observer.middle_group_exported(main.id, middle.id, middle.name);
                    writer.write_row(&[
                        "",
                        middle.name,
                        "",
                        main.id,
                        middle.id,
                        "",
                        "",
                        "",
                        "",
                        "",
                        SECURITY_AUTO,
                    ])?;

                    for ga in &middle.leaves {
                        observer.leaf_exported(ga);
                        writer.write_row(&[
                            "",
                            "",
                            format_ga_name(ga).as_str(),
                            ga.main(),
                            ga.middle(),
                            ga.sub(),
                            "",
                            "",
                            format_ga_description(ga).as_str(),
                            ga.dpt(),
                            SECURITY_AUTO,
                        ])?;
                    }
                }
            }
        }
    }

    Ok(writer.into_bytes())
}

// ================================================================================================
// Tests
// ================================================================================================
