use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use knx_ga_exporter_csvs::{CsvFormat, CsvSeparator, GroupOrder};

mod commands;
mod config;
mod error;
mod logging;

use config::ExporterConfig;

#[derive(Parser, Debug, Default)]
#[command(name = "knx-ga-exporter")]
#[command(about = "Converter for spreadsheets to KNX ETS group address configurations in CSV format.")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file [default: ./config.json, when present]
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v: INFO, -vv: DEBUG)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Input XLSX file with the KNX group address plan
    #[arg(short = 'i', long = "input.file")]
    pub input_file: Option<PathBuf>,

    /// Output CSV file [default: knx-ga-addresses.csv]
    #[arg(short = 'o', long = "output.file")]
    pub output_file: Option<PathBuf>,

    /// Output text encoding [default: iso-8859-1]
    #[arg(long = "output.encoding")]
    pub output_encoding: Option<String>,

    /// CSV layout [default: 1/1]
    #[arg(long = "output.format", value_enum)]
    pub output_format: Option<CsvFormat>,

    /// CSV field separator [default: tabulator]
    #[arg(long = "output.separator", value_enum)]
    pub output_separator: Option<CsvSeparator>,

    /// Order of main and middle groups [default: first-seen]
    #[arg(long = "output.group-order", value_enum)]
    pub output_group_order: Option<GroupOrder>,

    /// Worksheet holding the group addresses [default: KNX Group Addresses]
    #[arg(long = "layout.sheet-name")]
    pub layout_sheet_name: Option<String>,

    /// 1-based row of the first group address [default: 8]
    #[arg(long = "layout.first-row")]
    pub layout_first_row: Option<usize>,

    /// Number of columns read per row [default: 10]
    #[arg(long = "layout.last-column")]
    pub layout_last_column: Option<usize>,

    /// Main group id column, 0-based [default: 0]
    #[arg(long = "layout.main-id-column", alias = "layout.main-ID-column")]
    pub layout_main_id_column: Option<usize>,

    /// Main group name column [default: 1]
    #[arg(long = "layout.main-name-column")]
    pub layout_main_name_column: Option<usize>,

    /// Middle group id column [default: 2]
    #[arg(long = "layout.middle-id-column", alias = "layout.middle-ID-column")]
    pub layout_middle_id_column: Option<usize>,

    /// Middle group name column [default: 3]
    #[arg(long = "layout.middle-name-column")]
    pub layout_middle_name_column: Option<usize>,

    /// Sub group id column [default: 4]
    #[arg(long = "layout.sub-id-column", alias = "layout.sub-ID-column")]
    pub layout_sub_id_column: Option<usize>,

    /// Sub group name column [default: 8]
    #[arg(long = "layout.sub-name-column")]
    pub layout_sub_name_column: Option<usize>,

    /// Datapoint type column [default: 5]
    #[arg(long = "layout.dpt-column", alias = "layout.DPT-column")]
    pub layout_dpt_column: Option<usize>,

    /// Target id column [default: 6]
    #[arg(long = "layout.target-id-column", alias = "layout.target-ID-column")]
    pub layout_target_id_column: Option<usize>,

    /// Compiled group address column [default: 7]
    #[arg(
        long = "layout.compiled-address-column",
        alias = "layout.compiled-GA-column",
        conflicts_with = "layout_no_compiled_address_column"
    )]
    pub layout_compiled_address_column: Option<usize>,

    /// Do not require a compiled group address cell
    #[arg(long = "layout.no-compiled-address-column")]
    pub layout_no_compiled_address_column: bool,

    /// Comment column [default: 9]
    #[arg(long = "layout.comment-column")]
    pub layout_comment_column: Option<usize>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = ExporterConfig::load(&cli);
    let verbose = config.as_ref().map_or(cli.verbose, |config| config.verbose);
    logging::init(verbose);

    match config.and_then(|config| commands::convert::execute(&config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
