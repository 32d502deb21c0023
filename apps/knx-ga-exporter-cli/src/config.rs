use std::path::{Path, PathBuf};

use knx_ga_exporter_csvs::{
    ConfigError, CsvFormat, CsvSeparator, GroupOrder, LayoutConfig, OutputEncoding,
    RenderSettings, OUTPUT_ENCODING_DEFAULT,
};
use serde::{Deserialize, Deserializer};

use crate::error::{CliError, CliResult};
use crate::Cli;

/// Configuration file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

pub const DEFAULT_OUTPUT_FILE: &str = "knx-ga-addresses.csv";

/// JSON configuration file structure. Every key is optional; command line options win.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub verbose: Option<u8>,

    #[serde(default)]
    pub input: InputSection,

    #[serde(default)]
    pub output: OutputSection,

    #[serde(default)]
    pub layout: LayoutSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputSection {
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct OutputSection {
    pub file: Option<PathBuf>,
    pub encoding: Option<String>,
    pub format: Option<CsvFormat>,
    pub separator: Option<CsvSeparator>,
    pub group_order: Option<GroupOrder>,
}

/// Sheet layout keys. The mixed-case spellings of older configuration files are accepted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct LayoutSection {
    pub sheet_name: Option<String>,
    pub first_row: Option<usize>,
    pub last_column: Option<usize>,
    #[serde(alias = "main-ID-column")]
    pub main_id_column: Option<usize>,
    pub main_name_column: Option<usize>,
    #[serde(alias = "middle-ID-column")]
    pub middle_id_column: Option<usize>,
    pub middle_name_column: Option<usize>,
    #[serde(alias = "sub-ID-column")]
    pub sub_id_column: Option<usize>,
    pub sub_name_column: Option<usize>,
    #[serde(alias = "DPT-column")]
    pub dpt_column: Option<usize>,
    #[serde(alias = "target-ID-column")]
    pub target_id_column: Option<usize>,
    /// `null` disables the compiled address check
    #[serde(
        default,
        alias = "compiled-GA-column",
        deserialize_with = "deserialize_present"
    )]
    pub compiled_address_column: Option<Option<usize>>,
    pub comment_column: Option<usize>,
}

/// Distinguishes an explicit `null` from an absent key.
fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl FileConfig {
    pub fn from_path(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Fully resolved settings of one conversion run
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    pub verbose: u8,
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub settings: RenderSettings,
    pub layout: LayoutConfig,
}

impl ExporterConfig {
    /// Read the configuration file (explicit or `./config.json`) and merge the command line
    /// over it.
    pub fn load(cli: &Cli) -> CliResult<Self> {
        let file_config = match &cli.config {
            Some(path) => FileConfig::from_path(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    FileConfig::from_path(default_path)?
                } else {
                    FileConfig::default()
                }
            }
        };
        Self::resolve(cli, file_config)
    }

    /// Precedence: command line, then configuration file, then built-in defaults.
    pub fn resolve(cli: &Cli, file: FileConfig) -> CliResult<Self> {
        let FileConfig {
            verbose,
            input,
            output,
            layout: file_layout,
        } = file;

        let input_file = cli
            .input_file
            .clone()
            .or(input.file)
            .ok_or_else(|| ConfigError::Missing("input.file".to_string()))?;

        let output_file = cli
            .output_file
            .clone()
            .or(output.file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE));

        let encoding_label = cli
            .output_encoding
            .clone()
            .or(output.encoding)
            .unwrap_or_else(|| OUTPUT_ENCODING_DEFAULT.to_string());

        let settings = RenderSettings {
            format: cli.output_format.or(output.format).unwrap_or_default(),
            separator: cli.output_separator.or(output.separator).unwrap_or_default(),
            encoding: OutputEncoding::from_label(&encoding_label)?,
            group_order: cli
                .output_group_order
                .or(output.group_order)
                .unwrap_or_default(),
        };

        let layout = merge_layout(cli, file_layout);
        layout.validate()?;

        let verbose = match cli.verbose {
            0 => verbose.unwrap_or(0),
            count => count,
        };

        Ok(Self {
            verbose,
            input_file,
            output_file,
            settings,
            layout,
        })
    }
}

fn merge_layout(cli: &Cli, file: LayoutSection) -> LayoutConfig {
    let defaults = LayoutConfig::default();

    let compiled_address_column = if cli.layout_no_compiled_address_column {
        None
    } else {
        cli.layout_compiled_address_column
            .map(Some)
            .or(file.compiled_address_column)
            .unwrap_or(defaults.compiled_address_column)
    };

    LayoutConfig {
        sheet_name: cli
            .layout_sheet_name
            .clone()
            .or(file.sheet_name)
            .unwrap_or(defaults.sheet_name),
        first_row: cli
            .layout_first_row
            .or(file.first_row)
            .unwrap_or(defaults.first_row),
        last_column: cli
            .layout_last_column
            .or(file.last_column)
            .unwrap_or(defaults.last_column),
        main_id_column: cli
            .layout_main_id_column
            .or(file.main_id_column)
            .unwrap_or(defaults.main_id_column),
        main_name_column: cli
            .layout_main_name_column
            .or(file.main_name_column)
            .unwrap_or(defaults.main_name_column),
        middle_id_column: cli
            .layout_middle_id_column
            .or(file.middle_id_column)
            .unwrap_or(defaults.middle_id_column),
        middle_name_column: cli
            .layout_middle_name_column
            .or(file.middle_name_column)
            .unwrap_or(defaults.middle_name_column),
        sub_id_column: cli
            .layout_sub_id_column
            .or(file.sub_id_column)
            .unwrap_or(defaults.sub_id_column),
        sub_name_column: cli
            .layout_sub_name_column
            .or(file.sub_name_column)
            .unwrap_or(defaults.sub_name_column),
        dpt_column: cli
            .layout_dpt_column
            .or(file.dpt_column)
            .unwrap_or(defaults.dpt_column),
        target_id_column: cli
            .layout_target_id_column
            .or(file.target_id_column)
            .unwrap_or(defaults.target_id_column),
        compiled_address_column,
        comment_column: cli
            .layout_comment_column
            .or(file.comment_column)
            .unwrap_or(defaults.comment_column),
    }
}
