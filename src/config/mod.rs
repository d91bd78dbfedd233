pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::{GenError, Result};
use crate::utils::validation::{
    parse_delimiter, validate_delimiter, validate_non_empty_string, validate_path,
    validate_required_field, Validate,
};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "tsv2go")]
#[command(about = "Generate a Go record type and static lookup map from a delimited data file")]
pub struct CliConfig {
    /// Header text of the column whose values key the generated map
    #[arg(long = "hashKey", visible_alias = "hash-key")]
    pub hash_key: Option<String>,

    /// Go type of the map key [default: string]
    #[arg(long = "hashKeyType", visible_alias = "hash-key-type")]
    pub hash_key_type: Option<String>,

    /// Name of the generated record type
    #[arg(long = "dataStrName", visible_alias = "data-str-name")]
    pub data_str_name: Option<String>,

    /// Name of the generated map; its lowercase form names the package and file
    #[arg(long = "varName", visible_alias = "var-name")]
    pub var_name: Option<String>,

    /// Path to the delimited input file
    #[arg(long = "inputFile", visible_alias = "input-file")]
    pub input_file: Option<String>,

    /// Directory receiving the generated file [default: .]
    #[arg(long = "outputDir", visible_alias = "output-dir")]
    pub output_dir: Option<String>,

    /// Field delimiter: one ASCII character, `\t` or `tab` [default: tab]
    #[arg(long)]
    pub delimiter: Option<String>,

    /// TOML file with default settings; flags take precedence
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the intermediate model as JSON instead of writing a file
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    fn as_overrides(&self) -> TomlConfig {
        let mut overrides = TomlConfig::default();
        overrides.input.file = self.input_file.clone();
        overrides.input.delimiter = self.delimiter.clone();
        overrides.key.column = self.hash_key.clone();
        overrides.key.r#type = self.hash_key_type.clone();
        overrides.output.record_name = self.data_str_name.clone();
        overrides.output.table_name = self.var_name.clone();
        overrides.output.directory = self.output_dir.clone();
        overrides
    }

    /// Layers the flags over the optional config file and validates the result.
    pub fn resolve(&self) -> Result<GeneratorConfig> {
        let base = match &self.config {
            Some(path) => {
                tracing::debug!("Loading settings from {}", path);
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        let config = GeneratorConfig::try_from(base.merged_with(self.as_overrides()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Fully resolved settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub input_file: String,
    pub delimiter: u8,
    pub key_column: String,
    pub key_type: String,
    pub record_name: String,
    pub table_name: String,
    pub output_dir: String,
}

impl GeneratorConfig {
    pub const DEFAULT_DELIMITER: u8 = b'\t';
    pub const DEFAULT_OUTPUT_DIR: &'static str = ".";
}

impl TryFrom<TomlConfig> for GeneratorConfig {
    type Error = GenError;

    fn try_from(layered: TomlConfig) -> Result<Self> {
        let delimiter = match layered.input.delimiter.as_deref() {
            Some(raw) => parse_delimiter(raw).map_err(|reason| GenError::InvalidConfigValueError {
                field: "delimiter".to_string(),
                value: raw.to_string(),
                reason,
            })?,
            None => Self::DEFAULT_DELIMITER,
        };

        Ok(Self {
            input_file: validate_required_field("inputFile", &layered.input.file)?.clone(),
            delimiter,
            key_column: validate_required_field("hashKey", &layered.key.column)?.clone(),
            key_type: layered
                .key
                .r#type
                .unwrap_or_else(|| crate::domain::model::TypeTag::STRING.to_string()),
            record_name: validate_required_field("dataStrName", &layered.output.record_name)?
                .clone(),
            table_name: validate_required_field("varName", &layered.output.table_name)?.clone(),
            output_dir: layered
                .output
                .directory
                .unwrap_or_else(|| Self::DEFAULT_OUTPUT_DIR.to_string()),
        })
    }
}

impl Validate for GeneratorConfig {
    fn validate(&self) -> Result<()> {
        validate_path("inputFile", &self.input_file)?;
        validate_path("outputDir", &self.output_dir)?;
        validate_delimiter("delimiter", self.delimiter)?;
        validate_non_empty_string("hashKey", &self.key_column)?;
        validate_non_empty_string("hashKeyType", &self.key_type)?;
        validate_non_empty_string("dataStrName", &self.record_name)?;
        validate_non_empty_string("varName", &self.table_name)?;
        Ok(())
    }
}

impl ConfigProvider for GeneratorConfig {
    fn input_file(&self) -> &str {
        &self.input_file
    }

    fn delimiter(&self) -> u8 {
        self.delimiter
    }

    fn key_column(&self) -> &str {
        &self.key_column
    }

    fn key_type(&self) -> &str {
        &self.key_type
    }

    fn record_name(&self) -> &str {
        &self.record_name
    }

    fn table_name(&self) -> &str {
        &self.table_name
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }
}
