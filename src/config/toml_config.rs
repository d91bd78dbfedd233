use crate::utils::error::{GenError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Layered generator settings. Every value is optional so a file, the
/// command line, or both can supply it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub key: KeyConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    pub file: Option<String>,
    pub delimiter: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyConfig {
    pub column: Option<String>,
    pub r#type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub record_name: Option<String>,
    pub table_name: Option<String>,
    pub directory: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| GenError::FileAccessError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GenError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GenError::ConfigError {
            message: format!("env placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Values set in `overrides` win over the ones in `self`.
    pub fn merged_with(self, overrides: TomlConfig) -> TomlConfig {
        TomlConfig {
            input: InputConfig {
                file: overrides.input.file.or(self.input.file),
                delimiter: overrides.input.delimiter.or(self.input.delimiter),
            },
            key: KeyConfig {
                column: overrides.key.column.or(self.key.column),
                r#type: overrides.key.r#type.or(self.key.r#type),
            },
            output: OutputConfig {
                record_name: overrides.output.record_name.or(self.output.record_name),
                table_name: overrides.output.table_name.or(self.output.table_name),
                directory: overrides.output.directory.or(self.output.directory),
            },
        }
    }
}
