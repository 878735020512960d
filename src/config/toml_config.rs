use crate::config::{LoaderConfig, DEFAULT_DELAY_MS, DEFAULT_PLANS_PATH};
use crate::utils::error::{PlanError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub loader: LoaderSection,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: String,
    pub plans_path: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderSection {
    pub delay_ms: u64,
}

impl Default for LoaderSection {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern is valid"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PlanError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PLANS_BASE_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            base_url: self.source.base_url.clone(),
            plans_path: self
                .source
                .plans_path
                .clone()
                .unwrap_or_else(|| DEFAULT_PLANS_PATH.to_string()),
            delay_ms: self.loader.delay_ms,
            timeout_seconds: self.source.timeout_seconds,
        }
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose.unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.json.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("source.base_url", &self.source.base_url)?;
        self.loader_config().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
[source]
base_url = "https://school.example/"
"#,
        )
        .unwrap();

        let loader = config.loader_config();
        assert_eq!(loader.plans_path, "./plans.json");
        assert_eq!(loader.load_delay(), Duration::from_secs(2));
        assert!(!config.verbose());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[source]
base_url = "https://school.example/app/"
plans_path = "data/plans.json"
timeout_seconds = 10

[loader]
delay_ms = 0

[logging]
verbose = true
json = true
"#,
        )
        .unwrap();

        let loader = config.loader_config();
        assert_eq!(
            loader.plans_url().unwrap().as_str(),
            "https://school.example/app/data/plans.json"
        );
        assert!(loader.load_delay().is_zero());
        assert_eq!(loader.request_timeout(), Some(Duration::from_secs(10)));
        assert!(config.verbose());
        assert!(config.json_logs());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("COURSE_PLANS_TEST_BASE", "https://env.example/");

        let config = TomlConfig::from_toml_str(
            r#"
[source]
base_url = "${COURSE_PLANS_TEST_BASE}"
"#,
        )
        .unwrap();
        assert_eq!(config.source.base_url, "https://env.example/");

        std::env::remove_var("COURSE_PLANS_TEST_BASE");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[source]
base_url = "${COURSE_PLANS_SURELY_UNSET_VAR}"
"#,
        )
        .unwrap();
        assert_eq!(config.source.base_url, "${COURSE_PLANS_SURELY_UNSET_VAR}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_source_is_parse_error() {
        let err = TomlConfig::from_toml_str("[loader]\ndelay_ms = 5\n").unwrap_err();
        assert!(matches!(err, PlanError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            "[source]\nbase_url = \"http://127.0.0.1:9000/\"\n\n[loader]\ndelay_ms = 250"
        )
        .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.loader.delay_ms, 250);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TomlConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, PlanError::IoError(_)));
    }
}
