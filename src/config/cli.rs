use crate::config::toml_config::TomlConfig;
use crate::config::LoaderConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeFormat {
    Css,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "course-plans")]
#[command(about = "Load the course plan list and print it")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Deployment root the plans path is resolved against")]
    pub base_url: Option<String>,

    #[arg(long)]
    pub plans_path: Option<String>,

    #[arg(long, help = "Wait before fetching, in milliseconds")]
    pub delay_ms: Option<u64>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, value_enum, help = "Print the theme configuration and exit")]
    pub print_theme: Option<ThemeFormat>,
}

impl CliConfig {
    /// Loads and validates `--config`, if given.
    pub fn file_config(&self) -> Result<Option<TomlConfig>> {
        let Some(path) = &self.config else {
            return Ok(None);
        };
        let file = TomlConfig::from_file(path)?;
        file.validate()?;
        Ok(Some(file))
    }

    /// Flags override the config file, which overrides the defaults.
    pub fn merge(&self, file: Option<&TomlConfig>) -> LoaderConfig {
        let mut config = file.map(TomlConfig::loader_config).unwrap_or_default();

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(plans_path) = &self.plans_path {
            config.plans_path = plans_path.clone();
        }
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
        if self.timeout_seconds.is_some() {
            config.timeout_seconds = self.timeout_seconds;
        }

        config
    }

    pub fn verbose(&self, file: Option<&TomlConfig>) -> bool {
        self.verbose || file.is_some_and(TomlConfig::verbose)
    }

    pub fn json_logs(&self, file: Option<&TomlConfig>) -> bool {
        self.json_logs || file.is_some_and(TomlConfig::json_logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_flags() {
        let cli = CliConfig::parse_from(["course-plans"]);
        assert!(cli.file_config().unwrap().is_none());
        assert_eq!(cli.merge(None), LoaderConfig::default());
        assert!(cli.print_theme.is_none());
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[source]\nbase_url = \"https://file.example/\"\nplans_path = \"a.json\"\n\n[loader]\ndelay_ms = 100"
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = CliConfig::parse_from([
            "course-plans",
            "--config",
            path.as_str(),
            "--delay-ms",
            "0",
            "--print-theme",
            "css",
        ]);
        let file = cli.file_config().unwrap();
        let config = cli.merge(file.as_ref());

        assert_eq!(config.base_url, "https://file.example/");
        assert_eq!(config.plans_path, "a.json");
        assert_eq!(config.delay_ms, 0);
        assert_eq!(cli.print_theme, Some(ThemeFormat::Css));
    }

    #[test]
    fn test_invalid_file_is_rejected_on_load() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[source]\nbase_url = \"  \"").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = CliConfig::parse_from(["course-plans", "--config", path.as_str()]);
        let err = cli.file_config().unwrap_err();

        assert!(matches!(
            err,
            crate::utils::error::PlanError::InvalidConfigValueError { ref field, .. } if field == "source.base_url"
        ));
    }

    #[test]
    fn test_logging_flags_fall_back_to_file() {
        let file = TomlConfig::from_toml_str(
            "[source]\nbase_url = \"https://file.example/\"\n\n[logging]\njson = true\n",
        )
        .unwrap();
        let cli = CliConfig::parse_from(["course-plans"]);

        assert!(cli.json_logs(Some(&file)));
        assert!(!cli.verbose(Some(&file)));
        assert!(!cli.json_logs(None));
    }
}
