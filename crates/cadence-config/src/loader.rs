//! Configuration loader.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let expanded = Self::read_expanded(path)?;
        Self::parse(&expanded)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        Self::parse(&expanded)
    }

    /// Read a file and substitute `${VAR}` references.
    ///
    /// Shared with the job manifest, which lives in the same file.
    pub fn read_expanded(path: &Path) -> Result<String, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound(path.display().to_string()),
            _ => ConfigError::Io(e),
        })?;
        Self::expand_env_vars(&content)
    }

    fn parse(content: &str) -> Result<Config, ConfigError> {
        let mut config: Config = toml::from_str(content)?;
        let root = config.scheduler.root.to_string_lossy().into_owned();
        config.scheduler.root = PathBuf::from(Self::expand_path(&root));
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        for cap in ENV_VAR.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/jobs`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RunAs;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.scheduler.default_extension, "js");
        assert_eq!(config.scheduler.root, PathBuf::from("./jobs"));
    }

    #[test]
    fn test_load_scheduler_config() {
        let content = r#"
            [scheduler]
            root = "/srv/jobs"
            timeout = 5000
            interval = 60000
            has_seconds = true
            default_extension = "mjs"
            accepted_extensions = [".mjs"]
            timezone = "America/New_York"
            run_jobs_as = "process"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        let scheduler = &config.scheduler;
        assert_eq!(scheduler.root, PathBuf::from("/srv/jobs"));
        assert_eq!(scheduler.timeout, 5000);
        assert_eq!(scheduler.interval, 60000);
        assert!(scheduler.has_seconds);
        assert_eq!(scheduler.default_extension, "mjs");
        assert_eq!(scheduler.accepted_extensions, vec![".mjs"]);
        assert_eq!(scheduler.timezone.as_deref(), Some("America/New_York"));
        assert_eq!(scheduler.run_jobs_as, Some(RunAs::Process));
    }

    #[test]
    fn test_load_ignores_jobs_array() {
        let content = r#"
            jobs = ["basic", { name = "report", interval = 1000 }]

            [scheduler]
            timeout = 10
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.scheduler.timeout, 10);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[scheduler]").unwrap();
        writeln!(file, "interval = 500").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.scheduler.interval, 500);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/cadence.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_root_tilde_is_expanded() {
        let content = r#"
            [scheduler]
            root = "~/jobs"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        let root = config.scheduler.root.to_string_lossy().into_owned();
        assert!(!root.starts_with('~'));
        assert!(root.ends_with("/jobs"));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("CADENCE_TEST_JOBS_ROOT", "/opt/jobs");
        }
        let content = r#"
            [scheduler]
            root = "${CADENCE_TEST_JOBS_ROOT}"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.scheduler.root, PathBuf::from("/opt/jobs"));
        unsafe {
            std::env::remove_var("CADENCE_TEST_JOBS_ROOT");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${NONEXISTENT_CADENCE_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(name)) if name == "NONEXISTENT_CADENCE_VAR_12345"));
    }

    #[test]
    fn test_expand_env_vars_no_vars() {
        let content = "value = \"no variables here\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, content);
    }

    #[test]
    fn test_read_expanded_returns_raw_text() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "jobs = [\"basic\"]").unwrap();

        let content = ConfigLoader::read_expanded(file.path()).unwrap();
        assert!(content.contains("jobs = [\"basic\"]"));
    }

    #[test]
    fn test_expand_path_no_tilde() {
        let path = "/usr/local/jobs";
        assert_eq!(ConfigLoader::expand_path(path), path);
    }
}
