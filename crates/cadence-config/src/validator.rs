//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Convert the first error into a [`ConfigError`], if any.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_extensions(config, &mut result);
        Self::validate_root(config, &mut result);
        Self::validate_overrides(config, &mut result);

        Ok(result)
    }

    fn validate_extensions(config: &Config, result: &mut ValidationResult) {
        let scheduler = &config.scheduler;

        if scheduler.default_extension.trim().is_empty() {
            result.add_error(ValidationError::new(
                "scheduler.default_extension",
                "default_extension cannot be empty",
            ));
        } else if scheduler.default_extension.starts_with('.') {
            result.add_error(ValidationError::new(
                "scheduler.default_extension",
                "default_extension must not start with '.'",
            ));
        }

        for ext in &scheduler.accepted_extensions {
            if !ext.starts_with('.') || ext.len() < 2 {
                result.add_error(ValidationError::new(
                    "scheduler.accepted_extensions",
                    format!("Accepted extension '{}' must look like '.js'", ext),
                ));
            }
        }

        let dotted = format!(".{}", scheduler.default_extension);
        if !scheduler.accepted_extensions.is_empty()
            && !scheduler.accepted_extensions.contains(&dotted)
        {
            result.add_warning(ValidationWarning::new(
                "scheduler.accepted_extensions",
                format!(
                    "default_extension '{}' is not listed in accepted_extensions",
                    scheduler.default_extension
                ),
            ));
        }
    }

    fn validate_root(config: &Config, result: &mut ValidationResult) {
        if !config.scheduler.root.is_dir() {
            result.add_warning(ValidationWarning::new(
                "scheduler.root",
                format!("Jobs root does not exist: {:?}", config.scheduler.root),
            ));
        }
    }

    fn validate_overrides(config: &Config, result: &mut ValidationResult) {
        if let Some(ref timezone) = config.scheduler.timezone {
            if timezone.trim().is_empty() {
                result.add_error(ValidationError::new(
                    "scheduler.timezone",
                    "timezone cannot be blank; remove it to disable the fallback",
                ));
            }
        }

        if let Some(mode) = config.scheduler.run_jobs_as {
            result.add_warning(ValidationWarning::new(
                "scheduler.run_jobs_as",
                format!("Every job will run as '{}' regardless of its own run_as", mode),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
