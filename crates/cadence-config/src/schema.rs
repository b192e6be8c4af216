//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scheduler: SchedulerDefaults,
}

/// Execution mode of a job: a worker thread or a separate process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunAs {
    #[default]
    Worker,
    Process,
}

impl RunAs {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Worker => "worker",
            Self::Process => "process",
        }
    }
}

impl fmt::Display for RunAs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduler-wide defaults applied to every job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerDefaults {
    /// Directory that name-only jobs are resolved against.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Fallback timeout in milliseconds.
    #[serde(default)]
    pub timeout: u64,

    /// Fallback interval in milliseconds.
    #[serde(default)]
    pub interval: u64,

    /// Cron text uses the 6-field grammar (seconds first).
    #[serde(default)]
    pub has_seconds: bool,

    /// Extension appended to names without one, without the leading dot.
    #[serde(default = "default_extension")]
    pub default_extension: String,

    /// Extensions (with leading dot) that mark a name as already complete.
    #[serde(default = "default_accepted_extensions")]
    pub accepted_extensions: Vec<String>,

    /// Fallback timezone for cron occurrences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// Forces every job onto one execution mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_jobs_as: Option<RunAs>,
}

fn default_root() -> PathBuf {
    PathBuf::from("./jobs")
}

fn default_extension() -> String {
    "js".to_string()
}

fn default_accepted_extensions() -> Vec<String> {
    vec![".js".to_string(), ".mjs".to_string(), ".cjs".to_string()]
}

impl Default for SchedulerDefaults {
    fn default() -> Self {
        Self {
            root: default_root(),
            timeout: 0,
            interval: 0,
            has_seconds: false,
            default_extension: default_extension(),
            accepted_extensions: default_accepted_extensions(),
            timezone: None,
            run_jobs_as: None,
        }
    }
}

impl SchedulerDefaults {
    /// Whether `name` already ends with one of the accepted extensions.
    pub fn has_accepted_extension(&self, name: &str) -> bool {
        self.accepted_extensions
            .iter()
            .any(|ext| !ext.is_empty() && name.ends_with(ext.as_str()))
    }

    /// File name for a job name, appending the default extension when needed.
    pub fn file_name_for(&self, name: &str) -> String {
        if self.has_accepted_extension(name) {
            name.to_string()
        } else {
            format!("{}.{}", name, self.default_extension.trim_start_matches('.'))
        }
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
