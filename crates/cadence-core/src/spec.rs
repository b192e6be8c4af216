//! Raw job specifications as authored by callers.

use serde::{Deserialize, Serialize};

use cadence_config::RunAs;

use crate::schedule::ScheduleValue;
use crate::worker::WorkerOptions;

/// A job as supplied by the caller, in one of three shapes.
///
/// In a manifest a bare string is a [`JobSpec::Name`], a table holding only
/// `source` (and optionally `name`) is a [`JobSpec::Inline`], and any other
/// table is a [`JobSpec::Descriptor`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum JobSpec {
    /// A job name, optionally carrying a file extension.
    Name(String),
    /// An executable unit of inline source.
    Inline(InlineJob),
    /// A partial descriptor.
    Descriptor(PartialJob),
}

impl From<&str> for JobSpec {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for JobSpec {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<InlineJob> for JobSpec {
    fn from(job: InlineJob) -> Self {
        Self::Inline(job)
    }
}

impl From<PartialJob> for JobSpec {
    fn from(job: PartialJob) -> Self {
        Self::Descriptor(job)
    }
}

/// Inline executable source with an optional identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InlineJob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub source: String,
}

impl InlineJob {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            name: None,
            source: source.into(),
        }
    }

    pub fn named(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            source: source.into(),
        }
    }

    /// Wrap the source into a self-invoking fragment: `(<source>)()`.
    pub fn materialize(&self) -> String {
        format!("({})()", self.source)
    }
}

/// Where a job's code lives.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PathSpec {
    /// A file path, glob-like pattern or raw source text.
    File(String),
    /// Inline executable source.
    Inline(InlineJob),
}

impl From<&str> for PathSpec {
    fn from(path: &str) -> Self {
        Self::File(path.to_string())
    }
}

impl From<String> for PathSpec {
    fn from(path: String) -> Self {
        Self::File(path)
    }
}

impl From<InlineJob> for PathSpec {
    fn from(job: InlineJob) -> Self {
        Self::Inline(job)
    }
}

/// A cron schedule, either as text or already parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CronSpec {
    Expression(String),
    Schedule(ScheduleValue),
}

impl From<&str> for CronSpec {
    fn from(expression: &str) -> Self {
        Self::Expression(expression.to_string())
    }
}

impl From<ScheduleValue> for CronSpec {
    fn from(schedule: ScheduleValue) -> Self {
        Self::Schedule(schedule)
    }
}

/// A job given as a mapping with any subset of fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialJob {
    pub name: Option<String>,

    pub path: Option<PathSpec>,

    /// Milliseconds before the first run.
    pub timeout: Option<u64>,

    /// Milliseconds between runs.
    pub interval: Option<u64>,

    pub cron: Option<CronSpec>,

    pub timezone: Option<String>,

    #[serde(alias = "hasSeconds")]
    pub has_seconds: Option<bool>,

    #[serde(alias = "runAs")]
    pub run_as: Option<RunAs>,

    pub worker: Option<WorkerOptions>,
}

#[cfg(test)]
#[path = "spec_tests.rs"]
mod tests;
