//! Canonical job descriptors.

use serde::Serialize;

use cadence_config::RunAs;

use crate::schedule::ScheduleValue;
use crate::spec::CronSpec;
use crate::worker::WorkerOptions;

/// Cadence between runs: a fixed number of milliseconds or a cron schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Interval {
    Millis(u64),
    Schedule(ScheduleValue),
}

/// A fully resolved job, ready for an executor.
///
/// Optional fields are left out when nothing determined them. `path` is a
/// file path unless `worker.eval` is set, in which case it is inline source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub path: String,

    pub timeout: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron: Option<CronSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_seconds: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<WorkerOptions>,

    pub run_as: RunAs,
}

impl JobDescriptor {
    /// Whether `path` holds inline source rather than a file path.
    pub fn is_inline(&self) -> bool {
        self.worker.as_ref().is_some_and(WorkerOptions::is_eval)
    }

    /// The cron schedule driving this job, if any.
    pub fn schedule(&self) -> Option<&ScheduleValue> {
        match &self.interval {
            Some(Interval::Schedule(schedule)) => Some(schedule),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn file_descriptor() -> JobDescriptor {
        JobDescriptor {
            name: Some("basic".to_string()),
            path: "/jobs/basic.js".to_string(),
            timeout: 0,
            interval: Some(Interval::Millis(0)),
            cron: None,
            timezone: None,
            has_seconds: None,
            worker: None,
            run_as: RunAs::Worker,
        }
    }

    #[test]
    fn test_serialize_omits_unset_fields() {
        let value = serde_json::to_value(file_descriptor()).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "basic",
                "path": "/jobs/basic.js",
                "timeout": 0,
                "interval": 0,
                "runAs": "worker"
            })
        );
    }

    #[test]
    fn test_serialize_cron_descriptor() {
        let schedule = ScheduleValue::parse("* * * * *", false).unwrap();
        let descriptor = JobDescriptor {
            name: None,
            interval: Some(Interval::Schedule(schedule)),
            cron: Some(CronSpec::from("* * * * *")),
            has_seconds: Some(false),
            timezone: Some("local".to_string()),
            run_as: RunAs::Process,
            ..file_descriptor()
        };
        let value = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(value["interval"], json!("0 * * * * *"));
        assert_eq!(value["cron"], json!("* * * * *"));
        assert_eq!(value["hasSeconds"], json!(false));
        assert_eq!(value["timezone"], json!("local"));
        assert_eq!(value["runAs"], json!("process"));
        assert!(value.get("name").is_none());
    }

    #[test]
    fn test_is_inline() {
        let mut descriptor = file_descriptor();
        assert!(!descriptor.is_inline());

        descriptor.worker = Some(WorkerOptions::new().with("test", 1));
        assert!(!descriptor.is_inline());

        descriptor.worker = Some(WorkerOptions::with_forced_eval(None));
        assert!(descriptor.is_inline());
    }

    #[test]
    fn test_schedule_accessor() {
        let mut descriptor = file_descriptor();
        assert!(descriptor.schedule().is_none());

        let schedule = ScheduleValue::parse("0 12 * * *", false).unwrap();
        descriptor.interval = Some(Interval::Schedule(schedule.clone()));
        assert_eq!(descriptor.schedule(), Some(&schedule));
    }
}
