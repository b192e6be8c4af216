//! Descriptor builder.
//!
//! Resolves a [`JobSpec`] against [`SchedulerDefaults`]. Sources are
//! reconciled in a fixed order:
//!
//! - `path`: inline source is materialized and marked `eval`; a blank path is
//!   derived from `root` and the job name; an explicit path is kept and marked
//!   `eval` unless it names an existing file.
//! - `timeout`/`interval`: the job's own value, then the scheduler default.
//!   A cron schedule always replaces `interval`.
//! - `timezone`: the job's own value, then the scheduler default.
//! - `run_as`: the scheduler-wide `run_jobs_as` override, then the job's own
//!   value, then [`RunAs::Worker`].

use std::path::Path;

use tracing::{debug, info};

use cadence_config::{RunAs, SchedulerDefaults};

use crate::descriptor::{Interval, JobDescriptor};
use crate::error::BuildError;
use crate::probe::{FileProbe, StdFileProbe};
use crate::schedule::ScheduleValue;
use crate::spec::{CronSpec, JobSpec, PartialJob, PathSpec};
use crate::worker::WorkerOptions;

/// Build a descriptor, probing the real filesystem.
pub fn build(spec: &JobSpec, defaults: &SchedulerDefaults) -> Result<JobDescriptor, BuildError> {
    DescriptorBuilder::new().build(spec, defaults)
}

/// Shape the spec arrived in before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Name,
    Inline,
    Descriptor,
}

/// Outcome of path resolution.
struct ResolvedPath {
    name: Option<String>,
    path: String,
    worker: Option<WorkerOptions>,
}

/// Builds canonical descriptors from job specifications.
///
/// The builder holds no state besides its file probe, so one instance can be
/// shared across threads when the probe allows it.
#[derive(Debug, Clone, Default)]
pub struct DescriptorBuilder<P = StdFileProbe> {
    probe: P,
}

impl DescriptorBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: FileProbe> DescriptorBuilder<P> {
    /// Create a builder with a custom file probe.
    pub fn with_probe(probe: P) -> Self {
        Self { probe }
    }

    /// Resolve one job specification.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidSpec`] when the spec yields neither a name
    /// nor a path, when inline source is blank, or when cron text does not
    /// parse.
    pub fn build(
        &self,
        spec: &JobSpec,
        defaults: &SchedulerDefaults,
    ) -> Result<JobDescriptor, BuildError> {
        let (shape, job) = normalize(spec);
        let resolved = self.resolve_path(&job, defaults)?;

        let timeout = job.timeout.unwrap_or(defaults.timeout);

        let mut interval = match job.interval {
            Some(millis) => Some(Interval::Millis(millis)),
            None if shape != Shape::Descriptor || defaults.interval > 0 => {
                Some(Interval::Millis(defaults.interval))
            }
            None => None,
        };

        if let Some(cron) = &job.cron {
            let has_seconds = job.has_seconds.unwrap_or(defaults.has_seconds);
            interval = Some(Interval::Schedule(parse_cron(cron, has_seconds)?));
        }

        let timezone = non_blank(job.timezone.as_deref())
            .or_else(|| non_blank(defaults.timezone.as_deref()))
            .map(str::to_string);

        let run_as = resolve_run_as(job.run_as, defaults.run_jobs_as);

        debug!(
            name = ?resolved.name,
            shape = ?shape,
            run_as = %run_as,
            inline = resolved.worker.as_ref().is_some_and(WorkerOptions::is_eval),
            "Built job descriptor"
        );

        Ok(JobDescriptor {
            name: resolved.name,
            path: resolved.path,
            timeout,
            interval,
            cron: job.cron,
            timezone,
            has_seconds: job.has_seconds,
            worker: resolved.worker,
            run_as,
        })
    }

    /// Resolve every spec in order, stopping at the first invalid one.
    pub fn build_all<'a, I>(
        &self,
        specs: I,
        defaults: &SchedulerDefaults,
    ) -> Result<Vec<JobDescriptor>, BuildError>
    where
        I: IntoIterator<Item = &'a JobSpec>,
    {
        let descriptors = specs
            .into_iter()
            .enumerate()
            .map(|(index, spec)| {
                self.build(spec, defaults).map_err(|e| BuildError::InvalidJob {
                    index,
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = descriptors.len(), "Built job descriptors");
        Ok(descriptors)
    }

    fn resolve_path(
        &self,
        job: &PartialJob,
        defaults: &SchedulerDefaults,
    ) -> Result<ResolvedPath, BuildError> {
        match &job.path {
            Some(PathSpec::Inline(inline)) => {
                if inline.source.trim().is_empty() {
                    return Err(BuildError::invalid_spec("inline job has no source"));
                }
                let name = non_blank(job.name.as_deref())
                    .or_else(|| non_blank(inline.name.as_deref()))
                    .map(str::to_string);
                Ok(ResolvedPath {
                    name,
                    path: inline.materialize(),
                    worker: Some(WorkerOptions::with_forced_eval(job.worker.as_ref())),
                })
            }
            Some(PathSpec::File(path)) if !path.trim().is_empty() => {
                let worker = if self.probe.is_file(Path::new(path)) {
                    job.worker.clone()
                } else {
                    debug!(path = %path, "Path is not an existing file, treating it as inline source");
                    Some(WorkerOptions::with_forced_eval(job.worker.as_ref()))
                };
                Ok(ResolvedPath {
                    name: non_blank(job.name.as_deref()).map(str::to_string),
                    path: path.clone(),
                    worker,
                })
            }
            _ => {
                let name = non_blank(job.name.as_deref())
                    .ok_or_else(|| BuildError::invalid_spec("job needs a name or a path"))?;
                let path = defaults.root.join(defaults.file_name_for(name));
                Ok(ResolvedPath {
                    name: Some(name.to_string()),
                    path: path.to_string_lossy().into_owned(),
                    worker: job.worker.clone(),
                })
            }
        }
    }
}

/// Bring every shape into the partial-descriptor form.
fn normalize(spec: &JobSpec) -> (Shape, PartialJob) {
    match spec {
        JobSpec::Name(name) => (
            Shape::Name,
            PartialJob {
                name: Some(name.clone()),
                ..Default::default()
            },
        ),
        JobSpec::Inline(inline) => (
            Shape::Inline,
            PartialJob {
                path: Some(PathSpec::Inline(inline.clone())),
                ..Default::default()
            },
        ),
        JobSpec::Descriptor(job) => (Shape::Descriptor, job.clone()),
    }
}

fn parse_cron(cron: &CronSpec, has_seconds: bool) -> Result<ScheduleValue, BuildError> {
    match cron {
        CronSpec::Expression(text) => ScheduleValue::parse(text, has_seconds).map_err(|e| {
            BuildError::invalid_spec(format!("invalid cron expression '{}': {}", text, e))
        }),
        CronSpec::Schedule(schedule) => Ok(schedule.clone()),
    }
}

/// The scheduler-wide override beats the job's own mode.
fn resolve_run_as(job: Option<RunAs>, run_jobs_as: Option<RunAs>) -> RunAs {
    run_jobs_as.or(job).unwrap_or_default()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
