//! # Cadence Core
//!
//! Normalizes heterogeneous job specifications into canonical descriptors.
//!
//! A job can be given as a bare name, an inline unit of source code, or a
//! partial descriptor. [`DescriptorBuilder`] resolves each of them against the
//! scheduler-wide [`SchedulerDefaults`] into one [`JobDescriptor`].

pub mod builder;
pub mod descriptor;
pub mod error;
pub mod manifest;
pub mod probe;
pub mod schedule;
pub mod spec;
pub mod worker;

pub use builder::{build, DescriptorBuilder};
pub use descriptor::{Interval, JobDescriptor};
pub use error::BuildError;
pub use manifest::JobManifest;
pub use probe::{FileProbe, StdFileProbe};
pub use schedule::{ScheduleError, ScheduleValue};
pub use spec::{CronSpec, InlineJob, JobSpec, PartialJob, PathSpec};
pub use worker::WorkerOptions;

pub use cadence_config::{RunAs, SchedulerDefaults};
