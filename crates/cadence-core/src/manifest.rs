//! Job manifests.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use cadence_config::ConfigLoader;

use crate::error::BuildError;
use crate::spec::JobSpec;

/// The `jobs` array of a Cadence config file.
///
/// ```toml
/// jobs = [
///     "basic",
///     { name = "inline", source = "() => console.log('hi')" },
///     { name = "report", cron = "0 9 * * 1-5", runAs = "process" },
/// ]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct JobManifest {
    #[serde(default)]
    pub jobs: Vec<JobSpec>,
}

impl JobManifest {
    /// Load the manifest from a TOML file, substituting `${VAR}` references.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        let content = ConfigLoader::read_expanded(path)?;
        let manifest = Self::from_toml(&content)?;
        debug!(path = %path.display(), jobs = manifest.jobs.len(), "Loaded job manifest");
        Ok(manifest)
    }

    /// Parse the manifest from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, BuildError> {
        toml::from_str(content).map_err(|e| BuildError::Manifest(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
