//! Filesystem existence probe.

use std::path::Path;

/// Answers whether a path names an existing regular file.
pub trait FileProbe {
    fn is_file(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileProbe;

impl FileProbe for StdFileProbe {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

impl<F> FileProbe for F
where
    F: Fn(&Path) -> bool,
{
    fn is_file(&self, path: &Path) -> bool {
        self(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_std_probe_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("basic.js");
        fs::write(&file, "console.log('hello')").unwrap();

        assert!(StdFileProbe.is_file(&file));
    }

    #[test]
    fn test_std_probe_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!StdFileProbe.is_file(dir.path()));
    }

    #[test]
    fn test_std_probe_glob_pattern() {
        assert!(!StdFileProbe.is_file(Path::new("*.js")));
    }

    #[test]
    fn test_closure_probe() {
        let probe = |path: &Path| path.ends_with("known.js");
        assert!(probe.is_file(Path::new("/jobs/known.js")));
        assert!(!probe.is_file(Path::new("/jobs/other.js")));
    }
}
