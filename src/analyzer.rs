use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::feature::Analysis;

/// The dump file name the analyzer writes into a package root.
pub const DEFAULT_DUMP: &str = "analysis.json";

/// Produces the feature collection of a package.
///
/// Feature extraction itself belongs to the analyzer; implementations only hand over what it
/// reported, in the order it reported it.
pub trait Analyzer {
    /// Analyzes the package rooted at `root`.
    fn analyze(&self, root: &Path) -> Result<Analysis>;
}

/// Reads the analyzer's JSON feature dump from the package root.
#[derive(Debug, Clone)]
pub struct FeatureDump {
    file: PathBuf,
}

impl FeatureDump {
    /// Reads `file`, resolved against the package root unless it is absolute.
    pub fn new(file: impl Into<PathBuf>) -> Self {
        FeatureDump { file: file.into() }
    }

    /// Where the dump is read from for `root`.
    pub fn path_in(&self, root: &Path) -> PathBuf {
        root.join(&self.file)
    }
}

impl Default for FeatureDump {
    fn default() -> Self {
        FeatureDump::new(DEFAULT_DUMP)
    }
}

impl Analyzer for FeatureDump {
    fn analyze(&self, root: &Path) -> Result<Analysis> {
        if !root.is_dir() {
            return Err(Error::PackageRoot(root.to_path_buf()));
        }

        let path = self.path_in(root);
        debug!(path = %path.display(), "reading feature dump");

        let contents = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let analysis: Analysis =
            serde_json::from_str(&contents).map_err(|source| Error::Json { path, source })?;

        info!(features = analysis.features.len(), "loaded analysis");
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_with(contents: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join(DEFAULT_DUMP), contents).expect("writing dump");
        dir
    }

    #[test]
    fn loads_in_order() {
        let root = root_with(
            r#"{"features": [
                {"name": "Polymer.B", "kinds": ["element-mixin"]},
                {"name": "Polymer.A", "kinds": ["element-mixin"]}
            ]}"#,
        );

        let analysis = FeatureDump::default().analyze(root.path()).expect("analysis");
        let names: Vec<_> = analysis.features.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Polymer.B", "Polymer.A"]);
    }

    #[test]
    fn custom_file() {
        let root = tempfile::tempdir().expect("temp dir");
        fs::create_dir(root.path().join("build")).expect("mkdir");
        fs::write(root.path().join("build/features.json"), "[]").expect("writing dump");

        let dump = FeatureDump::new("build/features.json");
        assert_eq!(dump.path_in(root.path()), root.path().join("build/features.json"));
        assert!(dump.analyze(root.path()).expect("analysis").features.is_empty());
    }

    #[test]
    fn missing_root() {
        let root = tempfile::tempdir().expect("temp dir");
        let gone = root.path().join("nope");
        assert!(matches!(
            FeatureDump::default().analyze(&gone),
            Err(Error::PackageRoot(p)) if p == gone
        ));
    }

    #[test]
    fn missing_dump() {
        let root = tempfile::tempdir().expect("temp dir");
        assert!(matches!(
            FeatureDump::default().analyze(root.path()),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn invalid_dump() {
        let root = root_with("{ not json");
        assert!(matches!(
            FeatureDump::default().analyze(root.path()),
            Err(Error::Json { .. })
        ));
    }
}
