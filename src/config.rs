use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::analyzer::DEFAULT_DUMP;
use crate::emit::EmitOptions;
use crate::error::{Error, Result};

/// The config file picked up from the package root when none is given.
pub const DEFAULT_CONFIG: &str = "polymer-externs.toml";

/// Settings for one run. Every field is optional in the TOML file.
///
/// ```toml
/// analysis = "build/analysis.json"
/// output = "externs/polymer-mixins.js"
/// check = true
/// namespace = "Polymer"
/// static-methods = false
/// inheritance = "implements"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Feature dump, relative to the package root.
    pub analysis: PathBuf,

    /// Where to write the externs; stdout when absent.
    pub output: Option<PathBuf>,

    /// Parse the externs before writing them.
    pub check: bool,

    /// How the externs are rendered.
    #[serde(flatten)]
    pub emit: EmitOptions,

    /// Keys no setting claims, usually typos. Reported when the file is loaded.
    #[serde(flatten)]
    pub unknown: BTreeMap<String, toml::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            analysis: PathBuf::from(DEFAULT_DUMP),
            output: None,
            check: false,
            emit: EmitOptions::default(),
            unknown: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Parses a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: Config = toml::from_str(&contents).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;

        for key in config.unknown.keys() {
            warn!(path = %path.display(), %key, "ignoring unknown config key");
        }

        Ok(config)
    }

    /// Loads `explicit` if given, else [`DEFAULT_CONFIG`] from `root` if it exists, else the
    /// defaults.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = root.join(DEFAULT_CONFIG);
                if !candidate.is_file() {
                    debug!("no config file, using defaults");
                    return Ok(Config::default());
                }
                candidate
            }
        };

        debug!(path = %path.display(), "loading config");
        Config::from_file(&path)
    }
}
