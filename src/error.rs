use std::path::PathBuf;

use thiserror::Error;

/// Hard failures. Malformed per-member metadata is never an error; it degrades to a wildcard
/// annotation or an omitted line instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The package root does not exist or is not a directory.
    #[error("package root not found: {}", .0.display())]
    PackageRoot(PathBuf),

    /// A file could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,

        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The feature dump is not a JSON document of the expected shape.
    #[error("invalid feature dump {}: {source}", path.display())]
    Json {
        /// The dump that failed to decode.
        path: PathBuf,

        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The configuration file is not valid TOML for [`crate::config::Config`].
    #[error("invalid config {}: {source}", path.display())]
    Config {
        /// The config file.
        path: PathBuf,

        /// The underlying error.
        #[source]
        source: toml::de::Error,
    },

    /// The generated externs do not parse as JavaScript.
    #[error("generated externs do not parse ({line}:{column}): {message}")]
    Syntax {
        /// 1-based line of the first error.
        line: usize,

        /// 0-based column of the first error.
        column: usize,

        /// The parser's message.
        message: String,
    },
}

impl Error {
    /// An [`Error::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            Error::PackageRoot(PathBuf::from("nowhere")).to_string(),
            "package root not found: nowhere"
        );

        let err = Error::Syntax {
            line: 3,
            column: 7,
            message: "Unexpected token".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "generated externs do not parse (3:7): Unexpected token"
        );
    }

    #[test]
    fn io_keeps_source() {
        let err = Error::io(
            "analysis.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().starts_with("I/O error on analysis.json"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
