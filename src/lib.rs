#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

/// The feature records reported by the package analyzer, decoded leniently from its JSON dump.
pub mod feature;

/// Loads the analyzer's feature dump for a package root.
pub mod analyzer;

/// Selects the mixin features that get externs.
pub mod filter;

/// Renders Closure externs for the selected mixins.
pub mod emit;

/// Validates generated externs with [`swc_ecma_parser`].
pub mod check;

/// Configuration file loading and merging.
pub mod config;

/// Command line arguments.
pub mod cli;

/// Logging setup for the binary.
pub mod logger;

/// Error type shared by every stage.
pub mod error;

/// Private crate for testing utilities.
#[cfg(test)]
pub(crate) mod testing;

pub use analyzer::{Analyzer, FeatureDump};
pub use emit::{generate, EmitOptions};
pub use error::{Error, Result};
pub use feature::Feature;
