use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::emit::{InheritanceTag, NamespacePolicy};

/// Generate Closure externs for the Polymer mixins of a package.
#[derive(Debug, Parser)]
#[command(name = "polymer-externs", author, version)]
pub struct Cli {
    /// Package root containing the analyzer's feature dump.
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Feature dump, relative to the package root [default: analysis.json].
    #[arg(short, long, value_name = "FILE")]
    pub analysis: Option<PathBuf>,

    /// Config file [default: polymer-externs.toml in the package root, if present].
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the externs here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Only emit mixins of this namespace.
    #[arg(long, value_name = "NS")]
    pub only_namespace: Option<String>,

    /// Leave out inherited methods.
    #[arg(long)]
    pub skip_inherited_methods: bool,

    /// Leave out static methods.
    #[arg(long)]
    pub no_static_methods: bool,

    /// Do not annotate unknown returns as `undefined`.
    #[arg(long)]
    pub no_undefined_return: bool,

    /// Keep generated params on overrides that document none.
    #[arg(long)]
    pub keep_override_params: bool,

    /// Link parent mixins with `@implements` instead of `@extends`.
    #[arg(long)]
    pub implements: bool,

    /// Parse the externs before writing them.
    #[arg(long)]
    pub check: bool,

    /// Debug logging.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Errors only.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Overrides the loaded config with whatever was given on the command line.
    pub fn apply(&self, config: &mut Config) {
        if let Some(analysis) = &self.analysis {
            config.analysis = analysis.clone();
        }
        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }
        if let Some(namespace) = &self.only_namespace {
            config.emit.namespace = NamespacePolicy::Only(namespace.clone());
        }
        if self.implements {
            config.emit.inheritance = InheritanceTag::Implements;
        }

        config.check |= self.check;
        config.emit.skip_inherited_methods |= self.skip_inherited_methods;
        config.emit.static_methods &= !self.no_static_methods;
        config.emit.undefined_return &= !self.no_undefined_return;
        config.emit.suppress_override_params &= !self.keep_override_params;
    }
}
