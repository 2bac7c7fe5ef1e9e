use std::fmt::Display;

use serde::Deserialize;
use tracing::{debug, info, trace};

use crate::feature::{Feature, Method, Param};
use crate::filter::select_mixins;

/// The header placed above the generated declarations unless the config supplies another.
pub const DEFAULT_HEADER: &str = "/**
 * @fileoverview Generated typings for Polymer mixins
 * @externs
 *
 * This file is generated. Do not edit it by hand; regenerate it from the
 * package analysis instead.
 */
/* eslint-disable */";

/// A dotted identifier split at its last `.`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespaceName<'a> {
    /// Everything before the last `.`, if there is one.
    pub namespace: Option<&'a str>,

    /// Everything after the last `.`.
    pub name: &'a str,
}

impl<'a> NamespaceName<'a> {
    /// Splits `Polymer.ElementMixin` into `Polymer` and `ElementMixin`. Only the last `.` counts:
    /// `Polymer.Foo.Bar` has namespace `Polymer.Foo`.
    pub fn split(identifier: &'a str) -> Self {
        match identifier.rsplit_once('.') {
            Some((namespace, name)) => NamespaceName {
                namespace: Some(namespace),
                name,
            },
            None => NamespaceName {
                namespace: None,
                name: identifier,
            },
        }
    }

    /// The Closure type name: `namespace_name`, or the bare name without a namespace.
    pub fn combined(&self) -> String {
        self.to_string()
    }
}

impl Display for NamespaceName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.namespace {
            Some(namespace) => write!(f, "{}_{}", namespace, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Which mixins are emitted, by namespace.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "Option<String>")]
pub enum NamespacePolicy {
    /// Every mixin.
    #[default]
    Any,

    /// Only mixins whose namespace is exactly this one. Others are skipped entirely.
    Only(String),
}

impl NamespacePolicy {
    /// Whether a mixin in `namespace` gets a block.
    pub fn admits(&self, namespace: Option<&str>) -> bool {
        match self {
            NamespacePolicy::Any => true,
            NamespacePolicy::Only(only) => namespace == Some(only.as_str()),
        }
    }
}

impl From<Option<String>> for NamespacePolicy {
    fn from(namespace: Option<String>) -> Self {
        match namespace {
            Some(namespace) => NamespacePolicy::Only(namespace),
            None => NamespacePolicy::Any,
        }
    }
}

/// The tag linking a mixin record to its parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InheritanceTag {
    /// `@extends {Parent}`.
    #[default]
    Extends,

    /// `@implements {Parent}`.
    Implements,
}

impl Display for InheritanceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InheritanceTag::Extends => write!(f, "extends"),
            InheritanceTag::Implements => write!(f, "implements"),
        }
    }
}

/// Knobs that select between the historical flavours of the externs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EmitOptions {
    /// Restrict output to one namespace.
    pub namespace: NamespacePolicy,

    /// Drop the generated `@param` lines of an `@override` that documents no params itself.
    pub suppress_override_params: bool,

    /// Leave out methods that carry `inheritedFrom`.
    pub skip_inherited_methods: bool,

    /// Emit `staticMethods` as properties of the mixin symbol.
    pub static_methods: bool,

    /// Annotate methods without a declared return as `@return {undefined}`.
    pub undefined_return: bool,

    /// Tag used for parent mixins.
    pub inheritance: InheritanceTag,

    /// Text placed above the declarations.
    pub header: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            namespace: NamespacePolicy::Any,
            suppress_override_params: true,
            skip_inherited_methods: false,
            static_methods: true,
            undefined_return: true,
            inheritance: InheritanceTag::Extends,
            header: DEFAULT_HEADER.to_string(),
        }
    }
}

/// Generates the externs file for every selected mixin in `features`.
///
/// # Example
/// ```
/// # use polymer_externs::{generate, EmitOptions};
/// # use polymer_externs::feature::Analysis;
/// let analysis: Analysis = serde_json::from_str(r#"[{
///     "name": "Polymer.MyMixin",
///     "kinds": ["element-mixin"],
///     "properties": [{"name": "foo", "type": "string"}]
/// }]"#).unwrap();
///
/// let externs = generate(&analysis.features, &EmitOptions::default());
/// assert!(externs.contains("/** @type {string} */\nPolymer_MyMixin.prototype.foo;"));
/// ```
pub fn generate(features: &[Feature], options: &EmitOptions) -> String {
    let emitter = Emitter { options };

    let mut declarations = Vec::new();
    let mut mixins = 0;
    for mixin in select_mixins(features) {
        if emitter.mixin(mixin, &mut declarations) {
            mixins += 1;
        }
    }

    info!(mixins, declarations = declarations.len(), "generated externs");

    let mut out = String::new();
    let header = options.header.trim_end();
    if !header.is_empty() {
        out.push_str(header);
        out.push('\n');
    }

    for declaration in &declarations {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(declaration);
        out.push('\n');
    }

    out
}

struct Emitter<'a> {
    options: &'a EmitOptions,
}

impl Emitter<'_> {
    /// Pushes the declarations of one mixin. Returns `false` when the mixin is skipped.
    fn mixin(&self, mixin: &Feature, out: &mut Vec<String>) -> bool {
        let split = NamespaceName::split(&mixin.name);
        if split.name.is_empty() {
            debug!(mixin = %mixin.name, "skipping mixin without a usable name");
            return false;
        }

        if !self.options.namespace.admits(split.namespace) {
            debug!(
                mixin = %mixin.name,
                policy = ?self.options.namespace,
                "skipping mixin outside the emitted namespace"
            );
            return false;
        }

        let type_name = split.combined();
        debug!(mixin = %mixin.name, %type_name, "emitting mixin");

        let mut doc = vec!["@record".to_string()];
        for parent in &mixin.mixins {
            if parent.identifier.is_empty() {
                continue;
            }
            doc.push(format!(
                "@{} {{{}}}",
                self.options.inheritance,
                NamespaceName::split(&parent.identifier)
            ));
        }
        out.push(format!("{}\nfunction {}(){{}}", jsdoc(&doc), type_name));

        for property in &mixin.properties {
            if property.name.is_empty() || property.privacy.is_private() || property.is_inherited()
            {
                trace!(
                    property = %property.name,
                    privacy = %property.privacy,
                    inherited = property.is_inherited(),
                    "skipping property"
                );
                continue;
            }
            out.push(format!(
                "/** @type {{{}}} */\n{}.prototype.{};",
                property.type_.as_deref().unwrap_or("*"),
                type_name,
                property.name
            ));
        }

        let prototype = format!("{}.prototype", type_name);
        for method in mixin.methods.iter().filter(|m| self.include_method(m)) {
            out.push(self.method(&prototype, method));
        }

        if self.options.static_methods {
            for method in mixin.static_methods.iter().filter(|m| self.include_method(m)) {
                out.push(self.method(&type_name, method));
            }
        }

        true
    }

    fn include_method(&self, method: &Method) -> bool {
        if method.name.is_empty() || method.privacy.is_private() {
            trace!(method = %method.name, privacy = %method.privacy, "skipping method");
            return false;
        }

        if self.options.skip_inherited_methods && method.is_inherited() {
            trace!(method = %method.name, "skipping inherited method");
            return false;
        }

        true
    }

    /// Renders `target.name = function(...){};` with its annotations.
    fn method(&self, target: &str, method: &Method) -> String {
        let is_override = method.is_override();
        let mut doc = Vec::new();

        let omit_params =
            is_override && self.options.suppress_override_params && !method.documents_params();
        if !omit_params {
            for param in &method.params {
                doc.push(format!("@param {{{}}} {}", param_type(param), param.bare_name()));
            }
        }

        match method.return_type() {
            Some(type_) => doc.push(format!("@return {{{}}}", type_)),
            None if self.options.undefined_return && !is_override => {
                doc.push("@return {undefined}".to_string())
            }
            None => (),
        }

        if is_override {
            doc.push("@override".to_string());
        }

        let params = method
            .params
            .iter()
            .map(Param::bare_name)
            .collect::<Vec<_>>()
            .join(", ");
        let stub = format!("{}.{} = function({}){{}};", target, method.name, params);

        if doc.is_empty() {
            stub
        } else {
            format!("{}\n{}", jsdoc(&doc), stub)
        }
    }
}

/// The declared type, or a wildcard that keeps rest parameters variadic.
fn param_type(param: &Param) -> &str {
    match param.type_.as_deref() {
        Some(type_) => type_,
        None if param.is_variadic() => "...*",
        None => "*",
    }
}

fn jsdoc(lines: &[String]) -> String {
    let mut out = String::from("/**\n");
    for line in lines {
        out.push_str(" * ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(" */");
    out
}
