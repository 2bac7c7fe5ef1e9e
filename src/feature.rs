use std::collections::BTreeSet;
use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// The kind tag the analyzer attaches to element mixins.
pub const ELEMENT_MIXIN: &str = "element-mixin";

/// Everything the analyzer reported for one package, in analyzer order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "AnalysisShape")]
pub struct Analysis {
    /// The reported features.
    pub features: Vec<Feature>,
}

/// The dump is either `{"features": [...]}` or a bare list.
#[derive(Deserialize)]
#[serde(untagged)]
enum AnalysisShape {
    Wrapped { features: Vec<Feature> },
    Bare(Vec<Feature>),
}

impl From<AnalysisShape> for Analysis {
    fn from(shape: AnalysisShape) -> Self {
        match shape {
            AnalysisShape::Wrapped { features } | AnalysisShape::Bare(features) => {
                Analysis { features }
            }
        }
    }
}

/// A named construct reported by the analyzer. Mixin-only fields are empty for other kinds.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    /// Dotted identifier, e.g. `Polymer.ElementMixin`.
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,

    /// Kind tags such as `element-mixin` or `function`.
    #[serde(default, deserialize_with = "kinds")]
    pub kinds: BTreeSet<String>,

    /// Where the feature was declared.
    #[serde(default, deserialize_with = "lenient")]
    pub source_range: Option<SourceRange>,

    /// Parent mixins, in declaration order.
    #[serde(default, deserialize_with = "items")]
    pub mixins: Vec<MixinReference>,

    /// Instance properties.
    #[serde(default, deserialize_with = "items")]
    pub properties: Vec<Property>,

    /// Instance methods.
    #[serde(default, deserialize_with = "items")]
    pub methods: Vec<Method>,

    /// Methods defined on the mixin itself.
    #[serde(default, deserialize_with = "items")]
    pub static_methods: Vec<Method>,
}

impl Feature {
    /// Whether the analyzer tagged this feature as an element mixin.
    pub fn is_mixin(&self) -> bool {
        self.kinds.contains(ELEMENT_MIXIN)
    }

    /// The file the feature was declared in, if known.
    pub fn source_file(&self) -> Option<&str> {
        self.source_range.as_ref()?.file.as_deref()
    }
}

/// Source location of a feature. Only the file matters here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceRange {
    /// Path of the declaring file, relative to the package root.
    #[serde(default, deserialize_with = "text")]
    pub file: Option<String>,
}

/// A reference to a parent mixin. The analyzer writes either `{"identifier": "A.B"}` or just
/// `"A.B"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MixinReference {
    /// Dotted identifier of the parent.
    pub identifier: String,
}

impl<'de> Deserialize<'de> for MixinReference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let identifier = match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Object(mut map) => match map.remove("identifier") {
                Some(Value::String(s)) => s,
                _ => String::new(),
            },
            _ => String::new(),
        };

        Ok(MixinReference { identifier })
    }
}

/// Visibility of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Privacy {
    /// Public; also used when the analyzer's value is missing or unrecognized.
    #[default]
    Public,

    /// Protected.
    Protected,

    /// Private. Private members never get externs.
    Private,
}

impl Privacy {
    /// Private members never get externs.
    pub fn is_private(self) -> bool {
        self == Privacy::Private
    }
}

impl Display for Privacy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Privacy::Public => write!(f, "public"),
            Privacy::Protected => write!(f, "protected"),
            Privacy::Private => write!(f, "private"),
        }
    }
}

/// An instance property.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Property name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,

    /// Closure type expression.
    #[serde(default, rename = "type", deserialize_with = "text")]
    pub type_: Option<String>,

    /// Visibility.
    #[serde(default, deserialize_with = "privacy")]
    pub privacy: Privacy,

    /// The mixin or class this property was inherited from.
    #[serde(default, deserialize_with = "text")]
    pub inherited_from: Option<String>,
}

impl Property {
    /// Whether the property comes from an ancestor.
    pub fn is_inherited(&self) -> bool {
        self.inherited_from.is_some()
    }
}

/// An instance or static method.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    /// Method name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,

    /// Parameters, in order.
    #[serde(default, deserialize_with = "items")]
    pub params: Vec<Param>,

    /// Declared return.
    #[serde(default, rename = "return", deserialize_with = "lenient")]
    pub return_: Option<Return>,

    /// Visibility.
    #[serde(default, deserialize_with = "privacy")]
    pub privacy: Privacy,

    /// The mixin or class this method was inherited from.
    #[serde(default, deserialize_with = "text")]
    pub inherited_from: Option<String>,

    /// The method's own doc comment.
    #[serde(default, deserialize_with = "lenient")]
    pub jsdoc: Option<Jsdoc>,
}

impl Method {
    /// Whether the doc comment carries a tag with this title.
    pub fn has_tag(&self, title: &str) -> bool {
        self.jsdoc
            .as_ref()
            .map_or(false, |jsdoc| jsdoc.tags.iter().any(|tag| tag.title == title))
    }

    /// Marked `@override`.
    pub fn is_override(&self) -> bool {
        self.has_tag("override")
    }

    /// Carries at least one `@param` of its own.
    pub fn documents_params(&self) -> bool {
        self.has_tag("param")
    }

    /// Whether the method comes from an ancestor.
    pub fn is_inherited(&self) -> bool {
        self.inherited_from.is_some()
    }

    /// The declared return type, if any.
    pub fn return_type(&self) -> Option<&str> {
        self.return_.as_ref()?.type_.as_deref()
    }
}

/// A method parameter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Param {
    /// Parameter name, with a leading `...` for rest parameters.
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,

    /// Closure type expression.
    #[serde(default, rename = "type", deserialize_with = "text")]
    pub type_: Option<String>,

    /// Free-form description.
    #[serde(default, deserialize_with = "text")]
    pub description: Option<String>,
}

impl Param {
    /// Rest parameters are written `...name`.
    pub fn is_variadic(&self) -> bool {
        self.name.starts_with("...")
    }

    /// The name without the rest prefix.
    pub fn bare_name(&self) -> &str {
        self.name.strip_prefix("...").unwrap_or(&self.name)
    }
}

/// A declared return.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Return {
    /// Closure type expression.
    #[serde(default, rename = "type", deserialize_with = "text")]
    pub type_: Option<String>,
}

/// A parsed doc comment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Jsdoc {
    /// Block tags, in order.
    #[serde(default, deserialize_with = "items")]
    pub tags: Vec<JsdocTag>,
}

/// A single block tag such as `@override`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsdocTag {
    /// Tag name without the `@`.
    #[serde(default, alias = "tag", deserialize_with = "lenient")]
    pub title: String,
}

/// Decodes any value, falling back to the default when it has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Decodes a list element by element, dropping only the entries that have the wrong shape.
fn items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(values) => values
            .into_iter()
            .filter_map(|value| match serde_json::from_value(value) {
                Ok(item) => Some(item),
                Err(e) => {
                    debug!("dropping malformed entry: {}", e);
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// String tags only; anything else in the list is ignored.
fn kinds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeSet<String>, D::Error> {
    Ok(items::<D, Value>(deserializer)?
        .into_iter()
        .filter_map(|value| match value {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

/// Non-blank strings only.
fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

fn privacy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Privacy, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => match s.as_str() {
            "private" => Privacy::Private,
            "protected" => Privacy::Protected,
            _ => Privacy::Public,
        },
        _ => Privacy::Public,
    })
}
