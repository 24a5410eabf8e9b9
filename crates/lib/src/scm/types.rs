//! Catalogue entry types.
//!
//! Decoding is lenient: absent fields become empty strings or collections and
//! unknown fields are ignored. Dependencies are classified into [`Dependency`]
//! variants as they are decoded, so nothing downstream inspects raw JSON maps.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A problem that one or more solutions address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Problem {
  #[serde(deserialize_with = "null_as_default")]
  pub id: String,
  #[serde(deserialize_with = "null_as_default")]
  pub name: String,
  #[serde(deserialize_with = "null_as_default")]
  pub description: String,
}

/// A catalogue solution: the scientific code to run and what it needs.
///
/// Identified by its URL. The toolbox may only be a reference until it is
/// resolved with [`Solution::toolbox`](crate::scm::Solution::toolbox).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
  #[serde(default, deserialize_with = "null_as_default")]
  pub name: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub description: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub url: String,
  pub toolbox: ToolboxRef,
  #[serde(default, deserialize_with = "null_as_default")]
  pub dependencies: Vec<Dependency>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub problems: Vec<String>,
}

/// A toolbox as it appears inside a solution: either a bare URL or an
/// embedded (possibly partial) toolbox document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolboxRef {
  Url(String),
  Embedded(Box<Toolbox>),
}

impl ToolboxRef {
  /// The URL identifying the referenced toolbox.
  pub fn url(&self) -> &str {
    match self {
      ToolboxRef::Url(url) => url,
      ToolboxRef::Embedded(toolbox) => &toolbox.url,
    }
  }

  /// Whether only the URL of the toolbox is known.
  pub fn is_stub(&self) -> bool {
    match self {
      ToolboxRef::Url(_) => true,
      ToolboxRef::Embedded(toolbox) => toolbox.is_stub(),
    }
  }
}

/// The environment a solution runs in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toolbox {
  /// Free-form display name, normalized with [`safe_name`](crate::recipe::safe_name) for recipes.
  #[serde(deserialize_with = "null_as_default")]
  pub name: String,
  #[serde(deserialize_with = "null_as_default")]
  pub description: String,
  #[serde(deserialize_with = "null_as_default")]
  pub url: String,
  #[serde(deserialize_with = "null_as_default")]
  pub source: Source,
  #[serde(deserialize_with = "null_as_default")]
  pub dependencies: Vec<Dependency>,
  #[serde(deserialize_with = "null_as_default")]
  pub images: Vec<Image>,
}

impl Toolbox {
  /// A toolbox carrying nothing but its URL.
  pub fn stub(url: impl Into<String>) -> Self {
    Self {
      url: url.into(),
      ..Self::default()
    }
  }

  /// Whether this toolbox carries no attributes beyond (at most) its URL.
  pub fn is_stub(&self) -> bool {
    self.name.is_empty()
      && self.description.is_empty()
      && self.source == Source::default()
      && self.dependencies.is_empty()
      && self.images.is_empty()
  }
}

/// Where the toolbox source code lives and how to check it out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
  /// Repository type, e.g. `git` or `svn`.
  #[serde(rename = "type", deserialize_with = "null_as_default")]
  pub kind: String,
  #[serde(deserialize_with = "null_as_default")]
  pub url: String,
  /// Branch, tag or revision to check out.
  #[serde(deserialize_with = "null_as_default")]
  pub checkout: String,
  /// Shell command to run after checkout.
  #[serde(deserialize_with = "null_as_default")]
  pub exec: String,
}

/// A pre-built VM image at a cloud provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
  #[serde(default, deserialize_with = "null_as_default")]
  pub provider: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub image_id: String,
  /// Any further attributes the catalogue supplies.
  #[serde(flatten)]
  pub extras: BTreeMap<String, Value>,
}

impl Image {
  pub fn new(provider: impl Into<String>, image_id: impl Into<String>) -> Self {
    Self {
      provider: provider.into(),
      image_id: image_id.into(),
      extras: BTreeMap::new(),
    }
  }
}

/// A dependency of a toolbox or solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub enum Dependency {
  /// An OS-level package.
  System { name: String },
  /// A named python package.
  PythonNamed { name: String },
  /// A pip requirements file, relative to the checked-out source.
  PythonRequirements { path: String },
  /// Any other dependency type, kept verbatim.
  Unknown { raw: Map<String, Value> },
}

impl Dependency {
  pub fn system(name: impl Into<String>) -> Self {
    Dependency::System { name: name.into() }
  }

  pub fn python(name: impl Into<String>) -> Self {
    Dependency::PythonNamed { name: name.into() }
  }

  pub fn requirements(path: impl Into<String>) -> Self {
    Dependency::PythonRequirements { path: path.into() }
  }

  /// The catalogue `type` tag of this dependency, if it has one.
  pub fn kind(&self) -> Option<&str> {
    match self {
      Dependency::System { .. } => Some("system"),
      Dependency::PythonNamed { .. } | Dependency::PythonRequirements { .. } => Some("python"),
      Dependency::Unknown { raw } => raw.get("type").and_then(Value::as_str),
    }
  }
}

impl From<Map<String, Value>> for Dependency {
  fn from(raw: Map<String, Value>) -> Self {
    let kind = raw.get("type").and_then(Value::as_str).map(str::to_owned);

    match kind.as_deref() {
      Some("system") => Dependency::System {
        name: string_field(&raw, "name"),
      },
      // A `path` key always wins over `name`, whatever its value.
      Some("python") if raw.contains_key("path") => Dependency::PythonRequirements {
        path: string_field(&raw, "path"),
      },
      Some("python") => Dependency::PythonNamed {
        name: string_field(&raw, "name"),
      },
      _ => Dependency::Unknown { raw },
    }
  }
}

impl From<Dependency> for Map<String, Value> {
  fn from(dep: Dependency) -> Self {
    let (kind, key, value) = match dep {
      Dependency::System { name } => ("system", "name", name),
      Dependency::PythonNamed { name } => ("python", "name", name),
      Dependency::PythonRequirements { path } => ("python", "path", path),
      Dependency::Unknown { raw } => return raw,
    };

    let mut map = Map::new();
    map.insert("type".to_string(), Value::String(kind.to_string()));
    map.insert(key.to_string(), Value::String(value));
    map
  }
}

fn string_field(raw: &Map<String, Value>, key: &str) -> String {
  raw.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Envelope of `GET {base}/solutions`.
///
/// Entries stay raw so one undecodable solution does not sink the listing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SolutionEntries {
  #[serde(deserialize_with = "null_as_default")]
  pub solutions: Vec<Value>,
}

/// Envelope of `GET {base}/problems`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ProblemEntries {
  #[serde(deserialize_with = "null_as_default")]
  pub problems: Vec<Value>,
}
