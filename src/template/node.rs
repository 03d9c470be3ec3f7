//! In-memory document tree.
//!
//! Manifests are decoded once into [`Node`] at the boundary so the walker only
//! ever sees a fixed set of shapes. Number and boolean keys are converted to
//! strings the way the Kubernetes YAML loader does; anything else the decoder
//! cannot express (structured keys, YAML tags) is rejected here as a
//! [`StructuralError`].

use base64::Engine;
use std::collections::BTreeMap;

use super::error::StructuralError;

/// Key-sorted mapping node.
pub type Mapping = BTreeMap<String, Node>;

/// A value inside a manifest.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Mapping(Mapping),
    Sequence(Vec<Node>),
    String(String),
    /// Raw bytes produced by the secret replacement policy.
    Bytes(Vec<u8>),
    Scalar(Scalar),
}

/// Non-string scalar values.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
}

impl Node {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the node's shape, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Mapping(_) => "mapping",
            Node::Sequence(_) => "sequence",
            Node::String(_) => "string",
            Node::Bytes(_) => "bytes",
            Node::Scalar(Scalar::Null) => "null",
            Node::Scalar(Scalar::Bool(_)) => "bool",
            Node::Scalar(Scalar::Number(_)) => "number",
        }
    }

    /// Convert to JSON. Bytes are encoded as standard base64, which is how
    /// Kubernetes represents `[]byte` fields on the wire.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Node::Mapping(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Node::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(Node::to_json).collect())
            }
            Node::String(s) => serde_json::Value::String(s.clone()),
            Node::Bytes(bytes) => serde_json::Value::String(
                base64::engine::general_purpose::STANDARD.encode(bytes),
            ),
            Node::Scalar(Scalar::Null) => serde_json::Value::Null,
            Node::Scalar(Scalar::Bool(b)) => serde_json::Value::Bool(*b),
            Node::Scalar(Scalar::Number(n)) => serde_json::Value::Number(n.clone()),
        }
    }

    /// Decode a YAML value, rejecting shapes JSON cannot represent.
    pub fn from_yaml(value: serde_yaml::Value) -> Result<Self, StructuralError> {
        decode_yaml(value, "")
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => {
                Node::Mapping(map.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
            serde_json::Value::Array(items) => {
                Node::Sequence(items.into_iter().map(Node::from).collect())
            }
            serde_json::Value::String(s) => Node::String(s),
            serde_json::Value::Number(n) => Node::Scalar(Scalar::Number(n)),
            serde_json::Value::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            serde_json::Value::Null => Node::Scalar(Scalar::Null),
        }
    }
}

fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn decode_yaml(value: serde_yaml::Value, path: &str) -> Result<Node, StructuralError> {
    use serde_yaml::Value;

    match value {
        Value::Mapping(map) => {
            let mut out = Mapping::new();
            for (key, val) in map {
                let key = match key {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(StructuralError::NonStringKey {
                            path: path.to_string(),
                            key: format!("{other:?}"),
                        })
                    }
                };
                let decoded = decode_yaml(val, &child_path(path, &key))?;
                out.insert(key, decoded);
            }
            Ok(Node::Mapping(out))
        }
        Value::Sequence(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| decode_yaml(item, &format!("{path}[{idx}]")))
            .collect::<Result<Vec<_>, _>>()
            .map(Node::Sequence),
        Value::String(s) => Ok(Node::String(s)),
        Value::Bool(b) => Ok(Node::Scalar(Scalar::Bool(b))),
        Value::Null => Ok(Node::Scalar(Scalar::Null)),
        Value::Number(n) => {
            let number = if let Some(i) = n.as_i64() {
                serde_json::Number::from(i)
            } else if let Some(u) = n.as_u64() {
                serde_json::Number::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .ok_or_else(|| StructuralError::InvalidNumber {
                        path: path.to_string(),
                        value: n.to_string(),
                    })?
            };
            Ok(Node::Scalar(Scalar::Number(number)))
        }
        Value::Tagged(tagged) => Err(StructuralError::Tagged {
            path: path.to_string(),
            tag: tagged.tag.to_string(),
        }),
    }
}

/// A decoded manifest: always a mapping at the root.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Mapping,
}

impl Document {
    pub fn from_yaml(value: serde_yaml::Value) -> Result<Self, StructuralError> {
        match Node::from_yaml(value)? {
            Node::Mapping(root) => Ok(Self { root }),
            other => Err(StructuralError::NotAMapping {
                path: String::new(),
                found: other.type_name(),
            }),
        }
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self, StructuralError> {
        match Node::from(value) {
            Node::Mapping(root) => Ok(Self { root }),
            other => Err(StructuralError::NotAMapping {
                path: String::new(),
                found: other.type_name(),
            }),
        }
    }

    /// The declared `kind` discriminator, if it is a string.
    pub fn kind(&self) -> Option<&str> {
        self.root.get("kind").and_then(Node::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.root.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.root.get_mut(key)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.root
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}
