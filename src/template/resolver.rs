//! Placeholder resolution for a single scalar string.
//!
//! A placeholder is the shortest `<...>` span on one line. The text between
//! the brackets names a key in the [`SecretMap`].

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::error::ReplacementError;
use super::node::Node;
use super::SecretMap;

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)<(.*?)>").unwrap());

/// Outcome of resolving one field.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub value: Node,
    pub errors: Vec<ReplacementError>,
}

fn placeholder_name(inner: &str) -> &str {
    inner.trim_matches(|c: char| c == '<' || c == '>')
}

/// Resolve every placeholder in `value` against `secrets`.
///
/// String secrets are substituted inline. A non-string secret replaces the
/// whole field only when its token is the entire field (`"<replicas>"`
/// becomes the number itself); embedded in longer text it is rendered with
/// its display form. Unknown names are reported and left in place.
pub fn resolve(key: &str, value: &str, secrets: &SecretMap) -> Resolution {
    let mut errors = Vec::new();
    let mut whole_field: Option<serde_json::Value> = None;

    let replaced = PLACEHOLDER_RE.replace_all(value, |caps: &Captures| {
        let token = &caps[0];
        let name = placeholder_name(&caps[1]);

        match secrets.get(name) {
            Some(serde_json::Value::String(secret)) => secret.clone(),
            Some(other) if token.len() == value.len() => {
                whole_field = Some(other.clone());
                token.to_string()
            }
            Some(other) => other.to_string(),
            None => {
                errors.push(ReplacementError::MissingPlaceholder {
                    key: key.to_string(),
                    value: value.to_string(),
                    placeholder: name.to_string(),
                });
                token.to_string()
            }
        }
    });

    let value = match whole_field {
        Some(raw) => Node::from(raw),
        None => Node::String(replaced.into_owned()),
    };

    Resolution { value, errors }
}
