//! Field replacement policies.
//!
//! A policy decides what a resolved scalar looks like when it is written back
//! into the tree. Templates pick one policy per sub-tree.

use super::error::ReplacementError;
use super::node::{Node, Scalar};
use super::resolver::{resolve, Resolution};
use super::SecretMap;

/// Post-processing applied to every scalar string during a walk.
pub trait ReplacementPolicy {
    /// Display name for logging.
    fn name(&self) -> &'static str;

    /// Resolve `value` (found under `key`) and shape the result.
    fn replace(&self, key: &str, value: &str, secrets: &SecretMap) -> Resolution;
}

/// Plain substitution: the resolver's result is written back as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericReplacement;

impl ReplacementPolicy for GenericReplacement {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn replace(&self, key: &str, value: &str, secrets: &SecretMap) -> Resolution {
        resolve(key, value, secrets)
    }
}

/// Substitution for secret payloads, which Kubernetes stores as raw bytes.
///
/// Strings become their UTF-8 bytes; numbers and booleans become the bytes of
/// their display form. Null and structured secrets have no byte form and are
/// reported as [`ReplacementError::UnsupportedValue`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SecretReplacement;

impl ReplacementPolicy for SecretReplacement {
    fn name(&self) -> &'static str {
        "secret"
    }

    fn replace(&self, key: &str, value: &str, secrets: &SecretMap) -> Resolution {
        let Resolution {
            value: resolved,
            mut errors,
        } = resolve(key, value, secrets);

        let value = match into_text(key, value, resolved, &mut errors) {
            Some(text) => Node::Bytes(text.into_bytes()),
            None => Node::String(value.to_string()),
        };

        Resolution { value, errors }
    }
}

/// Substitution for string-only maps such as ConfigMap `data` and Secret
/// `stringData`. A whole-field number or boolean is written as its display
/// form instead of a native value.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringReplacement;

impl ReplacementPolicy for StringReplacement {
    fn name(&self) -> &'static str {
        "string"
    }

    fn replace(&self, key: &str, value: &str, secrets: &SecretMap) -> Resolution {
        let Resolution {
            value: resolved,
            mut errors,
        } = resolve(key, value, secrets);

        let text = into_text(key, value, resolved, &mut errors).unwrap_or_else(|| value.to_string());

        Resolution {
            value: Node::String(text),
            errors,
        }
    }
}

/// Text form of a resolved scalar. Null and structured values have none and
/// are reported as unsupported.
fn into_text(
    key: &str,
    value: &str,
    resolved: Node,
    errors: &mut Vec<ReplacementError>,
) -> Option<String> {
    match resolved {
        Node::String(s) => Some(s),
        Node::Scalar(Scalar::Number(n)) => Some(n.to_string()),
        Node::Scalar(Scalar::Bool(b)) => Some(b.to_string()),
        other => {
            errors.push(ReplacementError::UnsupportedValue {
                key: key.to_string(),
                placeholder: value.trim_matches(|c: char| c == '<' || c == '>').to_string(),
                found: other.type_name(),
            });
            None
        }
    }
}
