//! Placeholder substitution engine.
//!
//! Manifests reference secrets with `<name>` placeholders inside string
//! fields. A [`Template`] owns one decoded manifest and walks the sub-trees
//! its kind makes eligible:
//! 1. **Resolve**: every `<name>` token is looked up in the [`SecretMap`]
//! 2. **Shape**: the field's policy decides the written value (plain or bytes)
//! 3. **Report**: unresolved names are collected per sub-tree, never one by one
//!
//! Export decodes the result into the kind's typed shape and renders YAML.

pub mod config_map;
pub mod deployment;
pub mod error;
pub mod kinds;
pub mod node;
pub mod policy;
pub mod resolver;
pub mod resource;
pub mod secret;
pub mod walker;

use std::collections::HashMap;

pub use error::{ReplacementError, ReplacementErrors, StructuralError, TemplateError};
pub use kinds::{create_template, Template, TemplateKind};
pub use node::{Document, Mapping, Node, Scalar};
pub use policy::{GenericReplacement, ReplacementPolicy, SecretReplacement, StringReplacement};
pub use resolver::{resolve, Resolution};
pub use walker::walk;

/// Secret name to value, as read from the secret store.
pub type SecretMap = HashMap<String, serde_json::Value>;
