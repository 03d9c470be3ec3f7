//! State shared by every document template.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::error::{ReplacementErrors, Result, TemplateError};
use super::node::{Document, Node};
use super::policy::ReplacementPolicy;
use super::walker::walk;
use super::SecretMap;

/// A named sub-tree of a manifest and the policy used to rewrite it.
pub type Subtree = (&'static str, &'static dyn ReplacementPolicy);

/// Document, secret mapping and error accumulator for one manifest.
#[derive(Debug)]
pub struct Resource<'a> {
    document: Document,
    secrets: &'a SecretMap,
    errors: ReplacementErrors,
    replaced: bool,
}

impl<'a> Resource<'a> {
    pub fn new(document: Document, secrets: &'a SecretMap) -> Self {
        Self {
            document,
            secrets,
            errors: ReplacementErrors::new(),
            replaced: false,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Errors accumulated by the last failed replace.
    pub fn errors(&self) -> &ReplacementErrors {
        &self.errors
    }

    /// Walk each sub-tree in order, failing on the first one that reports
    /// errors. Sub-trees after a failing one are left untouched.
    pub fn replace(&mut self, kind: &'static str, subtrees: &[Subtree]) -> Result<()> {
        self.errors = ReplacementErrors::new();
        for &(name, policy) in subtrees {
            self.replace_subtree(kind, name, policy)?;
        }
        self.replaced = true;
        Ok(())
    }

    fn replace_subtree(
        &mut self,
        kind: &'static str,
        subtree: &'static str,
        policy: &dyn ReplacementPolicy,
    ) -> Result<()> {
        let mapping = match self.document.get_mut(subtree) {
            Some(Node::Mapping(mapping)) => mapping,
            Some(other) => {
                debug!("{kind} {subtree} is a {}, skipping", other.type_name());
                return Ok(());
            }
            None => return Ok(()),
        };

        let visited = walk(mapping, policy, self.secrets, &mut self.errors);
        debug!(
            "Walked {kind} {subtree} with {} policy: {visited} string field(s)",
            policy.name()
        );

        if !self.errors.is_empty() {
            warn!(
                "{} unresolved placeholder(s) in {kind} {subtree}",
                self.errors.len()
            );
            return Err(TemplateError::Replacement {
                kind,
                subtree,
                errors: self.errors.clone(),
            });
        }
        Ok(())
    }

    /// Decode the replaced tree into the kind's typed shape.
    pub fn export<T: DeserializeOwned>(self, kind: &'static str) -> Result<T> {
        if !self.replaced {
            return Err(TemplateError::NotReplaced(kind));
        }
        serde_json::from_value(self.document.to_json()).map_err(|e| TemplateError::Export {
            kind,
            reason: e.to_string(),
        })
    }

    pub fn to_yaml<T: DeserializeOwned + Serialize>(self, kind: &'static str) -> Result<String> {
        let typed: T = self.export(kind)?;
        serde_yaml::to_string(&typed).map_err(|e| TemplateError::Export {
            kind,
            reason: format!("could not export {kind} into YAML: {e}"),
        })
    }
}
