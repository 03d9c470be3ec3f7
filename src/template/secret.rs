//! `Secret` manifests: payload fields are stored as bytes.

use super::error::Result;
use super::node::Document;
use super::policy::{GenericReplacement, SecretReplacement, StringReplacement};
use super::resource::{Resource, Subtree};
use super::SecretMap;
use crate::kube;

const KIND: &str = "Secret";

const SUBTREES: &[Subtree] = &[
    ("metadata", &GenericReplacement),
    ("data", &SecretReplacement),
    ("stringData", &StringReplacement),
];

#[derive(Debug)]
pub struct SecretTemplate<'a> {
    resource: Resource<'a>,
}

impl<'a> SecretTemplate<'a> {
    pub fn new(document: Document, secrets: &'a SecretMap) -> Self {
        Self {
            resource: Resource::new(document, secrets),
        }
    }

    pub fn resource(&self) -> &Resource<'a> {
        &self.resource
    }

    pub fn replace(&mut self) -> Result<()> {
        self.resource.replace(KIND, SUBTREES)
    }

    pub fn export(self) -> Result<kube::Secret> {
        self.resource.export(KIND)
    }

    pub fn to_yaml(self) -> Result<String> {
        self.resource.to_yaml::<kube::Secret>(KIND)
    }
}
