//! `ConfigMap` manifests.

use super::error::Result;
use super::node::Document;
use super::policy::{GenericReplacement, StringReplacement};
use super::resource::{Resource, Subtree};
use super::SecretMap;
use crate::kube;

const KIND: &str = "ConfigMap";

const SUBTREES: &[Subtree] = &[("metadata", &GenericReplacement), ("data", &StringReplacement)];

#[derive(Debug)]
pub struct ConfigMapTemplate<'a> {
    resource: Resource<'a>,
}

impl<'a> ConfigMapTemplate<'a> {
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

    pub fn export(self) -> Result<kube::ConfigMap> {
        self.resource.export(KIND)
    }

    pub fn to_yaml(self) -> Result<String> {
        self.resource.to_yaml::<kube::ConfigMap>(KIND)
    }
}
