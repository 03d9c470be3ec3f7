//! Inject Vault secrets into Kubernetes manifests.
//!
//! Manifests reference secrets with `<name>` placeholders. The [`template`]
//! engine resolves them against a mapping fetched once from a [`vault`] store
//! and renders the result through the typed [`kube`] shapes.

pub mod cli;
pub mod config;
pub mod kube;
pub mod logging;
pub mod manifest;
pub mod template;
pub mod vault;
