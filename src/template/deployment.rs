//! `Deployment` manifests.

use super::error::Result;
use super::node::Document;
use super::policy::GenericReplacement;
use super::resource::{Resource, Subtree};
use super::SecretMap;
use crate::kube;

const KIND: &str = "Deployment";

const SUBTREES: &[Subtree] = &[("metadata", &GenericReplacement), ("spec", &GenericReplacement)];

#[derive(Debug)]
pub struct DeploymentTemplate<'a> {
    resource: Resource<'a>,
}

impl<'a> DeploymentTemplate<'a> {
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

    pub fn export(self) -> Result<kube::Deployment> {
        self.resource.export(KIND)
    }

    pub fn to_yaml(self) -> Result<String> {
        self.resource.to_yaml::<kube::Deployment>(KIND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::error::TemplateError;
    use serde_json::json;

    fn manifest(replicas: &str) -> Document {
        Document::from_json(json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {"name": "<app>", "labels": {"app": "<app>"}},
            "spec": {
                "replicas": replicas,
                "selector": {"matchLabels": {"app": "<app>"}},
                "template": {
                    "metadata": {"labels": {"app": "<app>"}},
                    "spec": {
                        "containers": [{
                            "name": "<app>",
                            "image": "nginx:<tag>",
                            "env": [{"name": "API_KEY", "value": "<api-key>"}]
                        }]
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn whole_field_replicas_stays_an_integer() {
        let secrets: SecretMap = serde_json::from_value(json!({
            "app": "web",
            "tag": "1.25",
            "api-key": "k-123",
            "replicas": 3
        }))
        .unwrap();
        let mut template = DeploymentTemplate::new(manifest("<replicas>"), &secrets);

        template.replace().unwrap();
        let deployment = template.export().unwrap();

        assert_eq!(deployment.metadata.name.as_deref(), Some("web"));
        assert_eq!(deployment.spec.replicas, Some(3));
        assert_eq!(deployment.spec.selector.match_labels["app"], "web");
        let pod = deployment.spec.template.spec.unwrap();
        assert_eq!(pod["containers"][0]["image"], "nginx:1.25");
        assert_eq!(pod["containers"][0]["env"][0]["value"], "k-123");
    }

    #[test]
    fn string_replicas_fails_export() {
        let secrets: SecretMap = serde_json::from_value(json!({
            "app": "web",
            "tag": "1.25",
            "api-key": "k-123",
            "replicas": "3"
        }))
        .unwrap();
        let mut template = DeploymentTemplate::new(manifest("<replicas>"), &secrets);

        template.replace().unwrap();

        match template.to_yaml() {
            Err(TemplateError::Export { kind, reason }) => {
                assert_eq!(kind, "Deployment");
                assert!(reason.contains("invalid type"), "{reason}");
            }
            other => panic!("expected export failure, got {other:?}"),
        }
    }

    #[test]
    fn spec_errors_are_reported_together() {
        let secrets: SecretMap = serde_json::from_value(json!({"app": "web"})).unwrap();
        let mut template = DeploymentTemplate::new(manifest("<replicas>"), &secrets);

        let err = template.replace().unwrap_err();

        match err {
            TemplateError::Replacement { subtree, errors, .. } => {
                assert_eq!(subtree, "spec");
                let mut names: Vec<_> = errors.iter().map(|e| e.placeholder().to_string()).collect();
                names.sort();
                assert_eq!(names, vec!["api-key", "replicas", "tag"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
