//! Kind dispatch for document templates.

use tracing::debug;

use super::config_map::ConfigMapTemplate;
use super::deployment::DeploymentTemplate;
use super::error::{ReplacementErrors, Result, TemplateError};
use super::node::Document;
use super::secret::SecretTemplate;
use super::SecretMap;

/// Manifest kinds with a template implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Deployment,
    Secret,
    ConfigMap,
}

const KINDS: &[(&str, TemplateKind)] = &[
    ("Deployment", TemplateKind::Deployment),
    ("Secret", TemplateKind::Secret),
    ("ConfigMap", TemplateKind::ConfigMap),
];

impl TemplateKind {
    /// Look up a manifest's `kind` value. Matching is case-sensitive, as in
    /// the Kubernetes API.
    pub fn from_kind(kind: &str) -> Option<Self> {
        KINDS.iter().find(|(name, _)| *name == kind).map(|(_, k)| *k)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Deployment => "Deployment",
            TemplateKind::Secret => "Secret",
            TemplateKind::ConfigMap => "ConfigMap",
        }
    }

    /// All supported kind names.
    pub fn supported() -> impl Iterator<Item = &'static str> {
        KINDS.iter().map(|(name, _)| *name)
    }
}

/// A manifest paired with the secrets to inject into it.
#[derive(Debug)]
pub enum Template<'a> {
    Deployment(DeploymentTemplate<'a>),
    Secret(SecretTemplate<'a>),
    ConfigMap(ConfigMapTemplate<'a>),
}

impl<'a> Template<'a> {
    pub fn kind(&self) -> TemplateKind {
        match self {
            Template::Deployment(_) => TemplateKind::Deployment,
            Template::Secret(_) => TemplateKind::Secret,
            Template::ConfigMap(_) => TemplateKind::ConfigMap,
        }
    }

    /// Resolve placeholders in every sub-tree the kind makes eligible.
    pub fn replace(&mut self) -> Result<()> {
        match self {
            Template::Deployment(t) => t.replace(),
            Template::Secret(t) => t.replace(),
            Template::ConfigMap(t) => t.replace(),
        }
    }

    pub fn errors(&self) -> &ReplacementErrors {
        match self {
            Template::Deployment(t) => t.resource().errors(),
            Template::Secret(t) => t.resource().errors(),
            Template::ConfigMap(t) => t.resource().errors(),
        }
    }

    pub fn document(&self) -> &Document {
        match self {
            Template::Deployment(t) => t.resource().document(),
            Template::Secret(t) => t.resource().document(),
            Template::ConfigMap(t) => t.resource().document(),
        }
    }

    /// Serialize the replaced manifest. Only valid after [`Template::replace`]
    /// succeeded.
    pub fn to_yaml(self) -> Result<String> {
        match self {
            Template::Deployment(t) => t.to_yaml(),
            Template::Secret(t) => t.to_yaml(),
            Template::ConfigMap(t) => t.to_yaml(),
        }
    }
}

/// Build the template variant matching the document's `kind`.
pub fn create_template(document: Document, secrets: &SecretMap) -> Result<Template<'_>> {
    let kind = document
        .kind()
        .and_then(TemplateKind::from_kind)
        .ok_or_else(|| {
            TemplateError::UnsupportedKind(document.kind().unwrap_or("<none>").to_string())
        })?;

    debug!("Creating {} template", kind.as_str());

    Ok(match kind {
        TemplateKind::Deployment => Template::Deployment(DeploymentTemplate::new(document, secrets)),
        TemplateKind::Secret => Template::Secret(SecretTemplate::new(document, secrets)),
        TemplateKind::ConfigMap => Template::ConfigMap(ConfigMapTemplate::new(document, secrets)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn dispatches_on_kind() {
        let secrets = SecretMap::new();
        for (kind, expected) in KINDS {
            let doc = Document::from_json(json!({"kind": kind})).unwrap();
            assert_eq!(create_template(doc, &secrets).unwrap().kind(), *expected);
        }
    }

    #[test]
    fn unknown_kind_is_reported() {
        let secrets = SecretMap::new();
        let doc = Document::from_json(json!({"kind": "Service"})).unwrap();
        match create_template(doc, &secrets) {
            Err(TemplateError::UnsupportedKind(kind)) => assert_eq!(kind, "Service"),
            other => panic!("expected unsupported kind, got {other:?}"),
        }
    }

    #[test]
    fn missing_kind_is_reported() {
        let secrets = SecretMap::new();
        let doc = Document::from_json(json!({"metadata": {}})).unwrap();
        let err = create_template(doc, &secrets).unwrap_err();
        assert_eq!(err.to_string(), "unsupported kind: <none>");
    }

    #[test]
    fn kind_lookup_is_case_sensitive() {
        assert_eq!(TemplateKind::from_kind("secret"), None);
        assert_eq!(TemplateKind::supported().count(), 3);
    }

    #[test]
    fn secret_to_yaml_matches_example() {
        let secrets: SecretMap =
            serde_json::from_value(json!({"app": "svc1", "pw": "s3cr3t", "port": 8080})).unwrap();
        let doc = Document::from_json(json!({
            "apiVersion": "v1",
            "kind": "Secret",
            "metadata": {"name": "<app>"},
            "type": "Opaque",
            "data": {"password": "<pw>", "port": "<port>"}
        }))
        .unwrap();

        let mut template = create_template(doc, &secrets).unwrap();
        template.replace().unwrap();
        assert!(template.errors().is_empty());
        let yaml = template.to_yaml().unwrap();

        let parsed: serde_json::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(
            parsed,
            json!({
                "apiVersion": "v1",
                "kind": "Secret",
                "metadata": {"name": "svc1"},
                "type": "Opaque",
                "data": {"password": "czNjcjN0", "port": "ODA4MA=="}
            })
        );
    }

    #[test]
    fn failed_replace_keeps_errors() {
        let secrets = SecretMap::new();
        let doc = Document::from_json(json!({"kind": "ConfigMap", "data": {"a": "<x>", "b": "<y>"}}))
            .unwrap();
        let mut template = create_template(doc, &secrets).unwrap();

        let err = template.replace().unwrap_err();

        assert_eq!(template.errors().len(), 2);
        let message = err.to_string();
        assert!(message.starts_with("could not replace all placeholders in ConfigMap data (2 error(s))"));
        assert!(message.contains("placeholder <x>"));
        assert!(message.contains("placeholder <y>"));
    }
}
