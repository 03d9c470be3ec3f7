//! Manifest rendering: read manifests, inject secrets, emit YAML.

mod io;

pub use io::{parse_manifests, read_manifests, Manifest, MAX_MANIFEST_FILE_BYTES};

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::template::{create_template, Document, SecretMap, TemplateError};
use crate::vault::SecretStore;

/// Inject `secrets` into one decoded manifest and render it as YAML.
pub fn render_manifest(value: serde_yaml::Value, secrets: &SecretMap) -> Result<String, TemplateError> {
    let document = Document::from_yaml(value)?;
    let mut template = create_template(document, secrets)?;
    template.replace()?;
    template.to_yaml()
}

/// Render every manifest, joined as a multi-document YAML stream.
///
/// Stops at the first manifest that fails; the error names its source.
pub fn render_all(manifests: Vec<Manifest>, secrets: &SecretMap) -> Result<String> {
    let mut rendered = Vec::with_capacity(manifests.len());
    for manifest in manifests {
        let yaml = render_manifest(manifest.value, secrets)
            .with_context(|| format!("Failed to render {}", manifest.source))?;
        rendered.push(yaml);
    }
    Ok(rendered.join("---\n"))
}

/// Fetch secrets once and render every manifest under `path`.
pub async fn generate(path: &Path, store: &mut dyn SecretStore, path_prefix: &str) -> Result<String> {
    let manifests = read_manifests(path)?;
    info!("Read {} manifest(s) from {}", manifests.len(), path.display());

    store
        .login()
        .await
        .with_context(|| format!("Failed to authenticate with {} store", store.name()))?;
    let secrets = store
        .get_secrets(path_prefix)
        .await
        .with_context(|| format!("Failed to fetch secrets from {path_prefix}"))?;
    info!("Fetched {} secret(s) from {path_prefix}", secrets.len());

    render_all(manifests, &secrets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn secrets() -> SecretMap {
        serde_json::from_value(json!({"app": "svc1", "pw": "s3cr3t"})).unwrap()
    }

    #[test]
    fn renders_stream_with_separators() {
        let manifests = parse_manifests(
            "app.yaml",
            "apiVersion: v1\nkind: Secret\nmetadata:\n  name: <app>\ndata:\n  password: <pw>\n---\napiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: <app>-config\n",
        )
        .unwrap();

        let output = render_all(manifests, &secrets()).unwrap();

        let docs = parse_manifests("out", &output).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].value["data"]["password"].as_str(), Some("czNjcjN0"));
        assert_eq!(docs[1].value["metadata"]["name"].as_str(), Some("svc1-config"));
    }

    #[test]
    fn unsupported_kind_names_source() {
        let manifests = parse_manifests("svc.yaml", "kind: Service\n").unwrap();
        let err = render_all(manifests, &secrets()).unwrap_err();
        assert!(err.to_string().contains("svc.yaml[0]"));
        assert!(matches!(
            err.downcast_ref::<TemplateError>(),
            Some(TemplateError::UnsupportedKind(kind)) if kind == "Service"
        ));
    }
}
