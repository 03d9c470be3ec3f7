//! End-to-end rendering: manifests on disk, secrets from a store, YAML out.

use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vault_inject::manifest::{generate, parse_manifests};
use vault_inject::template::{ReplacementError, SecretMap, TemplateError};
use vault_inject::vault::{KvVersion, StaticSecretStore, TokenStore, VaultClient};

const SECRET_MANIFEST: &str = r#"
apiVersion: v1
kind: Secret
metadata:
  name: <app>
  annotations:
    managed-by: vault-inject
type: Opaque
data:
  password: <pw>
  port: <port>
"#;

const DEPLOYMENT_MANIFEST: &str = r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: <app>
spec:
  replicas: <replicas>
  selector:
    matchLabels:
      app: <app>
  template:
    metadata:
      labels:
        app: <app>
    spec:
      containers:
        - name: <app>
          image: "registry.example.com/<app>:<tag>"
          ports:
            - containerPort: 8080
"#;

fn store() -> StaticSecretStore {
    let secrets: SecretMap = serde_json::from_value(json!({
        "app": "svc1",
        "pw": "s3cr3t",
        "port": 8080,
        "replicas": 2,
        "tag": "v1.4.0"
    }))
    .unwrap();
    StaticSecretStore::new(secrets)
}

fn rendered_docs(output: &str) -> Vec<serde_json::Value> {
    parse_manifests("output", output)
        .unwrap()
        .into_iter()
        .map(|m| serde_json::to_value(m.value).unwrap())
        .collect()
}

#[tokio::test]
async fn renders_directory_of_manifests() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("01-secret.yaml"), SECRET_MANIFEST).unwrap();
    fs::write(dir.path().join("02-deployment.yaml"), DEPLOYMENT_MANIFEST).unwrap();

    let mut store = store();
    let output = generate(dir.path(), &mut store, "secret/app").await.unwrap();
    let docs = rendered_docs(&output);

    assert_eq!(docs.len(), 2);
    assert_eq!(
        docs[0],
        json!({
            "apiVersion": "v1",
            "kind": "Secret",
            "metadata": {"name": "svc1", "annotations": {"managed-by": "vault-inject"}},
            "type": "Opaque",
            "data": {"password": "czNjcjN0", "port": "ODA4MA=="}
        })
    );
    assert_eq!(docs[1]["metadata"]["name"], "svc1");
    assert_eq!(docs[1]["spec"]["replicas"], 2);
    assert_eq!(
        docs[1]["spec"]["template"]["spec"]["containers"][0]["image"],
        "registry.example.com/svc1:v1.4.0"
    );
    assert_eq!(
        docs[1]["spec"]["template"]["spec"]["containers"][0]["ports"][0]["containerPort"],
        8080
    );
    assert!(!output.contains('<'));
}

#[tokio::test]
async fn reports_every_missing_placeholder() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("secret.yaml");
    fs::write(
        &file,
        "apiVersion: v1\nkind: Secret\ndata:\n  password: <missing>\n  token: <also-missing>\n  user: <app>\n",
    )
    .unwrap();

    let mut store = store();
    let err = generate(&file, &mut store, "secret/app").await.unwrap_err();

    match err.downcast_ref::<TemplateError>() {
        Some(TemplateError::Replacement { kind, subtree, errors }) => {
            assert_eq!(*kind, "Secret");
            assert_eq!(*subtree, "data");
            let mut missing: Vec<_> = errors
                .iter()
                .map(|e| match e {
                    ReplacementError::MissingPlaceholder { key, placeholder, .. } => {
                        (key.as_str(), placeholder.as_str())
                    }
                    other => panic!("unexpected error {other}"),
                })
                .collect();
            missing.sort();
            assert_eq!(missing, vec![("password", "missing"), ("token", "also-missing")]);
        }
        _ => panic!("expected replacement failure, got {err:#}"),
    }
}

#[tokio::test]
async fn renders_with_secrets_from_vault() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/secret/app"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"app": "from-vault", "pw": "vault-pw", "port": 5432}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("secret.yaml");
    fs::write(&file, SECRET_MANIFEST).unwrap();

    let client = VaultClient::new(&server.uri(), None, KvVersion::V1, Duration::from_secs(5)).unwrap();
    let mut store = TokenStore::new(client, "s.token".into());
    let output = generate(&file, &mut store, "secret/app").await.unwrap();
    let docs = rendered_docs(&output);

    assert_eq!(docs[0]["metadata"]["name"], "from-vault");
    // base64("vault-pw"), base64("5432")
    assert_eq!(docs[0]["data"]["password"], "dmF1bHQtcHc=");
    assert_eq!(docs[0]["data"]["port"], "NTQzMg==");
}
