//! Reading manifests from files, directories and stdin.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Maximum size for a single manifest file (10 MB).
pub const MAX_MANIFEST_FILE_BYTES: u64 = 10 * 1024 * 1024;

const MANIFEST_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// One YAML document and where it came from.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// `file[index]` of the document within its stream.
    pub source: String,
    pub value: serde_yaml::Value,
}

/// Read every manifest under `path`.
///
/// `-` reads stdin. A directory contributes all `.yaml`, `.yml` and `.json`
/// files directly inside it, in name order.
pub fn read_manifests(path: &Path) -> Result<Vec<Manifest>> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read manifests from stdin")?;
        return parse_manifests("stdin", &content);
    }

    let mut manifests = Vec::new();
    for file in manifest_files(path)? {
        let metadata = std::fs::metadata(&file)
            .with_context(|| format!("Cannot stat manifest '{}'", file.display()))?;
        if metadata.len() > MAX_MANIFEST_FILE_BYTES {
            bail!(
                "Manifest '{}' is {} bytes, exceeds limit of {} bytes",
                file.display(),
                metadata.len(),
                MAX_MANIFEST_FILE_BYTES,
            );
        }
        let content = std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read manifest '{}'", file.display()))?;
        manifests.extend(parse_manifests(&file.display().to_string(), &content)?);
    }
    Ok(manifests)
}

fn manifest_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(path)
        .with_context(|| format!("Cannot read directory '{}'", path.display()))?
    {
        let file = entry?.path();
        let is_manifest = file
            .extension()
            .and_then(|e| e.to_str())
            .map_or(false, |ext| MANIFEST_EXTENSIONS.contains(&ext));
        if file.is_file() && is_manifest {
            files.push(file);
        }
    }
    files.sort();
    debug!("Found {} manifest file(s) in {}", files.len(), path.display());
    Ok(files)
}

/// Split a (possibly multi-document) YAML stream. Empty documents are skipped.
pub fn parse_manifests(source: &str, content: &str) -> Result<Vec<Manifest>> {
    let mut manifests = Vec::new();
    for (idx, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
        let value = serde_yaml::Value::deserialize(document)
            .with_context(|| format!("Invalid YAML in {source} (document {idx})"))?;
        if value.is_null() {
            continue;
        }
        manifests.push(Manifest {
            source: format!("{source}[{idx}]"),
            value,
        });
    }
    Ok(manifests)
}
