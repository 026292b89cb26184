//! Manifest ingestion (§4.6): loading a [`Workflow`] from a serialized YAML
//! or JSON document, the way the reference workspace's `WorkspaceManifest`
//! loads a `txtx.yml` file — with a single descriptive error on malformed
//! input, and re-validation of whatever came off the wire.

use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::errors::ValidationError;
use crate::workflow::Workflow;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest at {path}: {source}")]
    Io { path: String, #[source] source: std::io::Error },

    #[error("failed to parse manifest as YAML: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("failed to parse manifest as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("manifest parsed but failed validation: {0}")]
    Invalid(#[from] ValidationError),
}

/// The two document shapes a manifest may be stored as. Content-sniffed by
/// file extension; callers reading from an arbitrary stream pick explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Json,
}

impl ManifestFormat {
    fn from_extension(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml") | Some("yaml") => ManifestFormat::Yaml,
            _ => ManifestFormat::Json,
        }
    }
}

/// Parses a [`Workflow`] out of `reader` in the given format, then
/// re-validates it — a manifest loaded from disk is never treated as
/// pre-validated (SPEC_FULL.md §4.6).
pub fn from_reader(mut reader: impl Read, format: ManifestFormat) -> Result<Workflow, ManifestError> {
    let mut contents = String::new();
    reader
        .read_to_string(&mut contents)
        .map_err(|source| ManifestError::Io { path: "<reader>".to_string(), source })?;

    let workflow: Workflow = match format {
        ManifestFormat::Yaml => serde_yml::from_str(&contents)?,
        ManifestFormat::Json => serde_json::from_str(&contents)?,
    };
    workflow.validate()?;
    Ok(workflow)
}

/// Loads a manifest from `path`, choosing YAML or JSON by file extension
/// (defaulting to JSON for anything else).
pub fn from_path(path: impl AsRef<Path>) -> Result<Workflow, ManifestError> {
    let path = path.as_ref();
    let format = ManifestFormat::from_extension(path);
    let file = std::fs::File::open(path)
        .map_err(|source| ManifestError::Io { path: path.display().to_string(), source })?;
    from_reader(file, format)
}
