use super::{ModelArtifact, SUPPORTED_FORMAT_VERSION};
use crate::{Error, Result, features::FEATURE_NAMES};
use std::path::Path;
use tracing::{debug, info, warn};

/// Reads and checks the model artifact at `path`. One shot, no retries.
pub async fn load(path: impl AsRef<Path>) -> Result<ModelArtifact> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    debug!("Reading model artifact from: {}", shown);

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::artifact_not_found(shown));
        }
        Err(e) => return Err(Error::Io(e)),
    };

    let artifact = parse(&bytes).map_err(|reason| Error::artifact_corrupt(&shown, reason))?;

    // Not fatal: requests that reach such a leaf fail with a decode error.
    let unmapped = unmapped_class_indices(&artifact);
    if !unmapped.is_empty() {
        warn!(
            "Classifier can emit class indices {:?} that the encoder ({} classes) cannot decode",
            unmapped,
            artifact.encoder.classes.len()
        );
    }

    info!(
        "Model artifact loaded: {} classes, model type {}, trained {}",
        artifact.encoder.classes.len(),
        artifact.metadata.model_type.as_deref().unwrap_or("unknown"),
        artifact.metadata.model_version()
    );

    Ok(artifact)
}

/// Deserializes and structurally checks an artifact, returning the reason on
/// failure.
pub fn parse(bytes: &[u8]) -> std::result::Result<ModelArtifact, String> {
    let artifact: ModelArtifact =
        serde_json::from_slice(bytes).map_err(|e| format!("cannot deserialize: {}", e))?;
    check(&artifact)?;
    Ok(artifact)
}

/// Class indices the classifier can emit but the encoder has no label for.
pub fn unmapped_class_indices(artifact: &ModelArtifact) -> Vec<usize> {
    let n_classes = artifact.encoder.classes.len();
    artifact
        .classifier
        .class_indices()
        .into_iter()
        .filter(|index| *index >= n_classes)
        .collect()
}

fn check(artifact: &ModelArtifact) -> std::result::Result<(), String> {
    if artifact.format_version == 0 || artifact.format_version > SUPPORTED_FORMAT_VERSION {
        return Err(format!(
            "unsupported format version {} (supported: {})",
            artifact.format_version, SUPPORTED_FORMAT_VERSION
        ));
    }

    artifact.classifier.validate()?;

    if artifact.encoder.classes.is_empty() {
        return Err("label encoder has no classes".to_string());
    }

    if artifact.classifier.n_features != FEATURE_NAMES.len() {
        return Err(format!(
            "classifier expects {} features, serving derives {}",
            artifact.classifier.n_features,
            FEATURE_NAMES.len()
        ));
    }

    if let Some(features) = &artifact.metadata.features {
        if features.iter().map(String::as_str).ne(FEATURE_NAMES.iter().copied()) {
            return Err(format!(
                "artifact was trained on features {:?}, serving derives {:?}",
                features, FEATURE_NAMES
            ));
        }
    }

    Ok(())
}
