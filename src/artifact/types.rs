use crate::inference::{DecisionTree, LabelEncoder};
use serde::{Deserialize, Deserializer, Serialize};

/// Newest artifact layout this build can read.
pub const SUPPORTED_FORMAT_VERSION: u32 = 1;

pub const UNKNOWN_MODEL_VERSION: &str = "unknown";

/// Bundle produced by training: classifier, label encoder and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    #[serde(rename = "model")]
    pub classifier: DecisionTree,
    pub encoder: LabelEncoder,
    // Older artifacts carry no metadata block, or an explicit null.
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ArtifactMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    #[serde(default)]
    pub training_date: Option<String>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default)]
    pub test_accuracy: Option<f64>,
}

impl ArtifactMetadata {
    /// Version string reported by the health endpoint.
    pub fn model_version(&self) -> String {
        self.training_date
            .clone()
            .unwrap_or_else(|| UNKNOWN_MODEL_VERSION.to_string())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_format_version() -> u32 {
    SUPPORTED_FORMAT_VERSION
}
