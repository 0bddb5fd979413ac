use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Bidirectional mapping between class indices and label text.
pub trait LabelCodec: Send + Sync {
    fn decode(&self, index: usize) -> Result<&str>;

    fn encode(&self, label: &str) -> Option<usize>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Label encoder as written by the training producer: class `i` is
/// `classes[i]`, classes sorted lexicographically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Builds an encoder the way the producer fits one: unique labels, sorted.
    pub fn fit<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = labels.into_iter().map(Into::into).collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }
}

impl LabelCodec for LabelEncoder {
    fn decode(&self, index: usize) -> Result<&str> {
        self.classes.get(index).map(String::as_str).ok_or_else(|| {
            Error::decode(format!(
                "class index {} is outside the label set ({} classes)",
                index,
                self.classes.len()
            ))
        })
    }

    fn encode(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }

    fn len(&self) -> usize {
        self.classes.len()
    }
}
