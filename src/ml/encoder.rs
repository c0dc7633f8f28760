use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Bidirectional mapping between label indices and human-readable label
/// strings for one label dimension.
///
/// The mapping is bijective over the trained label set and read-only after
/// loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    /// Label dimension tag ("classification" or "category")
    pub dimension: String,

    /// Index -> label, in trained order
    labels: Vec<String>,

    /// Label -> index
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl LabelEncoder {
    pub fn new(dimension: impl Into<String>, labels: Vec<String>) -> Result<Self> {
        let index: HashMap<String, usize> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();

        if index.len() != labels.len() {
            return Err(AppError::Validation(format!(
                "Label encoder contains duplicate labels ({} unique of {})",
                index.len(),
                labels.len()
            )));
        }

        Ok(Self {
            dimension: dimension.into(),
            labels,
            index,
        })
    }

    /// Rebuild the reverse index after deserialization (it is not persisted).
    pub fn rebuild_index(&mut self) {
        self.index = self
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();
    }

    /// Decode a label index to its human-readable string. An index outside
    /// the trained domain is an explicit error, never a panic.
    pub fn decode(&self, index: usize) -> Result<&str> {
        self.labels.get(index).map(String::as_str).ok_or_else(|| {
            AppError::Pipeline(format!(
                "Label index {} outside {} encoder domain of {} labels",
                index,
                self.dimension,
                self.labels.len()
            ))
        })
    }

    /// Encode a label string back to its index.
    pub fn encode(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
