//! Feature derivation shared by training and serving.
//!
//! The artifact producer computes exactly the same feature from each
//! historical record. Any change here must be mirrored there, otherwise the
//! classifier silently receives values it was never trained on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Names of the features produced by [`extract`], in column order.
pub const FEATURE_NAMES: &[&str] = &["length"];

/// Parcel tracking identifier as accepted at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingNumber {
    Text(String),
    /// Decimal digits of a JSON integer of any magnitude, with an optional
    /// leading `-`. Negative zero is stored as `0`.
    Integer(String),
}

impl TrackingNumber {
    /// Accepts the literal text of a JSON number if it is an integer.
    ///
    /// Fractions and exponents are rejected, so `12.0` and `1e3` yield `None`.
    pub fn from_integer_literal(literal: &str) -> Option<Self> {
        let digits = literal.strip_prefix('-').unwrap_or(literal);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if digits.bytes().all(|b| b == b'0') {
            return Some(Self::Integer("0".to_string()));
        }
        Some(Self::Integer(literal.to_string()))
    }

    /// Canonical string form, used both for feature derivation and for the
    /// echo in the response. The integer/string distinction is not kept.
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TrackingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(digits) => f.write_str(digits),
        }
    }
}

impl From<&str> for TrackingNumber {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for TrackingNumber {
    fn from(value: i64) -> Self {
        Self::Integer(value.to_string())
    }
}

/// Ordered numeric features for a single row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }
}

/// Derives the feature vector for a tracking number: the character count of
/// its canonical string form.
pub fn extract(tracking_number: &TrackingNumber) -> FeatureVector {
    let length = tracking_number.canonical().chars().count();
    FeatureVector(vec![length as f64])
}
