//! Binary sentiment labels and per-class probabilities

use serde::{Deserialize, Serialize};
use textops_common::impl_str_conversions;

use crate::errors::TextOpsError;

/// Sentiment class. Serialized as its integer code (`0` or `1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Label {
    /// Code `0`
    Negative = 0,
    /// Code `1`; precision and recall are computed for this class
    Positive = 1,
}

impl_str_conversions!(Label {
    Negative => "negative",
    Positive => "positive",
});

impl Label {
    /// Both classes, ordered by their integer code.
    pub const ALL: [Label; 2] = [Label::Negative, Label::Positive];

    /// Column index of this class in a probability row
    pub const fn index(self) -> usize {
        self as usize
    }

    /// `Positive` for `true`
    pub const fn from_positive(positive: bool) -> Self {
        if positive {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    /// `-1.0` for negative, `+1.0` for positive (margin-based learners)
    pub const fn sign(self) -> f64 {
        match self {
            Self::Negative => -1.0,
            Self::Positive => 1.0,
        }
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> Self {
        label as u8
    }
}

impl TryFrom<u8> for Label {
    type Error = TextOpsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Negative),
            1 => Ok(Self::Positive),
            other => Err(TextOpsError::invalid_input(format!(
                "label must be 0 or 1, got {other}"
            ))),
        }
    }
}

impl TryFrom<i64> for Label {
    type Error = TextOpsError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| TextOpsError::invalid_input(format!("label must be 0 or 1, got {value}")))
            .and_then(Label::try_from)
    }
}

/// Probability of each class for one input. Column 0 is negative, column 1
/// positive; the two always sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 2]", from = "[f64; 2]")]
pub struct ClassProbabilities {
    negative: f64,
    positive: f64,
}

impl ClassProbabilities {
    /// Build from the positive-class probability, clamped to `[0, 1]`.
    pub fn from_positive(positive: f64) -> Self {
        let positive = if positive.is_nan() { 0.5 } else { positive.clamp(0.0, 1.0) };
        Self { negative: 1.0 - positive, positive }
    }

    /// `p0`
    pub fn negative(&self) -> f64 {
        self.negative
    }

    /// `p1`
    pub fn positive(&self) -> f64 {
        self.positive
    }

    /// Probability of `label`
    pub fn get(&self, label: Label) -> f64 {
        match label {
            Label::Negative => self.negative,
            Label::Positive => self.positive,
        }
    }

    /// `[p0, p1]`
    pub fn as_array(&self) -> [f64; 2] {
        [self.negative, self.positive]
    }

    /// Class with the higher probability; ties go to positive.
    pub fn most_likely(&self) -> Label {
        Label::from_positive(self.positive >= self.negative)
    }

    /// Probability of [`Self::most_likely`]
    pub fn confidence(&self) -> f64 {
        self.positive.max(self.negative)
    }
}

impl From<ClassProbabilities> for [f64; 2] {
    fn from(p: ClassProbabilities) -> Self {
        p.as_array()
    }
}

impl From<[f64; 2]> for ClassProbabilities {
    fn from(row: [f64; 2]) -> Self {
        Self::from_positive(row[1])
    }
}
