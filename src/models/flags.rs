//! Data-quality and outcome flags
//!
//! The engine never fails on malformed domain input. Instead it normalizes
//! the value and reports what it did through a [`PlannerFlag`], leaving the
//! presentation decision to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlannerFlag {
    /// A missing or non-numeric amount was coerced to zero
    InvalidAmount { record: String, field: String },

    /// An unrecognized frequency string was replaced with `monthly`
    UnsupportedFrequency { record: String, value: String },

    /// The payment never reduces principal, so no schedule exists
    NonAmortizing,

    /// The payment does not cover accruing interest, so the debt never ends
    InfinitePayoff,

    /// A simulation stopped at its safety bound; results are partial
    IterationCapReached { iterations: u32 },
}

impl PlannerFlag {
    pub fn invalid_amount(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self::InvalidAmount {
            record: record.into(),
            field: field.into(),
        }
    }

    pub fn unsupported_frequency(record: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnsupportedFrequency {
            record: record.into(),
            value: value.into(),
        }
    }

    /// Data-quality flags describe the input; the rest describe an outcome
    pub fn is_data_quality(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount { .. } | Self::UnsupportedFrequency { .. }
        )
    }
}

impl fmt::Display for PlannerFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAmount { record, field } => {
                write!(f, "{}: invalid {} treated as $0.00", record, field)
            }
            Self::UnsupportedFrequency { record, value } => {
                write!(f, "{}: unsupported frequency '{}', using monthly", record, value)
            }
            Self::NonAmortizing => write!(f, "payment does not reduce the principal"),
            Self::InfinitePayoff => write!(f, "payment too low to ever pay off the balance"),
            Self::IterationCapReached { iterations } => {
                write!(f, "stopped after {} periods; schedule is partial", iterations)
            }
        }
    }
}
