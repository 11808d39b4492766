//! Error types for filter validation and the preset store.
//!
//! None of these are fatal to the host: every variant degrades to
//! "fewer results" or "no presets" at the call site.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("date interval start {start} is after end {end}")]
    InvalidDateInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("score interval min {min} is greater than max {max}")]
    InvalidScoreInterval { min: f64, max: f64 },

    #[error("score bounds must be finite numbers, got min {min} and max {max}")]
    NonFiniteScoreBound { min: f64, max: f64 },
}

#[derive(Error, Debug)]
pub enum PresetError {
    #[error("preset '{name}' not found")]
    NotFound { name: String },

    #[error("preset store is corrupt and was reset: {reason}")]
    StoreCorrupt { reason: String },

    #[error("preset name must not be blank")]
    InvalidName,

    #[error("preset backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl PresetError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn store_corrupt(reason: impl Into<String>) -> Self {
        Self::StoreCorrupt {
            reason: reason.into(),
        }
    }

    /// Errors the caller may shrug off and continue with empty filters.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::StoreCorrupt { .. })
    }
}

/// An enum value given as text that doesn't name any known variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {field} '{value}'")]
pub struct ParseValueError {
    pub field: &'static str,
    pub value: String,
}

impl ParseValueError {
    pub fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}
