//! Design advice.
//!
//! [`analyze`] runs a fixed, ordered table of independent rules over a
//! design and its simulation result. Every rule is evaluated on every call
//! and all matches are returned in table order: application rules first,
//! then format rules, then physical cross-checks.

mod rules;

use std::fmt;

use serde::Serialize;

use crate::acoustics::SimulationResult;
use crate::design::DesignParams;

pub use rules::{Rule, RULES};

/// Severity of a piece of advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for AdviceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single recommendation shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub level: AdviceLevel,
    pub message: String,
}

impl Advice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: AdviceLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: AdviceLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: AdviceLevel::Error,
            message: message.into(),
        }
    }
}

/// Evaluate every rule and collect the advice they produce.
pub fn analyze(params: &DesignParams, result: &SimulationResult) -> Vec<Advice> {
    RULES.iter().filter_map(|rule| rule(params, result)).collect()
}
