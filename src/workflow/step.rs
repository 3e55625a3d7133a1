//! Wizard step identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EcaError;

/// A wizard step.
///
/// Declaration order is the canonical order: every computed step list is a
/// subsequence of [`StepId::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepId {
    Search,
    Scope,
    Track,
    Qsr,
    ProductAffected,
    ProductEca,
    Em,
    Sd,
    Crb,
    Deliverables,
    Review,
}

impl StepId {
    pub const ALL: [StepId; 11] = [
        Self::Search,
        Self::Scope,
        Self::Track,
        Self::Qsr,
        Self::ProductAffected,
        Self::ProductEca,
        Self::Em,
        Self::Sd,
        Self::Crb,
        Self::Deliverables,
        Self::Review,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Scope => "scope",
            Self::Track => "track",
            Self::Qsr => "qsr",
            Self::ProductAffected => "product-affected",
            Self::ProductEca => "product-eca",
            Self::Em => "em",
            Self::Sd => "sd",
            Self::Crb => "crb",
            Self::Deliverables => "deliverables",
            Self::Review => "review",
        }
    }

    /// Heading shown above the step.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Search => "ECR Search & Classification",
            Self::Scope => "Scope of Change",
            Self::Track => "Full vs Fast Track",
            Self::Qsr => "QSR Assessment",
            Self::ProductAffected => "Affected Items",
            Self::ProductEca => "Product ECA",
            Self::Em => "Manufacturing ECA (EM)",
            Self::Sd => "Manufacturing ECA (SD)",
            Self::Crb => "CRB / CIB",
            Self::Deliverables => "Minimum Deliverables",
            Self::Review => "Review & Export",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepId {
    type Err = EcaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|step| step.as_str() == s)
            .ok_or_else(|| EcaError::UnknownStep { id: s.to_string() })
    }
}
