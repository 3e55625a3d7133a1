//! Complexity scoring and track routing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::{EcaError, Result};

/// Totals at or above this route a change through the full track.
pub const FULL_TRACK_THRESHOLD: u8 = 7;

/// Allowed value for each criterion.
pub const SCORE_RANGE: RangeInclusive<u8> = 1..=3;

/// Routing path for a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackType {
    /// Requires Change Review Board sign-off.
    Full,
    Fast,
}

impl TrackType {
    pub fn from_total(total: u8) -> Self {
        if total >= FULL_TRACK_THRESHOLD {
            Self::Full
        } else {
            Self::Fast
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Fast => "fast",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Full => "Full Track",
            Self::Fast => "Fast Track",
        }
    }
}

impl fmt::Display for TrackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "fast" => Ok(Self::Fast),
            _ => Err(format!("unknown track type: {}", s)),
        }
    }
}

/// The three complexity criteria, each scored 1 (low) to 3 (high).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawScores")]
pub struct ComplexityScores {
    impact: u8,
    risk: u8,
    cost: u8,
}

#[derive(Deserialize)]
struct RawScores {
    impact: u8,
    risk: u8,
    cost: u8,
}

impl TryFrom<RawScores> for ComplexityScores {
    type Error = EcaError;

    fn try_from(raw: RawScores) -> Result<Self> {
        Self::new(raw.impact, raw.risk, raw.cost)
    }
}

impl ComplexityScores {
    /// Criterion names, in prompt and export order.
    pub const CRITERIA: [&'static str; 3] = ["impact", "risk", "cost"];

    /// Build a score set, rejecting any value outside [`SCORE_RANGE`].
    pub fn new(impact: u8, risk: u8, cost: u8) -> Result<Self> {
        for (criterion, value) in Self::CRITERIA.into_iter().zip([impact, risk, cost]) {
            if !SCORE_RANGE.contains(&value) {
                return Err(EcaError::InvalidScore {
                    criterion: criterion.to_string(),
                    value,
                });
            }
        }
        Ok(Self { impact, risk, cost })
    }

    pub fn impact(&self) -> u8 {
        self.impact
    }

    pub fn risk(&self) -> u8 {
        self.risk
    }

    pub fn cost(&self) -> u8 {
        self.cost
    }

    pub fn total(&self) -> u8 {
        self.impact + self.risk + self.cost
    }

    pub fn track_type(&self) -> TrackType {
        TrackType::from_total(self.total())
    }
}

/// Label for a single score value.
pub fn score_label(value: u8) -> &'static str {
    match value {
        1 => "Low",
        2 => "Medium",
        3 => "High",
        _ => "Invalid",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_and_track_for_every_combination() {
        for impact in SCORE_RANGE {
            for risk in SCORE_RANGE {
                for cost in SCORE_RANGE {
                    let scores = ComplexityScores::new(impact, risk, cost).unwrap();
                    let sum = impact + risk + cost;
                    assert_eq!(scores.total(), sum);
                    let expected = if sum >= 7 {
                        TrackType::Full
                    } else {
                        TrackType::Fast
                    };
                    assert_eq!(scores.track_type(), expected);
                }
            }
        }
    }

    #[test]
    fn threshold_boundary() {
        assert_eq!(TrackType::from_total(6), TrackType::Fast);
        assert_eq!(TrackType::from_total(7), TrackType::Full);
    }

    #[test]
    fn rejects_out_of_range_scores() {
        let err = ComplexityScores::new(1, 0, 2).unwrap_err();
        assert!(matches!(
            err,
            EcaError::InvalidScore { ref criterion, value: 0 } if criterion == "risk"
        ));
        assert!(ComplexityScores::new(4, 1, 1).is_err());
        assert!(ComplexityScores::new(1, 1, 9).is_err());
    }

    #[test]
    fn deserialization_validates_range() {
        let ok: ComplexityScores = serde_yaml::from_str("impact: 3\nrisk: 2\ncost: 1\n").unwrap();
        assert_eq!(ok.total(), 6);

        let err = serde_yaml::from_str::<ComplexityScores>("impact: 5\nrisk: 2\ncost: 1\n");
        assert!(err.is_err());
    }

    #[test]
    fn serializes_plain_fields() {
        let scores = ComplexityScores::new(2, 3, 1).unwrap();
        let json = serde_json::to_value(scores).unwrap();
        assert_eq!(json["impact"], 2);
        assert_eq!(json["risk"], 3);
        assert_eq!(json["cost"], 1);
    }

    #[test]
    fn labels() {
        assert_eq!(score_label(1), "Low");
        assert_eq!(score_label(3), "High");
        assert_eq!(TrackType::Full.label(), "Full Track");
        assert_eq!("FAST".parse::<TrackType>(), Ok(TrackType::Fast));
    }
}
