use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) of the excellent credit band.
pub const EXCELLENT_FLOOR: u16 = 750;
/// Lower bound (inclusive) of the good credit band.
pub const GOOD_FLOOR: u16 = 700;
/// Lower bound (inclusive) of the fair credit band.
pub const FAIR_FLOOR: u16 = 650;

/// Scores strictly above this carry low risk.
pub const LOW_RISK_ABOVE: u16 = 700;
/// Scores at or above this (and not low) carry medium risk; below is high.
pub const MEDIUM_RISK_FLOOR: u16 = 600;

/// Scores strictly above this are recommended for acceptance.
pub const ACCEPT_ABOVE: u16 = 650;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditBand {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl CreditBand {
    pub fn classify(score: u16) -> Self {
        if score >= EXCELLENT_FLOOR {
            CreditBand::Excellent
        } else if score >= GOOD_FLOOR {
            CreditBand::Good
        } else if score >= FAIR_FLOOR {
            CreditBand::Fair
        } else {
            CreditBand::Poor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CreditBand::Excellent => "Excellent (750+)",
            CreditBand::Good => "Good (700-749)",
            CreditBand::Fair => "Fair (650-699)",
            CreditBand::Poor => "Poor (Below 650)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn assess(score: u16) -> Self {
        if score > LOW_RISK_ABOVE {
            RiskLevel::Low
        } else if score >= MEDIUM_RISK_FLOOR {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Reported as its `text()` in [`ScreeningReport`](super::ScreeningReport).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Accept,
    Conditional,
}

impl Recommendation {
    pub fn for_score(score: u16) -> Self {
        if score > ACCEPT_ABOVE {
            Recommendation::Accept
        } else {
            Recommendation::Conditional
        }
    }

    pub const fn text(self) -> &'static str {
        match self {
            Recommendation::Accept => "Accept",
            Recommendation::Conditional => "Conditional",
        }
    }
}
