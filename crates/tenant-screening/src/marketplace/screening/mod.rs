//! Simulated credit and background screening.
//!
//! A screening draws one credit score from the configured range, then derives
//! every other field from that value through the fixed tables in [`bands`].
//! Background and verification checks are simulated as clean, except
//! references which the simulated bureau never contacts.

pub mod bands;
pub mod bureau;

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::ApplicationId;
pub use bands::{CreditBand, Recommendation, RiskLevel};
pub use bureau::{CreditScoreSource, FixedScore, SimulatedBureau};

pub const DEFAULT_SCORE_FLOOR: u16 = 700;
pub const DEFAULT_SCORE_CEILING: u16 = 820;

/// Draw bounds for the simulated bureau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningPolicy {
    score_floor: u16,
    score_ceiling: u16,
}

impl ScreeningPolicy {
    /// Builds a policy, swapping the bounds if they arrive reversed.
    pub fn new(score_floor: u16, score_ceiling: u16) -> Self {
        if score_floor <= score_ceiling {
            Self {
                score_floor,
                score_ceiling,
            }
        } else {
            Self {
                score_floor: score_ceiling,
                score_ceiling: score_floor,
            }
        }
    }

    pub fn score_range(&self) -> RangeInclusive<u16> {
        self.score_floor..=self.score_ceiling
    }
}

impl Default for ScreeningPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_FLOOR, DEFAULT_SCORE_CEILING)
    }
}

/// Immutable screening result, one per application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub application_id: ApplicationId,
    pub credit_score: u16,
    pub credit_band: CreditBand,
    pub criminal_record_clear: bool,
    pub eviction_history_clear: bool,
    pub employment_verified: bool,
    pub income_verified: bool,
    pub references_verified: bool,
    pub recommendation: String,
    pub risk_level: RiskLevel,
    pub created_at: DateTime<Utc>,
}

impl ScreeningReport {
    /// Checks that band, risk and recommendation all agree with the credit score.
    pub fn is_consistent(&self) -> bool {
        self.credit_band == CreditBand::classify(self.credit_score)
            && self.risk_level == RiskLevel::assess(self.credit_score)
            && self.recommendation == Recommendation::for_score(self.credit_score).text()
    }
}

/// Turns a drawn score into a complete report.
#[derive(Debug, Clone, Default)]
pub struct ScreeningGenerator {
    policy: ScreeningPolicy,
}

impl ScreeningGenerator {
    pub fn new(policy: ScreeningPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScreeningPolicy {
        &self.policy
    }

    pub fn generate<S>(
        &self,
        application_id: ApplicationId,
        source: &mut S,
        created_at: DateTime<Utc>,
    ) -> ScreeningReport
    where
        S: CreditScoreSource + ?Sized,
    {
        let range = self.policy.score_range();
        let credit_score = source
            .draw(range.clone())
            .clamp(*range.start(), *range.end());

        ScreeningReport {
            application_id,
            credit_score,
            credit_band: CreditBand::classify(credit_score),
            criminal_record_clear: true,
            eviction_history_clear: true,
            employment_verified: true,
            income_verified: true,
            references_verified: false,
            recommendation: Recommendation::for_score(credit_score).text().to_string(),
            risk_level: RiskLevel::assess(credit_score),
            created_at,
        }
    }
}
