//! Trust scoring for tenant profiles.
//!
//! The score is a weighted sum of the four verification flags and is never
//! persisted. Weights:
//!
//! | flag                   | weight |
//! |------------------------|--------|
//! | identity verified      | 35     |
//! | employment history     | 25     |
//! | rental history         | 20     |
//! | background check clear | 20     |
//!
//! Badge bands: `80..=100` gold, `55..=79` silver, `30..=54` bronze, below 30 unranked.

use serde::{Deserialize, Serialize};

use super::domain::TenantVerification;

pub const IDENTITY_WEIGHT: u8 = 35;
pub const EMPLOYMENT_WEIGHT: u8 = 25;
pub const RENTAL_HISTORY_WEIGHT: u8 = 20;
pub const BACKGROUND_WEIGHT: u8 = 20;

pub const GOLD_THRESHOLD: u8 = 80;
pub const SILVER_THRESHOLD: u8 = 55;
pub const BRONZE_THRESHOLD: u8 = 30;

/// Derived trust score in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustScore(u8);

impl TrustScore {
    pub const MIN: TrustScore = TrustScore(0);
    pub const MAX: TrustScore = TrustScore(100);

    /// Builds a score, saturating at [`TrustScore::MAX`].
    pub const fn new(value: u8) -> Self {
        if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustBadge {
    Unranked,
    Bronze,
    Silver,
    Gold,
}

impl TrustBadge {
    pub const fn ordered() -> [Self; 4] {
        [Self::Unranked, Self::Bronze, Self::Silver, Self::Gold]
    }

    pub const fn label(self) -> &'static str {
        match self {
            TrustBadge::Unranked => "unranked",
            TrustBadge::Bronze => "bronze",
            TrustBadge::Silver => "silver",
            TrustBadge::Gold => "gold",
        }
    }
}

pub fn compute_trust_score(flags: &TenantVerification) -> TrustScore {
    let weighted = [
        (flags.identity_verified, IDENTITY_WEIGHT),
        (flags.employment_history, EMPLOYMENT_WEIGHT),
        (flags.rental_history, RENTAL_HISTORY_WEIGHT),
        (flags.background_check_clear, BACKGROUND_WEIGHT),
    ];

    let total = weighted
        .into_iter()
        .filter(|(set, _)| *set)
        .map(|(_, weight)| weight)
        .fold(0u8, u8::saturating_add);

    TrustScore::new(total)
}

pub fn score_to_badge(score: TrustScore) -> TrustBadge {
    match score.value() {
        value if value >= GOLD_THRESHOLD => TrustBadge::Gold,
        value if value >= SILVER_THRESHOLD => TrustBadge::Silver,
        value if value >= BRONZE_THRESHOLD => TrustBadge::Bronze,
        _ => TrustBadge::Unranked,
    }
}

/// Score and badge pair shown on dashboards and application lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustSummary {
    pub score: TrustScore,
    pub badge: TrustBadge,
}

impl TrustSummary {
    pub fn for_flags(flags: &TenantVerification) -> Self {
        let score = compute_trust_score(flags);
        Self {
            score,
            badge: score_to_badge(score),
        }
    }
}

/// Count of applicants per badge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeDistribution {
    pub gold: usize,
    pub silver: usize,
    pub bronze: usize,
    pub unranked: usize,
}

impl BadgeDistribution {
    pub fn record(&mut self, badge: TrustBadge) {
        match badge {
            TrustBadge::Gold => self.gold += 1,
            TrustBadge::Silver => self.silver += 1,
            TrustBadge::Bronze => self.bronze += 1,
            TrustBadge::Unranked => self.unranked += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.gold + self.silver + self.bronze + self.unranked
    }
}

impl<'a> FromIterator<&'a TenantVerification> for BadgeDistribution {
    fn from_iter<I: IntoIterator<Item = &'a TenantVerification>>(iter: I) -> Self {
        let mut distribution = BadgeDistribution::default();
        for flags in iter {
            distribution.record(TrustSummary::for_flags(flags).badge);
        }
        distribution
    }
}
