//! Tenant trust scoring, simulated screening, and the application workflow around them.

pub mod domain;
pub mod estimator;
pub mod repository;
pub mod router;
pub mod screening;
pub mod service;
pub mod trust;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationForm, ApplicationId, ApplicationRecord, ApplicationStatus, PropertyId,
    PropertyListing, PropertyStatus, RentalApplication, ReviewDecision, Role, TenantVerification,
    UserAccount, UserId,
};
pub use estimator::{estimate_rent, RentEstimate, RentEstimateRequest};
pub use repository::{MarketplaceRepository, RepositoryError, ScreeningRepository};
pub use router::marketplace_router;
pub use screening::{
    CreditBand, CreditScoreSource, FixedScore, Recommendation, RiskLevel, ScreeningGenerator,
    ScreeningPolicy, ScreeningReport, SimulatedBureau,
};
pub use service::{ErrorKind, MarketplaceError, TenantScreeningService};
pub use trust::{
    compute_trust_score, score_to_badge, BadgeDistribution, TrustBadge, TrustScore, TrustSummary,
};
pub use views::{ApplicationDetail, ApplicationSummary, LandlordDashboard, TenantDashboard};
