use serde::Serialize;

use super::domain::{ApplicationId, ApplicationRecord, PropertyId, RentalApplication, UserId};
use super::screening::ScreeningReport;
use super::trust::{BadgeDistribution, TrustSummary};

/// Row shown in application lists on either dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationSummary {
    pub application_id: ApplicationId,
    pub property_id: PropertyId,
    pub property_title: String,
    pub tenant_id: UserId,
    pub tenant_name: String,
    pub status: &'static str,
    pub trust: TrustSummary,
}

impl From<&ApplicationRecord> for ApplicationSummary {
    fn from(record: &ApplicationRecord) -> Self {
        Self {
            application_id: record.application.id.clone(),
            property_id: record.property.id.clone(),
            property_title: record.property.title.clone(),
            tenant_id: record.tenant.id.clone(),
            tenant_name: record.tenant.display_name.clone(),
            status: record.application.status.label(),
            trust: TrustSummary::for_flags(&record.tenant.verification),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationDetail {
    pub application: RentalApplication,
    pub tenant_trust: TrustSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screening: Option<ScreeningReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TenantDashboard {
    pub tenant_id: UserId,
    pub trust: TrustSummary,
    pub applications: Vec<ApplicationSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandlordDashboard {
    pub landlord_id: UserId,
    pub total_properties: usize,
    pub pending_applications: usize,
    pub badge_distribution: BadgeDistribution,
    pub applications: Vec<ApplicationSummary>,
}
