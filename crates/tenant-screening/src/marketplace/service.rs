use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    ApplicationForm, ApplicationId, ApplicationRecord, ApplicationStatus, PropertyId,
    PropertyListing, RentalApplication, ReviewDecision, UserId,
};
use super::repository::{MarketplaceRepository, RepositoryError, ScreeningRepository};
use super::screening::{CreditScoreSource, ScreeningGenerator, ScreeningPolicy, ScreeningReport};
use super::trust::{BadgeDistribution, TrustSummary};
use super::views::{ApplicationDetail, ApplicationSummary, LandlordDashboard, TenantDashboard};

/// Service composing the marketplace records, screening storage and report generator.
pub struct TenantScreeningService<M, S> {
    marketplace: Arc<M>,
    screenings: Arc<S>,
    generator: ScreeningGenerator,
    sequence: AtomicU64,
}

impl<M, S> TenantScreeningService<M, S>
where
    M: MarketplaceRepository + 'static,
    S: ScreeningRepository + 'static,
{
    pub fn new(marketplace: Arc<M>, screenings: Arc<S>, policy: ScreeningPolicy) -> Self {
        Self {
            marketplace,
            screenings,
            generator: ScreeningGenerator::new(policy),
            sequence: AtomicU64::new(1),
        }
    }

    pub fn policy(&self) -> &ScreeningPolicy {
        self.generator.policy()
    }

    fn next_application_id(&self) -> ApplicationId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        ApplicationId(format!("app-{id:06}"))
    }

    fn load_application(&self, id: &ApplicationId) -> Result<ApplicationRecord, MarketplaceError> {
        self.marketplace
            .application(id)?
            .ok_or_else(|| MarketplaceError::ApplicationNotFound(id.clone()))
    }

    fn ensure_landlord(
        &self,
        requester: &UserId,
        property: &PropertyListing,
        action: &'static str,
    ) -> Result<(), MarketplaceError> {
        let permitted = self
            .marketplace
            .account(requester)?
            .is_some_and(|account| account.is_landlord_of(property));

        if permitted {
            Ok(())
        } else {
            warn!(user = %requester, property = %property.id, action, "rejected non-landlord request");
            Err(MarketplaceError::Authorization {
                user: requester.clone(),
                action,
            })
        }
    }

    /// Submit a tenant application for a listing.
    pub fn submit_application(
        &self,
        tenant_id: &UserId,
        property_id: &PropertyId,
        form: ApplicationForm,
    ) -> Result<RentalApplication, MarketplaceError> {
        form.validate()
            .map_err(|(field, reason)| MarketplaceError::InvalidForm { field, reason })?;

        let tenant = self
            .marketplace
            .account(tenant_id)?
            .ok_or_else(|| MarketplaceError::AccountNotFound(tenant_id.clone()))?;
        if !tenant.role.can_apply() {
            return Err(MarketplaceError::Authorization {
                user: tenant_id.clone(),
                action: "submit rental applications",
            });
        }

        let property = self
            .marketplace
            .property(property_id)?
            .ok_or_else(|| MarketplaceError::PropertyNotFound(property_id.clone()))?;

        let application = RentalApplication {
            id: self.next_application_id(),
            property_id: property.id,
            tenant_id: tenant.id,
            form,
            status: ApplicationStatus::Pending,
            submitted_at: Utc::now(),
            reviewed_at: None,
        };

        let stored = self
            .marketplace
            .insert_application(application)
            .map_err(|err| match err {
                RepositoryError::Conflict => MarketplaceError::DuplicateApplication {
                    tenant: tenant_id.clone(),
                    property: property_id.clone(),
                },
                other => other.into(),
            })?;

        info!(application = %stored.id, tenant = %tenant_id, property = %property_id, "application submitted");
        Ok(stored)
    }

    /// Move an application to under review, approved or rejected.
    pub fn review_application(
        &self,
        application_id: &ApplicationId,
        requester: &UserId,
        decision: ReviewDecision,
    ) -> Result<RentalApplication, MarketplaceError> {
        let record = self.load_application(application_id)?;
        self.ensure_landlord(requester, &record.property, "review this application")?;

        let status = ApplicationStatus::from(decision);
        let updated = self
            .marketplace
            .update_status(application_id, status, Utc::now())
            .map_err(|err| match err {
                RepositoryError::NotFound => {
                    MarketplaceError::ApplicationNotFound(application_id.clone())
                }
                other => other.into(),
            })?;

        info!(application = %application_id, status = status.label(), "application reviewed");
        Ok(updated)
    }

    /// Generate the one screening report an application may have.
    ///
    /// The repository insert is the authority on uniqueness; the lookup before it only
    /// avoids drawing a score for an application that was already screened.
    pub fn generate_screening<C>(
        &self,
        application_id: &ApplicationId,
        requester: &UserId,
        source: &mut C,
    ) -> Result<ScreeningReport, MarketplaceError>
    where
        C: CreditScoreSource + ?Sized,
    {
        let record = self.load_application(application_id)?;
        self.ensure_landlord(requester, &record.property, "commission a screening report")?;

        if self.screenings.fetch(application_id)?.is_some() {
            warn!(application = %application_id, "screening already exists");
            return Err(MarketplaceError::ScreeningExists(application_id.clone()));
        }

        let report = self
            .generator
            .generate(application_id.clone(), source, Utc::now());

        let stored = self.screenings.insert(report).map_err(|err| match err {
            RepositoryError::Conflict => {
                warn!(application = %application_id, "lost race creating screening report");
                MarketplaceError::ScreeningExists(application_id.clone())
            }
            other => other.into(),
        })?;

        info!(
            application = %application_id,
            band = ?stored.credit_band,
            risk = stored.risk_level.label(),
            "screening report created"
        );
        Ok(stored)
    }

    /// Read back a screening report. Landlord only.
    pub fn screening_report(
        &self,
        application_id: &ApplicationId,
        requester: &UserId,
    ) -> Result<ScreeningReport, MarketplaceError> {
        let record = self.load_application(application_id)?;
        self.ensure_landlord(requester, &record.property, "view this screening report")?;

        self.screenings
            .fetch(application_id)?
            .ok_or_else(|| MarketplaceError::ReportNotFound(application_id.clone()))
    }

    /// Application with trust summary and screening, for the applicant or the landlord.
    pub fn application_detail(
        &self,
        application_id: &ApplicationId,
        requester: &UserId,
    ) -> Result<ApplicationDetail, MarketplaceError> {
        let record = self.load_application(application_id)?;
        if !record.is_visible_to(requester) {
            return Err(MarketplaceError::Authorization {
                user: requester.clone(),
                action: "view this application",
            });
        }

        let screening = self.screenings.fetch(application_id)?;
        Ok(ApplicationDetail {
            tenant_trust: TrustSummary::for_flags(&record.tenant.verification),
            application: record.application,
            screening,
        })
    }

    pub fn trust_summary(&self, user: &UserId) -> Result<TrustSummary, MarketplaceError> {
        let account = self
            .marketplace
            .account(user)?
            .ok_or_else(|| MarketplaceError::AccountNotFound(user.clone()))?;
        Ok(TrustSummary::for_flags(&account.verification))
    }

    pub fn tenant_dashboard(&self, user: &UserId) -> Result<TenantDashboard, MarketplaceError> {
        let account = self
            .marketplace
            .account(user)?
            .ok_or_else(|| MarketplaceError::AccountNotFound(user.clone()))?;
        if !account.role.can_apply() {
            return Err(MarketplaceError::Authorization {
                user: user.clone(),
                action: "view the tenant dashboard",
            });
        }

        let applications = self
            .marketplace
            .applications_for_tenant(user)?
            .iter()
            .map(ApplicationSummary::from)
            .collect();

        Ok(TenantDashboard {
            tenant_id: account.id,
            trust: TrustSummary::for_flags(&account.verification),
            applications,
        })
    }

    pub fn landlord_dashboard(&self, user: &UserId) -> Result<LandlordDashboard, MarketplaceError> {
        let account = self
            .marketplace
            .account(user)?
            .ok_or_else(|| MarketplaceError::AccountNotFound(user.clone()))?;
        if !account.role.can_review() {
            return Err(MarketplaceError::Authorization {
                user: user.clone(),
                action: "view the landlord dashboard",
            });
        }

        let total_properties = self.marketplace.properties_for_landlord(user)?.len();
        let records = self.marketplace.applications_for_landlord(user)?;
        let pending_applications = records
            .iter()
            .filter(|record| record.application.status == ApplicationStatus::Pending)
            .count();
        let badge_distribution: BadgeDistribution = records
            .iter()
            .map(|record| &record.tenant.verification)
            .collect();

        Ok(LandlordDashboard {
            landlord_id: account.id,
            total_properties,
            pending_applications,
            badge_distribution,
            applications: records.iter().map(ApplicationSummary::from).collect(),
        })
    }
}

/// Coarse category of a [`MarketplaceError`], used to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Authorization,
    Conflict,
    Invalid,
    NotFound,
    Unavailable,
}

/// Error raised by the screening service.
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    #[error("user {user} is not permitted to {action}")]
    Authorization { user: UserId, action: &'static str },
    #[error("invalid application form: {field} {reason}")]
    InvalidForm {
        field: &'static str,
        reason: &'static str,
    },
    #[error("screening report already exists for application {0}")]
    ScreeningExists(ApplicationId),
    #[error("tenant {tenant} has already applied to property {property}")]
    DuplicateApplication { tenant: UserId, property: PropertyId },
    #[error("application {0} not found")]
    ApplicationNotFound(ApplicationId),
    #[error("property {0} not found")]
    PropertyNotFound(PropertyId),
    #[error("account {0} not found")]
    AccountNotFound(UserId),
    #[error("no screening report for application {0}")]
    ReportNotFound(ApplicationId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl MarketplaceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MarketplaceError::Authorization { .. } => ErrorKind::Authorization,
            MarketplaceError::InvalidForm { .. } => ErrorKind::Invalid,
            MarketplaceError::ScreeningExists(_)
            | MarketplaceError::DuplicateApplication { .. }
            | MarketplaceError::Repository(RepositoryError::Conflict) => ErrorKind::Conflict,
            MarketplaceError::ApplicationNotFound(_)
            | MarketplaceError::PropertyNotFound(_)
            | MarketplaceError::AccountNotFound(_)
            | MarketplaceError::ReportNotFound(_)
            | MarketplaceError::Repository(RepositoryError::NotFound) => ErrorKind::NotFound,
            MarketplaceError::Repository(RepositoryError::Unavailable(_)) => ErrorKind::Unavailable,
        }
    }
}
