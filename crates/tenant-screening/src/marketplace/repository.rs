use super::domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, PropertyId, PropertyListing,
    RentalApplication, UserAccount, UserId,
};
use super::screening::ScreeningReport;
use chrono::{DateTime, Utc};

/// Read access to accounts, listings and applications, plus the two application writes
/// the workflow needs.
pub trait MarketplaceRepository: Send + Sync {
    fn account(&self, id: &UserId) -> Result<Option<UserAccount>, RepositoryError>;
    fn property(&self, id: &PropertyId) -> Result<Option<PropertyListing>, RepositoryError>;
    fn properties_for_landlord(
        &self,
        landlord: &UserId,
    ) -> Result<Vec<PropertyListing>, RepositoryError>;

    /// Resolves the application together with its tenant and property.
    fn application(&self, id: &ApplicationId)
        -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn applications_for_landlord(
        &self,
        landlord: &UserId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    fn applications_for_tenant(
        &self,
        tenant: &UserId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError>;

    /// Must return [`RepositoryError::Conflict`] when the (tenant, property) pair already applied.
    fn insert_application(
        &self,
        application: RentalApplication,
    ) -> Result<RentalApplication, RepositoryError>;
    fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
        reviewed_at: DateTime<Utc>,
    ) -> Result<RentalApplication, RepositoryError>;
}

/// Screening report storage with a uniqueness constraint on the application reference.
pub trait ScreeningRepository: Send + Sync {
    /// Must be atomic with respect to the uniqueness check and return
    /// [`RepositoryError::Conflict`] when a report already exists for the application.
    fn insert(&self, report: ScreeningReport) -> Result<ScreeningReport, RepositoryError>;
    fn fetch(&self, application: &ApplicationId)
        -> Result<Option<ScreeningReport>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
