use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::marketplace::domain::{
    ApplicationForm, ApplicationId, ApplicationRecord, ApplicationStatus, PropertyId,
    PropertyListing, PropertyStatus, RentalApplication, Role, TenantVerification, UserAccount,
    UserId,
};
use crate::marketplace::repository::{
    MarketplaceRepository, RepositoryError, ScreeningRepository,
};
use crate::marketplace::screening::{ScreeningPolicy, ScreeningReport, SimulatedBureau};
use crate::marketplace::{marketplace_router, TenantScreeningService};

pub(super) fn landlord_id() -> UserId {
    UserId("landlord-1".to_string())
}

pub(super) fn other_landlord_id() -> UserId {
    UserId("landlord-2".to_string())
}

pub(super) fn tenant_id() -> UserId {
    UserId("tenant-1".to_string())
}

pub(super) fn second_tenant_id() -> UserId {
    UserId("tenant-2".to_string())
}

pub(super) fn property_id() -> PropertyId {
    PropertyId("prop-1".to_string())
}

pub(super) fn account(id: UserId, role: Role, verification: TenantVerification) -> UserAccount {
    UserAccount {
        username: id.0.clone(),
        display_name: format!("{} ({})", id.0, role.label()),
        id,
        role,
        verification,
    }
}

pub(super) fn listing() -> PropertyListing {
    PropertyListing {
        id: property_id(),
        landlord_id: landlord_id(),
        title: "Riverfront Loft".to_string(),
        city: "Des Moines".to_string(),
        monthly_rent: 1_450,
        status: PropertyStatus::Available,
    }
}

pub(super) fn form() -> ApplicationForm {
    ApplicationForm {
        current_address: "12 Court Ave, Des Moines, IA".to_string(),
        move_in_date: NaiveDate::from_ymd_opt(2025, 11, 1).expect("valid date"),
        employer_name: "Principal".to_string(),
        job_title: "Analyst".to_string(),
        annual_income: 72_000,
        number_of_occupants: 2,
        has_pets: false,
        pet_details: String::new(),
        additional_notes: String::new(),
    }
}

/// Two landlords, two tenants (one partially verified, one unverified), one listing.
pub(super) fn seeded_marketplace() -> MemoryMarketplace {
    let marketplace = MemoryMarketplace::default();
    marketplace.add_account(account(
        landlord_id(),
        Role::Landlord,
        TenantVerification::default(),
    ));
    marketplace.add_account(account(
        other_landlord_id(),
        Role::Landlord,
        TenantVerification::default(),
    ));
    marketplace.add_account(account(
        tenant_id(),
        Role::Tenant,
        TenantVerification {
            identity_verified: true,
            employment_history: false,
            rental_history: true,
            background_check_clear: false,
        },
    ));
    marketplace.add_account(account(
        second_tenant_id(),
        Role::Tenant,
        TenantVerification::default(),
    ));
    marketplace.add_property(listing());
    marketplace
}

pub(super) type MemoryService = TenantScreeningService<MemoryMarketplace, MemoryScreenings>;

pub(super) fn build_service() -> (
    MemoryService,
    Arc<MemoryMarketplace>,
    Arc<MemoryScreenings>,
) {
    let marketplace = Arc::new(seeded_marketplace());
    let screenings = Arc::new(MemoryScreenings::default());
    let service = TenantScreeningService::new(
        marketplace.clone(),
        screenings.clone(),
        ScreeningPolicy::default(),
    );
    (service, marketplace, screenings)
}

/// Service with one pending application from `tenant_id()` on `property_id()`.
pub(super) fn service_with_application() -> (
    MemoryService,
    Arc<MemoryMarketplace>,
    Arc<MemoryScreenings>,
    ApplicationId,
) {
    let (service, marketplace, screenings) = build_service();
    let application = service
        .submit_application(&tenant_id(), &property_id(), form())
        .expect("application submits");
    (service, marketplace, screenings, application.id)
}

#[derive(Default)]
pub(super) struct MemoryMarketplace {
    accounts: Mutex<HashMap<UserId, UserAccount>>,
    properties: Mutex<HashMap<PropertyId, PropertyListing>>,
    applications: Mutex<BTreeMap<ApplicationId, RentalApplication>>,
}

impl MemoryMarketplace {
    pub(super) fn add_account(&self, account: UserAccount) {
        self.accounts
            .lock()
            .expect("account mutex poisoned")
            .insert(account.id.clone(), account);
    }

    pub(super) fn add_property(&self, property: PropertyListing) {
        self.properties
            .lock()
            .expect("property mutex poisoned")
            .insert(property.id.clone(), property);
    }

    pub(super) fn stored_application(&self, id: &ApplicationId) -> Option<RentalApplication> {
        self.applications
            .lock()
            .expect("application mutex poisoned")
            .get(id)
            .cloned()
    }

    fn resolve(&self, application: &RentalApplication) -> Option<ApplicationRecord> {
        let tenant = self
            .accounts
            .lock()
            .expect("account mutex poisoned")
            .get(&application.tenant_id)
            .cloned()?;
        let property = self
            .properties
            .lock()
            .expect("property mutex poisoned")
            .get(&application.property_id)
            .cloned()?;
        Some(ApplicationRecord {
            application: application.clone(),
            tenant,
            property,
        })
    }

    fn resolved_where<F>(&self, predicate: F) -> Vec<ApplicationRecord>
    where
        F: Fn(&ApplicationRecord) -> bool,
    {
        let applications: Vec<RentalApplication> = self
            .applications
            .lock()
            .expect("application mutex poisoned")
            .values()
            .cloned()
            .collect();
        applications
            .iter()
            .filter_map(|application| self.resolve(application))
            .filter(|record| predicate(record))
            .collect()
    }
}

impl MarketplaceRepository for MemoryMarketplace {
    fn account(&self, id: &UserId) -> Result<Option<UserAccount>, RepositoryError> {
        Ok(self
            .accounts
            .lock()
            .expect("account mutex poisoned")
            .get(id)
            .cloned())
    }

    fn property(&self, id: &PropertyId) -> Result<Option<PropertyListing>, RepositoryError> {
        Ok(self
            .properties
            .lock()
            .expect("property mutex poisoned")
            .get(id)
            .cloned())
    }

    fn properties_for_landlord(
        &self,
        landlord: &UserId,
    ) -> Result<Vec<PropertyListing>, RepositoryError> {
        Ok(self
            .properties
            .lock()
            .expect("property mutex poisoned")
            .values()
            .filter(|property| property.is_managed_by(landlord))
            .cloned()
            .collect())
    }

    fn application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let application = self.stored_application(id);
        Ok(application.and_then(|application| self.resolve(&application)))
    }

    fn applications_for_landlord(
        &self,
        landlord: &UserId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(self.resolved_where(|record| record.property.is_managed_by(landlord)))
    }

    fn applications_for_tenant(
        &self,
        tenant: &UserId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(self.resolved_where(|record| &record.tenant.id == tenant))
    }

    fn insert_application(
        &self,
        application: RentalApplication,
    ) -> Result<RentalApplication, RepositoryError> {
        let mut guard = self.applications.lock().expect("application mutex poisoned");
        let duplicate = guard.values().any(|existing| {
            existing.tenant_id == application.tenant_id
                && existing.property_id == application.property_id
        });
        if duplicate || guard.contains_key(&application.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
        reviewed_at: DateTime<Utc>,
    ) -> Result<RentalApplication, RepositoryError> {
        let mut guard = self.applications.lock().expect("application mutex poisoned");
        let application = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        application.status = status;
        application.reviewed_at = Some(reviewed_at);
        Ok(application.clone())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryScreenings {
    pub(super) reports: Arc<Mutex<HashMap<ApplicationId, ScreeningReport>>>,
}

impl MemoryScreenings {
    pub(super) fn count(&self) -> usize {
        self.reports.lock().expect("screening mutex poisoned").len()
    }
}

impl ScreeningRepository for MemoryScreenings {
    fn insert(&self, report: ScreeningReport) -> Result<ScreeningReport, RepositoryError> {
        let mut guard = self.reports.lock().expect("screening mutex poisoned");
        if guard.contains_key(&report.application_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(report.application_id.clone(), report.clone());
        Ok(report)
    }

    fn fetch(
        &self,
        application: &ApplicationId,
    ) -> Result<Option<ScreeningReport>, RepositoryError> {
        let guard = self.reports.lock().expect("screening mutex poisoned");
        Ok(guard.get(application).cloned())
    }
}

/// Reports nothing on lookup but rejects every insert, as if another request won the race.
pub(super) struct RacingScreenings;

impl ScreeningRepository for RacingScreenings {
    fn insert(&self, _report: ScreeningReport) -> Result<ScreeningReport, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(
        &self,
        _application: &ApplicationId,
    ) -> Result<Option<ScreeningReport>, RepositoryError> {
        Ok(None)
    }
}

pub(super) struct UnavailableScreenings;

impl ScreeningRepository for UnavailableScreenings {
    fn insert(&self, _report: ScreeningReport) -> Result<ScreeningReport, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(
        &self,
        _application: &ApplicationId,
    ) -> Result<Option<ScreeningReport>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn router_with_service(service: MemoryService, seed: u64) -> axum::Router {
    marketplace_router(Arc::new(service), SimulatedBureau::seeded(seed))
}

pub(super) fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
