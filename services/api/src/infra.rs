use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tenant_screening::marketplace::{
    ApplicationId, ApplicationRecord, ApplicationStatus, MarketplaceRepository, PropertyId,
    PropertyListing, PropertyStatus, RentalApplication, RepositoryError, Role, ScreeningReport,
    ScreeningRepository, TenantVerification, UserAccount, UserId,
};

pub(crate) const DEMO_LANDLORD: &str = "landlord_tester";
pub(crate) const DEMO_TENANT: &str = "supertenant";
pub(crate) const DEMO_NEW_TENANT: &str = "new_renter";
pub(crate) const DEMO_PROPERTY: &str = "prop-101";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct MarketplaceTables {
    accounts: HashMap<UserId, UserAccount>,
    properties: BTreeMap<PropertyId, PropertyListing>,
    applications: BTreeMap<ApplicationId, RentalApplication>,
}

impl MarketplaceTables {
    fn resolve(&self, application: &RentalApplication) -> Option<ApplicationRecord> {
        Some(ApplicationRecord {
            application: application.clone(),
            tenant: self.accounts.get(&application.tenant_id)?.clone(),
            property: self.properties.get(&application.property_id)?.clone(),
        })
    }
}

/// Accounts, listings and applications held in process memory.
#[derive(Default, Clone)]
pub(crate) struct InMemoryMarketplace {
    tables: Arc<Mutex<MarketplaceTables>>,
}

impl InMemoryMarketplace {
    /// Marketplace seeded with the demo landlord, two tenants and two listings.
    pub(crate) fn demo() -> Self {
        let marketplace = Self::default();
        marketplace.add_account(UserAccount {
            id: UserId(DEMO_LANDLORD.to_string()),
            username: DEMO_LANDLORD.to_string(),
            display_name: "Landlord Tester".to_string(),
            role: Role::Landlord,
            verification: TenantVerification::default(),
        });
        marketplace.add_account(UserAccount {
            id: UserId(DEMO_TENANT.to_string()),
            username: DEMO_TENANT.to_string(),
            display_name: "Super Tenant".to_string(),
            role: Role::Tenant,
            verification: TenantVerification::fully_verified(),
        });
        marketplace.add_account(UserAccount {
            id: UserId(DEMO_NEW_TENANT.to_string()),
            username: DEMO_NEW_TENANT.to_string(),
            display_name: "New Renter".to_string(),
            role: Role::Tenant,
            verification: TenantVerification {
                identity_verified: true,
                ..TenantVerification::default()
            },
        });
        marketplace.add_property(PropertyListing {
            id: PropertyId(DEMO_PROPERTY.to_string()),
            landlord_id: UserId(DEMO_LANDLORD.to_string()),
            title: "Sunny two bedroom near campus".to_string(),
            city: "Ames".to_string(),
            monthly_rent: 1_450,
            status: PropertyStatus::Available,
        });
        marketplace.add_property(PropertyListing {
            id: PropertyId("prop-102".to_string()),
            landlord_id: UserId(DEMO_LANDLORD.to_string()),
            title: "Downtown studio".to_string(),
            city: "Des Moines".to_string(),
            monthly_rent: 980,
            status: PropertyStatus::Available,
        });
        marketplace
    }

    pub(crate) fn add_account(&self, account: UserAccount) {
        let mut guard = self.tables.lock().expect("marketplace mutex poisoned");
        guard.accounts.insert(account.id.clone(), account);
    }

    pub(crate) fn add_property(&self, property: PropertyListing) {
        let mut guard = self.tables.lock().expect("marketplace mutex poisoned");
        guard.properties.insert(property.id.clone(), property);
    }
}

impl MarketplaceRepository for InMemoryMarketplace {
    fn account(&self, id: &UserId) -> Result<Option<UserAccount>, RepositoryError> {
        let guard = self.tables.lock().expect("marketplace mutex poisoned");
        Ok(guard.accounts.get(id).cloned())
    }

    fn property(&self, id: &PropertyId) -> Result<Option<PropertyListing>, RepositoryError> {
        let guard = self.tables.lock().expect("marketplace mutex poisoned");
        Ok(guard.properties.get(id).cloned())
    }

    fn properties_for_landlord(
        &self,
        landlord: &UserId,
    ) -> Result<Vec<PropertyListing>, RepositoryError> {
        let guard = self.tables.lock().expect("marketplace mutex poisoned");
        Ok(guard
            .properties
            .values()
            .filter(|property| property.is_managed_by(landlord))
            .cloned()
            .collect())
    }

    fn application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.tables.lock().expect("marketplace mutex poisoned");
        Ok(guard
            .applications
            .get(id)
            .and_then(|application| guard.resolve(application)))
    }

    fn applications_for_landlord(
        &self,
        landlord: &UserId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.tables.lock().expect("marketplace mutex poisoned");
        Ok(guard
            .applications
            .values()
            .filter_map(|application| guard.resolve(application))
            .filter(|record| record.property.is_managed_by(landlord))
            .collect())
    }

    fn applications_for_tenant(
        &self,
        tenant: &UserId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.tables.lock().expect("marketplace mutex poisoned");
        Ok(guard
            .applications
            .values()
            .filter(|application| &application.tenant_id == tenant)
            .filter_map(|application| guard.resolve(application))
            .collect())
    }

    fn insert_application(
        &self,
        application: RentalApplication,
    ) -> Result<RentalApplication, RepositoryError> {
        let mut guard = self.tables.lock().expect("marketplace mutex poisoned");
        let duplicate = guard.applications.values().any(|existing| {
            existing.tenant_id == application.tenant_id
                && existing.property_id == application.property_id
        });
        if duplicate || guard.applications.contains_key(&application.id) {
            return Err(RepositoryError::Conflict);
        }
        guard
            .applications
            .insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
        reviewed_at: DateTime<Utc>,
    ) -> Result<RentalApplication, RepositoryError> {
        let mut guard = self.tables.lock().expect("marketplace mutex poisoned");
        let application = guard
            .applications
            .get_mut(id)
            .ok_or(RepositoryError::NotFound)?;
        application.status = status;
        application.reviewed_at = Some(reviewed_at);
        Ok(application.clone())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryScreenings {
    reports: Arc<Mutex<HashMap<ApplicationId, ScreeningReport>>>,
}

impl ScreeningRepository for InMemoryScreenings {
    fn insert(&self, report: ScreeningReport) -> Result<ScreeningReport, RepositoryError> {
        let mut guard = self.reports.lock().expect("screening mutex poisoned");
        if guard.contains_key(&report.application_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(report.application_id.clone(), report.clone());
        Ok(report)
    }

    fn fetch(&self, application: &ApplicationId) -> Result<Option<ScreeningReport>, RepositoryError> {
        let guard = self.reports.lock().expect("screening mutex poisoned");
        Ok(guard.get(application).cloned())
    }
}
