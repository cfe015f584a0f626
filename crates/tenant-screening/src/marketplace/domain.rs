use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for marketplace accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier wrapper for property listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyId(pub String);

/// Identifier wrapper for submitted rental applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

macro_rules! display_id {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )*
    };
}

display_id!(UserId, PropertyId, ApplicationId);

/// Role captured on the identity record at registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Landlord,
    #[default]
    Tenant,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Landlord => "landlord",
            Role::Tenant => "tenant",
        }
    }

    pub const fn can_list_properties(self) -> bool {
        matches!(self, Role::Landlord)
    }

    pub const fn can_apply(self) -> bool {
        matches!(self, Role::Tenant)
    }

    pub const fn can_review(self) -> bool {
        matches!(self, Role::Landlord)
    }
}

/// Verification flags set by external identity, employment and background processes.
///
/// Every flag starts unset; nothing inside this crate flips them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantVerification {
    #[serde(default)]
    pub identity_verified: bool,
    #[serde(default)]
    pub employment_history: bool,
    #[serde(default)]
    pub rental_history: bool,
    #[serde(default)]
    pub background_check_clear: bool,
}

impl TenantVerification {
    pub const fn fully_verified() -> Self {
        Self {
            identity_verified: true,
            employment_history: true,
            rental_history: true,
            background_check_clear: true,
        }
    }

    pub fn verified_count(&self) -> usize {
        [
            self.identity_verified,
            self.employment_history,
            self.rental_history,
            self.background_check_clear,
        ]
        .into_iter()
        .filter(|flag| *flag)
        .count()
    }
}

/// Identity record for landlords and tenants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    pub role: Role,
    #[serde(default)]
    pub verification: TenantVerification,
}

impl UserAccount {
    pub fn is_landlord_of(&self, property: &PropertyListing) -> bool {
        self.role.can_list_properties() && property.is_managed_by(&self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    Available,
    Pending,
    Rented,
}

/// Listing metadata needed by the screening and application flows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyListing {
    pub id: PropertyId,
    pub landlord_id: UserId,
    pub title: String,
    pub city: String,
    pub monthly_rent: u32,
    pub status: PropertyStatus,
}

impl PropertyListing {
    pub fn is_managed_by(&self, user: &UserId) -> bool {
        &self.landlord_id == user
    }
}

/// Applicant supplied details collected with each application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationForm {
    pub current_address: String,
    pub move_in_date: NaiveDate,
    pub employer_name: String,
    pub job_title: String,
    pub annual_income: u32,
    pub number_of_occupants: u8,
    #[serde(default)]
    pub has_pets: bool,
    #[serde(default)]
    pub pet_details: String,
    #[serde(default)]
    pub additional_notes: String,
}

impl ApplicationForm {
    /// Checks the constraints serde cannot express. Returns the offending field and reason.
    pub fn validate(&self) -> Result<(), (&'static str, &'static str)> {
        if self.number_of_occupants == 0 {
            return Err(("number_of_occupants", "must be at least 1"));
        }
        Ok(())
    }
}

/// Lifecycle status of a rental application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    UnderReview,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::UnderReview => "under_review",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

/// Statuses a landlord may move an application into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    UnderReview,
    Approved,
    Rejected,
}

impl From<ReviewDecision> for ApplicationStatus {
    fn from(decision: ReviewDecision) -> Self {
        match decision {
            ReviewDecision::UnderReview => ApplicationStatus::UnderReview,
            ReviewDecision::Approved => ApplicationStatus::Approved,
            ReviewDecision::Rejected => ApplicationStatus::Rejected,
        }
    }
}

/// Tenant application for a single property. Unique per (tenant, property).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalApplication {
    pub id: ApplicationId,
    pub property_id: PropertyId,
    pub tenant_id: UserId,
    pub form: ApplicationForm,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Application with its tenant and property references resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub application: RentalApplication,
    pub tenant: UserAccount,
    pub property: PropertyListing,
}

impl ApplicationRecord {
    pub fn is_visible_to(&self, user: &UserId) -> bool {
        &self.tenant.id == user || self.property.is_managed_by(user)
    }
}
