use crate::infra::{
    InMemoryMarketplace, InMemoryScreenings, DEMO_LANDLORD, DEMO_NEW_TENANT, DEMO_PROPERTY,
    DEMO_TENANT,
};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::sync::Arc;
use tenant_screening::error::AppError;
use tenant_screening::marketplace::{
    estimate_rent, ApplicationForm, PropertyId, RentEstimate, RentEstimateRequest, ReviewDecision,
    ScreeningPolicy, SimulatedBureau, TenantScreeningService, TenantVerification, TrustBadge,
    TrustSummary, UserId,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Seed the simulated credit bureau so repeated runs print the same reports
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Stop after screening and skip the approval step
    #[arg(long)]
    pub(crate) skip_review: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct TrustArgs {
    /// Government ID has been verified
    #[arg(long)]
    pub(crate) identity: bool,
    /// Employment history has been verified
    #[arg(long)]
    pub(crate) employment: bool,
    /// Rental history has been verified
    #[arg(long)]
    pub(crate) rental_history: bool,
    /// Background check came back clear
    #[arg(long)]
    pub(crate) background: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RentEstimateArgs {
    /// ZIP code of the listing
    #[arg(long, default_value = "")]
    pub(crate) zip: String,
    #[arg(long, default_value_t = 1)]
    pub(crate) bedrooms: u8,
    #[arg(long, default_value_t = 1.0)]
    pub(crate) bathrooms: f32,
    #[arg(long)]
    pub(crate) parking: bool,
    #[arg(long)]
    pub(crate) pool: bool,
    #[arg(long)]
    pub(crate) gym: bool,
}

pub(crate) fn run_trust(args: TrustArgs) {
    let flags = TenantVerification {
        identity_verified: args.identity,
        employment_history: args.employment,
        rental_history: args.rental_history,
        background_check_clear: args.background,
    };
    let summary = TrustSummary::for_flags(&flags);
    println!("{}", render_trust(&summary));
    println!("Verified checks: {}/4", flags.verified_count());
}

fn render_trust(summary: &TrustSummary) -> String {
    match summary.badge {
        TrustBadge::Unranked => format!("Trust score {}/100 (no badge yet)", summary.score.value()),
        badge => format!(
            "Trust score {}/100 ({} badge)",
            summary.score.value(),
            badge.label()
        ),
    }
}

pub(crate) fn run_rent_estimate(args: RentEstimateArgs) {
    let estimate = estimate_rent(&rent_request(args));
    println!("{}", render_estimate(&estimate));
}

fn rent_request(args: RentEstimateArgs) -> RentEstimateRequest {
    RentEstimateRequest {
        zip_code: args.zip,
        bedrooms: args.bedrooms,
        bathrooms: args.bathrooms,
        has_parking: args.parking,
        has_pool: args.pool,
        has_gym: args.gym,
    }
}

fn render_estimate(estimate: &RentEstimate) -> String {
    format!(
        "Suggested rent ${} (range ${} - ${})",
        estimate.optimal_price, estimate.low_range, estimate.high_range
    )
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { seed, skip_review } = args;

    println!("Tenant screening demo");
    let service = TenantScreeningService::new(
        Arc::new(InMemoryMarketplace::demo()),
        Arc::new(InMemoryScreenings::default()),
        ScreeningPolicy::default(),
    );
    let mut bureau = SimulatedBureau::from_seed_option(seed);
    let landlord = UserId(DEMO_LANDLORD.to_string());
    let property = PropertyId(DEMO_PROPERTY.to_string());
    let move_in = Local::now().date_naive() + chrono::Duration::days(30);

    println!("\nApplications for {property}");
    let mut applications = Vec::new();
    for tenant in [DEMO_TENANT, DEMO_NEW_TENANT] {
        let tenant = UserId(tenant.to_string());
        let trust = service.trust_summary(&tenant)?;
        let application = service.submit_application(&tenant, &property, demo_form(move_in))?;
        println!(
            "- {} applied as {} -> status {}",
            tenant,
            application.id,
            application.status.label()
        );
        println!("  {}", render_trust(&trust));
        applications.push(application.id);
    }

    println!("\nScreening reports");
    for application_id in &applications {
        let report = service.generate_screening(application_id, &landlord, &mut bureau)?;
        println!(
            "- {}: credit {} ({}) | risk {} | {}",
            application_id,
            report.credit_score,
            report.credit_band.label(),
            report.risk_level.label(),
            report.recommendation
        );
        println!(
            "  criminal clear {} | eviction clear {} | employment {} | income {} | references {}",
            report.criminal_record_clear,
            report.eviction_history_clear,
            report.employment_verified,
            report.income_verified,
            report.references_verified
        );
    }

    if let Some(first) = applications.first() {
        match service.generate_screening(first, &landlord, &mut bureau) {
            Ok(_) => println!("  Unexpected second report for {first}"),
            Err(err) => println!("  Repeat screening refused: {err}"),
        }
    }

    if !skip_review {
        if let Some(first) = applications.first() {
            let reviewed = service.review_application(first, &landlord, ReviewDecision::Approved)?;
            println!(
                "\nLandlord review: {} -> {}",
                reviewed.id,
                reviewed.status.label()
            );
        }
    }

    let dashboard = service.landlord_dashboard(&landlord)?;
    println!("\nLandlord dashboard for {}", dashboard.landlord_id);
    println!(
        "- {} listings | {} pending applications",
        dashboard.total_properties, dashboard.pending_applications
    );
    let distribution = dashboard.badge_distribution;
    println!(
        "- Applicants by badge: gold {} | silver {} | bronze {} | unranked {}",
        distribution.gold, distribution.silver, distribution.bronze, distribution.unranked
    );
    for summary in &dashboard.applications {
        println!(
            "  - {} | {} | {} | trust {}",
            summary.application_id,
            summary.tenant_name,
            summary.status,
            summary.trust.score.value()
        );
    }

    let tenant_view = service.tenant_dashboard(&UserId(DEMO_TENANT.to_string()))?;
    match serde_json::to_string_pretty(&tenant_view) {
        Ok(json) => println!("\nTenant dashboard payload:\n{}", json),
        Err(err) => println!("\nTenant dashboard payload unavailable: {}", err),
    }

    Ok(())
}

fn demo_form(move_in_date: NaiveDate) -> ApplicationForm {
    ApplicationForm {
        current_address: "2100 Lincoln Way, Ames, IA".to_string(),
        move_in_date,
        employer_name: "Prairie Health".to_string(),
        job_title: "Nurse".to_string(),
        annual_income: 68_000,
        number_of_occupants: 2,
        has_pets: false,
        pet_details: String::new(),
        additional_notes: "Flexible on move-in date".to_string(),
    }
}
