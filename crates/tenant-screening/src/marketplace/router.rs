use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rand::rngs::StdRng;
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicationForm, ApplicationId, PropertyId, ReviewDecision, UserId};
use super::estimator::{estimate_rent, RentEstimateRequest};
use super::repository::{MarketplaceRepository, ScreeningRepository};
use super::screening::SimulatedBureau;
use super::service::{ErrorKind, MarketplaceError, TenantScreeningService};

/// Shared handler state: the service plus the bureau that feeds screening draws.
pub struct MarketplaceState<M, S> {
    service: Arc<TenantScreeningService<M, S>>,
    bureau: Arc<Mutex<SimulatedBureau<StdRng>>>,
}

impl<M, S> Clone for MarketplaceState<M, S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            bureau: Arc::clone(&self.bureau),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmitApplicationRequest {
    pub tenant_id: String,
    pub form: ApplicationForm,
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub requested_by: String,
    pub status: ReviewDecision,
}

#[derive(Debug, Deserialize)]
pub struct ScreeningRequest {
    pub requested_by: String,
}

#[derive(Debug, Deserialize)]
pub struct RequesterQuery {
    pub user: String,
}

/// Router builder exposing the application, screening and trust endpoints.
pub fn marketplace_router<M, S>(
    service: Arc<TenantScreeningService<M, S>>,
    bureau: SimulatedBureau<StdRng>,
) -> Router
where
    M: MarketplaceRepository + 'static,
    S: ScreeningRepository + 'static,
{
    let state = MarketplaceState {
        service,
        bureau: Arc::new(Mutex::new(bureau)),
    };

    Router::new()
        .route(
            "/api/v1/properties/:property_id/applications",
            post(submit_handler::<M, S>),
        )
        .route(
            "/api/v1/applications/:application_id",
            get(detail_handler::<M, S>),
        )
        .route(
            "/api/v1/applications/:application_id/review",
            post(review_handler::<M, S>),
        )
        .route(
            "/api/v1/applications/:application_id/screening",
            post(screening_handler::<M, S>).get(screening_report_handler::<M, S>),
        )
        .route("/api/v1/tenants/:user_id/trust", get(trust_handler::<M, S>))
        .route(
            "/api/v1/tenants/:user_id/dashboard",
            get(tenant_dashboard_handler::<M, S>),
        )
        .route(
            "/api/v1/landlords/:user_id/dashboard",
            get(landlord_dashboard_handler::<M, S>),
        )
        .route("/api/v1/rent-estimate", post(rent_estimate_handler))
        .with_state(state)
}

impl IntoResponse for MarketplaceError {
    fn into_response(self) -> Response {
        let status = match self.kind() {
            ErrorKind::Authorization => StatusCode::FORBIDDEN,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Invalid => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Unavailable => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

pub(crate) async fn submit_handler<M, S>(
    State(state): State<MarketplaceState<M, S>>,
    Path(property_id): Path<String>,
    Json(request): Json<SubmitApplicationRequest>,
) -> Result<Response, MarketplaceError>
where
    M: MarketplaceRepository + 'static,
    S: ScreeningRepository + 'static,
{
    let application = state.service.submit_application(
        &UserId(request.tenant_id),
        &PropertyId(property_id),
        request.form,
    )?;
    Ok((StatusCode::CREATED, Json(application)).into_response())
}

pub(crate) async fn detail_handler<M, S>(
    State(state): State<MarketplaceState<M, S>>,
    Path(application_id): Path<String>,
    Query(query): Query<RequesterQuery>,
) -> Result<Response, MarketplaceError>
where
    M: MarketplaceRepository + 'static,
    S: ScreeningRepository + 'static,
{
    let detail = state
        .service
        .application_detail(&ApplicationId(application_id), &UserId(query.user))?;
    Ok(Json(detail).into_response())
}

pub(crate) async fn review_handler<M, S>(
    State(state): State<MarketplaceState<M, S>>,
    Path(application_id): Path<String>,
    Json(request): Json<ReviewRequest>,
) -> Result<Response, MarketplaceError>
where
    M: MarketplaceRepository + 'static,
    S: ScreeningRepository + 'static,
{
    let application = state.service.review_application(
        &ApplicationId(application_id),
        &UserId(request.requested_by),
        request.status,
    )?;
    Ok(Json(application).into_response())
}

pub(crate) async fn screening_handler<M, S>(
    State(state): State<MarketplaceState<M, S>>,
    Path(application_id): Path<String>,
    Json(request): Json<ScreeningRequest>,
) -> Result<Response, MarketplaceError>
where
    M: MarketplaceRepository + 'static,
    S: ScreeningRepository + 'static,
{
    let application_id = ApplicationId(application_id);
    let requester = UserId(request.requested_by);

    let report = {
        let mut bureau = state.bureau.lock().unwrap_or_else(PoisonError::into_inner);
        state
            .service
            .generate_screening(&application_id, &requester, &mut *bureau)?
    };

    Ok((StatusCode::CREATED, Json(report)).into_response())
}

pub(crate) async fn screening_report_handler<M, S>(
    State(state): State<MarketplaceState<M, S>>,
    Path(application_id): Path<String>,
    Query(query): Query<RequesterQuery>,
) -> Result<Response, MarketplaceError>
where
    M: MarketplaceRepository + 'static,
    S: ScreeningRepository + 'static,
{
    let report = state
        .service
        .screening_report(&ApplicationId(application_id), &UserId(query.user))?;
    Ok(Json(report).into_response())
}

pub(crate) async fn trust_handler<M, S>(
    State(state): State<MarketplaceState<M, S>>,
    Path(user_id): Path<String>,
) -> Result<Response, MarketplaceError>
where
    M: MarketplaceRepository + 'static,
    S: ScreeningRepository + 'static,
{
    let summary = state.service.trust_summary(&UserId(user_id))?;
    Ok(Json(summary).into_response())
}

pub(crate) async fn tenant_dashboard_handler<M, S>(
    State(state): State<MarketplaceState<M, S>>,
    Path(user_id): Path<String>,
) -> Result<Response, MarketplaceError>
where
    M: MarketplaceRepository + 'static,
    S: ScreeningRepository + 'static,
{
    let dashboard = state.service.tenant_dashboard(&UserId(user_id))?;
    Ok(Json(dashboard).into_response())
}

pub(crate) async fn landlord_dashboard_handler<M, S>(
    State(state): State<MarketplaceState<M, S>>,
    Path(user_id): Path<String>,
) -> Result<Response, MarketplaceError>
where
    M: MarketplaceRepository + 'static,
    S: ScreeningRepository + 'static,
{
    let dashboard = state.service.landlord_dashboard(&UserId(user_id))?;
    Ok(Json(dashboard).into_response())
}

pub(crate) async fn rent_estimate_handler(
    Json(request): Json<RentEstimateRequest>,
) -> impl IntoResponse {
    Json(estimate_rent(&request))
}
