use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryMarketplace, InMemoryScreenings};
use crate::routes::with_marketplace_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tenant_screening::config::AppConfig;
use tenant_screening::error::AppError;
use tenant_screening::marketplace::{SimulatedBureau, TenantScreeningService};
use tenant_screening::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(seed) = args.seed.take() {
        config.screening.seed = Some(seed);
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let marketplace = Arc::new(InMemoryMarketplace::demo());
    let screenings = Arc::new(InMemoryScreenings::default());
    let policy = config.screening.policy();
    let service = Arc::new(TenantScreeningService::new(marketplace, screenings, policy));
    let bureau = SimulatedBureau::from_seed_option(config.screening.seed);

    let app = with_marketplace_routes(service, bureau)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        score_range = ?policy.score_range(),
        seeded = config.screening.seed.is_some(),
        "tenant screening service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
