use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, InMemoryLeadRepository};
use crate::routes::storefront_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use konastone::config::AppConfig;
use konastone::error::AppError;
use konastone::leads::LeadService;
use konastone::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(args: ServeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?.with_listener(args.host, args.port);

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = Arc::new(load_catalog(&config.catalog)?);
    let vehicle_count = catalog.len();
    let leads = Arc::new(LeadService::new(
        Arc::new(InMemoryLeadRepository::default()),
        catalog.clone(),
    ));

    let app = storefront_routes(catalog, leads)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        environment = config.environment.label(),
        %addr,
        vehicles = vehicle_count,
        "storefront ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
