//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use wayfinder::Trace;
#[cfg(debug_assertions)]
use wayfinder::doc::ApiDoc;
use wayfinder::inbound::http::health::{HealthState, live, ready};
use wayfinder::inbound::http::routes::{clear_route_cache, get_directions, query_config};
use wayfinder::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api/v1")
        .app_data(query_config())
        .service(get_directions)
        .service(clear_route_cache);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when building the directions client or
/// binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    let drain_health_state = health_state.clone();
    let handle = server.handle();
    actix_web::rt::spawn(async move {
        match shutdown_signal().await {
            Ok(()) => drain(drain_health_state, handle).await,
            Err(error) => warn!(%error, "cannot listen for shutdown signals"),
        }
    });

    info!(%bind_addr, "route service listening");
    health_state.mark_ready();
    Ok(server)
}

/// Fail liveness, stop accepting connections, and let in-flight requests
/// finish.
async fn drain(health_state: web::Data<HealthState>, handle: ServerHandle) {
    health_state.mark_unhealthy();
    info!("shutdown requested; draining connections");
    handle.stop(true).await;
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

#[cfg(test)]
mod tests {
    //! Routing coverage for the assembled application.

    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use wayfinder::domain::ports::FixtureRouteCalculator;

    use super::*;

    fn deps() -> AppDependencies {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: web::Data::new(HttpState::new(Arc::new(FixtureRouteCalculator))),
        }
    }

    #[rstest]
    #[case::live("/health/live", StatusCode::OK)]
    #[case::ready("/health/ready", StatusCode::OK)]
    #[case::directions(
        "/api/v1/routes/directions?originLat=34.0689&originLng=-118.4452&destLat=34.07&destLng=-118.444",
        StatusCode::OK
    )]
    #[case::unversioned("/routes/directions", StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn mounts_expected_routes(#[case] uri: &str, #[case] expected: StatusCode) {
        let app = test::init_service(build_app(deps())).await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), expected, "{uri}");
        assert!(res.headers().contains_key("trace-id"));
    }

    #[rstest]
    #[actix_web::test]
    async fn undecodable_query_is_answered_with_json() {
        let app = test::init_service(build_app(deps())).await;
        let req = test::TestRequest::get()
            .uri("/api/v1/routes/directions?originLat=1&originLat=2&originLng=0&destLat=0&destLng=0")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: wayfinder::domain::Error = test::read_body_json(res).await;
        assert_eq!(body.code(), wayfinder::domain::ErrorCode::InvalidRequest);
        assert!(body.trace_id().is_some());
    }

    #[rstest]
    #[actix_web::test]
    async fn draining_fails_liveness_and_stops_the_server() {
        let deps = deps();
        let health_state = deps.health_state.clone();
        let server = HttpServer::new(move || build_app(deps.clone()))
            .workers(1)
            .disable_signals()
            .bind(("127.0.0.1", 0))
            .expect("bind ephemeral port")
            .run();
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);

        drain(health_state.clone(), handle).await;

        assert!(!health_state.is_alive());
        running
            .await
            .expect("server task joins")
            .expect("server stops cleanly");
    }

    #[rstest]
    #[actix_web::test]
    async fn cache_clear_is_mounted_under_api_scope() {
        let app = test::init_service(build_app(deps())).await;
        let req = test::TestRequest::delete()
            .uri("/api/v1/routes/cache")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}
