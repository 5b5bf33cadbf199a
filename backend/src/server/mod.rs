//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tokio_util::sync::CancellationToken;

use recipe_backend::Trace;
#[cfg(debug_assertions)]
use recipe_backend::doc::ApiDoc;
use recipe_backend::inbound::http::health::{HealthState, live, ready};
use recipe_backend::inbound::http::recipes;
use recipe_backend::inbound::http::state::HttpState;
use recipe_backend::inbound::http::validation::json_config;
use recipe_backend::outbound::cache::{InMemoryRecipeCache, run_purge_loop};
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

    let api = web::scope("/api").configure(recipes::configure);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// A background task purges expired cache entries until `shutdown` fires.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] with binding, cache and optional database settings.
/// - `shutdown`: token cancelled once the server stops.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or registering
/// handlers fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    shutdown: CancellationToken,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let cache = Arc::new(InMemoryRecipeCache::new());
    let http_state =
        build_http_state(&config, Arc::clone(&cache)).map_err(std::io::Error::other)?;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(config.bind_addr())?
    .run();

    tokio::spawn(run_purge_loop(cache, config.cache_purge_interval, shutdown));

    health_state.mark_ready();
    Ok(server)
}
