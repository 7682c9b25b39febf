//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};
#[cfg(feature = "example-data")]
pub(crate) use state_builders::seed_store;
use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use chirp::Trace;
#[cfg(debug_assertions)]
use chirp::doc::ApiDoc;
use chirp::inbound::http::cheeps::{
    home_feed, like_cheep, post_cheep, public_timeline, unlike_cheep, user_timeline,
};
use chirp::inbound::http::error::{json_config, path_config, query_config};
use chirp::inbound::http::follows::{follow, followers, following, unfollow};
use chirp::inbound::http::health::{HealthState, live, ready};
use chirp::inbound::http::simulator::{
    get_follows, get_latest, get_messages, get_user_messages, post_follows, post_user_message,
    register,
};
use chirp::inbound::http::state::HttpState;
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
        .service(public_timeline)
        .service(post_cheep)
        .service(user_timeline)
        .service(home_feed)
        .service(like_cheep)
        .service(unlike_cheep)
        .service(follow)
        .service(unfollow)
        .service(followers)
        .service(following);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .wrap(Trace)
        .service(api)
        .service(get_latest)
        .service(register)
        .service(get_messages)
        .service(get_user_messages)
        .service(post_user_message)
        .service(get_follows)
        .service(post_follows)
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
/// Readiness is left to the caller, which marks it once startup work such
/// as migrations and seeding has finished.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: &ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(config.store());
    info!(
        bind_addr = %config.bind_addr,
        store = config.store().kind(),
        "starting HTTP server"
    );

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(config.bind_addr)?
    .run();

    Ok(server)
}
