//! `/health/ready` and `/health/live`.
//!
//! Readiness stays down until storage is migrated and optional example data
//! is seeded; liveness goes down when the process starts draining.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

#[derive(Debug, Clone, Copy)]
enum Probe {
    Ready,
    Live,
}

/// Probe flags shared between `main` and the handlers.
#[derive(Debug)]
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Live, not yet ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `/health/ready` once migrations and seeding are done.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail `/health/live` so the orchestrator restarts the process.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Whether traffic may be routed here.
    pub fn is_ready(&self) -> bool {
        self.passes(Probe::Ready)
    }

    /// Whether the process is still healthy.
    pub fn is_alive(&self) -> bool {
        self.passes(Probe::Live)
    }

    fn passes(&self, probe: Probe) -> bool {
        let flag = match probe {
            Probe::Ready => &self.ready,
            Probe::Live => &self.live,
        };
        flag.load(Ordering::Acquire)
    }

    fn respond(&self, probe: Probe) -> HttpResponse {
        let mut builder = if self.passes(probe) {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        // Probe results must never be served from a cache.
        builder
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Whether Chirp accepts traffic yet.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Storage migrated, serving requests"),
        (status = 503, description = "Still starting up")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    state.respond(Probe::Ready)
}

/// Whether the process should be kept running.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Process is healthy"),
        (status = 503, description = "Process is draining")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    state.respond(Probe::Live)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    async fn get_probe(state: web::Data<HealthState>, uri: &str) -> (StatusCode, Option<String>) {
        let app =
            test::init_service(App::new().app_data(state).service(ready).service(live)).await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let cache = res
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        (res.status(), cache)
    }

    #[rstest]
    #[case("/health/ready", StatusCode::SERVICE_UNAVAILABLE)]
    #[case("/health/live", StatusCode::OK)]
    #[actix_web::test]
    async fn fresh_state_is_live_but_not_ready(#[case] uri: &str, #[case] expected: StatusCode) {
        let (status, cache) = get_probe(web::Data::new(HealthState::new()), uri).await;
        assert_eq!(status, expected);
        assert_eq!(cache.as_deref(), Some("no-store"));
    }

    #[actix_web::test]
    async fn marking_flips_each_probe() {
        let state = web::Data::new(HealthState::new());
        state.mark_ready();
        state.mark_unhealthy();

        assert_eq!(get_probe(state.clone(), "/health/ready").await.0, StatusCode::OK);
        assert_eq!(
            get_probe(state, "/health/live").await.0,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
