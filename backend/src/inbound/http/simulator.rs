//! Simulator-compatible HTTP API.
//!
//! ```text
//! GET  /latest
//! POST /register
//! GET  /msgs
//! GET  /msgs/{username}
//! POST /msgs/{username}
//! GET  /fllws/{username}
//! POST /fllws/{username}
//! ```
//!
//! Every endpoint except `/latest` records the `latest` query parameter
//! before anything else, including the credential check. All endpoints except
//! `/latest` and `/register` require the simulator's basic-auth credential and
//! answer `403` with a simulator error body otherwise. Users are addressed by
//! username.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{FollowTarget, Registration, RegistrationOutcome};
use crate::domain::{Cheep, Error, Outcome, OutcomeKind, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, first_items, missing_field_error};

/// The only credential the simulator sends (`simulator:super_safe!`).
pub const SIMULATOR_AUTHORIZATION: &str = "Basic c2ltdWxhdG9yOnN1cGVyX3NhZmUh";

const DEFAULT_ITEM_COUNT: i64 = 100;
const NOT_AUTHORISED: &str = "You are not authorized to use this resource!";
const MISSING_FOLLOW_TARGET: &str = "You have to provide a user to follow or unfollow";
const PUB_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Query parameters shared by simulator endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SimulatorParams {
    /// Id of the simulator command that produced this request.
    pub latest: Option<i64>,
    /// Maximum number of items to return (default 100).
    pub no: Option<i64>,
}

impl SimulatorParams {
    fn item_count(self) -> i64 {
        self.no.unwrap_or(DEFAULT_ITEM_COUNT)
    }
}

/// Error body in the simulator's format.
#[derive(Debug, Serialize, ToSchema)]
pub struct SimulatorErrorResponse {
    pub status: u16,
    pub error_msg: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LatestResponse {
    pub latest: i64,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub pwd: String,
}

impl From<RegisterRequest> for Registration {
    fn from(value: RegisterRequest) -> Self {
        Self {
            username: value.username,
            email: value.email,
            pwd: value.pwd,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub content: String,
    pub pub_date: String,
    pub user: String,
}

impl From<Cheep> for MessageResponse {
    fn from(cheep: Cheep) -> Self {
        Self {
            pub_date: cheep.timestamp.format(PUB_DATE_FORMAT).to_string(),
            user: cheep.author.username().to_string(),
            content: cheep.text.into(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PostMessageRequest {
    pub content: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FollowsResponse {
    pub follows: Vec<String>,
}

/// Follow or unfollow instruction; `follow` wins when both are present.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct FollowActionRequest {
    pub follow: Option<String>,
    pub unfollow: Option<String>,
}

fn simulator_error(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(SimulatorErrorResponse {
        status: status.as_u16(),
        error_msg: message.to_owned(),
    })
}

fn is_authorised(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::AUTHORIZATION)
        .is_some_and(|value| value.as_bytes() == SIMULATOR_AUTHORIZATION.as_bytes())
}

async fn record_latest(state: &HttpState, params: SimulatorParams) -> Result<(), Error> {
    if let Some(latest) = params.latest {
        state.simulator.record_latest(latest).await?;
        debug!(latest, "recorded simulator command id");
    }
    Ok(())
}

/// Record `latest`, then check the credential.
///
/// Returns the response to send when the request must stop here.
async fn admit(
    state: &HttpState,
    req: &HttpRequest,
    params: SimulatorParams,
) -> Result<Option<HttpResponse>, Error> {
    record_latest(state, params).await?;
    if is_authorised(req) {
        Ok(None)
    } else {
        Ok(Some(simulator_error(StatusCode::FORBIDDEN, NOT_AUTHORISED)))
    }
}

async fn user_named(state: &HttpState, username: &str) -> Result<Option<User>, Error> {
    state.users.by_name(username).await
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

/// Most recently recorded simulator command id, `-1` before any.
#[utoipa::path(
    get,
    path = "/latest",
    responses((status = 200, description = "Latest command id", body = LatestResponse)),
    tags = ["simulator"],
    operation_id = "simulatorLatest"
)]
#[get("/latest")]
pub async fn get_latest(state: web::Data<HttpState>) -> ApiResult<web::Json<LatestResponse>> {
    let latest = state.simulator.latest().await?;
    Ok(web::Json(LatestResponse { latest }))
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/register",
    params(SimulatorParams),
    request_body = RegisterRequest,
    responses(
        (status = 204, description = "Registered"),
        (status = 400, description = "Rejected registration", body = SimulatorErrorResponse),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["simulator"],
    operation_id = "simulatorRegister"
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    params: web::Query<SimulatorParams>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    record_latest(&state, params.into_inner()).await?;
    let outcome = state
        .simulator
        .register(payload.into_inner().into())
        .await?;
    Ok(match outcome {
        RegistrationOutcome::Registered(_) => HttpResponse::NoContent().finish(),
        RegistrationOutcome::Rejected(rejection) => {
            simulator_error(StatusCode::BAD_REQUEST, rejection.message())
        }
    })
}

/// Latest public messages.
#[utoipa::path(
    get,
    path = "/msgs",
    params(SimulatorParams),
    responses(
        (status = 200, description = "Messages, newest first", body = [MessageResponse]),
        (status = 403, description = "Missing credential", body = SimulatorErrorResponse)
    ),
    tags = ["simulator"],
    operation_id = "simulatorMessages"
)]
#[get("/msgs")]
pub async fn get_messages(
    state: web::Data<HttpState>,
    req: HttpRequest,
    params: web::Query<SimulatorParams>,
) -> ApiResult<HttpResponse> {
    let params = params.into_inner();
    if let Some(rejection) = admit(&state, &req, params).await? {
        return Ok(rejection);
    }
    let messages = match first_items(params.item_count()) {
        Some(request) => state.feed.public_timeline(request).await?,
        None => Vec::new(),
    };
    let body: Vec<MessageResponse> = messages.into_iter().map(MessageResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Latest messages of one user.
#[utoipa::path(
    get,
    path = "/msgs/{username}",
    params(("username" = String, Path, description = "Author username"), SimulatorParams),
    responses(
        (status = 200, description = "Messages, newest first", body = [MessageResponse]),
        (status = 403, description = "Missing credential", body = SimulatorErrorResponse),
        (status = 404, description = "Unknown user")
    ),
    tags = ["simulator"],
    operation_id = "simulatorUserMessages"
)]
#[get("/msgs/{username}")]
pub async fn get_user_messages(
    state: web::Data<HttpState>,
    req: HttpRequest,
    path: web::Path<String>,
    params: web::Query<SimulatorParams>,
) -> ApiResult<HttpResponse> {
    let params = params.into_inner();
    if let Some(rejection) = admit(&state, &req, params).await? {
        return Ok(rejection);
    }
    let Some(user) = user_named(&state, &path).await? else {
        return Ok(HttpResponse::NotFound().finish());
    };
    let messages = match first_items(params.item_count()) {
        Some(request) => state.feed.own_timeline(user.id(), request).await?,
        None => Vec::new(),
    };
    let body: Vec<MessageResponse> = messages.into_iter().map(MessageResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Post a message as a user.
#[utoipa::path(
    post,
    path = "/msgs/{username}",
    params(("username" = String, Path, description = "Author username"), SimulatorParams),
    request_body = PostMessageRequest,
    responses(
        (status = 204, description = "Message stored"),
        (status = 400, description = "Empty or over-long content", body = ErrorSchema),
        (status = 403, description = "Missing credential", body = SimulatorErrorResponse),
        (status = 404, description = "Unknown user")
    ),
    tags = ["simulator"],
    operation_id = "simulatorPostMessage"
)]
#[post("/msgs/{username}")]
pub async fn post_user_message(
    state: web::Data<HttpState>,
    req: HttpRequest,
    path: web::Path<String>,
    params: web::Query<SimulatorParams>,
    payload: web::Json<PostMessageRequest>,
) -> ApiResult<HttpResponse> {
    if let Some(rejection) = admit(&state, &req, params.into_inner()).await? {
        return Ok(rejection);
    }
    let Some(user) = user_named(&state, &path).await? else {
        return Ok(HttpResponse::NotFound().finish());
    };
    let content = payload
        .into_inner()
        .content
        .ok_or_else(|| missing_field_error(FieldName::new("content")))?;
    state.cheeps.post_cheep(user.id(), &content).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Usernames a user follows.
#[utoipa::path(
    get,
    path = "/fllws/{username}",
    params(("username" = String, Path, description = "Follower username"), SimulatorParams),
    responses(
        (status = 200, description = "Followed usernames", body = FollowsResponse),
        (status = 403, description = "Missing credential", body = SimulatorErrorResponse),
        (status = 404, description = "Unknown user")
    ),
    tags = ["simulator"],
    operation_id = "simulatorFollows"
)]
#[get("/fllws/{username}")]
pub async fn get_follows(
    state: web::Data<HttpState>,
    req: HttpRequest,
    path: web::Path<String>,
    params: web::Query<SimulatorParams>,
) -> ApiResult<HttpResponse> {
    let params = params.into_inner();
    if let Some(rejection) = admit(&state, &req, params).await? {
        return Ok(rejection);
    }
    let Some(user) = user_named(&state, &path).await? else {
        return Ok(HttpResponse::NotFound().finish());
    };
    let limit = usize::try_from(params.item_count()).unwrap_or(0);
    let followees = state.graph_query.followees(user.id(), limit).await?;
    Ok(HttpResponse::Ok().json(FollowsResponse {
        follows: followees
            .iter()
            .map(|followee| followee.username().to_string())
            .collect(),
    }))
}

/// Follow or unfollow a user by username.
#[utoipa::path(
    post,
    path = "/fllws/{username}",
    params(("username" = String, Path, description = "Follower username"), SimulatorParams),
    request_body = FollowActionRequest,
    responses(
        (status = 204, description = "Relation updated"),
        (status = 400, description = "No target or self follow", body = SimulatorErrorResponse),
        (status = 403, description = "Missing credential", body = SimulatorErrorResponse),
        (status = 404, description = "Unknown user, or unfollow without a follow", body = SimulatorErrorResponse)
    ),
    tags = ["simulator"],
    operation_id = "simulatorFollow"
)]
#[post("/fllws/{username}")]
pub async fn post_follows(
    state: web::Data<HttpState>,
    req: HttpRequest,
    path: web::Path<String>,
    params: web::Query<SimulatorParams>,
    payload: web::Json<FollowActionRequest>,
) -> ApiResult<HttpResponse> {
    if let Some(rejection) = admit(&state, &req, params.into_inner()).await? {
        return Ok(rejection);
    }
    let Some(who) = user_named(&state, &path).await? else {
        return Ok(HttpResponse::NotFound().finish());
    };
    let FollowActionRequest { follow, unfollow } = payload.into_inner();

    if let Some(target) = non_blank(follow) {
        let outcome = state
            .graph
            .follow(who.id(), FollowTarget::Username(target))
            .await?;
        return Ok(match outcome.kind() {
            OutcomeKind::Success | OutcomeKind::Conflict => HttpResponse::NoContent().finish(),
            OutcomeKind::NotFound => HttpResponse::NotFound().finish(),
            OutcomeKind::Invalid | OutcomeKind::NotFollowingOrNotLiked => {
                simulator_error(StatusCode::BAD_REQUEST, outcome.wire_message())
            }
        });
    }

    if let Some(target) = non_blank(unfollow) {
        if user_named(&state, &target).await?.is_none() {
            return Ok(HttpResponse::NotFound().finish());
        }
        let outcome = state
            .graph
            .unfollow(who.id(), FollowTarget::Username(target))
            .await?;
        return Ok(match outcome.kind() {
            OutcomeKind::Success => HttpResponse::NoContent().finish(),
            _ => simulator_error(StatusCode::NOT_FOUND, outcome.wire_message()),
        });
    }

    Ok(simulator_error(StatusCode::BAD_REQUEST, MISSING_FOLLOW_TARGET))
}

#[cfg(test)]
#[path = "simulator_tests.rs"]
mod tests;
