//! Cheep and timeline HTTP handlers.
//!
//! ```text
//! GET    /api/v1/cheeps?page=n
//! POST   /api/v1/cheeps
//! GET    /api/v1/users/{id}/cheeps?page=n
//! GET    /api/v1/feed?page=n
//! POST   /api/v1/cheeps/{id}/like
//! DELETE /api/v1/cheeps/{id}/like
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, web};
use pagination::{PageParams, Paginated};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Cheep, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::IdentityContext;
use crate::inbound::http::outcomes::{OutcomeResponse, outcome_response};
use crate::inbound::http::schemas::{CheepPageSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_cheep_id, parse_user_id,
};

/// Public projection of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: String,
    pub username: String,
}

impl From<&User> for AuthorResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
        }
    }
}

/// A cheep as rendered to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheepResponse {
    pub id: i64,
    pub author: AuthorResponse,
    pub text: String,
    /// RFC 3339 creation time.
    pub timestamp: String,
    pub like_count: usize,
    pub liked_by: Vec<String>,
}

impl From<Cheep> for CheepResponse {
    fn from(cheep: Cheep) -> Self {
        Self {
            id: cheep.id.get(),
            author: AuthorResponse::from(&cheep.author),
            like_count: cheep.like_count(),
            liked_by: cheep.liked_by.iter().map(ToString::to_string).collect(),
            text: cheep.text.into(),
            timestamp: cheep.timestamp.to_rfc3339(),
        }
    }
}

/// Request payload for posting a cheep.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PostCheepRequest {
    pub text: Option<String>,
}

fn page_of(cheeps: Vec<Cheep>, params: PageParams) -> Paginated<CheepResponse> {
    Paginated::new(cheeps, params.to_request()).map(CheepResponse::from)
}

/// Public timeline, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/cheeps",
    params(("page" = Option<i64>, Query, description = "One-based page; values below 1 select the first page")),
    responses(
        (status = 200, description = "One page of cheeps", body = CheepPageSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["cheeps"],
    operation_id = "publicTimeline"
)]
#[get("/cheeps")]
pub async fn public_timeline(
    state: web::Data<HttpState>,
    params: web::Query<PageParams>,
) -> ApiResult<web::Json<Paginated<CheepResponse>>> {
    let params = params.into_inner();
    let cheeps = state.feed.public_timeline(params.to_request()).await?;
    Ok(web::Json(page_of(cheeps, params)))
}

/// Post a cheep as the acting user.
#[utoipa::path(
    post,
    path = "/api/v1/cheeps",
    request_body = PostCheepRequest,
    params(("X-User-Id" = String, Header, description = "Acting user")),
    responses(
        (status = 201, description = "Cheep stored", body = CheepResponse),
        (status = 400, description = "Empty or over-long text", body = ErrorSchema),
        (status = 401, description = "Missing acting user", body = ErrorSchema),
        (status = 404, description = "Acting user unknown", body = ErrorSchema)
    ),
    tags = ["cheeps"],
    operation_id = "postCheep"
)]
#[post("/cheeps")]
pub async fn post_cheep(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    payload: web::Json<PostCheepRequest>,
) -> ApiResult<HttpResponse> {
    let author = identity.require_user_id()?;
    let text = payload
        .into_inner()
        .text
        .ok_or_else(|| missing_field_error(FieldName::new("text")))?;
    let cheep = state.cheeps.post_cheep(&author, &text).await?;
    Ok(HttpResponse::Created().json(CheepResponse::from(cheep)))
}

/// Timeline of one user.
///
/// When the acting user views their own page the home feed is returned.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/cheeps",
    params(
        ("id" = String, Path, description = "Author id"),
        ("page" = Option<i64>, Query, description = "One-based page"),
        ("X-User-Id" = Option<String>, Header, description = "Acting user")
    ),
    responses(
        (status = 200, description = "One page of cheeps", body = CheepPageSchema),
        (status = 404, description = "Unknown author", body = ErrorSchema)
    ),
    tags = ["cheeps"],
    operation_id = "userTimeline"
)]
#[get("/users/{id}/cheeps")]
pub async fn user_timeline(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    path: web::Path<String>,
    params: web::Query<PageParams>,
) -> ApiResult<web::Json<Paginated<CheepResponse>>> {
    let author = parse_user_id(path.into_inner())?;
    let params = params.into_inner();
    let cheeps = state
        .feed
        .user_timeline(identity.user_id().cloned(), &author, params.to_request())
        .await?;
    Ok(web::Json(page_of(cheeps, params)))
}

/// Home feed of the acting user: own page followed by each followee's page.
#[utoipa::path(
    get,
    path = "/api/v1/feed",
    params(
        ("page" = Option<i64>, Query, description = "One-based page"),
        ("X-User-Id" = String, Header, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Concatenated per-author pages", body = CheepPageSchema),
        (status = 401, description = "Missing acting user", body = ErrorSchema)
    ),
    tags = ["cheeps"],
    operation_id = "homeFeed"
)]
#[get("/feed")]
pub async fn home_feed(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    params: web::Query<PageParams>,
) -> ApiResult<web::Json<Paginated<CheepResponse>>> {
    let user = identity.require_user_id()?;
    let params = params.into_inner();
    let cheeps = state.feed.home_feed(&user, params.to_request()).await?;
    Ok(web::Json(page_of(cheeps, params)))
}

/// Like a cheep. Repeating a like succeeds.
#[utoipa::path(
    post,
    path = "/api/v1/cheeps/{id}/like",
    params(
        ("id" = i64, Path, description = "Cheep id"),
        ("X-User-Id" = String, Header, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Liked", body = OutcomeResponse),
        (status = 404, description = "Cheep not found", body = OutcomeResponse),
        (status = 401, description = "Missing acting user", body = ErrorSchema)
    ),
    tags = ["cheeps"],
    operation_id = "likeCheep"
)]
#[post("/cheeps/{id}/like")]
pub async fn like_cheep(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user = identity.require_user_id()?;
    let cheep = parse_cheep_id(path.into_inner())?;
    let outcome = state.cheeps.like(&user, cheep).await?;
    Ok(outcome_response(&outcome, StatusCode::CONFLICT))
}

/// Remove a like.
#[utoipa::path(
    delete,
    path = "/api/v1/cheeps/{id}/like",
    params(
        ("id" = i64, Path, description = "Cheep id"),
        ("X-User-Id" = String, Header, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Unliked", body = OutcomeResponse),
        (status = 404, description = "Cheep not found", body = OutcomeResponse),
        (status = 409, description = "Cheep was not liked", body = OutcomeResponse),
        (status = 401, description = "Missing acting user", body = ErrorSchema)
    ),
    tags = ["cheeps"],
    operation_id = "unlikeCheep"
)]
#[delete("/cheeps/{id}/like")]
pub async fn unlike_cheep(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let user = identity.require_user_id()?;
    let cheep = parse_cheep_id(path.into_inner())?;
    let outcome = state.cheeps.unlike(&user, cheep).await?;
    Ok(outcome_response(&outcome, StatusCode::CONFLICT))
}

#[cfg(test)]
#[path = "cheeps_tests.rs"]
mod tests;
