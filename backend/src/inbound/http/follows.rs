//! Social graph HTTP handlers.
//!
//! ```text
//! POST   /api/v1/follows/{followee}
//! DELETE /api/v1/follows/{followee}
//! GET    /api/v1/users/{id}/followers
//! GET    /api/v1/users/{id}/following
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, web};

use crate::domain::ports::FollowTarget;
use crate::inbound::http::ApiResult;
use crate::inbound::http::cheeps::AuthorResponse;
use crate::inbound::http::identity::IdentityContext;
use crate::inbound::http::outcomes::{OutcomeResponse, outcome_response};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_user_id;

/// Follow another user by id.
#[utoipa::path(
    post,
    path = "/api/v1/follows/{followee}",
    params(
        ("followee" = String, Path, description = "Id of the user to follow"),
        ("X-User-Id" = String, Header, description = "Acting user")
    ),
    responses(
        (status = 200, description = "successfully followed", body = OutcomeResponse),
        (status = 400, description = "Blank or self target", body = OutcomeResponse),
        (status = 404, description = "Followee not found", body = OutcomeResponse),
        (status = 409, description = "Already following", body = OutcomeResponse),
        (status = 401, description = "Missing acting user", body = ErrorSchema)
    ),
    tags = ["follows"],
    operation_id = "follow"
)]
#[post("/follows/{followee}")]
pub async fn follow(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let follower = identity.require_user_id()?;
    let outcome = state
        .graph
        .follow(&follower, FollowTarget::Id(path.into_inner()))
        .await?;
    Ok(outcome_response(&outcome, StatusCode::NOT_FOUND))
}

/// Stop following a user.
#[utoipa::path(
    delete,
    path = "/api/v1/follows/{followee}",
    params(
        ("followee" = String, Path, description = "Id of the user to unfollow"),
        ("X-User-Id" = String, Header, description = "Acting user")
    ),
    responses(
        (status = 200, description = "successfully unfollowed", body = OutcomeResponse),
        (status = 404, description = "Not following", body = OutcomeResponse),
        (status = 401, description = "Missing acting user", body = ErrorSchema)
    ),
    tags = ["follows"],
    operation_id = "unfollow"
)]
#[delete("/follows/{followee}")]
pub async fn unfollow(
    state: web::Data<HttpState>,
    identity: IdentityContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let follower = identity.require_user_id()?;
    let outcome = state
        .graph
        .unfollow(&follower, FollowTarget::Id(path.into_inner()))
        .await?;
    Ok(outcome_response(&outcome, StatusCode::NOT_FOUND))
}

/// Users following `{id}`, ordered by username.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/followers",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Followers", body = [AuthorResponse]),
        (status = 400, description = "Invalid user id", body = ErrorSchema)
    ),
    tags = ["follows"],
    operation_id = "listFollowers"
)]
#[get("/users/{id}/followers")]
pub async fn followers(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<AuthorResponse>>> {
    let user = parse_user_id(path.into_inner())?;
    let listed = state.graph_query.followers(&user).await?;
    Ok(web::Json(listed.iter().map(AuthorResponse::from).collect()))
}

/// Ids of the users `{id}` follows.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/following",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Followee ids in ascending order", body = [String]),
        (status = 400, description = "Invalid user id", body = ErrorSchema)
    ),
    tags = ["follows"],
    operation_id = "listFollowing"
)]
#[get("/users/{id}/following")]
pub async fn following(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<String>>> {
    let user = parse_user_id(path.into_inner())?;
    let ids = state.graph_query.followee_ids(&user).await?;
    Ok(web::Json(ids.into_iter().map(String::from).collect()))
}
