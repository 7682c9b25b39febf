//! Rendering of typed operation outcomes.
//!
//! Follow and like endpoints answer with the historic plain-text result in a
//! JSON envelope. The status depends on the outcome kind; removing a relation
//! that does not exist maps to a per-endpoint status.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Outcome, OutcomeKind};

/// Body returned by follow, unfollow, like and unlike.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeResponse {
    /// Plain-text result, e.g. `successfully followed`.
    pub result: String,
    /// Stable variant code, e.g. `already_following`.
    pub code: String,
}

fn status_for(kind: OutcomeKind, missing_relation: StatusCode) -> StatusCode {
    match kind {
        OutcomeKind::Success => StatusCode::OK,
        OutcomeKind::NotFound => StatusCode::NOT_FOUND,
        OutcomeKind::Conflict => StatusCode::CONFLICT,
        OutcomeKind::Invalid => StatusCode::BAD_REQUEST,
        OutcomeKind::NotFollowingOrNotLiked => missing_relation,
    }
}

pub(crate) fn outcome_response<O: Outcome>(outcome: &O, missing_relation: StatusCode) -> HttpResponse {
    HttpResponse::build(status_for(outcome.kind(), missing_relation)).json(OutcomeResponse {
        result: outcome.wire_message().to_owned(),
        code: outcome.code().to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FollowOutcome, LikeOutcome, UnfollowOutcome, UnlikeOutcome};
    use rstest::rstest;

    #[rstest]
    #[case(FollowOutcome::Followed, StatusCode::OK)]
    #[case(FollowOutcome::InvalidFollowee, StatusCode::BAD_REQUEST)]
    #[case(FollowOutcome::SelfFollowRejected, StatusCode::BAD_REQUEST)]
    #[case(FollowOutcome::FolloweeNotFound, StatusCode::NOT_FOUND)]
    #[case(FollowOutcome::AlreadyFollowing, StatusCode::CONFLICT)]
    #[case(FollowOutcome::DuplicateEdge, StatusCode::CONFLICT)]
    fn follow_statuses(#[case] outcome: FollowOutcome, #[case] status: StatusCode) {
        assert_eq!(
            outcome_response(&outcome, StatusCode::NOT_FOUND).status(),
            status
        );
    }

    #[rstest]
    fn missing_relation_status_is_chosen_by_the_endpoint() {
        assert_eq!(
            outcome_response(&UnfollowOutcome::EdgeNotFound, StatusCode::NOT_FOUND).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            outcome_response(&UnlikeOutcome::NotLiked, StatusCode::CONFLICT).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            outcome_response(&LikeOutcome::CheepNotFound, StatusCode::CONFLICT).status(),
            StatusCode::NOT_FOUND
        );
    }
}
