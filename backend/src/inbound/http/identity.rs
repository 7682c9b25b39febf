//! Acting-user identity supplied by the upstream identity provider.
//!
//! Authentication happens outside this service; the provider forwards the
//! authenticated user's id in the `X-User-Id` header. Handlers only see the
//! parsed [`UserId`].

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};
use tracing::warn;

use crate::domain::{Error, UserId};

/// Header carrying the acting user's id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Identity of the caller, if the request carried a valid one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityContext(Option<UserId>);

impl IdentityContext {
    /// Wrap an already-resolved user id.
    pub fn new(user_id: Option<UserId>) -> Self {
        Self(user_id)
    }

    fn from_request_headers(req: &HttpRequest) -> Self {
        let Some(value) = req.headers().get(USER_ID_HEADER) else {
            return Self(None);
        };
        let parsed = value
            .to_str()
            .map_err(|error| error.to_string())
            .and_then(|raw| UserId::new(raw).map_err(|error| error.to_string()));
        match parsed {
            Ok(id) => Self(Some(id)),
            Err(error) => {
                warn!(%error, "ignoring malformed {USER_ID_HEADER} header");
                Self(None)
            }
        }
    }

    /// The acting user's id, if present.
    pub fn user_id(&self) -> Option<&UserId> {
        self.0.as_ref()
    }

    /// Require an acting user or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.0
            .clone()
            .ok_or_else(|| Error::unauthorized("acting user required"))
    }
}

impl FromRequest for IdentityContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_request_headers(req)))
    }
}
