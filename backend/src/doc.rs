//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers:
//!
//! - **Paths**: the JSON API under `/api/v1`, the simulator endpoints at the
//!   root, and the health probes
//! - **Schemas**: response DTOs plus wrappers ([`ErrorSchema`],
//!   [`ErrorCodeSchema`], [`CheepPageSchema`]) that describe types which do
//!   not derive `ToSchema` themselves
//! - **Security**: the acting-user header and the simulator credential
//!
//! Swagger UI serves the document in debug builds; `openapi-dump` prints it.

use crate::inbound::http::cheeps::{AuthorResponse, CheepResponse, PostCheepRequest};
use crate::inbound::http::identity::USER_ID_HEADER;
use crate::inbound::http::outcomes::OutcomeResponse;
use crate::inbound::http::schemas::{CheepPageSchema, ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::simulator::{
    FollowActionRequest, FollowsResponse, LatestResponse, MessageResponse, PostMessageRequest,
    RegisterRequest, SimulatorErrorResponse,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Security scheme name for the acting-user header.
pub const ACTING_USER_SCHEME: &str = "ActingUser";
/// Security scheme name for the simulator's fixed credential.
pub const SIMULATOR_SCHEME: &str = "SimulatorCredential";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            ACTING_USER_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                USER_ID_HEADER,
                "Id of the user performing the request, set by the identity provider.",
            ))),
        );
        components.add_security_scheme(
            SIMULATOR_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "Fixed Basic credential required by every simulator endpoint except /latest.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Chirp API",
        description = "Microblogging: cheeps, likes, follows and the simulator interface.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::cheeps::public_timeline,
        crate::inbound::http::cheeps::post_cheep,
        crate::inbound::http::cheeps::user_timeline,
        crate::inbound::http::cheeps::home_feed,
        crate::inbound::http::cheeps::like_cheep,
        crate::inbound::http::cheeps::unlike_cheep,
        crate::inbound::http::follows::follow,
        crate::inbound::http::follows::unfollow,
        crate::inbound::http::follows::followers,
        crate::inbound::http::follows::following,
        crate::inbound::http::simulator::get_latest,
        crate::inbound::http::simulator::register,
        crate::inbound::http::simulator::get_messages,
        crate::inbound::http::simulator::get_user_messages,
        crate::inbound::http::simulator::post_user_message,
        crate::inbound::http::simulator::get_follows,
        crate::inbound::http::simulator::post_follows,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CheepPageSchema,
        CheepResponse,
        AuthorResponse,
        PostCheepRequest,
        OutcomeResponse,
        SimulatorErrorResponse,
        LatestResponse,
        RegisterRequest,
        MessageResponse,
        PostMessageRequest,
        FollowsResponse,
        FollowActionRequest,
    )),
    tags(
        (name = "cheeps", description = "Posting, reading and liking cheeps"),
        (name = "follows", description = "The social graph"),
        (name = "simulator", description = "Legacy interface driven by the load simulator"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the registered paths and schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[test]
    fn cheep_response_uses_camel_case() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let cheep = schemas.get("CheepResponse").expect("CheepResponse schema");

        assert_object_schema_has_field(cheep, "likeCount");
        assert_object_schema_has_field(cheep, "likedBy");
    }

    #[rstest]
    #[case("/api/v1/cheeps")]
    #[case("/api/v1/cheeps/{id}/like")]
    #[case("/api/v1/feed")]
    #[case("/api/v1/follows/{followee}")]
    #[case("/msgs/{username}")]
    #[case("/fllws/{username}")]
    #[case("/latest")]
    #[case("/health/ready")]
    fn paths_are_registered(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[test]
    fn security_schemes_are_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(ACTING_USER_SCHEME));
        assert!(components.security_schemes.contains_key(SIMULATOR_SCHEME));
    }
}
