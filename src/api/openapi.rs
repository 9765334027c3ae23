use crate::api::schemas::{ErrorDetail, ErrorResponse, SuccessResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::topic::adapter::incoming::web::routes::{
    CreateTopicRequest, CreateTopicResponse, TopicItemResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Feed Topics API",
        version = "1.0.0",
        description = "Creation and listing of feed topics"
    ),
    paths(
        crate::topic::adapter::incoming::web::routes::create_topic_handler,
        crate::topic::adapter::incoming::web::routes::get_topics_handler,
    ),
    components(
        schemas(
            // Response wrappers
            SuccessResponse<CreateTopicResponse>,
            ErrorResponse,
            ErrorDetail,

            // Topic DTOs
            CreateTopicRequest,
            CreateTopicResponse,
            TopicItemResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "topics", description = "Feed topic endpoints"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            )
        }
    }
}
