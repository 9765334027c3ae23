use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    api::schemas::{ErrorResponse, SuccessResponse},
    auth::adapter::incoming::web::extractors::AuthenticatedUser,
    shared::api::ApiResponse,
    topic::application::ports::incoming::use_cases::{
        CreateTopicCommand, CreateTopicCommandError, CreateTopicError,
    },
    AppState,
};

//
// ──────────────────────────────────────────────────────────
// DTOs
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTopicRequest {
    /// Unique topic name, 1 to 100 characters
    #[schema(example = "space")]
    pub name: String,

    /// Id of an unclaimed media attachment to use as logo
    #[schema(example = 8)]
    pub logo: Option<i64>,

    /// Optional description, up to 500 characters
    #[schema(example = "Everything about the universe")]
    pub desc: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateTopicResponse {
    /// Id of the new topic
    #[schema(example = 17)]
    pub id: i64,
}

//
// ──────────────────────────────────────────────────────────
// Route
// ──────────────────────────────────────────────────────────
//

/// Create topic
///
/// Creates a topic owned by the caller, who also becomes its first follower.
/// A logo attachment, when given, is claimed by the new topic.
#[utoipa::path(
    post,
    path = "/api/feed/topics",
    tag = "topics",
    request_body = CreateTopicRequest,
    security(("BearerAuth" = [])),
    responses(
        (
            status = 201,
            description = "Topic created",
            body = inline(SuccessResponse<CreateTopicResponse>),
            example = json!({
                "success": true,
                "data": { "id": 17 }
            })
        ),
        (
            status = 400,
            description = "Malformed request body",
            body = ErrorResponse
        ),
        (
            status = 401,
            description = "Missing or invalid bearer token",
            body = ErrorResponse
        ),
        (
            status = 409,
            description = "Topic name already exists",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "TOPIC_NAME_TAKEN",
                    "message": "Topic \"space\" already exists"
                }
            })
        ),
        (
            status = 422,
            description = "Invalid name, description or logo",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "LOGO_NOT_USABLE",
                    "message": "Logo attachment 8 is not usable"
                }
            })
        ),
        (
            status = 500,
            description = "Internal server error",
            body = ErrorResponse
        )
    )
)]
#[post("/api/feed/topics")]
pub async fn create_topic_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    payload: web::Json<CreateTopicRequest>,
) -> impl Responder {
    let payload = payload.into_inner();

    let command =
        match CreateTopicCommand::new(user.user_id, payload.name, payload.logo, payload.desc) {
            Ok(cmd) => cmd,
            Err(err) => {
                tracing::warn!(user_id = %user.user_id, error = %err, "Rejected topic input");
                return map_command_error(err);
            }
        };

    match data.create_topic_use_case.execute(command).await {
        Ok(topic) => ApiResponse::created(CreateTopicResponse { id: topic.id }),
        Err(err) => map_create_topic_error(err),
    }
}

//
// ──────────────────────────────────────────────────────────
// Error Mapping
// ──────────────────────────────────────────────────────────
//

fn map_command_error(err: CreateTopicCommandError) -> HttpResponse {
    let code = match err {
        CreateTopicCommandError::EmptyName => "EMPTY_NAME",
        CreateTopicCommandError::NameTooLong => "NAME_TOO_LONG",
        CreateTopicCommandError::DescriptionTooLong => "DESCRIPTION_TOO_LONG",
        CreateTopicCommandError::InvalidLogo => "INVALID_LOGO",
    };

    ApiResponse::unprocessable_entity(code, &err.to_string())
}

fn map_create_topic_error(err: CreateTopicError) -> HttpResponse {
    match &err {
        CreateTopicError::LogoNotFound(_) => {
            ApiResponse::unprocessable_entity("LOGO_NOT_FOUND", &err.to_string())
        }
        CreateTopicError::LogoNotUsable(_) => {
            ApiResponse::unprocessable_entity("LOGO_NOT_USABLE", &err.to_string())
        }
        CreateTopicError::NameTaken(_) => {
            ApiResponse::conflict("TOPIC_NAME_TAKEN", &err.to_string())
        }
        CreateTopicError::RepositoryError(msg) => {
            tracing::error!(error = %msg, "Create topic failed");
            ApiResponse::internal_error()
        }
    }
}
