use actix_web::{get, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    api::schemas::{ErrorResponse, SuccessResponse},
    shared::api::ApiResponse,
    topic::application::{
        domain::entities::{ListDirection, TopicListFilter},
        ports::incoming::use_cases::GetTopicsError,
        ports::outgoing::TopicSummary,
    },
    AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GetTopicsQuery {
    /// Case-insensitive substring of the topic name
    pub q: Option<String>,

    /// Id of the last topic already seen
    pub index: Option<i64>,

    /// `asc` or `desc` (default)
    pub direction: Option<String>,

    /// Page size, 1 to 50 (default 15)
    pub limit: Option<u64>,
}

impl GetTopicsQuery {
    fn into_filter(self) -> TopicListFilter {
        TopicListFilter::new(
            self.q,
            self.index,
            ListDirection::from_param(self.direction.as_deref()),
            self.limit,
        )
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TopicItemResponse {
    #[schema(example = 17)]
    pub id: i64,

    #[schema(example = "space")]
    pub name: String,

    /// Attachment id of the logo, if any
    #[schema(example = 8)]
    pub logo: Option<i64>,

    pub created_at: DateTime<Utc>,
}

impl From<TopicSummary> for TopicItemResponse {
    fn from(topic: TopicSummary) -> Self {
        Self {
            id: topic.id,
            name: topic.name,
            logo: topic.logo,
            created_at: topic.created_at,
        }
    }
}

/// List topics
///
/// Public, cursor-paginated listing ordered by topic id.
#[utoipa::path(
    get,
    path = "/api/feed/topics",
    tag = "topics",
    params(GetTopicsQuery),
    responses(
        (
            status = 200,
            description = "One page of topics",
            body = inline(SuccessResponse<Vec<TopicItemResponse>>),
            example = json!({
                "success": true,
                "data": [
                    { "id": 17, "name": "space", "logo": 8, "created_at": "2026-01-27T12:00:00Z" }
                ]
            })
        ),
        (
            status = 400,
            description = "Malformed query string",
            body = ErrorResponse
        ),
        (
            status = 500,
            description = "Internal server error",
            body = ErrorResponse
        )
    )
)]
#[get("/api/feed/topics")]
pub async fn get_topics_handler(
    data: web::Data<AppState>,
    query: web::Query<GetTopicsQuery>,
) -> impl Responder {
    match data
        .get_topics_use_case
        .execute(query.into_inner().into_filter())
        .await
    {
        Ok(topics) => {
            let response = topics
                .into_iter()
                .map(TopicItemResponse::from)
                .collect::<Vec<_>>();

            ApiResponse::success(response)
        }

        Err(err) => map_get_topics_error(err),
    }
}

fn map_get_topics_error(err: GetTopicsError) -> HttpResponse {
    match err {
        GetTopicsError::QueryFailed(_) => ApiResponse::internal_error(),
    }
}
