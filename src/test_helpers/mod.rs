use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement, TransactionTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::application::ports::outgoing::TokenClaims;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    environment: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    token: String,
}

#[derive(Serialize)]
pub struct SeededResponse {
    id: i64,
}

#[derive(Serialize)]
pub struct CleanupResponse {
    deleted_users: u64,
}

#[derive(Deserialize)]
pub struct SeedUserRequest {
    name: String,
}

#[derive(Deserialize)]
pub struct SeedAttachmentRequest {
    user_id: i64,
    media_id: Option<i64>,
}

#[derive(Debug)]
enum TokenKind {
    Valid,
    Expired,
    NotYetValid,
    InvalidSignature,
    Malformed,
}

impl std::str::FromStr for TokenKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Valid" => Ok(TokenKind::Valid),
            "Expired" => Ok(TokenKind::Expired),
            "NotYetValid" => Ok(TokenKind::NotYetValid),
            "InvalidSignature" => Ok(TokenKind::InvalidSignature),
            "Malformed" => Ok(TokenKind::Malformed),
            _ => Err(format!("Unknown token_kind: {}", s)),
        }
    }
}

fn internal(context: &str, e: impl std::fmt::Display) -> actix_web::Error {
    actix_web::error::ErrorInternalServerError(format!("{}: {}", context, e))
}

/// Health check for test helpers
/// GET /test/health
pub async fn health_check() -> Result<HttpResponse> {
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    if env == "production" {
        tracing::error!("Test helper routes active in production!");
        return Ok(HttpResponse::InternalServerError().json(serde_json::json!({
            "status": "error",
            "reason": "test-helper-running-in-production"
        })));
    }

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        environment: env,
    }))
}

/// Builds claims and the signing secret for the requested token state.
/// Returns `None` for `Malformed`, which is not a JWT at all.
fn test_claims(
    kind: &TokenKind,
    user_id: i64,
    issuer: &str,
    secret: &str,
    now: i64,
) -> Option<(TokenClaims, String)> {
    let claims = |iat: i64, nbf: i64, exp: i64| TokenClaims {
        sub: user_id,
        iss: issuer.to_string(),
        exp,
        iat,
        nbf,
        token_type: "access".to_string(),
    };

    match kind {
        TokenKind::Valid => Some((claims(now, now - 32, now + 3600), secret.to_string())),
        // expired 60 seconds ago
        TokenKind::Expired => Some((claims(now - 7200, now - 7200, now - 60), secret.to_string())),
        // beyond the 30 second leeway
        TokenKind::NotYetValid => Some((claims(now, now + 300, now + 3600), secret.to_string())),
        TokenKind::InvalidSignature => {
            Some((claims(now, now, now + 3600), "wrong-secret".to_string()))
        }
        TokenKind::Malformed => None,
    }
}

/// Generate test JWT access tokens in various states
/// GET /test/token/{token_kind}/{user_id}
pub async fn generate_test_token(path: web::Path<(String, i64)>) -> Result<HttpResponse> {
    let (token_kind_str, user_id) = path.into_inner();

    let token_kind: TokenKind = token_kind_str
        .parse()
        .map_err(|e: String| actix_web::error::ErrorBadRequest(e))?;

    tracing::debug!(
        "Generating test token - Kind: {:?}, User ID: {}",
        token_kind,
        user_id
    );

    // Must match the running service's config
    let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| "test-secret".to_string());
    let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| "feed-topics-api".to_string());
    let now = Utc::now().timestamp();

    let Some((claims, secret)) = test_claims(&token_kind, user_id, &issuer, &secret, now) else {
        return Ok(HttpResponse::Ok().json(TokenResponse {
            token: format!("malformed.{}.token", now),
        }));
    };

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let token = encode(&Header::new(Algorithm::HS256), &claims, &encoding_key)
        .map_err(|e| internal("Token encoding error", e))?;

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// Insert a user row to own topics and attachments
/// POST /test/users
pub async fn seed_user(
    payload: web::Json<SeedUserRequest>,
    db: web::Data<Arc<DatabaseConnection>>,
) -> Result<HttpResponse> {
    let row = db
        .as_ref()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "INSERT INTO users (name) VALUES ($1) RETURNING id",
            vec![payload.name.clone().into()],
        ))
        .await
        .map_err(|e| internal("Failed to insert user", e))?
        .ok_or_else(|| internal("Failed to insert user", "no row returned"))?;

    let id: i64 = row
        .try_get("", "id")
        .map_err(|e| internal("Failed to read user id", e))?;

    Ok(HttpResponse::Created().json(SeededResponse { id }))
}

/// Insert an unclaimed media attachment
/// POST /test/attachments
pub async fn seed_attachment(
    payload: web::Json<SeedAttachmentRequest>,
    db: web::Data<Arc<DatabaseConnection>>,
) -> Result<HttpResponse> {
    let media_id = payload.media_id.unwrap_or_else(|| Utc::now().timestamp_millis());

    let row = db
        .as_ref()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"
            INSERT INTO media_attachments (media_id, user_id, channel, raw_reference_id)
            VALUES ($1, $2, NULL, NULL)
            RETURNING id
            "#,
            vec![media_id.into(), payload.user_id.into()],
        ))
        .await
        .map_err(|e| internal("Failed to insert attachment", e))?
        .ok_or_else(|| internal("Failed to insert attachment", "no row returned"))?;

    let id: i64 = row
        .try_get("", "id")
        .map_err(|e| internal("Failed to read attachment id", e))?;

    Ok(HttpResponse::Created().json(SeededResponse { id }))
}

/// Cleanup test data for a user; topics, follows and attachments cascade
/// DELETE /test/cleanup/all/{user_id}
pub async fn cleanup_test_user(
    user_id: web::Path<i64>,
    db: web::Data<Arc<DatabaseConnection>>,
) -> Result<HttpResponse> {
    let user_id = user_id.into_inner();

    let txn = db
        .as_ref()
        .begin()
        .await
        .map_err(|e| internal("Transaction error", e))?;

    let user_result = txn
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            "DELETE FROM users WHERE id = $1",
            vec![user_id.into()],
        ))
        .await
        .map_err(|e| internal("Failed to delete user", e))?;

    if user_result.rows_affected() == 0 {
        txn.rollback().await.ok();
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": "User not found"
        })));
    }

    txn.commit()
        .await
        .map_err(|e| internal("Commit failed", e))?;

    Ok(HttpResponse::Ok().json(CleanupResponse {
        deleted_users: user_result.rows_affected(),
    }))
}

/// Configure test helper routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/test")
            .route("/health", web::get().to(health_check))
            .route("/token/{token_kind}/{user_id}", web::get().to(generate_test_token))
            .route("/users", web::post().to(seed_user))
            .route("/attachments", web::post().to(seed_attachment))
            .route(
                "/cleanup/all/{user_id}",
                web::delete().to(cleanup_test_user),
            ),
    );
}
