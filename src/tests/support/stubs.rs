use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::{TokenClaims, TokenError, TokenProvider};
use crate::topic::application::domain::entities::TopicListFilter;
use crate::topic::application::ports::incoming::use_cases::{
    CreateTopicCommand, CreateTopicError, CreateTopicUseCase, GetTopicsError, GetTopicsUseCase,
};
use crate::topic::application::ports::outgoing::{CreatedTopic, TopicSummary};

// ============================================================
// Token Provider
// ============================================================

/// Accepts any bearer token and resolves it to a fixed user.
#[derive(Clone)]
pub struct StubTokenProvider {
    user_id: i64,
    token_type: String,
    reject: bool,
}

impl StubTokenProvider {
    pub fn access(user_id: i64) -> Self {
        Self::with_token_type(user_id, "access")
    }

    pub fn with_token_type(user_id: i64, token_type: &str) -> Self {
        Self {
            user_id,
            token_type: token_type.to_string(),
            reject: false,
        }
    }

    pub fn rejecting() -> Self {
        Self {
            user_id: 0,
            token_type: "access".to_string(),
            reject: true,
        }
    }

    pub fn into_data(self) -> web::Data<Arc<dyn TokenProvider + Send + Sync>> {
        let provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(self);
        web::Data::new(provider)
    }
}

impl TokenProvider for StubTokenProvider {
    fn generate_access_token(&self, user_id: UserId) -> Result<String, TokenError> {
        Ok(format!("stub-token-{}", user_id))
    }

    fn verify_token(&self, _token: &str) -> Result<TokenClaims, TokenError> {
        if self.reject {
            return Err(TokenError::InvalidSignature);
        }

        Ok(TokenClaims {
            sub: self.user_id,
            iss: "feed-topics-api".to_string(),
            exp: 9_999_999_999,
            iat: 0,
            nbf: 0,
            token_type: self.token_type.clone(),
        })
    }
}

// ============================================================
// Topic Use Cases
// ============================================================

/// Returns a canned result and remembers the command it was called with.
#[derive(Clone)]
pub struct StubCreateTopicUseCase {
    result: Result<CreatedTopic, CreateTopicError>,
    last_command: Arc<Mutex<Option<CreateTopicCommand>>>,
}

impl Default for StubCreateTopicUseCase {
    fn default() -> Self {
        Self::success(1)
    }
}

impl StubCreateTopicUseCase {
    pub fn success(id: i64) -> Self {
        Self {
            result: Ok(CreatedTopic { id }),
            last_command: Arc::new(Mutex::new(None)),
        }
    }

    pub fn failure(err: CreateTopicError) -> Self {
        Self {
            result: Err(err),
            last_command: Arc::new(Mutex::new(None)),
        }
    }

    pub fn last_command(&self) -> Option<CreateTopicCommand> {
        self.last_command.lock().unwrap().clone()
    }
}

#[async_trait]
impl CreateTopicUseCase for StubCreateTopicUseCase {
    async fn execute(&self, command: CreateTopicCommand) -> Result<CreatedTopic, CreateTopicError> {
        *self.last_command.lock().unwrap() = Some(command);
        self.result.clone()
    }
}

#[derive(Clone)]
pub struct StubGetTopicsUseCase {
    result: Result<Vec<TopicSummary>, GetTopicsError>,
    last_filter: Arc<Mutex<Option<TopicListFilter>>>,
}

impl Default for StubGetTopicsUseCase {
    fn default() -> Self {
        Self::success(vec![])
    }
}

impl StubGetTopicsUseCase {
    pub fn success(data: Vec<TopicSummary>) -> Self {
        Self {
            result: Ok(data),
            last_filter: Arc::new(Mutex::new(None)),
        }
    }

    pub fn failure(msg: &str) -> Self {
        Self {
            result: Err(GetTopicsError::QueryFailed(msg.into())),
            last_filter: Arc::new(Mutex::new(None)),
        }
    }

    pub fn last_filter(&self) -> Option<TopicListFilter> {
        self.last_filter.lock().unwrap().clone()
    }
}

#[async_trait]
impl GetTopicsUseCase for StubGetTopicsUseCase {
    async fn execute(&self, filter: TopicListFilter) -> Result<Vec<TopicSummary>, GetTopicsError> {
        *self.last_filter.lock().unwrap() = Some(filter);
        self.result.clone()
    }
}
