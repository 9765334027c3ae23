use async_trait::async_trait;

use crate::{
    auth::application::domain::entities::UserId,
    topic::application::ports::outgoing::CreatedTopic,
};

pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 500;

//
// ──────────────────────────────────────────────────────────
// Create Topic Command
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct CreateTopicCommand {
    creator: UserId,
    name: String,
    logo: Option<i64>,
    description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateTopicCommandError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name must not exceed 100 characters")]
    NameTooLong,

    #[error("Description must not exceed 500 characters")]
    DescriptionTooLong,

    #[error("Logo must reference a valid attachment id")]
    InvalidLogo,
}

impl CreateTopicCommand {
    pub fn new(
        creator: UserId,
        name: String,
        logo: Option<i64>,
        description: Option<String>,
    ) -> Result<Self, CreateTopicCommandError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(CreateTopicCommandError::EmptyName);
        }

        if name.chars().count() > MAX_NAME_CHARS {
            return Err(CreateTopicCommandError::NameTooLong);
        }

        if logo.is_some_and(|id| id <= 0) {
            return Err(CreateTopicCommandError::InvalidLogo);
        }

        let description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        if description
            .as_ref()
            .is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_CHARS)
        {
            return Err(CreateTopicCommandError::DescriptionTooLong);
        }

        Ok(Self {
            creator,
            name: name.to_string(),
            logo,
            description,
        })
    }

    pub fn creator(&self) -> UserId {
        self.creator
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn logo(&self) -> Option<i64> {
        self.logo
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

//
// ──────────────────────────────────────────────────────────
// Use Case Error
// ──────────────────────────────────────────────────────────
//

/// Coarse failure class, used to pick the transport status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    Conflict,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateTopicError {
    #[error("Logo attachment {0} not found")]
    LogoNotFound(i64),

    #[error("Logo attachment {0} is not usable")]
    LogoNotUsable(i64),

    #[error("Topic \"{0}\" already exists")]
    NameTaken(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl CreateTopicError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CreateTopicError::LogoNotFound(_) => ErrorKind::NotFound,
            CreateTopicError::LogoNotUsable(_) => ErrorKind::InvalidInput,
            CreateTopicError::NameTaken(_) => ErrorKind::Conflict,
            CreateTopicError::RepositoryError(_) => ErrorKind::Internal,
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Incoming Port (Use Case)
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait CreateTopicUseCase: Send + Sync {
    async fn execute(&self, command: CreateTopicCommand) -> Result<CreatedTopic, CreateTopicError>;
}
