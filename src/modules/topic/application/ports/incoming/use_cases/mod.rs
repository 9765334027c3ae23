mod create_topic_use_case;
mod get_topics_use_case;

pub use create_topic_use_case::{
    CreateTopicCommand, CreateTopicCommandError, CreateTopicError, CreateTopicUseCase, ErrorKind,
    MAX_DESCRIPTION_CHARS, MAX_NAME_CHARS,
};
pub use get_topics_use_case::{GetTopicsError, GetTopicsUseCase};
