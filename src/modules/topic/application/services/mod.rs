mod create_topic_service;
mod get_topics_service;

pub use create_topic_service::CreateTopicService;
pub use get_topics_service::GetTopicsService;
