mod create_topic;
mod get_topics;

pub use create_topic::*;
pub use get_topics::*;
