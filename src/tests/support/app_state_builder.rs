use crate::tests::support::stubs::*;
use crate::topic::application::ports::incoming::use_cases::{
    CreateTopicUseCase, GetTopicsUseCase,
};
use crate::AppState;
use actix_web::web;
use std::sync::Arc;

pub struct TestAppStateBuilder {
    create_topic: Option<Arc<dyn CreateTopicUseCase + Send + Sync>>,
    get_topics: Option<Arc<dyn GetTopicsUseCase + Send + Sync>>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            create_topic: Some(Arc::new(StubCreateTopicUseCase::default())),
            get_topics: Some(Arc::new(StubGetTopicsUseCase::default())),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_create_topic(
        mut self,
        uc: impl CreateTopicUseCase + Send + Sync + 'static,
    ) -> Self {
        self.create_topic = Some(Arc::new(uc));
        self
    }

    pub fn with_get_topics(mut self, uc: impl GetTopicsUseCase + Send + Sync + 'static) -> Self {
        self.get_topics = Some(Arc::new(uc));
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            create_topic_use_case: self.create_topic.unwrap(),
            get_topics_use_case: self.get_topics.unwrap(),
        })
    }
}
