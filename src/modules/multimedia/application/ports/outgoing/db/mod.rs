mod attachment_query;

pub use attachment_query::{AttachmentQuery, AttachmentQueryError};
