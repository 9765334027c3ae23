mod attachment_guard;

pub use attachment_guard::{AttachmentGuard, AttachmentGuardError};
