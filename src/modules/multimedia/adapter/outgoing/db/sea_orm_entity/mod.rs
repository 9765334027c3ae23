pub mod media_attachments;
