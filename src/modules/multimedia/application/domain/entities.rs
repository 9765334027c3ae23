use std::fmt;

use crate::auth::application::domain::entities::UserId;

/// Entity kinds that can own a media attachment.
///
/// The tag is what gets written to `media_attachments.channel` when an
/// attachment is claimed, so it must stay stable once data exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachableKind {
    Topic,
    Feed,
    Comment,
    User,
}

impl AttachableKind {
    pub const ALL: [AttachableKind; 4] = [
        AttachableKind::Topic,
        AttachableKind::Feed,
        AttachableKind::Comment,
        AttachableKind::User,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            AttachableKind::Topic => "Topic",
            AttachableKind::Feed => "Feed",
            AttachableKind::Comment => "Comment",
            AttachableKind::User => "User",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for AttachableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Metadata row of an uploaded file. The file itself is opaque here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAttachment {
    pub id: i64,
    pub media_id: i64,
    pub owner: UserId,
    pub channel: Option<String>,
    pub raw_reference_id: Option<i64>,
}

impl MediaAttachment {
    /// An attachment is claimed once any entity has taken it over, i.e. it has a
    /// non-empty channel or a non-zero owning reference.
    pub fn is_claimed(&self) -> bool {
        let has_channel = self.channel.as_deref().is_some_and(|c| !c.is_empty());
        let has_reference = self.raw_reference_id.is_some_and(|id| id != 0);

        has_channel || has_reference
    }

    pub fn claimed_by(&self) -> Option<AttachableKind> {
        self.channel.as_deref().and_then(AttachableKind::from_tag)
    }
}
