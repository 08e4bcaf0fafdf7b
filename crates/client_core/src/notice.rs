//! User-facing notices produced by the controllers.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    /// Blocked locally before any network call.
    Precondition,
    /// Network exception or non-2xx response from a collaborator.
    Remote,
    /// Fallback data substituted; the workflow keeps going.
    Degraded,
    /// The user dismissed a prompt.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, message)
    }
}
