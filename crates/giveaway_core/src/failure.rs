use std::fmt;

/// Per-title and per-candidate failures. These travel as data on the outcome
/// stream and never abort a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FailureKind {
    SearchFailed,
    FetchFailed,
    ParseFailed,
    MissingUrl,
    CannotJoin,
    EnterFailed,
    CommentFailed,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::SearchFailed => write!(f, "search failed"),
            FailureKind::FetchFailed => write!(f, "fetch failed"),
            FailureKind::ParseFailed => write!(f, "parse failed"),
            FailureKind::MissingUrl => write!(f, "no url"),
            FailureKind::CannotJoin => write!(f, "can't join"),
            FailureKind::EnterFailed => write!(f, "enter failed"),
            FailureKind::CommentFailed => write!(f, "comment failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryError {
    pub kind: FailureKind,
    pub message: String,
}

impl EntryError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

impl std::error::Error for EntryError {}
