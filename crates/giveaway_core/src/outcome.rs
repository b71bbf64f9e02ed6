use crate::{EligibilityVerdict, EntryError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeKind {
    Entered { comment: String },
    Skipped { verdict: EligibilityVerdict },
    Failed(EntryError),
}

/// The unit placed on the outcome stream for one candidate (or one failed search).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOutcome {
    pub title: String,
    /// `None` when the failure happened before a giveaway URL was known.
    pub url: Option<String>,
    pub kind: OutcomeKind,
}

impl EntryOutcome {
    pub fn entered(title: impl Into<String>, url: impl Into<String>, comment: String) -> Self {
        Self {
            title: title.into(),
            url: Some(url.into()),
            kind: OutcomeKind::Entered { comment },
        }
    }

    pub fn skipped(
        title: impl Into<String>,
        url: impl Into<String>,
        verdict: EligibilityVerdict,
    ) -> Self {
        Self {
            title: title.into(),
            url: Some(url.into()),
            kind: OutcomeKind::Skipped { verdict },
        }
    }

    pub fn failed(title: impl Into<String>, url: Option<String>, error: EntryError) -> Self {
        Self {
            title: title.into(),
            url,
            kind: OutcomeKind::Failed(error),
        }
    }

    pub fn comment(&self) -> Option<&str> {
        match &self.kind {
            OutcomeKind::Entered { comment } => Some(comment),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&EntryError> {
        match &self.kind {
            OutcomeKind::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.kind, OutcomeKind::Entered { .. })
    }
}

/// Element of the outcome stream. `Done` is published once, after every
/// search task has finished, and is always the last element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    Outcome(EntryOutcome),
    Done,
}
