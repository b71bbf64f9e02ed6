use std::fmt;

/// Classification of a giveaway page, derived from the markers on its entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EligibilityVerdict {
    Enterable,
    ContributorOnly,
    NotEnterable,
}

impl fmt::Display for EligibilityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EligibilityVerdict::Enterable => write!(f, "enterable"),
            EligibilityVerdict::ContributorOnly => write!(f, "contributor only"),
            EligibilityVerdict::NotEnterable => write!(f, "not enterable"),
        }
    }
}

/// Where a single candidate is in its fetch → classify → enter → comment walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Classifying,
    Entering,
    Commenting,
    Done,
}

/// What to publish for a contributor-only giveaway. The agent never enters
/// one either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkipReporting {
    /// Publish nothing; the candidate is indistinguishable from one never found.
    #[default]
    Silent,
    /// Publish an [`OutcomeKind::Skipped`](crate::OutcomeKind::Skipped) outcome.
    Report,
}
