//! Giveaway core: pure data model for a search-and-enter run.
mod candidate;
mod comments;
mod failure;
mod outcome;
mod tally;
mod verdict;

pub use candidate::GiveawayCandidate;
pub use comments::{CommentPool, EmptyCommentPool};
pub use failure::{EntryError, FailureKind};
pub use outcome::{EntryOutcome, OutcomeKind, RunEvent};
pub use tally::RunTally;
pub use verdict::{EligibilityVerdict, SkipReporting, Stage};
