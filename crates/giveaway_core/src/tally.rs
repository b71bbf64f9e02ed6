use std::collections::BTreeMap;

use crate::{FailureKind, OutcomeKind, RunEvent};

/// Running summary of an outcome stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunTally {
    pub entered: usize,
    pub skipped: usize,
    pub failed: BTreeMap<FailureKind, usize>,
    pub done: bool,
    /// Events observed after `Done`. Always zero for a well-formed stream.
    pub late: usize,
}

impl RunTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &RunEvent) {
        if self.done {
            self.late += 1;
            return;
        }
        match event {
            RunEvent::Done => self.done = true,
            RunEvent::Outcome(outcome) => match &outcome.kind {
                OutcomeKind::Entered { .. } => self.entered += 1,
                OutcomeKind::Skipped { .. } => self.skipped += 1,
                OutcomeKind::Failed(error) => *self.failed.entry(error.kind).or_default() += 1,
            },
        }
    }

    pub fn failed_total(&self) -> usize {
        self.failed.values().sum()
    }

    pub fn outcomes(&self) -> usize {
        self.entered + self.skipped + self.failed_total()
    }

    pub fn failed_of(&self, kind: FailureKind) -> usize {
        self.failed.get(&kind).copied().unwrap_or(0)
    }
}
