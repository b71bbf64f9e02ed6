use giveaway_core::{EntryOutcome, RunEvent};
use tokio::sync::mpsc;

/// Consumer end of a run. Yields outcomes in arrival order, then `Done`, then
/// nothing.
pub struct OutcomeStream {
    rx: mpsc::Receiver<RunEvent>,
    finished: bool,
}

impl OutcomeStream {
    pub(crate) fn new(rx: mpsc::Receiver<RunEvent>) -> Self {
        Self {
            rx,
            finished: false,
        }
    }

    pub async fn next(&mut self) -> Option<RunEvent> {
        if self.finished {
            return None;
        }
        let event = self.rx.recv().await?;
        if event == RunEvent::Done {
            self.finished = true;
            self.rx.close();
        }
        Some(event)
    }

    /// Drain every outcome up to `Done`.
    pub async fn collect(mut self) -> Vec<EntryOutcome> {
        let mut outcomes = Vec::new();
        while let Some(event) = self.next().await {
            if let RunEvent::Outcome(outcome) = event {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
