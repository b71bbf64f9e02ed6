use giveaway_core::{EntryOutcome, OutcomeKind, RunTally};

/// `"{title}: {url} - {detail}"`, with an empty url when none is known.
pub fn outcome_line(outcome: &EntryOutcome) -> String {
    let url = outcome.url.as_deref().unwrap_or("");
    let detail = match &outcome.kind {
        OutcomeKind::Entered { comment } => comment.clone(),
        OutcomeKind::Skipped { verdict } => format!("skipped ({verdict})"),
        OutcomeKind::Failed(error) => error.to_string(),
    };
    format!("{}: {} - {}", outcome.title, url, detail)
}

pub fn summary_line(tally: &RunTally) -> String {
    let mut line = format!(
        "entered {}, skipped {}, failed {}",
        tally.entered,
        tally.skipped,
        tally.failed_total()
    );
    if !tally.failed.is_empty() {
        let breakdown: Vec<String> = tally
            .failed
            .iter()
            .map(|(kind, count)| format!("{kind} {count}"))
            .collect();
        line.push_str(&format!(" ({})", breakdown.join(", ")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use giveaway_core::{EligibilityVerdict, EntryError, FailureKind, RunEvent};

    #[test]
    fn renders_each_outcome_kind() {
        let entered = EntryOutcome::entered("Braid", "http://sg/giveaway/a/", "Thanks!".into());
        assert_eq!(outcome_line(&entered), "Braid: http://sg/giveaway/a/ - Thanks!");

        let skipped = EntryOutcome::skipped(
            "Braid",
            "http://sg/giveaway/b/",
            EligibilityVerdict::ContributorOnly,
        );
        assert_eq!(
            outcome_line(&skipped),
            "Braid: http://sg/giveaway/b/ - skipped (contributor only)"
        );

        let failed = EntryOutcome::failed(
            "Braid",
            None,
            EntryError::new(FailureKind::SearchFailed, "http status 500"),
        );
        assert_eq!(outcome_line(&failed), "Braid:  - search failed: http status 500");
    }

    #[test]
    fn summary_lists_failures_by_kind() {
        let mut tally = RunTally::new();
        tally.apply(&RunEvent::Outcome(EntryOutcome::entered("a", "u", "c".into())));
        for kind in [FailureKind::CannotJoin, FailureKind::CannotJoin, FailureKind::SearchFailed] {
            tally.apply(&RunEvent::Outcome(EntryOutcome::failed(
                "a",
                None,
                EntryError::new(kind, ""),
            )));
        }
        tally.apply(&RunEvent::Done);

        assert_eq!(
            summary_line(&tally),
            "entered 1, skipped 0, failed 3 (search failed 1, can't join 2)"
        );
    }
}
