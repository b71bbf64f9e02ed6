use std::sync::Arc;

use agent_logging::{agent_debug, agent_info, agent_warn};
use giveaway_core::{
    CommentPool, EligibilityVerdict, EntryError, EntryOutcome, FailureKind, GiveawayCandidate,
    SkipReporting, Stage,
};
use url::Url;

use crate::form::FormBody;
use crate::{Transport, TransportError, TransportFailure};

/// Where a candidate's walk ended when nothing failed.
enum Finish {
    Entered { comment: String },
    Skipped(EligibilityVerdict),
}

/// Drives one candidate through fetch, classify, enter and comment.
pub struct GiveawayProcessor {
    transport: Arc<dyn Transport>,
    comments: CommentPool,
    skip_reporting: SkipReporting,
}

impl GiveawayProcessor {
    pub fn new(
        transport: Arc<dyn Transport>,
        comments: CommentPool,
        skip_reporting: SkipReporting,
    ) -> Self {
        Self {
            transport,
            comments,
            skip_reporting,
        }
    }

    /// Returns the outcome to publish, or `None` for a contributor-only
    /// giveaway under [`SkipReporting::Silent`].
    pub async fn process(
        &self,
        title: &str,
        candidate: &GiveawayCandidate,
    ) -> Option<EntryOutcome> {
        let url = match self.transport.resolve(&candidate.href) {
            Ok(url) => url,
            Err(err) => {
                return Some(EntryOutcome::failed(
                    title,
                    Some(candidate.href.clone()),
                    EntryError::new(FailureKind::FetchFailed, err.to_string()),
                ));
            }
        };

        match self.walk(&url).await {
            Ok(Finish::Entered { comment }) => {
                agent_info!("Entered {} ({})", url, title);
                Some(EntryOutcome::entered(title, url, comment))
            }
            Ok(Finish::Skipped(verdict)) => match self.skip_reporting {
                SkipReporting::Silent => None,
                SkipReporting::Report => Some(EntryOutcome::skipped(title, url, verdict)),
            },
            Err(error) => {
                agent_warn!("{} ({}): {}", url, title, error);
                Some(EntryOutcome::failed(title, Some(url.into()), error))
            }
        }
    }

    async fn walk(&self, url: &Url) -> Result<Finish, EntryError> {
        trace_stage(url, Stage::Fetching);
        let page = self
            .transport
            .fetch_document(url)
            .await
            .map_err(fetch_error)?;

        trace_stage(url, Stage::Classifying);
        match page.eligibility() {
            EligibilityVerdict::Enterable => {}
            EligibilityVerdict::ContributorOnly => {
                agent_debug!("{} is contributor only, not entering", url);
                return Ok(Finish::Skipped(EligibilityVerdict::ContributorOnly));
            }
            EligibilityVerdict::NotEnterable => {
                return Err(EntryError::new(FailureKind::CannotJoin, ""));
            }
        }

        trace_stage(url, Stage::Entering);
        let form_key = self
            .transport
            .form_key()
            .await
            .map_err(|err| EntryError::new(FailureKind::EnterFailed, err.to_string()))?;
        let entry = FormBody::new()
            .field("enter_giveaway", "1")
            .field("form_key", form_key.as_str());
        self.transport
            .submit_form(url, entry)
            .await
            .map_err(|err| EntryError::new(FailureKind::EnterFailed, err.to_string()))?;

        // The entry stands even if commenting fails below.
        trace_stage(url, Stage::Commenting);
        let comment = self.comments.pick().to_string();
        let reply = FormBody::new()
            .field("submit_comment", "Submit Comment")
            .field("parent_id", "0")
            .field("form_key", form_key)
            .field("body", comment.as_str());
        self.transport
            .submit_form(url, reply)
            .await
            .map_err(|err| EntryError::new(FailureKind::CommentFailed, err.to_string()))?;

        trace_stage(url, Stage::Done);
        Ok(Finish::Entered { comment })
    }
}

fn trace_stage(url: &Url, stage: Stage) {
    agent_debug!("{} stage={:?}", url, stage);
}

fn fetch_error(err: TransportError) -> EntryError {
    let kind = match err.kind {
        TransportFailure::Decode => FailureKind::ParseFailed,
        _ => FailureKind::FetchFailed,
    };
    EntryError::new(kind, err.to_string())
}
