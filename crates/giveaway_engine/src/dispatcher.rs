use std::sync::Arc;

use agent_logging::{agent_debug, agent_error, agent_info, agent_warn};
use giveaway_core::{CommentPool, EntryError, EntryOutcome, FailureKind, RunEvent};
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

use crate::{DispatchSettings, GiveawayProcessor, OutcomeStream, Transport};

/// Title label used for outcomes found through the homepage scan.
pub const HOMEPAGE_TITLE: &str = "homepage";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Listing {
    Search(String),
    Homepage,
}

impl Listing {
    fn title(&self) -> &str {
        match self {
            Listing::Search(title) => title,
            Listing::Homepage => HOMEPAGE_TITLE,
        }
    }
}

/// Fans a run out into one task per title and publishes every outcome onto a
/// single [`OutcomeStream`].
pub struct SearchDispatcher {
    transport: Arc<dyn Transport>,
    processor: Arc<GiveawayProcessor>,
    settings: DispatchSettings,
}

impl SearchDispatcher {
    pub fn new(
        transport: Arc<dyn Transport>,
        comments: CommentPool,
        settings: DispatchSettings,
    ) -> Self {
        let processor = Arc::new(GiveawayProcessor::new(
            transport.clone(),
            comments,
            settings.skip_reporting,
        ));
        Self {
            transport,
            processor,
            settings,
        }
    }

    /// Start the run on the current tokio runtime.
    ///
    /// The returned stream ends with exactly one [`RunEvent::Done`], sent only
    /// after every title task has finished.
    pub fn run(&self, titles: Vec<String>) -> OutcomeStream {
        let (tx, rx) = mpsc::channel(self.settings.stream_capacity.max(1));

        let mut listings: Vec<Listing> = titles.into_iter().map(Listing::Search).collect();
        if self.settings.include_homepage {
            listings.push(Listing::Homepage);
        }

        let transport = self.transport.clone();
        let processor = self.processor.clone();
        let limit = self.settings.max_concurrent_titles;
        tokio::spawn(async move {
            dispatch(transport, processor, listings, limit, tx).await;
        });

        OutcomeStream::new(rx)
    }
}

async fn dispatch(
    transport: Arc<dyn Transport>,
    processor: Arc<GiveawayProcessor>,
    listings: Vec<Listing>,
    limit: Option<usize>,
    tx: mpsc::Sender<RunEvent>,
) {
    let semaphore = limit.map(|permits| Arc::new(Semaphore::new(permits.max(1))));
    let mut tasks = JoinSet::new();

    for listing in listings {
        let transport = transport.clone();
        let processor = processor.clone();
        let semaphore = semaphore.clone();
        let tx = tx.clone();
        tasks.spawn(async move {
            let _permit = match semaphore {
                Some(semaphore) => semaphore.acquire_owned().await.ok(),
                None => None,
            };
            scan_listing(transport.as_ref(), &processor, &listing, &tx).await;
        });
    }

    let spawned = tasks.len();
    agent_info!("Dispatched {} listing task(s)", spawned);

    // Join barrier: Done goes out only once every task has been reaped.
    while let Some(joined) = tasks.join_next().await {
        if let Err(err) = joined {
            agent_error!("Listing task ended abnormally: {}", err);
        }
    }

    agent_info!("All {} listing task(s) finished", spawned);
    if tx.send(RunEvent::Done).await.is_err() {
        agent_warn!("Outcome stream dropped before completion");
    }
}

async fn scan_listing(
    transport: &dyn Transport,
    processor: &GiveawayProcessor,
    listing: &Listing,
    tx: &mpsc::Sender<RunEvent>,
) {
    let title = listing.title();
    let page = match listing {
        Listing::Search(query) => transport.search(query).await,
        Listing::Homepage => transport.homepage().await,
    };
    let page = match page {
        Ok(page) => page,
        Err(err) => {
            agent_warn!("Search for {:?} failed: {}", title, err);
            let error = EntryError::new(FailureKind::SearchFailed, err.to_string());
            publish(tx, EntryOutcome::failed(title, None, error)).await;
            return;
        }
    };

    let candidates = page.candidates();
    agent_debug!("{:?}: {} candidate(s)", title, candidates.len());

    for candidate in candidates {
        let outcome = match candidate {
            Ok(candidate) => processor.process(title, &candidate).await,
            Err(error) => Some(EntryOutcome::failed(title, None, error)),
        };
        if let Some(outcome) = outcome {
            if !publish(tx, outcome).await {
                return;
            }
        }
    }
}

/// Returns `false` once the consumer has gone away.
async fn publish(tx: &mpsc::Sender<RunEvent>, outcome: EntryOutcome) -> bool {
    tx.send(RunEvent::Outcome(outcome)).await.is_ok()
}
