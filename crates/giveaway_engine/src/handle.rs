use std::sync::{mpsc, Arc};
use std::thread;

use agent_logging::{agent_error, agent_info};
use giveaway_core::CommentPool;

use crate::session::Credentials;
use crate::{
    DispatchSettings, EngineEvent, OutcomeStream, ReqwestTransport, RunError, SearchDispatcher,
    SiteSettings,
};

/// Everything one run needs, built by the caller at startup.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub site: SiteSettings,
    pub credentials: Credentials,
    pub dispatch: DispatchSettings,
    pub titles: Vec<String>,
    pub comments: CommentPool,
}

/// Establish the session, then dispatch every title.
///
/// A session failure is returned before any search request is made.
pub async fn start_run(config: RunConfig) -> Result<OutcomeStream, RunError> {
    let transport =
        ReqwestTransport::new(config.site, config.credentials).map_err(RunError::Site)?;
    transport.establish().await?;

    let dispatcher = SearchDispatcher::new(Arc::new(transport), config.comments, config.dispatch);
    agent_info!("Searching {} title(s)", config.titles.len());
    Ok(dispatcher.run(config.titles))
}

/// Blocking front for callers without an async runtime of their own.
///
/// Events are handed over through a zero-capacity channel, so the engine
/// never runs ahead of the consumer.
pub struct EngineHandle {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn start(config: RunConfig) -> Self {
        let (event_tx, event_rx) = mpsc::sync_channel(0);

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    let error = RunError::Runtime(err.to_string());
                    let _ = event_tx.send(EngineEvent::Aborted(error));
                    return;
                }
            };
            runtime.block_on(forward(config, event_tx));
        });

        Self { event_rx }
    }

    /// Next event; `None` once the engine thread has finished.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }
}

// Runs under `block_on` on the engine thread, so the blocking rendezvous
// sends below stall only this thread, never a runtime worker.
async fn forward(config: RunConfig, event_tx: mpsc::SyncSender<EngineEvent>) {
    let mut stream = match start_run(config).await {
        Ok(stream) => stream,
        Err(err) => {
            agent_error!("Run aborted: {}", err);
            let _ = event_tx.send(EngineEvent::Aborted(err));
            return;
        }
    };
    if event_tx.send(EngineEvent::SessionReady).is_err() {
        return;
    }
    while let Some(event) = stream.next().await {
        if event_tx.send(EngineEvent::Run(event)).is_err() {
            break;
        }
    }
}
