use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_error, engine_info};

use crate::lookup::{LookupSettings, MovieLookup, OmdbLookup};
use crate::slot::{run_cancellable, TaskSlot};
use crate::{EngineEvent, LookupError, RequestId};

enum EngineCommand {
    ScheduleSearch { request: RequestId, query: String },
    CancelSearch { request: RequestId },
    FetchDetails { request: RequestId, movie_id: String },
    CancelDetails { request: RequestId },
}

/// Runs lookups on a background tokio runtime and reports back over a channel.
///
/// At most one search and one details lookup are live at a time; scheduling a
/// new one cancels its predecessor, and cancelled lookups report nothing.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: LookupSettings) -> Result<Self, LookupError> {
        let debounce = settings.debounce;
        let lookup = OmdbLookup::new(settings)?;
        Ok(Self::with_lookup(Arc::new(lookup), debounce))
    }

    /// Builds an engine over any lookup backend.
    pub fn with_lookup(lookup: Arc<dyn MovieLookup>, debounce: Duration) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("Failed to start lookup runtime: {}", err);
                    return;
                }
            };
            let mut search_slot = TaskSlot::new();
            let mut details_slot = TaskSlot::new();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::ScheduleSearch { request, query } => {
                        let token = search_slot.replace(request);
                        let lookup = lookup.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let dispatched = event_tx.clone();
                            let outcome = run_cancellable(token, debounce, async move {
                                let _ = dispatched.send(EngineEvent::SearchDispatched { request });
                                engine_info!("Searching request={} query={}", request, query);
                                lookup.search(&query).await
                            })
                            .await;
                            match outcome {
                                Some(result) => {
                                    let _ = event_tx
                                        .send(EngineEvent::SearchCompleted { request, result });
                                }
                                None => engine_debug!("Search request={} cancelled", request),
                            }
                        });
                    }
                    EngineCommand::CancelSearch { request } => {
                        search_slot.cancel(request);
                    }
                    EngineCommand::FetchDetails { request, movie_id } => {
                        let token = details_slot.replace(request);
                        let lookup = lookup.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            engine_info!("Fetching details request={} id={}", request, movie_id);
                            let outcome =
                                run_cancellable(token, Duration::ZERO, lookup.details(&movie_id))
                                    .await;
                            match outcome {
                                Some(result) => {
                                    let _ = event_tx
                                        .send(EngineEvent::DetailsCompleted { request, result });
                                }
                                None => engine_debug!("Details request={} cancelled", request),
                            }
                        });
                    }
                    EngineCommand::CancelDetails { request } => {
                        details_slot.cancel(request);
                    }
                }
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn schedule_search(&self, request: RequestId, query: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::ScheduleSearch {
            request,
            query: query.into(),
        });
    }

    pub fn cancel_search(&self, request: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::CancelSearch { request });
    }

    pub fn fetch_details(&self, request: RequestId, movie_id: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchDetails {
            request,
            movie_id: movie_id.into(),
        });
    }

    pub fn cancel_details(&self, request: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::CancelDetails { request });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}
