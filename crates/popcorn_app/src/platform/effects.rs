use engine_logging::engine_debug;
use popcorn_core::{Effect, LookupFailed, MovieDetail, Msg, SearchResultItem};
use popcorn_engine::{EngineEvent, EngineHandle, KeyValueStore, LookupError, MovieRecord, SearchHit};

use super::persistence;

/// Carries core effects out to the engine and the store, and turns engine
/// events back into messages.
pub(crate) struct EffectRunner {
    engine: EngineHandle,
    store: Box<dyn KeyValueStore>,
}

impl EffectRunner {
    pub(crate) fn new(engine: EngineHandle, store: Box<dyn KeyValueStore>) -> Self {
        Self { engine, store }
    }

    pub(crate) fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ScheduleSearch { request, query } => {
                    engine_debug!("ScheduleSearch request={} query={}", request, query);
                    self.engine.schedule_search(request, query);
                }
                Effect::CancelSearch { request } => self.engine.cancel_search(request),
                Effect::FetchDetails { request, movie_id } => {
                    self.engine.fetch_details(request, movie_id);
                }
                Effect::CancelDetails { request } => self.engine.cancel_details(request),
                Effect::PersistWatched { movies } => {
                    persistence::save_watched(self.store.as_ref(), &movies);
                }
            }
        }
    }

    /// Drains every engine event that is ready without blocking.
    pub(crate) fn poll_messages(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            inbox.push(map_event(event));
        }
        inbox
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SearchDispatched { request } => Msg::SearchDispatched { request },
        EngineEvent::SearchCompleted { request, result } => Msg::SearchCompleted {
            request,
            result: result
                .map(|hits| hits.into_iter().map(map_hit).collect())
                .map_err(lookup_failed),
        },
        EngineEvent::DetailsCompleted { request, result } => Msg::DetailsLoaded {
            request,
            result: result
                .map(map_record)
                .map_err(lookup_failed),
        },
    }
}

fn lookup_failed(err: LookupError) -> LookupFailed {
    LookupFailed::new(err.to_string())
}

fn map_hit(hit: SearchHit) -> SearchResultItem {
    SearchResultItem {
        id: hit.imdb_id,
        title: hit.title,
        year: hit.year,
        poster_url: hit.poster,
    }
}

fn map_record(record: MovieRecord) -> MovieDetail {
    MovieDetail {
        id: record.imdb_id,
        title: record.title,
        poster_url: record.poster,
        released: record.released,
        runtime: record.runtime,
        genre: record.genre,
        imdb_rating: record.imdb_rating,
        plot: record.plot,
        actors: record.actors,
        director: record.director,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use popcorn_core::{update, AppState, WatchedMovie};
    use popcorn_engine::{FailureKind, MemoryStore, MovieLookup};

    use super::*;

    struct CannedLookup;

    #[async_trait::async_trait]
    impl MovieLookup for CannedLookup {
        async fn search(&self, query: &str) -> Result<Vec<SearchHit>, LookupError> {
            Ok(vec![SearchHit {
                imdb_id: "tt0816692".to_string(),
                title: query.to_string(),
                year: "2014".to_string(),
                poster: String::new(),
            }])
        }

        async fn details(&self, imdb_id: &str) -> Result<MovieRecord, LookupError> {
            Ok(MovieRecord {
                imdb_id: imdb_id.to_string(),
                title: "Interstellar".to_string(),
                runtime: "169 min".to_string(),
                imdb_rating: "8.7".to_string(),
                ..MovieRecord::default()
            })
        }
    }

    fn runner() -> EffectRunner {
        let engine = EngineHandle::with_lookup(Arc::new(CannedLookup), Duration::from_millis(20));
        EffectRunner::new(engine, Box::new(MemoryStore::new()))
    }

    /// Feeds engine messages back into `state` until `done` holds or time runs out.
    fn pump(
        runner: &EffectRunner,
        mut state: AppState,
        done: impl Fn(&AppState) -> bool,
    ) -> AppState {
        let deadline = Instant::now() + Duration::from_secs(2);
        while !done(&state) && Instant::now() < deadline {
            for msg in runner.poll_messages() {
                let (next, effects) = update(state, msg);
                state = next;
                runner.run(effects);
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        state
    }

    #[test]
    fn lookup_failure_maps_to_failed_message() {
        let msg = map_event(EngineEvent::SearchCompleted {
            request: 3,
            result: Err(LookupError {
                kind: FailureKind::Rejected {
                    reason: "Movie not found!".to_string(),
                },
                message: "negative response".to_string(),
            }),
        });
        match msg {
            Msg::SearchCompleted { request, result } => {
                assert_eq!(request, 3);
                assert!(result.unwrap_err().reason.contains("Movie not found!"));
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn search_select_rate_and_add_end_to_end() {
        let runner = runner();
        let (state, effects) = update(AppState::new(), Msg::QueryChanged("interstellar".into()));
        runner.run(effects);
        let state = pump(&runner, state, |s| !s.search().results().is_empty());
        assert_eq!(state.search().results()[0].id, "tt0816692");

        let (state, effects) = update(state, Msg::MovieClicked("tt0816692".into()));
        runner.run(effects);
        let state = pump(&runner, state, |s| {
            s.details().detail().is_some() && !s.details().is_loading()
        });

        let (state, effects) = update(state, Msg::RatingPicked(8));
        runner.run(effects);
        let (state, effects) = update(state, Msg::AddClicked);
        runner.run(effects);

        let expected = vec![WatchedMovie {
            id: "tt0816692".to_string(),
            poster_url: String::new(),
            title: "Interstellar".to_string(),
            imdb_rating: Some(8.7),
            runtime_minutes: Some(169),
            user_rating: 8,
        }];
        assert_eq!(state.watched().entries(), expected.as_slice());
        assert_eq!(persistence::load_watched(runner.store.as_ref()), expected);
        assert!(state.selection().is_empty());
    }
}
