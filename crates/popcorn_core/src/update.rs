use engine_logging::{engine_debug, engine_warn};

use crate::{AppState, Effect, Msg, WatchedList};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::QueryChanged(query) => {
            if query == state.search().query() {
                return (state, Vec::new());
            }
            state.search_mut().set_query(query);
            state.mark_dirty();

            let mut effects = Vec::with_capacity(2);
            if let Some(request) = state.search_mut().take_live_request() {
                effects.push(Effect::CancelSearch { request });
            }
            match state.search().lookup_query().map(ToOwned::to_owned) {
                Some(query) => {
                    let request = state.allocate_request();
                    state.search_mut().begin_debounce(request);
                    effects.push(Effect::ScheduleSearch { request, query });
                }
                None => {
                    state.search_mut().clear_results();
                }
            }
            effects
        }
        Msg::SearchDispatched { request } => {
            if state.search_mut().mark_dispatched(request) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SearchCompleted { request, result } => {
            if !state.search_mut().settle(request) {
                engine_debug!("Discarding search result for stale request {}", request);
                return (state, Vec::new());
            }
            // A failure keeps whatever was on screen.
            match result {
                Ok(results) => state.search_mut().replace_results(results),
                Err(failed) => engine_warn!("Search request={} failed: {}", request, failed.reason),
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::MovieClicked(id) => {
            if id != state.selection().id && !id.is_empty() && !state.is_known_movie(&id) {
                engine_debug!("Ignoring click on unknown movie {}", id);
                return (state, Vec::new());
            }
            select_movie(&mut state, &id)
        }
        Msg::BackClicked => clear_selection(&mut state),
        Msg::RatingPicked(rating) => {
            if !state.selection().is_empty() && state.details_mut().pick_rating(rating) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::AddClicked => {
            if !state.details().can_add(state.selection()) {
                return (state, Vec::new());
            }
            let movie = match state.details().detail() {
                Some(detail) => detail.to_watched(state.details().rating()),
                None => return (state, Vec::new()),
            };
            let mut effects = Vec::new();
            if state.watched_mut().add(movie) {
                effects.push(persist(state.watched()));
            }
            effects.extend(clear_selection(&mut state));
            state.mark_dirty();
            effects
        }
        Msg::RemoveClicked(id) => {
            if state.watched_mut().remove(&id) {
                state.mark_dirty();
                vec![persist(state.watched())]
            } else {
                Vec::new()
            }
        }
        Msg::DetailsLoaded { request, result } => {
            let (detail, failure) = match result {
                Ok(detail) => (Some(detail), None),
                Err(failed) => (None, Some(failed)),
            };
            if !state.details_mut().finish(request, detail) {
                engine_debug!("Discarding details for stale request {}", request);
                return (state, Vec::new());
            }
            if let Some(failed) = failure {
                engine_warn!("Details lookup request={} failed: {}", request, failed.reason);
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::RestoreWatched(movies) => {
            *state.watched_mut() = WatchedList::from_entries(movies);
            state.mark_dirty();
            Vec::new()
        }
    };

    (state, effects)
}

/// Applies the toggle rule and (re)starts the details lookup when the open movie changes.
fn select_movie(state: &mut AppState, id: &str) -> Vec<Effect> {
    let previous_id = state.selection().id.clone();
    state.select(id);

    if state.selection().id == previous_id {
        return Vec::new();
    }
    state.mark_dirty();
    if state.selection().is_empty() {
        return clear_selection(state);
    }

    let request = state.allocate_request();
    let seeded = state.selection().user_rating;
    let mut effects = Vec::with_capacity(2);
    if let Some(previous) = state.details_mut().begin(request, seeded) {
        effects.push(Effect::CancelDetails { request: previous });
    }
    effects.push(Effect::FetchDetails {
        request,
        movie_id: state.selection().id.clone(),
    });
    effects
}

fn clear_selection(state: &mut AppState) -> Vec<Effect> {
    let was_open = !state.selection().is_empty();
    state.selection_mut().clear();
    let in_flight = state.details_mut().reset();
    if was_open {
        state.mark_dirty();
    }
    in_flight
        .map(|request| vec![Effect::CancelDetails { request }])
        .unwrap_or_default()
}

fn persist(watched: &WatchedList) -> Effect {
    Effect::PersistWatched {
        movies: watched.entries().to_vec(),
    }
}
