//! Keyboard handling. Pure so it can be exercised without a terminal.

use popcorn_core::{AppViewModel, Msg, MAX_RATING};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Search,
    Results,
    Watched,
}

/// UI-only state: which panel has the keyboard and where each list cursor sits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UiState {
    pub focus: Focus,
    pub results_cursor: usize,
    pub watched_cursor: usize,
    /// Collapsed panels keep only their title bar, like the `–`/`+` toggle on a box.
    pub results_collapsed: bool,
    pub watched_collapsed: bool,
    pub should_quit: bool,
}

impl UiState {
    /// Keeps cursors inside their lists and focus off hidden panels.
    pub fn clamp_to(&mut self, view: &AppViewModel) {
        self.results_cursor = self.results_cursor.min(view.results.len().saturating_sub(1));
        self.watched_cursor = self.watched_cursor.min(view.watched.len().saturating_sub(1));
        if self.focus == Focus::Watched && view.details.is_some() {
            self.focus = Focus::Results;
        }
    }
}

/// Applies `key` to the UI state and returns the message it stands for, if any.
pub fn handle_key(key: KeyEvent, ui: &mut UiState, view: &AppViewModel) -> Option<Msg> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        ui.should_quit = true;
        return None;
    }

    let details_open = view.details.is_some();
    match key.code {
        KeyCode::Tab => {
            ui.focus = next_focus(ui.focus, details_open);
            return None;
        }
        KeyCode::BackTab => {
            ui.focus = previous_focus(ui.focus, details_open);
            return None;
        }
        KeyCode::Esc if details_open => return Some(Msg::BackClicked),
        _ => {}
    }

    if ui.focus == Focus::Search {
        return edit_query(key, view);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            let cursor = cursor_mut(ui);
            *cursor = cursor.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let len = focused_len(ui.focus, view);
            let cursor = cursor_mut(ui);
            if *cursor + 1 < len {
                *cursor += 1;
            }
            None
        }
        KeyCode::Char('-') | KeyCode::Char('+') => {
            toggle_collapsed(ui);
            None
        }
        KeyCode::Enter => highlighted_id(ui, view).map(Msg::MovieClicked),
        KeyCode::Char('d') | KeyCode::Delete if ui.focus == Focus::Watched => {
            highlighted_id(ui, view).map(Msg::RemoveClicked)
        }
        KeyCode::Backspace if details_open => Some(Msg::BackClicked),
        KeyCode::Char('a') if details_open => Some(Msg::AddClicked),
        KeyCode::Char(digit @ '0'..='9') if details_open => {
            Some(Msg::RatingPicked(star_for_digit(digit)))
        }
        KeyCode::Char('q') => {
            ui.should_quit = true;
            None
        }
        _ => None,
    }
}

fn edit_query(key: KeyEvent, view: &AppViewModel) -> Option<Msg> {
    let mut query = view.query.clone();
    match key.code {
        KeyCode::Char(c) => query.push(c),
        KeyCode::Backspace => {
            query.pop()?;
        }
        _ => return None,
    }
    Some(Msg::QueryChanged(query))
}

/// `1`..`9` are themselves; `0` is the tenth star.
fn star_for_digit(digit: char) -> u8 {
    match digit.to_digit(10) {
        Some(0) => MAX_RATING,
        Some(n) => n as u8,
        None => 0,
    }
}

fn next_focus(focus: Focus, details_open: bool) -> Focus {
    match focus {
        Focus::Search => Focus::Results,
        Focus::Results if details_open => Focus::Search,
        Focus::Results => Focus::Watched,
        Focus::Watched => Focus::Search,
    }
}

fn previous_focus(focus: Focus, details_open: bool) -> Focus {
    match focus {
        Focus::Search if details_open => Focus::Results,
        Focus::Search => Focus::Watched,
        Focus::Results => Focus::Search,
        Focus::Watched => Focus::Results,
    }
}

fn toggle_collapsed(ui: &mut UiState) {
    match ui.focus {
        Focus::Results => ui.results_collapsed = !ui.results_collapsed,
        Focus::Watched => ui.watched_collapsed = !ui.watched_collapsed,
        Focus::Search => {}
    }
}

fn cursor_mut(ui: &mut UiState) -> &mut usize {
    match ui.focus {
        Focus::Watched => &mut ui.watched_cursor,
        Focus::Search | Focus::Results => &mut ui.results_cursor,
    }
}

fn focused_len(focus: Focus, view: &AppViewModel) -> usize {
    match focus {
        Focus::Watched => view.watched.len(),
        Focus::Search | Focus::Results => view.results.len(),
    }
}

fn highlighted_id(ui: &UiState, view: &AppViewModel) -> Option<String> {
    match ui.focus {
        Focus::Results if !ui.results_collapsed => {
            view.results.get(ui.results_cursor).map(|row| row.id.clone())
        }
        Focus::Watched if view.details.is_none() && !ui.watched_collapsed => {
            view.watched.get(ui.watched_cursor).map(|row| row.id.clone())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use popcorn_core::{DetailsView, ResultRowView, WatchedRowView};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn view_with_results(ids: &[&str]) -> AppViewModel {
        AppViewModel {
            query: "alien".to_string(),
            results: ids
                .iter()
                .map(|id| ResultRowView {
                    id: id.to_string(),
                    title: format!("Title {id}"),
                    year: "1979".to_string(),
                    selected: false,
                })
                .collect(),
            result_count: ids.len(),
            ..AppViewModel::default()
        }
    }

    fn open_details(mut view: AppViewModel) -> AppViewModel {
        view.details = Some(DetailsView {
            movie_id: "tt1".to_string(),
            loading: false,
            detail: None,
            rating: 0,
            rated: false,
            can_add: false,
        });
        view
    }

    #[test]
    fn typing_edits_query() {
        let mut ui = UiState::default();
        let view = view_with_results(&[]);

        assert_eq!(
            handle_key(press(KeyCode::Char('s')), &mut ui, &view),
            Some(Msg::QueryChanged("aliens".to_string()))
        );
        assert_eq!(
            handle_key(press(KeyCode::Backspace), &mut ui, &view),
            Some(Msg::QueryChanged("alie".to_string()))
        );
    }

    #[test]
    fn backspace_on_empty_query_does_nothing() {
        let mut ui = UiState::default();
        let view = AppViewModel::default();
        assert_eq!(handle_key(press(KeyCode::Backspace), &mut ui, &view), None);
    }

    #[test]
    fn enter_opens_highlighted_result() {
        let mut ui = UiState {
            focus: Focus::Results,
            ..UiState::default()
        };
        let view = view_with_results(&["tt1", "tt2"]);

        handle_key(press(KeyCode::Down), &mut ui, &view);
        handle_key(press(KeyCode::Down), &mut ui, &view);
        assert_eq!(ui.results_cursor, 1);
        assert_eq!(
            handle_key(press(KeyCode::Enter), &mut ui, &view),
            Some(Msg::MovieClicked("tt2".to_string()))
        );
    }

    #[test]
    fn digits_rate_only_with_details_open() {
        let mut ui = UiState {
            focus: Focus::Results,
            ..UiState::default()
        };
        let view = view_with_results(&["tt1"]);
        assert_eq!(handle_key(press(KeyCode::Char('7')), &mut ui, &view), None);

        let view = open_details(view);
        assert_eq!(
            handle_key(press(KeyCode::Char('7')), &mut ui, &view),
            Some(Msg::RatingPicked(7))
        );
        assert_eq!(
            handle_key(press(KeyCode::Char('0')), &mut ui, &view),
            Some(Msg::RatingPicked(10))
        );
        assert_eq!(
            handle_key(press(KeyCode::Char('a')), &mut ui, &view),
            Some(Msg::AddClicked)
        );
        assert_eq!(
            handle_key(press(KeyCode::Esc), &mut ui, &view),
            Some(Msg::BackClicked)
        );
    }

    #[test]
    fn delete_removes_highlighted_watched_movie() {
        let mut ui = UiState {
            focus: Focus::Watched,
            ..UiState::default()
        };
        let view = AppViewModel {
            watched: vec![WatchedRowView {
                id: "tt9".to_string(),
                title: "Heat".to_string(),
                imdb_rating: Some(8.3),
                user_rating: 9,
                runtime_minutes: Some(170),
            }],
            ..AppViewModel::default()
        };
        assert_eq!(
            handle_key(press(KeyCode::Char('d')), &mut ui, &view),
            Some(Msg::RemoveClicked("tt9".to_string()))
        );
    }

    #[test]
    fn tab_skips_watched_panel_while_details_open() {
        let mut ui = UiState::default();
        let view = open_details(view_with_results(&["tt1"]));

        handle_key(press(KeyCode::Tab), &mut ui, &view);
        assert_eq!(ui.focus, Focus::Results);
        handle_key(press(KeyCode::Tab), &mut ui, &view);
        assert_eq!(ui.focus, Focus::Search);
    }

    #[test]
    fn minus_collapses_focused_panel_and_hides_its_rows() {
        let mut ui = UiState {
            focus: Focus::Results,
            ..UiState::default()
        };
        let view = view_with_results(&["tt1"]);

        assert_eq!(handle_key(press(KeyCode::Char('-')), &mut ui, &view), None);
        assert!(ui.results_collapsed);
        assert!(!ui.watched_collapsed);
        assert_eq!(handle_key(press(KeyCode::Enter), &mut ui, &view), None);

        handle_key(press(KeyCode::Char('+')), &mut ui, &view);
        assert!(!ui.results_collapsed);
        assert_eq!(
            handle_key(press(KeyCode::Enter), &mut ui, &view),
            Some(Msg::MovieClicked("tt1".to_string()))
        );
    }

    #[test]
    fn minus_in_search_box_is_typed() {
        let mut ui = UiState::default();
        let view = view_with_results(&["tt1"]);
        assert_eq!(
            handle_key(press(KeyCode::Char('-')), &mut ui, &view),
            Some(Msg::QueryChanged("alien-".to_string()))
        );
        assert!(!ui.results_collapsed);
    }

    #[test]
    fn ctrl_c_quits_from_search_box() {
        let mut ui = UiState::default();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(key, &mut ui, &AppViewModel::default()), None);
        assert!(ui.should_quit);
    }
}
