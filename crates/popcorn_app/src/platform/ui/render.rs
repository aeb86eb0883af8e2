use popcorn_core::{AppViewModel, DetailsView, SearchActivity, WatchedSummary, MAX_RATING};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use super::input::{Focus, UiState};
use super::layout;

pub fn render(frame: &mut Frame, view: &AppViewModel, ui: &UiState) {
    let areas = layout::split(frame.area());

    render_search(frame, areas.search, view, ui);
    render_results(frame, areas.results, view, ui);
    match &view.details {
        Some(details) => render_details(frame, areas.details, details),
        None if ui.watched_collapsed => frame.render_widget(
            focus_block(panel_title("Watched", true), ui.focus == Focus::Watched),
            areas.details,
        ),
        None => {
            render_summary(frame, areas.summary, &view.summary);
            render_watched(frame, areas.watched, view, ui);
        }
    }
    frame.render_widget(
        Paragraph::new(status_hint(view, ui)).style(Style::default().fg(Color::DarkGray)),
        areas.status,
    );
}

fn render_search(frame: &mut Frame, area: Rect, view: &AppViewModel, ui: &UiState) {
    let activity = match view.activity {
        SearchActivity::Idle => "",
        SearchActivity::Debouncing => " (waiting…)",
        SearchActivity::Fetching => " (searching…)",
    };
    let title = format!(
        "🍿 usePopcorn | Found {} results{}",
        view.result_count, activity
    );
    let input = Paragraph::new(view.query.as_str()).block(focus_block(title, ui.focus == Focus::Search));
    frame.render_widget(input, area);

    if ui.focus == Focus::Search {
        let width = u16::try_from(view.query.chars().count()).unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(width)
            .min(area.right().saturating_sub(2));
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn render_results(frame: &mut Frame, area: Rect, view: &AppViewModel, ui: &UiState) {
    let focused = ui.focus == Focus::Results;
    if ui.results_collapsed {
        frame.render_widget(focus_block(panel_title("Results", true), focused), area);
        return;
    }

    let items: Vec<ListItem> = view
        .results
        .iter()
        .map(|row| {
            let style = if row.selected {
                Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(row.title.clone(), style),
                Span::styled(format!("  🗓 {}", row.year), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(focus_block(panel_title("Results", false), focused))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state =
        ListState::default().with_selected((focused && !view.results.is_empty()).then_some(ui.results_cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_summary(frame: &mut Frame, area: Rect, summary: &WatchedSummary) {
    let lines = vec![
        Line::from(Span::styled(
            "Movies you watched",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "#️⃣ {} movies   ⭐️ {:.2}   🌟 {:.2}   ⏳ {:.2} min",
            summary.count, summary.avg_imdb, summary.avg_user, summary.avg_runtime
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_watched(frame: &mut Frame, area: Rect, view: &AppViewModel, ui: &UiState) {
    let items: Vec<ListItem> = view
        .watched
        .iter()
        .map(|row| {
            let imdb = row
                .imdb_rating
                .map_or_else(|| "-".to_string(), |rating| format!("{rating}"));
            let runtime = row
                .runtime_minutes
                .map_or_else(|| "-".to_string(), |minutes| minutes.to_string());
            ListItem::new(vec![
                Line::from(row.title.clone()),
                Line::from(Span::styled(
                    format!("  ⭐️ {imdb}   🌟 {}   ⏳ {runtime} min", row.user_rating),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let focused = ui.focus == Focus::Watched;
    let list = List::new(items)
        .block(focus_block(panel_title("Watched", false), focused))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state =
        ListState::default().with_selected((focused && !view.watched.is_empty()).then_some(ui.watched_cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_details(frame: &mut Frame, area: Rect, details: &DetailsView) {
    let block = Block::default().borders(Borders::ALL).title("Details");
    let Some(movie) = details.detail.as_ref() else {
        frame.render_widget(Paragraph::new("Loading…").block(block), area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            movie.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{} • {}", movie.released, movie.runtime)),
        Line::from(movie.genre.clone()),
        Line::from(format!("⭐ {} IMDb rating", movie.imdb_rating)),
        Line::default(),
    ];

    if details.loading {
        lines.push(Line::from(Span::styled(
            "Loading…",
            Style::default().fg(Color::DarkGray),
        )));
    } else if details.rated {
        lines.push(Line::from(format!(
            "You have rated this movie with {} ⭐",
            details.rating
        )));
    } else {
        lines.push(Line::from(vec![
            Span::styled(stars(details.rating), Style::default().fg(Color::Yellow)),
            Span::raw(format!(" {}/{}", details.rating, MAX_RATING)),
        ]));
        if details.can_add {
            lines.push(Line::from(Span::styled(
                "[a] + Add to watch-list",
                Style::default().fg(Color::Green),
            )));
        }
    }

    lines.extend([
        Line::default(),
        Line::from(Span::styled(
            movie.plot.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        Line::default(),
        Line::from(format!("Starring {}", movie.actors)),
        Line::from(format!("Directed by {}", movie.director)),
    ]);

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn stars(rating: u8) -> String {
    (1..=MAX_RATING)
        .map(|star| if star <= rating { '★' } else { '☆' })
        .collect()
}

fn status_hint(view: &AppViewModel, ui: &UiState) -> &'static str {
    match (ui.focus, view.details.is_some()) {
        (Focus::Search, _) => "type to search · Tab: next panel · Ctrl+C: quit",
        (_, true) => "1-9,0: rate · a: add · Esc: back · Tab: next panel · q: quit",
        (Focus::Watched, false) => {
            "Enter: open · d: remove · -/+: fold · Tab: next panel · q: quit"
        }
        (Focus::Results, false) => "Enter: open · -/+: fold · Tab: next panel · q: quit",
    }
}

fn panel_title(name: &str, collapsed: bool) -> String {
    format!("{name} [{}]", if collapsed { '+' } else { '–' })
}

fn focus_block(title: String, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
}
