use ratatui::layout::{Constraint, Layout, Rect};

/// Screen regions: search bar on top, results on the left, and on the right
/// either the watched summary above the watched list or the details view.
pub struct ScreenAreas {
    pub search: Rect,
    pub results: Rect,
    pub summary: Rect,
    pub watched: Rect,
    pub details: Rect,
    pub status: Rect,
}

pub fn split(area: Rect) -> ScreenAreas {
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(6),
        Constraint::Length(1),
    ])
    .split(area);

    let columns = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    let right = Layout::vertical([Constraint::Length(4), Constraint::Min(3)]).split(columns[1]);

    ScreenAreas {
        search: rows[0],
        results: columns[0],
        summary: right[0],
        watched: right[1],
        details: columns[1],
        status: rows[2],
    }
}
