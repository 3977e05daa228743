use crate::app::{App, SIDE_PANEL_WIDTH};
use crate::braille::BrailleCanvas;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Split into content area and status bar
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Map + panel
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(SIDE_PANEL_WIDTH)])
        .split(rows[0]);

    render_map(frame, app, columns[0]);
    render_side_panel(frame, app, columns[1]);
    render_status_bar(frame, app, rows[1]);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " COVID-19 World Map ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Braille gives 2x4 resolution per character
    let mut viewport = app.viewport.clone();
    viewport.width = inner.width as usize * 2;
    viewport.height = inner.height as usize * 4;

    let canvas = app
        .world
        .render(inner.width as usize, inner.height as usize, &viewport);
    frame.render_widget(CanvasWidget { canvas }, inner);
}

/// Widget painting a colored braille canvas cell by cell.
struct CanvasWidget {
    canvas: BrailleCanvas,
}

impl Widget for CanvasWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for cy in 0..self.canvas.height().min(area.height as usize) {
            for cx in 0..self.canvas.width().min(area.width as usize) {
                if let Some((ch, color)) = self.canvas.cell(cx, cy) {
                    let x = area.x + cx as u16;
                    let y = area.y + cy as u16;
                    buf[(x, y)].set_char(ch).set_fg(color);
                }
            }
        }
    }
}

fn render_side_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(" Searched ", Style::default().fg(Color::Cyan)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();

    // Search input with inline autocomplete hint.
    let mut input_spans = vec![
        Span::styled("> ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.search_input.clone(),
            Style::default().fg(Color::White),
        ),
    ];
    if let Some(suggestion) = app.suggestion() {
        // Char-based skip: the prefix match is case-insensitive, so byte
        // offsets into the suggestion are not safe.
        let rest: String = suggestion
            .chars()
            .skip(app.search_input.chars().count())
            .collect();
        input_spans.push(Span::styled(rest, Style::default().fg(Color::DarkGray)));
    }
    lines.push(Line::from(input_spans));
    lines.push(Line::from(Span::styled(
        "name      conf   dead   recov",
        Style::default().fg(Color::DarkGray),
    )));

    for row in app.session.table_rows() {
        let (confirmed, deaths, recovered) = match row.counts {
            Some(c) => (
                format_count(c.confirmed),
                format_count(c.deaths),
                format_count(c.recovered),
            ),
            // Known country, no current data.
            None => ("-".to_string(), "-".to_string(), "-".to_string()),
        };
        let name: String = row.name.chars().take(9).collect();
        lines.push(Line::from(Span::styled(
            format!("{name:<9} {confirmed:>6} {deaths:>6} {recovered:>6}"),
            Style::default().fg(Color::White),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 10_000 {
        format!("{}k", n / 1_000)
    } else {
        n.to_string()
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = Line::from(vec![
        Span::styled(" as of: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.session.as_of.as_str(), Style::default().fg(Color::Yellow)),
        Span::styled(" | showing: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.session.displayed_date.as_str(),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(" | ^T: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.session.toggle_label(),
            Style::default().fg(if app.session.is_playing() {
                Color::Red
            } else {
                Color::Green
            }),
        ),
        Span::styled(" | zoom: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(
            " | type+enter:search tab:complete arrows:pan pgup/pgdn:zoom esc:quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(status), area);
}
