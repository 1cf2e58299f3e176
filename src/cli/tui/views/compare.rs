//! Compare view: the two items of the current query side by side

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use crate::cli::tui::utils::{truncate_str, wrapped_rows};
use crate::domain::{Pair, Progress};
use crate::storage::KeyConfig;

/// What the compare view shows
pub struct CompareView<'a> {
    pub pair: &'a Pair,
    pub progress: Option<Progress>,
    pub keys: &'a KeyConfig,
    pub status: Option<&'a str>,
}

/// Screen areas of the two item panels, for mouse hit-testing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelAreas {
    pub first: Rect,
    pub second: Rect,
}

/// Draw the compare layout
pub fn draw(frame: &mut Frame, view: &CompareView) -> PanelAreas {
    let area = frame.area();

    let progress_height = if view.progress.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),               // Question
            Constraint::Min(5),                  // Items
            Constraint::Length(progress_height), // Progress
            Constraint::Length(3),               // Status bar
        ])
        .split(area);

    draw_question(frame, chunks[0]);
    let panels = draw_items(frame, view, chunks[1]);
    if let Some(progress) = view.progress {
        draw_progress(frame, progress, chunks[2]);
    }
    draw_status_bar(frame, view, chunks[3]);

    panels
}

fn draw_question(frame: &mut Frame, area: Rect) {
    let question = Paragraph::new("Which item should come first?")
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(question, area);
}

fn draw_items(frame: &mut Frame, view: &CompareView, area: Rect) -> PanelAreas {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let first_title = format!(" [←/1/{}] ", view.keys.first);
    let second_title = format!(" [→/2/{}] ", view.keys.second);

    draw_item(frame, view.pair.first.as_str(), &first_title, columns[0]);
    draw_item(frame, view.pair.second.as_str(), &second_title, columns[1]);

    PanelAreas {
        first: columns[0],
        second: columns[1],
    }
}

fn draw_item(frame: &mut Frame, text: &str, title: &str, area: Rect) {
    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2);

    // Items that cannot fit the panel are cut, not scrolled
    let capacity = usize::from(inner_width) * usize::from(inner_height);
    let text = truncate_str(text, capacity);

    // Center vertically by padding with blank rows
    let rows = wrapped_rows(&text, inner_width);
    let padding = inner_height.saturating_sub(rows) / 2;
    let mut lines: Vec<Line> = (0..padding).map(|_| Line::default()).collect();
    lines.push(Line::from(text));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(paragraph, area);
}

fn draw_progress(frame: &mut Frame, progress: Progress, area: Rect) {
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(progress.ratio().clamp(0.0, 1.0))
        .label(format!(
            "Progress: {}/{} comparisons made",
            progress.resolved, progress.total
        ));

    frame.render_widget(gauge, area);
}

fn draw_status_bar(frame: &mut Frame, view: &CompareView, area: Rect) {
    let default_help = format!(
        "[←/1/{}] left first  [→/2/{}] right first  click a panel  [q]uit",
        view.keys.first, view.keys.second
    );
    let (content, style) = match view.status {
        Some(message) => (message.to_string(), Style::default().fg(Color::Yellow)),
        None => (default_help, Style::default()),
    };

    let paragraph = Paragraph::new(format!("pairsort {}", content))
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Item;
    use ratatui::backend::TestBackend;

    fn render(progress: Option<Progress>) -> (ratatui::buffer::Buffer, PanelAreas) {
        let backend = TestBackend::new(80, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let pair = Pair::new(Item::new("Dune"), Item::new("Hyperion"));
        let keys = KeyConfig::default();
        let view = CompareView {
            pair: &pair,
            progress,
            keys: &keys,
            status: None,
        };

        let mut areas = PanelAreas::default();
        terminal
            .draw(|frame| areas = draw(frame, &view))
            .unwrap();
        (terminal.backend().buffer().clone(), areas)
    }

    fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn shows_both_items_and_progress() {
        let (buffer, _) = render(Some(Progress { resolved: 2, total: 6 }));
        let text = buffer_text(&buffer);

        assert!(text.contains("Which item should come first?"));
        assert!(text.contains("Dune"));
        assert!(text.contains("Hyperion"));
        assert!(text.contains("Progress: 2/6 comparisons made"));
    }

    #[test]
    fn progress_hidden_when_disabled() {
        let (buffer, _) = render(None);
        assert!(!buffer_text(&buffer).contains("comparisons made"));
    }

    #[test]
    fn panels_split_the_width() {
        let (_, areas) = render(None);
        assert_eq!(areas.first.x, 0);
        assert_eq!(areas.second.x, 40);
        assert_eq!(areas.first.width, 40);
        assert!(areas.first.height >= 5);
    }
}
