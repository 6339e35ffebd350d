use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Values displayed on the single HUD row.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    pub score: u32,
    pub best: u32,
    pub body_len: usize,
    pub boost: bool,
}

/// Renders the one-line HUD and returns the remaining play area below it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, info: HudInfo) -> Rect {
    let [hud_area, play_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    let mut spans = vec![
        Span::raw("Score: "),
        Span::styled(info.score.to_string(), Style::default().fg(Color::White)),
        Span::raw("  Best: "),
        Span::styled(info.best.to_string(), Style::default().fg(Color::Yellow)),
        Span::raw("  Length: "),
        Span::styled(info.body_len.to_string(), Style::default().fg(Color::White)),
    ];
    if info.boost {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("BOOST", Style::default().fg(Color::Magenta)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Left)
            .style(Style::default().fg(Color::DarkGray)),
        hud_area,
    );

    play_area
}
