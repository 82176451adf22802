//! Transport bar widget - shows tempo, play state, gain, hush, and capture stats

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::SessionView;

/// Render the transport bar
pub fn render_transport(frame: &mut Frame, area: Rect, view: &SessionView) {
    let block = Block::default()
        .title(" groovescope ")
        .borders(Borders::ALL);

    let play_symbol = if view.playing { "▶" } else { "⏸" };
    let play_state = if view.playing { "Playing" } else { "Paused" };

    let gain_text = if view.gain > 0.0 {
        format!("Gain: {:.1}  ", view.gain)
    } else {
        "Muted  ".to_owned()
    };
    let hush_text = if view.hush { "Hush: on  " } else { "Hush: off  " };

    let line = Line::from(vec![
        Span::styled(
            format!(" BPM: {:.0}  ", view.bpm),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{play_symbol} {play_state}  "),
            Style::default().fg(if view.playing {
                Color::Green
            } else {
                Color::Yellow
            }),
        ),
        Span::styled(
            gain_text,
            Style::default().fg(if view.gain > 0.0 {
                Color::Magenta
            } else {
                Color::Red
            }),
        ),
        Span::styled(hush_text, Style::default().fg(Color::White)),
        Span::styled(
            format!("Step {}  ", view.step),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Captured: {} lines", view.captured),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
