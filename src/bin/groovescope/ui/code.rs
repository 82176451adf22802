//! Processed-code preview panel.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the processed output of the latest transform.
pub fn render_code(frame: &mut Frame, area: Rect, processed: &str) {
    let block = Block::default().title(" Processed ").borders(Borders::ALL);
    let paragraph = Paragraph::new(processed.to_owned())
        .block(block)
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(paragraph, area);
}
