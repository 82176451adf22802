//! Telemetry bar-chart widget.
//!
//! Measures the live inner area, has the renderer rebuild its geometry for
//! exactly those dimensions, then paints the bars bottom-up into the cell
//! buffer with each bar's gradient color.

use groovescope::viz::{FrameRenderer, Sample};
use ratatui::{
    layout::Rect,
    style::Color,
    widgets::{Block, Borders},
    Frame,
};

/// Render the telemetry chart for this frame.
pub fn render_bars(frame: &mut Frame, area: Rect, samples: &[Sample], renderer: &mut FrameRenderer) {
    let block = Block::default()
        .title(" Telemetry (last ~100 events) ")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Width and height come from live layout; a collapsed terminal makes
    // this a skipped frame inside the renderer.
    renderer.draw(samples, f64::from(inner.width), f64::from(inner.height));

    let buf = frame.buffer_mut();
    for bar in renderer.bars() {
        let x0 = bar.x.floor() as u16;
        if x0 >= inner.width {
            continue;
        }
        // At least one column per bar, even when bands are narrower than a cell.
        let x1 = ((bar.x + bar.width).ceil() as u16).max(x0 + 1).min(inner.width);
        let rows = (bar.height.round() as u16).min(inner.height);
        let color = Color::Rgb(bar.color.r, bar.color.g, bar.color.b);

        for col in x0..x1 {
            for row in 0..rows {
                let cell_x = inner.x + col;
                let cell_y = inner.y + inner.height - 1 - row;
                if let Some(cell) = buf.cell_mut((cell_x, cell_y)) {
                    cell.set_symbol("█").set_fg(color);
                }
            }
        }
    }
}
