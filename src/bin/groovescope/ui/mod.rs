//! TUI widgets for the groovescope host.

mod bars;
mod code;
mod transport;

pub use bars::render_bars;
pub use code::render_code;
pub use transport::render_transport;

/// Snapshot of session state for the transport bar.
pub struct SessionView {
    pub bpm: f64,
    pub gain: f64,
    pub hush: bool,
    pub playing: bool,
    /// Lines currently held in the telemetry buffer.
    pub captured: usize,
    pub step: usize,
}
