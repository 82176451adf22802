//! Session state and event loop for the terminal host.
//!
//! Wires the pieces together the way the original web panel did: one
//! transform config as the single source of truth, re-transform on every
//! control edit, telemetry installed once at startup, and a chart redrawn
//! from the latest buffer snapshot on every frame.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};

use groovescope::preprocess::{transform, TransformConfig};
use groovescope::telemetry::Telemetry;
use groovescope::viz::FrameRenderer;

use super::engine::StepEngine;
use super::ui::{self, SessionView};

const MIN_TEMPO: f64 = 20.0;
const MAX_TEMPO: f64 = 300.0;
const MAX_GAIN: f64 = 2.0;

/// Main application builder
pub struct Groovescope {
    template: String,
    config: TransformConfig,
}

impl Groovescope {
    pub fn new() -> Self {
        Self {
            template: String::new(),
            config: TransformConfig::default(),
        }
    }

    /// Set the tempo in beats per minute
    pub fn tempo(mut self, bpm: f64) -> Self {
        self.config.tempo_bpm = bpm;
        self
    }

    /// Set the global gain multiplier
    pub fn gain(mut self, gain: f64) -> Self {
        self.config.volume_gain = gain;
        self
    }

    /// Start with mute tokens hushed
    pub fn hush(mut self, hush: bool) -> Self {
        self.config.hush = hush;
        self
    }

    /// Set the template text to transform and play
    pub fn template(mut self, template: &str) -> Self {
        self.template = template.to_owned();
        self
    }

    /// Run the session (takes over the terminal)
    pub fn run(self) -> EyreResult<()> {
        let telemetry = Telemetry::new();
        telemetry.install();

        let mut terminal = ratatui::init();
        let result = Session::new(self.template, self.config, telemetry.clone()).run(&mut terminal);
        ratatui::restore();

        telemetry.deactivate();
        result
    }
}

impl Default for Groovescope {
    fn default() -> Self {
        Self::new()
    }
}

/// One live session: template, config, engine, telemetry, chart.
struct Session {
    template: String,
    config: TransformConfig,
    processed: String,
    engine: StepEngine,
    telemetry: Telemetry,
    renderer: FrameRenderer,
    /// Gain to restore when unmuting.
    last_gain: f64,
    should_quit: bool,
}

impl Session {
    fn new(template: String, config: TransformConfig, telemetry: Telemetry) -> Self {
        let processed = transform(&template, &config);
        let engine = StepEngine::new(&processed, config.tempo_bpm, config.volume_gain);
        let last_gain = if config.volume_gain > 0.0 {
            config.volume_gain
        } else {
            1.0
        };
        Self {
            template,
            config,
            processed,
            engine,
            telemetry,
            renderer: FrameRenderer::new(),
            last_gain,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            // Advance the stand-in engine; its log lines land in telemetry.
            self.engine.tick(Instant::now());

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    /// Re-run the transform with the current config and reload the engine.
    fn retransform(&mut self) {
        self.processed = transform(&self.template, &self.config);
        self.engine
            .load(&self.processed, self.config.tempo_bpm, self.config.volume_gain);
    }

    fn set_gain(&mut self, gain: f64) {
        self.config.volume_gain = gain.clamp(0.0, MAX_GAIN);
        if self.config.volume_gain > 0.0 {
            self.last_gain = self.config.volume_gain;
        }
        self.retransform();
    }

    /// Mute button behavior: remember the last audible gain on the way
    /// down, restore it (or unity) on the way back up.
    fn toggle_mute(&mut self) {
        if self.config.volume_gain > 0.0 {
            self.last_gain = self.config.volume_gain;
            self.config.volume_gain = 0.0;
        } else {
            // last_gain is kept strictly positive, so this always unmutes.
            self.config.volume_gain = self.last_gain;
        }
        self.retransform();
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => self.engine.toggle_playback(),
            KeyCode::Char('h') | KeyCode::Char('H') => {
                self.config.hush = !self.config.hush;
                self.retransform();
            }
            KeyCode::Char('m') | KeyCode::Char('M') => self.toggle_mute(),
            KeyCode::Up => {
                self.config.tempo_bpm = (self.config.tempo_bpm + 5.0).min(MAX_TEMPO);
                self.retransform();
            }
            KeyCode::Down => {
                self.config.tempo_bpm = (self.config.tempo_bpm - 5.0).max(MIN_TEMPO);
                self.retransform();
            }
            KeyCode::Right => self.set_gain(self.config.volume_gain + 0.1),
            KeyCode::Left => self.set_gain(self.config.volume_gain - 0.1),
            _ => {}
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Transport bar
                Constraint::Min(8),     // Telemetry bar chart
                Constraint::Length(10), // Processed code preview
                Constraint::Length(1),  // Help bar
            ])
            .split(area);

        let view = SessionView {
            bpm: self.config.tempo_bpm,
            gain: self.config.volume_gain,
            hush: self.config.hush,
            playing: self.engine.is_playing(),
            captured: self.telemetry.len(),
            step: self.engine.step(),
        };
        ui::render_transport(frame, chunks[0], &view);

        // Fresh snapshot, fresh geometry, every frame.
        let samples = self.telemetry.samples();
        ui::render_bars(frame, chunks[1], &samples, &mut self.renderer);

        ui::render_code(frame, chunks[2], &self.processed);

        let help = Paragraph::new(
            " [Q] Quit  [Space] Play/Pause  [H] Hush  [M] Mute  [Up/Down] Tempo  [Left/Right] Gain",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
