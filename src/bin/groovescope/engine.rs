//! Stand-in event source for the external pattern engine.
//!
//! The real engine lives outside this process; all the telemetry pipeline
//! needs from it is a stream of log lines at musical time. This walks the
//! playable lines of the processed code on an eighth-note grid and emits one
//! line per step through the ambient log facade, carrying the `lpenv:` and
//! `cutoff:` fields the extraction rules look for.

use std::time::{Duration, Instant};

/// Step scheduler over the playable lines of a processed template.
pub struct StepEngine {
    lines: Vec<String>,
    step: usize,
    interval: Duration,
    next_due: Option<Instant>,
    playing: bool,
    gain: f64,
}

impl StepEngine {
    pub fn new(processed: &str, bpm: f64, gain: f64) -> Self {
        Self {
            lines: playable_lines(processed),
            step: 0,
            interval: step_interval(bpm),
            next_due: None,
            playing: true,
            gain,
        }
    }

    /// Swap in freshly processed code, keeping play state and step phase.
    pub fn load(&mut self, processed: &str, bpm: f64, gain: f64) {
        self.lines = playable_lines(processed);
        self.interval = step_interval(bpm);
        self.gain = gain;
        self.next_due = None;
    }

    pub fn toggle_playback(&mut self) {
        self.playing = !self.playing;
        if !self.playing {
            self.next_due = None;
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Emit every step that has come due since the last call.
    pub fn tick(&mut self, now: Instant) {
        if !self.playing || self.lines.is_empty() {
            return;
        }
        let interval = self.interval;
        let due = self.next_due.get_or_insert(now);
        while *due <= now {
            let line = &self.lines[self.step % self.lines.len()];
            emit(line, self.step, self.gain);
            *due += interval;
            self.step += 1;
        }
    }
}

/// One telemetry line for one step.
///
/// The envelope value rides a triangle over an 8-step cycle, scaled by the
/// session gain; every fourth step reports the filter cutoff instead so the
/// secondary extraction field sees real traffic.
fn emit(line: &str, step: usize, gain: f64) {
    let phase = (step % 8) as f64;
    let env = if phase < 4.0 {
        phase / 4.0
    } else {
        (8.0 - phase) / 4.0
    };
    if step % 4 == 3 {
        let cutoff = (200.0 + 1800.0 * env) * gain.min(1.0);
        log::info!("step:{step:03} {line} cutoff:{cutoff:.0}");
    } else {
        let lpenv = gain * (0.5 + 3.5 * env);
        log::info!("step:{step:03} {line} lpenv:{lpenv:.2}");
    }
}

/// Eighth notes at the given tempo.
fn step_interval(bpm: f64) -> Duration {
    Duration::from_secs_f64(30.0 / bpm.max(1.0))
}

/// The lines of processed code that produce sound.
///
/// Drops the generated header directives, blank lines, `//` and `/* */`
/// comments (hushed blocks arrive as the latter), and tilde rests.
fn playable_lines(processed: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut in_comment = false;
    for raw in processed.lines() {
        let line = raw.trim();
        if in_comment {
            if line.contains("*/") {
                in_comment = false;
            }
            continue;
        }
        if let Some(after) = line.strip_prefix("/*") {
            if !after.contains("*/") {
                in_comment = true;
            }
            continue;
        }
        if line.is_empty()
            || line.starts_with("//")
            || line.starts_with("setcpm(")
            || line.starts_with("all(")
            || line.starts_with('~')
        {
            continue;
        }
        lines.push(line.to_owned());
    }
    lines
}
