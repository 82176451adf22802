//! Telemetry capture: tap the ambient log stream into a rolling buffer.
//!
//! The pattern engine reports playback events as ordinary log lines. This
//! module owns the one piece of shared mutable state in the system - the
//! rolling buffer of those lines - and exposes it only through `append` and
//! snapshot-style reads, never by direct mutation.
//!
//! `Telemetry` is the context handle: constructed once at startup, cloned
//! into whatever needs it (the interceptor, the render loop). `install()`
//! wraps the global logger with a [`LogTap`] decorator that forwards every
//! record to its original destination unchanged and appends the formatted
//! message here.

pub mod buffer;
pub mod intercept;

pub use buffer::TelemetryBuffer;
pub use intercept::LogTap;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::viz::sampler::{Sample, SampleRules};
use crate::TELEMETRY_CAPACITY;

struct Shared {
    buffer: Mutex<TelemetryBuffer>,
    rules: SampleRules,
    /// One-shot install guard: set on the first `install()` call, for good.
    installed: AtomicBool,
    /// Whether the tap captures. Cleared by `deactivate()`; forwarding to
    /// the wrapped logger is unaffected.
    capturing: AtomicBool,
}

/// Startup-constructed telemetry context.
///
/// Clones share one buffer; all reads return owned copies so a concurrent
/// append can never produce a torn read.
#[derive(Clone)]
pub struct Telemetry {
    shared: Arc<Shared>,
}

impl Telemetry {
    /// Context with the default capacity and extraction rules.
    pub fn new() -> Self {
        Self::with_capacity(TELEMETRY_CAPACITY)
    }

    /// Context with a custom buffer capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_rules(capacity, SampleRules::default())
    }

    /// Context with custom capacity and extraction rules.
    pub fn with_rules(capacity: usize, rules: SampleRules) -> Self {
        Self {
            shared: Arc::new(Shared {
                buffer: Mutex::new(TelemetryBuffer::with_capacity(capacity)),
                rules,
                installed: AtomicBool::new(false),
                capturing: AtomicBool::new(true),
            }),
        }
    }

    /// Wrap the global logger with a capturing [`LogTap`].
    ///
    /// The inner logger is built from the environment (`RUST_LOG`), the way
    /// the host would have configured logging anyway; it keeps receiving
    /// every record unchanged. Idempotent: a second call while already
    /// installed is a no-op. If the global logger cannot be wrapped (some
    /// other logger won the race), the failure is swallowed and the session
    /// simply runs with an empty telemetry stream.
    pub fn install(&self) {
        if self.shared.installed.swap(true, Ordering::SeqCst) {
            return;
        }
        let inner = env_logger::Builder::from_default_env().build();
        // Telemetry rides info-level lines. Keep the facade open at Info
        // even when the destination filters tighter; the inner logger still
        // applies its own filter on delivery.
        let max_level = inner.filter().max(log::LevelFilter::Info);
        self.install_inner(Box::new(inner), max_level);
    }

    /// Like [`install`](Self::install), but wrapping a logger the host
    /// already built.
    pub fn install_with(&self, inner: Box<dyn log::Log>, max_level: log::LevelFilter) {
        if self.shared.installed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.install_inner(inner, max_level);
    }

    fn install_inner(&self, inner: Box<dyn log::Log>, max_level: log::LevelFilter) {
        let tap = LogTap::new(inner, self.clone());
        if log::set_boxed_logger(Box::new(tap)).is_ok() {
            log::set_max_level(max_level);
        }
    }

    /// Stop capturing for session teardown.
    ///
    /// The global logger cannot be unset, so this flips the capture flag
    /// inside the tap; lines keep flowing to the wrapped logger untouched.
    pub fn deactivate(&self) {
        self.shared.capturing.store(false, Ordering::SeqCst);
    }

    pub fn is_installed(&self) -> bool {
        self.shared.installed.load(Ordering::SeqCst)
    }

    pub(crate) fn is_capturing(&self) -> bool {
        self.shared.capturing.load(Ordering::SeqCst)
    }

    /// Append one raw line to the rolling buffer.
    pub fn append(&self, line: &str) {
        self.lock_buffer().append(line.to_owned());
    }

    /// Raw captured lines, oldest first. Diagnostics surface.
    pub fn raw_entries(&self) -> Vec<String> {
        self.lock_buffer().snapshot()
    }

    /// Current chart samples: one per captured line, oldest first.
    pub fn samples(&self) -> Vec<Sample> {
        let snapshot = self.lock_buffer().snapshot();
        self.shared.rules.sample(&snapshot)
    }

    /// Number of lines currently held.
    pub fn len(&self) -> usize {
        self.lock_buffer().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_buffer().is_empty()
    }

    // Capture must survive a panic on some other thread that held the lock,
    // so recover the data from a poisoned mutex instead of propagating.
    fn lock_buffer(&self) -> MutexGuard<'_, TelemetryBuffer> {
        self.shared
            .buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}
