//! Log interception as an explicit decorator.
//!
//! Rather than reaching into the logging machinery behind its back, the tap
//! implements [`log::Log`] itself and wraps whatever logger the host would
//! have installed. Every record is delivered to the wrapped logger first,
//! exactly as it arrived; capture is a side channel that can be switched off
//! without disturbing delivery.

use log::{Log, Metadata, Record};

use super::Telemetry;

/// A [`log::Log`] decorator that feeds the telemetry buffer.
///
/// Installed once per process via [`Telemetry::install`]. Only the formatted
/// message text is captured - level and target stay with the wrapped logger,
/// the extraction rules match on message content alone.
pub struct LogTap {
    inner: Box<dyn Log>,
    telemetry: Telemetry,
}

impl LogTap {
    pub fn new(inner: Box<dyn Log>, telemetry: Telemetry) -> Self {
        Self { inner, telemetry }
    }
}

impl Log for LogTap {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        // Original delivery first, unchanged.
        self.inner.log(record);
        if self.telemetry.is_capturing() {
            self.telemetry.append(&record.args().to_string());
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Inner logger that records what was delivered to it.
    struct RecordingLogger {
        delivered: Arc<Mutex<Vec<String>>>,
    }

    impl Log for RecordingLogger {
        fn enabled(&self, _: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            self.delivered
                .lock()
                .unwrap()
                .push(record.args().to_string());
        }

        fn flush(&self) {}
    }

    fn tap_with_recorder() -> (LogTap, Telemetry, Arc<Mutex<Vec<String>>>) {
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let telemetry = Telemetry::with_capacity(8);
        let tap = LogTap::new(
            Box::new(RecordingLogger {
                delivered: delivered.clone(),
            }),
            telemetry.clone(),
        );
        (tap, telemetry, delivered)
    }

    fn emit(tap: &LogTap, args: std::fmt::Arguments) {
        tap.log(
            &Record::builder()
                .args(args)
                .level(log::Level::Info)
                .target("engine")
                .build(),
        );
    }

    #[test]
    fn forwards_and_captures_each_line() {
        let (tap, telemetry, delivered) = tap_with_recorder();
        emit(&tap, format_args!("note:c3 lpenv:1.5"));
        emit(&tap, format_args!("note:g3 cutoff:440"));

        assert_eq!(
            *delivered.lock().unwrap(),
            vec!["note:c3 lpenv:1.5", "note:g3 cutoff:440"]
        );
        assert_eq!(
            telemetry.raw_entries(),
            vec!["note:c3 lpenv:1.5", "note:g3 cutoff:440"]
        );
    }

    #[test]
    fn deactivated_tap_forwards_without_capturing() {
        let (tap, telemetry, delivered) = tap_with_recorder();
        emit(&tap, format_args!("before lpenv:1"));
        telemetry.deactivate();
        emit(&tap, format_args!("after lpenv:2"));

        assert_eq!(delivered.lock().unwrap().len(), 2);
        assert_eq!(telemetry.raw_entries(), vec!["before lpenv:1"]);
    }

    #[test]
    fn second_install_is_a_no_op() {
        // Both calls consume the one-shot guard; neither panics even though
        // the global logger may already be owned by another test binary run.
        let telemetry = Telemetry::new();
        telemetry.install();
        assert!(telemetry.is_installed());
        telemetry.install();
        assert!(telemetry.is_installed());

        // A second context losing the set_boxed_logger race is swallowed too.
        let other = Telemetry::new();
        other.install();
        assert!(other.is_installed());
    }
}
