pub mod preprocess; // Template-to-code rewriting
pub mod telemetry; // Log interception and rolling capture
pub mod viz; // Field extraction and bar-chart geometry

/// Rolling telemetry capacity - the "last ~100 events" the chart shows.
pub const TELEMETRY_CAPACITY: usize = 100;
