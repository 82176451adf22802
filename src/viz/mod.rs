//! Visualization pipeline: snapshot -> samples -> bar geometry.

pub mod sampler;
pub mod scene;

pub use sampler::{FieldRule, Sample, SampleRules};
pub use scene::{Bar, FrameRenderer, Rgb};
