//! Per-frame bar-chart geometry.
//!
//! The renderer turns the current samples plus the drawable surface's
//! dimensions into a flat list of colored bars. Every frame discards and
//! regenerates all shapes - no per-bar identity, no transition state carried
//! between frames. With the bar count bounded by the telemetry capacity the
//! rebuild cost is bounded too, and hosts stay trivially simple: blit the
//! bars, ask again next frame.
//!
//! Units are whatever the host draws in (pixels, terminal cells); the
//! geometry is ratios of the width and height it was handed.

use crate::viz::sampler::Sample;

/// Fallback surface width when the host cannot measure its drawable area.
pub const FALLBACK_WIDTH: f64 = 600.0;
/// Fallback surface height when the caller supplies none.
pub const FALLBACK_HEIGHT: f64 = 220.0;

/// Fraction of each band left as gap between neighboring bars.
const BAND_PADDING: f64 = 0.1;

/// Low end of the bar gradient (soft blue).
const GRADIENT_LOW: Rgb = Rgb {
    r: 145,
    g: 184,
    b: 247,
};
/// High end of the bar gradient (pink).
const GRADIENT_HIGH: Rgb = Rgb {
    r: 255,
    g: 172,
    b: 219,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// One bar, in surface units. `x` is the left edge; bars grow upward from
/// the bottom of the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub width: f64,
    pub height: f64,
    pub color: Rgb,
}

/// Sample the fixed two-stop gradient at `t` in 0..=1. Cosmetic only.
pub fn gradient_at(t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    Rgb {
        r: lerp(GRADIENT_LOW.r, GRADIENT_HIGH.r),
        g: lerp(GRADIENT_LOW.g, GRADIENT_HIGH.g),
        b: lerp(GRADIENT_LOW.b, GRADIENT_HIGH.b),
    }
}

/// Rebuilds the chart's shapes once per animation frame.
#[derive(Debug, Default)]
pub struct FrameRenderer {
    bars: Vec<Bar>,
}

impl FrameRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute all bars for this frame.
    ///
    /// A zero-area surface skips the frame entirely (previous shapes stay).
    /// An empty sample set clears the shapes and draws nothing else. The
    /// width is split into equal bands, one per sample, each bar filling its
    /// band minus a proportional gap. Heights are normalized against the
    /// largest value in the set; when that largest value is 0 the domain
    /// falls back to 1, which both avoids a division by zero and keeps an
    /// all-zero frame from blowing up to full height.
    pub fn draw(&mut self, samples: &[Sample], width: f64, height: f64) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        self.bars.clear();
        if samples.is_empty() {
            return;
        }

        let mut domain_max = samples.iter().map(|s| s.value).fold(0.0, f64::max);
        if domain_max <= 0.0 {
            domain_max = 1.0;
        }

        let step = width / samples.len() as f64;
        let gap = step * BAND_PADDING;

        for sample in samples {
            let norm = (sample.value / domain_max).clamp(0.0, 1.0);
            self.bars.push(Bar {
                x: sample.index as f64 * step + gap / 2.0,
                width: step - gap,
                height: height * norm,
                color: gradient_at(norm),
            });
        }
    }

    /// The shapes computed by the last non-skipped frame.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(values: &[f64]) -> Vec<Sample> {
        values
            .iter()
            .enumerate()
            .map(|(index, &value)| Sample { index, value })
            .collect()
    }

    #[test]
    fn empty_samples_clear_previous_shapes() {
        let mut renderer = FrameRenderer::new();
        renderer.draw(&samples(&[1.0, 2.0]), 100.0, 50.0);
        assert_eq!(renderer.bars().len(), 2);

        renderer.draw(&[], 100.0, 50.0);
        assert!(renderer.bars().is_empty());
    }

    #[test]
    fn zero_area_surface_skips_the_frame() {
        let mut renderer = FrameRenderer::new();
        renderer.draw(&samples(&[1.0]), 100.0, 50.0);
        renderer.draw(&samples(&[2.0, 3.0]), 0.0, 50.0);
        renderer.draw(&samples(&[2.0, 3.0]), 100.0, 0.0);
        // Previous shapes are left alone on skipped frames.
        assert_eq!(renderer.bars().len(), 1);
    }

    #[test]
    fn bands_partition_the_width_with_gaps() {
        let mut renderer = FrameRenderer::new();
        renderer.draw(&samples(&[1.0, 1.0, 1.0, 1.0]), 400.0, 200.0);
        let bars = renderer.bars();
        assert_eq!(bars.len(), 4);
        for (i, bar) in bars.iter().enumerate() {
            assert!((bar.width - 90.0).abs() < 1e-9);
            assert!((bar.x - (i as f64 * 100.0 + 5.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn heights_are_normalized_to_the_frame_maximum() {
        let mut renderer = FrameRenderer::new();
        renderer.draw(&samples(&[1.0, 4.0, 2.0]), 300.0, 100.0);
        let bars = renderer.bars();
        assert!((bars[0].height - 25.0).abs() < 1e-9);
        assert!((bars[1].height - 100.0).abs() < 1e-9);
        assert!((bars[2].height - 50.0).abs() < 1e-9);
    }

    #[test]
    fn all_zero_values_fall_back_to_unit_domain() {
        let mut renderer = FrameRenderer::new();
        renderer.draw(&samples(&[0.0, 0.0]), 100.0, 80.0);
        for bar in renderer.bars() {
            assert_eq!(bar.height, 0.0);
            assert_eq!(bar.color, gradient_at(0.0));
        }
    }

    #[test]
    fn gradient_endpoints_match_the_fixed_stops() {
        assert_eq!(gradient_at(0.0), Rgb { r: 145, g: 184, b: 247 });
        assert_eq!(gradient_at(1.0), Rgb { r: 255, g: 172, b: 219 });
        // Clamped outside the unit range.
        assert_eq!(gradient_at(-2.0), gradient_at(0.0));
        assert_eq!(gradient_at(9.0), gradient_at(1.0));
    }
}
