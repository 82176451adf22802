//! groovescope - terminal front end for template-driven pattern sessions
//!
//! Run with: cargo run

mod app;
mod engine;
mod ui;

use app::Groovescope;

/// Demo template: a kick line behind the inline mute token and an arpeggio
/// wrapped in a mute block, so the hush toggle has something audible to do.
const DEMO_TEMPLATE: &str = r#"// demo tune
<p1_radio> bd*8
<p1_hush>
note("c3 eb3 g3 bb3").sound("sawtooth").lpf(800)
note("c5 g4").sound("triangle")
</p1_hush>
sound("hh*16")
sound("sd*4")
"#;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    Groovescope::new()
        .tempo(140.0)
        .gain(1.0)
        .template(DEMO_TEMPLATE)
        .run()
}
