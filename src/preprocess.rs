use std::sync::OnceLock;

use regex::Regex;

/*
Template Preprocessing
======================

A template is ordinary pattern-engine code sprinkled with mute tokens. The
transformer rewrites it into the code that is actually evaluated, so the same
template can play fully voiced or with parts silenced depending on the current
control state.

The rewrite happens in a fixed order:

1. Strip stale tempo directives. Any line that is itself a previously
   injected `setcpm(...)` call is removed, so a tempo left over in the body
   can never override the value the controls currently hold.
2. Substitute the inline mute token. `<p1_radio>` becomes the silence
   literal when hushed, or disappears entirely when not.
3. Substitute block tokens. Each `<p1_hush>` pairs with the next
   `</p1_hush>` after it; hushed pairs wrap the span in comment markers,
   unhushed pairs simply vanish. Tokens with no partner stay in the text
   verbatim - the transformer never rejects its input.
4. Inject the header: tempo, global gain, and log emission directives,
   followed by one blank separator line, then the rewritten body.

Example mental model (hush = true, tempo = 140, gain = 1):

    <p1_radio> bd*8          setcpm(140)
    <p1_hush>                all(x => x.gain(1))
    hh*16                    all(x => x.log())
    </p1_hush>        =>
                             ~  bd*8
                             /*
                             hh*16
                             */

The function is total: any text in, text out, no failure paths. Output
depends only on the template and the config passed for that one call.
*/

/// Inline mute token, matched verbatim.
pub const INLINE_MUTE_TOKEN: &str = "<p1_radio>";
/// Opens a mutable span, matched verbatim.
pub const BLOCK_START_TOKEN: &str = "<p1_hush>";
/// Closes a mutable span, matched verbatim.
pub const BLOCK_END_TOKEN: &str = "</p1_hush>";

/// What the inline token becomes while hushed: a tilde rest plus the space
/// that separated the token from the rest of the line.
pub const SILENCE_LITERAL: &str = "~ ";

const COMMENT_OPEN: &str = "/*";
const COMMENT_CLOSE: &str = "*/";

/// Control state for one transform call.
///
/// Built from whatever the host's controls currently read; the transformer
/// never stores it. The optional `serde` feature derives (de)serialization so
/// an external settings store can persist it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransformConfig {
    /// Whether mute tokens silence their part.
    pub hush: bool,
    /// Tempo in beats per minute (> 0).
    pub tempo_bpm: f64,
    /// Global gain multiplier (>= 0, 1.0 = unity).
    pub volume_gain: f64,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            hush: false,
            tempo_bpm: 140.0,
            volume_gain: 1.0,
        }
    }
}

/// Matches a line that is exactly a previously injected tempo directive.
fn tempo_directive() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^setcpm\([0-9]+(\.[0-9]+)?\)$").expect("tempo directive pattern is valid")
    })
}

/// Rewrite a template into executable pattern-engine code.
///
/// Total function: accepts any text and never fails. The output is always
/// the three-line generated header, a blank separator, then the rewritten
/// body.
pub fn transform(template: &str, config: &TransformConfig) -> String {
    let body = strip_tempo_lines(template);
    let body = substitute_inline(&body, config.hush);
    let body = substitute_blocks(&body, config.hush);

    let mut out = header(config);
    out.push_str(&body);
    out
}

/// The generated directive header: tempo, gain, log emission, blank line.
///
/// Log emission is unconditionally on - it is the data source for the
/// telemetry chart.
pub fn header(config: &TransformConfig) -> String {
    format!(
        "setcpm({})\nall(x => x.gain({}))\nall(x => x.log())\n\n",
        config.tempo_bpm, config.volume_gain
    )
}

/// Remove every line that is itself a stale tempo directive.
///
/// Split on `\n` rather than `lines()` so templates without tempo lines come
/// back byte-identical.
fn strip_tempo_lines(template: &str) -> String {
    template
        .split('\n')
        .filter(|line| !tempo_directive().is_match(line.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn substitute_inline(text: &str, hush: bool) -> String {
    let replacement = if hush { SILENCE_LITERAL } else { "" };
    text.replace(INLINE_MUTE_TOKEN, replacement)
}

/// Pair block tokens left to right and substitute each pair.
///
/// Each start token pairs with the next end token after it; the span between
/// them is carried over verbatim, wrapped in comment markers when hushed.
/// There is no nesting or balance validation - a start with no later end, or
/// an end with no earlier start, stays in the output as literal text.
fn substitute_blocks(text: &str, hush: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    loop {
        let Some(start) = rest.find(BLOCK_START_TOKEN) else {
            out.push_str(rest);
            return out;
        };
        let after_start = start + BLOCK_START_TOKEN.len();
        let Some(end_rel) = rest[after_start..].find(BLOCK_END_TOKEN) else {
            // Unpaired start: leave the remainder untouched.
            out.push_str(rest);
            return out;
        };
        let end = after_start + end_rel;

        out.push_str(&rest[..start]);
        if hush {
            out.push_str(COMMENT_OPEN);
        }
        out.push_str(&rest[after_start..end]);
        if hush {
            out.push_str(COMMENT_CLOSE);
        }
        rest = &rest[end + BLOCK_END_TOKEN.len()..];
    }
}
