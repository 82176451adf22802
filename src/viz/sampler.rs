//! Numeric field extraction from raw telemetry lines.
//!
//! Each captured line is reduced to a single number for charting. Extraction
//! is driven by a declared, ordered list of field rules rather than ad hoc
//! matching, so a new engine field is one rule away from being chartable.

use regex::Regex;

/// Primary extraction field: the filter-envelope level the engine prints.
pub const PRIMARY_FIELD: &str = "lpenv";
/// Fallback field when the primary is absent from a line.
pub const SECONDARY_FIELD: &str = "cutoff";

/// One telemetry line reduced to a chartable value.
///
/// `index` is the line's position in the snapshot it came from: 0 is the
/// oldest captured line, the last index the newest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub index: usize,
    pub value: f64,
}

/// One named numeric field: matches `<name>:<decimal>` anywhere in a line.
#[derive(Debug)]
pub struct FieldRule {
    field: String,
    pattern: Regex,
}

impl FieldRule {
    pub fn new(field: &str) -> Self {
        // The field name is escaped, so the pattern is always valid.
        let pattern = Regex::new(&format!(
            r"{}:([0-9]+(?:\.[0-9]*)?)",
            regex::escape(field)
        ))
        .expect("field rule pattern is valid");
        Self {
            field: field.to_owned(),
            pattern,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// The field's number if this line carries it.
    fn extract(&self, line: &str) -> Option<f64> {
        self.pattern
            .captures(line)
            .and_then(|captures| captures.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}

/// Ordered extraction rules; first matching rule wins per line.
#[derive(Debug)]
pub struct SampleRules {
    rules: Vec<FieldRule>,
    default_value: f64,
}

impl SampleRules {
    pub fn new(rules: Vec<FieldRule>, default_value: f64) -> Self {
        Self {
            rules,
            default_value,
        }
    }

    /// Reduce a snapshot to samples, preserving order and length exactly.
    ///
    /// Pure: one `Sample` per entry, `index` = entry position, value from
    /// the first rule that matches, or the default when none do. Empty in,
    /// empty out - callers treat that as "nothing to draw".
    pub fn sample<S: AsRef<str>>(&self, entries: &[S]) -> Vec<Sample> {
        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| Sample {
                index,
                value: self
                    .rules
                    .iter()
                    .find_map(|rule| rule.extract(entry.as_ref()))
                    .unwrap_or(self.default_value),
            })
            .collect()
    }
}

impl Default for SampleRules {
    /// The engine's `lpenv` value, falling back to `cutoff`, defaulting to 0.
    fn default() -> Self {
        Self::new(
            vec![FieldRule::new(PRIMARY_FIELD), FieldRule::new(SECONDARY_FIELD)],
            0.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_length_always_matches_input_length() {
        let rules = SampleRules::default();
        assert!(rules.sample::<&str>(&[]).is_empty());

        let entries = ["lpenv:1.5", "no numbers here", "cutoff:800"];
        let samples = rules.sample(&entries);
        assert_eq!(samples.len(), entries.len());
        assert_eq!(samples[0].index, 0);
        assert_eq!(samples[2].index, 2);
    }

    #[test]
    fn primary_field_wins_over_secondary() {
        let rules = SampleRules::default();
        let samples = rules.sample(&["note:c3 cutoff:800 lpenv:2.5"]);
        assert_eq!(samples[0].value, 2.5);
    }

    #[test]
    fn secondary_field_used_when_primary_absent() {
        let rules = SampleRules::default();
        let samples = rules.sample(&["note:c3 cutoff:800"]);
        assert_eq!(samples[0].value, 800.0);
    }

    #[test]
    fn absent_fields_degrade_to_default() {
        let rules = SampleRules::default();
        let samples = rules.sample(&["hat tick", "lpenv:oops"]);
        assert_eq!(samples[0].value, 0.0);
        assert_eq!(samples[1].value, 0.0);
    }

    #[test]
    fn trailing_dot_number_still_parses() {
        let rules = SampleRules::default();
        let samples = rules.sample(&["lpenv:3."]);
        assert_eq!(samples[0].value, 3.0);
    }

    #[test]
    fn custom_rule_set_with_nonzero_default() {
        let rules = SampleRules::new(vec![FieldRule::new("gain")], 1.0);
        let samples = rules.sample(&["gain:0.25", "silence"]);
        assert_eq!(samples[0].value, 0.25);
        assert_eq!(samples[1].value, 1.0);
    }
}
