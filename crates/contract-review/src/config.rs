//! Review configuration

/// Configuration for risk analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewConfig {
    /// Characters of context kept on each side of a pattern match
    pub snippet_radius: usize,

    /// Emit `risk.term.open_ended` when no expiration or termination is found
    pub detect_open_ended_term: bool,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            snippet_radius: 60,
            detect_open_ended_term: true,
        }
    }
}

impl ReviewConfig {
    /// Pattern rules only, no structural heuristics beyond the rule table
    pub fn patterns_only() -> Self {
        Self {
            detect_open_ended_term: false,
            ..Self::default()
        }
    }
}
