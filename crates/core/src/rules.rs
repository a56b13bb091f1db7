//! Style rule configuration.
//!
//! A [`RuleSet`] is plain data: it can be built in code, loaded from JSON,
//! or taken from [`RuleSet::default`], which carries the house style the
//! tool ships with. Missing fields in a JSON file fall back to the defaults.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The full set of style rules applied to a deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Matchers run against whole paragraph text.
    pub forbidden_patterns: Vec<PatternRule>,

    /// Runs strictly below this size (points) are too small.
    pub min_font_size: Option<f64>,

    /// Runs strictly above this size (points) are too large.
    pub max_font_size: Option<f64>,

    /// Which typefaces are acceptable.
    pub font_policy: Option<FontPolicy>,

    /// Every sized run must use exactly this size (points).
    pub expected_font_size: Option<f64>,

    /// Maximum trimmed characters per slide.
    pub character_limit: Option<usize>,

    /// Wrong token → correct token.
    pub required_spellings: BTreeMap<String, String>,

    /// How runs are picked for highlighting when a pattern matches.
    pub run_flagging: RunFlagging,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            forbidden_patterns: vec![
                // z.B., z. B., z.\u{00A0}B.
                PatternRule::Regex(r"z\.\s*B\.".to_string()),
                PatternRule::Regex(r"\bdu\b".to_string()),
                PatternRule::Literal("Du".to_string()),
            ],
            min_font_size: Some(11.0),
            max_font_size: Some(22.0),
            font_policy: Some(FontPolicy::Whitelist(vec![
                "Arial".to_string(),
                "Verdana".to_string(),
                "Frutiger".to_string(),
            ])),
            expected_font_size: None,
            character_limit: None,
            required_spellings: BTreeMap::new(),
            run_flagging: RunFlagging::default(),
        }
    }
}

impl RuleSet {
    /// A rule set with nothing enabled.
    pub fn empty() -> Self {
        Self {
            forbidden_patterns: Vec::new(),
            min_font_size: None,
            max_font_size: None,
            font_policy: None,
            expected_font_size: None,
            character_limit: None,
            required_spellings: BTreeMap::new(),
            run_flagging: RunFlagging::default(),
        }
    }

    /// Decode a rule set from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::ConfigError(e.to_string()))
    }

    /// Encode this rule set as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::ConfigError(e.to_string()))
    }
}

/// A forbidden-text matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternRule {
    /// A regular expression, used as written.
    Regex(String),
    /// Text matched exactly.
    Literal(String),
}

impl PatternRule {
    /// The regular expression source this rule compiles to.
    pub fn to_regex_source(&self) -> String {
        match self {
            Self::Regex(source) => source.clone(),
            Self::Literal(text) => regex::escape(text),
        }
    }
}

/// Which typefaces runs may use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "lowercase")]
pub enum FontPolicy {
    /// Exactly one typeface is allowed.
    Exact(String),
    /// Any of the listed typefaces is allowed.
    Whitelist(Vec<String>),
}

impl FontPolicy {
    /// Whether a run using `font` satisfies this policy.
    pub fn accepts(&self, font: &str) -> bool {
        match self {
            Self::Exact(name) => name == font,
            Self::Whitelist(names) => names.iter().any(|n| n == font),
        }
    }
}

/// Strategy for choosing which runs to highlight for a pattern match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunFlagging {
    /// Flag every run that contains any character of the matched text.
    #[default]
    SharedCharacter,
    /// Flag only runs whose span overlaps the match.
    Overlap,
}
