//! Style rule evaluation.
//!
//! [`StyleChecker`] walks every slide's flattened shapes, paragraphs, and
//! runs, records a [`Finding`] for each rule violation, and produces an
//! annotated copy of the deck in which every offending run carries the
//! alert color. The caller's deck is never modified.

use crate::error::{Error, Result};
use crate::flatten::flatten;
use crate::normalize::TextNormalizer;
use crate::rules::{RuleSet, RunFlagging};
use crate::types::{Deck, Paragraph, Run, Slide};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Sizes closer than this (points) are considered equal.
const SIZE_TOLERANCE: f64 = 0.005;

/// Empty typefaces and theme references such as `+mn-lt` name no concrete
/// font and are treated as unknown.
fn is_theme_font(font: &str) -> bool {
    font.is_empty() || font.starts_with('+')
}

/// Kind of style violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    ForbiddenSpelling,
    FontTooSmall,
    FontTooLarge,
    FontMismatch,
    FontSizeMismatch,
    IncorrectSpelling,
    CharacterLimitExceeded,
}

impl Category {
    /// Human-readable label for reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::ForbiddenSpelling => "Forbidden Spelling",
            Self::FontTooSmall => "Font Too Small",
            Self::FontTooLarge => "Font Too Large",
            Self::FontMismatch => "Font Mismatch",
            Self::FontSizeMismatch => "Font Size Mismatch",
            Self::IncorrectSpelling => "Incorrect Spelling",
            Self::CharacterLimitExceeded => "Character Limit Exceeded",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One recorded style violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// 1-based slide number.
    pub slide: usize,

    pub category: Category,

    /// What matched or what was wrong (e.g. `z. B.`, `< 11pt`).
    pub detail: String,

    /// Surrounding text, usually the paragraph.
    pub context: String,
}

impl Finding {
    pub fn new(
        slide: usize,
        category: Category,
        detail: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            slide,
            category,
            detail: detail.into(),
            context: context.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Slide {}: ❌ {} → “{}” in: “{}”",
            self.slide, self.category, self.detail, self.context
        )
    }
}

/// Result of checking one slide.
#[derive(Debug, Clone)]
pub struct SlideReport {
    pub findings: Vec<Finding>,
    /// Copy of the slide with offending runs flagged.
    pub annotated: Slide,
}

/// Result of checking a whole deck.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// Findings ordered by slide, then by discovery order.
    pub findings: Vec<Finding>,
    /// Copy of the deck with offending runs flagged.
    pub annotated: Deck,
}

impl CheckReport {
    /// Whether no rule fired.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Number of findings of the given category.
    pub fn count(&self, category: Category) -> usize {
        self.findings
            .iter()
            .filter(|f| f.category == category)
            .count()
    }
}

/// A required spelling with its normalized forms precomputed.
#[derive(Debug, Clone)]
struct SpellingRule {
    wrong: String,
    correct: String,
    wrong_normalized: String,
    correct_normalized: String,
}

/// Applies a [`RuleSet`] to slides.
#[derive(Debug, Clone)]
pub struct StyleChecker {
    rules: RuleSet,
    patterns: Vec<Regex>,
    spellings: Vec<SpellingRule>,
    normalizer: TextNormalizer,
}

impl StyleChecker {
    /// Compile a rule set into a checker.
    ///
    /// Fails if a forbidden pattern is not a valid regular expression.
    pub fn new(rules: RuleSet) -> Result<Self> {
        let patterns = rules
            .forbidden_patterns
            .iter()
            .map(|rule| {
                let source = rule.to_regex_source();
                Regex::new(&source).map_err(|e| Error::InvalidRule(format!("{}: {}", source, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        let normalizer = TextNormalizer::new();
        let spellings = rules
            .required_spellings
            .iter()
            .map(|(wrong, correct)| SpellingRule {
                wrong: wrong.clone(),
                correct: correct.clone(),
                wrong_normalized: normalizer.normalize(wrong),
                correct_normalized: normalizer.normalize(correct),
            })
            .collect();

        Ok(Self {
            rules,
            patterns,
            spellings,
            normalizer,
        })
    }

    /// Check every slide of a deck in order.
    pub fn check(&self, deck: &Deck) -> CheckReport {
        let mut annotated = deck.clone();
        let mut findings = Vec::new();

        for slide in &mut annotated.slides {
            findings.extend(self.evaluate_slide(slide));
        }

        log::info!(
            "{}: {} slides checked, {} findings",
            deck.filename,
            deck.slides.len(),
            findings.len()
        );

        CheckReport {
            findings,
            annotated,
        }
    }

    /// Check a single slide.
    pub fn check_slide(&self, slide: &Slide) -> SlideReport {
        let mut annotated = slide.clone();
        let findings = self.evaluate_slide(&mut annotated);
        SlideReport {
            findings,
            annotated,
        }
    }

    fn evaluate_slide(&self, slide: &mut Slide) -> Vec<Finding> {
        let number = slide.number;
        let mut findings = Vec::new();
        let mut characters = 0usize;

        for id in flatten(slide) {
            let Some(shape) = slide.shape_mut(id) else {
                continue;
            };
            log::debug!("Slide {} → shape {:?} ({:?})", number, shape.name, shape.kind);

            let Some(frame) = shape.text_frame.as_mut() else {
                continue;
            };

            for paragraph in &mut frame.paragraphs {
                characters += paragraph
                    .runs
                    .iter()
                    .map(|r| r.text.trim().chars().count())
                    .sum::<usize>();
                self.check_paragraph(number, paragraph, &mut findings);
            }
        }

        if let Some(limit) = self.rules.character_limit {
            if characters > limit {
                findings.push(Finding::new(
                    number,
                    Category::CharacterLimitExceeded,
                    format!("{} characters", characters),
                    format!("limit {}", limit),
                ));
            }
        }

        findings
    }

    fn check_paragraph(&self, slide: usize, paragraph: &mut Paragraph, findings: &mut Vec<Finding>) {
        let text = paragraph.text();

        // Forbidden patterns run on the joined text so matches may span runs.
        for pattern in &self.patterns {
            for m in pattern.find_iter(&text) {
                if m.as_str().is_empty() {
                    continue;
                }
                self.flag_match(&mut paragraph.runs, m.as_str(), m.range());
                findings.push(Finding::new(
                    slide,
                    Category::ForbiddenSpelling,
                    m.as_str(),
                    &text,
                ));
            }
        }

        self.check_size_bounds(slide, paragraph, &text, findings);
        self.check_fonts(slide, paragraph, &text, findings);
        self.check_expected_size(slide, paragraph, &text, findings);
        self.check_spellings(slide, paragraph, &text, findings);
    }

    fn flag_match(&self, runs: &mut [Run], matched: &str, span: Range<usize>) {
        match self.rules.run_flagging {
            RunFlagging::SharedCharacter => {
                for run in runs.iter_mut() {
                    if run.text.chars().any(|c| matched.contains(c)) {
                        run.flag();
                    }
                }
            }
            RunFlagging::Overlap => {
                let mut offset = 0;
                for run in runs.iter_mut() {
                    let start = offset;
                    offset += run.text.len();
                    if start < offset && start < span.end && span.start < offset {
                        run.flag();
                    }
                }
            }
        }
    }

    /// At most one too-small and one too-large finding per paragraph.
    fn check_size_bounds(
        &self,
        slide: usize,
        paragraph: &mut Paragraph,
        text: &str,
        findings: &mut Vec<Finding>,
    ) {
        let min = self.rules.min_font_size;
        let max = self.rules.max_font_size;
        let mut too_small = false;
        let mut too_large = false;

        for run in &mut paragraph.runs {
            log::debug!("Slide {} → text: {:?} | size: {:?}", slide, run.text, run.size);
            let Some(size) = run.size else {
                continue;
            };

            if min.is_some_and(|min| size < min) {
                run.flag();
                too_small = true;
            } else if max.is_some_and(|max| size > max) {
                run.flag();
                too_large = true;
            }
        }

        if let (true, Some(min)) = (too_small, min) {
            findings.push(Finding::new(
                slide,
                Category::FontTooSmall,
                format!("< {}pt", min),
                text,
            ));
        }
        if let (true, Some(max)) = (too_large, max) {
            findings.push(Finding::new(
                slide,
                Category::FontTooLarge,
                format!("> {}pt", max),
                text,
            ));
        }
    }

    fn check_fonts(&self, slide: usize, paragraph: &mut Paragraph, text: &str, findings: &mut Vec<Finding>) {
        let Some(policy) = &self.rules.font_policy else {
            return;
        };

        for run in &mut paragraph.runs {
            let rejected = run
                .font
                .as_deref()
                .filter(|font| !is_theme_font(font) && !policy.accepts(font))
                .map(str::to_string);

            if let Some(font) = rejected {
                run.flag();
                findings.push(Finding::new(slide, Category::FontMismatch, font, text));
            }
        }
    }

    fn check_expected_size(
        &self,
        slide: usize,
        paragraph: &mut Paragraph,
        text: &str,
        findings: &mut Vec<Finding>,
    ) {
        let Some(expected) = self.rules.expected_font_size else {
            return;
        };

        for run in &mut paragraph.runs {
            let Some(size) = run.size else {
                continue;
            };
            if (size - expected).abs() > SIZE_TOLERANCE {
                run.flag();
                findings.push(Finding::new(
                    slide,
                    Category::FontSizeMismatch,
                    format!("{}pt (expected {}pt)", size, expected),
                    text,
                ));
            }
        }
    }

    /// Substring test on normalized text: a rule fires when the wrong token
    /// is present and the correct one is not.
    fn check_spellings(
        &self,
        slide: usize,
        paragraph: &mut Paragraph,
        text: &str,
        findings: &mut Vec<Finding>,
    ) {
        if self.spellings.is_empty() {
            return;
        }
        let normalized = self.normalizer.normalize(text);

        for rule in &self.spellings {
            if rule.wrong_normalized.is_empty()
                || !normalized.contains(&rule.wrong_normalized)
                || normalized.contains(&rule.correct_normalized)
            {
                continue;
            }

            self.flag_spelling(&mut paragraph.runs, &rule.wrong_normalized);
            findings.push(Finding::new(
                slide,
                Category::IncorrectSpelling,
                format!("{} → {}", rule.wrong, rule.correct),
                text,
            ));
        }
    }

    /// Flag every run that contributes a byte to an occurrence of `token`
    /// in the paragraph's normalized text, so tokens split across runs are
    /// still marked.
    fn flag_spelling(&self, runs: &mut [Run], token: &str) {
        let (text, owners) = self
            .normalizer
            .normalize_segments(runs.iter().map(|r| r.text.as_str()));

        let mut hit = vec![false; runs.len()];
        for (start, matched) in text.match_indices(token) {
            for &owner in &owners[start..start + matched.len()] {
                hit[owner] = true;
            }
        }

        for (run, hit) in runs.iter_mut().zip(hit) {
            if hit {
                run.flag();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{FontPolicy, PatternRule};
    use crate::types::{RgbColor, Shape, TextFrame};

    /// Build a slide with one text box holding one paragraph per entry.
    fn slide_with(number: usize, paragraphs: Vec<Vec<Run>>) -> Slide {
        let mut frame = TextFrame::new();
        for runs in paragraphs {
            let mut p = Paragraph::new();
            for run in runs {
                p.add_run(run);
            }
            frame.add_paragraph(p);
        }
        let mut slide = Slide::new(number);
        slide.add_shape(None, Shape::text_box(frame));
        slide
    }

    fn runs_of(slide: &Slide) -> Vec<&Run> {
        slide.runs().collect()
    }

    fn checker(rules: RuleSet) -> StyleChecker {
        StyleChecker::new(rules).unwrap()
    }

    fn forbidden(pattern: &str) -> RuleSet {
        RuleSet {
            forbidden_patterns: vec![PatternRule::Regex(pattern.to_string())],
            ..RuleSet::empty()
        }
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = StyleChecker::new(forbidden("(unclosed")).unwrap_err();
        assert!(matches!(err, Error::InvalidRule(_)));
    }

    #[test]
    fn test_forbidden_match_spans_runs() {
        let slide = slide_with(1, vec![vec![Run::new(0, "Das ist z."), Run::new(1, " B. gut")]]);
        let report = checker(forbidden(r"z\.\s*B\.")).check_slide(&slide);

        assert_eq!(
            report.findings,
            vec![Finding::new(
                1,
                Category::ForbiddenSpelling,
                "z. B.",
                "Das ist z. B. gut"
            )]
        );
        assert!(runs_of(&report.annotated).iter().all(|r| r.is_flagged()));
    }

    #[test]
    fn test_each_occurrence_is_a_finding() {
        let slide = slide_with(1, vec![vec![Run::new(0, "z.B. eins, z. B. zwei, z.B. drei")]]);
        let report = checker(forbidden(r"z\.\s*B\.")).check_slide(&slide);

        assert_eq!(report.findings.len(), 3);
        assert!(report
            .findings
            .iter()
            .all(|f| f.category == Category::ForbiddenSpelling));
    }

    #[test]
    fn test_overlapping_rules_are_not_deduplicated() {
        let rules = RuleSet {
            forbidden_patterns: vec![
                PatternRule::Regex(r"\bdu\b".to_string()),
                PatternRule::Literal("du".to_string()),
            ],
            ..RuleSet::empty()
        };
        let slide = slide_with(1, vec![vec![Run::new(0, "weil du da bist")]]);
        let report = checker(rules).check_slide(&slide);

        assert_eq!(report.findings.len(), 2);
    }

    #[test]
    fn test_shared_character_flagging() {
        // "ok" shares no character with "du"; "und" does.
        let slide = slide_with(1, vec![vec![Run::new(0, "ok"), Run::new(1, " und "), Run::new(2, "du")]]);
        let report = checker(forbidden(r"\bdu\b")).check_slide(&slide);

        let flags: Vec<bool> = runs_of(&report.annotated).iter().map(|r| r.is_flagged()).collect();
        assert_eq!(flags, vec![false, true, true]);
    }

    #[test]
    fn test_overlap_flagging() {
        let rules = RuleSet {
            run_flagging: RunFlagging::Overlap,
            ..forbidden(r"\bdu\b")
        };
        let slide = slide_with(1, vec![vec![Run::new(0, "ok"), Run::new(1, " und "), Run::new(2, "du")]]);
        let report = checker(rules).check_slide(&slide);

        let flags: Vec<bool> = runs_of(&report.annotated).iter().map(|r| r.is_flagged()).collect();
        assert_eq!(flags, vec![false, false, true]);
    }

    #[test]
    fn test_font_too_small_once_per_paragraph() {
        let rules = RuleSet {
            min_font_size: Some(11.0),
            max_font_size: Some(22.0),
            ..RuleSet::empty()
        };
        let slide = slide_with(
            1,
            vec![vec![
                Run::new(0, "a").with_size(8.0),
                Run::new(1, "b").with_size(9.0),
                Run::new(2, "c").with_size(12.0),
            ]],
        );
        let report = checker(rules).check_slide(&slide);

        assert_eq!(
            report.findings,
            vec![Finding::new(1, Category::FontTooSmall, "< 11pt", "abc")]
        );
        let flags: Vec<bool> = runs_of(&report.annotated).iter().map(|r| r.is_flagged()).collect();
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn test_font_too_small_and_too_large_in_same_paragraph() {
        let rules = RuleSet {
            min_font_size: Some(11.0),
            max_font_size: Some(22.0),
            ..RuleSet::empty()
        };
        let slide = slide_with(
            1,
            vec![vec![Run::new(0, "a").with_size(30.0), Run::new(1, "b").with_size(10.5)]],
        );
        let report = checker(rules).check_slide(&slide);

        let categories: Vec<Category> = report.findings.iter().map(|f| f.category).collect();
        assert_eq!(categories, vec![Category::FontTooSmall, Category::FontTooLarge]);
        assert_eq!(report.findings[1].detail, "> 22pt");
    }

    #[test]
    fn test_size_bounds_are_exclusive() {
        let rules = RuleSet {
            min_font_size: Some(11.0),
            max_font_size: Some(22.0),
            ..RuleSet::empty()
        };
        let slide = slide_with(
            1,
            vec![vec![
                Run::new(0, "a").with_size(11.0),
                Run::new(1, "b").with_size(22.0),
                Run::new(2, "c"),
            ]],
        );
        let report = checker(rules).check_slide(&slide);

        assert!(report.findings.is_empty());
        assert!(report.annotated.flagged_runs().is_empty());
    }

    #[test]
    fn test_font_whitelist() {
        let rules = RuleSet {
            font_policy: Some(FontPolicy::Whitelist(vec!["Arial".into(), "Verdana".into()])),
            ..RuleSet::empty()
        };
        let slide = slide_with(
            2,
            vec![vec![
                Run::new(0, "a").with_font("Arial"),
                Run::new(1, "b").with_font("Calibri"),
                Run::new(2, "c").with_font("Calibri"),
                Run::new(3, "d"),
            ]],
        );
        let report = checker(rules).check_slide(&slide);

        assert_eq!(
            report.findings,
            vec![
                Finding::new(2, Category::FontMismatch, "Calibri", "abcd"),
                Finding::new(2, Category::FontMismatch, "Calibri", "abcd"),
            ]
        );
        assert_eq!(report.annotated.flagged_runs(), vec![1, 2]);
    }

    #[test]
    fn test_theme_font_references_are_unknown() {
        let slide = slide_with(
            1,
            vec![vec![
                Run::new(0, "a").with_font("+mn-lt"),
                Run::new(1, "b").with_font("+mj-ea"),
                Run::new(2, "c").with_font(""),
            ]],
        );
        let report = checker(RuleSet::default()).check_slide(&slide);

        assert!(report.findings.is_empty());
        assert!(report.annotated.flagged_runs().is_empty());
    }

    #[test]
    fn test_font_exact() {
        let rules = RuleSet {
            font_policy: Some(FontPolicy::Exact("Frutiger".into())),
            ..RuleSet::empty()
        };
        let slide = slide_with(1, vec![vec![Run::new(0, "a").with_font("Arial")]]);
        let report = checker(rules).check_slide(&slide);

        assert_eq!(report.findings[0].category, Category::FontMismatch);
        assert_eq!(report.findings[0].detail, "Arial");
    }

    #[test]
    fn test_expected_font_size() {
        let rules = RuleSet {
            expected_font_size: Some(18.0),
            ..RuleSet::empty()
        };
        let slide = slide_with(
            1,
            vec![vec![Run::new(0, "a").with_size(18.0), Run::new(1, "b").with_size(20.0)]],
        );
        let report = checker(rules).check_slide(&slide);

        assert_eq!(
            report.findings,
            vec![Finding::new(
                1,
                Category::FontSizeMismatch,
                "20pt (expected 18pt)",
                "ab"
            )]
        );
    }

    #[test]
    fn test_character_limit_exceeded() {
        let rules = RuleSet {
            character_limit: Some(300),
            ..RuleSet::empty()
        };
        let slide = slide_with(
            4,
            vec![
                vec![Run::new(0, format!("  {}  ", "a".repeat(200)))],
                vec![Run::new(1, "b".repeat(150))],
            ],
        );
        let report = checker(rules).check_slide(&slide);

        assert_eq!(
            report.findings,
            vec![Finding::new(
                4,
                Category::CharacterLimitExceeded,
                "350 characters",
                "limit 300"
            )]
        );
    }

    #[test]
    fn test_character_limit_not_exceeded_at_limit() {
        let rules = RuleSet {
            character_limit: Some(350),
            ..RuleSet::empty()
        };
        let slide = slide_with(1, vec![vec![Run::new(0, "a".repeat(200)), Run::new(1, "b".repeat(150))]]);
        assert!(checker(rules).check_slide(&slide).findings.is_empty());
    }

    #[test]
    fn test_character_limit_counts_grouped_shapes() {
        let rules = RuleSet {
            character_limit: Some(5),
            ..RuleSet::empty()
        };
        let mut slide = Slide::new(1);
        let group = slide.add_shape(None, Shape::group());
        for (id, text) in ["abc", "def"].iter().enumerate() {
            let mut p = Paragraph::new();
            p.add_run(Run::new(id, *text));
            let mut frame = TextFrame::new();
            frame.add_paragraph(p);
            slide.add_shape(Some(group), Shape::text_box(frame));
        }

        let report = checker(rules).check_slide(&slide);
        assert_eq!(report.findings[0].detail, "6 characters");
    }

    #[test]
    fn test_required_spelling() {
        let rules = RuleSet {
            required_spellings: [("Email".to_string(), "E-Mail".to_string())].into(),
            ..RuleSet::empty()
        };
        let slide = slide_with(1, vec![vec![Run::new(0, "Schreib eine "), Run::new(1, "EMAIL")]]);
        let report = checker(rules).check_slide(&slide);

        assert_eq!(
            report.findings,
            vec![Finding::new(
                1,
                Category::IncorrectSpelling,
                "Email → E-Mail",
                "Schreib eine EMAIL"
            )]
        );
        assert_eq!(report.annotated.flagged_runs(), vec![1]);
    }

    #[test]
    fn test_required_spelling_split_across_runs_is_flagged() {
        let rules = RuleSet {
            required_spellings: [("email".to_string(), "e-mail".to_string())].into(),
            ..RuleSet::empty()
        };
        let slide = slide_with(
            1,
            vec![vec![
                Run::new(0, "Schreib eine E"),
                Run::new(1, "mail"),
                Run::new(2, " bitte"),
            ]],
        );
        let report = checker(rules).check_slide(&slide);

        assert_eq!(report.count(Category::IncorrectSpelling), 1);
        assert_eq!(report.annotated.flagged_runs(), vec![0, 1]);
    }

    #[test]
    fn test_required_spelling_suppressed_when_correct_form_present() {
        let rules = RuleSet {
            required_spellings: [("email".to_string(), "e-mail".to_string())].into(),
            ..RuleSet::empty()
        };
        let slide = slide_with(1, vec![vec![Run::new(0, "email oder E-Mail")]]);
        assert!(checker(rules).check_slide(&slide).findings.is_empty());
    }

    #[test]
    fn test_required_spelling_case_only_rule_never_fires() {
        // Lowercasing makes "Du" and "du" the same token.
        let rules = RuleSet {
            required_spellings: [("Du".to_string(), "du".to_string())].into(),
            ..RuleSet::empty()
        };
        let slide = slide_with(1, vec![vec![Run::new(0, "Du bist da")]]);
        assert!(checker(rules).check_slide(&slide).findings.is_empty());
    }

    #[test]
    fn test_required_spelling_is_a_substring_test() {
        let rules = RuleSet {
            required_spellings: [("du".to_string(), "Sie".to_string())].into(),
            ..RuleSet::empty()
        };
        let slide = slide_with(1, vec![vec![Run::new(0, "Personaldubel")]]);
        let report = checker(rules).check_slide(&slide);

        assert_eq!(report.findings.len(), 1);
    }

    #[test]
    fn test_empty_paragraphs_and_runs() {
        let slide = slide_with(1, vec![vec![], vec![Run::new(0, "")]]);
        let rules = RuleSet {
            character_limit: Some(0),
            ..RuleSet::default()
        };
        assert!(checker(rules).check_slide(&slide).findings.is_empty());
    }

    #[test]
    fn test_check_does_not_touch_input() {
        let mut deck = Deck::new("deck.pptx");
        deck.add_slide(slide_with(1, vec![vec![Run::new(0, "ok").with_size(8.0)]]));

        let report = checker(RuleSet::default()).check(&deck);

        assert_eq!(report.findings.len(), 1);
        assert!(deck.slides[0].flagged_runs().is_empty());
        assert_eq!(report.annotated.slides[0].flagged_runs(), vec![0]);
        assert_eq!(
            report.annotated.slides[0].runs().next().unwrap().color,
            Some(RgbColor::ALERT)
        );
    }

    #[test]
    fn test_two_slide_deck() {
        let mut deck = Deck::new("deck.pptx");
        deck.add_slide(slide_with(
            1,
            vec![vec![Run::new(0, "z. B. das ist gut").with_size(24.0).with_font("Arial")]],
        ));
        deck.add_slide(slide_with(2, vec![vec![Run::new(0, "ok").with_size(8.0)]]));

        let rules = RuleSet {
            max_font_size: Some(30.0),
            ..RuleSet::default()
        };
        let report = checker(rules).check(&deck);

        assert_eq!(
            report.findings,
            vec![
                Finding::new(1, Category::ForbiddenSpelling, "z. B.", "z. B. das ist gut"),
                Finding::new(2, Category::FontTooSmall, "< 11pt", "ok"),
            ]
        );
        assert_eq!(report.count(Category::FontTooSmall), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_finding_display() {
        let finding = Finding::new(3, Category::FontTooLarge, "> 22pt", "Titel");
        assert_eq!(
            finding.to_string(),
            "Slide 3: ❌ Font Too Large → “> 22pt” in: “Titel”"
        );
    }
}
