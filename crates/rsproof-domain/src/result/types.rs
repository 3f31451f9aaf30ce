//! Serializable result types returned by check operations.

use serde::{Deserialize, Serialize};

/// Outcome of checking one input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// The input text, echoed back exactly as received.
    pub text: String,
    /// Detected issues in the order the engine reported them.
    pub matches: Vec<RuleMatchResult>,
}

impl CheckResult {
    /// Creates a result with no detected issues.
    pub fn clean(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            matches: Vec::new(),
        }
    }
}

/// A single detected issue within a checked text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMatchResult {
    /// Human-readable explanation. May embed corrections marked up as
    /// `<suggestion>...</suggestion>`.
    pub message: String,
    /// Shorter explanation, empty when the engine has none.
    pub short_message: String,
    /// Zero-based position where the issue starts, in UTF-16 code units
    /// (the string indexing used by Java and JavaScript clients).
    pub offset: usize,
    /// Number of UTF-16 code units covered by the issue.
    pub length: usize,
    /// Candidate replacements for the flagged span, best first.
    pub replacements: Vec<String>,
    /// Highlighting class of the match.
    #[serde(rename = "type")]
    pub match_type: MatchType,
    /// The rule that produced this match.
    pub rule: RuleResult,
}

/// Highlighting class of a match.
///
/// Unlike a rule's category this belongs to the individual match and is
/// mainly used by clients to pick an underline color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchType {
    /// Spelling errors, typically red.
    UnknownWord,
    /// Style suggestions, typically light blue.
    Hint,
    /// Everything else including grammar, typically yellow/orange.
    Other,
}

impl MatchType {
    /// All match types, in declaration order.
    pub const ALL: [MatchType; 3] = [MatchType::UnknownWord, MatchType::Hint, MatchType::Other];

    /// Wire spelling of the match type.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::UnknownWord => "UnknownWord",
            MatchType::Hint => "Hint",
            MatchType::Other => "Other",
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes the rule behind a match, independent of any occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleResult {
    /// Stable rule identifier (`A-Z` and `_`), unchanged across engine versions.
    pub id: String,
    /// Secondary identifier, mostly set for rules defined in external files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_id: Option<String>,
    /// File the rule was loaded from, when it came from a definition file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    /// General description of what the rule detects.
    pub description: String,
    /// ITS localization quality issue type.
    pub issue: ItsIssueType,
    /// Classification bucket the rule belongs to.
    pub category: CategoryResult,
}

/// Stable classification bucket of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub id: String,
    pub name: String,
}

/// Localization Quality Issue Type from the Internationalization Tag Set
/// (ITS) 2.0. Serialized with the lowercase hyphenated ITS spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItsIssueType {
    Terminology,
    Mistranslation,
    Omission,
    Untranslated,
    Addition,
    Duplication,
    Inconsistency,
    Grammar,
    Legal,
    Register,
    LocaleSpecificContent,
    LocaleViolation,
    Style,
    Characters,
    Misspelling,
    Typographical,
    Formatting,
    InconsistentEntities,
    Numbers,
    Markup,
    PatternProblem,
    Whitespace,
    Internationalization,
    Length,
    NonConformance,
    Uncategorized,
    Other,
}

impl ItsIssueType {
    /// All issue types, in declaration order.
    pub const ALL: [ItsIssueType; 27] = [
        ItsIssueType::Terminology,
        ItsIssueType::Mistranslation,
        ItsIssueType::Omission,
        ItsIssueType::Untranslated,
        ItsIssueType::Addition,
        ItsIssueType::Duplication,
        ItsIssueType::Inconsistency,
        ItsIssueType::Grammar,
        ItsIssueType::Legal,
        ItsIssueType::Register,
        ItsIssueType::LocaleSpecificContent,
        ItsIssueType::LocaleViolation,
        ItsIssueType::Style,
        ItsIssueType::Characters,
        ItsIssueType::Misspelling,
        ItsIssueType::Typographical,
        ItsIssueType::Formatting,
        ItsIssueType::InconsistentEntities,
        ItsIssueType::Numbers,
        ItsIssueType::Markup,
        ItsIssueType::PatternProblem,
        ItsIssueType::Whitespace,
        ItsIssueType::Internationalization,
        ItsIssueType::Length,
        ItsIssueType::NonConformance,
        ItsIssueType::Uncategorized,
        ItsIssueType::Other,
    ];

    /// ITS spelling of the issue type (matches the serialized form).
    pub fn as_str(&self) -> &'static str {
        match self {
            ItsIssueType::Terminology => "terminology",
            ItsIssueType::Mistranslation => "mistranslation",
            ItsIssueType::Omission => "omission",
            ItsIssueType::Untranslated => "untranslated",
            ItsIssueType::Addition => "addition",
            ItsIssueType::Duplication => "duplication",
            ItsIssueType::Inconsistency => "inconsistency",
            ItsIssueType::Grammar => "grammar",
            ItsIssueType::Legal => "legal",
            ItsIssueType::Register => "register",
            ItsIssueType::LocaleSpecificContent => "locale-specific-content",
            ItsIssueType::LocaleViolation => "locale-violation",
            ItsIssueType::Style => "style",
            ItsIssueType::Characters => "characters",
            ItsIssueType::Misspelling => "misspelling",
            ItsIssueType::Typographical => "typographical",
            ItsIssueType::Formatting => "formatting",
            ItsIssueType::InconsistentEntities => "inconsistent-entities",
            ItsIssueType::Numbers => "numbers",
            ItsIssueType::Markup => "markup",
            ItsIssueType::PatternProblem => "pattern-problem",
            ItsIssueType::Whitespace => "whitespace",
            ItsIssueType::Internationalization => "internationalization",
            ItsIssueType::Length => "length",
            ItsIssueType::NonConformance => "non-conformance",
            ItsIssueType::Uncategorized => "uncategorized",
            ItsIssueType::Other => "other",
        }
    }
}

impl std::fmt::Display for ItsIssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
