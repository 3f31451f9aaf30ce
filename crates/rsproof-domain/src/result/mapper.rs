//! Translation of raw engine matches into result types.
//!
//! All functions are pure and stateless. The two enumeration translations
//! are closed: a value outside the known set is a [`MappingError`], never a
//! silent default, so engine upgrades that add values surface immediately.

use crate::engine::{RawMatch, RawRule};
use crate::error::MappingError;

use super::types::{CategoryResult, ItsIssueType, MatchType, RuleMatchResult, RuleResult};

/// Maps one raw match, preserving message, span, replacements and rule.
pub fn map_match(raw: RawMatch) -> Result<RuleMatchResult, MappingError> {
    let length = raw
        .to_pos
        .checked_sub(raw.from_pos)
        .ok_or_else(|| MappingError::NegativeSpan {
            rule_id: raw.rule.id.clone(),
            from_pos: raw.from_pos,
            to_pos: raw.to_pos,
        })?;

    let match_type = map_type(&raw.match_type)?;
    let rule = map_rule(raw.rule)?;

    Ok(RuleMatchResult {
        message: raw.message,
        short_message: raw.short_message.unwrap_or_default(),
        offset: raw.from_pos,
        length,
        replacements: raw.suggested_replacements.unwrap_or_default(),
        match_type,
        rule,
    })
}

/// Maps the engine's native match type name.
pub fn map_type(raw: &str) -> Result<MatchType, MappingError> {
    match raw {
        "UnknownWord" => Ok(MatchType::UnknownWord),
        "Hint" => Ok(MatchType::Hint),
        "Other" => Ok(MatchType::Other),
        other => Err(MappingError::UnknownMatchType {
            value: other.to_string(),
        }),
    }
}

/// Maps the engine's native ITS issue type name.
pub fn map_issue_type(raw: &str) -> Result<ItsIssueType, MappingError> {
    let issue = match raw {
        "terminology" => ItsIssueType::Terminology,
        "mistranslation" => ItsIssueType::Mistranslation,
        "omission" => ItsIssueType::Omission,
        "untranslated" => ItsIssueType::Untranslated,
        "addition" => ItsIssueType::Addition,
        "duplication" => ItsIssueType::Duplication,
        "inconsistency" => ItsIssueType::Inconsistency,
        "grammar" => ItsIssueType::Grammar,
        "legal" => ItsIssueType::Legal,
        "register" => ItsIssueType::Register,
        "locale-specific-content" => ItsIssueType::LocaleSpecificContent,
        "locale-violation" => ItsIssueType::LocaleViolation,
        "style" => ItsIssueType::Style,
        "characters" => ItsIssueType::Characters,
        "misspelling" => ItsIssueType::Misspelling,
        "typographical" => ItsIssueType::Typographical,
        "formatting" => ItsIssueType::Formatting,
        "inconsistent-entities" => ItsIssueType::InconsistentEntities,
        "numbers" => ItsIssueType::Numbers,
        "markup" => ItsIssueType::Markup,
        "pattern-problem" => ItsIssueType::PatternProblem,
        "whitespace" => ItsIssueType::Whitespace,
        "internationalization" => ItsIssueType::Internationalization,
        "length" => ItsIssueType::Length,
        "non-conformance" => ItsIssueType::NonConformance,
        "uncategorized" => ItsIssueType::Uncategorized,
        "other" => ItsIssueType::Other,
        other => {
            return Err(MappingError::UnknownIssueType {
                value: other.to_string(),
            })
        }
    };
    Ok(issue)
}

/// Maps a raw rule including its issue type and category.
pub fn map_rule(raw: RawRule) -> Result<RuleResult, MappingError> {
    let issue = map_issue_type(&raw.issue_type)?;

    Ok(RuleResult {
        id: raw.id,
        sub_id: raw.sub_id,
        source_file: raw.source_file,
        description: raw.description,
        issue,
        category: CategoryResult {
            id: raw.category.id,
            name: raw.category.name,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::subject_verb_agreement;
    use crate::engine::RawCategory;

    const NATIVE_ISSUE_TYPES: [&str; 27] = [
        "terminology",
        "mistranslation",
        "omission",
        "untranslated",
        "addition",
        "duplication",
        "inconsistency",
        "grammar",
        "legal",
        "register",
        "locale-specific-content",
        "locale-violation",
        "style",
        "characters",
        "misspelling",
        "typographical",
        "formatting",
        "inconsistent-entities",
        "numbers",
        "markup",
        "pattern-problem",
        "whitespace",
        "internationalization",
        "length",
        "non-conformance",
        "uncategorized",
        "other",
    ];

    #[test]
    fn test_map_type_covers_every_native_value() {
        assert_eq!(map_type("UnknownWord"), Ok(MatchType::UnknownWord));
        assert_eq!(map_type("Hint"), Ok(MatchType::Hint));
        assert_eq!(map_type("Other"), Ok(MatchType::Other));
    }

    #[test]
    fn test_map_type_rejects_unknown_value() {
        let err = map_type("Critical").unwrap_err();
        assert_eq!(
            err,
            MappingError::UnknownMatchType {
                value: "Critical".to_string()
            }
        );
        // Case matters: the engine spells these exactly
        assert!(map_type("hint").is_err());
        assert!(map_type("").is_err());
    }

    #[test]
    fn test_map_issue_type_covers_every_native_value() {
        for (native, expected) in NATIVE_ISSUE_TYPES.iter().zip(ItsIssueType::ALL) {
            let mapped = map_issue_type(native)
                .unwrap_or_else(|e| panic!("{native} should map: {e}"));
            assert_eq!(mapped, expected);
            assert_eq!(mapped.as_str(), *native);
        }
    }

    #[test]
    fn test_map_issue_type_rejects_unknown_value() {
        for value in ["locale_violation", "Grammar", "readability", ""] {
            let err = map_issue_type(value).unwrap_err();
            assert!(
                matches!(err, MappingError::UnknownIssueType { value: ref v } if v == value),
                "unexpected error for {value:?}: {err:?}"
            );
        }
    }

    #[test]
    fn test_map_match_preserves_all_fields() {
        let mapped = map_match(subject_verb_agreement()).unwrap();

        assert_eq!(mapped.offset, 3);
        assert_eq!(mapped.length, 2);
        assert_eq!(mapped.replacements, vec!["goes".to_string()]);
        assert_eq!(mapped.match_type, MatchType::Hint);
        assert_eq!(mapped.short_message, "Grammatical problem");
        assert!(mapped.message.contains("<suggestion>goes</suggestion>"));
        assert_eq!(mapped.rule.id, "SUBJECT_VERB_AGREEMENT");
        assert_eq!(mapped.rule.issue, ItsIssueType::Grammar);
        assert_eq!(mapped.rule.category.id, "GRAMMAR");
        assert_eq!(mapped.rule.category.name, "Grammar");
    }

    #[test]
    fn test_map_match_defaults_missing_optionals_to_empty() {
        let raw = RawMatch::new(
            0,
            4,
            "Sentence should start with an uppercase letter.",
            "Other",
            RawRule::new(
                "UPPERCASE_SENTENCE_START",
                "Checks that a sentence starts with an uppercase letter",
                "typographical",
                RawCategory::new("CASING", "Capitalization"),
            ),
        );

        let mapped = map_match(raw).unwrap();
        assert_eq!(mapped.short_message, "");
        assert!(mapped.replacements.is_empty());
        assert_eq!(mapped.rule.sub_id, None);
        assert_eq!(mapped.rule.source_file, None);
    }

    #[test]
    fn test_map_match_keeps_zero_length_span() {
        let mut raw = subject_verb_agreement();
        raw.from_pos = 7;
        raw.to_pos = 7;
        let mapped = map_match(raw).unwrap();
        assert_eq!(mapped.offset, 7);
        assert_eq!(mapped.length, 0);
    }

    #[test]
    fn test_map_match_rejects_negative_span() {
        let mut raw = subject_verb_agreement();
        raw.from_pos = 5;
        raw.to_pos = 3;
        let err = map_match(raw).unwrap_err();
        assert!(matches!(
            err,
            MappingError::NegativeSpan {
                from_pos: 5,
                to_pos: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_map_match_propagates_enum_failures() {
        let mut raw = subject_verb_agreement();
        raw.match_type = "Fatal".to_string();
        assert!(matches!(
            map_match(raw).unwrap_err(),
            MappingError::UnknownMatchType { .. }
        ));

        let mut raw = subject_verb_agreement();
        raw.rule.issue_type = "tone".to_string();
        assert!(matches!(
            map_match(raw).unwrap_err(),
            MappingError::UnknownIssueType { .. }
        ));
    }

    #[test]
    fn test_map_rule_keeps_provenance() {
        let rule = RawRule::new(
            "EN_A_VS_AN",
            "Use of 'a' vs. 'an'",
            "misspelling",
            RawCategory::new("MISC", "Miscellaneous"),
        )
        .with_source("1", "/org/languagetool/rules/en/grammar.xml");

        let mapped = map_rule(rule).unwrap();
        assert_eq!(mapped.sub_id.as_deref(), Some("1"));
        assert_eq!(
            mapped.source_file.as_deref(),
            Some("/org/languagetool/rules/en/grammar.xml")
        );
        assert_eq!(mapped.description, "Use of 'a' vs. 'an'");
        assert_eq!(mapped.issue, ItsIssueType::Misspelling);
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let first = map_match(subject_verb_agreement()).unwrap();
        let second = map_match(subject_verb_agreement()).unwrap();
        assert_eq!(first, second);
    }
}
