//! JSON shapes of the LanguageTool `/v2` API.
//!
//! Only the fields the proofreading service consumes are modeled; unknown
//! fields (`context`, `sentence`, `software`, ...) are ignored. Offsets and
//! lengths are counted in UTF-16 code units, as the server reports them.

use serde::{Deserialize, Serialize};

/// Response of `POST /v2/check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    #[serde(default)]
    pub matches: Vec<WireMatch>,
}

/// One flagged issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMatch {
    pub message: String,
    #[serde(default)]
    pub short_message: Option<String>,
    pub offset: usize,
    pub length: usize,
    #[serde(default)]
    pub replacements: Vec<WireReplacement>,
    #[serde(rename = "type")]
    pub match_type: WireMatchType,
    pub rule: WireRule,
}

/// A suggested replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireReplacement {
    pub value: String,
}

/// Match type wrapper, e.g. `{"typeName": "Hint"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMatchType {
    pub type_name: String,
}

/// Rule that produced a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRule {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    pub description: String,
    pub issue_type: String,
    pub category: WireCategory,
}

/// Rule category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireCategory {
    pub id: String,
    pub name: String,
}

/// Entry of `GET /v2/languages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageInfo {
    pub name: String,
    pub code: String,
    pub long_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "software": {"name": "LanguageTool", "version": "6.4"},
        "language": {"name": "English (US)", "code": "en-US"},
        "matches": [{
            "message": "The verb form does not agree with the subject.",
            "shortMessage": "Grammatical problem",
            "replacements": [{"value": "goes"}],
            "offset": 3,
            "length": 2,
            "context": {"text": "He go to school.", "offset": 3, "length": 2},
            "sentence": "He go to school.",
            "type": {"typeName": "Hint"},
            "rule": {
                "id": "SUBJECT_VERB_AGREEMENT",
                "subId": "2",
                "sourceFile": "grammar.xml",
                "description": "Subject-verb agreement",
                "issueType": "grammar",
                "category": {"id": "GRAMMAR", "name": "Grammar"}
            }
        }]
    }"#;

    #[test]
    fn test_decode_check_response() {
        let response: CheckResponse = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(response.matches.len(), 1);

        let m = &response.matches[0];
        assert_eq!(m.offset, 3);
        assert_eq!(m.length, 2);
        assert_eq!(m.short_message.as_deref(), Some("Grammatical problem"));
        assert_eq!(m.replacements[0].value, "goes");
        assert_eq!(m.match_type.type_name, "Hint");
        assert_eq!(m.rule.sub_id.as_deref(), Some("2"));
        assert_eq!(m.rule.source_file.as_deref(), Some("grammar.xml"));
        assert_eq!(m.rule.issue_type, "grammar");
        assert_eq!(m.rule.category.name, "Grammar");
    }

    #[test]
    fn test_decode_minimal_match() {
        let json = r#"{"matches": [{
            "message": "Possible typo",
            "offset": 0,
            "length": 3,
            "type": {"typeName": "UnknownWord"},
            "rule": {
                "id": "MORFOLOGIK_RULE_EN_US",
                "description": "Possible spelling mistake",
                "issueType": "misspelling",
                "category": {"id": "TYPOS", "name": "Possible Typo"}
            }
        }]}"#;

        let response: CheckResponse = serde_json::from_str(json).unwrap();
        let m = &response.matches[0];
        assert!(m.short_message.is_none());
        assert!(m.replacements.is_empty());
        assert!(m.rule.sub_id.is_none());
    }

    #[test]
    fn test_missing_matches_is_empty() {
        let response: CheckResponse = serde_json::from_str("{}").unwrap();
        assert!(response.matches.is_empty());
    }
}
