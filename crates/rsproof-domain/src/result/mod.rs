//! Proofreading result model and the mapper that produces it.
//!
//! Result values are immutable, request-scoped and owned by the caller once
//! returned. Their serialized shape is the public wire contract:
//!
//! ```text
//! CheckResult:     { text, matches: [RuleMatchResult] }
//! RuleMatchResult: { message, shortMessage, offset, length, replacements, type, rule }
//! RuleResult:      { id, subId?, sourceFile?, description, issue, category: { id, name } }
//! ```

pub mod mapper;
mod types;

pub use mapper::{map_issue_type, map_match, map_rule, map_type};
pub use types::{
    CategoryResult, CheckResult, ItsIssueType, MatchType, RuleMatchResult, RuleResult,
};
