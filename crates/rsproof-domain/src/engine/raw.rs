//! Raw match representation as reported by the external grammar engine.
//!
//! These mirror the engine's own object graph (match -> rule -> category)
//! and keep its native enumeration spellings as plain strings, so values the
//! service does not know yet reach the mapper instead of being lost here.

/// One issue as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    pub message: String,
    pub short_message: Option<String>,
    /// Zero-based UTF-16 code unit index where the issue starts.
    pub from_pos: usize,
    /// Zero-based UTF-16 code unit index just past the issue.
    pub to_pos: usize,
    pub suggested_replacements: Option<Vec<String>>,
    /// Native match type name (`UnknownWord`, `Hint` or `Other`).
    pub match_type: String,
    pub rule: RawRule,
}

impl RawMatch {
    /// Creates a match without short message or replacements.
    pub fn new(
        from_pos: usize,
        to_pos: usize,
        message: impl Into<String>,
        match_type: impl Into<String>,
        rule: RawRule,
    ) -> Self {
        Self {
            message: message.into(),
            short_message: None,
            from_pos,
            to_pos,
            suggested_replacements: None,
            match_type: match_type.into(),
            rule,
        }
    }

    pub fn with_short_message(mut self, short_message: impl Into<String>) -> Self {
        self.short_message = Some(short_message.into());
        self
    }

    pub fn with_replacements<I, S>(mut self, replacements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggested_replacements = Some(replacements.into_iter().map(Into::into).collect());
        self
    }
}

/// The engine rule that produced a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRule {
    pub id: String,
    pub sub_id: Option<String>,
    pub source_file: Option<String>,
    pub description: String,
    /// Native ITS issue type name (e.g. `locale-violation`).
    pub issue_type: String,
    pub category: RawCategory,
}

impl RawRule {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        issue_type: impl Into<String>,
        category: RawCategory,
    ) -> Self {
        Self {
            id: id.into(),
            sub_id: None,
            source_file: None,
            description: description.into(),
            issue_type: issue_type.into(),
            category,
        }
    }

    pub fn with_source(
        mut self,
        sub_id: impl Into<String>,
        source_file: impl Into<String>,
    ) -> Self {
        self.sub_id = Some(sub_id.into());
        self.source_file = Some(source_file.into());
        self
    }
}

/// Category a rule belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCategory {
    pub id: String,
    pub name: String,
}

impl RawCategory {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
