//! Free-text search over the game catalog.
//!
//! A search term matches a game when it is a substring of the game's name or
//! of its category's name. The same predicate is expressed twice: as a SQL
//! `LIKE`/`ILIKE` pattern for the PostgreSQL repository and as an in-memory
//! check for the memory catalog. Both honour the configured [`MatchMode`].

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Match mode
// ---------------------------------------------------------------------------

/// Case handling for search-term containment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    CaseSensitive,
    #[default]
    CaseInsensitive,
}

impl MatchMode {
    /// Pick a mode from a boolean "case insensitive" flag.
    pub fn from_case_insensitive(case_insensitive: bool) -> Self {
        if case_insensitive {
            Self::CaseInsensitive
        } else {
            Self::CaseSensitive
        }
    }

    /// The PostgreSQL pattern operator implementing this mode.
    pub fn sql_operator(self) -> &'static str {
        match self {
            Self::CaseSensitive => "LIKE",
            Self::CaseInsensitive => "ILIKE",
        }
    }
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// A normalized search request.
///
/// `term` is `None` when the caller supplied nothing, or only whitespace;
/// such a filter lets every record through.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchFilter {
    term: Option<String>,
    mode: MatchMode,
}

impl SearchFilter {
    /// Build a filter from raw user input.
    pub fn new(term: Option<&str>, mode: MatchMode) -> Self {
        let term = term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        Self { term, mode }
    }

    /// A filter that matches every record.
    pub fn all(mode: MatchMode) -> Self {
        Self { term: None, mode }
    }

    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn is_identity(&self) -> bool {
        self.term.is_none()
    }

    /// `%term%` with LIKE metacharacters escaped, or `None` for the identity
    /// filter.
    pub fn like_pattern(&self) -> Option<String> {
        self.term
            .as_deref()
            .map(|t| format!("%{}%", escape_like(t)))
    }

    /// In-memory form of the predicate.
    ///
    /// A missing category name never satisfies the category clause.
    pub fn matches(&self, name: &str, category_name: Option<&str>) -> bool {
        let Some(term) = self.term.as_deref() else {
            return true;
        };

        match self.mode {
            MatchMode::CaseSensitive => {
                name.contains(term) || category_name.is_some_and(|c| c.contains(term))
            }
            MatchMode::CaseInsensitive => {
                let needle = term.to_lowercase();
                name.to_lowercase().contains(&needle)
                    || category_name.is_some_and(|c| c.to_lowercase().contains(&needle))
            }
        }
    }
}

/// Escape `\`, `%` and `_` so the input matches literally inside a
/// PostgreSQL `LIKE` pattern (default escape character is backslash).
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
