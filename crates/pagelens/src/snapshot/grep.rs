//! Grep filter for snapshot items
//!
//! Patterns arrive either as a bare regex string or as an options object.
//! Filtering happens at the item level, so a match on an attribute keeps
//! the full contextual line. A pattern that fails to compile degrades to
//! case-sensitive substring containment of the raw pattern; the snapshot
//! surfaces that through a metadata flag, never as an error.

use regex::RegexBuilder;
use serde::Deserialize;
use tracing::warn;

/// Grep input: a bare pattern string or an options object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GrepSpec {
    /// A regex pattern with default options
    Pattern(String),
    /// A pattern with explicit options
    Options(GrepOptions),
}

impl GrepSpec {
    /// The raw pattern text
    #[must_use]
    pub fn pattern(&self) -> &str {
        match self {
            Self::Pattern(p) => p,
            Self::Options(o) => &o.pattern,
        }
    }
}

/// Explicit grep options
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrepOptions {
    /// The pattern text
    pub pattern: String,

    /// Case-insensitive matching
    #[serde(default)]
    pub ignore_case: bool,

    /// Keep items that do NOT match
    #[serde(default)]
    pub invert: bool,

    /// Treat the pattern as a literal string
    #[serde(default)]
    pub fixed_strings: bool,
}

/// A compiled grep filter
#[derive(Debug)]
pub struct GrepFilter {
    matcher: Matcher,
    invert: bool,
    pattern: String,
    fallback: bool,
}

#[derive(Debug)]
enum Matcher {
    Regex(regex::Regex),
    Substring(String),
}

impl GrepFilter {
    /// Compile a filter from a spec
    #[must_use]
    pub fn new(spec: &GrepSpec) -> Self {
        let (pattern, ignore_case, invert, fixed_strings) = match spec {
            GrepSpec::Pattern(p) => (p.clone(), false, false, false),
            GrepSpec::Options(o) => (o.pattern.clone(), o.ignore_case, o.invert, o.fixed_strings),
        };

        let source = if fixed_strings {
            regex::escape(&pattern)
        } else {
            pattern.clone()
        };

        let (matcher, fallback) = match RegexBuilder::new(&source)
            .case_insensitive(ignore_case)
            .build()
        {
            Ok(re) => (Matcher::Regex(re), false),
            Err(_) => {
                warn!(pattern = %pattern, "grep pattern failed to compile, using substring match");
                (Matcher::Substring(pattern.clone()), true)
            }
        };

        Self {
            matcher,
            invert,
            pattern,
            fallback,
        }
    }

    /// Whether an item's search data passes the filter
    #[must_use]
    pub fn is_match(&self, haystack: &str) -> bool {
        let hit = match &self.matcher {
            Matcher::Regex(re) => re.is_match(haystack),
            Matcher::Substring(needle) => haystack.contains(needle.as_str()),
        };
        hit != self.invert
    }

    /// The raw pattern, for header reporting
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the regex failed to compile and substring matching is in use
    #[must_use]
    pub fn used_fallback(&self) -> bool {
        self.fallback
    }
}
