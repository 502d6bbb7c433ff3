//! Query parsing: structured `cat:` / `tag:` filters plus a free-text residual.
//!
//! A token is `cat:` or `tag:` at the start of the query or after whitespace,
//! followed by a run of non-whitespace. Each token is removed (leading
//! whitespace included) and the trimmed remainder becomes the residual.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::interface::{Entry, FilterKind};

static FILTER_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\s)(cat|tag):(\S+)").unwrap()
});

/// One structured predicate. `value` is already sanitized and lowercased,
/// and may be empty (an empty value matches nothing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub kind: FilterKind,
    pub value: String,
}

impl Filter {
    pub fn matches(&self, entry: &Entry) -> bool {
        match self.kind {
            FilterKind::Category => entry.in_category(&self.value),
            FilterKind::Tag => entry.has_tag(&self.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub residual: String,
}

impl Query {
    pub fn parse(raw: &str) -> Self {
        let mut filters = Vec::new();
        let mut residual = String::with_capacity(raw.len());
        let mut last_end = 0;

        for caps in FILTER_TOKEN_REGEX.captures_iter(raw) {
            let (Some(whole), Some(kind), Some(value)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            let kind = match kind.as_str() {
                "cat" => FilterKind::Category,
                _ => FilterKind::Tag,
            };
            filters.push(Filter {
                kind,
                value: sanitize_filter_value(value.as_str()),
            });
            residual.push_str(&raw[last_end..whole.start()]);
            last_end = whole.end();
        }
        residual.push_str(&raw[last_end..]);

        Self {
            filters,
            residual: residual.trim().to_string(),
        }
    }

    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    /// AND across every filter
    pub fn admits(&self, entry: &Entry) -> bool {
        self.filters.iter().all(|f| f.matches(entry))
    }
}

/// Keep letters, digits, `_` and `-` (Unicode-aware), then lowercase.
pub(crate) fn sanitize_filter_value(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect::<String>()
        .to_lowercase()
}
