//! Query resolution: structured filters first, fuzzy ranking second.
//!
//! - No structured tokens: the whole raw query is ranked against the full
//!   catalog; a blank query returns the catalog as-is.
//! - Structured tokens: the catalog is narrowed by exact predicates; a
//!   non-empty residual is then ranked against the survivors, otherwise the
//!   survivors keep catalog order.
//!
//! Ranked output is sorted by `(cost, catalog position)` so equal costs keep
//! catalog order regardless of how rayon scheduled the scoring.

use rayon::prelude::*;

use crate::candidate::SearchCandidate;
use crate::catalog::Catalog;
use crate::interface::Entry;
use crate::query::Query;
use crate::ranking::{score_candidate, EntryScore, PreparedQuery, RankingOptions};

/// One row of a result set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Position of the entry in the catalog the result set was built from
    pub position: usize,
    /// Match cost and best field; `None` for unranked results
    pub score: Option<EntryScore>,
}

/// Ordered outcome of resolving one query against one catalog state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    hits: Vec<Hit>,
}

impl ResultSet {
    fn unranked(positions: impl IntoIterator<Item = usize>) -> Self {
        Self {
            hits: positions
                .into_iter()
                .map(|position| Hit { position, score: None })
                .collect(),
        }
    }

    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Resolve row `index` against the catalog it was built from
    pub fn entry<'c>(&self, catalog: &'c Catalog, index: usize) -> Option<&'c Entry> {
        self.hits
            .get(index)
            .and_then(|hit| catalog.entries().get(hit.position))
    }

    pub fn entries<'c>(&'c self, catalog: &'c Catalog) -> impl Iterator<Item = &'c Entry> + 'c {
        self.hits
            .iter()
            .filter_map(move |hit| catalog.entries().get(hit.position))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Ranker {
    options: RankingOptions,
}

impl Ranker {
    pub fn new(options: RankingOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RankingOptions {
        &self.options
    }

    pub fn resolve(&self, catalog: &Catalog, raw: &str) -> ResultSet {
        let query = Query::parse(raw);

        if !query.has_filters() {
            let text = raw.trim();
            if text.is_empty() {
                return ResultSet::unranked(0..catalog.len());
            }
            return self.rank(catalog, (0..catalog.len()).collect(), text);
        }

        let survivors: Vec<usize> = catalog
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| query.admits(entry))
            .map(|(i, _)| i)
            .collect();

        if query.residual.is_empty() {
            return ResultSet::unranked(survivors);
        }
        self.rank(catalog, survivors, &query.residual)
    }

    fn rank(&self, catalog: &Catalog, positions: Vec<usize>, text: &str) -> ResultSet {
        let Some(prepared) = PreparedQuery::new(text) else {
            return ResultSet::unranked(positions);
        };
        let entries = catalog.entries();

        let mut scored: Vec<(usize, EntryScore)> = positions
            .into_par_iter()
            .filter_map(|position| {
                let candidate = SearchCandidate::new(position, &entries[position]);
                score_candidate(&candidate, &prepared, &self.options)
                    .map(|score| (candidate.position, score))
            })
            .collect();

        scored.sort_by(|a, b| a.1.cost.total_cmp(&b.1.cost).then_with(|| a.0.cmp(&b.0)));

        ResultSet {
            hits: scored
                .into_iter()
                .map(|(position, score)| Hit {
                    position,
                    score: Some(score),
                })
                .collect(),
        }
    }
}

/// Tokenize text into tokens with char offsets.
/// Produces both alphanumeric word tokens and non-whitespace punctuation tokens.
/// Whitespace is skipped (acts as a separator).
pub(crate) fn tokenize_words(content: &str) -> Vec<(usize, usize, String)> {
    let chars: Vec<char> = content.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }
        let start = i;
        if chars[i].is_alphanumeric() {
            while i < chars.len() && chars[i].is_alphanumeric() {
                i += 1;
            }
        } else {
            while i < chars.len() && !chars[i].is_alphanumeric() && !chars[i].is_whitespace() {
                i += 1;
            }
        }
        let token: String = chars[start..i].iter().collect();
        tokens.push((start, i, token));
    }
    tokens
}
