//! Field-weighted match cost for fuzzy ranking.
//!
//! Every query word is matched against the words of each field (tags,
//! category, glyph) and classified as exact, prefix, substring, fuzzy
//! (bounded edit distance) or subsequence. Each class has a fixed base cost,
//! and each field adds a penalty that shrinks as its weight grows, so a tag
//! hit beats the same hit on the category, which beats the glyph.
//!
//! Base costs are spaced so that any exact/prefix/substring hit, on any field
//! and at any weight, costs less than the cheapest fuzzy hit. Lower is better;
//! 0.0 is a perfect match and 1.0 is no match.

use crate::candidate::SearchCandidate;
use crate::search::tokenize_words;

/// Field penalty at weight 0.0. Kept below the gap between the most expensive
/// literal match (substring) and the cheapest fuzzy match.
const FIELD_PENALTY_SCALE: f64 = 0.2;

const COST_EXACT: f64 = 0.0;
const COST_PREFIX: f64 = 0.1;
const COST_SUBSTRING: f64 = 0.2;
const COST_FUZZY_BASE: f64 = 0.45;
const COST_FUZZY_PER_EDIT: f64 = 0.1;
const COST_SUBSEQUENCE_BASE: f64 = 0.5;
const COST_SUBSEQUENCE_PER_GAP: f64 = 0.05;
const COST_MISS: f64 = 1.0;

pub const DEFAULT_COST_CEILING: f64 = 0.6;

/// Relative importance of each searchable field, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldWeights {
    pub tags: f64,
    pub category: f64,
    pub glyph: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            tags: 1.0,
            category: 0.6,
            glyph: 0.3,
        }
    }
}

impl FieldWeights {
    fn penalty(&self, field: MatchField) -> f64 {
        let weight = match field {
            MatchField::Tags => self.tags,
            MatchField::Category => self.category,
            MatchField::Glyph => self.glyph,
        };
        (1.0 - weight.clamp(0.0, 1.0)) * FIELD_PENALTY_SCALE
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingOptions {
    pub weights: FieldWeights,
    /// Candidates costing more than this are dropped
    pub cost_ceiling: f64,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            weights: FieldWeights::default(),
            cost_ceiling: DEFAULT_COST_CEILING,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchField {
    Tags,
    Category,
    Glyph,
}

const FIELDS: [MatchField; 3] = [MatchField::Tags, MatchField::Category, MatchField::Glyph];

/// Cost of one candidate plus the field that produced its best hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryScore {
    pub cost: f64,
    pub field: MatchField,
}

/// A query normalized once per search and shared by every candidate
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    lower: String,
    words: Vec<String>,
    last_word_is_prefix: bool,
}

impl PreparedQuery {
    /// `None` when the text has no tokens (blank input)
    pub fn new(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let lower = trimmed.to_lowercase();
        let words: Vec<String> = tokenize_words(&lower).into_iter().map(|(_, _, w)| w).collect();
        if words.is_empty() {
            return None;
        }
        Some(Self {
            last_word_is_prefix: trimmed.ends_with(|c: char| c.is_alphanumeric()),
            lower,
            words,
        })
    }
}

/// Score a candidate. Returns `None` when it costs more than the ceiling.
pub fn score_candidate(
    candidate: &SearchCandidate<'_>,
    query: &PreparedQuery,
    options: &RankingOptions,
) -> Option<EntryScore> {
    let phrase = phrase_score(candidate, query, &options.weights);
    let words = word_score(candidate, query, &options.weights);

    let best = match (phrase, words) {
        (Some(p), Some(w)) => {
            if p.cost <= w.cost {
                p
            } else {
                w
            }
        }
        (Some(p), None) => p,
        (None, Some(w)) => w,
        (None, None) => return None,
    };

    if best.cost > options.cost_ceiling {
        return None;
    }
    Some(best)
}

/// Whole-query containment: lets punctuation-heavy glyph searches like
/// `^ω^` match even though the tokenizer splits them.
fn phrase_score(
    candidate: &SearchCandidate<'_>,
    query: &PreparedQuery,
    weights: &FieldWeights,
) -> Option<EntryScore> {
    let mut best: Option<EntryScore> = None;
    for field in FIELDS {
        for text in candidate.field_texts(field) {
            let base = if text == &query.lower {
                COST_EXACT
            } else if text.starts_with(&query.lower) {
                COST_PREFIX
            } else if text.contains(&query.lower) {
                COST_SUBSTRING
            } else {
                continue;
            };
            let cost = base + weights.penalty(field);
            if best.map_or(true, |b| cost < b.cost) {
                best = Some(EntryScore { cost, field });
            }
        }
    }
    best
}

/// Mean of the best per-word cost across fields. A word that matches
/// nowhere contributes a full miss, so an entry that comes near every word
/// outranks one that hits some words exactly and misses the rest.
fn word_score(
    candidate: &SearchCandidate<'_>,
    query: &PreparedQuery,
    weights: &FieldWeights,
) -> Option<EntryScore> {
    let last = query.words.len() - 1;
    let mut total = 0.0;
    let mut any_matched = false;
    // Field of the cheapest single word hit, reported for display
    let mut lead: Option<(f64, MatchField)> = None;

    for (qi, qw) in query.words.iter().enumerate() {
        let allow_prefix = qi == last && query.last_word_is_prefix;
        let mut word_best = COST_MISS;

        for field in FIELDS {
            let penalty = weights.penalty(field);
            for dw in candidate.field_words(field) {
                let kind = does_word_match(qw, dw, allow_prefix);
                if kind == WordMatchKind::None {
                    continue;
                }
                let cost = kind.cost() + penalty;
                if cost < word_best {
                    word_best = cost;
                }
                if lead.map_or(true, |(c, _)| cost < c) {
                    lead = Some((cost, field));
                }
            }
        }

        if word_best < COST_MISS {
            any_matched = true;
        }
        total += word_best;
    }

    if !any_matched {
        return None;
    }
    let (_, field) = lead?;
    Some(EntryScore {
        cost: total / query.words.len() as f64,
        field,
    })
}

/// Result of matching a query word against a document word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WordMatchKind {
    None,
    Exact,
    Prefix,
    Substring,
    Fuzzy(u8),
    Subsequence(u8),
}

impl WordMatchKind {
    fn cost(self) -> f64 {
        match self {
            WordMatchKind::Exact => COST_EXACT,
            WordMatchKind::Prefix => COST_PREFIX,
            WordMatchKind::Substring => COST_SUBSTRING,
            WordMatchKind::Fuzzy(dist) => {
                COST_FUZZY_BASE + COST_FUZZY_PER_EDIT * dist.saturating_sub(1) as f64
            }
            WordMatchKind::Subsequence(gaps) => {
                COST_SUBSEQUENCE_BASE + COST_SUBSEQUENCE_PER_GAP * gaps as f64
            }
            WordMatchKind::None => COST_MISS,
        }
    }
}

/// Classify a query word against a document word:
/// exact -> prefix (if allowed, >= 2 chars) -> substring (>= 2 chars)
/// -> fuzzy (edit distance) -> subsequence (abbreviation).
/// Both inputs must already be lowercased.
pub(crate) fn does_word_match(qw_lower: &str, dw_lower: &str, allow_prefix: bool) -> WordMatchKind {
    if dw_lower == qw_lower {
        return WordMatchKind::Exact;
    }
    let q_len = qw_lower.chars().count();
    if allow_prefix && q_len >= 2 && dw_lower.starts_with(qw_lower) {
        return WordMatchKind::Prefix;
    }
    if q_len >= 2 && dw_lower.contains(qw_lower) {
        return WordMatchKind::Substring;
    }
    let max_typo = max_edit_distance(q_len);
    if max_typo > 0 {
        if let Some(dist) = edit_distance_bounded(qw_lower, dw_lower, max_typo) {
            if dist > 0 {
                return WordMatchKind::Fuzzy(dist);
            }
        }
    }
    if let Some(gaps) = subsequence_match(qw_lower, dw_lower) {
        return WordMatchKind::Subsequence(gaps);
    }
    WordMatchKind::None
}

/// Check if all characters in `query` appear in order in `target`.
/// Returns the number of gaps (non-contiguous segments - 1) if matched, None otherwise.
fn subsequence_match(query: &str, target: &str) -> Option<u8> {
    let q_chars: Vec<char> = query.chars().collect();
    let t_chars: Vec<char> = target.chars().collect();

    // Min 3 chars to avoid spurious matches
    if q_chars.len() < 3 {
        return None;
    }
    if q_chars.len() >= t_chars.len() {
        return None;
    }
    // Query must cover at least 50% of target length
    if q_chars.len() * 2 < t_chars.len() {
        return None;
    }
    // Abbreviations keep the initial letter
    if q_chars[0] != t_chars[0] {
        return None;
    }

    let mut qi = 0;
    let mut gaps = 0u8;
    let mut prev_matched = false;

    for &tc in &t_chars {
        if qi < q_chars.len() && tc == q_chars[qi] {
            if !prev_matched && qi > 0 {
                gaps = gaps.saturating_add(1);
            }
            qi += 1;
            prev_matched = true;
        } else {
            prev_matched = false;
        }
    }

    if qi == q_chars.len() {
        Some(gaps)
    } else {
        None
    }
}

/// Maximum allowed edit distance by word length. Tags are short, so a
/// single typo is tolerated from four characters on.
pub(crate) fn max_edit_distance(word_len: usize) -> u8 {
    if word_len < 4 {
        0
    } else if word_len <= 7 {
        1
    } else {
        2
    }
}

/// Damerau-Levenshtein edit distance (optimal string alignment) with threshold pruning.
/// Counts insertions, deletions, substitutions, and adjacent transpositions each as 1 edit.
/// Returns `Some(distance)` if distance <= max_dist, `None` otherwise.
pub fn edit_distance_bounded(a: &str, b: &str, max_dist: u8) -> Option<u8> {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();
    let max_d = max_dist as usize;

    if m.abs_diff(n) > max_d {
        return None;
    }

    let mut prev2 = vec![0usize; n + 1];
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        curr[0] = i;
        let mut row_min = curr[0];

        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);

            if i >= 2
                && j >= 2
                && a_chars[i - 1] == b_chars[j - 2]
                && a_chars[i - 2] == b_chars[j - 1]
            {
                curr[j] = curr[j].min(prev2[j - 2] + 1);
            }

            row_min = row_min.min(curr[j]);
        }

        if row_min > max_d {
            return None;
        }

        std::mem::swap(&mut prev2, &mut prev);
        std::mem::swap(&mut prev, &mut curr);
    }

    let result = prev[n];
    if result <= max_d {
        Some(result as u8)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::Entry;

    fn score(entry: &Entry, query: &str) -> Option<EntryScore> {
        let candidate = SearchCandidate::new(0, entry);
        let query = PreparedQuery::new(query).unwrap();
        score_candidate(&candidate, &query, &RankingOptions::default())
    }

    // ── edit_distance_bounded tests ──────────────────────────────

    #[test]
    fn test_edit_distance_exact() {
        assert_eq!(edit_distance_bounded("hello", "hello", 2), Some(0));
    }

    #[test]
    fn test_edit_distance_one_substitution() {
        assert_eq!(edit_distance_bounded("hello", "hallo", 1), Some(1));
    }

    #[test]
    fn test_edit_distance_exceeds_threshold() {
        assert_eq!(edit_distance_bounded("hello", "world", 2), None);
    }

    #[test]
    fn test_edit_distance_length_prune() {
        assert_eq!(edit_distance_bounded("hi", "hello!", 2), None);
    }

    #[test]
    fn test_edit_distance_transposition() {
        assert_eq!(edit_distance_bounded("hpapy", "happy", 1), Some(1));
        assert_eq!(edit_distance_bounded("teh", "the", 1), Some(1));
    }

    #[test]
    fn test_edit_distance_counts_chars_not_bytes() {
        assert_eq!(edit_distance_bounded("ねこ", "ねご", 1), Some(1));
    }

    // ── subsequence_match tests ───────────────────────────────────

    #[test]
    fn test_subsequence_with_gaps() {
        // "emb" contiguous, then the extra 'e' breaks contiguity before 'd'
        assert_eq!(subsequence_match("embd", "embed"), Some(1));
        assert_eq!(subsequence_match("tbflp", "tableflip"), Some(3));
    }

    #[test]
    fn test_subsequence_rejections() {
        assert_eq!(subsequence_match("ab", "abc"), None);
        assert_eq!(subsequence_match("abc", "abcdefg"), None);
        assert_eq!(subsequence_match("abc", "abc"), None);
        assert_eq!(subsequence_match("lip", "flip"), None);
    }

    // ── does_word_match tests ────────────────────────────────────

    #[test]
    fn test_max_edit_distance_graduation() {
        assert_eq!(max_edit_distance(3), 0);
        assert_eq!(max_edit_distance(4), 1);
        assert_eq!(max_edit_distance(7), 1);
        assert_eq!(max_edit_distance(8), 2);
    }

    #[test]
    fn test_does_word_match_kinds() {
        assert_eq!(does_word_match("happy", "happy", false), WordMatchKind::Exact);
        assert_eq!(does_word_match("hap", "happy", true), WordMatchKind::Prefix);
        assert_eq!(does_word_match("hap", "happy", false), WordMatchKind::Substring);
        assert_eq!(does_word_match("flip", "tableflip", false), WordMatchKind::Substring);
        assert_eq!(does_word_match("hapy", "happy", false), WordMatchKind::Fuzzy(1));
        assert_eq!(does_word_match("sad", "happy", false), WordMatchKind::None);
        assert_eq!(does_word_match("h", "happy", true), WordMatchKind::None);
    }

    // ── cost ordering tests ──────────────────────────────────────

    #[test]
    fn test_literal_matches_beat_any_fuzzy_match() {
        let weights = FieldWeights { tags: 1.0, category: 0.0, glyph: 0.0 };
        let worst_literal = COST_SUBSTRING + weights.penalty(MatchField::Glyph);
        let best_fuzzy = WordMatchKind::Fuzzy(1).cost() + weights.penalty(MatchField::Tags);
        assert!(worst_literal < best_fuzzy);
    }

    #[test]
    fn test_tag_hit_beats_category_hit_beats_glyph_hit() {
        let tag = Entry::new("(a)", ["smile"], "Joy");
        let category = Entry::new("(b)", ["other"], "Smile");
        let glyph = Entry::new("smile (c)", ["other"], "Joy");
        let t = score(&tag, "smile").unwrap();
        let c = score(&category, "smile").unwrap();
        let g = score(&glyph, "smile").unwrap();
        assert_eq!(t.field, MatchField::Tags);
        assert_eq!(c.field, MatchField::Category);
        assert_eq!(g.field, MatchField::Glyph);
        assert!(t.cost < c.cost && c.cost < g.cost);
    }

    #[test]
    fn test_exact_tag_beats_typo_tag() {
        let exact = Entry::new("(a)", ["happy"], "Joy");
        let typo = Entry::new("(b)", ["hapyy"], "Joy");
        let e = score(&exact, "happy").unwrap();
        let t = score(&typo, "happy").unwrap();
        assert_eq!(e.cost, 0.0);
        assert!(e.cost < t.cost);
    }

    #[test]
    fn test_unrelated_entry_excluded() {
        let sad = Entry::new("(T_T)", ["sad"], "Sadness");
        assert!(score(&sad, "happy").is_none());
    }

    #[test]
    fn test_glyph_punctuation_phrase_match() {
        let entry = Entry::new("(*^ω^*)", ["blush"], "Joy");
        let s = score(&entry, "^ω^").unwrap();
        assert_eq!(s.field, MatchField::Glyph);
    }

    #[test]
    fn test_multi_word_partial_match_costs_more() {
        let both = Entry::new("(a)", ["happy", "cat"], "Cat");
        let one = Entry::new("(b)", ["happy"], "Joy");
        let b = score(&both, "happy cat").unwrap();
        let o = score(&one, "happy cat");
        assert!(o.map_or(true, |o| b.cost < o.cost));
    }

    #[test]
    fn test_ceiling_is_configurable() {
        let entry = Entry::new("(a)", ["hapyy"], "Joy");
        let candidate = SearchCandidate::new(0, &entry);
        let query = PreparedQuery::new("happy").unwrap();
        let strict = RankingOptions { cost_ceiling: 0.2, ..RankingOptions::default() };
        assert!(score_candidate(&candidate, &query, &strict).is_none());
        assert!(score_candidate(&candidate, &query, &RankingOptions::default()).is_some());
    }

    #[test]
    fn test_blank_query_prepares_nothing() {
        assert!(PreparedQuery::new("   ").is_none());
    }
}
