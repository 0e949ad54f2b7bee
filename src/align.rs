//! Base title inference.
//!
//! Strategies run in a fixed cascade over the volume-stripped titles:
//! word-boundary common prefix, folded LCS, shared words, then the most
//! frequent title. The first one that produces an acceptable result wins.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::volume::{split_volume, SEPARATORS};

const MIN_PREFIX_CHARS: usize = 3;
const MIN_LCS_CHARS: usize = 5;
const MIN_WORD_CHARS: usize = 2;

static WORD_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{Han}\w]+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Single,
    CommonPrefix,
    Subsequence,
    CommonWords,
    MostFrequent,
}

/// Infers the base title shared by a batch of titles.
///
/// Returns an empty string for an empty batch.
pub fn infer_base_title<S: AsRef<str>>(titles: &[S]) -> String {
    align(titles).map(|(title, _)| title).unwrap_or_default()
}

/// Same as [`infer_base_title`], also reporting which strategy decided.
pub fn align<S: AsRef<str>>(titles: &[S]) -> Option<(String, Strategy)> {
    if titles.is_empty() {
        return None;
    }

    let mut simplified: Vec<String> = titles
        .iter()
        .map(|t| split_volume(t.as_ref()).0.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if simplified.is_empty() {
        simplified = titles.iter().map(|t| t.as_ref().to_string()).collect();
    }

    if simplified.len() == 1 {
        return simplified.pop().map(|t| (t, Strategy::Single));
    }

    let prefix = common_prefix(&simplified);
    if prefix.chars().count() >= MIN_PREFIX_CHARS {
        let trimmed = trim_to_word_boundary(&prefix);
        if trimmed.chars().count() >= MIN_PREFIX_CHARS {
            debug!(base = trimmed, "common prefix accepted");
            return Some((trimmed.to_string(), Strategy::CommonPrefix));
        }
        debug!(prefix = %prefix, trimmed, "common prefix too short after trimming");
    }

    if let Some(lcs) = folded_lcs(&simplified) {
        debug!(base = %lcs, "common subsequence accepted");
        return Some((lcs, Strategy::Subsequence));
    }

    let words = common_words(&simplified);
    if !words.is_empty() {
        debug!(?words, "common words accepted");
        return Some((words.join(" "), Strategy::CommonWords));
    }

    most_frequent(&simplified).map(|t| {
        debug!(base = t, "falling back to the most frequent title");
        (t.to_string(), Strategy::MostFrequent)
    })
}

/// Character-wise longest common prefix.
pub fn common_prefix<S: AsRef<str>>(titles: &[S]) -> String {
    let Some((first, rest)) = titles.split_first() else {
        return String::new();
    };
    let first = first.as_ref();
    let mut end = first.len();
    for other in rest {
        let shared: usize = first
            .chars()
            .zip(other.as_ref().chars())
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| a.len_utf8())
            .sum();
        end = end.min(shared);
    }
    first[..end].to_string()
}

/// Cuts `text` at its last separator, or returns it whole if it has none.
pub fn trim_to_word_boundary(text: &str) -> &str {
    match text.rfind(SEPARATORS) {
        Some(idx) => text[..idx].trim_end(),
        None => text,
    }
}

/// Longest common subsequence of two strings.
///
/// Backtracking takes a matching character when there is one, otherwise
/// steps toward the larger neighbouring cell; on a tie it steps back in `a`.
pub fn lcs(a: &str, b: &str) -> String {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());

    let mut dp = vec![vec![0u32; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = if a[i - 1] == b[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
        }
    }

    let (mut i, mut j) = (m, n);
    let mut out = Vec::with_capacity(dp[m][n] as usize);
    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            out.push(a[i - 1]);
            i -= 1;
            j -= 1;
        } else if dp[i - 1][j] >= dp[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    out.iter().rev().collect()
}

/// Folds [`lcs`] left to right over the batch; `None` if the result is
/// shorter than five characters.
pub fn folded_lcs<S: AsRef<str>>(titles: &[S]) -> Option<String> {
    let (first, rest) = titles.split_first()?;
    let mut acc = first.as_ref().to_string();
    for title in rest {
        acc = lcs(&acc, title.as_ref());
        if acc.is_empty() {
            return None;
        }
    }
    (acc.chars().count() >= MIN_LCS_CHARS).then_some(acc)
}

/// Words of at least two characters present in every title, longest first.
/// Equal lengths keep their order of appearance in the first title.
pub fn common_words<S: AsRef<str>>(titles: &[S]) -> Vec<String> {
    let Some((first, rest)) = titles.split_first() else {
        return Vec::new();
    };
    let others: Vec<HashSet<&str>> = rest.iter().map(|t| words(t.as_ref()).collect()).collect();

    let mut seen = HashSet::new();
    let mut shared: Vec<String> = words(first.as_ref())
        .filter(|w| seen.insert(*w))
        .filter(|w| others.iter().all(|set| set.contains(w)))
        .map(str::to_string)
        .collect();
    shared.sort_by_key(|w| std::cmp::Reverse(w.chars().count()));
    shared
}

fn words(title: &str) -> impl Iterator<Item = &str> {
    WORD_SPLIT
        .split(title)
        .filter(|w| w.chars().count() >= MIN_WORD_CHARS)
}

/// Most frequent title; ties go to the one seen first.
pub fn most_frequent<S: AsRef<str>>(titles: &[S]) -> Option<&str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for title in titles {
        *counts.entry(title.as_ref()).or_default() += 1;
    }
    let mut best: Option<(&str, usize)> = None;
    for title in titles {
        let title = title.as_ref();
        let count = counts[title];
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((title, count));
        }
    }
    best.map(|(title, _)| title)
}
