//! Prompt truncation
//!
//! Truncation keeps the longest prefix of a text that still fits a budget.
//! Candidate cut points depend on the policy; the best one is found with a
//! binary search, which relies on a prefix never having more tokens than the
//! text it was cut from.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{TokenError, TokenResult};

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Where a truncated text may be cut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncationPolicy {
    /// Drop trailing words; cut only in front of whitespace
    #[default]
    TrailingWords,
    /// Drop trailing characters
    TrailingCharacters,
}

impl TruncationPolicy {
    /// Byte offsets at which `text` may be cut, ascending, starting at 0 and
    /// ending at `text.len()`
    pub fn cut_points(&self, text: &str) -> Vec<usize> {
        let mut cuts = vec![0];
        match self {
            TruncationPolicy::TrailingWords => {
                cuts.extend(WHITESPACE_RUN.find_iter(text).map(|m| m.start()));
            }
            TruncationPolicy::TrailingCharacters => {
                cuts.extend(text.char_indices().map(|(i, _)| i));
            }
        }
        cuts.push(text.len());
        cuts.dedup();
        cuts
    }
}

impl fmt::Display for TruncationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TruncationPolicy::TrailingWords => f.write_str("words"),
            TruncationPolicy::TrailingCharacters => f.write_str("characters"),
        }
    }
}

impl FromStr for TruncationPolicy {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "words" | "trailing_words" => Ok(TruncationPolicy::TrailingWords),
            "characters" | "chars" | "trailing_characters" => {
                Ok(TruncationPolicy::TrailingCharacters)
            }
            other => Err(TokenError::InvalidInput(format!(
                "unknown truncation policy '{}'",
                other
            ))),
        }
    }
}

/// Longest prefix of `text`, cut at a policy boundary, for which `fits` holds
///
/// `fits("")` is assumed to be true and `fits(text)` false. When no word
/// boundary prefix other than the empty one fits, the first word is cut at
/// character boundaries instead so the longest fitting prefix is returned.
pub fn longest_fitting_prefix<'a, F>(
    text: &'a str,
    policy: TruncationPolicy,
    mut fits: F,
) -> TokenResult<&'a str>
where
    F: FnMut(&str) -> TokenResult<bool>,
{
    let cuts = policy.cut_points(text);
    let best = search(text, &cuts, &mut fits)?;

    if best == 0 && policy == TruncationPolicy::TrailingWords && cuts.len() > 1 {
        let first_word = &text[..cuts[1]];
        let char_cuts = TruncationPolicy::TrailingCharacters.cut_points(first_word);
        let best = search(first_word, &char_cuts, &mut fits)?;
        return Ok(&text[..best]);
    }

    Ok(&text[..best])
}

/// Binary search for the largest cut whose prefix fits. The first cut is
/// taken to fit and the last not to.
fn search<F>(text: &str, cuts: &[usize], fits: &mut F) -> TokenResult<usize>
where
    F: FnMut(&str) -> TokenResult<bool>,
{
    if cuts.len() < 2 {
        return Ok(0);
    }

    let (mut lo, mut hi) = (0, cuts.len() - 1);
    let mut probes = 0;
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        probes += 1;
        if fits(&text[..cuts[mid]])? {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    tracing::debug!(
        candidates = cuts.len(),
        probes,
        cut = cuts[lo],
        "Truncation search finished"
    );
    Ok(cuts[lo])
}
