//! Alignment of expected phrases against a run of OCR words.
//!
//! Given a sequence of words and a sequence of target strings, the
//! matcher segments the words so that each target corresponds to one
//! or more consecutive words, fuzzily compared with OCR confusions
//! allowed. A target written as one string may have been split by the
//! OCR into several words ("makota" against `ma` + `kota`), and stray
//! one-character artifact words may fall anywhere. A result is only
//! returned when the segmentation is unambiguous.

use crate::geometry::{Bounded, Bounds};
use crate::model::Word;
use crate::text;
use std::collections::{HashMap, HashSet};

/// One complete segmentation: for each target, in order, the indices
/// of the words assigned to it.
type Parse = Vec<Vec<usize>>;

/// A search state: how far into the words and targets we are, plus the
/// word indices already accumulated towards the current target.
type State = (usize, usize, Vec<usize>);

struct Parser<'a> {
    words: &'a [Word],
    targets: &'a [&'a str],
    memo: HashMap<State, HashSet<Parse>>,
}

impl Parser<'_> {
    /// All distinct segmentations of `words[word_off..]` against
    /// `targets[target_off..]`. The same state is reachable along many
    /// search paths, so results are memoized per state.
    fn parse(&mut self, word_off: usize, target_off: usize, prefix: &[usize]) -> HashSet<Parse> {
        let key = (word_off, target_off, prefix.to_vec());
        if let Some(cached) = self.memo.get(&key) {
            return cached.clone();
        }
        let results = self.search(word_off, target_off, prefix);
        self.memo.insert(key, results.clone());
        results
    }

    fn search(&mut self, word_off: usize, target_off: usize, prefix: &[usize]) -> HashSet<Parse> {
        let mut results = HashSet::new();
        // not enough words left to cover the remaining targets
        if self.words.len() - word_off < self.targets.len() - target_off {
            return results;
        }
        if word_off >= self.words.len() {
            if prefix.is_empty() && target_off >= self.targets.len() {
                results.insert(Vec::new());
            }
            return results;
        }
        let words = self.words;
        let head = &words[word_off];
        if head.text().chars().count() <= 1 {
            // a possible artifact, try ignoring it
            results.extend(self.parse(word_off + 1, target_off, prefix));
        }
        if target_off < self.targets.len() {
            let mut accumulated: String = prefix.iter().map(|&i| words[i].text()).collect();
            accumulated.push_str(head.text());
            let target = self.targets[target_off];

            if text::fuzzy_equal(target, &accumulated) {
                let mut matched: Vec<usize> = prefix.to_vec();
                matched.push(word_off);
                for tail in self.parse(word_off + 1, target_off + 1, &[]) {
                    let mut full = Vec::with_capacity(tail.len() + 1);
                    full.push(matched.clone());
                    full.extend(tail);
                    results.insert(full);
                }
            }
            if text::fuzzy_prefix(target, &accumulated) {
                let mut extended: Vec<usize> = prefix.to_vec();
                extended.push(word_off);
                results.extend(self.parse(word_off + 1, target_off, &extended));
            }
        }
        results
    }
}

/// Align `targets` against `words` and return, for each target, the
/// union of the bounds of the words it matched.
///
/// Returns `None` when the targets cannot be matched, or when more
/// than one segmentation exists.
pub fn match_words(words: &[Word], targets: &[&str]) -> Option<Vec<Option<Bounds>>> {
    let mut parser = Parser {
        words,
        targets,
        memo: HashMap::new(),
    };
    let parses = parser.parse(0, 0, &[]);
    if parses.len() != 1 {
        if parses.len() > 1 {
            log::debug!(
                "{} ambiguous segmentations for {} targets",
                parses.len(),
                targets.len()
            );
        }
        return None;
    }
    let parse = parses.into_iter().next()?;
    debug_assert_eq!(parse.len(), targets.len());
    Some(
        parse
            .iter()
            .map(|indices| Bounds::union_all(indices.iter().map(|&i| words[i].bounds())))
            .collect(),
    )
}
