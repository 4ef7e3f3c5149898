//! A single line of text on a page.

use crate::dom::Element;
use crate::error::{Error, Result};
use crate::geometry::{Bounded, Bounds};
use crate::model::word::{self, Word};
use crate::text;
use serde::{Deserialize, Serialize};

/// A line of recognized words.
///
/// Corresponding hOCR class: `ocr_line`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    words: Vec<Word>,
    bounds: Option<Bounds>,
}

impl Line {
    /// Create a line from words, recomputing the bounds from them.
    pub fn new(words: Vec<Word>) -> Line {
        let bounds = Bounds::union_all(words.iter().map(|w| w.bounds()));
        Line { words, bounds }
    }

    /// Create a line from words with explicitly given bounds.
    pub fn with_bounds(words: Vec<Word>, bounds: Option<Bounds>) -> Line {
        Line { words, bounds }
    }

    /// Build a line from a `span` of class `ocr_line`.
    ///
    /// Every child node becomes a word, whitespace runs included;
    /// blank words keep inter-word spacing observable. The bounds come
    /// from the `title` attribute, falling back to the union of the
    /// word bounds.
    pub fn from_element(e: &Element) -> Result<Line> {
        let Element::Tag(tag) = e else {
            return Err(Error::UnexpectedStructure {
                expected: "line span",
                found: e.mk_string(),
            });
        };
        if tag.name != "span" || tag.class() != Some("ocr_line") {
            return Err(Error::UnexpectedStructure {
                expected: "line span",
                found: e.mk_string(),
            });
        }
        let words = tag
            .children
            .iter()
            .map(Word::from_element)
            .collect::<Result<Vec<_>>>()?;
        let bounds = tag
            .title()
            .and_then(Bounds::from_title_value)
            .or_else(|| Bounds::union_all(words.iter().map(|w| w.bounds())));
        Ok(Line { words, bounds })
    }

    /// Words of this line in reading order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Number of words in this line.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Check if every word in this line is blank. Empty lines are blank.
    pub fn is_blank(&self) -> bool {
        self.words.iter().all(Word::is_blank)
    }

    /// All word texts separated by single spaces.
    pub fn text(&self) -> String {
        word::join_words(&self.words)
    }

    /// Like [`text`](Line::text) but with probable OCR artifacts
    /// dropped.
    pub fn rough_text(&self) -> String {
        self.words
            .iter()
            .filter(|w| !w.may_be_artifact())
            .map(Word::text)
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }

    /// Concatenated texts of up to `length` words starting at `offset`,
    /// no separators, blank words skipped.
    pub fn spaceless_string(&self, offset: usize, length: usize) -> String {
        word::spaceless_string(&self.words, offset, length)
    }

    /// All word texts lowercased and concatenated without separators.
    pub fn lowercase_spaceless_string(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text().to_lowercase())
            .collect()
    }

    /// Copy of this line keeping only the words contained in the given
    /// rectangle. The line bounds become the intersection with it.
    pub fn crop(&self, rectangle: &Bounds) -> Line {
        let words = self
            .words
            .iter()
            .filter(|w| Bounds::within_opt(w.bounds().as_ref(), Some(rectangle)))
            .cloned()
            .collect();
        Line {
            words,
            bounds: Bounds::intersection_opt(self.bounds, Some(*rectangle)),
        }
    }

    /// If `text`, ignoring spaces, matches a run of consecutive words
    /// under fuzzy comparison, the union of that run's bounds.
    pub fn find_bounds_of_text(&self, text: &str) -> Option<Bounds> {
        self.find_bounds_impl(text, text::fuzzy_contains)
    }

    /// Case-insensitive variant of
    /// [`find_bounds_of_text`](Line::find_bounds_of_text).
    pub fn find_bounds_of_text_ignore_case(&self, text: &str) -> Option<Bounds> {
        self.find_bounds_impl(text, text::fuzzy_contains_ignore_case)
    }

    fn find_bounds_impl(&self, text: &str, contains: fn(&str, &str) -> bool) -> Option<Bounds> {
        let needle = text.replace(' ', "");
        for i in (0..self.words.len()).rev() {
            for length in 1..self.words.len() {
                let fragment = self.spaceless_string(i, length);
                if contains(&fragment, &needle) {
                    let end = self.words.len().min(i + length);
                    return Bounds::union_all(self.words[i..end].iter().map(|w| w.bounds()));
                }
            }
        }
        None
    }

    /// The fragment of this line holding only the given words, or a
    /// copy of the whole line when they do not occur in it.
    pub fn focus_on(&self, words_to_focus_on: &str) -> Line {
        match self.find_bounds_of_text(words_to_focus_on) {
            Some(b) => self.crop(&b),
            None => self.clone(),
        }
    }

    /// Case-insensitive variant of [`focus_on`](Line::focus_on).
    pub fn focus_on_ignore_case(&self, words_to_focus_on: &str) -> Line {
        match self.find_bounds_of_text_ignore_case(words_to_focus_on) {
            Some(b) => self.crop(&b),
            None => self.clone(),
        }
    }

    /// Taxicab distance between the anchor points of the two lines.
    /// Lines without bounds are infinitely far away.
    pub fn distance_to(&self, other: &Line) -> i32 {
        match (self.bounds, other.bounds) {
            (Some(a), Some(b)) => a.distance(&b),
            _ => i32::MAX,
        }
    }

    /// The closest line from `candidates`, or `None` if it is empty.
    pub fn closest_from<'a>(&self, candidates: &'a [Line]) -> Option<&'a Line> {
        candidates.iter().min_by_key(|l| self.distance_to(l))
    }

    /// Like [`closest_from`](Line::closest_from), but candidates above
    /// this line count as twice as far.
    pub fn closest_preferring_below<'a>(&self, candidates: &'a [Line]) -> Option<&'a Line> {
        candidates.iter().min_by_key(|l| {
            let dist = self.distance_to(l);
            let above = match (l.bounds, self.bounds) {
                (Some(lb), Some(sb)) => lb.is_above(&sb),
                _ => false,
            };
            if above {
                dist.saturating_mul(2)
            } else {
                dist
            }
        })
    }

    /// Median horizontal gap between consecutive words, or `None` when
    /// the line has fewer than two words with bounds.
    pub fn median_space_width(&self) -> Option<i32> {
        let mut widths = Vec::new();
        let mut prev_right: Option<i32> = None;
        for w in &self.words {
            if let Some(b) = w.bounds() {
                if let Some(right) = prev_right {
                    widths.push(b.left - right);
                }
                prev_right = Some(b.right);
            }
        }
        if widths.is_empty() {
            return None;
        }
        widths.sort_unstable();
        let mid = widths.len() / 2;
        if widths.len() % 2 == 0 {
            Some((widths[mid] + widths[mid - 1]) / 2)
        } else {
            Some(widths[mid])
        }
    }

    /// New line with every word transformed by `f`. Bounds are
    /// recomputed unless the line has no words.
    pub fn map(&self, f: impl Fn(&Word) -> Word) -> Line {
        let words: Vec<Word> = self.words.iter().map(f).collect();
        if words.is_empty() {
            Line {
                words,
                bounds: self.bounds,
            }
        } else {
            Line::new(words)
        }
    }

    /// New line with every word's bounds transformed by `f`. When the
    /// line has no words its own bounds are transformed instead.
    pub fn map_bounds(&self, f: impl Fn(Option<Bounds>) -> Option<Bounds>) -> Line {
        if self.words.is_empty() {
            Line {
                words: Vec::new(),
                bounds: f(self.bounds),
            }
        } else {
            Line::new(self.words.iter().map(|w| w.map_bounds(&f)).collect())
        }
    }

    /// New line translated by the given vector.
    pub fn translate(&self, dx: i32, dy: i32) -> Line {
        Line {
            words: self.words.iter().map(|w| w.translate(dx, dy)).collect(),
            bounds: self.bounds.map(|b| b.translate(dx, dy)),
        }
    }
}

impl Bounded for Line {
    fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }
}
