//! The smallest unit of recognized text.

use crate::dom::Element;
use crate::error::{Error, Result};
use crate::geometry::{Bounded, Bounds};
use serde::{Deserialize, Serialize};

/// A single recognized word with its geometry and font style.
///
/// Corresponding hOCR classes: `ocrx_word` and `ocr_word`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    text: String,
    bounds: Option<Bounds>,
    bold: bool,
    italic: bool,
}

impl Word {
    /// Create a word in the regular font.
    pub fn new(text: impl Into<String>, bounds: Option<Bounds>) -> Word {
        Word {
            text: text.into(),
            bounds,
            bold: false,
            italic: false,
        }
    }

    /// Create a word with explicit font style.
    pub fn styled(
        text: impl Into<String>,
        bounds: Option<Bounds>,
        bold: bool,
        italic: bool,
    ) -> Word {
        Word {
            text: text.into(),
            bounds,
            bold,
            italic,
        }
    }

    /// Build a word from a markup node.
    ///
    /// The node may be a bare text run, a `span` of class `ocrx_word` or
    /// `ocr_word`, or a `b`/`strong`/`i`/`em` wrapper; wrappers nest, so
    /// the walk descends through first children collecting style and
    /// geometry until it reaches text. Any other tag is an error.
    pub fn from_element(e: &Element) -> Result<Word> {
        let text = e.raw_text();
        let mut bounds = None;
        let mut bold = false;
        let mut italic = false;
        let mut current = e;
        loop {
            match current {
                Element::Text(_) => break,
                Element::Tag(tag) => {
                    match tag.name.as_str() {
                        "span"
                            if matches!(tag.class(), Some("ocrx_word") | Some("ocr_word")) =>
                        {
                            bounds = tag.title().and_then(Bounds::from_title_value);
                        }
                        "strong" | "b" => bold = true,
                        "em" | "i" => italic = true,
                        _ => {
                            return Err(Error::UnexpectedStructure {
                                expected: "word span or style tag",
                                found: e.mk_string(),
                            });
                        }
                    }
                    match tag.children.first() {
                        Some(child) => current = child,
                        None => break,
                    }
                }
            }
        }
        Ok(Word {
            text,
            bounds,
            bold,
            italic,
        })
    }

    /// Text of this word.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check if this word is bold.
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    /// Check if this word is italic.
    pub fn is_italic(&self) -> bool {
        self.italic
    }

    /// Check if the text of this word is only whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Check if this word may be an OCR artifact rather than an actual
    /// word. Single characters usually are.
    pub fn may_be_artifact(&self) -> bool {
        self.text.chars().count() <= 1
    }

    /// New word with bounds transformed by `f`.
    pub fn map_bounds(&self, f: impl FnOnce(Option<Bounds>) -> Option<Bounds>) -> Word {
        Word {
            text: self.text.clone(),
            bounds: f(self.bounds),
            bold: self.bold,
            italic: self.italic,
        }
    }

    /// New word translated by the given vector.
    pub fn translate(&self, dx: i32, dy: i32) -> Word {
        self.map_bounds(|b| b.map(|b| b.translate(dx, dy)))
    }
}

impl Bounded for Word {
    fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }
}

/// Join word texts with single spaces.
pub fn join_words(words: &[Word]) -> String {
    words
        .iter()
        .map(Word::text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Concatenate the texts of up to `length` words starting at `offset`,
/// without separators, skipping blank words. Out-of-range parts of the
/// window are ignored.
pub fn spaceless_string(words: &[Word], offset: usize, length: usize) -> String {
    let end = words.len().min(offset.saturating_add(length));
    let mut out = String::new();
    for w in words.get(offset..end).unwrap_or(&[]) {
        if !w.is_blank() {
            out.push_str(w.text());
        }
    }
    out
}

/// If `text`, ignoring spaces, equals the concatenation of a run of
/// consecutive words, return the union of that run's bounds. Uses
/// strict string equality. The rightmost starting position wins.
pub fn find_bounds_of_text(words: &[Word], text: &str) -> Option<Bounds> {
    let needle = text.replace(' ', "");
    for i in (0..words.len()).rev() {
        let till_end = spaceless_string(words, i, words.len() - i);
        if till_end.starts_with(&needle) {
            for length in 1..words.len() {
                if spaceless_string(words, i, length) == needle {
                    let end = words.len().min(i + length);
                    return Bounds::union_all(words[i..end].iter().map(|w| w.bounds()));
                }
            }
        }
    }
    None
}
