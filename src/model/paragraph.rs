//! A paragraph grouping consecutive lines.

use crate::dom::Element;
use crate::error::{Error, Result};
use crate::geometry::{Bounded, Bounds};
use crate::model::line::Line;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A paragraph of lines.
///
/// Corresponding hOCR class: `ocr_par`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    lines: Vec<Line>,
    bounds: Option<Bounds>,
}

impl Paragraph {
    /// Create a paragraph from lines, recomputing the bounds from them.
    pub fn new(lines: Vec<Line>) -> Paragraph {
        let bounds = Bounds::union_all(lines.iter().map(|l| l.bounds()));
        Paragraph { lines, bounds }
    }

    /// Create a paragraph from lines with explicitly given bounds.
    pub fn with_bounds(lines: Vec<Line>, bounds: Option<Bounds>) -> Paragraph {
        Paragraph { lines, bounds }
    }

    /// Build a paragraph from a `p` tag. Blank children are dropped;
    /// every remaining child must be a line.
    pub fn from_element(e: &Element) -> Result<Paragraph> {
        let Element::Tag(tag) = e else {
            return Err(Error::UnexpectedStructure {
                expected: "paragraph tag",
                found: e.mk_string(),
            });
        };
        if tag.name != "p" {
            return Err(Error::UnexpectedStructure {
                expected: "paragraph tag",
                found: e.mk_string(),
            });
        }
        let lines = tag
            .children
            .iter()
            .filter(|k| !k.is_blank())
            .map(Line::from_element)
            .collect::<Result<Vec<_>>>()?;
        let bounds = tag
            .title()
            .and_then(Bounds::from_title_value)
            .or_else(|| Bounds::union_all(lines.iter().map(|l| l.bounds())));
        Ok(Paragraph { lines, bounds })
    }

    /// Lines of this paragraph in document order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of lines in this paragraph.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total number of words over all lines.
    pub fn word_count(&self) -> usize {
        self.lines.iter().map(Line::word_count).sum()
    }

    /// Check if every line in this paragraph is blank.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(Line::is_blank)
    }

    /// Copy of this paragraph keeping only the words contained in the
    /// given rectangle. Lines that become blank are dropped.
    pub fn crop(&self, rectangle: &Bounds) -> Paragraph {
        let lines = self
            .lines
            .iter()
            .map(|l| l.crop(rectangle))
            .filter(|l| !l.is_blank())
            .collect();
        Paragraph {
            lines,
            bounds: Bounds::intersection_opt(self.bounds, Some(*rectangle)),
        }
    }

    /// Copy of this paragraph keeping the lines whose bounds touch the
    /// given rectangle. The paragraph bounds are left as they are.
    pub fn retain_touching(&self, rectangle: &Bounds) -> Paragraph {
        let lines = self
            .lines
            .iter()
            .filter(|l| l.bounds().is_some_and(|b| b.touches(rectangle)))
            .cloned()
            .collect();
        Paragraph {
            lines,
            bounds: self.bounds,
        }
    }

    /// The line satisfying `predicate` that ranks highest under
    /// `compare`, or `None` if no line satisfies it.
    pub fn find_line(
        &self,
        compare: &dyn Fn(&Line, &Line) -> Ordering,
        predicate: &dyn Fn(&Line) -> bool,
    ) -> Option<&Line> {
        let mut result: Option<&Line> = None;
        for l in &self.lines {
            if predicate(l) {
                match result {
                    Some(best) if compare(l, best) != Ordering::Greater => {}
                    _ => result = Some(l),
                }
            }
        }
        result
    }

    /// New paragraph with every line transformed by `f`. Bounds are
    /// recomputed unless the paragraph has no lines.
    pub fn map(&self, f: impl Fn(&Line) -> Line) -> Paragraph {
        let lines: Vec<Line> = self.lines.iter().map(f).collect();
        if lines.is_empty() {
            Paragraph {
                lines,
                bounds: self.bounds,
            }
        } else {
            Paragraph::new(lines)
        }
    }

    /// New paragraph with all bounds transformed by `f`. When the
    /// paragraph has no lines its own bounds are transformed instead.
    pub fn map_bounds(&self, f: impl Fn(Option<Bounds>) -> Option<Bounds>) -> Paragraph {
        if self.lines.is_empty() {
            Paragraph {
                lines: Vec::new(),
                bounds: f(self.bounds),
            }
        } else {
            Paragraph::new(self.lines.iter().map(|l| l.map_bounds(&f)).collect())
        }
    }

    /// New paragraph translated by the given vector.
    pub fn translate(&self, dx: i32, dy: i32) -> Paragraph {
        Paragraph {
            lines: self.lines.iter().map(|l| l.translate(dx, dy)).collect(),
            bounds: self.bounds.map(|b| b.translate(dx, dy)),
        }
    }
}

impl Bounded for Paragraph {
    fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }
}
