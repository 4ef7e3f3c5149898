//! A column or block of paragraphs.

use crate::dom::Element;
use crate::error::{Error, Result};
use crate::geometry::{Bounded, Bounds};
use crate::model::line::Line;
use crate::model::paragraph::Paragraph;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A content area grouping paragraphs.
///
/// Corresponding hOCR class: `ocr_carea`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    paragraphs: Vec<Paragraph>,
    bounds: Option<Bounds>,
}

impl Area {
    /// Create an area from paragraphs, recomputing the bounds from them.
    pub fn new(paragraphs: Vec<Paragraph>) -> Area {
        let bounds = Bounds::union_all(paragraphs.iter().map(|p| p.bounds()));
        Area { paragraphs, bounds }
    }

    /// Create an area from paragraphs with explicitly given bounds.
    pub fn with_bounds(paragraphs: Vec<Paragraph>, bounds: Option<Bounds>) -> Area {
        Area { paragraphs, bounds }
    }

    /// Build an area from a `div` tag. Blank children are dropped;
    /// every remaining child must be a paragraph.
    pub fn from_element(e: &Element) -> Result<Area> {
        let Element::Tag(tag) = e else {
            return Err(Error::UnexpectedStructure {
                expected: "area div",
                found: e.mk_string(),
            });
        };
        if tag.name != "div" {
            return Err(Error::UnexpectedStructure {
                expected: "area div",
                found: e.mk_string(),
            });
        }
        let paragraphs = tag
            .children
            .iter()
            .filter(|k| !k.is_blank())
            .map(Paragraph::from_element)
            .collect::<Result<Vec<_>>>()?;
        let bounds = tag
            .title()
            .and_then(Bounds::from_title_value)
            .or_else(|| Bounds::union_all(paragraphs.iter().map(|p| p.bounds())));
        Ok(Area { paragraphs, bounds })
    }

    /// Paragraphs of this area in document order.
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Number of paragraphs in this area.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Total number of lines over all paragraphs.
    pub fn line_count(&self) -> usize {
        self.paragraphs.iter().map(Paragraph::line_count).sum()
    }

    /// Total number of words over all paragraphs.
    pub fn word_count(&self) -> usize {
        self.paragraphs.iter().map(Paragraph::word_count).sum()
    }

    /// Check if every paragraph in this area is blank.
    pub fn is_blank(&self) -> bool {
        self.paragraphs.iter().all(Paragraph::is_blank)
    }

    /// Copy of this area keeping only the words contained in the given
    /// rectangle. Paragraphs that become blank are dropped.
    pub fn crop(&self, rectangle: &Bounds) -> Area {
        let paragraphs = self
            .paragraphs
            .iter()
            .map(|p| p.crop(rectangle))
            .filter(|p| !p.is_blank())
            .collect();
        Area {
            paragraphs,
            bounds: Bounds::intersection_opt(self.bounds, Some(*rectangle)),
        }
    }

    /// Copy of this area keeping the lines whose bounds touch the given
    /// rectangle. Bounds are recomputed from what remains.
    pub fn retain_touching(&self, rectangle: &Bounds) -> Area {
        Area::new(
            self.paragraphs
                .iter()
                .map(|p| p.retain_touching(rectangle))
                .filter(|p| !p.is_blank())
                .collect(),
        )
    }

    /// The line satisfying `predicate` that ranks highest under
    /// `compare`, over all paragraphs.
    pub fn find_line(
        &self,
        compare: &dyn Fn(&Line, &Line) -> Ordering,
        predicate: &dyn Fn(&Line) -> bool,
    ) -> Option<&Line> {
        let mut result: Option<&Line> = None;
        for p in &self.paragraphs {
            if let Some(l) = p.find_line(compare, predicate) {
                match result {
                    Some(best) if compare(l, best) != Ordering::Greater => {}
                    _ => result = Some(l),
                }
            }
        }
        result
    }

    /// New area with every paragraph transformed by `f`. Bounds are
    /// recomputed unless the area has no paragraphs.
    pub fn map(&self, f: impl Fn(&Paragraph) -> Paragraph) -> Area {
        let paragraphs: Vec<Paragraph> = self.paragraphs.iter().map(f).collect();
        if paragraphs.is_empty() {
            Area {
                paragraphs,
                bounds: self.bounds,
            }
        } else {
            Area::new(paragraphs)
        }
    }

    /// New area with all bounds transformed by `f`. When the area has
    /// no paragraphs its own bounds are transformed instead.
    pub fn map_bounds(&self, f: impl Fn(Option<Bounds>) -> Option<Bounds>) -> Area {
        if self.paragraphs.is_empty() {
            Area {
                paragraphs: Vec::new(),
                bounds: f(self.bounds),
            }
        } else {
            Area::new(self.paragraphs.iter().map(|p| p.map_bounds(&f)).collect())
        }
    }

    /// New area translated by the given vector.
    pub fn translate(&self, dx: i32, dy: i32) -> Area {
        Area {
            paragraphs: self
                .paragraphs
                .iter()
                .map(|p| p.translate(dx, dy))
                .collect(),
            bounds: self.bounds.map(|b| b.translate(dx, dy)),
        }
    }
}

impl Bounded for Area {
    fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::create_ast;

    #[test]
    fn test_from_element() {
        let hocr = "<div class='ocr_carea' title='bbox 0 0 100 50'>\
                    <p><span class='ocr_line' title='bbox 0 0 40 10'>\
                    <span class='ocrx_word' title='bbox 0 0 20 10'>hi</span>\
                    </span></p></div>";
        let ast = create_ast(hocr).unwrap();
        let area = Area::from_element(&ast[0]).unwrap();
        assert_eq!(area.bounds(), Some(Bounds::new(0, 0, 100, 50)));
        assert_eq!(area.paragraph_count(), 1);
        assert_eq!(area.word_count(), 1);
    }

    #[test]
    fn test_non_div_is_an_error() {
        let ast = create_ast("<p>x</p>").unwrap();
        assert!(Area::from_element(&ast[0]).is_err());
    }

    #[test]
    fn test_bounds_fall_back_to_children() {
        let hocr = "<div><p><span class='ocr_line'>\
                    <span class='ocrx_word' title='bbox 2 3 20 13'>hi</span>\
                    </span></p></div>";
        let ast = create_ast(hocr).unwrap();
        let area = Area::from_element(&ast[0]).unwrap();
        assert_eq!(area.bounds(), Some(Bounds::new(2, 3, 20, 13)));
    }
}
