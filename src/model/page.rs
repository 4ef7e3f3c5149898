//! A full OCR'd page and the layout queries over it.

use crate::dom::Element;
use crate::error::{Error, Result};
use crate::geometry::{Bounded, Bounds};
use crate::model::area::Area;
use crate::model::line::Line;
use crate::model::word::Word;
use crate::order;
use crate::text;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A page of the OCR'd document.
///
/// Corresponding hOCR class: `ocr_page`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    number: u32,
    areas: Vec<Area>,
    bounds: Option<Bounds>,
}

impl Page {
    /// Create a page from areas, recomputing the bounds from them.
    pub fn new(number: u32, areas: Vec<Area>) -> Page {
        let bounds = Bounds::union_all(areas.iter().map(|a| a.bounds()));
        Page {
            number,
            areas,
            bounds,
        }
    }

    /// Create a page from areas with explicitly given bounds.
    pub fn with_bounds(number: u32, areas: Vec<Area>, bounds: Option<Bounds>) -> Page {
        Page {
            number,
            areas,
            bounds,
        }
    }

    /// Build a page from a `div` tag of class `ocr_page`. Blank
    /// children are dropped; every remaining child must be an area.
    pub fn from_element(number: u32, e: &Element) -> Result<Page> {
        let Element::Tag(tag) = e else {
            return Err(Error::UnexpectedStructure {
                expected: "page div",
                found: e.mk_string(),
            });
        };
        if tag.name != "div" {
            return Err(Error::UnexpectedStructure {
                expected: "page div",
                found: e.mk_string(),
            });
        }
        let areas = tag
            .children
            .iter()
            .filter(|k| !k.is_blank())
            .map(Area::from_element)
            .collect::<Result<Vec<_>>>()?;
        let bounds = tag
            .title()
            .and_then(Bounds::from_title_value)
            .or_else(|| Bounds::union_all(areas.iter().map(|a| a.bounds())));
        Ok(Page {
            number,
            areas,
            bounds,
        })
    }

    /// Page number, 1-based by convention.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Copy of this page with a new page number.
    pub fn renumber(&self, new_number: u32) -> Page {
        Page {
            number: new_number,
            areas: self.areas.clone(),
            bounds: self.bounds,
        }
    }

    /// Renumber a sequence of pages consecutively starting at
    /// `start_from`.
    pub fn renumber_all(start_from: u32, pages: &[Page]) -> Vec<Page> {
        pages
            .iter()
            .enumerate()
            .map(|(i, p)| p.renumber(start_from + i as u32))
            .collect()
    }

    /// Areas of this page in document order.
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    /// Width of the page, when known.
    pub fn width(&self) -> Option<i32> {
        self.bounds.map(|b| b.width())
    }

    /// Height of the page, when known.
    pub fn height(&self) -> Option<i32> {
        self.bounds.map(|b| b.height())
    }

    /// Number of areas in this page.
    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    /// Total number of paragraphs over all areas.
    pub fn paragraph_count(&self) -> usize {
        self.areas.iter().map(Area::paragraph_count).sum()
    }

    /// Total number of lines over all areas.
    pub fn line_count(&self) -> usize {
        self.areas.iter().map(Area::line_count).sum()
    }

    /// Total number of words over all areas.
    pub fn word_count(&self) -> usize {
        self.areas.iter().map(Area::word_count).sum()
    }

    /// Check if every area in this page is blank.
    pub fn is_blank(&self) -> bool {
        self.areas.iter().all(Area::is_blank)
    }

    /// Copy of this page keeping only the words contained in the given
    /// rectangle. Areas that become blank are dropped.
    pub fn crop(&self, rectangle: &Bounds) -> Page {
        let areas = self
            .areas
            .iter()
            .map(|a| a.crop(rectangle))
            .filter(|a| !a.is_blank())
            .collect();
        Page {
            number: self.number,
            areas,
            bounds: Bounds::intersection_opt(self.bounds, Some(*rectangle)),
        }
    }

    /// Copy of this page keeping the lines whose bounds touch the given
    /// rectangle.
    pub fn retain_touching(&self, rectangle: &Bounds) -> Page {
        Page::new(
            self.number,
            self.areas
                .iter()
                .map(|a| a.retain_touching(rectangle))
                .filter(|a| !a.is_blank())
                .collect(),
        )
    }

    /// All words of the page. The order is unspecified.
    pub fn all_words(&self) -> Vec<&Word> {
        self.areas
            .iter()
            .flat_map(|a| a.paragraphs())
            .flat_map(|p| p.lines())
            .flat_map(|l| l.words())
            .collect()
    }

    /// All lines of the page in natural reading order.
    pub fn all_lines(&self) -> Vec<&Line> {
        let mut lines: Vec<&Line> = self
            .areas
            .iter()
            .flat_map(|a| a.paragraphs())
            .flat_map(|p| p.lines())
            .collect();
        lines.sort_by(|a, b| order::flow_order(*a, *b));
        lines
    }

    /// All lines of the page in natural reading order, as strings.
    pub fn all_lines_as_strings(&self) -> Vec<String> {
        self.all_lines().iter().map(|l| l.text()).collect()
    }

    /// The whole page as text, one line per text line, in natural
    /// reading order.
    pub fn plain_text(&self) -> String {
        self.all_lines_as_strings().join("\n")
    }

    /// All lines satisfying `predicate`. The order is unspecified.
    pub fn find_all_lines(&self, predicate: impl Fn(&Line) -> bool) -> Vec<&Line> {
        self.areas
            .iter()
            .flat_map(|a| a.paragraphs())
            .flat_map(|p| p.lines())
            .filter(|l| predicate(l))
            .collect()
    }

    /// The line satisfying `predicate` that ranks highest under
    /// `compare`, over the whole page.
    pub fn find_line(
        &self,
        compare: &dyn Fn(&Line, &Line) -> Ordering,
        predicate: &dyn Fn(&Line) -> bool,
    ) -> Option<&Line> {
        let mut result: Option<&Line> = None;
        for a in &self.areas {
            if let Some(l) = a.find_line(compare, predicate) {
                match result {
                    Some(best) if compare(l, best) != Ordering::Greater => {}
                    _ => result = Some(l),
                }
            }
        }
        result
    }

    /// The line with the highest non-negative score. Lines scoring
    /// `None` or below zero do not match.
    pub fn find_line_maximizing(&self, score: impl Fn(&Line) -> Option<f64>) -> Option<&Line> {
        self.find_line_maximizing_impl(&score, None, false)
    }

    /// Like [`find_line_maximizing`](Page::find_line_maximizing), but
    /// biased towards lines close to `header`.
    pub fn find_line_maximizing_close_to(
        &self,
        score: impl Fn(&Line) -> Option<f64>,
        header: &Bounds,
    ) -> Option<&Line> {
        self.find_line_maximizing_impl(&score, Some(header), false)
    }

    /// Like [`find_line_maximizing`](Page::find_line_maximizing), but
    /// biased towards lines close to and below `header`.
    pub fn find_line_maximizing_preferably_slightly_below(
        &self,
        score: impl Fn(&Line) -> Option<f64>,
        header: &Bounds,
    ) -> Option<&Line> {
        self.find_line_maximizing_impl(&score, Some(header), true)
    }

    fn find_line_maximizing_impl(
        &self,
        score: &dyn Fn(&Line) -> Option<f64>,
        header: Option<&Bounds>,
        slightly_below: bool,
    ) -> Option<&Line> {
        let mut result = None;
        let mut max_score = f64::NEG_INFINITY;
        for l in self.find_all_lines(|_| true) {
            let Some(mut s) = score(l) else { continue };
            if s < 0.0 {
                continue;
            }
            if let Some(header) = header {
                let Some(lb) = l.bounds() else { continue };
                s += 0.1;
                let multiplier =
                    (header.distance(&lb) as f64 + self.height().unwrap_or(0) as f64 / 10.0)
                        .sqrt()
                        .sqrt();
                s /= multiplier;
                if slightly_below && header.is_below(&lb) {
                    s /= 2.0;
                }
            }
            if s > max_score {
                result = Some(l);
                max_score = s;
            }
        }
        result
    }

    /// The line with the lowest non-negative score. Lines scoring
    /// `None` or below zero do not match.
    pub fn find_line_minimizing(&self, score: impl Fn(&Line) -> Option<f64>) -> Option<&Line> {
        self.find_line_minimizing_impl(&score, None, false)
    }

    /// Like [`find_line_minimizing`](Page::find_line_minimizing), but
    /// biased towards lines close to `header`.
    pub fn find_line_minimizing_close_to(
        &self,
        score: impl Fn(&Line) -> Option<f64>,
        header: &Bounds,
    ) -> Option<&Line> {
        self.find_line_minimizing_impl(&score, Some(header), false)
    }

    /// Like [`find_line_minimizing`](Page::find_line_minimizing), but
    /// biased towards lines close to and below `header`.
    pub fn find_line_minimizing_preferably_slightly_below(
        &self,
        score: impl Fn(&Line) -> Option<f64>,
        header: &Bounds,
    ) -> Option<&Line> {
        self.find_line_minimizing_impl(&score, Some(header), true)
    }

    fn find_line_minimizing_impl(
        &self,
        score: &dyn Fn(&Line) -> Option<f64>,
        header: Option<&Bounds>,
        slightly_below: bool,
    ) -> Option<&Line> {
        let mut result = None;
        let mut min_score = f64::INFINITY;
        for l in self.find_all_lines(|_| true) {
            let Some(mut s) = score(l) else { continue };
            if s < 0.0 {
                continue;
            }
            if let Some(header) = header {
                let Some(lb) = l.bounds() else { continue };
                s += 0.1;
                let multiplier =
                    (header.distance(&lb) as f64 + self.height().unwrap_or(0) as f64 / 10.0)
                        .sqrt()
                        .sqrt();
                s *= multiplier;
                if slightly_below && header.is_below(&lb) {
                    s *= 2.0;
                }
            }
            if s < min_score {
                result = Some(l);
                min_score = s;
            }
        }
        result
    }

    /// The smallest rectangle containing `b` that does not cut any
    /// word. Runs to a fixed point, since absorbing one word can make
    /// the rectangle cut another.
    pub fn grow_bounds_until_not_cutting_words(&self, b: &Bounds) -> Bounds {
        let words = self.all_words();
        let mut rect = *b;
        let mut modified = true;
        while modified {
            modified = false;
            for w in &words {
                if let Some(wb) = w.bounds() {
                    if rect.cuts(&wb) {
                        rect = rect.union(&wb);
                        modified = true;
                    }
                }
            }
        }
        rect
    }

    fn has_words_intersecting(rect: Bounds) -> impl Fn(&Line) -> bool {
        move |l: &Line| {
            l.words()
                .iter()
                .any(|w| w.bounds().is_some_and(|b| b.intersects(&rect)))
        }
    }

    /// Estimate the bounds of an entire left-aligned column given
    /// bounds that span its height.
    ///
    /// The seed is first expanded so it cuts no words. If only a few
    /// lines reach the right edge of that expansion, the edge is probed
    /// rightward in half-space-width steps until it runs into another
    /// column or off the page; the last probe position that cut nothing
    /// becomes the new right edge. Columns with very few lines can give
    /// surprising results.
    pub fn column_bounds(&self, b: &Bounds) -> Bounds {
        let rect = self.grow_bounds_until_not_cutting_words(b);
        let lines = self.find_all_lines(Self::has_words_intersecting(rect));
        let mut sum = 0.0;
        let mut count = 0u32;
        for l in &lines {
            for pair in l.words().windows(2) {
                let (Some(lb), Some(rb)) = (pair[0].bounds(), pair[1].bounds()) else {
                    continue;
                };
                if lb.within(&rect) && rb.within(&rect) {
                    sum += (rb.left - lb.right) as f64;
                    count += 1;
                }
            }
        }
        if count == 0 {
            log::debug!("no inter-word gaps inside column seed, keeping expanded bounds");
            return rect;
        }
        let space_width = sum / count as f64;
        let mut moving_edge = rect.right_edge();
        let near_the_right_edge = moving_edge.move_left((space_width / 4.0) as i32);
        let mut long_lines = self
            .find_all_lines(Self::has_words_intersecting(near_the_right_edge))
            .len();
        if long_lines < 2 {
            long_lines = 2;
        }
        let mut last_good_position = moving_edge;
        let step = ((space_width / 2.0) as i32).max(1);
        while self.bounds.is_some_and(|pb| moving_edge.within(&pb))
            && moving_edge.left - rect.right < rect.width()
        {
            moving_edge = moving_edge.move_right(step);
            let cut_lines = self
                .find_all_lines(Self::has_words_intersecting(moving_edge))
                .len();
            if cut_lines > long_lines {
                break;
            }
            if cut_lines == 0 {
                last_good_position = moving_edge;
            }
        }
        log::debug!(
            "column seed {} expanded to {}",
            b,
            rect.union(&last_good_position)
        );
        rect.union(&last_good_position)
    }

    /// Copy of this page with tiny print removed.
    ///
    /// Tiny print is anything shorter than a sixth of the median word
    /// height, or a twelfth for words that render small anyway, like
    /// runs of commas and quote marks. Pages with fewer than ten
    /// measurable words, or with more unmeasurable words than
    /// measurable ones, are returned unchanged.
    pub fn clean_tiny_print(&self) -> Page {
        let mut heights = Vec::new();
        let mut bad = 0usize;
        for w in self.all_words() {
            match w.bounds() {
                Some(b) => heights.push(b.height()),
                None => bad += 1,
            }
        }
        if heights.len() < 10 || bad > heights.len() {
            return self.clone();
        }
        heights.sort_unstable();
        let cutoff = heights[heights.len() / 2] / 6;
        let keep = |w: &Word| match w.bounds() {
            Some(b) => {
                if text::is_smaller(w.text()) {
                    b.height() * 2 > cutoff
                } else {
                    b.height() > cutoff
                }
            }
            None => true,
        };
        self.map(|a| {
            a.map(|p| {
                p.map(|l| {
                    Line::with_bounds(
                        l.words().iter().filter(|w| keep(w)).cloned().collect(),
                        l.bounds(),
                    )
                })
            })
        })
    }

    /// New page with every area transformed by `f`. Bounds are
    /// recomputed unless the page has no areas.
    pub fn map(&self, f: impl Fn(&Area) -> Area) -> Page {
        let areas: Vec<Area> = self.areas.iter().map(f).collect();
        if areas.is_empty() {
            Page {
                number: self.number,
                areas,
                bounds: self.bounds,
            }
        } else {
            Page::new(self.number, areas)
        }
    }

    /// New page with all bounds transformed by `f`. When the page has
    /// no areas its own bounds are transformed instead.
    pub fn map_bounds(&self, f: impl Fn(Option<Bounds>) -> Option<Bounds>) -> Page {
        if self.areas.is_empty() {
            Page {
                number: self.number,
                areas: Vec::new(),
                bounds: f(self.bounds),
            }
        } else {
            Page::new(
                self.number,
                self.areas.iter().map(|a| a.map_bounds(&f)).collect(),
            )
        }
    }

    /// New page with every line transformed by `f`.
    pub fn map_lines(&self, f: impl Fn(&Line) -> Line) -> Page {
        self.map(|a| a.map(|p| p.map(&f)))
    }

    /// New page translated by the given vector.
    pub fn translate(&self, dx: i32, dy: i32) -> Page {
        Page {
            number: self.number,
            areas: self.areas.iter().map(|a| a.translate(dx, dy)).collect(),
            bounds: self.bounds.map(|b| b.translate(dx, dy)),
        }
    }
}

impl Bounded for Page {
    fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::paragraph::Paragraph;

    fn word(text: &str, l: i32, t: i32, r: i32, b: i32) -> Word {
        Word::new(text, Some(Bounds::new(l, t, r, b)))
    }

    fn single_line_page(words: Vec<Word>) -> Page {
        Page::new(
            1,
            vec![Area::new(vec![Paragraph::new(vec![Line::new(words)])])],
        )
    }

    #[test]
    fn test_all_lines_in_flow_order() {
        let top = Line::new(vec![word("top", 0, 0, 50, 10)]);
        let left = Line::new(vec![word("left", 0, 20, 40, 30)]);
        let right = Line::new(vec![word("right", 60, 20, 100, 30)]);
        let page = Page::new(
            1,
            vec![
                Area::new(vec![Paragraph::new(vec![right.clone()])]),
                Area::new(vec![Paragraph::new(vec![left.clone(), top.clone()])]),
            ],
        );
        assert_eq!(
            page.all_lines_as_strings(),
            vec!["top".to_string(), "left".to_string(), "right".to_string()]
        );
    }

    #[test]
    fn test_grow_bounds_fixed_point() {
        // absorbing the first word makes the rectangle cut the second
        let page = single_line_page(vec![
            word("aa", 0, 0, 10, 10),
            word("bb", 8, 0, 20, 10),
            word("cc", 40, 0, 50, 10),
        ]);
        let grown = page.grow_bounds_until_not_cutting_words(&Bounds::new(5, 0, 9, 10));
        assert_eq!(grown, Bounds::new(0, 0, 20, 10));
    }

    #[test]
    fn test_grow_bounds_leaves_noncutting_input_alone() {
        let page = single_line_page(vec![word("aa", 0, 0, 10, 10)]);
        let b = Bounds::new(20, 0, 30, 10);
        assert_eq!(page.grow_bounds_until_not_cutting_words(&b), b);
    }

    #[test]
    fn test_find_line_maximizing() {
        let short = Line::new(vec![word("hi", 0, 0, 10, 10)]);
        let long = Line::new(vec![
            word("hello", 0, 20, 30, 30),
            word("there", 35, 20, 60, 30),
        ]);
        let page = Page::new(
            1,
            vec![Area::new(vec![Paragraph::new(vec![short, long.clone()])])],
        );
        let found = page.find_line_maximizing(|l| Some(l.word_count() as f64));
        assert_eq!(found, Some(&long));
        assert!(page.find_line_maximizing(|_| None).is_none());
        assert!(page.find_line_maximizing(|_| Some(-1.0)).is_none());
    }

    #[test]
    fn test_find_line_minimizing_close_to() {
        let near = Line::new(vec![word("near", 0, 100, 30, 110)]);
        let far = Line::new(vec![word("far", 0, 900, 30, 910)]);
        let page = Page::new(
            1,
            vec![Area::new(vec![Paragraph::new(vec![near.clone(), far])])],
        );
        let header = Bounds::new(0, 80, 30, 90);
        let found = page.find_line_minimizing_close_to(|_| Some(1.0), &header);
        assert_eq!(found, Some(&near));
    }

    #[test]
    fn test_crop_drops_blank_areas() {
        let page = Page::new(
            1,
            vec![
                Area::new(vec![Paragraph::new(vec![Line::new(vec![word(
                    "keep", 0, 0, 10, 10,
                )])])]),
                Area::new(vec![Paragraph::new(vec![Line::new(vec![word(
                    "drop", 0, 500, 10, 510,
                )])])]),
            ],
        );
        let cropped = page.crop(&Bounds::new(0, 0, 100, 100));
        assert_eq!(cropped.area_count(), 1);
        assert_eq!(cropped.word_count(), 1);
    }

    #[test]
    fn test_clean_tiny_print() {
        let mut words: Vec<Word> = (0..10)
            .map(|i| word("word", 20 * i, 0, 20 * i + 15, 12))
            .collect();
        words.push(word("speck", 500, 0, 505, 1));
        let page = single_line_page(words);
        let cleaned = page.clean_tiny_print();
        assert_eq!(cleaned.word_count(), 10);
        assert!(!cleaned
            .all_words()
            .iter()
            .any(|w| w.text() == "speck"));
    }

    #[test]
    fn test_clean_tiny_print_skips_small_pages() {
        let page = single_line_page(vec![
            word("one", 0, 0, 10, 12),
            word("speck", 20, 0, 25, 1),
        ]);
        assert_eq!(page.clean_tiny_print().word_count(), 2);
    }

    #[test]
    fn test_renumber_all() {
        let pages = vec![
            single_line_page(vec![word("a", 0, 0, 5, 5)]),
            single_line_page(vec![word("b", 0, 0, 5, 5)]),
        ];
        let renumbered = Page::renumber_all(5, &pages);
        assert_eq!(
            renumbered.iter().map(Page::number).collect::<Vec<_>>(),
            vec![5, 6]
        );
    }

    #[test]
    fn test_column_bounds_expands_to_column_edge() {
        // two columns of text; the seed spans the left column's height
        let mut lines = Vec::new();
        for row in 0..5 {
            let y = row * 20;
            lines.push(Line::new(vec![
                word("lorem", 0, y, 40, y + 10),
                word("ipsum", 50, y, 90, y + 10),
            ]));
            lines.push(Line::new(vec![
                word("dolor", 200, y, 240, y + 10),
                word("sit", 250, y, 280, y + 10),
            ]));
        }
        let page = Page::with_bounds(
            1,
            vec![Area::new(vec![Paragraph::new(lines)])],
            Some(Bounds::new(0, 0, 300, 100)),
        );
        let col = page.column_bounds(&Bounds::new(0, 0, 90, 100));
        assert!(col.contains(&Bounds::new(0, 0, 90, 100)));
        assert!(col.right < 200);
    }

    #[test]
    fn test_column_bounds_without_gaps_keeps_expansion() {
        let page = single_line_page(vec![word("only", 0, 0, 40, 10)]);
        let col = page.column_bounds(&Bounds::new(10, 0, 30, 10));
        assert_eq!(col, Bounds::new(0, 0, 40, 10));
    }
}
