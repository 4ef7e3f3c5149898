//! Axis-aligned rectangle algebra for page geometry.
//!
//! Coordinates are integer pixels with the Y axis growing downward, the
//! way hOCR `bbox` specifications are written. "No geometry known" is
//! always `Option<Bounds>::None`, never a sentinel rectangle; the
//! `*_opt` helpers define how every binary operation treats an absent
//! operand.

use serde::{Deserialize, Serialize};

/// Anything that may carry bounds on a page.
pub trait Bounded {
    /// The bounds of this object, or `None` if it has no known geometry.
    fn bounds(&self) -> Option<Bounds>;
}

/// A rectangle in pixel coordinates.
///
/// A rectangle is *empty* when `left >= right || top >= bottom`. Empty
/// rectangles can be constructed (edge extraction relies on degenerate
/// ones) but most derived relations treat them as carrying no area.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Bounds {
    /// X coordinate of the left edge.
    pub left: i32,
    /// Y coordinate of the top edge.
    pub top: i32,
    /// X coordinate of the right edge.
    pub right: i32,
    /// Y coordinate of the bottom edge.
    pub bottom: i32,
}

impl Bounds {
    /// Create bounds from edge coordinates.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Extract bounds from the value of an hOCR `title` attribute.
    ///
    /// The `title` attribute holds `;`-separated properties; bounds are
    /// written as `bbox LEFT TOP RIGHT BOTTOM`. Returns `None` if the
    /// value holds no well-formed bbox property.
    pub fn from_title_value(title: &str) -> Option<Self> {
        let start = title.find("bbox ")?;
        let spec = &title[start..];
        let spec = match spec.find(';') {
            Some(end) => &spec[..end],
            None => spec,
        };
        let mut parts = spec.split_whitespace().skip(1);
        let mut next = || parts.next()?.parse::<i32>().ok();
        let left = next()?;
        let top = next()?;
        let right = next()?;
        let bottom = next()?;
        Some(Self::new(left, top, right, bottom))
    }

    /// The largest possible bounds.
    pub fn entire_plane() -> Self {
        Self::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX)
    }

    /// The semiplane below the horizontal line at `y`.
    pub fn bottom_semiplane(y: i32) -> Self {
        Self::new(i32::MIN, y, i32::MAX, i32::MAX)
    }

    /// The semiplane above the horizontal line at `y`.
    pub fn top_semiplane(y: i32) -> Self {
        Self::new(i32::MIN, i32::MIN, i32::MAX, y)
    }

    /// The semiplane to the left of the vertical line at `x`.
    pub fn left_semiplane(x: i32) -> Self {
        Self::new(i32::MIN, i32::MIN, x, i32::MAX)
    }

    /// The semiplane to the right of the vertical line at `x`.
    pub fn right_semiplane(x: i32) -> Self {
        Self::new(x, i32::MIN, i32::MAX, i32::MAX)
    }

    /// Check if this rectangle has zero or negative area.
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Width of the rectangle.
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Height of the rectangle.
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Area of the rectangle.
    pub fn area(&self) -> i32 {
        self.width() * self.height()
    }

    /// Average of the left and right edges, rounded toward zero.
    pub fn center(&self) -> i32 {
        (self.left + self.right) / 2
    }

    /// Average of the top and bottom edges, rounded toward zero.
    pub fn middle(&self) -> i32 {
        (self.top + self.bottom) / 2
    }

    /// X coordinate 20% of the way from the left edge to the right edge.
    ///
    /// Columns are ordered by this point rather than by their raw left
    /// edges, which tend to be jittered by OCR noise.
    pub fn leftish(&self) -> i32 {
        (self.right + 4 * self.left) / 5
    }

    /// Taxicab distance between the anchor points of two rectangles.
    pub fn distance(&self, other: &Bounds) -> i32 {
        (self.middle() - other.middle()).abs() + (self.leftish() - other.leftish()).abs()
    }

    /// The smallest rectangle containing both operands.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// The largest rectangle contained by both operands, or `None` if the
    /// overlap has no positive area.
    pub fn intersection(&self, other: &Bounds) -> Option<Bounds> {
        let candidate = Bounds::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        if candidate.is_empty() {
            None
        } else {
            Some(candidate)
        }
    }

    /// Null-safe union: an absent operand is the empty set.
    pub fn union_opt(a: Option<Bounds>, b: Option<Bounds>) -> Option<Bounds> {
        match (a, b) {
            (Some(a), Some(b)) => Some(a.union(&b)),
            (Some(a), None) => Some(a),
            (None, b) => b,
        }
    }

    /// Null-safe intersection: an absent operand makes the result absent.
    pub fn intersection_opt(a: Option<Bounds>, b: Option<Bounds>) -> Option<Bounds> {
        match (a, b) {
            (Some(a), Some(b)) => a.intersection(&b),
            _ => None,
        }
    }

    /// The smallest rectangle containing every bounded item, or `None`
    /// if none of the items carries bounds.
    pub fn union_all<I>(items: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = Option<Bounds>>,
    {
        items
            .into_iter()
            .fold(None, |acc, b| Self::union_opt(acc, b))
    }

    /// Non-strict containment of `other` within `self`.
    pub fn contains(&self, other: &Bounds) -> bool {
        other.within(self)
    }

    /// Non-strict containment of an optional rectangle: an absent
    /// rectangle is trivially contained in everything.
    pub fn contains_opt(&self, other: Option<&Bounds>) -> bool {
        other.map_or(true, |b| b.within(self))
    }

    /// Check if `self` lies entirely within `other` (non-strict).
    pub fn within(&self, other: &Bounds) -> bool {
        self.left >= other.left
            && self.right <= other.right
            && self.top >= other.top
            && self.bottom <= other.bottom
    }

    /// `within` over optional operands: an absent inner rectangle is
    /// contained in everything, an absent outer contains nothing.
    pub fn within_opt(inner: Option<&Bounds>, outer: Option<&Bounds>) -> bool {
        match (inner, outer) {
            (None, _) => true,
            (_, None) => false,
            (Some(a), Some(b)) => a.within(b),
        }
    }

    /// Check if the overlap of the two rectangles has positive area.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.intersection(other).is_some()
    }

    /// Check if `self` cuts `other`: they overlap with positive area and
    /// neither contains the other. A crop rectangle that cuts a word
    /// would leave the word straddling its boundary.
    pub fn cuts(&self, other: &Bounds) -> bool {
        self.intersects(other) && !self.within(other) && !self.contains(other)
    }

    /// Check if the rectangles overlap or share an edge.
    pub fn touches(&self, other: &Bounds) -> bool {
        self.top <= other.bottom
            && other.top <= self.bottom
            && self.left <= other.right
            && other.left <= self.right
    }

    /// Check if the X ranges of the rectangles overlap, i.e. whether
    /// they could belong to the same column of text.
    pub fn in_same_column_as(&self, other: &Bounds) -> bool {
        self.left <= other.right && self.right >= other.left
    }

    /// Check if `self` is entirely below `other` (non-strict on the edge).
    pub fn is_below(&self, other: &Bounds) -> bool {
        self.top >= other.bottom
    }

    /// Check if `self` is entirely above `other`.
    pub fn is_above(&self, other: &Bounds) -> bool {
        other.is_below(self)
    }

    /// Check if `self` is entirely to the left of `other`.
    pub fn is_to_the_left(&self, other: &Bounds) -> bool {
        self.right <= other.left
    }

    /// Check if `self` is entirely to the right of `other`.
    pub fn is_to_the_right(&self, other: &Bounds) -> bool {
        other.is_to_the_left(self)
    }

    /// Zero-width bounds at the left edge.
    pub fn left_edge(&self) -> Bounds {
        Bounds::new(self.left, self.top, self.left, self.bottom)
    }

    /// Zero-width bounds at the right edge.
    pub fn right_edge(&self) -> Bounds {
        Bounds::new(self.right, self.top, self.right, self.bottom)
    }

    /// Zero-height bounds at the top edge.
    pub fn top_edge(&self) -> Bounds {
        Bounds::new(self.left, self.top, self.right, self.top)
    }

    /// Zero-height bounds at the bottom edge.
    pub fn bottom_edge(&self) -> Bounds {
        Bounds::new(self.left, self.bottom, self.right, self.bottom)
    }

    /// Clip the left edge to `new_edge`, or `None` if the trim would
    /// push it past the right edge.
    pub fn trim_from_left(&self, new_edge: i32) -> Option<Bounds> {
        if new_edge > self.right {
            return None;
        }
        if new_edge <= self.left {
            return Some(*self);
        }
        Some(Bounds::new(new_edge, self.top, self.right, self.bottom))
    }

    /// Clip the right edge to `new_edge`, or `None` if the trim would
    /// push it past the left edge.
    pub fn trim_from_right(&self, new_edge: i32) -> Option<Bounds> {
        if new_edge < self.left {
            return None;
        }
        if new_edge >= self.right {
            return Some(*self);
        }
        Some(Bounds::new(self.left, self.top, new_edge, self.bottom))
    }

    /// Clip the top edge to `new_edge`, or `None` if the trim would push
    /// it past the bottom edge.
    pub fn trim_from_top(&self, new_edge: i32) -> Option<Bounds> {
        if new_edge > self.bottom {
            return None;
        }
        if new_edge <= self.top {
            return Some(*self);
        }
        Some(Bounds::new(self.left, new_edge, self.right, self.bottom))
    }

    /// Clip the bottom edge to `new_edge`, or `None` if the trim would
    /// push it past the top edge.
    pub fn trim_from_bottom(&self, new_edge: i32) -> Option<Bounds> {
        if new_edge < self.top {
            return None;
        }
        if new_edge >= self.bottom {
            return Some(*self);
        }
        Some(Bounds::new(self.left, self.top, self.right, new_edge))
    }

    /// Clip the left edge to the left edge of `limit`.
    pub fn trim_from_left_of(&self, limit: &Bounds) -> Option<Bounds> {
        self.trim_from_left(limit.left)
    }

    /// Clip the right edge to the right edge of `limit`.
    pub fn trim_from_right_of(&self, limit: &Bounds) -> Option<Bounds> {
        self.trim_from_right(limit.right)
    }

    /// Clip the top edge to the top edge of `limit`.
    pub fn trim_from_top_of(&self, limit: &Bounds) -> Option<Bounds> {
        self.trim_from_top(limit.top)
    }

    /// Clip the bottom edge to the bottom edge of `limit`.
    pub fn trim_from_bottom_of(&self, limit: &Bounds) -> Option<Bounds> {
        self.trim_from_bottom(limit.bottom)
    }

    /// Same Y range, X range widened to also cover `width_source`.
    pub fn extend_width(&self, width_source: &Bounds) -> Bounds {
        Bounds::new(
            self.left.min(width_source.left),
            self.top,
            self.right.max(width_source.right),
            self.bottom,
        )
    }

    /// Same X range, Y range widened to also cover `height_source`.
    pub fn extend_height(&self, height_source: &Bounds) -> Bounds {
        Bounds::new(
            self.left,
            self.top.min(height_source.top),
            self.right,
            self.bottom.max(height_source.bottom),
        )
    }

    /// Same Y range, X range narrowed to the overlap with `width_source`;
    /// `None` if the overlap is empty.
    pub fn trim_width(&self, width_source: &Bounds) -> Option<Bounds> {
        let candidate = Bounds::new(
            self.left.max(width_source.left),
            self.top,
            self.right.min(width_source.right),
            self.bottom,
        );
        if candidate.is_empty() {
            None
        } else {
            Some(candidate)
        }
    }

    /// Same X range, Y range narrowed to the overlap with `height_source`;
    /// `None` if the overlap is empty.
    pub fn trim_height(&self, height_source: &Bounds) -> Option<Bounds> {
        let candidate = Bounds::new(
            self.left,
            self.top.max(height_source.top),
            self.right,
            self.bottom.min(height_source.bottom),
        );
        if candidate.is_empty() {
            None
        } else {
            Some(candidate)
        }
    }

    /// Expand the rectangle by `pixels` in all four directions.
    pub fn grow(&self, pixels: i32) -> Bounds {
        Bounds::new(
            self.left - pixels,
            self.top - pixels,
            self.right + pixels,
            self.bottom + pixels,
        )
    }

    /// Translate by the given vector.
    pub fn translate(&self, dx: i32, dy: i32) -> Bounds {
        Bounds::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }

    /// Translate downward by `amount`.
    pub fn move_down(&self, amount: i32) -> Bounds {
        self.translate(0, amount)
    }

    /// Translate upward by `amount`.
    pub fn move_up(&self, amount: i32) -> Bounds {
        self.translate(0, -amount)
    }

    /// Translate rightward by `amount`.
    pub fn move_right(&self, amount: i32) -> Bounds {
        self.translate(amount, 0)
    }

    /// Translate leftward by `amount`.
    pub fn move_left(&self, amount: i32) -> Bounds {
        self.translate(-amount, 0)
    }

    /// Scale every coordinate independently, rounding half away from
    /// zero. Width and height can drift by ±1 relative to scaling the
    /// extents directly; callers must tolerate this.
    pub fn scale(&self, factor: f64) -> Bounds {
        let scale = |v: i32| (v as f64 * factor).round() as i32;
        Bounds::new(
            scale(self.left),
            scale(self.top),
            scale(self.right),
            scale(self.bottom),
        )
    }

    /// Partition the rectangle into `total` equal-width vertical bands,
    /// numbered from the left starting at 0, and return the union of
    /// bands `[start, end)`.
    ///
    /// # Panics
    ///
    /// Panics if `total` is zero, `start > end`, or either index exceeds
    /// `total`.
    pub fn section(&self, start: usize, end: usize, total: usize) -> Bounds {
        assert!(total >= 1, "section count must be positive");
        assert!(start <= end, "section range must not be inverted");
        assert!(end <= total, "section range exceeds section count");
        if total == 1 && start == 0 && end == 1 {
            return *self;
        }
        let width = (self.right - self.left) as i64;
        let band_left = self.left as i64 + (start as i64 * width / total as i64);
        let band_right =
            self.left as i64 + (end as i64 * width + total as i64 - 1) / total as i64;
        Bounds::new(band_left as i32, self.top, band_right as i32, self.bottom)
    }

    /// A single vertical band, numbered from the left starting at 0.
    pub fn single_section(&self, index: usize, total: usize) -> Bounds {
        self.section(index, index + 1, total)
    }

    /// New bounds with a replaced left edge.
    pub fn with_left(&self, left: i32) -> Bounds {
        Bounds::new(left, self.top, self.right, self.bottom)
    }

    /// New bounds with a replaced top edge.
    pub fn with_top(&self, top: i32) -> Bounds {
        Bounds::new(self.left, top, self.right, self.bottom)
    }

    /// New bounds with a replaced right edge.
    pub fn with_right(&self, right: i32) -> Bounds {
        Bounds::new(self.left, self.top, right, self.bottom)
    }

    /// New bounds with a replaced bottom edge.
    pub fn with_bottom(&self, bottom: i32) -> Bounds {
        Bounds::new(self.left, self.top, self.right, bottom)
    }

    /// Format back into the hOCR `bbox LEFT TOP RIGHT BOTTOM` form.
    pub fn to_hocr_spec(&self) -> String {
        format!("bbox {} {} {} {}", self.left, self.top, self.right, self.bottom)
    }
}

impl std::fmt::Display for Bounds {
    /// ImageMagick-style geometry: `WIDTHxHEIGHT+LEFT+TOP`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{}{}{}{}{}",
            self.width(),
            self.height(),
            if self.left >= 0 { "+" } else { "" },
            self.left,
            if self.top >= 0 { "+" } else { "" },
            self.top,
        )
    }
}

impl Bounded for Bounds {
    fn bounds(&self) -> Option<Bounds> {
        Some(*self)
    }
}
