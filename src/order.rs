//! Reading-order comparators and line selection helpers.
//!
//! The flow order approximates how a person reads a left-to-right
//! page: strictly lower items come later, then strictly more to the
//! right, then by vertical and horizontal midpoints. All other orders
//! are defined in terms of it so that ties resolve consistently.

use crate::geometry::{Bounded, Bounds};
use crate::model::Line;
use regex::Regex;
use std::cmp::Ordering;

fn coordinate_tuple(b: &Bounds) -> (i32, i32, i32, i32) {
    (b.left, b.top, b.right, b.bottom)
}

fn flow_order_bounds(a: Option<Bounds>, b: Option<Bounds>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            if a.is_below(&b) {
                return Ordering::Greater;
            }
            if b.is_below(&a) {
                return Ordering::Less;
            }
            if a.is_to_the_right(&b) {
                return Ordering::Greater;
            }
            if b.is_to_the_right(&a) {
                return Ordering::Less;
            }
            a.middle()
                .cmp(&b.middle())
                .then(a.center().cmp(&b.center()))
                .then(coordinate_tuple(&a).cmp(&coordinate_tuple(&b)))
        }
        // items without geometry sort before everything with geometry
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Compare two bounded items in natural reading order.
pub fn flow_order<T: Bounded + ?Sized, U: Bounded + ?Sized>(a: &T, b: &U) -> Ordering {
    flow_order_bounds(a.bounds(), b.bounds())
}

/// Compare two bounded items in reverse reading order.
pub fn reverse_flow_order<T: Bounded + ?Sized, U: Bounded + ?Sized>(a: &T, b: &U) -> Ordering {
    flow_order(b, a)
}

/// Compare by the average x coordinate, ascending.
pub fn center_rightwards<T: Bounded + ?Sized>(a: &T, b: &T) -> Ordering {
    by_key_then_flow(a, b, |b| b.center(), false)
}

/// Compare by the average x coordinate, descending.
pub fn center_leftwards<T: Bounded + ?Sized>(a: &T, b: &T) -> Ordering {
    by_key_then_flow(a, b, |b| b.center(), true)
}

/// Compare by the average y coordinate, ascending.
pub fn middle_downwards<T: Bounded + ?Sized>(a: &T, b: &T) -> Ordering {
    by_key_then_flow(a, b, |b| b.middle(), false)
}

/// Compare by the average y coordinate, descending.
pub fn middle_upwards<T: Bounded + ?Sized>(a: &T, b: &T) -> Ordering {
    by_key_then_flow(a, b, |b| b.middle(), true)
}

/// Compare by the x coordinate 20% of the way into the item, ascending.
pub fn leftish_rightwards<T: Bounded + ?Sized>(a: &T, b: &T) -> Ordering {
    by_key_then_flow(a, b, |b| b.leftish(), false)
}

fn by_key_then_flow<T: Bounded + ?Sized>(
    a: &T,
    b: &T,
    key: fn(&Bounds) -> i32,
    descending: bool,
) -> Ordering {
    let ka = a.bounds().map(|b| key(&b));
    let kb = b.bounds().map(|b| key(&b));
    let primary = if descending {
        kb.cmp(&ka)
    } else {
        ka.cmp(&kb)
    };
    primary.then_with(|| {
        if descending {
            flow_order(b, a)
        } else {
            flow_order(a, b)
        }
    })
}

/// Comparators and predicates for [`find_line`](crate::Page::find_line)
/// style queries, phrased as "the line that ...".
pub mod line_that {
    use super::*;

    /// Ranks lines with more words higher.
    pub fn has_most_words(a: &Line, b: &Line) -> Ordering {
        a.word_count().cmp(&b.word_count())
    }

    /// Ranks lines with fewer words higher.
    pub fn has_least_words(a: &Line, b: &Line) -> Ordering {
        b.word_count().cmp(&a.word_count())
    }

    /// Ranks lines closer to the top of the page higher.
    pub fn is_at_the_top(a: &Line, b: &Line) -> Ordering {
        middle_upwards(a, b)
    }

    /// Ranks lines closer to the bottom of the page higher.
    pub fn is_at_the_bottom(a: &Line, b: &Line) -> Ordering {
        middle_downwards(a, b)
    }

    /// Ranks lines further to the left higher.
    pub fn is_at_the_left(a: &Line, b: &Line) -> Ordering {
        center_leftwards(a, b)
    }

    /// Ranks lines further to the right higher.
    pub fn is_at_the_right(a: &Line, b: &Line) -> Ordering {
        center_rightwards(a, b)
    }

    /// Ranks lines later in reading order higher.
    pub fn is_at_the_end(a: &Line, b: &Line) -> Ordering {
        flow_order(a, b)
    }

    /// Ranks lines earlier in reading order higher.
    pub fn is_at_the_beginning(a: &Line, b: &Line) -> Ordering {
        reverse_flow_order(a, b)
    }

    /// Matches any line.
    pub fn is_arbitrary(_: &Line) -> bool {
        true
    }

    /// Matches lines with at least one non-blank word.
    pub fn is_not_blank(l: &Line) -> bool {
        !l.is_blank()
    }

    /// Matches lines whose text contains `needle` verbatim.
    pub fn contains(needle: &str) -> impl Fn(&Line) -> bool + '_ {
        move |l: &Line| l.text().contains(needle)
    }

    /// Matches lines whose text matches the regex. Anchor the pattern
    /// to require a full-line match.
    pub fn matches_regex(regex: Regex) -> impl Fn(&Line) -> bool {
        move |l: &Line| regex.is_match(&l.text())
    }

    /// Matches lines with at least one word intersecting `rect`.
    pub fn has_words_intersecting(rect: Bounds) -> impl Fn(&Line) -> bool {
        move |l: &Line| {
            l.words()
                .iter()
                .any(|w| w.bounds().is_some_and(|b| b.intersects(&rect)))
        }
    }
}
