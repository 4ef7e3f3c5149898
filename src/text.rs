//! Fuzzy text comparison tolerant of common OCR confusions.
//!
//! OCR output routinely confuses visually similar glyphs (`l`/`I`/`1`,
//! `O`/`0`), mangles diacritics, and sprinkles stray quote marks and
//! commas. The comparisons here treat those artifacts as equal or
//! negligible so that searching a page for known text still works.

use regex::Regex;
use std::sync::OnceLock;

/// ASCII approximations for U+00C0 through U+017F, indexed by codepoint.
const LATIN_FOLD: &str = "AAAAAAACEEEEIIII\
                          DNOOOOOxOUUUUYTs\
                          aaaaaaaceeeeiiii\
                          dnooooo/ouuuuyty\
                          AaAaAaCcCcCcCcDd\
                          DdEeEeEeEeEeGgGg\
                          GgGgHhHhIiIiIiIi\
                          IiJjJjKkkLlLlLlL\
                          lLlNnNnNnnNnOoOo\
                          OoOoRrRrRrSsSsSs\
                          SsTtTtTtUuUuUuUu\
                          UuUuWwYyYZzZzZzs";

/// Classes of glyphs OCR engines routinely mistake for one another.
const CONFUSABLE_CLASSES: &[&str] = &["lI1", "0Oo", ",.", "-\u{2013}", "\u{201e}\u{201c}\u{201d}\""];

/// Characters that may appear or disappear between OCR output and the
/// text being searched for.
const NEGLIGIBLE: &str = " '\u{201a},\u{2018}\u{2019}";

/// Convert an accented Latin letter to its ASCII approximation.
///
/// Only codepoints in the U+00C0 through U+017F range are folded; every
/// other character is returned unchanged. The folding is letter for
/// letter, so ligatures lose information (`æ` becomes `a`).
pub fn to_ascii(c: char) -> char {
    let code = c as u32;
    if (0xc0..=0x17f).contains(&code) {
        LATIN_FOLD
            .chars()
            .nth((code - 0xc0) as usize)
            .unwrap_or(c)
    } else {
        c
    }
}

fn chars_fuzzy_equal(c1: char, c2: char) -> bool {
    let c1 = to_ascii(c1);
    let c2 = to_ascii(c2);
    if c1 == c2 {
        return true;
    }
    CONFUSABLE_CLASSES
        .iter()
        .any(|class| class.contains(c1) && class.contains(c2))
}

fn is_negligible(c: char) -> bool {
    NEGLIGIBLE.contains(c)
}

/// Consume `needle` from the front of `haystack`.
///
/// Characters advance in lockstep when fuzzy-equal; on a mismatch, a
/// single negligible character may be skipped on either side, but never
/// two in a row on the same side. Returns the number of unconsumed
/// `haystack` characters, or `None` if `needle` could not be fully
/// consumed.
fn fuzzy_consume(haystack: &str, needle: &str) -> Option<usize> {
    let h: Vec<char> = haystack.chars().collect();
    let n: Vec<char> = needle.chars().collect();
    let mut i1 = 0;
    let mut i2 = 0;
    let mut can_skip1 = true;
    let mut can_skip2 = true;
    while i1 < h.len() && i2 < n.len() {
        let mut moved = false;
        if chars_fuzzy_equal(h[i1], n[i2]) {
            i1 += 1;
            i2 += 1;
            can_skip1 = true;
            can_skip2 = true;
            moved = true;
        } else {
            if can_skip1 && is_negligible(h[i1]) {
                can_skip1 = false;
                i1 += 1;
                moved = true;
            }
            if can_skip2 && is_negligible(n[i2]) {
                can_skip2 = false;
                i2 += 1;
                moved = true;
            }
        }
        if !moved {
            break;
        }
    }
    // one trailing negligible character may still be dropped on each side
    if i1 < h.len() && can_skip1 && is_negligible(h[i1]) {
        i1 += 1;
    }
    if i2 < n.len() && can_skip2 && is_negligible(n[i2]) {
        i2 += 1;
    }
    if i2 == n.len() {
        Some(h.len() - i1)
    } else {
        None
    }
}

/// Check if two strings are approximately equal.
///
/// Strings are approximately equal when their characters match pairwise
/// under the confusable classes and ASCII folding, allowing single
/// negligible characters (spaces, single quotes, commas) to be skipped
/// between matches.
pub fn fuzzy_equal(s1: &str, s2: &str) -> bool {
    fuzzy_consume(s1, s2) == Some(0)
}

/// Check if `prefix` is a fuzzy prefix of `s`.
pub fn fuzzy_prefix(s: &str, prefix: &str) -> bool {
    fuzzy_consume(s, prefix).is_some()
}

/// Case-insensitive variant of [`fuzzy_contains`].
pub fn fuzzy_contains_ignore_case(haystack: &str, needle: &str) -> bool {
    fuzzy_contains(&haystack.to_lowercase(), &needle.to_lowercase())
}

/// Check if `needle` occurs as a fuzzy substring of `haystack`.
pub fn fuzzy_contains(haystack: &str, needle: &str) -> bool {
    let chars: Vec<char> = haystack.chars().collect();
    let mut suffix = haystack;
    for i in 0..=chars.len() {
        if fuzzy_prefix(suffix, needle) {
            return true;
        }
        if i < chars.len() {
            suffix = &suffix[chars[i].len_utf8()..];
        }
    }
    false
}

/// Check if a string renders smaller than regular text.
///
/// Matches the empty string, spaces, and runs of punctuation that sit
/// either near the baseline or near the top of the line. Used to spot
/// lines that are probably OCR noise rather than words.
pub fn is_smaller(s: &str) -> bool {
    static SMALLER: OnceLock<Regex> = OnceLock::new();
    let re = SMALLER.get_or_init(|| {
        Regex::new("^([,\u{201a}\u{201e}._ ]*|[\"'\u{2018}\u{201c}\u{201d}\u{2019}^ ]*)$")
            .unwrap()
    });
    re.is_match(s)
}
