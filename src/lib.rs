//! # unhocr
//!
//! A parser and query library for [hOCR](http://kba.cloud/hocr-spec/),
//! the HTML-based format OCR engines use to report recognized text
//! together with its position on the page.
//!
//! The parser is deliberately tolerant: real OCR output is full of
//! malformed markup, stray angle brackets and missing geometry, and a
//! page that is mostly readable should still parse. On top of the
//! document model the crate offers layout queries: reading-order
//! iteration, rectangle algebra, fuzzy text search that forgives the
//! usual OCR glyph confusions, and alignment of known phrases against
//! recognized words.
//!
//! ## Quick Start
//!
//! ```
//! use unhocr::Bounds;
//!
//! let hocr = r#"
//! <html><body>
//!   <div class="ocr_page" title="bbox 0 0 600 800">
//!     <div class="ocr_carea" title="bbox 10 10 320 40">
//!       <p class="ocr_par"><span class="ocr_line" title="bbox 10 10 320 40"><span class="ocrx_word" title="bbox 10 10 120 40">Hello</span><span class="ocrx_word" title="bbox 130 10 320 40">world</span></span></p>
//!     </div>
//!   </div>
//! </body></html>"#;
//!
//! let pages = unhocr::parse(hocr)?;
//! assert_eq!(pages.len(), 1);
//! assert_eq!(pages[0].all_lines_as_strings(), vec!["Hello world"]);
//!
//! let line = pages[0].all_lines()[0].clone();
//! assert_eq!(
//!     line.find_bounds_of_text("world"),
//!     Some(Bounds::new(130, 10, 320, 40))
//! );
//! # Ok::<(), unhocr::Error>(())
//! ```

pub mod dom;
mod error;
mod geometry;
pub mod matcher;
mod model;
pub mod order;
pub mod text;

pub use error::{Error, Result};
pub use geometry::{Bounded, Bounds};
pub use model::{find_bounds_of_text, join_words, spaceless_string, Area, Line, Page, Paragraph, Word};

use dom::{Element, Tag};

/// Parse one hOCR document into pages, numbering them from 1.
pub fn parse(hocr: &str) -> Result<Vec<Page>> {
    parse_numbered(hocr, 1)
}

/// Parse one hOCR document into pages, numbering them consecutively
/// from `first_page_number`.
///
/// Pages are the non-blank children of the `body` element; a document
/// without a body is an error.
pub fn parse_numbered(hocr: &str, first_page_number: u32) -> Result<Vec<Page>> {
    let elements = dom::create_ast(hocr)?;
    let root = Element::Tag(Tag {
        name: String::new(),
        attributes: Default::default(),
        children: elements,
    });
    let body = root.find_tag("body").ok_or(Error::MissingBody)?;
    let mut pages = Vec::new();
    let mut number = first_page_number;
    for child in &body.children {
        if !child.is_blank() {
            pages.push(Page::from_element(number, child)?);
            number += 1;
        }
    }
    log::debug!("parsed {} page(s) from {} bytes of markup", pages.len(), hocr.len());
    Ok(pages)
}

/// Parse a sequence of hOCR documents into one page list, numbering
/// all pages consecutively starting from 1.
pub fn parse_all<'a>(documents: impl IntoIterator<Item = &'a str>) -> Result<Vec<Page>> {
    let mut pages = Vec::new();
    for doc in documents {
        let next_number = pages.len() as u32 + 1;
        pages.extend(parse_numbered(doc, next_number)?);
    }
    Ok(pages)
}
