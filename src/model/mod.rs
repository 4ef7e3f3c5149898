//! The document model: pages, areas, paragraphs, lines and words.
//!
//! Every rank is an immutable value; transformations like cropping or
//! translating return new values. Geometry is always optional, since
//! OCR output can omit or mangle `bbox` properties at any rank.

mod area;
mod line;
mod page;
mod paragraph;
mod word;

pub use area::Area;
pub use line::Line;
pub use page::Page;
pub use paragraph::Paragraph;
pub use word::{find_bounds_of_text, join_words, spaceless_string, Word};
