//! A minimal DOM for hOCR markup.
//!
//! Real-world hOCR files are frequently malformed, so this module does
//! not use a validating HTML parser. The lexer recovers from stray `<`
//! characters by truncating tokens, and the tree builder treats any
//! closing tag as closing the current level. The resulting tree is a
//! plain nesting of tags and text with no HTML semantics attached.

mod element;
mod lexer;
mod parser;

pub use element::{Element, Tag};
pub use lexer::lex;
pub use parser::create_ast;
