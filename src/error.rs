//! Error types for the unhocr library.

use thiserror::Error;

/// Result type alias for unhocr operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while parsing or interpreting hOCR input.
///
/// The lexer and the tree builder never fail on malformed markup; they
/// degrade by truncating tags or treating them as text. The two fatal
/// conditions are an attribute region that cannot be scanned and a tree
/// that does not follow the hOCR vocabulary where the interpreter
/// expects it to.
#[derive(Error, Debug)]
pub enum Error {
    /// The inside of a tag's opening bracket could not be scanned,
    /// e.g. an unterminated quoted attribute value.
    #[error("Malformed tag: {0}")]
    MalformedTag(String),

    /// A tree node did not match the tag/class convention expected
    /// at its hierarchy rank.
    #[error("Unexpected structure: expected {expected}, found {found}")]
    UnexpectedStructure {
        /// The tag/class convention the interpreter was looking for.
        expected: &'static str,
        /// Compact rendering of the offending element.
        found: String,
    },

    /// The document contains no `body` element to take pages from.
    #[error("Document has no body element")]
    MissingBody,
}
