//! Tree builder over the token stream.

use super::element::{Element, Tag};
use super::lexer::lex;
use crate::error::Result;
use std::collections::VecDeque;

fn build(tokens: &mut VecDeque<&str>) -> Result<Vec<Element>> {
    let mut result = Vec::new();
    while let Some(token) = tokens.pop_front() {
        if token.starts_with('<') && token.ends_with('>') {
            if token.starts_with("<!") {
                // doctype, comment or processing instruction
                continue;
            }
            if token.starts_with("</") {
                break;
            }
            if token.ends_with("/>") {
                result.push(Element::Tag(Tag::parse(token, Vec::new())?));
            } else {
                let children = build(tokens)?;
                result.push(Element::Tag(Tag::parse(token, children)?));
            }
        } else {
            result.push(Element::text(token));
        }
    }
    Ok(result)
}

/// Build a markup tree from raw hOCR.
///
/// Closing tags are not matched against opening tags by name; any
/// closing tag terminates the current level. Truncated tag tokens
/// produced by the lexer do not start or end with the full `<`..`>`
/// pair and become text nodes.
pub fn create_ast(hocr: &str) -> Result<Vec<Element>> {
    let mut tokens: VecDeque<&str> = lex(hocr).into();
    build(&mut tokens)
}
