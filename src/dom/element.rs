//! Tag and text nodes of the markup tree.

use crate::error::{Error, Result};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Write;

/// Decode HTML entities, leaving the input untouched when it holds
/// entities that cannot be resolved.
pub(crate) fn decode_entities(s: &str) -> String {
    match quick_xml::escape::unescape(s) {
        Ok(Cow::Borrowed(_)) => s.to_string(),
        Ok(Cow::Owned(decoded)) => decoded,
        Err(_) => s.to_string(),
    }
}

/// A node of the markup tree: either a tag with children or a text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Tag(Tag),
    Text(String),
}

/// A tag node with its attributes and children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tag {
    /// Tag name, lowercased.
    pub name: String,
    /// All attributes, names and values entity-decoded.
    pub attributes: HashMap<String, String>,
    /// Child nodes in document order.
    pub children: Vec<Element>,
}

impl Tag {
    /// Parse the contents of an opening tag token and attach children.
    ///
    /// The scan follows lenient HTML rules: attribute values may be
    /// single-quoted, double-quoted or bare, and an attribute without
    /// `=` takes its own name as its value. A token that ends in the
    /// middle of this scan is reported as a malformed tag.
    pub fn parse(opening: &str, children: Vec<Element>) -> Result<Tag> {
        let chars: Vec<char> = opening.chars().collect();
        let malformed = || Error::MalformedTag(opening.to_string());
        let at = |i: usize| chars.get(i).copied().ok_or_else(malformed);

        let mut i = 1;
        while at(i)? == ' ' {
            i += 1;
        }
        let name_start = i;
        while !matches!(at(i)?, ' ' | '>' | '/') {
            i += 1;
        }
        let name: String = chars[name_start..i]
            .iter()
            .collect::<String>()
            .to_lowercase();
        while at(i)? == ' ' {
            i += 1;
        }

        let mut attributes = HashMap::new();
        while !matches!(at(i)?, '/' | '>') {
            let attr_name_start = i;
            while !matches!(at(i)?, '=' | '/' | ' ' | '>') {
                i += 1;
            }
            let attr_name: String = chars[attr_name_start..i].iter().collect();
            while at(i)? == ' ' {
                i += 1;
            }
            let mut attr_value = attr_name.clone();
            if at(i)? == '=' {
                i += 1;
                while at(i)? == ' ' {
                    i += 1;
                }
                match at(i)? {
                    quote @ ('\'' | '"') => {
                        i += 1;
                        let value_start = i;
                        while at(i)? != quote {
                            i += 1;
                        }
                        attr_value = chars[value_start..i].iter().collect();
                        i += 1;
                    }
                    _ => {
                        let value_start = i;
                        while !matches!(at(i)?, ' ' | '/' | '>') {
                            i += 1;
                        }
                        attr_value = chars[value_start..i].iter().collect();
                    }
                }
            }
            while at(i)? == ' ' {
                i += 1;
            }
            attributes.insert(decode_entities(&attr_name), decode_entities(&attr_value));
        }

        Ok(Tag {
            name,
            attributes,
            children,
        })
    }

    /// Value of the `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.attributes.get("id").map(String::as_str)
    }

    /// Value of the `class` attribute.
    pub fn class(&self) -> Option<&str> {
        self.attributes.get("class").map(String::as_str)
    }

    /// Value of the `title` attribute, which holds the hOCR properties.
    pub fn title(&self) -> Option<&str> {
        self.attributes.get("title").map(String::as_str)
    }
}

impl Element {
    /// Create a text node, decoding HTML entities.
    pub fn text(raw: &str) -> Element {
        Element::Text(decode_entities(raw))
    }

    /// Depth-first search for the first tag with the given name,
    /// including this node itself.
    pub fn find_tag(&self, tag_name: &str) -> Option<&Tag> {
        match self {
            Element::Text(_) => None,
            Element::Tag(tag) => {
                if tag.name == tag_name {
                    Some(tag)
                } else {
                    tag.children.iter().find_map(|e| e.find_tag(tag_name))
                }
            }
        }
    }

    /// All text in this subtree with the tags stripped.
    pub fn raw_text(&self) -> String {
        match self {
            Element::Text(text) => text.clone(),
            Element::Tag(tag) => {
                let mut out = String::new();
                for child in &tag.children {
                    out.push_str(&child.raw_text());
                }
                out
            }
        }
    }

    /// Check if this node is a text run holding only whitespace.
    /// Tag nodes are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Element::Text(text) => text.trim().is_empty(),
            Element::Tag(_) => false,
        }
    }

    /// Compact, lossy text rendering for diagnostics.
    pub fn mk_string(&self) -> String {
        match self {
            Element::Text(text) => {
                if self.is_blank() {
                    String::new()
                } else {
                    text.clone()
                }
            }
            Element::Tag(tag) => {
                let mut out = String::new();
                let _ = write!(
                    out,
                    "<{} {} {}>",
                    tag.name,
                    tag.id().unwrap_or(""),
                    tag.class().unwrap_or("")
                );
                for child in &tag.children {
                    out.push_str(&child.mk_string());
                }
                let _ = write!(out, "</{}>", tag.name);
                out
            }
        }
    }
}
