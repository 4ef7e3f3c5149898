//! Tokenizer splitting raw markup into tags and text runs.

/// Length in bytes of the token starting at `offset`.
///
/// A `<` that is interrupted by another `<` before its closing `>` is a
/// malformed tag; the token is truncated just before the next `<` so
/// that lexing can resume there. Since the lexer only ever splits at
/// ASCII `<` and `>`, byte offsets always land on character boundaries.
fn element_length(hocr: &str, offset: usize) -> usize {
    let bytes = hocr.as_bytes();
    if bytes.len() <= offset {
        return 0;
    }
    if bytes[offset] == b'<' {
        let closed_at = hocr[offset..].find('>').map(|i| i + offset);
        let next_opening = hocr[offset + 1..].find('<').map(|i| i + offset + 1);
        match (next_opening, closed_at) {
            (Some(opening), Some(closing)) if opening < closing => {
                // malformed markup, cut the token short
                if bytes.len() <= offset + 1 {
                    bytes.len() - offset
                } else if bytes[offset + 1] != b'<' {
                    1 + element_length(hocr, offset + 1)
                } else {
                    1
                }
            }
            (_, None) => bytes.len() - offset,
            (_, Some(closing)) => closing + 1 - offset,
        }
    } else {
        match hocr[offset..].find('<') {
            Some(opened_at) => opened_at,
            None => bytes.len() - offset,
        }
    }
}

/// Split raw markup into a flat sequence of tag and text tokens.
///
/// Every byte of the input lands in exactly one token. Tag tokens start
/// with `<`; everything else is text.
pub fn lex(hocr: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut offset = 0;
    while offset < hocr.len() {
        let len = element_length(hocr, offset);
        result.push(&hocr[offset..offset + len]);
        offset += len;
    }
    result
}
