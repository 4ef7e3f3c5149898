//! End-to-end parsing tests over realistic hOCR documents.

use unhocr::{parse, parse_all, Bounded, Bounds, Error};

fn word_span(class: &str, l: i32, t: i32, r: i32, b: i32, text: &str) -> String {
    format!(
        "<span class='{}' title='bbox {} {} {} {}'>{}</span>",
        class, l, t, r, b, text
    )
}

fn receipt_page() -> String {
    let line1 = format!(
        "<span class='ocr_line' title='bbox 50 50 550 90'>{}{}</span>",
        word_span("ocrx_word", 50, 50, 260, 90, "ACME"),
        word_span("ocrx_word", 280, 50, 550, 90, "&amp; Co."),
    );
    let line2 = format!(
        "<span class='ocr_line' title='bbox 50 120 400 150'>{}{}{}</span>",
        word_span("ocrx_word", 50, 120, 150, 150, "Total:"),
        word_span("ocrx_word", 170, 120, 260, 150, "<strong>129.95</strong>"),
        word_span("ocrx_word", 280, 120, 400, 150, "PLN"),
    );
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title></title></head>\n<body>\n\
         <div class='ocr_page' title='image \"r.png\"; bbox 0 0 600 800; ppageno 0'>\n\
         <div class='ocr_carea' title='bbox 50 50 550 150'>\n\
         <p class='ocr_par'>{line1}</p>\n\
         <p class='ocr_par'>{line2}</p>\n\
         </div>\n</div>\n</body>\n</html>\n"
    )
}

#[test]
fn test_parse_receipt() {
    let pages = parse(&receipt_page()).unwrap();
    assert_eq!(pages.len(), 1);
    let page = &pages[0];
    assert_eq!(page.number(), 1);
    assert_eq!(page.bounds(), Some(Bounds::new(0, 0, 600, 800)));
    assert_eq!(page.area_count(), 1);
    assert_eq!(page.paragraph_count(), 2);
    assert_eq!(page.line_count(), 2);
    assert_eq!(page.word_count(), 5);
}

#[test]
fn test_entities_are_decoded() {
    let pages = parse(&receipt_page()).unwrap();
    let lines = pages[0].all_lines_as_strings();
    assert_eq!(lines[0], "ACME & Co.");
}

#[test]
fn test_styles_survive_nesting() {
    let pages = parse(&receipt_page()).unwrap();
    let words = pages[0].all_words();
    let amount = words.iter().find(|w| w.text() == "129.95").unwrap();
    assert!(amount.is_bold());
    assert!(!amount.is_italic());
    assert_eq!(amount.bounds(), Some(Bounds::new(170, 120, 260, 150)));
}

#[test]
fn test_malformed_markup_is_tolerated() {
    // a stray '<' inside a word and an unterminated tag at the end
    let hocr = "<html><body>\
        <div class='ocr_page' title='bbox 0 0 100 100'>\
        <div class='ocr_carea'>\
        <p><span class='ocr_line' title='bbox 0 0 50 10'>\
        <span class='ocrx_word' title='bbox 0 0 50 10'>a<b</span>\
        </span></p></div></div></body></html><unfinished";
    let pages = parse(hocr).unwrap();
    assert_eq!(pages[0].word_count(), 1);
    assert_eq!(pages[0].all_words()[0].text(), "a<b");
}

#[test]
fn test_multiple_pages_numbered_in_order() {
    let page = "<div class='ocr_page' title='bbox 0 0 100 100'>\
        <div><p><span class='ocr_line'>\
        <span class='ocrx_word' title='bbox 0 0 10 10'>x</span>\
        </span></p></div></div>";
    let hocr = format!("<html><body>{page}{page}{page}</body></html>");
    let pages = parse(&hocr).unwrap();
    assert_eq!(pages.len(), 3);
    assert_eq!(
        pages.iter().map(|p| p.number()).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    let combined = parse_all([hocr.as_str(), hocr.as_str()]).unwrap();
    assert_eq!(combined.len(), 6);
    assert_eq!(combined[5].number(), 6);
}

#[test]
fn test_word_without_bbox_has_no_bounds() {
    let hocr = "<html><body>\
        <div class='ocr_page' title='bbox 0 0 100 100'>\
        <div><p><span class='ocr_line'>\
        <span class='ocrx_word'>ghost</span>\
        </span></p></div></div></body></html>";
    let pages = parse(hocr).unwrap();
    assert_eq!(pages[0].all_words()[0].bounds(), None);
}

#[test]
fn test_missing_body_is_an_error() {
    assert!(matches!(parse("<html></html>"), Err(Error::MissingBody)));
    assert!(matches!(parse(""), Err(Error::MissingBody)));
}

#[test]
fn test_unexpected_structure_is_an_error() {
    // a table where an area was expected
    let hocr = "<html><body>\
        <div class='ocr_page' title='bbox 0 0 100 100'>\
        <table><tr><td>x</td></tr></table>\
        </div></body></html>";
    let err = parse(hocr).unwrap_err();
    assert!(matches!(err, Error::UnexpectedStructure { .. }));
}

#[test]
fn test_crop_roundtrip() {
    let pages = parse(&receipt_page()).unwrap();
    let cropped = pages[0].crop(&Bounds::new(0, 100, 600, 800));
    assert_eq!(cropped.line_count(), 1);
    assert_eq!(cropped.all_lines_as_strings(), vec!["Total: 129.95 PLN"]);
    assert_eq!(cropped.number(), pages[0].number());
}

#[test]
fn test_pages_serialize_round_trip() {
    let pages = parse(&receipt_page()).unwrap();
    let json = serde_json::to_string(&pages).unwrap();
    let restored: Vec<unhocr::Page> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, pages);
}
