//! Layout queries over a synthetic two-column invoice page.

use unhocr::matcher::match_words;
use unhocr::order::{flow_order, line_that};
use unhocr::{parse, Bounded, Bounds, Line, Word};

fn invoice_page() -> unhocr::Page {
    fn line(l: i32, t: i32, words: &[(&str, i32)]) -> String {
        let mut spans = String::new();
        let mut x = l;
        for (text, width) in words {
            spans.push_str(&format!(
                "<span class='ocrx_word' title='bbox {} {} {} {}'>{}</span>",
                x,
                t,
                x + width,
                t + 20,
                text
            ));
            x += width + 10;
        }
        format!(
            "<span class='ocr_line' title='bbox {} {} {} {}'>{}</span>",
            l,
            t,
            x - 10,
            t + 20,
            spans
        )
    }
    let header = line(200, 20, &[("INVOICE", 140)]);
    let left1 = line(40, 100, &[("Item", 60), ("Qty", 50)]);
    let left2 = line(40, 140, &[("Widget", 80), ("2", 15)]);
    let left3 = line(40, 180, &[("Gadget", 80), ("5", 15)]);
    let right1 = line(400, 100, &[("Price", 70)]);
    let right2 = line(400, 140, &[("10.00", 70)]);
    let right3 = line(400, 180, &[("25,00", 70)]);
    let total = line(40, 700, &[("Total:", 80), ("135.00", 90)]);
    let hocr = format!(
        "<html><body><div class='ocr_page' title='bbox 0 0 620 800'>\
         <div class='ocr_carea'><p>{header}</p></div>\
         <div class='ocr_carea'><p>{left1}{left2}{left3}</p></div>\
         <div class='ocr_carea'><p>{right1}{right2}{right3}</p></div>\
         <div class='ocr_carea'><p>{total}</p></div>\
         </div></body></html>"
    );
    parse(&hocr).unwrap().remove(0)
}

#[test]
fn test_reading_order() {
    let page = invoice_page();
    assert_eq!(
        page.all_lines_as_strings(),
        vec![
            "INVOICE",
            "Item Qty",
            "Price",
            "Widget 2",
            "10.00",
            "Gadget 5",
            "25,00",
            "Total: 135.00",
        ]
    );
}

#[test]
fn test_flow_order_is_total_for_the_page() {
    let page = invoice_page();
    let lines = page.all_lines();
    for (i, a) in lines.iter().enumerate() {
        for b in &lines[i + 1..] {
            assert_ne!(flow_order(*a, *b), std::cmp::Ordering::Greater);
        }
    }
}

#[test]
fn test_find_line_by_predicate_and_comparator() {
    let page = invoice_page();
    let topmost_with_total = page.find_line(&line_that::is_at_the_top, &line_that::contains("Total"));
    assert_eq!(
        topmost_with_total.map(|l| l.text()),
        Some("Total: 135.00".to_string())
    );
    let most_words = page.find_line(&line_that::has_most_words, &line_that::is_arbitrary);
    assert_eq!(most_words.map(|l| l.word_count()), Some(2));
    assert!(page
        .find_line(&line_that::is_at_the_top, &line_that::contains("Refund"))
        .is_none());
}

#[test]
fn test_find_all_lines_matching_regex() {
    let page = invoice_page();
    let re = regex::Regex::new(r"\d+[.,]\d{2}").unwrap();
    let amounts = page.find_all_lines(line_that::matches_regex(re));
    assert_eq!(amounts.len(), 3);
}

#[test]
fn test_find_line_maximizing_close_to_header() {
    let page = invoice_page();
    let price_header = page
        .find_line(&line_that::is_at_the_top, &line_that::contains("Price"))
        .unwrap()
        .bounds()
        .unwrap();
    // both price cells score equally; proximity to the header decides
    let re = regex::Regex::new(r"^\d+[.,]\d{2}$").unwrap();
    let nearest = page
        .find_line_maximizing_close_to(
            |l| {
                if re.is_match(&l.text()) {
                    Some(1.0)
                } else {
                    None
                }
            },
            &price_header,
        )
        .unwrap();
    assert_eq!(nearest.text(), "10.00");
}

#[test]
fn test_fuzzy_search_within_line() {
    let page = invoice_page();
    let total_line = page
        .find_line(&line_that::is_at_the_bottom, &line_that::is_not_blank)
        .unwrap();
    // comma for period and O for zero, the usual OCR noise
    let bounds = total_line.find_bounds_of_text("135,0O").unwrap();
    assert_eq!(bounds, Bounds::new(130, 700, 220, 720));
    assert!(total_line.find_bounds_of_text("999.99").is_none());
}

#[test]
fn test_focus_on_total_amount() {
    let page = invoice_page();
    let total_line = page
        .find_line(&line_that::is_at_the_bottom, &line_that::is_not_blank)
        .unwrap();
    let focused = total_line.focus_on("135.00");
    assert_eq!(focused.text(), "135.00");
}

#[test]
fn test_match_words_against_line() {
    let line = Line::new(vec![
        Word::new("Ala", Some(Bounds::new(1, 0, 2, 0))),
        Word::new("ma", Some(Bounds::new(2, 0, 3, 0))),
        Word::new("kota", Some(Bounds::new(4, 0, 5, 0))),
    ]);
    let matched = match_words(line.words(), &["Ala", "makota"]).unwrap();
    assert_eq!(
        matched,
        vec![Some(Bounds::new(1, 0, 2, 0)), Some(Bounds::new(2, 0, 5, 0))]
    );
}

#[test]
fn test_grow_and_column_bounds() {
    let page = invoice_page();
    // a sliver through the left column grows until no word is cut
    let grown = page.grow_bounds_until_not_cutting_words(&Bounds::new(50, 90, 60, 200));
    assert!(grown.contains(&Bounds::new(40, 90, 100, 200)));
    assert!(grown.right < 400);

    let column = page.column_bounds(&Bounds::new(40, 90, 160, 200));
    assert!(column.contains(&grown));
    assert!(column.right < 400);
}

#[test]
fn test_clean_tiny_print_removes_specks() {
    let page = invoice_page().map_lines(|l| {
        let mut words = l.words().to_vec();
        words.push(Word::new(".", Some(Bounds::new(600, 0, 601, 1))));
        Line::new(words)
    });
    let cleaned = page.clean_tiny_print();
    assert!(cleaned.all_words().iter().all(|w| w.text() != "."));
    assert_eq!(cleaned.word_count(), invoice_page().word_count());
}
