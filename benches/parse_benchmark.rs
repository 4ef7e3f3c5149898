//! Benchmarks for unhocr parsing and query performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic hOCR documents shaped like typical
//! OCR engine output.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use unhocr::order::line_that;
use unhocr::Bounds;

/// Creates a synthetic hOCR document with the given number of pages,
/// each holding a regular grid of lines and words.
fn create_test_hocr(page_count: usize, lines_per_page: usize, words_per_line: usize) -> String {
    let mut content = String::new();
    content.push_str("<!DOCTYPE html>\n<html>\n<head><title></title></head>\n<body>\n");
    for p in 0..page_count {
        content.push_str(&format!(
            "<div class='ocr_page' id='page_{}' title='bbox 0 0 2480 3508; ppageno {}'>\n\
             <div class='ocr_carea' title='bbox 100 100 2380 3408'>\n<p class='ocr_par'>\n",
            p + 1,
            p
        ));
        for l in 0..lines_per_page {
            let top = 100 + l as i32 * 40;
            content.push_str(&format!(
                "<span class='ocr_line' title='bbox 100 {} 2380 {}'>",
                top,
                top + 30
            ));
            for w in 0..words_per_line {
                let left = 100 + w as i32 * 220;
                content.push_str(&format!(
                    "<span class='ocrx_word' title='bbox {} {} {} {}'>word{}x{}</span>",
                    left,
                    top,
                    left + 200,
                    top + 30,
                    l,
                    w
                ));
            }
            content.push_str("</span>\n");
        }
        content.push_str("</p>\n</div>\n</div>\n");
    }
    content.push_str("</body>\n</html>\n");
    content
}

fn bench_parse(c: &mut Criterion) {
    let small = create_test_hocr(1, 40, 10);
    let large = create_test_hocr(10, 40, 10);

    c.bench_function("parse_single_page", |b| {
        b.iter(|| unhocr::parse(black_box(&small)).unwrap())
    });

    c.bench_function("parse_ten_pages", |b| {
        b.iter(|| unhocr::parse(black_box(&large)).unwrap())
    });
}

fn bench_queries(c: &mut Criterion) {
    let hocr = create_test_hocr(1, 40, 10);
    let page = unhocr::parse(&hocr).unwrap().remove(0);

    c.bench_function("all_lines_flow_order", |b| {
        b.iter(|| black_box(&page).all_lines())
    });

    c.bench_function("find_all_lines_contains", |b| {
        b.iter(|| black_box(&page).find_all_lines(line_that::contains("word20x")))
    });

    c.bench_function("grow_bounds", |b| {
        b.iter(|| {
            black_box(&page)
                .grow_bounds_until_not_cutting_words(&Bounds::new(150, 150, 400, 1000))
        })
    });

    let line = page.all_lines()[0].clone();
    c.bench_function("fuzzy_find_in_line", |b| {
        b.iter(|| black_box(&line).find_bounds_of_text("word0x5word0x6"))
    });
}

criterion_group!(benches, bench_parse, bench_queries);
criterion_main!(benches);
