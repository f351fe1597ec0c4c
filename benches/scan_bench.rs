// benches/scan_bench.rs
//! Benchmarks for the tag scanner over OneNote-shaped HTML.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use onenote2todo::tags::find_tagged_fragments;

/// Build a page the way OneNote exports one: absolutely positioned divs
/// full of paragraphs, with a slice of them tagged.
fn create_sample_page_html(paragraphs: usize, tagged_every: usize) -> String {
    let mut html = String::from(
        "<html lang=\"en-US\">\n<head>\n<title>Generated page</title>\n\
         <meta name=\"created\" content=\"2024-01-15T09:00:00.0000000\" />\n</head>\n\
         <body data-absolute-enabled=\"true\" style=\"font-family:Calibri;font-size:11pt\">\n\
         <div style=\"position:absolute;left:48px;top:115px;width:624px\">\n",
    );

    for i in 0..paragraphs {
        if tagged_every > 0 && i % tagged_every == 0 {
            html.push_str(&format!(
                "<p data-tag=\"to-do\" style=\"margin-top:0pt;margin-bottom:0pt\">Task number {} with a realistic amount of text</p>\n",
                i
            ));
        } else {
            html.push_str(&format!(
                "<p style=\"margin-top:0pt;margin-bottom:0pt\">Paragraph {} with ordinary note content and no tag</p>\n",
                i
            ));
        }
    }

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn bench_tag_scanner(c: &mut Criterion) {
    let mut group = c.benchmark_group("tag_scanner");

    // Every fourth paragraph tagged, across three page sizes
    for paragraphs in [10usize, 100, 1000] {
        let html = create_sample_page_html(paragraphs, 4);
        group.bench_with_input(
            BenchmarkId::new("mixed_page", paragraphs),
            &html,
            |b, html| {
                b.iter(|| find_tagged_fragments(black_box(html), black_box("to-do")));
            },
        );
    }

    // The common case: a large page with nothing tagged at all
    let untagged = create_sample_page_html(1000, 0);
    group.bench_function("untagged_page_1000", |b| {
        b.iter(|| find_tagged_fragments(black_box(&untagged), black_box("to-do")));
    });

    group.finish();
}

criterion_group!(benches, bench_tag_scanner);
criterion_main!(benches);
