// src/tags.rs
//! Tagged-fragment extraction from OneNote page HTML.
//!
//! OneNote renders note tags ("To Do", "Important", ...) into page HTML
//! as a `data-tag` attribute whose value is a comma-separated list of
//! tag names. A checked-off to-do becomes `to-do:completed`, a distinct
//! entry that must not match a scan for plain `to-do`. The scanner
//! selects every element carrying the attribute and keeps the text
//! nodes of the ones whose tag list contains the requested tag.

use crate::constants::TAG_ATTRIBUTE;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

/// Matches any element carrying the OneNote tag attribute.
static TAGGED_ELEMENT: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(&format!("[{}]", TAG_ATTRIBUTE)).expect("attribute selector is valid CSS")
});

/// Collects the text of every element tagged with `tag`.
///
/// Fragments are the element's text nodes in document order, one
/// fragment per node, so `<p data-tag="to-do">Call <b>Bob</b></p>`
/// yields `["Call ", "Bob"]`. Whitespace-only nodes are dropped.
/// Matching is exact per list entry; `to-do:completed` does not match
/// `to-do`. Malformed HTML never fails, the parser is lenient; a page
/// without matches yields an empty Vec.
pub fn find_tagged_fragments(html: &str, tag: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut fragments = Vec::new();

    for element in document.select(&TAGGED_ELEMENT) {
        let Some(tag_list) = element.value().attr(TAG_ATTRIBUTE) else {
            continue;
        };
        if !tag_list.split(',').any(|entry| entry == tag) {
            continue;
        }

        for text in element.text() {
            if text.trim().is_empty() {
                continue;
            }
            fragments.push(text.to_string());
        }
    }

    log::debug!(
        "Found {} '{}' fragment(s) in {} byte(s) of HTML",
        fragments.len(),
        tag,
        html.len()
    );
    fragments
}
