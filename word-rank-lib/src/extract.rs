//! Locating the article content region and collecting its paragraph text.
//!
//! The content region is the first element, in depth-first pre-order, whose
//! tag matches the configured container tag and whose `class` attribute
//! contains the configured marker substring. Only one region is expected
//! per document; the search ends at the first hit. Class matching is a
//! substring test, not a CSS class-name match, so a marker of `caas-body`
//! also matches `class="caas-body article"`.

use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node};

/// Find the content region of a parsed document, if it has one.
pub fn find_content_region<'a>(
    document: &'a Html,
    region_tag: &str,
    region_marker: &str,
) -> Option<ElementRef<'a>> {
    find_region_in(document.tree.root(), region_tag, region_marker)
}

fn find_region_in<'a>(
    node: NodeRef<'a, Node>,
    region_tag: &str,
    region_marker: &str,
) -> Option<ElementRef<'a>> {
    if let Some(element) = ElementRef::wrap(node) {
        if element.value().name() == region_tag {
            if let Some(class) = element.value().attr("class") {
                if class.contains(region_marker) {
                    return Some(element);
                }
            }
        }
    }

    for child in node.children() {
        if let Some(found) = find_region_in(child, region_tag, region_marker) {
            return Some(found);
        }
    }

    None
}

/// Collect the text of every paragraph element under `region`, in document
/// order.
///
/// Each entry is one paragraph's descendant text nodes concatenated with no
/// separator, exactly as they appear in the markup.
pub fn paragraph_texts(region: ElementRef<'_>, paragraph_tag: &str) -> Vec<String> {
    let mut texts = Vec::new();
    collect_paragraphs(*region, paragraph_tag, &mut texts);
    texts
}

fn collect_paragraphs(node: NodeRef<'_, Node>, paragraph_tag: &str, out: &mut Vec<String>) {
    if let Some(element) = ElementRef::wrap(node) {
        if element.value().name() == paragraph_tag {
            out.push(element.text().collect());
        }
    }

    for child in node.children() {
        collect_paragraphs(child, paragraph_tag, out);
    }
}
