// src/scrape/extract.rs
// =============================================================================
// This module turns raw HTML into the content we persist.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Two extraction policies (see ExtractFormat in cli.rs):
// - Text: visible text only, one line per text chunk
// - Html: the document itself with the noise elements removed
//
// Either way, script/style/meta/noscript/iframe subtrees are dropped -
// their contents are never "visible text" and would poison the prompt
// we later build for the model.
//
// Rust concepts:
// - Recursion over a tree structure
// - Iterators: For processing collections
// - Pattern matching on enum variants (Node::Text, Node::Element)
// =============================================================================

use scraper::node::Node;
use scraper::{Html, Selector};
use url::Url;

use crate::cli::ExtractFormat;

// Elements whose entire subtree is removed before extraction
const STRIPPED_TAGS: &[&str] = &["script", "style", "meta", "noscript", "iframe"];

// Extracts content from HTML according to the chosen policy
//
// Parameters:
//   html: the raw HTML to process (borrowed as &str)
//   format: Text for visible text, Html for cleaned markup
pub fn extract_content(html: &str, format: ExtractFormat) -> String {
    match format {
        ExtractFormat::Text => extract_text(html),
        ExtractFormat::Html => normalize_html(html),
    }
}

// Extracts the visible text of a document
//
// Walks the DOM tree, skipping the subtrees of stripped tags, and
// collects every non-empty text node. Whitespace inside a chunk is
// collapsed to single spaces; chunks are joined with newlines.
//
// Example:
//   "<p>Hello   <b>world</b></p><script>alert(1)</script>"
//   -> "Hello\nworld"
fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut chunks = Vec::new();
    collect_text(document.tree.root(), &mut chunks);
    chunks.join("\n")
}

// Recursive helper for extract_text
//
// ego_tree (the tree structure underneath scraper, re-exported by it)
// gives us NodeRef, a lightweight handle we can walk children from.
fn collect_text(node: ego_tree::NodeRef<'_, Node>, chunks: &mut Vec<String>) {
    match node.value() {
        Node::Text(text) => {
            // Collapse runs of whitespace and drop empty chunks
            let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if !cleaned.is_empty() {
                chunks.push(cleaned);
            }
            // Text nodes have no children, nothing further to do
            return;
        }
        Node::Element(element) => {
            // Skip the whole subtree of stripped tags
            if STRIPPED_TAGS.contains(&element.name()) {
                return;
            }
        }
        // Comments, doctype, etc. - descend anyway, they may have children
        _ => {}
    }

    for child in node.children() {
        collect_text(child, chunks);
    }
}

// Returns the document's HTML with the stripped tags removed
//
// Used by the Html extraction policy: the markup survives but
// script/style/meta/noscript/iframe elements are detached first.
pub fn normalize_html(html: &str) -> String {
    let mut document = Html::parse_document(html);

    // Two passes: collect the node ids first (we can't mutate the tree
    // while iterating over it), then detach each one.
    let doomed: Vec<_> = document
        .tree
        .nodes()
        .filter(|node| match node.value() {
            Node::Element(element) => STRIPPED_TAGS.contains(&element.name()),
            _ => false,
        })
        .map(|node| node.id())
        .collect();

    for id in doomed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    document.html()
}

// Extracts all anchor links from HTML content, resolved to absolute URLs
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//   page_url: the URL of the page (for resolving relative links)
//
// Returns: Vec<String> containing all absolute HTTP/HTTPS URLs found
//
// Example:
//   html = "<a href='/docs.html'>Docs</a>"
//   page_url = "https://example.com"
//   result = ["https://example.com/docs.html"]
pub fn extract_links(html: &str, page_url: &str) -> Vec<String> {
    let mut links = Vec::new();

    // Parse the HTML into a document
    let document = Html::parse_document(html);

    // Create a CSS selector to find all <a> tags
    // Selector::parse returns Result, so we use .unwrap() which panics on error
    // This is OK here because our selector is a constant and known to be valid
    let selector = Selector::parse("a[href]").unwrap();

    // Parse the page URL once
    // We'll use this to resolve relative links
    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(_) => {
            // If the page URL is invalid, we can't resolve relative links
            eprintln!("Warning: Invalid page URL: {}", page_url);
            return links;
        }
    };

    // Select all <a> elements with href attributes
    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            // Try to convert this to an absolute URL
            if let Some(absolute_url) = resolve_link(&base, href) {
                // Only keep HTTP/HTTPS links
                if absolute_url.starts_with("http://") || absolute_url.starts_with("https://") {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

// Resolves a link (possibly relative) to an absolute URL
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs" -> Some("https://example.com/docs")
//   href = "#section" -> None (same-page anchor)
//   href = "mailto:a@b.com" -> None (not fetchable)
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    // Skip anchors and special protocols
    if href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    // Try to resolve the URL
    match base.join(href) {
        Ok(url) => Some(url.to_string()),
        Err(_) => None,
    }
}
