// src/scrape/mod.rs
// =============================================================================
// This module contains the page scraping logic.
//
// Submodules:
// - fetch: Makes the HTTP GET request for a page
// - extract: Strips HTML down to visible text (or cleaned HTML)
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod extract;
mod fetch;

// Re-export public items from submodules
// This lets users write `scrape::fetch_page()` instead of
// `scrape::fetch::fetch_page()`
pub use extract::{extract_content, extract_links, normalize_html};
pub use fetch::{build_client, fetch_page};
