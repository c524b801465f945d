// src/crawl/mod.rs
// =============================================================================
// This module handles whole-site crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Respects same-site restriction (doesn't crawl external hosts)
// - Only follows links to .html pages (see frontier.rs for why)
// - Persists every fetched page to disk immediately
//
// Why crawl?
// - A single page rarely holds everything a site says about itself
// - Saving every page gives the question-answering step more to work with
//
// Rust concepts:
// - Collections: HashSet for tracking visited URLs, VecDeque for the frontier
// =============================================================================

mod frontier;
mod store;

// Re-export the main crawling entry point and its report type
pub use frontier::{crawl_site, CrawlReport};
pub use store::{page_file_name, save_page, write_snapshot};
