// src/crawl/frontier.rs
// =============================================================================
// This module implements the site crawl with a breadth-first approach.
//
// How it works:
// 1. Start with the seed URL in a queue (the "frontier")
// 2. Pop a URL, skip it if already visited, otherwise fetch it
// 3. Extract and persist the page content immediately
// 4. Parse out all anchor links and admit the ones that qualify
// 5. Repeat until the frontier is empty
//
// Admission rules for a discovered link:
// - Not visited yet
// - Same host as the seed (compared as parsed URL authorities, not as a
//   substring - substring matching admits unrelated hosts that happen to
//   contain the seed string)
// - Path ends in ".html" - an intentional narrowing: pages without the
//   suffix are never discovered, even on the same host
//
// Failure policy: a fetch error skips that URL. No retry, no backoff.
// The failure is counted in the report instead of aborting the crawl.
//
// Politeness:
// - Adds a small delay between requests to avoid overwhelming servers
// - One URL at a time; the crawl is strictly sequential
//
// Rust concepts:
// - HashSet: To track visited URLs (O(1) lookup)
// - VecDeque: Double-ended queue for breadth-first crawling
// - Url: For parsing and comparing hosts
// =============================================================================

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use url::Url;

use crate::cli::ExtractFormat;
use crate::crawl::store;
use crate::scrape;

// The outcome of one page during a crawl
//
// #[derive(Serialize)] lets us print the report as JSON with --json
#[derive(Debug, Clone, Serialize)]
pub struct PageResult {
    /// The URL that was fetched (or attempted)
    pub url: String,
    /// Where the extracted content was written, if the fetch succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Why the page was skipped, if the fetch failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageResult {
    /// Helper method to check if the page was saved
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

// Summary of a whole crawl run
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    /// The seed URL the crawl started from
    pub seed: String,
    /// One entry per fetch attempt, in crawl order
    pub pages: Vec<PageResult>,
}

impl CrawlReport {
    /// Number of pages successfully fetched and saved
    pub fn saved_count(&self) -> usize {
        self.pages.iter().filter(|p| p.is_ok()).count()
    }

    /// Number of pages whose fetch failed and was skipped
    pub fn failed_count(&self) -> usize {
        self.pages.len() - self.saved_count()
    }
}

// Crawls a site starting from a seed URL
//
// Parameters:
//   client: the shared HTTP client
//   seed_url: the URL to start crawling from
//   output_dir: directory to save one file per page into
//   format: extraction policy for the persisted content
//
// Returns: a CrawlReport listing every fetch attempt
//
// Guarantees:
// - Each URL is fetched at most once per crawl
// - A seed with zero admissible outgoing links visits exactly one page
pub async fn crawl_site(
    client: &Client,
    seed_url: &str,
    output_dir: &str,
    format: ExtractFormat,
) -> Result<CrawlReport> {
    // Parse and validate the seed URL
    let seed = Url::parse(seed_url).map_err(|e| anyhow!("Invalid URL '{}': {}", seed_url, e))?;

    // Extract the host from the seed URL
    // We'll only crawl pages on this host
    let seed_host = seed
        .host_str()
        .ok_or_else(|| anyhow!("URL has no host: {}", seed_url))?
        .to_string();

    // The frontier: URLs discovered but not yet fetched
    let mut frontier = VecDeque::new();
    frontier.push_back(seed.to_string());

    // Track visited URLs to avoid fetching the same page twice
    let mut visited = HashSet::new();

    let mut pages = Vec::new();

    // Process the frontier until empty
    while let Some(url_str) = frontier.pop_front() {
        // Skip if already visited
        if visited.contains(&url_str) {
            continue;
        }

        // Mark as visited
        visited.insert(url_str.clone());

        println!("  Crawling: {}", url_str);

        // Fetch the page
        match scrape::fetch_page(client, &url_str).await {
            Ok(html) => {
                // Admit qualifying links to the frontier before we give
                // up ownership of the HTML
                for link in scrape::extract_links(&html, &url_str) {
                    if !visited.contains(&link) && admissible(&link, &seed_host) {
                        frontier.push_back(link);
                    }
                }

                // Extract and persist immediately; the page content is
                // dropped from memory after this
                let content = scrape::extract_content(&html, format);
                let parsed = Url::parse(&url_str)
                    .map_err(|e| anyhow!("Unparseable crawl URL '{}': {}", url_str, e))?;
                let file_path = store::save_page(output_dir, &parsed, &content)?;

                pages.push(PageResult {
                    url: url_str,
                    file: Some(file_path.display().to_string()),
                    error: None,
                });

                // Polite crawling: small delay between requests
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            }
            Err(e) => {
                eprintln!("  Warning: Failed to fetch {}: {}", url_str, e);
                pages.push(PageResult {
                    url: url_str,
                    file: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    Ok(CrawlReport {
        seed: seed.to_string(),
        pages,
    })
}

// Decides whether a discovered link joins the frontier
//
// Rules (both must hold):
// 1. Same host as the seed - compared on the parsed URL authority
// 2. The path ends in ".html"
//
// The .html requirement means modern extension-less pages are never
// discovered. That is a deliberate narrowing of crawl scope, not a bug:
// it keeps the crawl on static content pages and away from endpoints.
fn admissible(link: &str, seed_host: &str) -> bool {
    let parsed = match Url::parse(link) {
        Ok(url) => url,
        Err(_) => return false,
    };

    // Only HTTP/HTTPS links are fetchable
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return false;
    }

    // Host must match the seed's host exactly (case-insensitive)
    let same_host = parsed
        .host_str()
        .map(|h| h.eq_ignore_ascii_case(seed_host))
        .unwrap_or(false);

    same_host && parsed.path().ends_with(".html")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    // Spawns a tiny HTTP server on a free port that serves the given
    // (path, html) pairs and 404s everything else. Returns the base URL.
    async fn spawn_stub_site(pages: Vec<(&'static str, &'static str)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let pages = pages.clone();
                tokio::spawn(async move {
                    // GET requests have no body; the head is all we need
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 2048];
                    loop {
                        let n = match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => n,
                        };
                        buf.extend_from_slice(&chunk[..n]);
                        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }

                    let head = String::from_utf8_lossy(&buf);
                    let path = head.split_whitespace().nth(1).unwrap_or("/");

                    let response = match pages.iter().find(|(p, _)| *p == path) {
                        Some((_, html)) => format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            html.len(),
                            html
                        ),
                        None => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                            .to_string(),
                    };

                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_seed_with_no_html_links_visits_exactly_one_page() {
        let base = spawn_stub_site(vec![(
            "/index.html",
            "<p>Lonely page</p><a href='/about'>no suffix</a>",
        )])
        .await;
        let dir = tempfile::tempdir().unwrap();

        let client = crate::scrape::build_client().unwrap();
        let report = crawl_site(
            &client,
            &format!("{}/index.html", base),
            dir.path().to_str().unwrap(),
            ExtractFormat::Text,
        )
        .await
        .unwrap();

        assert_eq!(report.pages.len(), 1);
        assert_eq!(report.saved_count(), 1);
    }

    #[tokio::test]
    async fn test_cyclic_links_are_fetched_once_each() {
        // a and b link to each other (and a to itself); the visited set
        // must keep the crawl from looping
        let base = spawn_stub_site(vec![
            (
                "/a.html",
                "<a href='/b.html'>b</a><a href='/a.html'>self</a>",
            ),
            ("/b.html", "<a href='/a.html'>back</a>"),
        ])
        .await;
        let dir = tempfile::tempdir().unwrap();

        let client = crate::scrape::build_client().unwrap();
        let report = crawl_site(
            &client,
            &format!("{}/a.html", base),
            dir.path().to_str().unwrap(),
            ExtractFormat::Text,
        )
        .await
        .unwrap();

        assert_eq!(report.pages.len(), 2);
        assert_eq!(report.saved_count(), 2);

        let mut urls: Vec<_> = report.pages.iter().map(|p| p.url.clone()).collect();
        urls.sort();
        urls.dedup();
        assert_eq!(urls.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_page_is_skipped_and_counted() {
        let base = spawn_stub_site(vec![(
            "/a.html",
            "<a href='/missing.html'>gone</a>",
        )])
        .await;
        let dir = tempfile::tempdir().unwrap();

        let client = crate::scrape::build_client().unwrap();
        let report = crawl_site(
            &client,
            &format!("{}/a.html", base),
            dir.path().to_str().unwrap(),
            ExtractFormat::Text,
        )
        .await
        .unwrap();

        assert_eq!(report.pages.len(), 2);
        assert_eq!(report.saved_count(), 1);
        assert_eq!(report.failed_count(), 1);
    }

    #[test]
    fn test_admits_same_host_html_link() {
        assert!(admissible("https://example.com/about.html", "example.com"));
    }

    #[test]
    fn test_rejects_other_host() {
        assert!(!admissible("https://other.com/about.html", "example.com"));
    }

    #[test]
    fn test_rejects_host_containing_seed_as_substring() {
        // A substring test would wrongly admit this one
        assert!(!admissible(
            "https://example.com.evil.net/about.html",
            "example.com"
        ));
    }

    #[test]
    fn test_rejects_non_html_path() {
        assert!(!admissible("https://example.com/about", "example.com"));
        assert!(!admissible("https://example.com/logo.png", "example.com"));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        assert!(!admissible("ftp://example.com/about.html", "example.com"));
    }

    #[test]
    fn test_host_comparison_is_case_insensitive() {
        assert!(admissible("https://EXAMPLE.com/a.html", "example.com"));
    }
}
