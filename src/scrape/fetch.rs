// src/scrape/fetch.rs
// =============================================================================
// This module fetches webpages over HTTP.
//
// Key functionality:
// - One shared reqwest::Client with a fixed browser-like User-Agent
//   (some sites refuse requests without one) and a 10 second timeout
// - GET a URL and return its body as a String
// - Any non-2xx status or transport failure becomes an error for that URL
//
// Rust concepts:
// - async/await: For network I/O
// - Result<T, E>: For error handling
// =============================================================================

use anyhow::{anyhow, Result};
use reqwest::Client;
use std::time::Duration;

// The User-Agent we send with every page fetch.
// A plain reqwest default gets blocked by a surprising number of sites,
// so we present ourselves as a regular desktop browser.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

// Builds the HTTP client used for all page fetches
//
// We build this once and pass it around; reqwest clients hold a
// connection pool internally and are cheap to clone.
pub fn build_client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(10)) // 10 second timeout per request
        .build()?;
    Ok(client)
}

// Fetches a webpage and returns its HTML content
//
// Parameters:
//   client: reqwest HTTP client (borrowed, we don't own it)
//   url: the URL to fetch
//
// Returns: the response body on 2xx, an error otherwise
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(anyhow!("HTTP {}", response.status()));
    }

    let html = response.text().await?;
    Ok(html)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is the ? operator?
//    - Shorthand for error propagation
//    - If Result is Ok(value), extracts value
//    - If Result is Err(e), returns early with the error
//
// 2. Why &str for parameters but String for return?
//    - &str = borrowed string slice, no allocation
//    - String = owned string, allocated on heap
//    - Take &str when you just need to read
//    - Return String when you create new data
//
// 3. Why a const for the User-Agent?
//    - Every fetch must send the same header
//    - A const keeps it in one place and out of the function bodies
// -----------------------------------------------------------------------------
