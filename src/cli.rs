// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand, ValueEnum};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "site-sage",
    version = "0.1.0",
    about = "A CLI tool to scrape website content and chat about it with an LLM",
    long_about = "site-sage extracts the visible text of a webpage (or a whole site) to disk, \
                  then answers your questions about it by forwarding the text to a hosted \
                  chat-completion endpoint."
)]
pub struct Cli {
    // The #[command(subcommand)] attribute tells clap that this field
    // will hold one of the subcommands defined in the Commands enum
    #[command(subcommand)]
    pub command: Commands,
}

// Which form the extracted content takes on disk.
//
// The duplicated scripts this tool grew out of disagreed on this
// (stripped text vs. raw HTML), so it's an explicit configuration
// choice now instead of an accident of which script you ran.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtractFormat {
    /// Visible text only: script/style/meta/noscript/iframe removed,
    /// whitespace collapsed, one line per text chunk
    Text,
    /// The cleaned HTML itself (same tags removed, markup kept)
    Html,
}

// This enum defines our subcommands (extract, crawl, ask, chat)
//
// Each variant represents a different subcommand the user can run
// The fields inside each variant become the arguments for that subcommand
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract one page's content to the snapshot file
    ///
    /// Example: site-sage extract https://example.com
    Extract {
        /// URL of the page to extract (e.g., https://example.com)
        ///
        /// This is a positional argument (required, no flag needed)
        url: String,

        /// Where to write the snapshot file
        ///
        /// The same file is fully overwritten on every extraction;
        /// it's what `ask` and `chat` read from
        #[arg(long, default_value = "content/website_content.txt")]
        output: String,

        /// What to persist: stripped text or cleaned HTML
        #[arg(long, value_enum, default_value_t = ExtractFormat::Text)]
        format: ExtractFormat,
    },

    /// Crawl a site and save every same-site .html page it links to
    ///
    /// Example: site-sage crawl https://example.com/index.html
    Crawl {
        /// Seed URL to start crawling from
        seed_url: String,

        /// Directory to write one file per crawled page into
        #[arg(long, default_value = "scraped_pages")]
        output_dir: String,

        /// What to persist: stripped text or cleaned HTML
        #[arg(long, value_enum, default_value_t = ExtractFormat::Html)]
        format: ExtractFormat,

        /// Output the crawl report in JSON format instead of a table
        ///
        /// This is an optional flag: --json
        #[arg(long)]
        json: bool,
    },

    /// Ask a single question about the extracted content
    ///
    /// Example: site-sage ask "What does this company sell?"
    Ask {
        /// The question to forward to the model
        question: String,

        /// Snapshot file to read the content from
        #[arg(long, default_value = "content/website_content.txt")]
        content: String,

        /// Model identifier sent to the completion endpoint
        #[arg(long, default_value = "llama3-70b-8192")]
        model: String,

        /// Truncate the content to at most this many characters before
        /// interpolating it into the prompt (keeps us under the model's
        /// context window instead of failing remotely)
        #[arg(long, default_value_t = 24_000)]
        max_content_chars: usize,
    },

    /// Chat interactively about the extracted content (type 'exit' to quit)
    ///
    /// Example: site-sage chat
    Chat {
        /// Snapshot file to read the content from
        #[arg(long, default_value = "content/website_content.txt")]
        content: String,

        /// Model identifier sent to the completion endpoint
        #[arg(long, default_value = "llama3-70b-8192")]
        model: String,

        /// Truncate the content to at most this many characters
        #[arg(long, default_value_t = 24_000)]
        max_content_chars: usize,
    },
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why use structs and enums?
//    - Structs group related data (like the CLI arguments)
//    - Enums represent choices (like "extract OR crawl OR ask OR chat")
//    - Both are core Rust types for organizing data
//
// 2. What is ValueEnum?
//    - A clap derive that turns an enum into a CLI choice
//    - The user writes --format text or --format html
//    - clap validates the value and converts it to our enum for us
//
// 3. What does 'pub' mean?
//    - pub = public, meaning other modules can use this
//    - Without pub, items are private to this module
//
// 4. Why String instead of &str?
//    - String is owned (the struct owns the data)
//    - &str is borrowed (references data owned elsewhere)
//    - We use String here because we need to own the CLI arguments
// -----------------------------------------------------------------------------
