// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Dispatch to the appropriate subcommand handler
// 3. Collect results and print them
// 4. Exit with proper code (0 = success, 1 = partial failure, 2 = error)
//
// Rust concepts used:
// - async/await: Because we make network requests
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;      // src/cli.rs - command-line parsing
mod crawl;    // src/crawl/ - site crawling and page persistence
mod qa;       // src/qa/ - question answering via the completion endpoint
mod scrape;   // src/scrape/ - page fetching and HTML-to-text extraction

// Import items we need from our modules
use clap::Parser; // Parser trait enables the parse() method
use cli::{Cli, Commands, ExtractFormat};
use std::io::Write;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Load a .env file if one exists (for GROQ_API_KEY); missing file is fine
    dotenvy::dotenv().ok();

    // Run our application logic and capture the exit code
    // std::process::exit() terminates the program with the given code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = success
//   Ok(1) = partial failure (failed pages in a crawl, error answer)
//   Ok(2) = internal error
//   Err = unexpected error
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    // Match on which subcommand was used
    match cli.command {
        Commands::Extract {
            url,
            output,
            format,
        } => handle_extract(&url, &output, format).await,
        Commands::Crawl {
            seed_url,
            output_dir,
            format,
            json,
        } => handle_crawl(&seed_url, &output_dir, format, json).await,
        Commands::Ask {
            question,
            content,
            model,
            max_content_chars,
        } => handle_ask(&question, &content, model, max_content_chars).await,
        Commands::Chat {
            content,
            model,
            max_content_chars,
        } => handle_chat(&content, model, max_content_chars).await,
    }
}

// Handles the 'extract' subcommand
//
// Fetches one page, strips it to the chosen format and overwrites the
// snapshot file with the result.
async fn handle_extract(url: &str, output: &str, format: ExtractFormat) -> Result<i32> {
    println!("🔍 Extracting: {}", url);

    let client = scrape::build_client()?;
    let html = scrape::fetch_page(&client, url).await?;
    let content = scrape::extract_content(&html, format);

    crawl::write_snapshot(output, &content)?;

    println!("✅ Content extracted and saved in '{}'", output);
    Ok(0)
}

// Handles the 'crawl' subcommand
//
// Crawls every same-site .html page reachable from the seed and saves
// each one into the output directory, then prints a report.
async fn handle_crawl(
    seed_url: &str,
    output_dir: &str,
    format: ExtractFormat,
    json: bool,
) -> Result<i32> {
    println!("🔍 Crawling: {}", seed_url);

    let client = scrape::build_client()?;
    let report = crawl::crawl_site(&client, seed_url, output_dir, format).await?;

    print_report(&report, json)?;

    // Exit code 1 if any page failed, 0 if the whole crawl succeeded
    if report.failed_count() > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Handles the 'ask' subcommand
//
// One question, one answer. The forwarder returns error strings instead
// of raising, so we just print whatever comes back and pick the exit
// code from its prefix.
async fn handle_ask(
    question: &str,
    content_path: &str,
    model: String,
    max_content_chars: usize,
) -> Result<i32> {
    let client = build_qa_client(model, max_content_chars)?;

    let answer = client.ask(question, content_path).await;
    println!("{}", answer);

    if answer.starts_with("Error:") {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Handles the 'chat' subcommand
//
// Interactive loop over stdin. Every question is answered against the
// snapshot file, re-read on each turn. Type 'exit' to quit.
async fn handle_chat(content_path: &str, model: String, max_content_chars: usize) -> Result<i32> {
    let client = build_qa_client(model, max_content_chars)?;

    println!("Welcome to the website chatbot! Type 'exit' to quit.");

    let stdin = std::io::stdin();
    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        // 0 bytes read = end of input (Ctrl-D), treat it like 'exit'
        if stdin.read_line(&mut line)? == 0 {
            println!();
            println!("Chatbot: Goodbye!");
            return Ok(0);
        }

        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") {
            println!("Chatbot: Goodbye!");
            return Ok(0);
        }

        let answer = client.ask(question, content_path).await;
        println!("Chatbot: {}", answer);
    }
}

// Builds the QA client from the environment and CLI options
//
// The API key comes from GROQ_API_KEY (possibly via .env). Everything
// else lives in QaConfig - no global state.
fn build_qa_client(model: String, max_content_chars: usize) -> Result<qa::QaClient> {
    let api_key = std::env::var("GROQ_API_KEY")
        .map_err(|_| anyhow::anyhow!("Please set your GROQ_API_KEY environment variable."))?;

    let config = qa::QaConfig::new(api_key, model, max_content_chars);
    qa::QaClient::new(config)
}

// Prints the crawl report either as a table or JSON
fn print_report(report: &crawl::CrawlReport, json: bool) -> Result<()> {
    if json {
        // Serialize the report to JSON and print
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        // Print human-readable table
        print_table(report);
    }
    Ok(())
}

// Prints the crawl report as a human-readable table in the terminal
fn print_table(report: &crawl::CrawlReport) {
    // Print table header
    println!("{:<60} {:<40}", "URL", "SAVED TO / ERROR");
    println!("{}", "=".repeat(100));

    // Print each result
    for page in &report.pages {
        let detail = page
            .file
            .as_deref()
            .or(page.error.as_deref())
            .unwrap_or("");

        // Truncate URL if too long for display
        let url_display = if page.url.len() > 57 {
            format!("{}...", &page.url[..57])
        } else {
            page.url.clone()
        };

        let status = if page.is_ok() { "✅" } else { "❌" };
        println!("{} {:<58} {:<40}", status, url_display, detail);
    }

    println!();

    // Print summary
    println!("📊 Summary:");
    println!("   ✅ Saved: {}", report.saved_count());
    println!("   ❌ Failed: {}", report.failed_count());
    println!("   📋 Total: {}", report.pages.len());
}
