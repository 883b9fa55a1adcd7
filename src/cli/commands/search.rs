use std::io::Write as _;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::clients::FlickrClient;
use crate::config::Config;
use crate::domain::events::StreamEvent;
use crate::services::{SearchHistory, SearchService};

/// Build a shared HTTP client with the configured timeout. Reused for every
/// request so connections pool across pages.
fn build_http_client(config: &Config) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(
            config.flickr.request_timeout_seconds.into(),
        ))
        .user_agent(concat!("Photostream/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))
}

pub async fn cmd_search(config: &Config, query: &str) -> Result<()> {
    if config.flickr.api_key.is_empty() {
        anyhow::bail!("No API key configured. Set FLICKR_API_KEY or flickr.api_key in config.toml");
    }

    let http = build_http_client(config)?;
    let client = Arc::new(FlickrClient::with_shared_client(http, &config.flickr));
    let service = Arc::new(SearchService::new(
        client,
        config.general.event_bus_buffer_size,
    ));

    // Mirror the loading transitions announced on the event bus.
    let mut events = service.subscribe();
    let loading_indicator = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if let StreamEvent::LoadingChanged { is_loading: true } = event {
                println!("Loading images...");
            }
        }
    });

    let mut history = SearchHistory::new();
    let mut shown = 0usize;

    run_search(&service, &mut history, &mut shown, query).await;

    loop {
        println!();
        println!("[Enter/m] more | [h] history | #n re-run | [q] quit | or type a new search");
        print!("> ");
        std::io::stdout().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.eq_ignore_ascii_case("q") {
            break;
        }

        if input.is_empty() || input.eq_ignore_ascii_case("m") {
            load_more(&service, &mut shown).await;
            continue;
        }

        if input.eq_ignore_ascii_case("h") {
            print_history(&history);
            continue;
        }

        if let Ok(index) = input.parse::<usize>() {
            if let Some(text) = history.get(index.wrapping_sub(1)).map(str::to_string) {
                run_search(&service, &mut history, &mut shown, &text).await;
            } else {
                println!("No history entry #{index}. Use 'h' to list past searches.");
            }
            continue;
        }

        run_search(&service, &mut history, &mut shown, input).await;
    }

    loading_indicator.abort();
    Ok(())
}

/// Starts a fresh search and prints the first page.
async fn run_search(
    service: &SearchService,
    history: &mut SearchHistory,
    shown: &mut usize,
    text: &str,
) {
    history.record(text);
    *shown = 0;

    match service.set_query(text).await {
        Ok(()) => {
            if print_new_photos(service, shown).await == 0 {
                println!("No photos were found.");
            }
        }
        Err(e) => println!("Search failed: {e}"),
    }
}

/// Signals "scrolled to the bottom" and prints whatever the next page added.
async fn load_more(service: &SearchService, shown: &mut usize) {
    let count = service.photos().await.len();
    if count == 0 {
        println!("Nothing to page through; type a new search term.");
        return;
    }

    match service.trigger_next_page(count - 1).await {
        Ok(true) => {
            if print_new_photos(service, shown).await == 0 {
                println!("No more results.");
            }
        }
        Ok(false) => println!("No more results."),
        Err(e) => println!("Search failed: {e}"),
    }
}

/// Prints photos not yet shown, returning how many were printed.
async fn print_new_photos(service: &SearchService, shown: &mut usize) -> usize {
    let photos = service.photos().await;
    let mut printed = 0;

    for (i, photo) in photos.iter().enumerate().skip(*shown) {
        println!("{:>4}. {}", i + 1, photo.image_url());
        printed += 1;
    }

    *shown = photos.len();
    printed
}

fn print_history(history: &SearchHistory) {
    if history.is_empty() {
        println!("No searches yet.");
        return;
    }

    println!("Search History:");
    println!("{:-<40}", "");
    for (i, text) in history.iter().enumerate() {
        println!("[{}] {}", i + 1, text);
    }
}
