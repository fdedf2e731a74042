//! Browser-backed handlers

use super::strip_words;
use crate::context::Context;
use crate::intent::Site;

pub(super) async fn open_site(site: Site, ctx: &mut Context) {
    match ctx.services.launcher.open(site.url()) {
        Ok(()) => ctx.respond(&format!("Opening {}", site.name())).await,
        Err(e) => {
            tracing::warn!(error = %e, site = site.name(), "failed to open site");
            ctx.respond(&format!("Sorry, I couldn't open {}", site.name()))
                .await;
        }
    }
}

pub(super) async fn search(transcript: &str, ctx: &mut Context) {
    let query = strip_words(transcript, &["search", "google", "for"]);
    if query.is_empty() {
        tracing::debug!("empty search query, ignoring");
        return;
    }

    search_web(&query, ctx).await;
}

pub(super) async fn wikipedia(transcript: &str, ctx: &mut Context) {
    ctx.respond("Searching Wikipedia...").await;

    let rest = strip_words(transcript, &["wikipedia", "search", "according", "to"]);
    let query = if rest.is_empty() {
        "wikipedia".to_string()
    } else {
        format!("wikipedia {rest}")
    };

    search_web(&query, ctx).await;
}

/// Open the configured search engine on `query` and confirm aloud
async fn search_web(query: &str, ctx: &mut Context) {
    let url = search_url(&ctx.settings.search_url, query);
    tracing::info!(query, url = %url, "searching the web");

    match ctx.services.launcher.open(&url) {
        Ok(()) => ctx.respond(&format!("Here's what I found for {query}")).await,
        Err(e) => {
            tracing::warn!(error = %e, "failed to open search");
            ctx.respond("Sorry, I couldn't open the search").await;
        }
    }
}

fn search_url(base: &str, query: &str) -> String {
    format!("{base}{}", urlencoding::encode(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_encodes_query() {
        assert_eq!(
            search_url("https://www.google.com/search?q=", "rust & tokio"),
            "https://www.google.com/search?q=rust%20%26%20tokio"
        );
    }
}
