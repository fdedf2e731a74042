//! Action handlers, one per intent

mod chat;
mod info;
mod language;
mod reminder;
mod system;
mod web;

use crate::context::Context;
use crate::intent::Intent;
use crate::Result;

/// Whether the loop keeps going after a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Run the handler for `intent`
///
/// `transcript` is the lower-cased command. Only [`Intent::Exit`] yields
/// [`Flow::Exit`].
///
/// # Errors
///
/// Returns error only when a nested capture hits an audio device failure
pub async fn execute(intent: Intent, transcript: &str, ctx: &mut Context) -> Result<Flow> {
    tracing::debug!(?intent, transcript, "executing intent");

    match intent {
        Intent::Exit => {
            chat::farewell(ctx).await;
            return Ok(Flow::Exit);
        }
        Intent::ChangeLanguage => language::change(transcript, ctx).await,
        Intent::Wikipedia => web::wikipedia(transcript, ctx).await,
        Intent::OpenSite(site) => web::open_site(site, ctx).await,
        Intent::Weather => info::weather(transcript, ctx).await,
        Intent::Search => web::search(transcript, ctx).await,
        Intent::PlayMusic => system::play_music(ctx).await,
        Intent::Calculate => info::calculate(transcript, ctx).await,
        Intent::Reminder => reminder::remind(transcript, ctx).await?,
        Intent::Time => info::time(ctx).await,
        Intent::OpenApplication => system::open_application(transcript, ctx).await,
        Intent::Joke => chat::joke(ctx).await,
        Intent::Date => info::date(ctx).await,
        Intent::WhoAreYou => chat::identity(ctx).await,
        Intent::Help => chat::help(ctx).await,
        Intent::HowAreYou => chat::how_are_you(ctx).await,
        Intent::Thanks => chat::thanks(ctx).await,
        Intent::Greeting => chat::greeting(ctx).await,
        Intent::Unknown => chat::not_understood(ctx).await,
    }

    Ok(Flow::Continue)
}

/// Transcript with the given whole words removed
fn strip_words(transcript: &str, words: &[&str]) -> String {
    transcript
        .split_whitespace()
        .filter(|w| !words.contains(&w.trim_matches(|c: char| c.is_ascii_punctuation())))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_words() {
        assert_eq!(strip_words("search for rust books", &["search", "for"]), "rust books");
        assert_eq!(strip_words("google, search", &["search", "google"]), "");
        assert_eq!(strip_words("format drive", &["for"]), "format drive");
    }
}
