//! Local music and applications

use std::path::{Path, PathBuf};

use super::strip_words;
use crate::context::Context;

/// Extensions the play-music handler accepts
const AUDIO_EXTENSIONS: [&str; 4] = ["mp3", "wav", "flac", "ogg"];

pub(super) async fn play_music(ctx: &mut Context) {
    let Some(dir) = ctx.settings.music_dir.clone().filter(|d| d.is_dir()) else {
        ctx.respond("Music directory not found").await;
        return;
    };

    let Some(track) = first_track(&dir) else {
        ctx.respond("No music files found in the music directory").await;
        return;
    };

    tracing::info!(track = %track.display(), "playing music");
    match ctx.services.launcher.open(&track.to_string_lossy()) {
        Ok(()) => ctx.respond("Playing music").await,
        Err(e) => {
            tracing::warn!(error = %e, "failed to open music file");
            ctx.respond("Sorry, I couldn't play music").await;
        }
    }
}

pub(super) async fn open_application(transcript: &str, ctx: &mut Context) {
    let app = strip_words(transcript, &["open", "kholo", "the", "app", "application"]);
    if app.is_empty() {
        ctx.respond("Which application should I open?").await;
        return;
    }

    let Some(program) = ctx.settings.apps.get(&app).cloned() else {
        ctx.respond(&format!("I don't know how to open {app}")).await;
        return;
    };

    match ctx.services.launcher.launch(&program) {
        Ok(()) => ctx.respond(&format!("Opening {app}")).await,
        Err(e) => {
            tracing::warn!(error = %e, app, program, "failed to launch application");
            ctx.respond(&format!("Sorry, I couldn't open {app}")).await;
        }
    }
}

/// First audio file in `dir` by name
fn first_track(dir: &Path) -> Option<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, dir = %dir.display(), "failed to read music directory");
            return None;
        }
    };

    let mut tracks: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_audio(path))
        .collect();

    tracks.sort();
    tracks.into_iter().next()
}

fn is_audio(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| AUDIO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_track_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();
        std::fs::write(dir.path().join("b.MP3"), b"").unwrap();
        std::fs::write(dir.path().join("a.flac"), b"").unwrap();

        assert_eq!(first_track(dir.path()), Some(dir.path().join("a.flac")));
    }

    #[test]
    fn test_first_track_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(first_track(dir.path()), None);
    }
}
