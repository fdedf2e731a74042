//! Reminders, acknowledged but never stored

use crate::context::Context;
use crate::Result;

pub(super) async fn remind(transcript: &str, ctx: &mut Context) -> Result<()> {
    let task = match inline_task(transcript) {
        Some(task) => Some(task),
        None => {
            ctx.respond("What should I remind you about?").await;
            ctx.listen_command().await?
        }
    };

    match task {
        Some(task) => {
            tracing::info!(task = %task, "reminder acknowledged");
            ctx.respond(&format!("Okay, I will remind you to {task}"))
                .await;
        }
        None => ctx.respond("I didn't catch the reminder").await,
    }

    Ok(())
}

/// The `X` in "remind me to X"
fn inline_task(transcript: &str) -> Option<String> {
    let (_, task) = transcript.split_once("remind me to ")?;
    let task = task.trim().trim_end_matches(|c: char| c.is_ascii_punctuation());
    (!task.is_empty()).then(|| task.to_string())
}
