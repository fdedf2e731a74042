//! Response language switching

use crate::context::Context;
use crate::Language;

pub(super) async fn change(transcript: &str, ctx: &mut Context) {
    let Some(language) = Language::find_in(transcript) else {
        ctx.respond(&format!(
            "Please choose a valid language: {}",
            Language::names()
        ))
        .await;
        return;
    };

    ctx.session.set_language(language);
    ctx.respond(&format!("Language changed to {}", language.name()))
        .await;
}
