//! Response rendering in the session language

use crate::Language;
use crate::services::Translator;

/// Render an English response in `language`
///
/// Falls back to the English text when translation fails or comes back
/// blank, so a response is always produced.
pub async fn render(translator: &dyn Translator, text: &str, language: Language) -> String {
    if language.is_base() {
        return text.to_string();
    }

    match translator.translate(text, language).await {
        Ok(translated) if !translated.trim().is_empty() => translated,
        Ok(_) => {
            tracing::warn!(%language, "blank translation, using English");
            text.to_string()
        }
        Err(e) => {
            tracing::warn!(error = %e, %language, "translation failed, using English");
            text.to_string()
        }
    }
}
