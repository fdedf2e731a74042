//! Response translation via the `MyMemory` HTTP API

use async_trait::async_trait;
use serde::Deserialize;

use super::Translator;
use crate::{Error, Language, Result};

/// Default `MyMemory` endpoint
pub const DEFAULT_TRANSLATE_URL: &str = "https://api.mymemory.translated.net/get";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationResponse {
    response_data: TranslationData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationData {
    translated_text: String,
}

/// Translator backed by `GET {url}?q=...&langpair=en|xx`
pub struct MyMemoryTranslator {
    client: reqwest::Client,
    url: String,
}

impl MyMemoryTranslator {
    #[must_use]
    pub const fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait(?Send)]
impl Translator for MyMemoryTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String> {
        let langpair = format!("{}|{}", Language::English.code(), target.code());
        tracing::debug!(%target, chars = text.len(), "translating response");

        let response = self
            .client
            .get(&self.url)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ExternalApi(format!(
                "translation error {status}: {body}"
            )));
        }

        let parsed: TranslationResponse = response
            .json()
            .await
            .map_err(|e| Error::ExternalApi(format!("malformed translation response: {e}")))?;

        Ok(parsed.response_data.translated_text)
    }
}
