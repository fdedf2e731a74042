//! Weather reports via wttr.in

use async_trait::async_trait;

use super::WeatherService;
use crate::{Error, Result};

/// Default weather endpoint
pub const DEFAULT_WEATHER_URL: &str = "https://wttr.in";

/// Weather service backed by `GET {url}/{location}?format=3`
pub struct WttrWeather {
    client: reqwest::Client,
    url: String,
}

impl WttrWeather {
    #[must_use]
    pub const fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }

    /// Request URL for a location, auto-detected when `None`
    fn report_url(&self, location: Option<&str>) -> String {
        let base = self.url.trim_end_matches('/');
        match location {
            Some(place) => format!("{base}/{}?format=3", urlencoding::encode(place)),
            None => format!("{base}/?format=3"),
        }
    }
}

#[async_trait(?Send)]
impl WeatherService for WttrWeather {
    async fn report(&self, location: Option<&str>) -> Result<String> {
        let url = self.report_url(location);
        tracing::debug!(url, "fetching weather");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::ExternalApi(format!("weather error {status}")));
        }

        let body = response.text().await?;
        let report = body.trim();
        if report.is_empty() {
            return Err(Error::ExternalApi("empty weather report".to_string()));
        }

        Ok(report.to_string())
    }
}
