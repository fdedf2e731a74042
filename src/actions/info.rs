//! Time, date, weather and arithmetic

use crate::calculator;
use crate::context::Context;

pub(super) async fn time(ctx: &mut Context) {
    let now = ctx.services.clock.now();
    ctx.respond(&format!("Sir, the time is {}", now.format("%H:%M")))
        .await;
}

pub(super) async fn date(ctx: &mut Context) {
    let today = ctx.services.clock.now();
    ctx.respond(&format!("Today is {}", today.format("%B %d, %Y")))
        .await;
}

pub(super) async fn weather(transcript: &str, ctx: &mut Context) {
    let location = weather_location(transcript);
    tracing::debug!(location = ?location, "fetching weather");

    let report = ctx.services.weather.report(location.as_deref()).await;
    match report {
        Ok(report) => ctx.respond(&report).await,
        Err(e) => {
            tracing::warn!(error = %e, "weather lookup failed");
            ctx.respond("Sorry, I couldn't fetch the weather right now")
                .await;
        }
    }
}

pub(super) async fn calculate(transcript: &str, ctx: &mut Context) {
    let expression = calculator::to_expression(transcript);

    match calculator::evaluate(&expression) {
        Ok(value) => {
            tracing::debug!(expression, value, "calculated");
            let answer = calculator::format_number(value);
            ctx.respond(&format!("The answer is {answer}")).await;
        }
        Err(e) => {
            tracing::debug!(expression, error = %e, "calculation rejected");
            ctx.respond("Sorry, I couldn't calculate that").await;
        }
    }
}

/// Words after "in", without trailing punctuation
fn weather_location(transcript: &str) -> Option<String> {
    let words: Vec<&str> = transcript.split_whitespace().collect();
    let pos = words.iter().position(|w| *w == "in")?;

    let location = words[pos + 1..]
        .join(" ")
        .trim_end_matches(|c: char| c.is_ascii_punctuation())
        .trim()
        .to_string();

    (!location.is_empty()).then_some(location)
}
