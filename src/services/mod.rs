//! External collaborators
//!
//! Each boundary the assistant talks to sits behind a trait so the
//! dispatcher and handlers can be driven by test doubles.

mod launcher;
mod translate;
mod weather;

pub use launcher::SystemLauncher;
pub use translate::{DEFAULT_TRANSLATE_URL, MyMemoryTranslator};
pub use weather::{DEFAULT_WEATHER_URL, WttrWeather};

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::{Language, Result};

/// Translates English response text
#[async_trait(?Send)]
pub trait Translator {
    /// Translate `text` from English into `target`
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint is unreachable or answers malformed data
    async fn translate(&self, text: &str, target: Language) -> Result<String>;
}

/// Fetches a one-line weather report
#[async_trait(?Send)]
pub trait WeatherService {
    /// Report for `location`, or for the caller's own location when `None`
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint is unreachable or rejects the request
    async fn report(&self, location: Option<&str>) -> Result<String>;
}

/// Opens URLs and files, launches programs
///
/// Fire-and-forget: success means the launch was handed to the OS.
pub trait Launcher {
    /// Open a URL or file with its default application
    ///
    /// # Errors
    ///
    /// Returns error if no opener could be started
    fn open(&self, target: &str) -> Result<()>;

    /// Start a program by name
    ///
    /// # Errors
    ///
    /// Returns error if the program could not be started
    fn launch(&self, program: &str) -> Result<()>;
}

/// Source of the current local time
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}
