//! Shared test utilities
//!
//! Scripted stand-ins for the microphone, recognizer, speaker and the other
//! collaborators, so the assistant can be driven without audio hardware or
//! network access. Each double shares its log through `Rc<RefCell<_>>` so a
//! test keeps a handle after the double is boxed into the context.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use jarvis::services::{Clock, Launcher, Translator, WeatherService};
use jarvis::voice::{AudioSource, ListenWindow, Recognizer, Speaker, SpeechCapture};
use jarvis::{Context, Error, Language, Result, Services, Session, Settings};

/// One scripted recognition result
#[derive(Debug, Clone)]
pub enum Heard {
    Text(&'static str),
    Timeout,
    NotUnderstood,
    Unavailable,
}

/// Audio source that yields a short clip per scripted listen
///
/// The recognizer decides what the clip "says"; this only models whether
/// speech started at all. Once the script runs dry it reports a device
/// failure so loops terminate.
pub struct ScriptedAudio {
    script: Rc<RefCell<VecDeque<Heard>>>,
    pub windows: Rc<RefCell<Vec<ListenWindow>>>,
}

#[async_trait(?Send)]
impl AudioSource for ScriptedAudio {
    async fn record(&mut self, window: ListenWindow) -> Result<Vec<f32>> {
        self.windows.borrow_mut().push(window);
        let front = self.script.borrow().front().cloned();
        match front {
            None => Err(Error::Audio("script exhausted".to_string())),
            Some(Heard::Timeout) => {
                self.script.borrow_mut().pop_front();
                Err(Error::ListenTimeout)
            }
            Some(_) => Ok(vec![0.1; 160]),
        }
    }
}

/// Recognizer that replays the script, logging the language hint of each call
pub struct ScriptedRecognizer {
    script: Rc<RefCell<VecDeque<Heard>>>,
    /// Results preferred for English-hinted calls, used to script a retry
    pub english_retry: Rc<RefCell<VecDeque<Heard>>>,
    pub hints: Rc<RefCell<Vec<Language>>>,
}

#[async_trait(?Send)]
impl Recognizer for ScriptedRecognizer {
    async fn recognize(&self, _wav: &[u8], language: Language) -> Result<String> {
        self.hints.borrow_mut().push(language);

        let retry = if language == Language::English {
            self.english_retry.borrow_mut().pop_front()
        } else {
            None
        };
        let next = retry.or_else(|| self.script.borrow_mut().pop_front());

        match next {
            Some(Heard::Text(text)) => Ok(text.to_string()),
            Some(Heard::NotUnderstood) | None => Err(Error::NotUnderstood),
            Some(Heard::Unavailable) => Err(Error::ServiceUnavailable("offline".to_string())),
            Some(Heard::Timeout) => Err(Error::ListenTimeout),
        }
    }
}

/// Speaker that records every line
#[derive(Default)]
pub struct RecordingSpeaker {
    pub spoken: Rc<RefCell<Vec<(String, Language)>>>,
}

#[async_trait(?Send)]
impl Speaker for RecordingSpeaker {
    async fn say(&mut self, text: &str, language: Language) -> Result<()> {
        self.spoken.borrow_mut().push((text.to_string(), language));
        Ok(())
    }
}

/// Translator that tags text with the target code, e.g. `[hi] Hello`
pub struct FakeTranslator {
    pub fail: bool,
}

#[async_trait(?Send)]
impl Translator for FakeTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String> {
        if self.fail {
            return Err(Error::ExternalApi("translation offline".to_string()));
        }
        Ok(format!("[{}] {text}", target.code()))
    }
}

/// Weather service answering from a fixed report
pub struct FakeWeather {
    pub report: Option<&'static str>,
    pub locations: Rc<RefCell<Vec<Option<String>>>>,
}

#[async_trait(?Send)]
impl WeatherService for FakeWeather {
    async fn report(&self, location: Option<&str>) -> Result<String> {
        self.locations
            .borrow_mut()
            .push(location.map(ToString::to_string));
        self.report
            .map(ToString::to_string)
            .ok_or_else(|| Error::ExternalApi("weather offline".to_string()))
    }
}

/// Launcher that records what it was asked to open
#[derive(Default)]
pub struct RecordingLauncher {
    pub opened: Rc<RefCell<Vec<String>>>,
    pub launched: Rc<RefCell<Vec<String>>>,
    pub fail: bool,
}

impl Launcher for RecordingLauncher {
    fn open(&self, target: &str) -> Result<()> {
        if self.fail {
            return Err(Error::Action("no opener".to_string()));
        }
        self.opened.borrow_mut().push(target.to_string());
        Ok(())
    }

    fn launch(&self, program: &str) -> Result<()> {
        if self.fail {
            return Err(Error::Action(format!("failed to start {program}")));
        }
        self.launched.borrow_mut().push(program.to_string());
        Ok(())
    }
}

/// Clock stuck at one instant
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Handles onto every double wired into a [`Context`]
pub struct Harness {
    pub script: Rc<RefCell<VecDeque<Heard>>>,
    pub english_retry: Rc<RefCell<VecDeque<Heard>>>,
    pub hints: Rc<RefCell<Vec<Language>>>,
    pub windows: Rc<RefCell<Vec<ListenWindow>>>,
    pub spoken: Rc<RefCell<Vec<(String, Language)>>>,
    pub opened: Rc<RefCell<Vec<String>>>,
    pub launched: Rc<RefCell<Vec<String>>>,
    pub locations: Rc<RefCell<Vec<Option<String>>>>,
}

impl Harness {
    /// Lines spoken so far, text only
    pub fn lines(&self) -> Vec<String> {
        self.spoken.borrow().iter().map(|(t, _)| t.clone()).collect()
    }

    /// Last line spoken
    pub fn last_line(&self) -> String {
        self.lines().last().cloned().unwrap_or_default()
    }
}

/// Options for [`build_context`]
pub struct Options {
    pub script: Vec<Heard>,
    pub language: Language,
    pub now: NaiveDateTime,
    pub weather: Option<&'static str>,
    pub translator_fails: bool,
    pub launcher_fails: bool,
    pub settings: Settings,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            script: Vec::new(),
            language: Language::English,
            now: at(2024, 3, 9, 14, 5),
            weather: Some("Delhi: ☀️ +31°C"),
            translator_fails: false,
            launcher_fails: false,
            settings: Settings {
                apps: BTreeMap::from([("calculator".to_string(), "gnome-calculator".to_string())]),
                ..Settings::default()
            },
        }
    }
}

/// Local date-time helper
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("valid date")
}

/// Context wired to scripted doubles, seeded for repeatable phrase picks
pub fn build_context(options: Options) -> (Context, Harness) {
    let script = Rc::new(RefCell::new(VecDeque::from(options.script)));
    let english_retry = Rc::new(RefCell::new(VecDeque::new()));
    let hints = Rc::new(RefCell::new(Vec::new()));
    let windows = Rc::new(RefCell::new(Vec::new()));

    let audio = ScriptedAudio {
        script: Rc::clone(&script),
        windows: Rc::clone(&windows),
    };
    let recognizer = ScriptedRecognizer {
        script: Rc::clone(&script),
        english_retry: Rc::clone(&english_retry),
        hints: Rc::clone(&hints),
    };
    let speaker = RecordingSpeaker::default();
    let launcher = RecordingLauncher {
        fail: options.launcher_fails,
        ..RecordingLauncher::default()
    };
    let weather = FakeWeather {
        report: options.weather,
        locations: Rc::new(RefCell::new(Vec::new())),
    };

    let harness = Harness {
        script,
        english_retry,
        hints,
        windows,
        spoken: Rc::clone(&speaker.spoken),
        opened: Rc::clone(&launcher.opened),
        launched: Rc::clone(&launcher.launched),
        locations: Rc::clone(&weather.locations),
    };

    let services = Services {
        speech: SpeechCapture::new(Box::new(audio), Box::new(recognizer)),
        speaker: Box::new(speaker),
        translator: Box::new(FakeTranslator {
            fail: options.translator_fails,
        }),
        weather: Box::new(weather),
        launcher: Box::new(launcher),
        clock: Box::new(FixedClock(options.now)),
    };

    let ctx = Context::new(
        Session::new(options.language, Some(7)),
        services,
        options.settings,
    );

    (ctx, harness)
}
