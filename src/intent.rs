//! Intent dispatch
//!
//! A transcript is matched against an ordered table of keyword predicates.
//! The first rule whose predicate holds wins; no scoring, no confidence. When
//! predicates overlap ("open youtube" is also an "open" request) the earlier
//! declaration takes the transcript. That ordering is the policy, so
//! [`IntentTable::standard`] must not be reordered casually.

use crate::calculator;

/// Website reachable through an "open ..." request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    YouTube,
    Google,
    StackOverflow,
    GitHub,
    Gmail,
}

impl Site {
    /// Name used in the spoken confirmation
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::YouTube => "YouTube",
            Self::Google => "Google",
            Self::StackOverflow => "Stack Overflow",
            Self::GitHub => "GitHub",
            Self::Gmail => "Gmail",
        }
    }

    /// Address handed to the launcher
    #[must_use]
    pub const fn url(self) -> &'static str {
        match self {
            Self::YouTube => "https://youtube.com",
            Self::Google => "https://google.com",
            Self::StackOverflow => "https://stackoverflow.com",
            Self::GitHub => "https://github.com",
            Self::Gmail => "https://mail.google.com",
        }
    }

    const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::YouTube => &["open youtube"],
            Self::Google => &["open google"],
            Self::StackOverflow => &["open stackoverflow", "open stack overflow"],
            Self::GitHub => &["open github", "open git hub"],
            Self::Gmail => &["open gmail", "open my mail"],
        }
    }
}

/// Category of user request, one handler each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Exit,
    ChangeLanguage,
    Wikipedia,
    OpenSite(Site),
    Weather,
    Search,
    PlayMusic,
    Calculate,
    Reminder,
    Time,
    OpenApplication,
    Joke,
    Date,
    WhoAreYou,
    Help,
    HowAreYou,
    Thanks,
    Greeting,
    /// Nothing matched
    Unknown,
}

/// Test applied to a lower-cased transcript
#[derive(Debug, Clone, Copy)]
pub enum Predicate {
    /// Any keyword occurs as a substring
    Contains(&'static [&'static str]),
    /// Any keyword occurs as whole words ("hi" matches "hi there", not "this")
    Words(&'static [&'static str]),
    /// An operator sits between numeric operands
    Arithmetic,
}

impl Predicate {
    /// Evaluate the predicate
    #[must_use]
    pub fn matches(&self, transcript: &str) -> bool {
        match self {
            Self::Contains(keywords) => keywords.iter().any(|k| transcript.contains(k)),
            Self::Words(keywords) => {
                let words = split_words(transcript);
                keywords.iter().any(|k| contains_phrase(&words, &split_words(k)))
            }
            Self::Arithmetic => calculator::mentions_arithmetic(transcript),
        }
    }
}

/// One row of the dispatch table
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub intent: Intent,
    pub predicate: Predicate,
}

impl IntentRule {
    #[must_use]
    pub const fn new(intent: Intent, predicate: Predicate) -> Self {
        Self { intent, predicate }
    }
}

/// Ordered, immutable list of intent rules
#[derive(Debug, Clone)]
pub struct IntentTable {
    rules: Vec<IntentRule>,
}

impl IntentTable {
    /// Build a table from rules in evaluation order
    #[must_use]
    pub const fn new(rules: Vec<IntentRule>) -> Self {
        Self { rules }
    }

    /// The assistant's built-in rule order
    #[must_use]
    pub fn standard() -> Self {
        use Predicate::{Arithmetic, Contains, Words};

        let mut rules = vec![
            IntentRule::new(
                Intent::Exit,
                Contains(&["exit", "quit", "goodbye", "bye", "stop", "alvida"]),
            ),
            IntentRule::new(
                Intent::ChangeLanguage,
                Contains(&["change language", "switch language", "speak in", "bhasha"]),
            ),
            IntentRule::new(Intent::Wikipedia, Contains(&["wikipedia"])),
        ];

        rules.extend(
            [
                Site::YouTube,
                Site::Google,
                Site::StackOverflow,
                Site::GitHub,
                Site::Gmail,
            ]
            .map(|site| IntentRule::new(Intent::OpenSite(site), Contains(site.keywords()))),
        );

        rules.extend([
            IntentRule::new(Intent::Weather, Contains(&["weather", "mausam"])),
            IntentRule::new(Intent::Search, Contains(&["search", "google"])),
            IntentRule::new(Intent::PlayMusic, Contains(&["play music", "play song", "gaana"])),
            // before Time: "5 times 3" contains "time"
            IntentRule::new(Intent::Calculate, Arithmetic),
            IntentRule::new(Intent::Reminder, Contains(&["remind me", "reminder"])),
            IntentRule::new(Intent::Time, Contains(&["time", "samay"])),
            IntentRule::new(Intent::OpenApplication, Contains(&["open", "kholo"])),
            IntentRule::new(Intent::Joke, Contains(&["joke", "chutkula"])),
            IntentRule::new(Intent::Date, Contains(&["date", "tareekh"])),
            IntentRule::new(Intent::WhoAreYou, Contains(&["who are you", "what are you"])),
            IntentRule::new(Intent::Help, Contains(&["help", "what can you do"])),
            IntentRule::new(Intent::HowAreYou, Contains(&["how are you", "kaise ho"])),
            IntentRule::new(
                Intent::Thanks,
                Contains(&["thank you", "thanks", "shukriya", "dhanyavad"]),
            ),
            IntentRule::new(Intent::Greeting, Words(&["hello", "hi", "hey", "namaste"])),
        ]);

        Self::new(rules)
    }

    /// Select the intent for a lower-cased transcript
    ///
    /// Deterministic: the first matching rule wins, [`Intent::Unknown`] if
    /// none does.
    #[must_use]
    pub fn dispatch(&self, transcript: &str) -> Intent {
        let intent = self
            .rules
            .iter()
            .find(|rule| rule.predicate.matches(transcript))
            .map_or(Intent::Unknown, |rule| rule.intent);

        tracing::debug!(transcript, ?intent, "dispatched");
        intent
    }

    /// Rules in evaluation order
    #[must_use]
    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }
}

impl Default for IntentTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn split_words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .collect()
}

fn contains_phrase(words: &[&str], phrase: &[&str]) -> bool {
    !phrase.is_empty() && words.windows(phrase.len()).any(|window| window == phrase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatch(transcript: &str) -> Intent {
        IntentTable::standard().dispatch(transcript)
    }

    #[test]
    fn test_open_site_beats_generic_open() {
        assert_eq!(dispatch("open youtube"), Intent::OpenSite(Site::YouTube));
        assert_eq!(
            dispatch("please open stack overflow"),
            Intent::OpenSite(Site::StackOverflow)
        );
        assert_eq!(dispatch("open notepad"), Intent::OpenApplication);
    }

    #[test]
    fn test_calculator_beats_time() {
        assert_eq!(dispatch("what is 5 times 3"), Intent::Calculate);
        assert_eq!(dispatch("what time is it"), Intent::Time);
    }

    #[test]
    fn test_dashed_numbers_keep_their_intent() {
        assert_eq!(dispatch("remind me to take 2 pills at 9-10"), Intent::Reminder);
        assert_eq!(dispatch("tell me a joke about covid-19"), Intent::Joke);
        assert_eq!(dispatch("what is the date 2024-03-09"), Intent::Date);
        assert_eq!(dispatch("set a reminder for 5/6"), Intent::Reminder);
        assert_eq!(dispatch("what is 5/6"), Intent::Calculate);
    }

    #[test]
    fn test_exit_is_checked_first() {
        assert_eq!(dispatch("goodbye"), Intent::Exit);
        assert_eq!(dispatch("search how to exit vim"), Intent::Exit);
    }

    #[test]
    fn test_greeting_needs_whole_word() {
        assert_eq!(dispatch("hi jarvis"), Intent::Greeting);
        assert_eq!(dispatch("this is nothing"), Intent::Unknown);
    }

    #[test]
    fn test_hindi_alternates() {
        assert_eq!(dispatch("samay kya hua hai"), Intent::Time);
        assert_eq!(dispatch("ek chutkula sunao"), Intent::Joke);
        assert_eq!(dispatch("alvida"), Intent::Exit);
    }

    #[test]
    fn test_words_predicate() {
        let p = Predicate::Words(&["how are you"]);
        assert!(p.matches("jarvis, how are you?"));
        assert!(!p.matches("how are your plans"));
    }

    #[test]
    fn test_custom_table_order() {
        let table = IntentTable::new(vec![
            IntentRule::new(Intent::Joke, Predicate::Contains(&["tell"])),
            IntentRule::new(Intent::Time, Predicate::Contains(&["tell"])),
        ]);
        assert_eq!(table.dispatch("tell me"), Intent::Joke);
        assert_eq!(table.dispatch("nothing"), Intent::Unknown);

        let order: Vec<Intent> = table.rules().iter().map(|rule| rule.intent).collect();
        assert_eq!(order, vec![Intent::Joke, Intent::Time]);
    }

    #[test]
    fn test_standard_table_starts_with_exit() {
        let table = IntentTable::standard();
        assert_eq!(table.rules().first().map(|rule| rule.intent), Some(Intent::Exit));
        assert_eq!(table.rules().last().map(|rule| rule.intent), Some(Intent::Greeting));
    }
}
