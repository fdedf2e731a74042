//! Supported response languages

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A response language the assistant can speak in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// English, the base language responses are authored in
    #[default]
    English,
    Hindi,
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Japanese,
}

impl Language {
    /// Every supported language, in the order they are offered to the user
    pub const ALL: [Self; 8] = [
        Self::English,
        Self::Hindi,
        Self::Spanish,
        Self::French,
        Self::German,
        Self::Italian,
        Self::Portuguese,
        Self::Japanese,
    ];

    /// ISO 639-1 code
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::German => "de",
            Self::Italian => "it",
            Self::Portuguese => "pt",
            Self::Japanese => "ja",
        }
    }

    /// English display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
            Self::Spanish => "Spanish",
            Self::French => "French",
            Self::German => "German",
            Self::Italian => "Italian",
            Self::Portuguese => "Portuguese",
            Self::Japanese => "Japanese",
        }
    }

    /// Language tag for Deepgram, regional where a variant model exists
    #[must_use]
    pub const fn locale(self) -> &'static str {
        match self {
            Self::English => "en-IN",
            Self::Hindi => "hi",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::German => "de",
            Self::Italian => "it",
            Self::Portuguese => "pt-BR",
            Self::Japanese => "ja",
        }
    }

    /// Lower-case names a speaker might use for this language
    const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::English => &["english", "angrezi"],
            Self::Hindi => &["hindi", "हिंदी", "हिन्दी"],
            Self::Spanish => &["spanish", "español", "espanol"],
            Self::French => &["french", "français", "francais"],
            Self::German => &["german", "deutsch"],
            Self::Italian => &["italian", "italiano"],
            Self::Portuguese => &["portuguese", "português", "portugues"],
            Self::Japanese => &["japanese", "日本語", "nihongo"],
        }
    }

    /// Whether responses in this language need no translation
    #[must_use]
    pub const fn is_base(self) -> bool {
        matches!(self, Self::English)
    }

    /// Find the first supported language named anywhere in `text`
    ///
    /// `text` is expected to be lower-cased already.
    #[must_use]
    pub fn find_in(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.aliases().iter().any(|alias| text.contains(alias)))
    }

    /// Comma-separated list of display names, for prompts
    #[must_use]
    pub fn names() -> String {
        Self::ALL.map(Self::name).join(", ")
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    /// Parse a language code (`hi`) or name (`hindi`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code() == wanted || lang.aliases().contains(&wanted.as_str()))
            .ok_or_else(|| Error::Config(format!("unsupported language: {s}")))
    }
}
