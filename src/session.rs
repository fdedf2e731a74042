//! Per-run conversation state

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::Language;

/// Mutable state carried through one assistant run
///
/// Holds the response language and the random source used to pick canned
/// phrases. Nothing here outlives the process.
#[derive(Debug)]
pub struct Session {
    language: Language,
    rng: StdRng,
}

impl Session {
    /// Create a session, seeding the phrase picker when `seed` is given
    #[must_use]
    pub fn new(language: Language, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self { language, rng }
    }

    /// Current response language
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Switch the response language
    pub fn set_language(&mut self, language: Language) {
        if language != self.language {
            tracing::info!(from = %self.language, to = %language, "language changed");
        }
        self.language = language;
    }

    /// Pick one phrase uniformly at random
    ///
    /// Returns an empty string for an empty pool.
    pub fn pick<'a>(&mut self, pool: &[&'a str]) -> &'a str {
        pool.choose(&mut self.rng).copied().unwrap_or_default()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Language::default(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POOL: &[&str] = &["a", "b", "c", "d"];

    #[test]
    fn test_seeded_picks_repeat() {
        let mut first = Session::new(Language::English, Some(7));
        let mut second = Session::new(Language::English, Some(7));

        let a: Vec<_> = (0..16).map(|_| first.pick(POOL)).collect();
        let b: Vec<_> = (0..16).map(|_| second.pick(POOL)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_pick_stays_in_pool() {
        let mut session = Session::new(Language::English, Some(1));
        for _ in 0..32 {
            assert!(POOL.contains(&session.pick(POOL)));
        }
        assert_eq!(session.pick(&[]), "");
    }

    #[test]
    fn test_set_language() {
        let mut session = Session::default();
        assert_eq!(session.language(), Language::English);

        session.set_language(Language::French);
        assert_eq!(session.language(), Language::French);
    }
}
