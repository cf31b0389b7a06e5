use rand::Rng;

/// Default word list (same as the original game)
const DEFAULT_WORDS: [&str; 8] = [
    "cat", "car", "tree", "house", "sun", "phone", "dog", "book",
];

/// The candidate word set for the guessing game
pub struct WordBank {
    words: Vec<String>,
}

impl Default for WordBank {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS.iter().map(|w| w.to_string()).collect())
    }
}

impl WordBank {
    /// Create a word bank from a custom list. Words are stored
    /// lowercase since guesses are compared case-insensitively.
    pub fn new(words: Vec<String>) -> Self {
        assert!(!words.is_empty(), "word bank cannot be empty");
        Self {
            words: words.into_iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Draw a word uniformly at random
    pub fn draw(&self) -> &str {
        let idx = rand::thread_rng().gen_range(0..self.words.len());
        &self.words[idx]
    }
}
