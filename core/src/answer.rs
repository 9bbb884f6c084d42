pub const WORD_COUNT: usize = 4;
pub const ANSWER_WORDS: [&str; WORD_COUNT] = ["crazy", "girl", "gracie", "bear"];

pub fn normalize_word(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// The four words that open the gate, stored normalized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Answer {
    words: [String; WORD_COUNT],
}

impl Answer {
    pub fn new(words: [&str; WORD_COUNT]) -> Self {
        Self {
            words: words.map(normalize_word),
        }
    }

    pub fn canonical() -> Self {
        Self::new(ANSWER_WORDS)
    }

    pub fn words(&self) -> &[String; WORD_COUNT] {
        &self.words
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn matches(&self, guess: &[String; WORD_COUNT]) -> bool {
        self.words.iter().zip(guess.iter()).all(|(want, got)| want == got)
    }

    /// Normalized word for a position, falling back to the answer word when blank.
    pub fn seed_word(&self, index: usize, raw: Option<&str>) -> String {
        let normalized = raw.map(normalize_word).unwrap_or_default();
        if normalized.is_empty() {
            self.word(index).unwrap_or_default().to_string()
        } else {
            normalized
        }
    }
}

impl Default for Answer {
    fn default() -> Self {
        Self::canonical()
    }
}

pub fn normalize_inputs<S: AsRef<str>>(inputs: &[S]) -> [String; WORD_COUNT] {
    std::array::from_fn(|index| {
        inputs
            .get(index)
            .map(|value| normalize_word(value.as_ref()))
            .unwrap_or_default()
    })
}
