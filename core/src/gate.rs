use crate::answer::{normalize_inputs, Answer, WORD_COUNT};

pub const HINT_ATTEMPT_THRESHOLD: u32 = 5;

pub const REJECTED_MESSAGE: &str = "Not quite. Try again with calm, steady words.";
pub const UNLOCKED_MESSAGE: &str = "Unlocked. The chapters are ready.";
pub const HINT_TEXT: &str = "Hint: Two words from a bedtime song; two words from a childhood nickname. (Hint: the song was by the Eli Young Band.)";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GateState {
    pub attempts: u32,
    pub unlocked: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnlockMode {
    Guessed,
    /// Page opened pre-unlocked; entry animation is skipped.
    Bypass,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    Unlocked { seed: [String; WORD_COUNT] },
    Rejected { attempts: u32 },
    Ignored,
}

#[derive(Clone, Debug)]
pub struct GateController {
    answer: Answer,
    state: GateState,
}

impl GateController {
    pub fn new(answer: Answer) -> Self {
        Self {
            answer,
            state: GateState::default(),
        }
    }

    pub fn answer(&self) -> &Answer {
        &self.answer
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state.unlocked
    }

    pub fn attempts(&self) -> u32 {
        self.state.attempts
    }

    pub fn submit_guess<S: AsRef<str>>(&mut self, inputs: &[S]) -> GuessOutcome {
        if self.state.unlocked {
            return GuessOutcome::Ignored;
        }
        let guess = normalize_inputs(inputs);
        if self.answer.matches(&guess) {
            self.state = GateState {
                attempts: 0,
                unlocked: true,
            };
            let seed = std::array::from_fn(|index| {
                self.answer.seed_word(index, Some(guess[index].as_str()))
            });
            GuessOutcome::Unlocked { seed }
        } else {
            self.state.attempts = self.state.attempts.saturating_add(1);
            GuessOutcome::Rejected {
                attempts: self.state.attempts,
            }
        }
    }

    /// Unlocks without validation and returns the canonical seed words.
    /// Returns `None` when the gate was already open.
    pub fn unlock_bypass(&mut self) -> Option<[String; WORD_COUNT]> {
        if self.state.unlocked {
            return None;
        }
        self.state = GateState {
            attempts: 0,
            unlocked: true,
        };
        Some(self.answer.words().clone())
    }

    pub fn should_show_hint(&self) -> bool {
        !self.state.unlocked && self.state.attempts >= HINT_ATTEMPT_THRESHOLD
    }
}

impl Default for GateController {
    fn default() -> Self {
        Self::new(Answer::canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_guess_unlocks_and_resets_attempts() {
        let mut gate = GateController::default();
        assert_eq!(
            gate.submit_guess(&["nope", "", "", ""]),
            GuessOutcome::Rejected { attempts: 1 }
        );
        let outcome = gate.submit_guess(&[" CRAZY", "Girl ", "gracie", "bear"]);
        assert_eq!(
            outcome,
            GuessOutcome::Unlocked {
                seed: ["crazy", "girl", "gracie", "bear"].map(String::from),
            }
        );
        assert_eq!(
            gate.state(),
            GateState {
                attempts: 0,
                unlocked: true
            }
        );
    }

    #[test]
    fn positional_mismatch_is_rejected() {
        let mut gate = GateController::default();
        let outcome = gate.submit_guess(&["girl", "crazy", "gracie", "bear"]);
        assert_eq!(outcome, GuessOutcome::Rejected { attempts: 1 });
        assert!(!gate.is_unlocked());
    }

    #[test]
    fn short_input_never_unlocks() {
        let mut gate = GateController::default();
        let empty: [&str; 0] = [];
        assert_eq!(gate.submit_guess(&empty), GuessOutcome::Rejected { attempts: 1 });
        assert_eq!(
            gate.submit_guess(&["crazy", "girl", "gracie"]),
            GuessOutcome::Rejected { attempts: 2 }
        );
    }

    #[test]
    fn unlocked_gate_ignores_guesses() {
        let mut gate = GateController::default();
        assert!(gate.unlock_bypass().is_some());
        let before = gate.state();
        assert_eq!(gate.submit_guess(&["x", "y", "z", "w"]), GuessOutcome::Ignored);
        assert_eq!(
            gate.submit_guess(&["crazy", "girl", "gracie", "bear"]),
            GuessOutcome::Ignored
        );
        assert_eq!(gate.state(), before);
        assert!(gate.unlock_bypass().is_none());
    }

    #[test]
    fn hint_appears_on_fifth_rejection() {
        let mut gate = GateController::default();
        for attempt in 1..=4 {
            gate.submit_guess(&["a", "b", "c", "d"]);
            assert_eq!(gate.attempts(), attempt);
            assert!(!gate.should_show_hint());
        }
        gate.submit_guess(&["a", "b", "c", "d"]);
        assert!(gate.should_show_hint());
        gate.submit_guess(&["crazy", "girl", "gracie", "bear"]);
        assert!(!gate.should_show_hint());
    }

    #[test]
    fn bypass_seeds_canonical_words() {
        let mut gate = GateController::new(Answer::new(["One", "two", "three", "four"]));
        let seed = gate.unlock_bypass();
        assert_eq!(seed, Some(["one", "two", "three", "four"].map(String::from)));
        assert_eq!(gate.attempts(), 0);
    }
}
