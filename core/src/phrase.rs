use serde::Serialize;

use crate::answer::normalize_word;
use crate::tiles::Arrangement;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RevealKind {
    PawPrints,
    BearBadge,
    DadPov,
    CollagePreview,
}

impl RevealKind {
    pub const ALL: [RevealKind; 4] = [
        RevealKind::PawPrints,
        RevealKind::BearBadge,
        RevealKind::DadPov,
        RevealKind::CollagePreview,
    ];

    pub fn trigger_phrase(self) -> &'static str {
        match self {
            RevealKind::PawPrints => "crazy bear",
            RevealKind::BearBadge => "bear gracie",
            RevealKind::DadPov => "gracie crazy",
            RevealKind::CollagePreview => "gracie girl",
        }
    }

    pub fn from_phrase(phrase: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.trigger_phrase() == phrase)
    }

    /// Clear delay for transient reveals; `None` means it stays until replaced.
    pub fn duration_ms(self) -> Option<u32> {
        match self {
            RevealKind::PawPrints | RevealKind::BearBadge => Some(2_000),
            RevealKind::DadPov => Some(2_400),
            RevealKind::CollagePreview => None,
        }
    }

    pub fn badge_text(self) -> &'static str {
        match self {
            RevealKind::PawPrints => "A soft rumble echoes across the page.",
            RevealKind::BearBadge => "Bear avatar appears near the console.",
            RevealKind::DadPov => "Dad\u{2019}s POV highlighted.",
            RevealKind::CollagePreview => "Preview collage revealed.",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RowPhrases {
    pub row_one: String,
    pub row_two: String,
}

impl RowPhrases {
    pub fn rows(&self) -> [&str; 2] {
        [self.row_one.as_str(), self.row_two.as_str()]
    }
}

pub fn row_phrases(arrangement: &Arrangement) -> RowPhrases {
    let [a, b, c, d] = arrangement.words().map(normalize_word);
    RowPhrases {
        row_one: format!("{a} {b}").trim().to_string(),
        row_two: format!("{c} {d}").trim().to_string(),
    }
}

/// Reveals fired by the current arrangement, row one first.
pub fn evaluate(arrangement: &Arrangement) -> Vec<RevealKind> {
    let phrases = row_phrases(arrangement);
    phrases
        .rows()
        .into_iter()
        .filter_map(RevealKind::from_phrase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::Answer;

    fn eval(words: [&str; 4]) -> Vec<RevealKind> {
        evaluate(&Arrangement::initialize(&words, &Answer::canonical()))
    }

    #[test]
    fn crazy_bear_fires_paw_prints_only() {
        assert_eq!(eval(["crazy", "bear", "x", "y"]), vec![RevealKind::PawPrints]);
    }

    #[test]
    fn both_rows_fire_in_order() {
        assert_eq!(
            eval(["gracie", "girl", "bear", "gracie"]),
            vec![RevealKind::CollagePreview, RevealKind::BearBadge]
        );
    }

    #[test]
    fn same_kind_can_fire_twice() {
        assert_eq!(
            eval(["gracie", "crazy", "gracie", "crazy"]),
            vec![RevealKind::DadPov, RevealKind::DadPov]
        );
    }

    #[test]
    fn answer_order_fires_nothing() {
        assert!(eval(["crazy", "girl", "gracie", "bear"]).is_empty());
    }

    #[test]
    fn phrases_are_normalized() {
        let arr = Arrangement::initialize(&["CRAZY", " Bear "], &Answer::canonical());
        let phrases = row_phrases(&arr);
        assert_eq!(phrases.row_one, "crazy bear");
        assert_eq!(phrases.row_two, "gracie bear");
    }

    #[test]
    fn trigger_table_round_trips() {
        for kind in RevealKind::ALL {
            assert_eq!(RevealKind::from_phrase(kind.trigger_phrase()), Some(kind));
        }
        assert_eq!(RevealKind::from_phrase("girl gracie"), None);
    }

    #[test]
    fn only_collage_is_persistent() {
        assert_eq!(RevealKind::CollagePreview.duration_ms(), None);
        assert_eq!(RevealKind::DadPov.duration_ms(), Some(2_400));
        assert_eq!(RevealKind::PawPrints.duration_ms(), Some(2_000));
    }
}
