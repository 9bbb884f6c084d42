use crate::answer::{Answer, WORD_COUNT};
use crate::content::{ChapterSummary, CollageTile, ContentDocument, LoadError, COLLAGE_CHAPTER_KEY};
use crate::gate::{GateController, GateState, GuessOutcome, UnlockMode};
use crate::phrase::{evaluate, row_phrases, RevealKind, RowPhrases};
use crate::reveal::{RevealSchedule, RevealTicket};
use crate::tiles::{parse_ui_index, Arrangement};
use crate::viewer::{ChapterViewer, ModalView, ModalViewState};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    pub answer: Answer,
    pub start_unlocked: bool,
    pub collage_chapter: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            answer: Answer::canonical(),
            start_unlocked: false,
            collage_chapter: COLLAGE_CHAPTER_KEY.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reveal {
    pub kind: RevealKind,
    pub ticket: RevealTicket,
    pub collage: Vec<CollageTile>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardEvent {
    GuessRejected { attempts: u32, show_hint: bool },
    Unlocked { mode: UnlockMode },
    ArrangementChanged,
    Revealed(Reveal),
    RevealCleared(RevealKind),
    ChaptersReady,
    ContentFailed(LoadError),
    ModalChanged,
    ModalClosed,
}

/// Session state for one Grace page load. Every mutation goes through a
/// method here and reports what changed as `BoardEvent`s.
#[derive(Clone, Debug)]
pub struct PuzzleBoard {
    gate: GateController,
    arrangement: Option<Arrangement>,
    reveals: RevealSchedule,
    viewer: ChapterViewer,
    collage_chapter: String,
    start_unlocked: bool,
    last_phrases: Option<RowPhrases>,
    collage: Vec<CollageTile>,
}

impl PuzzleBoard {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            gate: GateController::new(config.answer),
            arrangement: None,
            reveals: RevealSchedule::new(),
            viewer: ChapterViewer::new(),
            collage_chapter: config.collage_chapter,
            start_unlocked: config.start_unlocked,
            last_phrases: None,
            collage: Vec::new(),
        }
    }

    pub fn start(&mut self) -> Vec<BoardEvent> {
        if self.start_unlocked {
            self.unlock_bypass()
        } else {
            Vec::new()
        }
    }

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    pub fn answer(&self) -> &Answer {
        self.gate.answer()
    }

    pub fn should_show_hint(&self) -> bool {
        self.gate.should_show_hint()
    }

    pub fn arrangement(&self) -> Option<&Arrangement> {
        self.arrangement.as_ref()
    }

    pub fn last_phrases(&self) -> Option<&RowPhrases> {
        self.last_phrases.as_ref()
    }

    /// Tiles from the most recent collage reveal.
    pub fn collage_tiles(&self) -> &[CollageTile] {
        &self.collage
    }

    pub fn viewer(&self) -> &ChapterViewer {
        &self.viewer
    }

    pub fn modal_state(&self) -> &ModalViewState {
        self.viewer.state()
    }

    pub fn modal_view(&self) -> Option<ModalView<'_>> {
        self.viewer.current_view()
    }

    pub fn summaries<S: AsRef<str>>(&self, slot_keys: &[S]) -> Vec<ChapterSummary> {
        self.viewer.summaries(slot_keys)
    }

    pub fn reveal_active(&self, kind: RevealKind) -> bool {
        self.reveals.is_active(kind)
    }

    pub fn submit_guess<S: AsRef<str>>(&mut self, inputs: &[S]) -> Vec<BoardEvent> {
        match self.gate.submit_guess(inputs) {
            GuessOutcome::Unlocked { seed } => self.seed(&seed, UnlockMode::Guessed),
            GuessOutcome::Rejected { attempts } => vec![BoardEvent::GuessRejected {
                attempts,
                show_hint: self.gate.should_show_hint(),
            }],
            GuessOutcome::Ignored => Vec::new(),
        }
    }

    pub fn unlock_bypass(&mut self) -> Vec<BoardEvent> {
        match self.gate.unlock_bypass() {
            Some(seed) => self.seed(&seed, UnlockMode::Bypass),
            None => Vec::new(),
        }
    }

    fn seed(&mut self, words: &[String; WORD_COUNT], mode: UnlockMode) -> Vec<BoardEvent> {
        self.arrangement = Some(Arrangement::initialize(words, self.gate.answer()));
        let mut events = vec![BoardEvent::Unlocked { mode }, BoardEvent::ArrangementChanged];
        events.extend(self.evaluate_phrases());
        events
    }

    pub fn swap(&mut self, from: i64, to: i64) -> Vec<BoardEvent> {
        let Some(arrangement) = self.arrangement.as_mut() else {
            return Vec::new();
        };
        if !arrangement.swap(from, to) {
            return Vec::new();
        }
        let mut events = vec![BoardEvent::ArrangementChanged];
        events.extend(self.evaluate_phrases());
        events
    }

    /// Swap driven by raw UI values (drag payloads, `<select>` values).
    pub fn swap_ui(&mut self, from: &str, to: &str) -> Vec<BoardEvent> {
        match (parse_ui_index(from), parse_ui_index(to)) {
            (Some(from), Some(to)) => self.swap(from, to),
            _ => Vec::new(),
        }
    }

    fn evaluate_phrases(&mut self) -> Vec<BoardEvent> {
        let Some(arrangement) = self.arrangement.as_ref() else {
            return Vec::new();
        };
        let kinds = evaluate(arrangement);
        self.last_phrases = Some(row_phrases(arrangement));
        let mut events = Vec::with_capacity(kinds.len());
        for kind in kinds {
            let collage = if kind == RevealKind::CollagePreview {
                // Nothing to show until the document arrives.
                let Some(tiles) = self.viewer.collage(&self.collage_chapter) else {
                    continue;
                };
                self.collage = tiles.clone();
                tiles
            } else {
                Vec::new()
            };
            let ticket = self.reveals.start(kind);
            events.push(BoardEvent::Revealed(Reveal {
                kind,
                ticket,
                collage,
            }));
        }
        events
    }

    pub fn expire_reveal(&mut self, ticket: RevealTicket) -> Vec<BoardEvent> {
        if self.reveals.expire(ticket) {
            vec![BoardEvent::RevealCleared(ticket.kind)]
        } else {
            Vec::new()
        }
    }

    pub fn content_loaded(&mut self, document: ContentDocument) -> Vec<BoardEvent> {
        self.viewer.set_document(document);
        vec![BoardEvent::ChaptersReady]
    }

    pub fn content_failed(&mut self, error: LoadError) -> Vec<BoardEvent> {
        self.viewer.record_load_failure(error.clone());
        vec![BoardEvent::ContentFailed(error)]
    }

    pub fn open_chapter(&mut self, key: &str) -> Vec<BoardEvent> {
        if self.viewer.open_chapter(key) {
            vec![BoardEvent::ModalChanged]
        } else {
            Vec::new()
        }
    }

    pub fn next_item(&mut self) -> Vec<BoardEvent> {
        if self.viewer.next() {
            vec![BoardEvent::ModalChanged]
        } else {
            Vec::new()
        }
    }

    pub fn prev_item(&mut self) -> Vec<BoardEvent> {
        if self.viewer.prev() {
            vec![BoardEvent::ModalChanged]
        } else {
            Vec::new()
        }
    }

    pub fn close_modal(&mut self) -> Vec<BoardEvent> {
        if self.viewer.close() {
            vec![BoardEvent::ModalClosed]
        } else {
            Vec::new()
        }
    }
}

impl Default for PuzzleBoard {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_unlocked_uses_bypass() {
        let mut board = PuzzleBoard::new(BoardConfig {
            start_unlocked: true,
            ..BoardConfig::default()
        });
        let events = board.start();
        assert_eq!(
            events[..2],
            [
                BoardEvent::Unlocked {
                    mode: UnlockMode::Bypass
                },
                BoardEvent::ArrangementChanged
            ]
        );
        assert_eq!(
            board.arrangement().map(Arrangement::words),
            Some(["crazy", "girl", "gracie", "bear"])
        );
    }

    #[test]
    fn locked_start_emits_nothing() {
        let mut board = PuzzleBoard::default();
        assert!(board.start().is_empty());
        assert!(board.arrangement().is_none());
    }

    #[test]
    fn swap_before_unlock_is_ignored() {
        let mut board = PuzzleBoard::default();
        assert!(board.swap(0, 1).is_empty());
        assert!(board.swap_ui("0", "1").is_empty());
    }

    #[test]
    fn swap_ui_ignores_garbage() {
        let mut board = PuzzleBoard::default();
        board.unlock_bypass();
        assert!(board.swap_ui("zero", "1").is_empty());
        assert!(board.swap_ui("-1", "1").is_empty());
        assert_eq!(board.swap_ui("0", "3")[0], BoardEvent::ArrangementChanged);
    }

    #[test]
    fn collage_skipped_until_loaded() {
        let mut board = PuzzleBoard::default();
        board.unlock_bypass();
        // crazy girl gracie bear -> gracie girl crazy bear
        let events = board.swap(0, 2);
        let kinds: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                BoardEvent::Revealed(reveal) => Some(reveal.kind),
                _ => None,
            })
            .collect();
        assert_eq!(kinds, vec![RevealKind::PawPrints]);
        assert!(!board.reveal_active(RevealKind::CollagePreview));
    }

    #[test]
    fn reveal_expiry_round_trip() {
        let mut board = PuzzleBoard::default();
        board.unlock_bypass();
        let events = board.swap(1, 3);
        let Some(BoardEvent::Revealed(reveal)) = events.last().cloned() else {
            panic!("expected a reveal, got {events:?}");
        };
        assert_eq!(reveal.kind, RevealKind::PawPrints);
        assert!(board.reveal_active(RevealKind::PawPrints));
        assert_eq!(
            board.expire_reveal(reveal.ticket),
            vec![BoardEvent::RevealCleared(RevealKind::PawPrints)]
        );
        assert!(board.expire_reveal(reveal.ticket).is_empty());
    }

    #[test]
    fn close_is_reported_once() {
        let mut board = PuzzleBoard::default();
        board.content_loaded(ContentDocument::from_json(r#"{"chapters":{"a":{}}}"#).unwrap());
        assert_eq!(board.open_chapter("a"), vec![BoardEvent::ModalChanged]);
        assert_eq!(board.close_modal(), vec![BoardEvent::ModalClosed]);
        assert!(board.close_modal().is_empty());
    }
}
