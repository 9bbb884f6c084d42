pub mod answer;
pub mod board;
pub mod content;
pub mod gate;
pub mod phrase;
pub mod reveal;
pub mod rng;
pub mod site;
pub mod snake;
pub mod tiles;
pub mod viewer;

pub use answer::{normalize_word, Answer, ANSWER_WORDS, WORD_COUNT};
pub use board::{BoardConfig, BoardEvent, PuzzleBoard, Reveal};
pub use content::{
    ChapterSummary, CollageTile, ContentDocument, ContentMode, Item, LoadError, COLLAGE_CHAPTER_KEY,
};
pub use gate::{GateController, GateState, GuessOutcome, UnlockMode, HINT_ATTEMPT_THRESHOLD};
pub use phrase::{evaluate, row_phrases, RevealKind, RowPhrases};
pub use reveal::{RevealSchedule, RevealTicket};
pub use snake::{Cell, Direction, SnakeGame, TickOutcome};
pub use tiles::{parse_ui_index, Arrangement, Tile, TILE_COUNT};
pub use viewer::{ChapterViewer, ModalView, ModalViewState};
