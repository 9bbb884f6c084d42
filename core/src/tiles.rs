use serde::Serialize;

use crate::answer::{Answer, WORD_COUNT};

pub const TILE_COUNT: usize = WORD_COUNT;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub id: usize,
    pub word: String,
}

/// Four tiles in display order. Position is the index; ids never move with
/// the words they were created with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Arrangement {
    tiles: [Tile; TILE_COUNT],
}

impl Arrangement {
    pub fn initialize<S: AsRef<str>>(words: &[S], answer: &Answer) -> Self {
        let tiles = std::array::from_fn(|id| Tile {
            id,
            word: answer.seed_word(id, words.get(id).map(|word| word.as_ref())),
        });
        Self { tiles }
    }

    pub fn tiles(&self) -> &[Tile; TILE_COUNT] {
        &self.tiles
    }

    pub fn word_at(&self, position: usize) -> Option<&str> {
        self.tiles.get(position).map(|tile| tile.word.as_str())
    }

    pub fn words(&self) -> [&str; TILE_COUNT] {
        std::array::from_fn(|position| self.tiles[position].word.as_str())
    }

    pub fn ids(&self) -> [usize; TILE_COUNT] {
        std::array::from_fn(|position| self.tiles[position].id)
    }

    /// Exchanges two positions. Equal, negative, or out-of-range indices
    /// leave the arrangement untouched and return `false`.
    pub fn swap(&mut self, from: i64, to: i64) -> bool {
        let (Some(from), Some(to)) = (checked_position(from), checked_position(to)) else {
            return false;
        };
        if from == to {
            return false;
        }
        self.tiles.swap(from, to);
        true
    }
}

fn checked_position(index: i64) -> Option<usize> {
    usize::try_from(index).ok().filter(|index| *index < TILE_COUNT)
}

/// Parses an index coming from a drag payload or a `<select>` value.
pub fn parse_ui_index(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

pub fn swap_option_label(position: usize, word: &str) -> String {
    format!("{}: {word}", position + 1)
}
