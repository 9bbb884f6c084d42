use serde::Serialize;

use crate::content::{ChapterSummary, CollageTile, ContentDocument, Item, LoadError};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ModalViewState {
    pub active_chapter_key: Option<String>,
    pub active_index: usize,
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalView<'a> {
    pub heading: String,
    pub item: Option<&'a Item>,
    pub index: usize,
    pub count: usize,
}

/// Loaded chapters plus the paginated modal over one of them.
#[derive(Clone, Debug, Default)]
pub struct ChapterViewer {
    document: Option<ContentDocument>,
    load_error: Option<LoadError>,
    state: ModalViewState,
}

impl ChapterViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_document(&mut self, document: ContentDocument) {
        self.document = Some(document);
        self.load_error = None;
    }

    pub fn record_load_failure(&mut self, error: LoadError) {
        self.load_error = Some(error);
    }

    pub fn document(&self) -> Option<&ContentDocument> {
        self.document.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        self.load_error.as_ref()
    }

    pub fn state(&self) -> &ModalViewState {
        &self.state
    }

    pub fn summaries<S: AsRef<str>>(&self, slot_keys: &[S]) -> Vec<ChapterSummary> {
        self.document
            .as_ref()
            .map(|doc| doc.summaries(slot_keys))
            .unwrap_or_default()
    }

    /// Collage tiles, or `None` while no document is loaded.
    pub fn collage(&self, chapter_key: &str) -> Option<Vec<CollageTile>> {
        self.document.as_ref().map(|doc| doc.collage(chapter_key))
    }

    pub fn open_chapter(&mut self, key: &str) -> bool {
        let Some(doc) = self.document.as_ref() else {
            return false;
        };
        if doc.chapter(key).is_none() {
            return false;
        }
        self.state = ModalViewState {
            active_chapter_key: Some(key.to_string()),
            active_index: 0,
            visible: true,
        };
        true
    }

    pub fn next(&mut self) -> bool {
        self.step(1)
    }

    pub fn prev(&mut self) -> bool {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> bool {
        let count = self.active_item_count();
        if count == 0 {
            return false;
        }
        let current = self.state.active_index.min(count - 1) as isize;
        let next = (current + delta).rem_euclid(count as isize);
        self.state.active_index = next as usize;
        true
    }

    fn active_item_count(&self) -> usize {
        let Some(key) = self.state.active_chapter_key.as_deref() else {
            return 0;
        };
        self.document
            .as_ref()
            .and_then(|doc| doc.chapter(key))
            .map(|chapter| chapter.items.len())
            .unwrap_or(0)
    }

    pub fn current_view(&self) -> Option<ModalView<'_>> {
        let key = self.state.active_chapter_key.as_deref()?;
        let chapter = self.document.as_ref()?.chapter(key)?;
        let count = chapter.items.len();
        let index = self.state.active_index.min(count.saturating_sub(1));
        let item = chapter.items.get(index);
        let heading = match item {
            Some(item) => format!("{}: {}", chapter.title, item.title),
            None => chapter.title.clone(),
        };
        Some(ModalView {
            heading,
            item,
            index,
            count,
        })
    }

    pub fn close(&mut self) -> bool {
        let was_visible = self.state.visible;
        self.state.visible = false;
        was_visible
    }
}
