use std::cell::RefCell;
use std::rc::Rc;

use memorybook_core::{
    BoardConfig, BoardEvent, ContentDocument, LoadError, PuzzleBoard, RevealTicket,
};

use crate::debug_log::DebugLog;

pub(crate) type PageSubscriber = Rc<dyn Fn(&BoardEvent)>;

#[derive(Clone, Debug)]
pub(crate) enum PageAction {
    Start,
    SubmitGuess(Vec<String>),
    UnlockBypass,
    SwapUi { from: String, to: String },
    ExpireReveal(RevealTicket),
    ContentLoaded(ContentDocument),
    ContentFailed(LoadError),
    OpenChapter(String),
    NextItem,
    PrevItem,
    CloseModal,
}

/// Owns the Grace page board. Views read through `with_board` and
/// react to the events each `dispatch` produces.
pub(crate) struct PageCore {
    board: RefCell<PuzzleBoard>,
    subscribers: Rc<RefCell<Vec<PageSubscriber>>>,
    log: DebugLog,
}

impl PageCore {
    pub(crate) fn new(config: BoardConfig, log: DebugLog) -> Rc<Self> {
        Rc::new(Self {
            board: RefCell::new(PuzzleBoard::new(config)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            log,
        })
    }

    pub(crate) fn subscribe(&self, subscriber: PageSubscriber) -> PageSubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        PageSubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    pub(crate) fn with_board<R>(&self, f: impl FnOnce(&PuzzleBoard) -> R) -> R {
        f(&self.board.borrow())
    }

    pub(crate) fn log(&self) -> DebugLog {
        self.log
    }

    pub(crate) fn dispatch(&self, action: PageAction) -> Vec<BoardEvent> {
        let events = {
            let mut board = self.board.borrow_mut();
            match action {
                PageAction::Start => board.start(),
                PageAction::SubmitGuess(inputs) => board.submit_guess(&inputs),
                PageAction::UnlockBypass => board.unlock_bypass(),
                PageAction::SwapUi { from, to } => board.swap_ui(&from, &to),
                PageAction::ExpireReveal(ticket) => board.expire_reveal(ticket),
                PageAction::ContentLoaded(document) => board.content_loaded(document),
                PageAction::ContentFailed(error) => board.content_failed(error),
                PageAction::OpenChapter(key) => board.open_chapter(&key),
                PageAction::NextItem => board.next_item(),
                PageAction::PrevItem => board.prev_item(),
                PageAction::CloseModal => board.close_modal(),
            }
        };
        for event in &events {
            self.notify_subscribers(event);
        }
        events
    }

    fn notify_subscribers(&self, event: &BoardEvent) {
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)(event);
        }
    }
}

pub(crate) struct PageSubscription {
    subscriber: PageSubscriber,
    subscribers: Rc<RefCell<Vec<PageSubscriber>>>,
}

impl Drop for PageSubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn words(list: [&str; 4]) -> Vec<String> {
        list.iter().map(|word| word.to_string()).collect()
    }

    #[wasm_bindgen_test]
    fn subscribers_see_events_in_order() {
        let core = PageCore::new(BoardConfig::default(), DebugLog::new("grace", false));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _subscription = core.subscribe(Rc::new(move |event: &BoardEvent| {
            sink.borrow_mut().push(event.clone());
        }));
        core.dispatch(PageAction::SubmitGuess(words(["crazy", "girl", "gracie", "bear"])));
        let seen = seen.borrow();
        assert!(matches!(seen[0], BoardEvent::Unlocked { .. }));
        assert_eq!(seen[1], BoardEvent::ArrangementChanged);
    }

    #[wasm_bindgen_test]
    fn dropped_subscription_stops_updates() {
        let core = PageCore::new(BoardConfig::default(), DebugLog::new("grace", false));
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let subscription = core.subscribe(Rc::new(move |_: &BoardEvent| {
            counter.set(counter.get() + 1);
        }));
        core.dispatch(PageAction::SubmitGuess(words(["a", "b", "c", "d"])));
        drop(subscription);
        core.dispatch(PageAction::SubmitGuess(words(["a", "b", "c", "d"])));
        assert_eq!(count.get(), 1);
    }

    #[wasm_bindgen_test]
    fn subscriber_can_read_board() {
        let core = PageCore::new(BoardConfig::default(), DebugLog::new("grace", false));
        let attempts = Rc::new(Cell::new(0));
        let sink = Rc::clone(&attempts);
        let reader = Rc::clone(&core);
        let _subscription = core.subscribe(Rc::new(move |_: &BoardEvent| {
            sink.set(reader.with_board(|board| board.gate_state().attempts));
        }));
        core.dispatch(PageAction::SubmitGuess(words(["a", "b", "c", "d"])));
        assert_eq!(attempts.get(), 1);
    }
}
