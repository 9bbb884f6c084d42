use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use memorybook_core::gate::{HINT_TEXT, REJECTED_MESSAGE, UNLOCKED_MESSAGE};
use memorybook_core::{BoardConfig, BoardEvent, Reveal, RevealKind, UnlockMode};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, HtmlInputElement, HtmlSelectElement};

use crate::app_runtime;
use crate::content_loader;
use crate::debug_log::DebugLog;
use crate::dom;
use crate::page_core::{PageAction, PageCore, PageSubscription};
use crate::reveal_timers::RevealTimers;
use crate::tile_view;

const CLASS_UNLOCKED: &str = "is-unlocked";
const CLASS_REDUCE_MOTION: &str = "reduce-motion";
const CLASS_MODAL_SHOW: &str = "show";
const CHAPTER_SLOT_SELECTOR: &str = ".quadrant";
const CHAPTER_CARD_SELECTOR: &str = ".chapter-card";

thread_local! {
    static GRACE_PAGE: RefCell<Option<GracePage>> = RefCell::new(None);
}

/// Body class held while a reveal is active.
pub(crate) fn reveal_class(kind: RevealKind) -> Option<&'static str> {
    match kind {
        RevealKind::PawPrints => Some("paw-active"),
        RevealKind::BearBadge => Some("bear-active"),
        RevealKind::DadPov => Some("pov-active"),
        RevealKind::CollagePreview => None,
    }
}

struct GraceElements {
    answer_form: Option<HtmlElement>,
    inputs: Vec<HtmlInputElement>,
    feedback: Option<Element>,
    hint: Option<HtmlElement>,
    continue_link: Option<HtmlElement>,
    tile_area: Option<HtmlElement>,
    swap_from: Option<HtmlSelectElement>,
    swap_to: Option<HtmlSelectElement>,
    swap_button: Option<Element>,
    paw_prints: Option<HtmlElement>,
    collage: Option<HtmlElement>,
    modal: Option<Element>,
    modal_title: Option<Element>,
    modal_close: Option<Element>,
    modal_prev: Option<Element>,
    modal_next: Option<Element>,
    action_badge: Option<Element>,
}

impl GraceElements {
    fn lookup() -> Self {
        let modal_close = dom::document()
            .and_then(|document| document.query_selector(".modal-close").ok().flatten());
        let inputs = dom::query_all("input[data-index]")
            .into_iter()
            .filter_map(|element| element.dyn_into::<HtmlInputElement>().ok())
            .collect();
        Self {
            answer_form: dom::by_id("answerForm"),
            inputs,
            feedback: dom::by_id("feedback"),
            hint: dom::by_id("hint"),
            continue_link: dom::by_id("continueLink"),
            tile_area: dom::by_id("tileArea"),
            swap_from: dom::by_id("swapFrom"),
            swap_to: dom::by_id("swapTo"),
            swap_button: dom::by_id("swapButton"),
            paw_prints: dom::by_id("pawPrints"),
            collage: dom::by_id("collage"),
            modal: dom::by_id("modal"),
            modal_title: dom::by_id("modalTitle"),
            modal_close,
            modal_prev: dom::by_id("modalPrev"),
            modal_next: dom::by_id("modalNext"),
            action_badge: dom::by_id("actionBadge"),
        }
    }

    fn input_values(&self) -> Vec<String> {
        self.inputs.iter().map(HtmlInputElement::value).collect()
    }
}

/// Applies board events to the static Grace markup.
struct GraceView {
    core: Weak<PageCore>,
    elements: GraceElements,
    timers: RevealTimers,
    chapter_listeners: RefCell<Vec<EventListener>>,
    log: DebugLog,
}

impl GraceView {
    fn apply(&self, event: &BoardEvent) {
        match event {
            BoardEvent::GuessRejected {
                attempts,
                show_hint,
            } => {
                self.log.detail("rejected", attempts);
                dom::set_text(self.elements.feedback.as_ref(), REJECTED_MESSAGE);
                self.update_hint(*show_hint);
            }
            BoardEvent::Unlocked { mode } => self.show_unlocked(*mode),
            BoardEvent::ArrangementChanged => {
                if let Some(core) = self.core.upgrade() {
                    core.with_board(|board| {
                        self.log.detail("arrangement", &board.arrangement());
                        self.log.detail("phrases", &board.last_phrases());
                    });
                }
            }
            BoardEvent::Revealed(reveal) => self.show_reveal(reveal),
            BoardEvent::RevealCleared(kind) => {
                if let Some(class) = reveal_class(*kind) {
                    dom::set_body_class(class, false);
                }
            }
            BoardEvent::ChaptersReady => self.bind_chapters(),
            BoardEvent::ContentFailed(err) => {
                self.log.note(&format!("content unavailable: {err}"));
            }
            BoardEvent::ModalChanged => self.show_modal(),
            BoardEvent::ModalClosed => {
                if let Some(modal) = self.elements.modal.as_ref() {
                    dom::set_class(modal, CLASS_MODAL_SHOW, false);
                    let _ = modal.set_attribute("aria-hidden", "true");
                }
            }
        }
    }

    fn update_hint(&self, show: bool) {
        let Some(hint) = self.elements.hint.as_ref() else {
            return;
        };
        if show {
            hint.set_text_content(Some(HINT_TEXT));
        }
        hint.set_hidden(!show);
    }

    fn show_unlocked(&self, mode: UnlockMode) {
        self.log.detail("unlocked", &format!("{mode:?}"));
        dom::set_text(self.elements.feedback.as_ref(), UNLOCKED_MESSAGE);
        self.update_hint(false);
        dom::set_body_class(CLASS_UNLOCKED, true);
        if mode == UnlockMode::Bypass {
            dom::set_body_class(CLASS_REDUCE_MOTION, true);
        }
        dom::set_hidden(self.elements.continue_link.as_ref(), false);
        dom::set_hidden(self.elements.answer_form.as_ref(), true);
        dom::set_hidden(self.elements.tile_area.as_ref(), false);
    }

    fn show_reveal(&self, reveal: &Reveal) {
        self.log.detail("reveal", &reveal.kind);
        dom::set_text(self.elements.action_badge.as_ref(), reveal.kind.badge_text());
        match reveal.kind {
            RevealKind::PawPrints => {
                // Drop the class and force a reflow so the animation restarts.
                dom::set_body_class("paw-active", false);
                if let Some(paw_prints) = self.elements.paw_prints.as_ref() {
                    let _ = paw_prints.offset_width();
                }
                dom::set_body_class("paw-active", true);
            }
            RevealKind::CollagePreview => {
                dom::set_hidden(self.elements.collage.as_ref(), false);
            }
            kind => {
                if let Some(class) = reveal_class(kind) {
                    dom::set_body_class(class, true);
                }
            }
        }
        self.timers.schedule(self.core.clone(), reveal);
    }

    fn bind_chapters(&self) {
        let Some(core) = self.core.upgrade() else {
            return;
        };
        let mut listeners = self.chapter_listeners.borrow_mut();
        listeners.clear();
        for card in dom::query_all(CHAPTER_CARD_SELECTOR) {
            let Some(key) = dom::closest_attr(&card, CHAPTER_SLOT_SELECTOR, "data-chapter") else {
                continue;
            };
            let Some(summary) = core.with_board(|board| board.summaries(&[key.as_str()]).pop())
            else {
                continue;
            };
            if let Ok(Some(title)) = card.query_selector(".chapter-title") {
                title.set_text_content(Some(&summary.title));
            }
            if let Ok(Some(blurb)) = card.query_selector(".chapter-blurb") {
                blurb.set_text_content(Some(&summary.blurb));
            }
            let target = Rc::downgrade(&core);
            listeners.push(EventListener::new(&card, "click", move |_event| {
                if let Some(core) = target.upgrade() {
                    core.dispatch(PageAction::OpenChapter(key.clone()));
                }
            }));
        }
        self.log.detail("chapters bound", &listeners.len());
    }

    fn show_modal(&self) {
        let Some(core) = self.core.upgrade() else {
            return;
        };
        let heading = core.with_board(|board| board.modal_view().map(|view| view.heading));
        if let Some(heading) = heading {
            dom::set_text(self.elements.modal_title.as_ref(), &heading);
        }
        if let Some(modal) = self.elements.modal.as_ref() {
            dom::set_class(modal, CLASS_MODAL_SHOW, true);
            let _ = modal.set_attribute("aria-hidden", "false");
        }
    }
}

struct GracePage {
    _core: Rc<PageCore>,
    _view: Rc<GraceView>,
    _subscription: PageSubscription,
    _listeners: Vec<EventListener>,
}

fn bind_controls(core: &Rc<PageCore>, view: &Rc<GraceView>) -> Vec<EventListener> {
    let elements = &view.elements;
    let mut listeners = Vec::new();

    if let Some(form) = elements.answer_form.as_ref() {
        let target = Rc::downgrade(core);
        let reader = Rc::downgrade(view);
        listeners.push(EventListener::new(form, "submit", move |event: &Event| {
            event.prevent_default();
            let (Some(core), Some(view)) = (target.upgrade(), reader.upgrade()) else {
                return;
            };
            let values = view.elements.input_values();
            view.log.detail("validation", &values);
            core.dispatch(PageAction::SubmitGuess(values));
        }));
    }

    if let (Some(button), Some(from), Some(to)) = (
        elements.swap_button.as_ref(),
        elements.swap_from.clone(),
        elements.swap_to.clone(),
    ) {
        let target = Rc::downgrade(core);
        listeners.push(EventListener::new(button, "click", move |_event| {
            if let Some(core) = target.upgrade() {
                core.dispatch(PageAction::SwapUi {
                    from: from.value(),
                    to: to.value(),
                });
            }
        }));
    }

    let simple = [
        (elements.modal_close.as_ref(), PageAction::CloseModal),
        (elements.modal_prev.as_ref(), PageAction::PrevItem),
        (elements.modal_next.as_ref(), PageAction::NextItem),
    ];
    for (element, action) in simple {
        let Some(element) = element else {
            continue;
        };
        let target = Rc::downgrade(core);
        listeners.push(EventListener::new(element, "click", move |_event| {
            if let Some(core) = target.upgrade() {
                core.dispatch(action.clone());
            }
        }));
    }

    if let Some(modal) = elements.modal.clone() {
        let target = Rc::downgrade(core);
        let backdrop = modal.clone();
        listeners.push(EventListener::new(&modal, "click", move |event: &Event| {
            // Only clicks on the backdrop itself, not bubbled from content.
            let on_backdrop = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .map(|element| element == backdrop)
                .unwrap_or(false);
            if !on_backdrop {
                return;
            }
            if let Some(core) = target.upgrade() {
                core.dispatch(PageAction::CloseModal);
            }
        }));
    }

    listeners
}

pub(crate) fn run() {
    let config = app_runtime::page_config();
    let log = DebugLog::for_scope("grace");
    if config.reduced_motion {
        dom::set_body_class(CLASS_REDUCE_MOTION, true);
    }
    let core = PageCore::new(
        BoardConfig {
            start_unlocked: config.start_unlocked,
            ..BoardConfig::default()
        },
        log,
    );
    let view = Rc::new(GraceView {
        core: Rc::downgrade(&core),
        elements: GraceElements::lookup(),
        timers: RevealTimers::new(),
        chapter_listeners: RefCell::new(Vec::new()),
        log,
    });
    let subscriber = Rc::clone(&view);
    let subscription = core.subscribe(Rc::new(move |event: &BoardEvent| subscriber.apply(event)));
    tile_view::mount_all(&core);
    let listeners = bind_controls(&core, &view);
    content_loader::spawn_load(Rc::clone(&core), config.content_mode);

    if config.start_unlocked {
        let answer = core.with_board(|board| board.answer().clone());
        for (index, input) in view.elements.inputs.iter().enumerate() {
            if let Some(word) = answer.word(index) {
                input.set_value(word);
            }
        }
        core.dispatch(PageAction::Start);
    }
    log.note("ready");

    GRACE_PAGE.with(|slot| {
        *slot.borrow_mut() = Some(GracePage {
            _core: core,
            _view: view,
            _subscription: subscription,
            _listeners: listeners,
        });
    });
}
