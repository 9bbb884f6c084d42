use std::cell::{Cell as StdCell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use memorybook_core::snake::{GAME_OVER_MESSAGE, GRID_SIZE, TICK_MS};
use memorybook_core::{Direction, SnakeGame, TickOutcome};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, Event, HtmlCanvasElement, HtmlElement, KeyboardEvent, TouchEvent};

use crate::debug_log::DebugLog;
use crate::dom;

const BOARD_COLOR: &str = "#0f2a1c";
const FOOD_COLOR: &str = "#f9d65c";
const SNAKE_COLOR: &str = "#f48c1c";

thread_local! {
    static SNAKE_PAGE: RefCell<Option<SnakePage>> = RefCell::new(None);
}

struct SnakePage {
    _view: Rc<SnakeView>,
    _listeners: Vec<EventListener>,
}

struct SnakeView {
    game: RefCell<SnakeGame>,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    score: Option<Element>,
    status: Option<Element>,
    start_button: Option<HtmlElement>,
    restart_button: Option<HtmlElement>,
    timer: RefCell<Option<Interval>>,
    log: DebugLog,
}

impl SnakeView {
    fn cell_size(&self) -> f64 {
        f64::from(self.canvas.width()) / f64::from(GRID_SIZE)
    }

    fn draw(&self) {
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());
        let cell = self.cell_size();
        let ctx = &self.ctx;
        let game = self.game.borrow();

        ctx.clear_rect(0.0, 0.0, width, height);
        ctx.set_fill_style_str(BOARD_COLOR);
        ctx.fill_rect(0.0, 0.0, width, height);

        let food = game.food();
        ctx.set_fill_style_str(FOOD_COLOR);
        ctx.begin_path();
        let _ = ctx.arc(
            f64::from(food.x) * cell + cell / 2.0,
            f64::from(food.y) * cell + cell / 2.0,
            cell / 3.0,
            0.0,
            TAU,
        );
        ctx.fill();

        ctx.set_fill_style_str(SNAKE_COLOR);
        for segment in game.body() {
            ctx.fill_rect(
                f64::from(segment.x) * cell + 1.0,
                f64::from(segment.y) * cell + 1.0,
                cell - 2.0,
                cell - 2.0,
            );
        }
    }

    fn show_score(&self) {
        let score = self.game.borrow().score();
        dom::set_text(self.score.as_ref(), &score.to_string());
    }

    fn reset(&self) {
        self.game.borrow_mut().reset();
        dom::set_text(self.status.as_ref(), "");
        self.show_score();
        self.draw();
    }

    fn start(self: &Rc<Self>) {
        if !self.game.borrow_mut().start() {
            return;
        }
        dom::set_hidden(self.start_button.as_ref(), true);
        dom::set_hidden(self.restart_button.as_ref(), false);
        dom::set_text(self.status.as_ref(), "");
        let view = Rc::downgrade(self);
        let interval = Interval::new(TICK_MS, move || {
            if let Some(view) = view.upgrade() {
                view.tick();
            }
        });
        *self.timer.borrow_mut() = Some(interval);
        self.log.note("start");
    }

    fn restart(self: &Rc<Self>) {
        self.stop_timer();
        self.reset();
        self.start();
    }

    /// The interval may be the caller, so it is released after the
    /// current callback returns.
    fn stop_timer(&self) {
        if let Some(timer) = self.timer.borrow_mut().take() {
            wasm_bindgen_futures::spawn_local(async move {
                drop(timer);
            });
        }
    }

    fn tick(&self) {
        let outcome = self.game.borrow_mut().tick();
        match outcome {
            TickOutcome::Idle => return,
            TickOutcome::Crashed => {
                self.stop_timer();
                dom::set_text(self.status.as_ref(), GAME_OVER_MESSAGE);
                self.log.detail("crashed", &self.game.borrow().score());
                return;
            }
            TickOutcome::Ate { score } => {
                dom::set_text(self.score.as_ref(), &score.to_string());
            }
            TickOutcome::Moved => {}
        }
        if self.log.enabled() {
            let game = self.game.borrow();
            self.log.detail(
                "tick",
                &(game.score(), game.direction(), game.head(), TICK_MS),
            );
        }
        self.draw();
    }

    fn steer(&self, direction: Direction) {
        self.game.borrow_mut().set_direction(direction);
    }
}

fn bind_controls(view: &Rc<SnakeView>) -> Vec<EventListener> {
    let mut listeners = Vec::new();

    if let Some(button) = view.start_button.as_ref() {
        let target = Rc::downgrade(view);
        listeners.push(EventListener::new(button, "click", move |_event| {
            if let Some(view) = target.upgrade() {
                view.start();
            }
        }));
    }
    if let Some(button) = view.restart_button.as_ref() {
        let target = Rc::downgrade(view);
        listeners.push(EventListener::new(button, "click", move |_event| {
            if let Some(view) = target.upgrade() {
                view.restart();
            }
        }));
    }

    for control in dom::query_all(".control") {
        let Some(direction) = control
            .get_attribute("data-dir")
            .as_deref()
            .and_then(Direction::from_control)
        else {
            continue;
        };
        let target = Rc::downgrade(view);
        listeners.push(EventListener::new(&control, "click", move |_event| {
            if let Some(view) = target.upgrade() {
                view.steer(direction);
            }
        }));
    }

    if let Some(window) = web_sys::window() {
        let target = Rc::downgrade(view);
        listeners.push(EventListener::new(&window, "keydown", move |event: &Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let (Some(view), Some(direction)) = (target.upgrade(), Direction::from_key(&event.key()))
            else {
                return;
            };
            view.steer(direction);
        }));
    }

    let touch_start = Rc::new(StdCell::new(None::<(f64, f64)>));
    {
        let touch_start = Rc::clone(&touch_start);
        listeners.push(EventListener::new(&view.canvas, "touchstart", move |event: &Event| {
            let point = event
                .dyn_ref::<TouchEvent>()
                .and_then(|event| event.touches().get(0))
                .map(|touch| (f64::from(touch.client_x()), f64::from(touch.client_y())));
            touch_start.set(point);
        }));
    }
    {
        let target = Rc::downgrade(view);
        listeners.push(EventListener::new(&view.canvas, "touchend", move |event: &Event| {
            let Some((start_x, start_y)) = touch_start.take() else {
                return;
            };
            let Some(touch) = event
                .dyn_ref::<TouchEvent>()
                .and_then(|event| event.changed_touches().get(0))
            else {
                return;
            };
            let dx = f64::from(touch.client_x()) - start_x;
            let dy = f64::from(touch.client_y()) - start_y;
            if let Some(view) = target.upgrade() {
                view.steer(Direction::from_swipe(dx, dy));
            }
        }));
    }

    listeners
}

fn time_seed() -> u32 {
    let now = js_sys::Date::now() as u64;
    let noise = (js_sys::Math::random() * f64::from(u32::MAX)) as u32;
    (now as u32) ^ ((now >> 32) as u32) ^ noise
}

pub(crate) fn run() {
    let log = DebugLog::for_scope("snake");
    let Some(canvas) = dom::by_id::<HtmlCanvasElement>("gameCanvas") else {
        log.warn("missing #gameCanvas");
        return;
    };
    let Some(ctx) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        log.warn("2d context unavailable");
        return;
    };
    let view = Rc::new(SnakeView {
        game: RefCell::new(SnakeGame::new(time_seed())),
        canvas,
        ctx,
        score: dom::by_id("score"),
        status: dom::by_id("status"),
        start_button: dom::by_id("startBtn"),
        restart_button: dom::by_id("restartBtn"),
        timer: RefCell::new(None),
        log,
    });
    let listeners = bind_controls(&view);
    view.reset();
    SNAKE_PAGE.with(|slot| {
        *slot.borrow_mut() = Some(SnakePage {
            _view: view,
            _listeners: listeners,
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn test_view() -> Rc<SnakeView> {
        let document = dom::document().expect("document available");
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .expect("create canvas")
            .dyn_into()
            .expect("canvas element");
        canvas.set_width(420);
        canvas.set_height(420);
        let ctx = canvas
            .get_context("2d")
            .expect("context call")
            .expect("2d context")
            .dyn_into::<CanvasRenderingContext2d>()
            .expect("2d context type");
        Rc::new(SnakeView {
            game: RefCell::new(SnakeGame::new(7)),
            canvas,
            ctx,
            score: None,
            status: None,
            start_button: None,
            restart_button: None,
            timer: RefCell::new(None),
            log: DebugLog::new("snake", false),
        })
    }

    #[wasm_bindgen_test]
    fn cell_size_divides_canvas() {
        let view = test_view();
        assert_eq!(view.cell_size(), 20.0);
    }

    #[wasm_bindgen_test]
    fn start_arms_timer_once() {
        let view = test_view();
        view.reset();
        view.start();
        assert!(view.timer.borrow().is_some());
        assert!(view.game.borrow().is_running());
        view.start();
        view.stop_timer();
        assert!(view.timer.borrow().is_none());
    }

    #[wasm_bindgen_test]
    fn steering_ignores_reversal() {
        let view = test_view();
        view.start();
        view.steer(Direction::Left);
        view.tick();
        assert_eq!(view.game.borrow().direction(), Direction::Right);
        view.stop_timer();
    }
}
