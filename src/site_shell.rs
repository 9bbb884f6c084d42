use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use js_sys::{Date, Object, Reflect};
use memorybook_core::site::{
    check_family_login, gated_destination, initial_theme, is_logged_in, member_url, ThemeMode,
    HOME_PATH, INVALID_CREDENTIALS_MESSAGE,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, HtmlElement, HtmlInputElement};

use crate::app_router::{self, PageKind};
use crate::app_runtime;
use crate::debug_log::DebugLog;
use crate::dom;
use crate::persisted;

const CLOCK_TICK_MS: u32 = 1_000;
const CLOCK_LOCALE: &str = "en-US";
const CLASS_HIDDEN: &str = "hidden";
const THEME_ATTR: &str = "data-theme";

thread_local! {
    static SHELL: RefCell<Option<SiteShell>> = RefCell::new(None);
}

struct SiteShell {
    _clock: Option<Interval>,
    _listeners: Vec<EventListener>,
}

fn clock_options() -> Object {
    let options = Object::new();
    let fields = [
        ("month", "short"),
        ("day", "2-digit"),
        ("year", "numeric"),
        ("hour", "numeric"),
        ("minute", "2-digit"),
        ("timeZoneName", "short"),
    ];
    for (key, value) in fields {
        let _ = Reflect::set(&options, &JsValue::from_str(key), &JsValue::from_str(value));
    }
    options
}

pub(crate) fn clock_text(date: &Date) -> String {
    date.to_locale_string(CLOCK_LOCALE, &clock_options()).into()
}

fn start_clock() -> Option<Interval> {
    let target = dom::by_id::<Element>("datetime")?;
    let update = move || {
        target.set_text_content(Some(&clock_text(&Date::new_0())));
    };
    update();
    Some(Interval::new(CLOCK_TICK_MS, update))
}

fn apply_initial_theme() {
    let Some(root) = dom::document().and_then(|document| document.document_element()) else {
        return;
    };
    let saved = persisted::saved_theme();
    if let Some(theme) = initial_theme(saved.as_deref(), app_router::prefers_dark_scheme()) {
        let _ = root.set_attribute(THEME_ATTR, &theme);
    }
}

fn toggle_theme() -> Option<ThemeMode> {
    let root = dom::document()?.document_element()?;
    let next = ThemeMode::next_from_attr(root.get_attribute(THEME_ATTR).as_deref());
    let _ = root.set_attribute(THEME_ATTR, next.as_attr());
    persisted::save_theme(next);
    Some(next)
}

fn toggle_member_body(header: &Element) {
    let Some(body) = header
        .next_element_sibling()
        .and_then(|sibling| sibling.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    let style = body.style();
    let shown = style.get_property_value("display").unwrap_or_default() == "flex";
    let _ = style.set_property("display", if shown { "none" } else { "flex" });
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn require_login(path: &str) {
    let logged_in = is_logged_in(persisted::auth_flag().as_deref());
    app_router::navigate(&gated_destination(logged_in, path));
}

fn input_value(id: &str) -> String {
    dom::by_id::<HtmlInputElement>(id)
        .map(|input| input.value())
        .unwrap_or_default()
}

fn bind_common(log: DebugLog, listeners: &mut Vec<EventListener>) {
    if let (Some(button), Some(menu)) = (
        dom::by_id::<Element>("menuBtn"),
        dom::by_id::<Element>("menu"),
    ) {
        listeners.push(EventListener::new(&button, "click", move |_event| {
            let _ = menu.class_list().toggle(CLASS_HIDDEN);
        }));
    }

    if let Some(toggle) = dom::by_id::<Element>("themeToggle") {
        listeners.push(EventListener::new(&toggle, "click", move |_event| {
            if let Some(mode) = toggle_theme() {
                log.note(&format!("theme {}", mode.as_attr()));
            }
        }));
    }

    for header in dom::query_all(".member-header") {
        let target = header.clone();
        listeners.push(EventListener::new(&header, "click", move |_event| {
            toggle_member_body(&target);
        }));
    }
}

/// Home page: member links go through the family login modal.
fn bind_home(log: DebugLog, listeners: &mut Vec<EventListener>) {
    let modal = dom::by_id::<Element>("authModal");
    let pending = Rc::new(RefCell::new(None::<String>));

    for visit in dom::query_all(".visit") {
        let modal = modal.clone();
        let pending = Rc::clone(&pending);
        listeners.push(EventListener::new(&visit, "click", move |event: &Event| {
            let subdomain = event_element(event)
                .and_then(|element| dom::closest_attr(&element, ".member", "data-subdomain"));
            log.detail("visit", &subdomain);
            *pending.borrow_mut() = subdomain;
            if let Some(modal) = modal.as_ref() {
                dom::set_class(modal, CLASS_HIDDEN, false);
            }
        }));
    }

    if let Some(login) = dom::by_id::<Element>("loginBtn") {
        listeners.push(EventListener::new(&login, "click", move |_event| {
            if !check_family_login(&input_value("username"), &input_value("password")) {
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(INVALID_CREDENTIALS_MESSAGE);
                }
                return;
            }
            if let Some(modal) = modal.as_ref() {
                dom::set_class(modal, CLASS_HIDDEN, true);
            }
            match pending.borrow().as_deref() {
                Some(subdomain) => app_router::navigate(&member_url(subdomain)),
                None => log.warn("login without a selected member"),
            }
        }));
    }
}

/// Member pages: profile links and the home link require the stored login flag.
fn bind_site(log: DebugLog, listeners: &mut Vec<EventListener>) {
    for visit in dom::query_all(".visit") {
        listeners.push(EventListener::new(&visit, "click", move |event: &Event| {
            let Some(profile) = event_element(event)
                .and_then(|element| dom::closest_attr(&element, ".member", "data-profile"))
            else {
                log.warn("visit without a profile path");
                return;
            };
            require_login(&profile);
        }));
    }

    if let Some(home) = dom::by_id::<Element>("homeLink") {
        listeners.push(EventListener::new(&home, "click", move |event: &Event| {
            event.prevent_default();
            require_login(HOME_PATH);
        }));
    }
}

pub(crate) fn run() {
    let config = app_runtime::page_config();
    let log = DebugLog::for_scope("site");
    apply_initial_theme();
    let clock = start_clock();
    let mut listeners = Vec::new();
    bind_common(log, &mut listeners);
    match config.kind {
        PageKind::Home => bind_home(log, &mut listeners),
        _ => bind_site(log, &mut listeners),
    }
    log.detail("listeners", &listeners.len());
    SHELL.with(|slot| {
        *slot.borrow_mut() = Some(SiteShell {
            _clock: clock,
            _listeners: listeners,
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn clock_uses_short_month() {
        let date = Date::new_with_year_month_day(2024, 0, 15);
        let text = clock_text(&date);
        assert!(text.starts_with("Jan 15, 2024"), "unexpected clock text {text}");
    }

    #[wasm_bindgen_test]
    fn member_body_toggles_display() {
        let document = dom::document().expect("document available");
        let wrapper = document.create_element("div").expect("wrapper");
        let header = document.create_element("button").expect("header");
        let body = document.create_element("div").expect("body");
        wrapper.append_child(&header).expect("append header");
        wrapper.append_child(&body).expect("append body");
        let body: HtmlElement = body.dyn_into().expect("html element");

        toggle_member_body(&header);
        assert_eq!(body.style().get_property_value("display").ok().as_deref(), Some("flex"));
        toggle_member_body(&header);
        assert_eq!(body.style().get_property_value("display").ok().as_deref(), Some("none"));
    }
}
