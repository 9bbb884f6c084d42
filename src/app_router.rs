use web_sys::{Document, UrlSearchParams};

use memorybook_core::ContentMode;

const DEBUG_PARAM: &str = "debug";
const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PageKind {
    Grace,
    Snake,
    Home,
    Site,
}

impl PageKind {
    pub(crate) fn from_attr(value: &str) -> Option<Self> {
        match value.trim() {
            "grace" => Some(PageKind::Grace),
            "snake" => Some(PageKind::Snake),
            "home" => Some(PageKind::Home),
            "site" => Some(PageKind::Site),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PageConfig {
    pub(crate) kind: PageKind,
    pub(crate) content_mode: ContentMode,
    pub(crate) start_unlocked: bool,
    pub(crate) debug: bool,
    pub(crate) reduced_motion: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            kind: PageKind::Site,
            content_mode: ContentMode::Public,
            start_unlocked: false,
            debug: false,
            reduced_motion: false,
        }
    }
}

pub(crate) fn load_page_config() -> PageConfig {
    let Some(window) = web_sys::window() else {
        return PageConfig::default();
    };
    let Some(document) = window.document() else {
        return PageConfig::default();
    };
    let body = document.body();
    let body_attr = |name: &str| body.as_ref().and_then(|body| body.get_attribute(name));
    let kind = body_attr("data-app")
        .as_deref()
        .and_then(PageKind::from_attr)
        .unwrap_or_else(|| detect_page_kind(&document));
    let search = window.location().search().unwrap_or_default();
    PageConfig {
        kind,
        content_mode: ContentMode::from_page_attr(body_attr("data-page").as_deref()),
        start_unlocked: body_attr("data-start").as_deref() == Some("unlocked"),
        debug: debug_flag(&search),
        reduced_motion: media_matches(REDUCED_MOTION_QUERY),
    }
}

/// Pages without `data-app` are recognized by their mount points.
fn detect_page_kind(document: &Document) -> PageKind {
    let has = |id: &str| document.get_element_by_id(id).is_some();
    if has("answerForm") || has("tileArea") {
        PageKind::Grace
    } else if has("gameCanvas") {
        PageKind::Snake
    } else if has("authModal") {
        PageKind::Home
    } else {
        PageKind::Site
    }
}

pub(crate) fn debug_flag(search: &str) -> bool {
    let Ok(params) = UrlSearchParams::new_with_str(search) else {
        return false;
    };
    params.get(DEBUG_PARAM).as_deref() == Some("1")
}

pub(crate) fn prefers_dark_scheme() -> bool {
    media_matches(DARK_SCHEME_QUERY)
}

fn media_matches(query: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.match_media(query).ok().flatten())
        .map(|list| list.matches())
        .unwrap_or(false)
}

pub(crate) fn navigate(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if window.location().set_href(url).is_err() {
        gloo::console::warn!("navigation failed", url.to_string());
    }
}
