use std::cell::RefCell;

use crate::app_router::{self, PageConfig};

thread_local! {
    static PAGE_CONFIG: RefCell<Option<PageConfig>> = RefCell::new(None);
}

pub(crate) fn set_page_config(config: PageConfig) {
    PAGE_CONFIG.with(|slot| {
        *slot.borrow_mut() = Some(config);
    });
}

pub(crate) fn page_config() -> PageConfig {
    PAGE_CONFIG
        .with(|slot| slot.borrow().clone())
        .unwrap_or_else(app_router::load_page_config)
}

pub(crate) fn debug_enabled() -> bool {
    PAGE_CONFIG.with(|slot| slot.borrow().as_ref().map(|config| config.debug).unwrap_or(false))
}
