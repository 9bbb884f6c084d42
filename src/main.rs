mod app_router;
mod app_runtime;
mod content_loader;
mod debug_log;
mod dom;
mod grace_view;
mod page_core;
mod persisted;
mod reveal_timers;
mod site_shell;
mod snake_view;
mod tile_view;

use app_router::PageKind;

fn main() {
    console_error_panic_hook::set_once();
    let config = app_router::load_page_config();
    let kind = config.kind;
    app_runtime::set_page_config(config);
    debug_log::DebugLog::for_scope("boot").detail("page", &format!("{kind:?}"));
    match kind {
        PageKind::Grace => grace_view::run(),
        PageKind::Snake => snake_view::run(),
        PageKind::Home | PageKind::Site => site_shell::run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn runtime_config_round_trips() {
        console_error_panic_hook::set_once();
        let config = app_router::PageConfig {
            kind: PageKind::Snake,
            debug: true,
            ..app_router::PageConfig::default()
        };
        app_runtime::set_page_config(config.clone());
        assert_eq!(app_runtime::page_config(), config);
        assert!(app_runtime::debug_enabled());
        assert!(debug_log::DebugLog::for_scope("test").enabled());
    }
}
