use memorybook_core::site::{ThemeMode, AUTH_STORAGE_KEY, THEME_STORAGE_KEY};
use web_sys::Storage;

fn local_storage() -> Option<Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

pub(crate) fn get_item(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

pub(crate) fn set_item(key: &str, value: &str) {
    let Some(storage) = local_storage() else {
        gloo::console::warn!("storage unavailable");
        return;
    };
    if storage.set_item(key, value).is_err() {
        gloo::console::warn!("storage set failed", key.to_string());
    }
}

pub(crate) fn saved_theme() -> Option<String> {
    get_item(THEME_STORAGE_KEY)
}

pub(crate) fn save_theme(mode: ThemeMode) {
    set_item(THEME_STORAGE_KEY, mode.as_attr());
}

pub(crate) fn auth_flag() -> Option<String> {
    get_item(AUTH_STORAGE_KEY)
}
