use std::rc::Rc;

use gloo::net::http::Request;
use memorybook_core::{ContentDocument, ContentMode, LoadError};
use wasm_bindgen_futures::spawn_local;

use crate::page_core::{PageAction, PageCore};

pub(crate) async fn fetch_content(path: &str) -> Result<ContentDocument, LoadError> {
    let response = Request::get(path)
        .send()
        .await
        .map_err(|err| LoadError::Network(err.to_string()))?;
    if !response.ok() {
        return Err(LoadError::Status(response.status()));
    }
    let raw = response
        .text()
        .await
        .map_err(|err| LoadError::Network(err.to_string()))?;
    ContentDocument::from_json(&raw)
}

/// Fetches chapter content once and feeds the result back into the board.
pub(crate) fn spawn_load(core: Rc<PageCore>, mode: ContentMode) {
    let path = mode.content_path();
    spawn_local(async move {
        let log = core.log();
        log.note(&format!("loading {path}"));
        match fetch_content(path).await {
            Ok(document) => {
                log.detail("content loaded", &document);
                core.dispatch(PageAction::ContentLoaded(document));
            }
            Err(err) => {
                log.warn(&format!("content load failed: {err}"));
                core.dispatch(PageAction::ContentFailed(err));
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test(async)]
    async fn missing_file_is_a_status_error() {
        let result = fetch_content("/__memorybook_missing__.json").await;
        assert!(matches!(
            result,
            Err(LoadError::Status(404)) | Err(LoadError::Network(_))
        ));
    }
}
