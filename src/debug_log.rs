use serde::Serialize;

use crate::app_runtime;

/// Console logging gated on `?debug=1`, tagged with a page scope.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DebugLog {
    scope: &'static str,
    enabled: bool,
}

impl DebugLog {
    pub(crate) fn new(scope: &'static str, enabled: bool) -> Self {
        Self { scope, enabled }
    }

    pub(crate) fn for_scope(scope: &'static str) -> Self {
        Self::new(scope, app_runtime::debug_enabled())
    }

    pub(crate) fn enabled(&self) -> bool {
        self.enabled
    }

    fn prefix(&self) -> String {
        format!("[{}]", self.scope)
    }

    pub(crate) fn note(&self, message: &str) {
        if self.enabled {
            gloo::console::log!(self.prefix(), message.to_string());
        }
    }

    pub(crate) fn detail<T: Serialize + ?Sized>(&self, message: &str, detail: &T) {
        if !self.enabled {
            return;
        }
        match serde_json::to_string(detail) {
            Ok(json) => gloo::console::log!(self.prefix(), message.to_string(), json),
            Err(err) => gloo::console::warn!(self.prefix(), message.to_string(), err.to_string()),
        }
    }

    /// Warnings are always printed.
    pub(crate) fn warn(&self, message: &str) {
        gloo::console::warn!(self.prefix(), message.to_string());
    }
}
