use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;

use gloo::timers::callback::Timeout;
use memorybook_core::{Reveal, RevealKind};

use crate::page_core::{PageAction, PageCore};

/// One pending clear per reveal kind. Scheduling a kind again drops the
/// previous timeout, which cancels it.
#[derive(Default)]
pub(crate) struct RevealTimers {
    pending: RefCell<HashMap<RevealKind, Timeout>>,
}

impl RevealTimers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn schedule(&self, core: Weak<PageCore>, reveal: &Reveal) {
        let Some(duration_ms) = reveal.kind.duration_ms() else {
            return;
        };
        let ticket = reveal.ticket;
        let timeout = Timeout::new(duration_ms, move || {
            if let Some(core) = core.upgrade() {
                core.dispatch(PageAction::ExpireReveal(ticket));
            }
        });
        self.pending.borrow_mut().insert(reveal.kind, timeout);
    }

    #[cfg(test)]
    pub(crate) fn is_pending(&self, kind: RevealKind) -> bool {
        self.pending.borrow().contains_key(&kind)
    }

    #[cfg(test)]
    pub(crate) fn cancel_all(&self) {
        self.pending.borrow_mut().clear();
    }
}
