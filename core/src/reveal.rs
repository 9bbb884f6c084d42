use std::collections::BTreeMap;

use serde::Serialize;

use crate::phrase::RevealKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RevealTicket {
    pub kind: RevealKind,
    pub generation: u64,
}

/// Active reveals keyed by kind. Each start issues a fresh ticket; only the
/// newest ticket for a kind may clear it.
#[derive(Clone, Debug, Default)]
pub struct RevealSchedule {
    active: BTreeMap<RevealKind, u64>,
    next_generation: u64,
}

impl RevealSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, kind: RevealKind) -> RevealTicket {
        self.next_generation = self.next_generation.wrapping_add(1);
        let generation = self.next_generation;
        self.active.insert(kind, generation);
        RevealTicket { kind, generation }
    }

    pub fn expire(&mut self, ticket: RevealTicket) -> bool {
        match self.active.get(&ticket.kind) {
            Some(current) if *current == ticket.generation => {
                self.active.remove(&ticket.kind);
                true
            }
            _ => false,
        }
    }

    pub fn is_active(&self, kind: RevealKind) -> bool {
        self.active.contains_key(&kind)
    }

    pub fn active_kinds(&self) -> Vec<RevealKind> {
        self.active.keys().copied().collect()
    }
}
