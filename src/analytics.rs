use std::cell::Cell;

use js_sys::Date;

/// Session-scoped event counter with the console as its only sink. The
/// call sites are the contract; a real backend can hang off them later.
pub(crate) struct Analytics {
    session: u32,
    sequence: Cell<u32>,
}

impl Analytics {
    pub(crate) fn new() -> Self {
        Self {
            session: Date::now() as u32,
            sequence: Cell::new(0),
        }
    }

    pub(crate) fn track(&self, event: &str, subject: &str) {
        let sequence = self.sequence.get().wrapping_add(1);
        self.sequence.set(sequence);
        gloo::console::log!(
            "analytics",
            self.session,
            sequence,
            event.to_string(),
            subject.to_string()
        );
    }
}
