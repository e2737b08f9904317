//! Ownership-change notifications.
//!
//! The registry hands every successful transition to an injected
//! [`EventSink`]. [`EventLog`] is the in-memory sink used by tests and by the
//! CLI runtime to build the persisted history.

use ownable_types::OwnershipTransferred;

/// Records ownership transitions for external observers.
pub trait EventSink {
    fn record(&mut self, event: OwnershipTransferred);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn record(&mut self, event: OwnershipTransferred) {
        (**self).record(event);
    }
}

impl EventSink for Vec<OwnershipTransferred> {
    fn record(&mut self, event: OwnershipTransferred) {
        self.push(event);
    }
}

/// Ordered log of recorded transitions.
///
/// Unlike a notification queue, nothing is deduplicated: A->B->A->B records
/// every hop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<OwnershipTransferred>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[OwnershipTransferred] {
        &self.events
    }

    #[must_use]
    pub fn last(&self) -> Option<&OwnershipTransferred> {
        self.events.last()
    }

    /// Take all recorded events in emission order, clearing the log.
    pub fn take(&mut self) -> Vec<OwnershipTransferred> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl EventSink for EventLog {
    fn record(&mut self, event: OwnershipTransferred) {
        self.events.push(event);
    }
}
