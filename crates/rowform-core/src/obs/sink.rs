//! Event sink boundary.
//!
//! The process-global sink keeps atomic counters, since checks may run on
//! any thread once the catalog is installed. A thread-local override lets
//! a caller observe events for the duration of one closure.

use rowform_schema::node::{ColumnRef, TableId};
use serde::Serialize;
use std::{
    cell::RefCell,
    rc::Rc,
    sync::atomic::{AtomicU64, Ordering},
};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn EventSink>>> = RefCell::new(None);
}

///
/// CatalogEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CatalogEvent {
    TableRegistered {
        table: TableId,
        columns: usize,
    },
    PairAllowed {
        lhs: ColumnRef,
        rhs: ColumnRef,
    },
    CatalogInstalled {
        tables: usize,
        pairs: usize,
    },
    ComparisonChecked {
        op: &'static str,
        lhs: ColumnRef,
        rhs: ColumnRef,
        allowed: bool,
    },
}

///
/// EventSink
///

pub trait EventSink {
    fn record(&self, event: CatalogEvent);
}

///
/// EventReport
/// Snapshot of the global counters.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub tables_registered: u64,
    pub pairs_allowed: u64,
    pub catalogs_installed: u64,
    pub comparisons_allowed: u64,
    pub comparisons_denied: u64,
}

static TABLES_REGISTERED: AtomicU64 = AtomicU64::new(0);
static PAIRS_ALLOWED: AtomicU64 = AtomicU64::new(0);
static CATALOGS_INSTALLED: AtomicU64 = AtomicU64::new(0);
static COMPARISONS_ALLOWED: AtomicU64 = AtomicU64::new(0);
static COMPARISONS_DENIED: AtomicU64 = AtomicU64::new(0);

/// GlobalEventSink
/// Default sink when no scoped override is installed.

pub(crate) struct GlobalEventSink;

impl EventSink for GlobalEventSink {
    fn record(&self, event: CatalogEvent) {
        let counter = match event {
            CatalogEvent::TableRegistered { .. } => &TABLES_REGISTERED,
            CatalogEvent::PairAllowed { .. } => &PAIRS_ALLOWED,
            CatalogEvent::CatalogInstalled { .. } => &CATALOGS_INSTALLED,
            CatalogEvent::ComparisonChecked { allowed: true, .. } => &COMPARISONS_ALLOWED,
            CatalogEvent::ComparisonChecked { allowed: false, .. } => &COMPARISONS_DENIED,
        };

        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Route an event to the active sink.
pub(crate) fn record(event: CatalogEvent) {
    let scoped = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match scoped {
        Some(sink) => sink.record(event),
        None => GlobalEventSink.record(event),
    }
}

/// Snapshot the global counters.
#[must_use]
pub fn events_report() -> EventReport {
    EventReport {
        tables_registered: TABLES_REGISTERED.load(Ordering::Relaxed),
        pairs_allowed: PAIRS_ALLOWED.load(Ordering::Relaxed),
        catalogs_installed: CATALOGS_INSTALLED.load(Ordering::Relaxed),
        comparisons_allowed: COMPARISONS_ALLOWED.load(Ordering::Relaxed),
        comparisons_denied: COMPARISONS_DENIED.load(Ordering::Relaxed),
    }
}

/// Reset the global counters.
pub fn events_reset() {
    for counter in [
        &TABLES_REGISTERED,
        &PAIRS_ALLOWED,
        &CATALOGS_INSTALLED,
        &COMPARISONS_ALLOWED,
        &COMPARISONS_DENIED,
    ] {
        counter.store(0, Ordering::Relaxed);
    }
}

/// Run a closure with a temporary sink override on this thread.
/// The previous sink is restored on return and on unwind.
pub fn with_event_sink<T>(sink: Rc<dyn EventSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn EventSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, panic};

    #[derive(Default)]
    struct CountingSink {
        calls: Cell<usize>,
    }

    impl EventSink for CountingSink {
        fn record(&self, _: CatalogEvent) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    const EVENT: CatalogEvent = CatalogEvent::CatalogInstalled {
        tables: 0,
        pairs: 0,
    };

    #[test]
    fn with_event_sink_routes_and_restores_nested_overrides() {
        let outer = Rc::new(CountingSink::default());
        let inner = Rc::new(CountingSink::default());

        with_event_sink(outer.clone(), || {
            record(EVENT);

            with_event_sink(inner.clone(), || {
                record(EVENT);
                record(EVENT);
            });

            record(EVENT);
        });

        assert_eq!(outer.calls.get(), 2);
        assert_eq!(inner.calls.get(), 2);
        SINK_OVERRIDE.with(|cell| assert!(cell.borrow().is_none()));
    }

    #[test]
    fn with_event_sink_restores_override_on_panic() {
        let sink = Rc::new(CountingSink::default());
        let scoped = sink.clone();

        let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
            with_event_sink(scoped, || {
                record(EVENT);
                panic!("boom");
            });
        }));

        assert!(result.is_err());
        assert_eq!(sink.calls.get(), 1);
        SINK_OVERRIDE.with(|cell| assert!(cell.borrow().is_none()));
    }

    #[test]
    fn global_sink_counts_by_kind() {
        let before = events_report();
        GlobalEventSink.record(EVENT);
        let after = events_report();

        assert!(after.catalogs_installed > before.catalogs_installed);
    }
}
