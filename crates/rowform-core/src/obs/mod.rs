//! Observability: catalog and comparability events, routed through a sink.
//!
//! Catalog and expression code never touches counters directly; every
//! event goes through `sink::record`.

pub(crate) mod sink;

pub use sink::{
    CatalogEvent, EventReport, EventSink, events_report, events_reset, with_event_sink,
};
