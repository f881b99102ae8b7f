/// The seam through which lower layers (persistence, restore) report
/// progress and failures upward without depending on whichever concrete
/// pub-sub bus the orchestrator happens to use.
///
/// Event names are stable strings, not an enum, because the event bus
/// is itself part of the observable contract (hosts and user scripts
/// subscribe to them by name) — adding a variant to a closed enum would
/// be a breaking change in spirit even if not in the type system.
pub trait EventSink: Send + Sync {
    fn emit(&self, name: &str, message: Option<&str>);
}

/// An `EventSink` that discards everything. Useful for call sites (and
/// tests) that have no bus and don't care to provide one.
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn emit(&self, _name: &str, _message: Option<&str>) {}
}
