/// Advisory health stamps, seconds since epoch.
///
/// Both stamps start at the process startup time. `last_flush` advances on
/// every successful send; `last_exception` advances on every failed one. A
/// persistent export failure shows up as a stale `last_flush` next to an
/// advancing `last_exception`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExporterHealth {
    pub last_flush: u64,
    pub last_exception: u64,
}

impl ExporterHealth {
    #[must_use]
    pub const fn new(startup_time: u64) -> Self {
        Self {
            last_flush: startup_time,
            last_exception: startup_time,
        }
    }
}
