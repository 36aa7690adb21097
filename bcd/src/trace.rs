// Record event logging, routed to `tracing` when the `trace` feature is
// enabled and compiled out otherwise.

#[cfg(feature = "trace")]
macro_rules! record_event {
    ($level:ident, $($arg:tt)+) => {
        ::tracing::$level!(target: "bcd_device", $($arg)+)
    };
}

#[cfg(not(feature = "trace"))]
macro_rules! record_event {
    ($level:ident, $($arg:tt)+) => {};
}
