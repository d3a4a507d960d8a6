// Logging is compiled in only with the `logger` feature. Without it the
// macros type check their arguments but never evaluate them.

#[cfg(feature = "logger")]
pub(crate) use log::{debug, trace};

#[cfg(not(feature = "logger"))]
pub(crate) use noop_logger::{debug, trace, trace_enabled};

#[cfg(not(feature = "logger"))]
mod noop_logger {
    /// A noop logger, when the logger feature is disabled
    macro_rules! noop {
        ($($arg:tt)+) => {
            if $crate::logger::trace_enabled() {
                // Never taken; keeps the arguments used.
                let _ = format!($($arg)+);
            }
        };
    }

    pub(crate) use noop as debug;
    pub(crate) use noop as trace;

    /// `trace_enabled` for a noop logger is always false
    #[inline]
    pub(crate) const fn trace_enabled() -> bool {
        false
    }
}
