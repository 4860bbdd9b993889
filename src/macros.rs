//! Crate-internal logging shim.
//!
//! `log_event!(level, ...)` forwards to the matching `tracing` macro when the
//! `tracing` feature is enabled and expands to nothing otherwise. Arguments are
//! not evaluated without the feature, so keep them free of side effects.

macro_rules! log_event {
    ($level:ident, $($arg:tt)+) => {{
        #[cfg(feature = "tracing")]
        {
            tracing::$level!($($arg)+);
        }
    }};
}

pub(crate) use log_event;
