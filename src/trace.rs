//! Debug spans and counters for decode and suppression.
//!
//! Expands to nothing unless the `tracing` feature is enabled.

#[cfg(feature = "tracing")]
macro_rules! enter_span {
    ($name:expr, $($field:tt)*) => {
        tracing::debug_span!($name, $($field)*).entered()
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! enter_span {
    ($name:expr, $($field:tt)*) => {
        ()
    };
}

/// Records how many detections a stage produced.
#[cfg(feature = "tracing")]
macro_rules! trace_count {
    ($stage:expr, $count:expr) => {
        tracing::debug!(stage = $stage, count = $count)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_count {
    ($stage:expr, $count:expr) => {
        let _ = ($stage, $count);
    };
}

pub(crate) use enter_span;
pub(crate) use trace_count;
