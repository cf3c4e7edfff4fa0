//! Stage instrumentation.
//!
//! `compute_response`, `suppress` and `CornerDetector::detect` each open a
//! span carrying the frame geometry and emit one event when they finish.
//! Without the `tracing` feature nothing is recorded and the event arguments
//! are merely evaluated.

/// Span covering one stage, tagged with `key = value` fields.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::DisabledSpan
    };
}

/// Completion event of a stage, e.g. the number of accepted corners.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
}

pub(crate) use trace_event;
pub(crate) use trace_span;

/// Span placeholder for builds without the `tracing` feature.
#[cfg(not(feature = "tracing"))]
pub struct DisabledSpan;

#[cfg(not(feature = "tracing"))]
impl DisabledSpan {
    /// Same shape as `tracing::Span::entered`; the guard does nothing.
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
