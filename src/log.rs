extern crate tracing;

macro_rules! trace {
    ($fmt:expr) => {
        #[cfg(debug_assertions)]
        tracing::trace!($fmt)
    };
    ($fmt:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        tracing::trace!($fmt, $($arg)*)
    }
}
