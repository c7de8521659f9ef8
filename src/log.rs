//! [`log`]-macro counterparts that only emit when the `log` feature is on.
//!
//! The crate never installs a logger; callers wire up whatever backend
//! they like.

/// Mirrors `log::debug!()`.
#[cfg(feature = "log")]
macro_rules! debug {
    ($($t:tt)*) => {
        ::log::debug!($($t)*)
    };
}
/// Mirrors `log::debug!()`. Compiles to nothing without the `log` feature.
#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($t:tt)*) => {};
}
pub(crate) use debug;

/// Mirrors `log::trace!()`.
#[cfg(feature = "log")]
macro_rules! trace {
    ($($t:tt)*) => {
        ::log::trace!($($t)*)
    };
}
/// Mirrors `log::trace!()`. Compiles to nothing without the `log` feature.
#[cfg(not(feature = "log"))]
macro_rules! trace {
    ($($t:tt)*) => {};
}
pub(crate) use trace;
