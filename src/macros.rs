#[cfg(feature = "widget_trace_bt")]
extern crate backtrace;

/* This is to work around a false positive for the clippy warning
 * `match_on_same_arms`.
 * See https://github.com/Manishearth/rust-clippy/issues/1390
 */
#[cfg(not(feature = "widget_trace"))]
#[inline(always)]
pub fn nop() {}

#[cfg(all(feature = "widget_trace", feature = "widget_trace_bt"))]
#[macro_export]
#[doc(hidden)]
macro_rules! widget_trace {
    ($fmt:expr) => {
         let bt = ::backtrace::Backtrace::new();
         log::trace!( concat!($fmt, " at {:?}"), bt );
    };
    ($fmt:expr, $( $args:expr ),*) => {
         let bt = ::backtrace::Backtrace::new();
         log::trace!( concat!($fmt, " at {:?}"), $( $args ),* , bt );
    };
}
#[cfg(all(feature = "widget_trace", not(feature = "widget_trace_bt")))]
#[macro_export]
#[doc(hidden)]
macro_rules! widget_trace {
    ($fmt:expr) => { log::trace!( $fmt ); };
    ($fmt:expr, $( $args:expr ),*) => { log::trace!( $fmt, $( $args ),* ); };
}
#[cfg(not(feature = "widget_trace"))]
#[macro_export]
#[doc(hidden)]
macro_rules! widget_trace {
    ($fmt:expr) => { $crate::macros::nop(); };
    ($fmt:expr, $( $args:expr ),*) => { $crate::macros::nop(); };
}

#[cfg(feature = "widget_trace")]
#[macro_export]
#[doc(hidden)]
macro_rules! widget_trace_quiet {
    ($fmt:expr) => { log::trace!( $fmt ); };
    ($fmt:expr, $( $args:expr ),*) => { log::trace!( $fmt, $( $args ),* ); };
}

#[cfg(not(feature = "widget_trace"))]
#[macro_export]
#[doc(hidden)]
macro_rules! widget_trace_quiet {
    ($fmt:expr) => { $crate::macros::nop(); };
    ($fmt:expr, $( $args:expr ),*) => { $crate::macros::nop(); };
}
