//! Logging macros that forward to `defmt` or `log`, whichever is enabled.
//!
//! `defmt` wins when both are enabled. With neither, the arguments are only borrowed so no
//! "unused variable" warnings show up.
#![macro_use]
#![allow(unused_macros)]

macro_rules! __log_impl {
    ($level:ident, $s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::$level!($s $(, $x)*);
            #[cfg(all(feature = "log", not(feature = "defmt")))]
            ::log::$level!($s $(, $x)*);
            #[cfg(not(any(feature = "log", feature = "defmt")))]
            let _ = ($( & $x ),*);
        }
    };
}

macro_rules! trace {
    ($($arg:tt)*) => {
        __log_impl!(trace, $($arg)*)
    };
}

macro_rules! debug {
    ($($arg:tt)*) => {
        __log_impl!(debug, $($arg)*)
    };
}

macro_rules! info {
    ($($arg:tt)*) => {
        __log_impl!(info, $($arg)*)
    };
}

macro_rules! warn {
    ($($arg:tt)*) => {
        __log_impl!(warn, $($arg)*)
    };
}

macro_rules! error {
    ($($arg:tt)*) => {
        __log_impl!(error, $($arg)*)
    };
}
