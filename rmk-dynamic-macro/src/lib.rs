//! Dynamic macros for RMK.
//!
//! Two macros are recorded from live key events into one shared buffer and played back on
//! demand. On top of them, an input macro types a text in which a marker character plays the
//! first macro.
//!
//! The keyboard owns one [`DynamicMacros`], implements [`DynamicMacroHost`] and calls
//! [`DynamicMacros::handle_event`] before processing every key event:
//!
//! ```ignore
//! if !dynamic_macros.handle_event(&mut keyboard, event) {
//!     keyboard.process(event);
//! }
//! ```
//!
//! ## Sizes
//!
//! Both are const generics of [`DynamicMacros`], fixed at build time:
//!
//! - `N`: events shared by the two macros, [`DYNAMIC_MACRO_SIZE`] by default
//! - `M`: characters of an input macro text, [`INPUT_MACRO_SIZE`] by default. Longer texts are
//!   refused with [`ExpansionError::TooLong`].
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod buffer;
pub mod config;
pub mod dynamic_macro;
pub mod event;
pub mod input_macro;

pub use buffer::{MacroBuffer, Region, WriteResult};
pub use config::{DYNAMIC_MACRO_SIZE, DynamicMacroConfig, INPUT_MACRO_SIZE, NestedPlay};
pub use dynamic_macro::{DynamicMacroHooks, DynamicMacroHost, DynamicMacros, RecorderMode, Trigger};
pub use event::{KeyPos, KeyboardEvent, KeyboardEventPos};
pub use input_macro::{ExpansionError, ExpansionStep, InputMacro};
