/// Default number of event slots shared by both dynamic macros
pub const DYNAMIC_MACRO_SIZE: usize = 128;

/// Default capacity of the private text copy kept by an input macro
pub const INPUT_MACRO_SIZE: usize = 64;

/// What to do with a play trigger received while a macro is being recorded
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NestedPlay {
    /// Store the trigger like any other key, so playing the macro plays the other one too
    #[default]
    Record,
    /// Drop the trigger, it's neither recorded nor processed
    Ignore,
}

/// Config for dynamic macros.
///
/// The config is fixed when [`DynamicMacros`](crate::DynamicMacros) is created.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DynamicMacroConfig {
    pub nested_play: NestedPlay,
    /// Erase the text typed while recording the body of an input macro before the expansion is
    /// sent, one backspace per recorded event
    pub erase_on_expand: bool,
    /// The character which plays the first dynamic macro inside an input macro
    pub play_marker: u8,
}

impl Default for DynamicMacroConfig {
    fn default() -> Self {
        Self {
            nested_play: NestedPlay::Record,
            erase_on_expand: false,
            play_marker: b'@',
        }
    }
}

impl DynamicMacroConfig {
    pub fn new(nested_play: NestedPlay, erase_on_expand: bool, play_marker: u8) -> Self {
        Self {
            nested_play,
            erase_on_expand,
            play_marker,
        }
    }
}
