use embassy_time::Instant;

/// `KeyboardEvent` is a single key transition seen by the dynamic macro recorder.
///
/// Events are copied by value into the macro buffer, so a recorded event is replayed exactly as
/// it was captured, including its original timestamp.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardEvent {
    pub pressed: bool,
    pub pos: KeyboardEventPos,
    /// The time when the event was captured
    pub time: Instant,
}

impl KeyboardEvent {
    /// An empty slot of the macro buffer.
    pub(crate) const EMPTY: Self = Self {
        pressed: false,
        pos: KeyboardEventPos::Virtual,
        time: Instant::from_ticks(0),
    };

    /// Key event at (row, col), timestamped now.
    pub fn key(row: u8, col: u8, pressed: bool) -> Self {
        Self::key_at(row, col, pressed, Instant::now())
    }

    pub fn key_at(row: u8, col: u8, pressed: bool, time: Instant) -> Self {
        Self {
            pressed,
            pos: KeyboardEventPos::Key(KeyPos { row, col }),
            time,
        }
    }

    /// Event that doesn't come from the matrix, e.g. a trigger synthesized by the input macro.
    pub fn virtual_key(pressed: bool) -> Self {
        Self {
            pressed,
            pos: KeyboardEventPos::Virtual,
            time: Instant::now(),
        }
    }
}

/// The source of a keyboard event.
///
/// The position is opaque to the recorder, only the host maps it to an action.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyboardEventPos {
    Key(KeyPos),
    /// Synthesized by firmware, there's no physical key behind it
    Virtual,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyPos {
    pub row: u8,
    pub col: u8,
}
