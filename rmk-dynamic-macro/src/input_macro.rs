//! Input macro: type a text, with the first dynamic macro played wherever the text has the play
//! marker.
//!
//! Starting an input macro starts recording the first dynamic macro. When that recording stops,
//! the text is sent instead of notifying the end of the recording, and every play marker in the
//! text plays the freshly recorded macro. Started during a recording, it stops that recording
//! instead and the text is sent at once.
use heapless::Vec;

use crate::buffer::Region;
use crate::dynamic_macro::{DynamicMacroHooks, DynamicMacroHost, DynamicMacros, Trigger};
use crate::event::KeyboardEvent;

/// Why an input macro was not started
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExpansionError {
    /// Nothing to type
    Empty,
    /// The text doesn't fit the input macro
    TooLong,
    /// Another input macro is in progress
    Busy,
}

/// One step of an input macro
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExpansionStep {
    Backspace,
    Char(u8),
    Play,
}

/// An input macro in progress, owns a private copy of its text.
#[derive(Clone, Debug)]
pub struct InputMacro<const M: usize> {
    text: Vec<u8, M>,
    /// Index of the next character to send
    cursor: usize,
    /// Backspaces to send before the text
    pending_erase: usize,
}

impl<const M: usize> InputMacro<M> {
    pub fn new(text: &[u8]) -> Result<Self, ExpansionError> {
        if text.is_empty() {
            return Err(ExpansionError::Empty);
        }
        let text = Vec::from_slice(text).map_err(|_| ExpansionError::TooLong)?;
        Ok(Self {
            text,
            cursor: 0,
            pending_erase: 0,
        })
    }

    /// Characters not sent yet
    pub fn remaining(&self) -> &[u8] {
        &self.text[self.cursor.min(self.text.len())..]
    }

    pub(crate) fn erase(&mut self, count: usize) {
        self.pending_erase = count;
    }

    /// Consume the next step, `None` when the input macro is done.
    ///
    /// A play marker at the very end of the text is typed as is.
    pub fn next_step(&mut self, play_marker: u8) -> Option<ExpansionStep> {
        if self.pending_erase > 0 {
            self.pending_erase -= 1;
            return Some(ExpansionStep::Backspace);
        }

        let c = *self.text.get(self.cursor)?;
        self.cursor += 1;
        if c == play_marker && self.cursor < self.text.len() {
            Some(ExpansionStep::Play)
        } else {
            Some(ExpansionStep::Char(c))
        }
    }
}

impl<H: DynamicMacroHooks, const N: usize, const M: usize> DynamicMacros<H, N, M> {
    /// Start an input macro.
    ///
    /// The text is copied, the caller's buffer can be reused right away. Acts as a release of the
    /// first start key: when idle, starts recording the first dynamic macro and the text is sent
    /// when that recording stops. When a macro is being recorded, that recording is stopped
    /// without the end hook and the text is sent right away.
    pub fn begin_expansion<T: DynamicMacroHost>(&mut self, host: &mut T, text: &[u8]) -> Result<(), ExpansionError> {
        if text.is_empty() {
            debug!("input macro: nothing to type");
            return Err(ExpansionError::Empty);
        }
        if self.input_macro_active() {
            warn!("input macro: another input macro is in progress");
            return Err(ExpansionError::Busy);
        }

        let input_macro = InputMacro::new(text).inspect_err(|_| {
            warn!("input macro: text of {} characters is longer than {}", text.len(), M);
        })?;
        self.input_macro = Some(input_macro);

        info!("input macro: started, {} characters", text.len());
        self.process_trigger(host, Some(Trigger::RecordStartA), KeyboardEvent::virtual_key(false));
        Ok(())
    }

    /// Whether an input macro is in progress.
    pub fn input_macro_active(&self) -> bool {
        self.input_macro.is_some()
    }

    /// Drop the input macro in progress without sending anything.
    ///
    /// The recording it started goes on as a plain recording. Returns false if there was no
    /// input macro.
    pub fn abort_expansion(&mut self) -> bool {
        match self.input_macro.take() {
            Some(input_macro) => {
                info!("input macro: aborted, {} characters left", input_macro.remaining().len());
                true
            }
            None => false,
        }
    }

    /// Send the whole input macro, once the recording of `region` is finished.
    ///
    /// With `erase_on_expand`, one backspace is sent per event kept in the finished recording,
    /// trailing key-downs trimmed on stop don't count.
    pub(crate) fn run_input_macro<T: DynamicMacroHost>(&mut self, host: &mut T, region: Region) {
        if self.config.erase_on_expand {
            let count = self.buffer.len(region);
            if let Some(input_macro) = self.input_macro.as_mut() {
                input_macro.erase(count);
            }
        }

        while self.step_input_macro(host) {}
    }

    /// Send one step of the input macro, returns false once it's done.
    fn step_input_macro<T: DynamicMacroHost>(&mut self, host: &mut T) -> bool {
        let Some(input_macro) = self.input_macro.as_mut() else {
            return false;
        };

        match input_macro.next_step(self.config.play_marker) {
            Some(ExpansionStep::Backspace) => host.tap_backspace(),
            Some(ExpansionStep::Char(c)) => host.send_char(c),
            Some(ExpansionStep::Play) => self.play(host, Region::A),
            None => {
                // Release the text
                self.input_macro = None;
                debug!("input macro: done");
                return false;
            }
        }
        true
    }
}
