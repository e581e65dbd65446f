use crate::buffer::{MacroBuffer, Region, WriteResult};
use crate::config::{DYNAMIC_MACRO_SIZE, DynamicMacroConfig, INPUT_MACRO_SIZE, NestedPlay};
use crate::event::KeyboardEvent;
use crate::input_macro::InputMacro;

/// Control keys of the dynamic macros.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    RecordStartA,
    RecordStartB,
    RecordStop,
    PlayA,
    PlayB,
}

impl Trigger {
    /// Convert a 16-bit QMK/Vial keycode (`DynamicMacroRecordStart1` ~ `DynamicMacroPlay2`).
    pub fn from_keycode(keycode: u16) -> Option<Self> {
        match keycode {
            0x753 => Some(Trigger::RecordStartA),
            0x754 => Some(Trigger::RecordStartB),
            0x755 => Some(Trigger::RecordStop),
            0x756 => Some(Trigger::PlayA),
            0x757 => Some(Trigger::PlayB),
            _ => None,
        }
    }

    /// Start triggers stop the recording as well, on release.
    fn stops_recording(self, pressed: bool) -> bool {
        match self {
            Trigger::RecordStartA | Trigger::RecordStartB => !pressed,
            Trigger::RecordStop => pressed,
            Trigger::PlayA | Trigger::PlayB => false,
        }
    }
}

/// Current state of the recorder
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecorderMode {
    #[default]
    Idle,
    Recording(Region),
}

/// Whether the end-hook fires when a recording stops
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum EndHook {
    Notify,
    /// The recording belongs to an input macro, which reports on its own
    Suppress,
}

/// The keyboard side of dynamic macros.
///
/// Everything a macro touches outside of the buffer goes through the host: processing of the
/// replayed events, the active keys and the layer state.
pub trait DynamicMacroHost {
    /// Snapshot of the layer state, restored after a playback
    type LayerState: Copy;

    /// Map an event to a dynamic macro trigger, using the current keymap.
    fn trigger(&self, event: &KeyboardEvent) -> Option<Trigger>;

    /// Process an event normally, as if it came from the matrix.
    fn process(&mut self, event: KeyboardEvent);

    /// Release all active keys.
    fn clear_keyboard(&mut self);

    fn layer_state(&self) -> Self::LayerState;

    fn set_layer_state(&mut self, state: Self::LayerState);

    /// Deactivate all layers except the default one.
    fn clear_layers(&mut self);

    /// Type one ascii character.
    fn send_char(&mut self, c: u8);

    fn tap_backspace(&mut self);
}

/// User hooks for dynamic macros.
///
/// All hooks call [`feedback`](Self::feedback) by default, override it to blink a LED or
/// similar.
pub trait DynamicMacroHooks {
    fn feedback(&mut self) {}

    fn on_record_start(&mut self) {
        self.feedback();
    }

    fn on_play(&mut self, _region: Region) {
        self.feedback();
    }

    /// Called instead of storing the event when the macro is full.
    fn on_record_key_dropped(&mut self, _region: Region, _event: &KeyboardEvent) {
        self.feedback();
    }

    fn on_record_end(&mut self, _region: Region) {
        self.feedback();
    }
}

impl DynamicMacroHooks for () {}

/// Two dynamic macros sharing one buffer of `N` events, plus the input macro, whose text can
/// hold `M` characters.
///
/// Created once by the keyboard and passed to every call.
pub struct DynamicMacros<H: DynamicMacroHooks = (), const N: usize = DYNAMIC_MACRO_SIZE, const M: usize = INPUT_MACRO_SIZE>
{
    pub(crate) buffer: MacroBuffer<N>,
    pub(crate) mode: RecorderMode,
    /// Active input macro, `None` if there's no expansion in progress
    pub(crate) input_macro: Option<InputMacro<M>>,
    pub(crate) config: DynamicMacroConfig,
    pub(crate) hooks: H,
}

impl<H: DynamicMacroHooks, const N: usize, const M: usize> DynamicMacros<H, N, M> {
    pub fn new(config: DynamicMacroConfig, hooks: H) -> Self {
        Self {
            buffer: MacroBuffer::new(),
            mode: RecorderMode::Idle,
            input_macro: None,
            config,
            hooks,
        }
    }

    pub fn mode(&self) -> RecorderMode {
        self.mode
    }

    pub fn is_recording(&self) -> bool {
        self.mode != RecorderMode::Idle
    }

    pub fn buffer(&self) -> &MacroBuffer<N> {
        &self.buffer
    }

    pub fn config(&self) -> &DynamicMacroConfig {
        &self.config
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Handle a key event before the keyboard processes it.
    ///
    /// Returns true if the event is consumed by dynamic macros, false if the keyboard should
    /// continue processing it. While recording, stored events are not consumed, so what's typed
    /// stays visible.
    pub fn handle_event<T: DynamicMacroHost>(&mut self, host: &mut T, event: KeyboardEvent) -> bool {
        let trigger = host.trigger(&event);
        self.process_trigger(host, trigger, event)
    }

    pub(crate) fn process_trigger<T: DynamicMacroHost>(
        &mut self,
        host: &mut T,
        trigger: Option<Trigger>,
        event: KeyboardEvent,
    ) -> bool {
        match self.mode {
            RecorderMode::Idle => {
                // Everything happens on release
                if event.pressed {
                    return false;
                }
                match trigger {
                    Some(Trigger::RecordStartA) => self.record_start(host, Region::A),
                    Some(Trigger::RecordStartB) => self.record_start(host, Region::B),
                    Some(Trigger::PlayA) => self.play(host, Region::A),
                    Some(Trigger::PlayB) => self.play(host, Region::B),
                    _ => return false,
                }
                true
            }
            RecorderMode::Recording(region) => match trigger {
                Some(t @ (Trigger::RecordStartA | Trigger::RecordStartB | Trigger::RecordStop)) => {
                    // Ignore the press of the start triggers and the release of the stop trigger
                    if t.stops_recording(event.pressed) {
                        self.stop_recording(host);
                    }
                    true
                }
                Some(Trigger::PlayA | Trigger::PlayB) if self.config.nested_play == NestedPlay::Ignore => {
                    debug!("dynamic macro: ignoring macro play key while recording");
                    true
                }
                _ => {
                    self.record_key(region, event);
                    false
                }
            },
        }
    }

    /// Start recording the region.
    fn record_start<T: DynamicMacroHost>(&mut self, host: &mut T, region: Region) {
        info!("dynamic macro recording: started, slot {}", region.slot());

        self.buffer.reset(region);
        // Don't record anything left over from before the recording
        host.clear_keyboard();
        host.clear_layers();
        self.mode = RecorderMode::Recording(region);

        self.hooks.on_record_start();
    }

    /// Record a single key, the key is dropped if the macro is full.
    fn record_key(&mut self, region: Region, event: KeyboardEvent) {
        if self.buffer.try_write(region, event) == WriteResult::Dropped {
            debug!("dynamic macro: slot {} is full", region.slot());
            self.hooks.on_record_key_dropped(region, &event);
        }
    }

    /// Stop the recording in progress, as the stop trigger does.
    ///
    /// If an input macro is in progress, it's sent right after.
    /// Returns false if nothing is being recorded.
    pub fn stop_recording<T: DynamicMacroHost>(&mut self, host: &mut T) -> bool {
        let RecorderMode::Recording(region) = self.mode else {
            return false;
        };

        let end_hook = if self.input_macro_active() {
            EndHook::Suppress
        } else {
            EndHook::Notify
        };
        self.record_end(region, end_hook);

        if end_hook == EndHook::Suppress {
            self.run_input_macro(host, region);
        }
        true
    }

    /// Stop recording the region and save the macro.
    fn record_end(&mut self, region: Region, end_hook: EndHook) {
        self.mode = RecorderMode::Idle;
        if end_hook == EndHook::Notify {
            self.hooks.on_record_end(region);
        }

        let len = self.buffer.finish(region);
        info!("dynamic macro recording: stopped, slot {} length {}", region.slot(), len);
    }

    /// Play the macro of the region.
    ///
    /// Every stored event goes through [`handle_event`](Self::handle_event) and the host again, so
    /// a stored play trigger plays the other macro. Nothing stops two macros from playing each
    /// other forever, limiting that is up to the host.
    pub fn play<T: DynamicMacroHost>(&mut self, host: &mut T, region: Region) {
        info!("dynamic macro: slot {} playback", region.slot());

        let saved_layer_state = host.layer_state();
        host.clear_keyboard();
        host.clear_layers();

        let len = self.buffer.extent(region).unwrap_or(0);
        for offset in 0..len {
            if let Some(event) = self.buffer.get(region, offset) {
                if !self.handle_event(host, event) {
                    host.process(event);
                }
            }
        }

        host.clear_keyboard();
        host.set_layer_state(saved_layer_state);

        self.hooks.on_play(region);
    }
}
