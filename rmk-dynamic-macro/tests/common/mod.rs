use rmk_dynamic_macro::{
    DynamicMacroConfig, DynamicMacroHooks, DynamicMacroHost, DynamicMacros, KeyPos, KeyboardEvent, KeyboardEventPos,
    Region, Trigger,
};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

// Trigger keys live on row 0, in keycode order
pub const START_A: (u8, u8) = (0, 0);
pub const START_B: (u8, u8) = (0, 1);
pub const STOP: (u8, u8) = (0, 2);
pub const PLAY_A: (u8, u8) = (0, 3);
pub const PLAY_B: (u8, u8) = (0, 4);

/// Everything the dynamic macros asked the keyboard to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    Process(KeyboardEvent),
    ClearKeyboard,
    ClearLayers,
    SetLayerState(u32),
    Char(u8),
    Backspace,
}

/// A keyboard which only records what it's asked to do
#[derive(Debug, Default)]
pub struct TestHost {
    pub layer_state: u32,
    pub actions: Vec<HostAction>,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events processed normally, in order
    pub fn processed(&self) -> Vec<KeyboardEvent> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                HostAction::Process(e) => Some(*e),
                _ => None,
            })
            .collect()
    }

    /// Characters and backspaces typed, backspaces as `\x08`
    pub fn typed(&self) -> Vec<u8> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                HostAction::Char(c) => Some(*c),
                HostAction::Backspace => Some(0x08),
                _ => None,
            })
            .collect()
    }
}

impl DynamicMacroHost for TestHost {
    type LayerState = u32;

    fn trigger(&self, event: &KeyboardEvent) -> Option<Trigger> {
        match event.pos {
            KeyboardEventPos::Key(KeyPos { row: 0, col }) => Trigger::from_keycode(0x753 + col as u16),
            _ => None,
        }
    }

    fn process(&mut self, event: KeyboardEvent) {
        self.actions.push(HostAction::Process(event));
    }

    fn clear_keyboard(&mut self) {
        self.actions.push(HostAction::ClearKeyboard);
    }

    fn layer_state(&self) -> u32 {
        self.layer_state
    }

    fn set_layer_state(&mut self, state: u32) {
        self.layer_state = state;
        self.actions.push(HostAction::SetLayerState(state));
    }

    fn clear_layers(&mut self) {
        self.layer_state = 0;
        self.actions.push(HostAction::ClearLayers);
    }

    fn send_char(&mut self, c: u8) {
        self.actions.push(HostAction::Char(c));
    }

    fn tap_backspace(&mut self) {
        self.actions.push(HostAction::Backspace);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCall {
    RecordStart,
    Play(Region),
    Dropped(Region, KeyboardEvent),
    RecordEnd(Region),
}

#[derive(Debug, Default)]
pub struct TestHooks {
    pub calls: Vec<HookCall>,
}

impl DynamicMacroHooks for TestHooks {
    fn on_record_start(&mut self) {
        self.calls.push(HookCall::RecordStart);
    }

    fn on_play(&mut self, region: Region) {
        self.calls.push(HookCall::Play(region));
    }

    fn on_record_key_dropped(&mut self, region: Region, event: &KeyboardEvent) {
        self.calls.push(HookCall::Dropped(region, *event));
    }

    fn on_record_end(&mut self, region: Region) {
        self.calls.push(HookCall::RecordEnd(region));
    }
}

pub fn create_test_macros() -> DynamicMacros<TestHooks> {
    DynamicMacros::new(DynamicMacroConfig::default(), TestHooks::default())
}

pub fn create_test_macros_with_config(config: DynamicMacroConfig) -> DynamicMacros<TestHooks> {
    DynamicMacros::new(config, TestHooks::default())
}

pub fn press(key: (u8, u8)) -> KeyboardEvent {
    KeyboardEvent::key(key.0, key.1, true)
}

pub fn release(key: (u8, u8)) -> KeyboardEvent {
    KeyboardEvent::key(key.0, key.1, false)
}

/// Press and release
pub fn tap(key: (u8, u8)) -> [KeyboardEvent; 2] {
    [press(key), release(key)]
}

/// Feed an event the way the keyboard does: dynamic macros first, then normal processing
pub fn feed<const N: usize, const M: usize>(
    macros: &mut DynamicMacros<TestHooks, N, M>,
    host: &mut TestHost,
    event: KeyboardEvent,
) -> bool {
    let consumed = macros.handle_event(host, event);
    if !consumed {
        host.process(event);
    }
    consumed
}

pub fn feed_all<const N: usize, const M: usize>(
    macros: &mut DynamicMacros<TestHooks, N, M>,
    host: &mut TestHost,
    events: impl IntoIterator<Item = KeyboardEvent>,
) {
    for event in events {
        feed(macros, host, event);
    }
}

/// Record `events` into the region, stopping with the stop key
pub fn record<const N: usize, const M: usize>(
    macros: &mut DynamicMacros<TestHooks, N, M>,
    host: &mut TestHost,
    region: Region,
    events: &[KeyboardEvent],
) {
    let start = match region {
        Region::A => START_A,
        Region::B => START_B,
    };
    feed_all(macros, host, tap(start));
    feed_all(macros, host, events.iter().copied());
    feed_all(macros, host, tap(STOP));
}
