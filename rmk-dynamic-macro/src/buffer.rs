use crate::event::KeyboardEvent;

/// One of the two dynamic macros.
///
/// Both macros use the same buffer but write on different ends of it:
///
/// ```text
///  index 0               extent(A)            N - 1 - extent(B)       N - 1
///  v                        v                         v                 v
/// +-------------------------------------------------------------------------+
/// |>>>>>>>>>> A >>>>>>>>>>>>                           <<<<<<<<< B <<<<<<<<<|
/// +-------------------------------------------------------------------------+
/// ```
///
/// There's no fixed split between them: one long and one short macro, two medium ones, or one
/// empty macro and one using the whole buffer all fit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Region {
    /// Written left-to-right from the beginning of the buffer
    A,
    /// Written right-to-left from the end of the buffer
    B,
}

impl Region {
    /// Which way the region is iterated in the buffer, +1 or -1.
    pub fn direction(self) -> i8 {
        match self {
            Region::A => 1,
            Region::B => -1,
        }
    }

    pub fn other(self) -> Region {
        match self {
            Region::A => Region::B,
            Region::B => Region::A,
        }
    }

    /// 1-based slot number, used in logs
    pub(crate) fn slot(self) -> u8 {
        match self {
            Region::A => 1,
            Region::B => 2,
        }
    }
}

/// Outcome of [`MacroBuffer::try_write`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriteResult {
    Written,
    /// The region is full: writing would overwrite the other macro
    Dropped,
    /// A key release received before anything was written
    Ignored,
}

#[derive(Clone, Copy, Debug, Default)]
struct RegionState {
    /// Number of events written by the current (or last) recording
    len: usize,
    /// Playable length, `None` until the first recording is finished
    extent: Option<usize>,
}

/// The buffer shared by the two dynamic macros.
pub struct MacroBuffer<const N: usize> {
    events: [KeyboardEvent; N],
    regions: [RegionState; 2],
}

impl<const N: usize> Default for MacroBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> MacroBuffer<N> {
    pub const fn new() -> Self {
        Self {
            events: [KeyboardEvent::EMPTY; N],
            regions: [
                RegionState { len: 0, extent: None },
                RegionState { len: 0, extent: None },
            ],
        }
    }

    fn state(&self, region: Region) -> &RegionState {
        &self.regions[region as usize]
    }

    fn state_mut(&mut self, region: Region) -> &mut RegionState {
        &mut self.regions[region as usize]
    }

    /// Buffer index of the `offset`-th event of the region.
    fn index(region: Region, offset: usize) -> Option<usize> {
        if offset >= N {
            return None;
        }
        let base = match region {
            Region::A => 0,
            Region::B => N - 1,
        };
        base.checked_add_signed(region.direction() as isize * offset as isize)
    }

    /// Move the cursor of the region back to its base, the finalized extent is kept until the
    /// next [`finish`](Self::finish).
    pub fn reset(&mut self, region: Region) {
        self.state_mut(region).len = 0;
    }

    /// Number of events written by the current recording of the region.
    pub fn len(&self, region: Region) -> usize {
        self.state(region).len
    }

    pub fn is_empty(&self, region: Region) -> bool {
        self.extent(region).unwrap_or(0) == 0
    }

    /// Playable length of the region, `None` if it has never been recorded.
    pub fn extent(&self, region: Region) -> Option<usize> {
        self.state(region).extent
    }

    /// Number of slots a recording of the region can use.
    ///
    /// The far end of the other macro is the last slot that's safe to use before overwriting it.
    pub fn capacity(&self, region: Region) -> usize {
        N - self.extent(region.other()).unwrap_or(0)
    }

    /// Number of slots held by the region: its finalized macro or the recording in progress,
    /// whichever is longer.
    pub fn occupied(&self, region: Region) -> usize {
        let state = self.state(region);
        state.len.max(state.extent.unwrap_or(0))
    }

    /// Store an event at the cursor of the region and advance the cursor.
    ///
    /// The boundary is checked before the write, the other macro is never overwritten.
    pub fn try_write(&mut self, region: Region, event: KeyboardEvent) -> WriteResult {
        let len = self.len(region);

        // If we've just started recording, ignore all the key releases
        if !event.pressed && len == 0 {
            debug!("dynamic macro: ignoring a leading key-up event");
            return WriteResult::Ignored;
        }

        let capacity = self.capacity(region);
        let result = match Self::index(region, len) {
            Some(idx) if len < capacity => {
                self.events[idx] = event;
                self.state_mut(region).len = len + 1;
                WriteResult::Written
            }
            _ => WriteResult::Dropped,
        };

        debug!(
            "dynamic macro: slot {} length: {}/{}",
            region.slot(),
            self.len(region),
            capacity
        );
        result
    }

    /// Finish the recording of the region, the trimmed length becomes the new extent.
    ///
    /// Keys still held when the recording stops, i.e. the keys used to reach the stop trigger,
    /// are trimmed from the tail.
    pub fn finish(&mut self, region: Region) -> usize {
        let mut len = self.len(region);
        while len > 0 && self.get_raw(region, len - 1).is_some_and(|e| e.pressed) {
            debug!("dynamic macro: trimming a trailing key-down event");
            len -= 1;
        }

        let state = self.state_mut(region);
        state.len = len;
        state.extent = Some(len);
        debug!("dynamic macro: slot {} saved, length: {}", region.slot(), len);
        len
    }

    fn get_raw(&self, region: Region, offset: usize) -> Option<KeyboardEvent> {
        Self::index(region, offset).map(|idx| self.events[idx])
    }

    /// Get the `offset`-th event of the finalized macro, in playback order.
    pub fn get(&self, region: Region, offset: usize) -> Option<KeyboardEvent> {
        if offset < self.extent(region).unwrap_or(0) {
            self.get_raw(region, offset)
        } else {
            None
        }
    }

    /// Iterate the finalized macro of the region in playback order.
    pub fn events(&self, region: Region) -> impl Iterator<Item = KeyboardEvent> + '_ {
        (0..self.extent(region).unwrap_or(0)).filter_map(move |i| self.get_raw(region, i))
    }
}
