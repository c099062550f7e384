#![doc = r#"
Quantization of note onsets to a fixed 16-slot step grid.

One bar of 4/4 at the assumed 960 ticks-per-quarter resolution spans
[`BAR`] ticks, divided into [`SLOTS_PER_BAR`] slots of [`STEP`] ticks. A
note's slot is derived from its absolute tick position; the grid only ever
represents a single bar, and notes past it are rejected outright.
"#]

use thiserror::Error;

/// Ticks in one bar.
pub const BAR: u32 = 3840;
/// Ticks in one grid slot (BAR / 16).
pub const STEP: u32 = 240;
/// Slots in the grid.
pub const SLOTS_PER_BAR: u32 = 16;

/// Errors filling the step grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// A note onset mapping past the single supported bar.
    #[error("step {step} falls outside the {SLOTS_PER_BAR} slot bar")]
    StepOutOfBar {
        /// The 1-based step index the note mapped to.
        step: u32,
    },
}

/// One slot of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSlot {
    /// 1-based slot index within the bar.
    pub index: u32,
    /// Whether the slot sounds.
    pub active: bool,
    /// Key number of the note placed here, if any.
    pub key: Option<u8>,
}

#[doc = r#"
Accumulates one track's note onsets into grid slots.

The `step` cursor is the last emitted slot index (starting at 0). Each
note onset advances the cursor to `absolute_time / STEP + 1`, filling the
slots skipped over on the way there. Skipped slots are emitted active with
no key, reproducing the behavior of the sequencer this format was built
for; only end-of-track padding is silent.
"#]
#[derive(Debug, Default)]
pub struct StepGrid {
    step: u32,
    slots: Vec<StepSlot>,
}

impl StepGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// The 1-based slot index an absolute tick position falls into.
    pub const fn step_of(absolute_time: u32) -> u32 {
        absolute_time / STEP + 1
    }

    /// Place a note onset.
    pub fn note_on(&mut self, absolute_time: u32, key: u8) -> Result<(), GridError> {
        let current = Self::step_of(absolute_time);
        if current > SLOTS_PER_BAR {
            return Err(GridError::StepOutOfBar { step: current });
        }
        self.step += 1;
        while self.step < current {
            self.slots.push(StepSlot {
                index: self.step,
                active: true,
                key: None,
            });
            self.step += 1;
        }
        self.slots.push(StepSlot {
            index: current,
            active: true,
            key: Some(key),
        });
        self.step = current;
        Ok(())
    }

    /// Close out the track.
    ///
    /// A grid that never saw a note stays empty; otherwise the remaining
    /// slots up to 16 are padded silent.
    pub fn finish(mut self) -> Vec<StepSlot> {
        if self.slots.is_empty() {
            return self.slots;
        }
        while self.step < SLOTS_PER_BAR {
            self.step += 1;
            self.slots.push(StepSlot {
                index: self.step,
                active: false,
                key: None,
            });
        }
        self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_mapping() {
        assert_eq!(StepGrid::step_of(0), 1);
        assert_eq!(StepGrid::step_of(239), 1);
        assert_eq!(StepGrid::step_of(240), 2);
        assert_eq!(StepGrid::step_of(3839), 16);
        assert_eq!(StepGrid::step_of(3840), 17);
    }

    #[test]
    fn empty_grid_stays_empty() {
        let grid = StepGrid::new();
        assert!(grid.finish().is_empty());
    }

    #[test]
    fn note_at_zero_lands_on_step_one() {
        let mut grid = StepGrid::new();
        grid.note_on(0, 60).unwrap();
        let slots = grid.finish();
        assert_eq!(slots.len(), 16);
        assert_eq!(
            slots[0],
            StepSlot {
                index: 1,
                active: true,
                key: Some(60)
            }
        );
        for (at, slot) in slots[1..].iter().enumerate() {
            assert_eq!(slot.index as usize, at + 2);
            assert!(!slot.active);
            assert_eq!(slot.key, None);
        }
    }

    #[test]
    fn skipped_slots_are_marked_active_without_a_key() {
        let mut grid = StepGrid::new();
        // lands on step 4; steps 1-3 are skipped over
        grid.note_on(3 * STEP, 72).unwrap();
        let slots = grid.finish();
        for slot in &slots[..3] {
            assert!(slot.active);
            assert_eq!(slot.key, None);
        }
        assert_eq!(
            slots[3],
            StepSlot {
                index: 4,
                active: true,
                key: Some(72)
            }
        );
    }

    #[test]
    fn padding_after_last_note() {
        let mut grid = StepGrid::new();
        grid.note_on(0, 60).unwrap();
        grid.note_on(9 * STEP, 61).unwrap(); // step 10
        let slots = grid.finish();
        assert_eq!(slots.len(), 16);
        let tail = &slots[slots.len() - 6..];
        for (at, slot) in tail.iter().enumerate() {
            assert_eq!(slot.index as usize, 11 + at);
            assert!(!slot.active);
            assert_eq!(slot.key, None);
        }
    }

    #[test]
    fn two_notes_in_the_same_slot() {
        let mut grid = StepGrid::new();
        grid.note_on(0, 60).unwrap();
        grid.note_on(100, 64).unwrap(); // still step 1
        let slots = grid.finish();
        assert_eq!(slots[0].key, Some(60));
        assert_eq!(slots[1].index, 1);
        assert_eq!(slots[1].key, Some(64));
    }

    #[test]
    fn notes_past_the_bar_are_rejected() {
        let mut grid = StepGrid::new();
        assert_eq!(
            grid.note_on(BAR, 60),
            Err(GridError::StepOutOfBar { step: 17 })
        );
        assert_eq!(
            grid.note_on(16 * STEP, 60),
            Err(GridError::StepOutOfBar { step: 17 })
        );
    }
}
