//! Board-local layer and profile selection.
//!
//! The reference firmware has no keymap engine or Bluetooth stack of its
//! own. Two physical keys stand in for them: LAYER cycles the active
//! layer and PROFILE cycles the pairing slot. The widget pulls both
//! values through [`LayerSource`] and [`ProfileSource`].

use core::sync::atomic::{AtomicU8, Ordering};

use crate::config::{BOARD_LAYER_COUNT, PAIRING_SLOT_COUNT};
use crate::widget::{LayerSource, ProfileSource, StatusEvent};

/// Physical key events (after debouncing).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardKey {
    Layer,
    Profile,
}

/// Advance `current` by one, wrapping at `count`. A zero count stays at 0.
pub fn cycle_next(current: u8, count: u8) -> u8 {
    if count == 0 {
        return 0;
    }
    (current % count + 1) % count
}

/// Current layer and pairing slot, shared between key tasks and the
/// display task.
pub struct BoardState {
    layer: AtomicU8,
    profile: AtomicU8,
}

impl BoardState {
    pub const fn new() -> Self {
        Self {
            layer: AtomicU8::new(0),
            profile: AtomicU8::new(0),
        }
    }

    /// Apply a key press and return the notification the widget needs.
    pub fn press(&self, key: BoardKey) -> StatusEvent {
        match key {
            BoardKey::Layer => {
                let next = cycle_next(self.layer.load(Ordering::Relaxed), BOARD_LAYER_COUNT);
                self.layer.store(next, Ordering::Relaxed);
                StatusEvent::LayerStateChanged
            }
            BoardKey::Profile => {
                let next = cycle_next(
                    self.profile.load(Ordering::Relaxed),
                    PAIRING_SLOT_COUNT as u8,
                );
                self.profile.store(next, Ordering::Relaxed);
                StatusEvent::ActiveProfileChanged
            }
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerSource for BoardState {
    fn highest_active_layer(&self) -> u8 {
        self.layer.load(Ordering::Relaxed)
    }
}

impl ProfileSource for BoardState {
    fn active_profile_index(&self) -> i32 {
        self.profile.load(Ordering::Relaxed) as i32
    }
}
