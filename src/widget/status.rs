//! Denormalised view of device state shown by the widget.

/// Last known state of the keyboard, one field per event kind.
///
/// Owned by [`StatusAggregator`](super::StatusAggregator); surfaces only
/// ever see it through a formatted [`StatusLines`](super::StatusLines)
/// snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceStatus {
    /// State of charge, 0..=100. Zero until the first battery report.
    pub battery_level: u8,
    /// External power is charging the cell.
    pub battery_charging: bool,
    /// Host link is USB HID rather than wireless.
    pub usb_active: bool,
    /// Pairing slot index as reported by the Bluetooth stack.
    /// Not guaranteed to be inside the slot range.
    pub active_profile: i32,
    /// Highest-priority active keymap layer.
    pub active_layer: u8,
}

/// `profile` as a slot index, or `None` when outside `0..slot_count`.
pub fn slot_index(profile: i32, slot_count: usize) -> Option<usize> {
    usize::try_from(profile).ok().filter(|&slot| slot < slot_count)
}
