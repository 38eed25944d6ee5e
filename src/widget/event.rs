//! Notifications the widget subscribes to, and the collaborator queries
//! it pulls from when a notification carries no payload.

/// Battery fuel-gauge report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryState {
    /// State of charge in percent. Values above 100 are rejected.
    pub state_of_charge: u8,
    /// External power is actively charging the cell.
    pub charging: bool,
}

impl BatteryState {
    pub const fn new(state_of_charge: u8, charging: bool) -> Self {
        Self {
            state_of_charge,
            charging,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.state_of_charge <= 100
    }
}

/// USB connection state as reported by the USB stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsbConnState {
    /// No VBUS / cable unplugged.
    Disconnected,
    /// VBUS present but the host has not configured the HID interface.
    Powered,
    /// Host has configured the device; HID reports go over USB.
    Hid,
}

/// Kinds of notification the widget handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    BatteryStateChanged,
    UsbConnStateChanged,
    ActiveProfileChanged,
    LayerStateChanged,
}

impl EventKind {
    /// Every kind the widget subscribes to, for hosts that filter by kind.
    pub const ALL: [EventKind; 4] = [
        EventKind::BatteryStateChanged,
        EventKind::UsbConnStateChanged,
        EventKind::ActiveProfileChanged,
        EventKind::LayerStateChanged,
    ];
}

/// A notification as delivered by the host event system.
///
/// Payload-carrying events use `None` for an absent or undecodable
/// payload; the widget ignores those.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusEvent {
    BatteryStateChanged(Option<BatteryState>),
    UsbConnStateChanged(Option<UsbConnState>),
    /// Pull the new index from [`ProfileSource`].
    ActiveProfileChanged,
    /// Pull the new layer from [`LayerSource`].
    LayerStateChanged,
}

impl StatusEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            StatusEvent::BatteryStateChanged(_) => EventKind::BatteryStateChanged,
            StatusEvent::UsbConnStateChanged(_) => EventKind::UsbConnStateChanged,
            StatusEvent::ActiveProfileChanged => EventKind::ActiveProfileChanged,
            StatusEvent::LayerStateChanged => EventKind::LayerStateChanged,
        }
    }
}

/// Bluetooth collaborator: which pairing slot is selected.
pub trait ProfileSource {
    fn active_profile_index(&self) -> i32;
}

/// Keymap collaborator: which layer currently wins.
pub trait LayerSource {
    fn highest_active_layer(&self) -> u8;
}

impl<T: ProfileSource + ?Sized> ProfileSource for &T {
    fn active_profile_index(&self) -> i32 {
        (**self).active_profile_index()
    }
}

impl<T: LayerSource + ?Sized> LayerSource for &T {
    fn highest_active_layer(&self) -> u8 {
        (**self).highest_active_layer()
    }
}
