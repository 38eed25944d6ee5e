//! Application-wide constants and compile-time configuration.
//!
//! Widget limits, default labels, hardware pin assignments and timing
//! parameters live here so they can be tuned in one place.

// Widget

/// Number of wireless pairing slots shown in the Bluetooth indicator.
pub const PAIRING_SLOT_COUNT: usize = 5;

/// Maximum number of display surfaces registered at once.
/// One per physical OLED; the split halves each run their own firmware.
pub const MAX_SURFACES: usize = 2;

/// Capacity (bytes) of one formatted region line.
///
/// Sized for the Unicode glyph set: `BAT: [████] 100% CHG` is 28 bytes.
pub const LINE_CAPACITY: usize = 48;

/// Default layer labels, in keymap order.
pub const DEFAULT_LAYER_NAMES: &[(u8, &str)] = &[
    (0, "AZERTY"),
    (1, "SYMBOLES"),
    (2, "RAISE"),
    (3, "ADJUST"),
];

/// Label shown for layers missing from the name table.
pub const UNKNOWN_LAYER_LABEL: &str = "UNKNOWN";

/// Marker shown in the Bluetooth region while the host link is USB.
pub const USB_MARKER: &str = "USB";

/// Depth of the event queue feeding the display task.
pub const STATUS_EVENT_QUEUE_DEPTH: usize = 8;

// OLED
//
//   I²C SDA → P0.17
//   I²C SCL → P0.20

/// Top edge (pixels) of each text region. Layer, bluetooth, battery.
pub const OLED_LAYER_ROW_Y: i32 = 0;
pub const OLED_BLUETOOTH_ROW_Y: i32 = 16;
pub const OLED_BATTERY_ROW_Y: i32 = 32;

// Board keys
//
//   LAYER key   → P0.11
//   PROFILE key → P0.12

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Number of keymap layers the LAYER key cycles through.
pub const BOARD_LAYER_COUNT: u8 = 4;

// Battery
//
//   VBAT divider → P0.04 (AIN2)
//   Charger STAT → P0.03 (open-drain, low while charging)

/// Interval between battery samples (seconds).
pub const BATTERY_SAMPLE_INTERVAL_SECS: u64 = 60;

/// VBAT is measured through a 1:2 resistor divider.
pub const BATTERY_DIVIDER_RATIO: u32 = 2;

/// SAADC full scale with internal 0.6 V reference and gain 1/6 (mV).
pub const SAADC_FULL_SCALE_MV: u32 = 3600;

/// SAADC resolution (12-bit).
pub const SAADC_MAX_COUNT: u32 = 4096;

/// LiPo discharge curve, `(millivolts, percent)`, descending voltage.
/// Readings are interpolated linearly between points.
pub const LIPO_DISCHARGE_CURVE: &[(u16, u8)] = &[
    (4200, 100),
    (4100, 90),
    (4000, 80),
    (3900, 65),
    (3800, 50),
    (3700, 30),
    (3600, 15),
    (3500, 5),
    (3300, 0),
];

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "sofle-status";
pub const USB_PRODUCT: &str = "Sofle Keyboard";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 1;
