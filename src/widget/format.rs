//! Pure mappings from [`DeviceStatus`] fields to region text.
//!
//! Nothing here holds state; the same status always formats to the same
//! lines. Glyph characters and layer labels are policy, supplied through
//! [`GlyphSet`] and [`LayerNames`].

use core::fmt::Write;

use heapless::String;

use super::status::{slot_index, DeviceStatus};
use crate::config::{
    DEFAULT_LAYER_NAMES, LINE_CAPACITY, PAIRING_SLOT_COUNT, UNKNOWN_LAYER_LABEL, USB_MARKER,
};

/// One formatted region line.
pub type Line = String<LINE_CAPACITY>;

/// Five-step battery thermometer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryBucket {
    Empty,
    Quarter,
    Half,
    ThreeQuarters,
    Full,
}

impl BatteryBucket {
    /// Strict greater-than thresholds: 80 is `ThreeQuarters`, 20 is `Empty`.
    pub fn from_level(level: u8) -> Self {
        if level > 80 {
            BatteryBucket::Full
        } else if level > 60 {
            BatteryBucket::ThreeQuarters
        } else if level > 40 {
            BatteryBucket::Half
        } else if level > 20 {
            BatteryBucket::Quarter
        } else {
            BatteryBucket::Empty
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Characters used for the battery thermometer and the slot indicators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphSet<'a> {
    /// Thermometer per bucket, ordered `Empty` → `Full`.
    pub battery: [&'a str; 5],
    pub slot_filled: char,
    pub slot_empty: char,
}

impl GlyphSet<'static> {
    /// Block elements and circles, for toolkits with Unicode fonts.
    pub const BLOCKS: GlyphSet<'static> = GlyphSet {
        battery: ["[░░░░]", "[█░░░]", "[██░░]", "[███░]", "[████]"],
        slot_filled: '●',
        slot_empty: '○',
    };

    /// Plain ASCII, for the built-in mono fonts of small OLED drivers.
    pub const ASCII: GlyphSet<'static> = GlyphSet {
        battery: ["[----]", "[#---]", "[##--]", "[###-]", "[####]"],
        slot_filled: '*',
        slot_empty: '-',
    };
}

impl<'a> GlyphSet<'a> {
    pub fn battery_glyph(&self, bucket: BatteryBucket) -> &'a str {
        self.battery[bucket.index()]
    }
}

/// Ordered `(layer index, label)` table with a fallback label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerNames<'a> {
    entries: &'a [(u8, &'a str)],
    fallback: &'a str,
}

impl<'a> LayerNames<'a> {
    pub const fn new(entries: &'a [(u8, &'a str)]) -> Self {
        Self {
            entries,
            fallback: UNKNOWN_LAYER_LABEL,
        }
    }

    pub fn with_fallback(mut self, fallback: &'a str) -> Self {
        self.fallback = fallback;
        self
    }

    /// Label for `layer`, or the fallback when the table has no entry.
    pub fn name(&self, layer: u8) -> &'a str {
        self.entries
            .iter()
            .find(|(index, _)| *index == layer)
            .map(|(_, label)| *label)
            .unwrap_or(self.fallback)
    }
}

impl Default for LayerNames<'static> {
    fn default() -> Self {
        Self::new(DEFAULT_LAYER_NAMES)
    }
}

/// The three region lines for one snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusLines {
    pub layer: Line,
    pub battery: Line,
    pub bluetooth: Line,
}

/// Formatting policy: layer table, glyphs, slot count and USB marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusFormatter<'a> {
    pub layers: LayerNames<'a>,
    pub glyphs: GlyphSet<'a>,
    pub slot_count: usize,
    pub usb_marker: &'a str,
}

impl Default for StatusFormatter<'static> {
    fn default() -> Self {
        Self {
            layers: LayerNames::default(),
            glyphs: GlyphSet::BLOCKS,
            slot_count: PAIRING_SLOT_COUNT,
            usb_marker: USB_MARKER,
        }
    }
}

impl<'a> StatusFormatter<'a> {
    pub fn with_glyphs(mut self, glyphs: GlyphSet<'a>) -> Self {
        self.glyphs = glyphs;
        self
    }

    pub fn with_layers(mut self, layers: LayerNames<'a>) -> Self {
        self.layers = layers;
        self
    }

    pub fn layer_name(&self, layer: u8) -> &'a str {
        self.layers.name(layer)
    }

    pub fn battery_glyph(&self, level: u8) -> &'a str {
        self.glyphs.battery_glyph(BatteryBucket::from_level(level))
    }

    /// `USB` while on USB, otherwise `BT:[n]` plus one indicator per slot.
    ///
    /// An out-of-range profile shows `?` and no filled slot.
    pub fn bluetooth_status(&self, profile: i32, usb_active: bool) -> Line {
        let mut line = Line::new();
        if usb_active {
            push_truncated(&mut line, self.usb_marker);
            return line;
        }

        let slot = slot_index(profile, self.slot_count);

        let _ = line.push_str("BT:[");
        match slot {
            Some(slot) => {
                let _ = write!(line, "{}", slot + 1);
            }
            None => {
                let _ = line.push('?');
            }
        }
        let _ = line.push(']');

        for i in 0..self.slot_count {
            let glyph = if slot == Some(i) {
                self.glyphs.slot_filled
            } else {
                self.glyphs.slot_empty
            };
            if line.push(glyph).is_err() {
                break;
            }
        }
        line
    }

    pub fn layer_line(&self, status: &DeviceStatus) -> Line {
        let mut line = Line::new();
        let _ = line.push_str("LAYER: ");
        push_truncated(&mut line, self.layer_name(status.active_layer));
        line
    }

    pub fn battery_line(&self, status: &DeviceStatus) -> Line {
        let level = status.battery_level.min(100);

        // ` 100% CHG` at most; the glyph gives way to it.
        let mut suffix: String<9> = String::new();
        let _ = write!(suffix, " {}%", level);
        if status.battery_charging {
            let _ = suffix.push_str(" CHG");
        }

        let mut line = Line::new();
        let _ = line.push_str("BAT: ");
        push_truncated_within(&mut line, self.battery_glyph(level), suffix.len());
        let _ = line.push_str(&suffix);
        line
    }

    pub fn bluetooth_line(&self, status: &DeviceStatus) -> Line {
        self.bluetooth_status(status.active_profile, status.usb_active)
    }

    /// Format all three regions from one snapshot.
    pub fn lines(&self, status: &DeviceStatus) -> StatusLines {
        StatusLines {
            layer: self.layer_line(status),
            battery: self.battery_line(status),
            bluetooth: self.bluetooth_line(status),
        }
    }
}

/// Append as much of `text` as fits, cutting on a char boundary.
fn push_truncated(line: &mut Line, text: &str) {
    push_truncated_within(line, text, 0);
}

/// Like [`push_truncated`], but leaves `reserve` bytes free.
fn push_truncated_within(line: &mut Line, text: &str, reserve: usize) {
    let limit = LINE_CAPACITY.saturating_sub(reserve);
    for c in text.chars() {
        if line.len() + c.len_utf8() > limit || line.push(c).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn battery_bucket_boundaries_are_strict() {
        assert_eq!(BatteryBucket::from_level(100), BatteryBucket::Full);
        assert_eq!(BatteryBucket::from_level(81), BatteryBucket::Full);
        assert_eq!(BatteryBucket::from_level(80), BatteryBucket::ThreeQuarters);
        assert_eq!(BatteryBucket::from_level(61), BatteryBucket::ThreeQuarters);
        assert_eq!(BatteryBucket::from_level(60), BatteryBucket::Half);
        assert_eq!(BatteryBucket::from_level(41), BatteryBucket::Half);
        assert_eq!(BatteryBucket::from_level(40), BatteryBucket::Quarter);
        assert_eq!(BatteryBucket::from_level(21), BatteryBucket::Quarter);
        assert_eq!(BatteryBucket::from_level(20), BatteryBucket::Empty);
        assert_eq!(BatteryBucket::from_level(0), BatteryBucket::Empty);
    }

    #[test]
    fn battery_buckets_are_monotonic_and_cover_full_range() {
        let mut previous = BatteryBucket::Empty;
        let mut seen = [false; 5];
        for level in 0..=100u8 {
            let bucket = BatteryBucket::from_level(level);
            assert!(bucket >= previous, "bucket went down at {}", level);
            seen[bucket.index()] = true;
            previous = bucket;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn battery_glyph_follows_glyph_set() {
        let blocks = StatusFormatter::default();
        assert_eq!(blocks.battery_glyph(55), "[██░░]");
        assert_eq!(blocks.battery_glyph(80), "[███░]");

        let ascii = StatusFormatter::default().with_glyphs(GlyphSet::ASCII);
        assert_eq!(ascii.battery_glyph(81), "[####]");
        assert_eq!(ascii.battery_glyph(20), "[----]");
    }

    #[test]
    fn layer_names_default_table() {
        let names = LayerNames::default();
        assert_eq!(names.name(0), "AZERTY");
        assert_eq!(names.name(1), "SYMBOLES");
        assert_eq!(names.name(2), "RAISE");
        assert_eq!(names.name(3), "ADJUST");
        assert_eq!(names.name(4), "UNKNOWN");
        assert_eq!(names.name(255), "UNKNOWN");
    }

    #[test]
    fn layer_names_custom_table_and_fallback() {
        const TABLE: &[(u8, &str)] = &[(0, "BASE"), (7, "GAME")];
        let names = LayerNames::new(TABLE).with_fallback("?");
        assert_eq!(names.name(0), "BASE");
        assert_eq!(names.name(7), "GAME");
        assert_eq!(names.name(1), "?");
    }

    #[test]
    fn bluetooth_status_marks_exactly_one_slot() {
        let fmt = StatusFormatter::default();
        assert_eq!(fmt.bluetooth_status(0, false).as_str(), "BT:[1]●○○○○");
        assert_eq!(fmt.bluetooth_status(2, false).as_str(), "BT:[3]○○●○○");
        assert_eq!(fmt.bluetooth_status(4, false).as_str(), "BT:[5]○○○○●");

        for profile in 0..5 {
            let line = fmt.bluetooth_status(profile, false);
            let filled: heapless::Vec<usize, 5> = line
                .chars()
                .skip("BT:[n]".len())
                .enumerate()
                .filter(|(_, c)| *c == '●')
                .map(|(i, _)| i)
                .collect();
            assert_eq!(filled.as_slice(), &[profile as usize]);
        }
    }

    #[test]
    fn bluetooth_status_out_of_range_marks_nothing() {
        let fmt = StatusFormatter::default();
        for profile in [-1, 5, 6, i32::MIN, i32::MAX] {
            let line = fmt.bluetooth_status(profile, false);
            assert_eq!(line.as_str(), "BT:[?]○○○○○");
        }
    }

    #[test]
    fn bluetooth_status_usb_overrides_profile() {
        let fmt = StatusFormatter::default();
        for profile in [-3, 0, 2, 4, 99] {
            assert_eq!(fmt.bluetooth_status(profile, true).as_str(), "USB");
        }
    }

    #[test]
    fn bluetooth_status_respects_slot_count() {
        let mut fmt = StatusFormatter::default().with_glyphs(GlyphSet::ASCII);
        fmt.slot_count = 3;
        assert_eq!(fmt.bluetooth_status(2, false).as_str(), "BT:[3]--*");
        assert_eq!(fmt.bluetooth_status(3, false).as_str(), "BT:[?]---");
    }

    #[test]
    fn battery_line_shows_level_and_charge_flag() {
        let fmt = StatusFormatter::default();
        let mut status = DeviceStatus {
            battery_level: 55,
            ..DeviceStatus::default()
        };
        assert_eq!(fmt.battery_line(&status).as_str(), "BAT: [██░░] 55%");

        status.battery_level = 100;
        status.battery_charging = true;
        assert_eq!(fmt.battery_line(&status).as_str(), "BAT: [████] 100% CHG");
    }

    #[test]
    fn battery_line_keeps_level_with_oversized_glyph() {
        const WIDE: &str = "[################################################]";
        let glyphs = GlyphSet {
            battery: [WIDE; 5],
            ..GlyphSet::ASCII
        };
        let fmt = StatusFormatter::default().with_glyphs(glyphs);
        let status = DeviceStatus {
            battery_level: 100,
            battery_charging: true,
            ..DeviceStatus::default()
        };

        let line = fmt.battery_line(&status);
        assert_eq!(line.len(), LINE_CAPACITY);
        assert!(line.starts_with("BAT: [####"));
        assert!(line.ends_with("# 100% CHG"));

        let line = fmt.battery_line(&DeviceStatus::default());
        assert!(line.ends_with("# 0%"));
    }

    #[test]
    fn layer_line_truncates_long_labels() {
        const TABLE: &[(u8, &str)] = &[(
            0,
            "AN-EXTREMELY-LONG-LAYER-NAME-THAT-DOES-NOT-FIT-ON-ANY-OLED",
        )];
        let fmt = StatusFormatter::default().with_layers(LayerNames::new(TABLE));
        let line = fmt.layer_line(&DeviceStatus::default());
        assert_eq!(line.len(), LINE_CAPACITY);
        assert!(line.starts_with("LAYER: AN-EXTREMELY"));
    }

    #[test]
    fn default_status_formats_to_defaults() {
        let lines = StatusFormatter::default().lines(&DeviceStatus::default());
        assert_eq!(lines.layer.as_str(), "LAYER: AZERTY");
        assert_eq!(lines.battery.as_str(), "BAT: [░░░░] 0%");
        assert_eq!(lines.bluetooth.as_str(), "BT:[1]●○○○○");
    }
}
