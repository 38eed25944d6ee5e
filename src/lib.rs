//! Host-testable library for the sofle-status keyboard widget.
//!
//! Everything that decides *what* the OLED shows lives here and builds
//! without hardware: the status aggregator, the text formatters, the
//! surface registry and the battery voltage curve.
//!
//! Usage: `cargo test`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and links this library for the widget itself.

#![cfg_attr(not(test), no_std)]

pub mod battery_logic;
pub mod board;
pub mod config;
pub mod error;
pub mod widget;

pub use error::Error;
pub use widget::{
    Applied, BatteryState, DeviceStatus, DisplaySurface, LayerSource, ProfileSource, Region,
    StatusAggregator, StatusEvent, StatusFormatter, SurfaceId, UsbConnState,
};

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use crate::battery_logic::{millivolts_from_raw, percent_from_millivolts};
    use crate::config::{
        BATTERY_DIVIDER_RATIO, LIPO_DISCHARGE_CURVE, SAADC_FULL_SCALE_MV, SAADC_MAX_COUNT,
    };

    // ════════════════════════════════════════════════════════════════════════
    // Battery Voltage Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn millivolts_from_raw_undoes_divider() {
        // 2048 counts = half of 3.6 V full scale = 1800 mV at the pin.
        let mv = millivolts_from_raw(
            2048,
            SAADC_FULL_SCALE_MV,
            SAADC_MAX_COUNT,
            BATTERY_DIVIDER_RATIO,
        );
        assert_eq!(mv, 3600);
    }

    #[test]
    fn millivolts_from_raw_clamps_negative_readings() {
        let mv = millivolts_from_raw(-12, SAADC_FULL_SCALE_MV, SAADC_MAX_COUNT, 2);
        assert_eq!(mv, 0);
    }

    #[test]
    fn percent_from_millivolts_hits_curve_points() {
        assert_eq!(percent_from_millivolts(4200, LIPO_DISCHARGE_CURVE), 100);
        assert_eq!(percent_from_millivolts(3800, LIPO_DISCHARGE_CURVE), 50);
        assert_eq!(percent_from_millivolts(3300, LIPO_DISCHARGE_CURVE), 0);
    }

    #[test]
    fn percent_from_millivolts_interpolates() {
        // Halfway between 3800 (50%) and 3900 (65%).
        assert_eq!(percent_from_millivolts(3850, LIPO_DISCHARGE_CURVE), 57);
        // Halfway between 4100 (90%) and 4200 (100%).
        assert_eq!(percent_from_millivolts(4150, LIPO_DISCHARGE_CURVE), 95);
    }

    #[test]
    fn percent_from_millivolts_clamps_outside_curve() {
        assert_eq!(percent_from_millivolts(4450, LIPO_DISCHARGE_CURVE), 100);
        assert_eq!(percent_from_millivolts(2900, LIPO_DISCHARGE_CURVE), 0);
        assert_eq!(percent_from_millivolts(0, LIPO_DISCHARGE_CURVE), 0);
    }

    #[test]
    fn percent_from_millivolts_empty_curve_is_zero() {
        assert_eq!(percent_from_millivolts(4000, &[]), 0);
    }

    #[test]
    fn percent_never_exceeds_100_over_full_range() {
        for mv in (0..=5000u16).step_by(7) {
            assert!(percent_from_millivolts(mv, LIPO_DISCHARGE_CURVE) <= 100);
        }
    }
}
