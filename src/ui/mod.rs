//! User interface - OLED status display + board keys.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×64 OLED via I²C, registered with the
//!   status widget as its only surface
//! - **Keys**: 2 tactile switches with debouncing (LAYER, PROFILE)

pub mod buttons;
pub mod display;
