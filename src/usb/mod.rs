//! USB Device subsystem - reports the host link state to the widget.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`.  We expose a single boot-keyboard HID interface and
//! watch the bus callbacks: the Bluetooth region shows `USB` only while
//! the host has the HID interface configured.

pub mod link;
