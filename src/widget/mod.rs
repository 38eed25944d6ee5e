//! Status widget - layer, battery and Bluetooth profile on a small display.
//!
//! The widget reacts to four notifications from the rest of the firmware
//! and keeps one [`DeviceStatus`] record up to date. After every accepted
//! notification it formats the record into three lines and paints them
//! on each registered [`DisplaySurface`].
//!
//! ## Components
//!
//! - **StatusAggregator**: owns the status and dispatches events
//! - **SurfaceRegistry**: ordered, owned set of render targets
//! - **StatusFormatter**: pure text formatting (layer table, glyphs)

pub mod aggregator;
pub mod event;
pub mod format;
pub mod status;
pub mod surface;


pub use aggregator::{Applied, StatusAggregator};
pub use event::{BatteryState, EventKind, LayerSource, ProfileSource, StatusEvent, UsbConnState};
pub use format::{BatteryBucket, GlyphSet, LayerNames, Line, StatusFormatter, StatusLines};
pub use status::DeviceStatus;
pub use surface::{DisplaySurface, Region, RenderSummary, SurfaceId, SurfaceRegistry};
