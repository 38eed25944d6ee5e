//! Event handling: mutate [`DeviceStatus`], then repaint every surface.

use super::event::{BatteryState, LayerSource, ProfileSource, StatusEvent, UsbConnState};
use super::format::StatusFormatter;
use super::status::DeviceStatus;
use super::surface::{DisplaySurface, RenderSummary, SurfaceId, SurfaceRegistry};
use crate::error::Error;

/// What a handler did with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Applied {
    /// State changed and every surface was repainted.
    Rendered(RenderSummary),
    /// Payload was absent or invalid; nothing changed.
    Ignored,
}

/// Owns the device status, the surface registry and the formatting
/// policy. Handlers take `&mut self`, so one event is applied and
/// rendered to completion before the next.
pub struct StatusAggregator<'a, S, P, L, const N: usize> {
    status: DeviceStatus,
    surfaces: SurfaceRegistry<S, N>,
    formatter: StatusFormatter<'a>,
    profiles: P,
    layers: L,
}

impl<'a, S, P, L, const N: usize> StatusAggregator<'a, S, P, L, N>
where
    S: DisplaySurface,
    P: ProfileSource,
    L: LayerSource,
{
    pub fn new(formatter: StatusFormatter<'a>, profiles: P, layers: L) -> Self {
        Self {
            status: DeviceStatus::default(),
            surfaces: SurfaceRegistry::new(),
            formatter,
            profiles,
            layers,
        }
    }

    pub fn status(&self) -> &DeviceStatus {
        &self.status
    }

    pub fn formatter(&self) -> &StatusFormatter<'a> {
        &self.formatter
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut S> {
        self.surfaces.get_mut(id)
    }

    /// Register a surface and paint it with the current status.
    pub fn register(&mut self, surface: S) -> Result<SurfaceId, Error> {
        let lines = self.formatter.lines(&self.status);
        self.surfaces.register(surface, &lines)
    }

    /// Register the surface produced by the toolkit's `create` callback.
    pub fn register_with<F>(&mut self, create: F) -> Result<SurfaceId, Error>
    where
        F: FnOnce() -> Result<S, Error>,
    {
        let surface = create()?;
        self.register(surface)
    }

    /// Hand back the surface with `id`. Unknown ids return `None`.
    pub fn deregister(&mut self, id: SurfaceId) -> Option<S> {
        self.surfaces.deregister(id)
    }

    /// Display subsystem shutdown: release every surface.
    pub fn teardown(&mut self) {
        self.surfaces.clear();
    }

    /// Dispatch `event` to its handler.
    pub fn apply(&mut self, event: StatusEvent) -> Applied {
        match event {
            StatusEvent::BatteryStateChanged(payload) => self.on_battery_changed(payload),
            StatusEvent::UsbConnStateChanged(payload) => self.on_usb_connection_changed(payload),
            StatusEvent::ActiveProfileChanged => self.on_active_profile_changed(),
            StatusEvent::LayerStateChanged => self.on_active_layer_changed(),
        }
    }

    pub fn on_battery_changed(&mut self, payload: Option<BatteryState>) -> Applied {
        let Some(battery) = payload.filter(BatteryState::is_valid) else {
            #[cfg(feature = "defmt")]
            defmt::debug!("Ignoring battery event with bad payload: {}", payload);
            return Applied::Ignored;
        };

        self.status.battery_level = battery.state_of_charge;
        self.status.battery_charging = battery.charging;
        Applied::Rendered(self.render_all())
    }

    pub fn on_usb_connection_changed(&mut self, payload: Option<UsbConnState>) -> Applied {
        let Some(state) = payload else {
            #[cfg(feature = "defmt")]
            defmt::debug!("Ignoring USB event without payload");
            return Applied::Ignored;
        };

        self.status.usb_active = state == UsbConnState::Hid;
        Applied::Rendered(self.render_all())
    }

    pub fn on_active_profile_changed(&mut self) -> Applied {
        self.status.active_profile = self.profiles.active_profile_index();
        Applied::Rendered(self.render_all())
    }

    pub fn on_active_layer_changed(&mut self) -> Applied {
        self.status.active_layer = self.layers.highest_active_layer();
        Applied::Rendered(self.render_all())
    }

    /// Format the current status once and paint it on every surface.
    pub fn render_all(&mut self) -> RenderSummary {
        let lines = self.formatter.lines(&self.status);
        self.surfaces.render_all(&lines)
    }
}
